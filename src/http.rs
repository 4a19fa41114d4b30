//! HTTP surface for the cart service. Requires the `http` feature.
//!
//! A thin axum layer: it authenticates the caller from request headers,
//! invokes the [`CartService`], and maps outcomes to status codes and
//! JSON bodies. No business rules live here.
//!
//! ## Routes
//!
//! Customer routes (identity from the `x-user-id` header, 401 without it):
//!
//! - `GET    /cart`           — current cart (empty cart if none yet).
//! - `POST   /cart/checkout`  — check out the current cart.
//! - `POST   /cart/:model`    — add one unit of a product.
//! - `DELETE /cart/:model`    — remove one unit of a product.
//! - `DELETE /cart`           — clear the current cart.
//! - `GET    /carts`          — paid-cart history.
//!
//! Admin routes (additionally require `x-user-role: admin`, else 403):
//!
//! - `GET    /carts/all`      — every cart, any owner or state.
//! - `DELETE /carts/all`      — delete every cart.
//!
//! `GET /health` answers `{ "ok": true }` unauthenticated.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use storefront::{http, CartService, InMemoryCartStore, InMemoryInventoryStore};
//!
//! let service = Arc::new(CartService::new(
//!     InMemoryCartStore::new(),
//!     InMemoryInventoryStore::new(),
//! ));
//!
//! // Compose with other axum routes, or serve directly:
//! let app = http::router(service.clone());
//! http::serve(service, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::cart::{CartError, CartService, CartStore};
use crate::inventory::InventoryStore;

/// Build an axum `Router` over the given cart service.
pub fn router<C, I>(service: Arc<CartService<C, I>>) -> Router
where
    C: CartStore + 'static,
    I: InventoryStore + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/cart",
            get(current_cart_handler::<C, I>).delete(clear_cart_handler::<C, I>),
        )
        .route("/cart/checkout", post(checkout_handler::<C, I>))
        .route(
            "/cart/:model",
            post(add_product_handler::<C, I>).delete(remove_one_handler::<C, I>),
        )
        .route("/carts", get(history_handler::<C, I>))
        .route(
            "/carts/all",
            get(all_carts_handler::<C, I>).delete(delete_all_handler::<C, I>),
        )
        .with_state(service)
}

/// Serve the cart service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<C, I>(service: Arc<CartService<C, I>>, addr: &str) -> Result<(), std::io::Error>
where
    C: CartStore + 'static,
    I: InventoryStore + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true }`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn current_cart_handler<C: CartStore, I: InventoryStore>(
    State(service): State<Arc<CartService<C, I>>>,
    headers: HeaderMap,
) -> Response {
    let Some(customer) = customer_id(&headers) else {
        return unauthorized();
    };
    respond(service.current_cart(&customer))
}

async fn add_product_handler<C: CartStore, I: InventoryStore>(
    State(service): State<Arc<CartService<C, I>>>,
    Path(model): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Some(customer) = customer_id(&headers) else {
        return unauthorized();
    };
    respond(service.add_product(&customer, &model))
}

async fn remove_one_handler<C: CartStore, I: InventoryStore>(
    State(service): State<Arc<CartService<C, I>>>,
    Path(model): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Some(customer) = customer_id(&headers) else {
        return unauthorized();
    };
    respond(service.remove_one_unit(&customer, &model))
}

async fn clear_cart_handler<C: CartStore, I: InventoryStore>(
    State(service): State<Arc<CartService<C, I>>>,
    headers: HeaderMap,
) -> Response {
    let Some(customer) = customer_id(&headers) else {
        return unauthorized();
    };
    respond(service.clear_cart(&customer))
}

async fn checkout_handler<C: CartStore, I: InventoryStore>(
    State(service): State<Arc<CartService<C, I>>>,
    headers: HeaderMap,
) -> Response {
    let Some(customer) = customer_id(&headers) else {
        return unauthorized();
    };
    respond(service.checkout(&customer))
}

async fn history_handler<C: CartStore, I: InventoryStore>(
    State(service): State<Arc<CartService<C, I>>>,
    headers: HeaderMap,
) -> Response {
    let Some(customer) = customer_id(&headers) else {
        return unauthorized();
    };
    respond(service.customer_carts(&customer))
}

async fn all_carts_handler<C: CartStore, I: InventoryStore>(
    State(service): State<Arc<CartService<C, I>>>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = require_admin(&headers) {
        return denied;
    }
    respond(service.all_carts())
}

async fn delete_all_handler<C: CartStore, I: InventoryStore>(
    State(service): State<Arc<CartService<C, I>>>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = require_admin(&headers) {
        return denied;
    }
    respond(service.delete_all_carts().map(|()| json!({ "ok": true })))
}

/// The authenticated customer identity, forwarded by the gateway in the
/// `x-user-id` header.
fn customer_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Admin routes need an identity and the admin role.
fn require_admin(headers: &HeaderMap) -> Option<Response> {
    if customer_id(headers).is_none() {
        return Some(unauthorized());
    }
    let role = headers.get("x-user-role").and_then(|v| v.to_str().ok());
    if role != Some("admin") {
        return Some(
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "admin role required" })),
            )
                .into_response(),
        );
    }
    None
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "missing x-user-id header" })),
    )
        .into_response()
}

/// Map a service outcome to an HTTP response: 200 with the value as
/// JSON, or the error's status code with `{ "error": ... }`.
fn respond<T: serde::Serialize>(result: Result<T, CartError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
