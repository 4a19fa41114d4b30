//! Cart service integration tests — the full add/remove/checkout
//! lifecycle over the in-memory stores.

use std::sync::Arc;
use std::thread;

use storefront::{
    CartError, CartService, InMemoryCartStore, InMemoryInventoryStore, InventoryStore,
    LineItem, ProductRecord,
};

fn service_with_stock() -> CartService<InMemoryCartStore, InMemoryInventoryStore> {
    let inventory = InMemoryInventoryStore::new();
    inventory
        .insert(ProductRecord::new("p1", "Smartphone", 100, 10))
        .unwrap();
    inventory
        .insert(ProductRecord::new("p2", "Laptop", 250, 3))
        .unwrap();
    inventory
        .insert(ProductRecord::new("p-gone", "Smartphone", 80, 0))
        .unwrap();
    CartService::new(InMemoryCartStore::new(), inventory)
}

fn total_of(lines: &[LineItem]) -> i64 {
    lines.iter().map(LineItem::subtotal).sum()
}

#[test]
fn first_add_creates_the_cart() {
    let service = service_with_stock();

    let cart = service.add_product("u1", "p1").unwrap();
    assert!(!cart.paid);
    assert_eq!(cart.total, 100);
    assert_eq!(cart.products.len(), 1);
    assert_eq!(cart.products[0].model, "p1");
    assert_eq!(cart.products[0].quantity, 1);
    assert_eq!(cart.products[0].snapshot.category, "Smartphone");

    // Stock is untouched at add time.
    assert_eq!(service.inventory().quantity("p1").unwrap(), Some(10));
}

#[test]
fn second_add_increments_the_line() {
    let service = service_with_stock();
    service.add_product("u1", "p1").unwrap();
    let cart = service.add_product("u1", "p1").unwrap();

    assert_eq!(cart.total, 200);
    assert_eq!(cart.products.len(), 1);
    assert_eq!(cart.products[0].quantity, 2);
}

#[test]
fn adds_reuse_the_single_unpaid_cart() {
    let service = service_with_stock();
    let first = service.add_product("u1", "p1").unwrap();
    let second = service.add_product("u1", "p2").unwrap();
    assert_eq!(first.id, second.id);

    // One unpaid cart in the store, not two.
    let all = service.all_carts().unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all[0].paid);
}

#[test]
fn unknown_model_creates_no_cart() {
    let service = service_with_stock();

    match service.add_product("u1", "nonexistent-model") {
        Err(CartError::ProductNotFound(model)) => assert_eq!(model, "nonexistent-model"),
        other => panic!("expected ProductNotFound, got {:?}", other.map(|c| c.id)),
    }

    assert!(service.all_carts().unwrap().is_empty());
    let synthesized = service.current_cart("u1").unwrap();
    assert_eq!(synthesized.id, 0);
    assert!(synthesized.products.is_empty());
}

#[test]
fn add_of_stockless_product_is_rejected() {
    let service = service_with_stock();
    assert!(matches!(
        service.add_product("u1", "p-gone"),
        Err(CartError::EmptyStock(_))
    ));
    assert!(service.all_carts().unwrap().is_empty());
}

#[test]
fn current_cart_read_is_idempotent() {
    let service = service_with_stock();
    assert_eq!(
        service.current_cart("u1").unwrap(),
        service.current_cart("u1").unwrap()
    );

    service.add_product("u1", "p1").unwrap();
    assert_eq!(
        service.current_cart("u1").unwrap(),
        service.current_cart("u1").unwrap()
    );
}

#[test]
fn remove_halves_then_empties() {
    let service = service_with_stock();
    service.add_product("u1", "p1").unwrap();
    service.add_product("u1", "p1").unwrap();

    let cart = service.remove_one_unit("u1", "p1").unwrap();
    assert_eq!(cart.products[0].quantity, 1);
    assert_eq!(cart.total, 100);

    let cart = service.remove_one_unit("u1", "p1").unwrap();
    assert!(cart.products.is_empty());
    assert_eq!(cart.total, 0);
}

#[test]
fn add_then_remove_restores_prior_state() {
    let service = service_with_stock();
    service.add_product("u1", "p2").unwrap();
    let before = service.current_cart("u1").unwrap();

    service.add_product("u1", "p1").unwrap();
    service.remove_one_unit("u1", "p1").unwrap();

    assert_eq!(service.current_cart("u1").unwrap(), before);
}

#[test]
fn remove_error_cases() {
    let service = service_with_stock();

    assert!(matches!(
        service.remove_one_unit("u1", "p1"),
        Err(CartError::CartNotFound(_))
    ));

    service.add_product("u1", "p1").unwrap();
    assert!(matches!(
        service.remove_one_unit("u1", "p2"),
        Err(CartError::ProductNotInCart(_))
    ));

    // An existing but emptied cart is EmptyCart, not ProductNotInCart.
    service.clear_cart("u1").unwrap();
    assert!(matches!(
        service.remove_one_unit("u1", "p1"),
        Err(CartError::EmptyCart(_))
    ));
}

#[test]
fn total_matches_lines_after_every_mutation() {
    let service = service_with_stock();

    service.add_product("u1", "p1").unwrap();
    service.add_product("u1", "p2").unwrap();
    service.add_product("u1", "p1").unwrap();
    service.remove_one_unit("u1", "p2").unwrap();
    service.add_product("u1", "p2").unwrap();
    let cart = service.remove_one_unit("u1", "p1").unwrap();

    assert_eq!(cart.total, total_of(&cart.products));
    assert_eq!(cart.total, 100 + 250);
}

#[test]
fn clear_cart_keeps_the_cart_unpaid_and_empty() {
    let service = service_with_stock();
    assert!(matches!(
        service.clear_cart("u1"),
        Err(CartError::CartNotFound(_))
    ));

    let created = service.add_product("u1", "p1").unwrap();
    let cleared = service.clear_cart("u1").unwrap();
    assert_eq!(cleared.id, created.id);
    assert!(!cleared.paid);
    assert!(cleared.products.is_empty());
    assert_eq!(cleared.total, 0);
}

#[test]
fn checkout_without_cart_fails() {
    let service = service_with_stock();
    assert!(matches!(
        service.checkout("u1"),
        Err(CartError::CartNotFound(_))
    ));
}

#[test]
fn checkout_of_emptied_cart_fails() {
    let service = service_with_stock();
    service.add_product("u1", "p1").unwrap();
    service.clear_cart("u1").unwrap();
    assert!(matches!(service.checkout("u1"), Err(CartError::EmptyCart(_))));
}

#[test]
fn checkout_marks_paid_and_decrements_stock() {
    let service = service_with_stock();
    service.add_product("u1", "p1").unwrap();
    service.add_product("u1", "p1").unwrap();
    service.add_product("u1", "p2").unwrap();

    let paid = service.checkout("u1").unwrap();
    assert!(paid.paid);
    assert!(paid.payment_date.is_some());
    assert_eq!(paid.total, 450);

    assert_eq!(service.inventory().quantity("p1").unwrap(), Some(8));
    assert_eq!(service.inventory().quantity("p2").unwrap(), Some(2));

    // The paid cart left the "current cart" lookup.
    assert_eq!(service.current_cart("u1").unwrap().id, 0);
}

#[test]
fn checkout_history_excludes_the_current_cart() {
    let service = service_with_stock();
    service.add_product("u1", "p1").unwrap();
    service.checkout("u1").unwrap();
    service.add_product("u1", "p2").unwrap();
    service.checkout("u1").unwrap();

    // A new unpaid cart after two checkouts.
    let open = service.add_product("u1", "p1").unwrap();

    let history = service.customer_carts("u1").unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|cart| cart.paid));
    assert!(history.iter().all(|cart| cart.id != open.id));
    // Store retrieval order: first checkout first.
    assert_eq!(history[0].total, 100);
    assert_eq!(history[1].total, 250);
}

#[test]
fn paid_cart_keeps_its_price_snapshot() {
    let service = service_with_stock();
    service.add_product("u1", "p1").unwrap();
    let paid = service.checkout("u1").unwrap();

    // A later price change must not rewrite history.
    service
        .inventory()
        .insert(ProductRecord::new("p1", "Smartphone", 999, 10))
        .unwrap();

    let history = service.customer_carts("u1").unwrap();
    assert_eq!(history[0].products[0].snapshot.price, 100);
    assert_eq!(history[0].total, paid.total);
}

#[test]
fn checkout_fails_on_stock_consumed_elsewhere() {
    let service = service_with_stock();
    service.add_product("u1", "p1").unwrap();

    // A concurrent sale empties the shelf before checkout.
    service.inventory().decrement_quantity("p1", 10).unwrap();

    match service.checkout("u1") {
        Err(CartError::EmptyStock(model)) => assert_eq!(model, "p1"),
        other => panic!("expected EmptyStock, got {:?}", other.map(|c| c.id)),
    }

    // The cart stays unpaid and intact for a retry.
    let cart = service.current_cart("u1").unwrap();
    assert!(!cart.paid);
    assert_eq!(cart.products.len(), 1);
}

#[test]
fn checkout_fails_with_low_stock_when_some_remain() {
    let service = service_with_stock();
    for _ in 0..3 {
        service.add_product("u1", "p2").unwrap();
    }
    service.inventory().decrement_quantity("p2", 2).unwrap();

    match service.checkout("u1") {
        Err(CartError::LowStock {
            model,
            requested,
            available,
        }) => {
            assert_eq!(model, "p2");
            assert_eq!(requested, 3);
            assert_eq!(available, 1);
        }
        other => panic!("expected LowStock, got {:?}", other.map(|c| c.id)),
    }
}

#[test]
fn failed_checkout_keeps_earlier_decrements() {
    let service = service_with_stock();
    // p1 first in cart order, then p2.
    service.add_product("u1", "p1").unwrap();
    service.add_product("u1", "p2").unwrap();

    // p2's stock vanishes before checkout; p1's line still decrements.
    service.inventory().decrement_quantity("p2", 3).unwrap();

    assert!(matches!(
        service.checkout("u1"),
        Err(CartError::EmptyStock(_))
    ));
    assert_eq!(service.inventory().quantity("p1").unwrap(), Some(9));
    assert_eq!(service.inventory().quantity("p2").unwrap(), Some(0));
    assert!(!service.current_cart("u1").unwrap().paid);
}

#[test]
fn admin_bulk_operations_span_all_customers() {
    let service = service_with_stock();
    service.add_product("u1", "p1").unwrap();
    service.add_product("u2", "p2").unwrap();
    service.checkout("u2").unwrap();
    service.add_product("u2", "p1").unwrap();

    let all = service.all_carts().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all.iter().filter(|c| c.paid).count(), 1);

    service.delete_all_carts().unwrap();
    assert!(service.all_carts().unwrap().is_empty());
    assert!(service.customer_carts("u2").unwrap().is_empty());
}

#[test]
fn concurrent_adds_do_not_lose_updates() {
    let inventory = InMemoryInventoryStore::new();
    inventory
        .insert(ProductRecord::new("p1", "Smartphone", 100, 1000))
        .unwrap();
    let service = Arc::new(CartService::new(InMemoryCartStore::new(), inventory));

    let adds_per_thread: u32 = 50;
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..adds_per_thread {
                    service.add_product("u1", "p1").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let cart = service.current_cart("u1").unwrap();
    assert_eq!(cart.products.len(), 1);
    assert_eq!(cart.products[0].quantity, 2 * adds_per_thread);
    assert_eq!(cart.total, i64::from(2 * adds_per_thread) * 100);
}
