//! Cart, line items, and the add-time product snapshot.
//!
//! A `Cart` is either the customer's single unpaid "current" cart or a
//! paid, immutable piece of checkout history. Line items carry a
//! [`ProductSnapshot`] frozen at add time — later price changes never
//! retroactively alter a cart, paid or not. Only checkout consults live
//! inventory again, and only for quantity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The category and unit price of a product, copied out of inventory the
/// moment the product is added to a cart and never re-synced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub category: String,
    pub price: i64,
}

/// One (model, quantity, snapshot) entry within a cart.
///
/// `quantity` is strictly positive — a line decremented to zero is
/// removed from the cart, never kept at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub model: String,
    pub quantity: u32,
    pub snapshot: ProductSnapshot,
}

impl LineItem {
    /// `quantity × unit price` for this line.
    pub fn subtotal(&self) -> i64 {
        i64::from(self.quantity) * self.snapshot.price
    }
}

/// A shopping cart: the unit of the add → checkout lifecycle.
///
/// `id == 0` marks a synthesized cart that has never been persisted
/// (returned by current-cart reads when the customer has no cart yet);
/// store-created carts get ids starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: u64,
    pub customer: String,
    pub paid: bool,
    pub payment_date: Option<DateTime<Utc>>,
    pub total: i64,
    pub products: Vec<LineItem>,
}

impl Cart {
    /// A new empty unpaid cart with a store-assigned id.
    pub fn new(id: u64, customer: impl Into<String>) -> Self {
        Self {
            id,
            customer: customer.into(),
            paid: false,
            payment_date: None,
            total: 0,
            products: Vec::new(),
        }
    }

    /// The empty unpaid cart reported to a customer who has none yet.
    /// Never persisted; carries the sentinel id 0.
    pub fn detached(customer: impl Into<String>) -> Self {
        Self::new(0, customer)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find the line item for `model`, if present.
    pub fn line(&self, model: &str) -> Option<&LineItem> {
        self.products.iter().find(|line| line.model == model)
    }

    /// Add one unit of `model`, incrementing an existing line or
    /// appending a new one with the given add-time snapshot. The unit
    /// price is added to the running total.
    pub fn add_one(&mut self, model: &str, snapshot: ProductSnapshot) {
        match self.products.iter_mut().find(|line| line.model == model) {
            Some(line) => {
                line.quantity += 1;
                self.total += line.snapshot.price;
            }
            None => {
                self.total += snapshot.price;
                self.products.push(LineItem {
                    model: model.to_string(),
                    quantity: 1,
                    snapshot,
                });
            }
        }
    }

    /// Remove one unit of `model`. A line reduced to zero is dropped and
    /// the total is rebuilt from the surviving lines. Returns false if
    /// the model has no line in this cart.
    pub fn remove_one(&mut self, model: &str) -> bool {
        let Some(index) = self.products.iter().position(|line| line.model == model) else {
            return false;
        };
        if self.products[index].quantity > 1 {
            self.products[index].quantity -= 1;
        } else {
            self.products.remove(index);
        }
        self.total = self.products.iter().map(LineItem::subtotal).sum();
        true
    }

    /// Empty the line-item set and reset the total.
    pub fn clear(&mut self) {
        self.products.clear();
        self.total = 0;
    }

    /// The one-way unpaid → paid transition, stamped with the payment date.
    pub fn mark_paid(&mut self, when: DateTime<Utc>) {
        self.paid = true;
        self.payment_date = Some(when);
    }
}
