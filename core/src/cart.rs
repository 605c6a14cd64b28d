// core/src/cart.rs

//! The cart: ephemeral, client-held selection state prior to checkout.
//!
//! A [`Cart`] is a plain serializable value object. Every operation is a
//! pure transformation of the entry list, which keeps the whole checkout
//! workflow unit-testable without any UI or network harness.
//!
//! Entries carry a denormalized snapshot of the product (name, price,
//! image) taken at add time. A catalog price change after add-to-cart is
//! therefore not reflected until the entry is removed and re-added; the
//! server recomputes the authoritative total at order creation anyway.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The product fields a cart entry snapshots when it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
  pub product_id: i64,
  pub name: String,
  pub price: Decimal,
  pub image_url: Option<String>,
}

/// One product line in the cart. Unique by `product_id` within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
  pub product_id: i64,
  pub name: String,
  pub price: Decimal,
  pub image_url: Option<String>,
  pub quantity: u32,
}

impl CartEntry {
  fn new(snapshot: ProductSnapshot) -> Self {
    CartEntry {
      product_id: snapshot.product_id,
      name: snapshot.name,
      price: snapshot.price,
      image_url: snapshot.image_url,
      quantity: 1,
    }
  }

  /// Line subtotal: snapshot price times quantity.
  pub fn subtotal(&self) -> Decimal {
    self.price * Decimal::from(self.quantity)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
  entries: Vec<CartEntry>,
}

impl Cart {
  pub fn new() -> Self {
    Cart::default()
  }

  /// Add one unit of a product.
  ///
  /// If the product is already in the cart the existing entry's quantity
  /// is incremented by exactly 1 and the original snapshot is kept; a
  /// duplicate entry is never created. Otherwise a new entry with
  /// quantity 1 is appended.
  pub fn add(&mut self, snapshot: ProductSnapshot) {
    match self.entry_mut(snapshot.product_id) {
      Some(entry) => entry.quantity += 1,
      None => self.entries.push(CartEntry::new(snapshot)),
    }
  }

  /// Increment the quantity of an existing entry by 1.
  ///
  /// Unknown ids are ignored; a stale button click must not corrupt the
  /// session.
  pub fn increase(&mut self, product_id: i64) {
    if let Some(entry) = self.entry_mut(product_id) {
      entry.quantity += 1;
    }
  }

  /// Decrement the quantity of an existing entry by 1, flooring at 1.
  ///
  /// Removal is always explicit via [`Cart::remove`]; decrementing at
  /// quantity 1 is a no-op rather than an auto-removal.
  pub fn decrease(&mut self, product_id: i64) {
    if let Some(entry) = self.entry_mut(product_id) {
      if entry.quantity > 1 {
        entry.quantity -= 1;
      }
    }
  }

  /// Remove an entry entirely, regardless of its quantity.
  pub fn remove(&mut self, product_id: i64) {
    self.entries.retain(|e| e.product_id != product_id);
  }

  /// The cart total: sum over entries of snapshot price times quantity.
  ///
  /// Recomputed freshly on every call, never cached. Cart size is bounded
  /// by human interaction speed, so consistency wins over the (trivial)
  /// recomputation cost.
  pub fn total(&self) -> Decimal {
    self.entries.iter().map(CartEntry::subtotal).sum()
  }

  /// Entries in insertion order.
  pub fn entries(&self) -> &[CartEntry] {
    &self.entries
  }

  /// Number of distinct product lines (not units).
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Drop all entries. Called after a successful checkout.
  pub fn clear(&mut self) {
    self.entries.clear();
  }

  fn entry_mut(&mut self, product_id: i64) -> Option<&mut CartEntry> {
    self.entries.iter_mut().find(|e| e.product_id == product_id)
  }
}
