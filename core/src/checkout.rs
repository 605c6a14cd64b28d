// core/src/checkout.rs

//! Checkout: turning a cart into an order-creation payload, and naming
//! the ways a submission can fail.
//!
//! The wire types here are shared with `mesa-server`, which deserializes
//! [`CreateOrderRequest`] on `POST /api/orders`. The client-submitted cart
//! carries no total; the server computes the authoritative one from the
//! catalog inside the creation transaction.

use crate::cart::Cart;
use crate::error::CartError;
use serde::{Deserialize, Serialize};

/// One `{product_id, quantity}` line of an order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
  pub product_id: i64,
  pub quantity: u32,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
  pub items: Vec<OrderItemRequest>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub customer_name: Option<String>,
}

impl Cart {
  /// Build the order-creation payload for this cart.
  ///
  /// An empty cart is rejected locally with [`CartError::Empty`] before
  /// any network call is made. Each distinct cart entry becomes exactly
  /// one item line, in insertion order.
  pub fn checkout_request(&self, customer_name: Option<String>) -> Result<CreateOrderRequest, CartError> {
    if self.is_empty() {
      return Err(CartError::Empty);
    }

    let items = self
      .entries()
      .iter()
      .map(|entry| OrderItemRequest {
        product_id: entry.product_id,
        quantity: entry.quantity,
      })
      .collect();

    Ok(CreateOrderRequest { items, customer_name })
  }
}

/// Why an order submission failed, from the customer's point of view.
///
/// Every failure ends in a user-visible message and an explicit,
/// user-initiated retry; nothing in this workflow retries automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutFailure {
  /// The server rejected the payload (422-class response).
  Validation,
  /// A referenced resource no longer exists (404).
  NotFound,
  /// The server answered with an unexpected failure (5xx or anything
  /// else we cannot interpret).
  Server,
  /// No response reached the client at all.
  Network,
}

impl CheckoutFailure {
  /// Classify a submission outcome from the HTTP status, if any arrived.
  pub fn classify(http_status: Option<u16>) -> CheckoutFailure {
    match http_status {
      None => CheckoutFailure::Network,
      Some(422) => CheckoutFailure::Validation,
      Some(404) => CheckoutFailure::NotFound,
      Some(_) => CheckoutFailure::Server,
    }
  }

  /// The message shown to the customer. Network trouble gets its own
  /// wording so people check their connection instead of blaming the
  /// kitchen.
  pub fn user_message(&self) -> &'static str {
    match self {
      CheckoutFailure::Validation => "Invalid order data. Please check your cart and try again.",
      CheckoutFailure::NotFound => "Resource not found. Please refresh the menu and try again.",
      CheckoutFailure::Server => "Server error. Please try again later.",
      CheckoutFailure::Network => "Network error. Please check your connection and try again.",
    }
  }
}
