// core/src/lib.rs

//! Mesa core: the domain layer of the Mesa restaurant ordering platform.
//!
//! This crate holds everything that can be reasoned about without a database
//! or an HTTP stack:
//!  - The [`Cart`] value object with pure transition functions
//!    (add/increase/decrease/remove/total).
//!  - Checkout payload construction and the checkout failure taxonomy.
//!  - The [`OrderStatus`] lifecycle enum shared by the API and its clients.
//!
//! The REST server in `mesa-server` builds on these types; UI layers are
//! expected to hold a [`Cart`] as their session state and submit the
//! [`CreateOrderRequest`] it produces at checkout.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod status;

// --- Re-exports for the Public API ---

pub use crate::cart::{Cart, CartEntry, ProductSnapshot};
pub use crate::checkout::{CheckoutFailure, CreateOrderRequest, OrderItemRequest};
pub use crate::error::{CartError, StatusParseError};
pub use crate::status::OrderStatus;
