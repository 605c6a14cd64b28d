// core/src/error.rs

use thiserror::Error;

/// Errors produced by cart operations.
///
/// The only fatal one today is checking out an empty cart; quantity
/// adjustments on unknown ids are deliberately no-ops rather than errors,
/// since stale UI events should not break the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
  #[error("cart is empty; nothing to check out")]
  Empty,
}

/// Returned when a string does not name a recognized order status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized order status: '{0}'")]
pub struct StatusParseError(pub String);
