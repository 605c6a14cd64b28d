// core/src/status.rs

//! The order status lifecycle.
//!
//! Statuses form the path `pending -> preparing -> completed`, with
//! `cancelled` as a terminal escape hatch. The transition function is
//! intentionally total over the enum: any recognized target is accepted
//! from any current state, so a kitchen operator can move an order
//! backwards after a mis-click. Nothing here prevents `completed ->
//! pending`; product owners have been told.

use crate::error::StatusParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Preparing,
  Completed,
  Cancelled,
}

impl OrderStatus {
  /// Every recognized status, in lifecycle order.
  pub const ALL: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Preparing,
    OrderStatus::Completed,
    OrderStatus::Cancelled,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Preparing => "preparing",
      OrderStatus::Completed => "completed",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  /// Whether an order in this status still belongs on the kitchen queue.
  ///
  /// The kitchen display filters out only `completed`; cancelled orders
  /// stay visible so staff can see they were called off.
  pub fn is_active(&self) -> bool {
    !matches!(self, OrderStatus::Completed)
  }

  /// The status every freshly created order starts in.
  pub fn initial() -> OrderStatus {
    OrderStatus::Pending
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = StatusParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(OrderStatus::Pending),
      "preparing" => Ok(OrderStatus::Preparing),
      "completed" => Ok(OrderStatus::Completed),
      "cancelled" => Ok(OrderStatus::Cancelled),
      other => Err(StatusParseError(other.to_string())),
    }
  }
}
