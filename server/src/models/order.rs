// server/src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::product::ProductResponse;

/// An order row. Status values are constrained to
/// `mesa_core::OrderStatus` at every write path; the column itself stays
/// a plain string.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
  pub id: i64,
  pub status: String,
  pub customer_name: Option<String>,
  pub total: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// The JSON shape orders are served as: the order row with its nested
/// items, each carrying its product (null if since deleted).
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
  pub id: i64,
  pub status: String,
  pub customer_name: Option<String>,
  pub total: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub items: Vec<OrderItemResponse>,
}

/// A line item. `product_id` goes NULL when the product is later
/// deleted from the catalog; the item itself is retained for history,
/// priced at its `unit_price` snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
  pub id: i64,
  pub order_id: i64,
  pub product_id: Option<i64>,
  pub quantity: i32,
  pub unit_price: Decimal,
  pub product: Option<ProductResponse>,
}

impl Order {
  pub fn into_response(self, items: Vec<OrderItemResponse>) -> OrderResponse {
    OrderResponse {
      id: self.id,
      status: self.status,
      customer_name: self.customer_name,
      total: self.total,
      created_at: self.created_at,
      updated_at: self.updated_at,
      items,
    }
  }
}
