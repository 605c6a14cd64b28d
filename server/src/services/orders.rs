// server/src/services/orders.rs

//! Order creation and the status workflow.
//!
//! Creation is the only multi-row write in the system and runs in a
//! single transaction: the order row, all its item rows, and the total
//! become visible together or not at all. The server owns the total; it
//! is recomputed here from current catalog prices and each item
//! snapshots its `unit_price` so later catalog edits never change what
//! an order was worth.

use std::collections::HashMap;

use mesa_core::{CreateOrderRequest, OrderStatus};
use rust_decimal::Decimal;
use sqlx::Row;
use tracing::info;

use crate::errors::{AppError, FieldErrors, Result};
use crate::models::{Order, OrderItemResponse, OrderResponse, Product};
use crate::state::AppState;

const ORDER_COLUMNS: &str = "id, status, customer_name, total, created_at, updated_at";

pub async fn list_orders(state: &AppState, active_only: bool) -> Result<Vec<OrderResponse>> {
  // The kitchen queue asks for active orders only; `completed` is the
  // single status that filter drops.
  let sql = if active_only {
    "SELECT id, status, customer_name, total, created_at, updated_at \
     FROM orders WHERE status <> 'completed' ORDER BY id ASC"
  } else {
    "SELECT id, status, customer_name, total, created_at, updated_at FROM orders ORDER BY id ASC"
  };
  let orders: Vec<Order> = sqlx::query_as(sql).fetch_all(&state.db_pool).await?;

  let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
  let mut items_by_order = load_items(state, &ids).await?;

  Ok(
    orders
      .into_iter()
      .map(|order| {
        let items = items_by_order.remove(&order.id).unwrap_or_default();
        order.into_response(items)
      })
      .collect(),
  )
}

pub async fn get_order(state: &AppState, id: i64) -> Result<OrderResponse> {
  let order = fetch_order(state, id).await?;
  let mut items_by_order = load_items(state, &[id]).await?;
  Ok(order.into_response(items_by_order.remove(&id).unwrap_or_default()))
}

fn validate_items(request: &CreateOrderRequest) -> Result<()> {
  let mut errors = FieldErrors::new();
  if request.items.is_empty() {
    errors.add("items", "The items field is required.");
  }
  for (index, item) in request.items.iter().enumerate() {
    if item.quantity < 1 {
      errors.add(format!("items.{index}.quantity"), "The quantity must be at least 1.");
    } else if i32::try_from(item.quantity).is_err() {
      // `order_items.quantity` is an INTEGER; anything larger must fail
      // validation rather than the column's CHECK constraint.
      errors.add(
        format!("items.{index}.quantity"),
        "The quantity may not be greater than 2147483647.",
      );
    }
  }
  errors.into_result()
}

pub async fn create_order(state: &AppState, request: CreateOrderRequest) -> Result<OrderResponse> {
  validate_items(&request)?;

  // Resolve every referenced product up front so unknown ids come back
  // as a field error, not a foreign key violation.
  let ids: Vec<i64> = request.items.iter().map(|i| i.product_id).collect();
  let prices: HashMap<i64, Decimal> = sqlx::query("SELECT id, price FROM products WHERE id = ANY($1)")
    .bind(&ids)
    .fetch_all(&state.db_pool)
    .await?
    .into_iter()
    .map(|row| (row.get::<i64, _>("id"), row.get::<Decimal, _>("price")))
    .collect();

  let mut errors = FieldErrors::new();
  for (index, item) in request.items.iter().enumerate() {
    if !prices.contains_key(&item.product_id) {
      errors.add(format!("items.{index}.product_id"), "The selected product id is invalid.");
    }
  }
  errors.into_result()?;

  let mut tx = state.db_pool.begin().await?;

  let order: Order = sqlx::query_as(&format!(
    "INSERT INTO orders (status, customer_name) VALUES ($1, $2) RETURNING {ORDER_COLUMNS}"
  ))
  .bind(OrderStatus::initial().as_str())
  .bind(&request.customer_name)
  .fetch_one(&mut *tx)
  .await?;

  let mut total = Decimal::ZERO;
  for item in &request.items {
    let unit_price = prices[&item.product_id];
    sqlx::query("INSERT INTO order_items (order_id, product_id, quantity, unit_price) VALUES ($1, $2, $3, $4)")
      .bind(order.id)
      .bind(item.product_id)
      .bind(item.quantity as i32)
      .bind(unit_price)
      .execute(&mut *tx)
      .await?;
    total += unit_price * Decimal::from(item.quantity);
  }

  let order: Order = sqlx::query_as(&format!(
    "UPDATE orders SET total = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
  ))
  .bind(order.id)
  .bind(total)
  .fetch_one(&mut *tx)
  .await?;

  tx.commit().await?;

  info!(order_id = order.id, %total, items = request.items.len(), "Order created");
  get_order(state, order.id).await
}

/// Apply a status update. The transition function is total over the
/// recognized statuses: any target is accepted from any current state.
pub async fn update_status(state: &AppState, id: i64, status: OrderStatus) -> Result<OrderResponse> {
  let updated: Option<Order> = sqlx::query_as(&format!(
    "UPDATE orders SET status = $2, updated_at = now() WHERE id = $1 RETURNING {ORDER_COLUMNS}"
  ))
  .bind(id)
  .bind(status.as_str())
  .fetch_optional(&state.db_pool)
  .await?;

  let order = updated.ok_or_else(|| AppError::NotFound(format!("Order with ID {id} not found.")))?;
  info!(order_id = id, status = %status, "Order status updated");

  let mut items_by_order = load_items(state, &[id]).await?;
  Ok(order.into_response(items_by_order.remove(&id).unwrap_or_default()))
}

async fn fetch_order(state: &AppState, id: i64) -> Result<Order> {
  sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Order with ID {id} not found.")))
}

/// Load the line items for a set of orders, each joined with its product
/// (or null if the product has since been deleted).
async fn load_items(state: &AppState, order_ids: &[i64]) -> Result<HashMap<i64, Vec<OrderItemResponse>>> {
  let mut items_by_order: HashMap<i64, Vec<OrderItemResponse>> = HashMap::new();
  if order_ids.is_empty() {
    return Ok(items_by_order);
  }

  let rows = sqlx::query(
    "SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.unit_price, \
            p.id AS p_id, p.name AS p_name, p.description AS p_description, p.price AS p_price, \
            p.image AS p_image, p.image_url AS p_image_url, p.is_available AS p_is_available, \
            p.created_at AS p_created_at, p.updated_at AS p_updated_at \
     FROM order_items oi \
     LEFT JOIN products p ON p.id = oi.product_id \
     WHERE oi.order_id = ANY($1) \
     ORDER BY oi.id ASC",
  )
  .bind(order_ids)
  .fetch_all(&state.db_pool)
  .await?;

  for row in rows {
    let product = row
      .try_get::<Option<i64>, _>("p_id")?
      .map(|product_id| Product {
        id: product_id,
        name: row.get("p_name"),
        description: row.get("p_description"),
        price: row.get("p_price"),
        image: row.get("p_image"),
        image_url: row.get("p_image_url"),
        is_available: row.get("p_is_available"),
        created_at: row.get("p_created_at"),
        updated_at: row.get("p_updated_at"),
      })
      .map(|p| p.into_response(&state.config.app_base_url));

    let order_id: i64 = row.get("order_id");
    items_by_order.entry(order_id).or_default().push(OrderItemResponse {
      id: row.get("id"),
      order_id,
      product_id: row.get("product_id"),
      quantity: row.get("quantity"),
      unit_price: row.get("unit_price"),
      product,
    });
  }

  Ok(items_by_order)
}

#[cfg(test)]
mod tests {
  use super::*;
  use mesa_core::OrderItemRequest;

  fn request(items: Vec<OrderItemRequest>) -> CreateOrderRequest {
    CreateOrderRequest { items, customer_name: None }
  }

  #[test]
  fn test_an_order_needs_at_least_one_item() {
    let err = validate_items(&request(vec![])).unwrap_err();
    let AppError::Validation(errors) = err else {
      panic!("expected validation error");
    };
    let json = serde_json::to_value(&errors).unwrap();
    assert!(json.get("items").is_some());
  }

  #[test]
  fn test_zero_quantity_is_rejected() {
    let err = validate_items(&request(vec![OrderItemRequest { product_id: 1, quantity: 0 }])).unwrap_err();
    let AppError::Validation(errors) = err else {
      panic!("expected validation error");
    };
    let json = serde_json::to_value(&errors).unwrap();
    assert!(json.get("items.0.quantity").is_some());
  }

  #[test]
  fn test_quantity_above_the_column_range_is_rejected() {
    // Would wrap negative when bound as an INTEGER.
    let oversized = i32::MAX as u32 + 1;
    let err =
      validate_items(&request(vec![OrderItemRequest { product_id: 1, quantity: oversized }])).unwrap_err();
    let AppError::Validation(errors) = err else {
      panic!("expected validation error");
    };
    let json = serde_json::to_value(&errors).unwrap();
    assert!(json.get("items.0.quantity").is_some());
  }

  #[test]
  fn test_in_range_quantities_pass() {
    let items = vec![
      OrderItemRequest { product_id: 1, quantity: 1 },
      OrderItemRequest { product_id: 2, quantity: i32::MAX as u32 },
    ];
    assert!(validate_items(&request(items)).is_ok());
  }
}
