// server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use mesa_core::{CreateOrderRequest, OrderStatus};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::orders;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
  /// `?active=true` keeps only orders still relevant to the kitchen
  /// queue, i.e. everything except `completed`.
  pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusPayload {
  pub status: String,
}

#[instrument(name = "handler::list_orders", skip(app_state, query))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
  let active_only = query.active.unwrap_or(false);
  let orders = orders::list_orders(&app_state, active_only).await?;
  info!(count = orders.len(), active_only, "Fetched orders");
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::get_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let order = orders::get_order(&app_state, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(name = "handler::create_order", skip(app_state, request), fields(items = request.items.len()))]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
  let order = orders::create_order(&app_state, request.into_inner()).await?;
  Ok(HttpResponse::Created().json(order))
}

#[instrument(name = "handler::update_order_status", skip(app_state, path, payload), fields(order_id = %path.as_ref()))]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: web::Json<UpdateOrderStatusPayload>,
) -> Result<HttpResponse, AppError> {
  // Membership in the status enum is the only guard; any recognized
  // target is applied regardless of the current state.
  let status: OrderStatus = payload
    .status
    .parse()
    .map_err(|_| AppError::validation("status", "The selected status is invalid."))?;

  let order = orders::update_status(&app_state, path.into_inner(), status).await?;
  Ok(HttpResponse::Ok().json(order))
}
