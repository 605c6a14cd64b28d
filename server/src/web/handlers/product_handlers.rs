// server/src/web/handlers/product_handlers.rs

use actix_multipart::Multipart;
use actix_web::{web, Either, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::catalog::{self, ProductPayload};
use crate::state::AppState;
use crate::web::forms;

/// The product write endpoints accept either a JSON body or a multipart
/// form (the admin console's file-upload path); both arrive here as one
/// [`ProductPayload`].
type ProductBody = Either<web::Json<ProductPayload>, Multipart>;

async fn into_payload(body: ProductBody) -> Result<ProductPayload, AppError> {
  match body {
    Either::Left(json) => Ok(json.into_inner()),
    Either::Right(multipart) => forms::product_payload_from_multipart(multipart).await,
  }
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = catalog::list_products(&app_state).await?;
  info!("Fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product = catalog::get_product(&app_state, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::create_product", skip(app_state, body))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  body: ProductBody,
) -> Result<HttpResponse, AppError> {
  let payload = into_payload(body).await?;
  let product = catalog::create_product(&app_state, payload).await?;
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::update_product", skip(app_state, path, body), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  body: ProductBody,
) -> Result<HttpResponse, AppError> {
  let payload = into_payload(body).await?;
  let product = catalog::update_product(&app_state, path.into_inner(), payload).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  catalog::delete_product(&app_state, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({"message": "Product deleted successfully"})))
}
