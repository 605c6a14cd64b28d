// server/src/services/catalog.rs

//! Catalog CRUD: the admin console's product management, read by both
//! frontends.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::errors::{AppError, FieldErrors, Result};
use crate::models::{Product, ProductResponse};
use crate::state::AppState;
use crate::storage::{self, ImageStore};

/// A product create/update payload, unified across the JSON and the
/// multipart form bodies. Everything is optional here; what `create`
/// actually requires is enforced in [`validate`].
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
  pub name: Option<String>,
  pub description: Option<String>,
  pub price: Option<Decimal>,
  pub is_available: Option<bool>,
  /// Image reference sent as a plain string (stored path or URL).
  pub image: Option<String>,
  /// Direct external image URL.
  pub image_url: Option<String>,
  /// Uploaded file, multipart requests only.
  #[serde(skip)]
  pub upload: Option<UploadedImage>,
}

/// An uploaded image file, fully buffered (the multipart reader has
/// already enforced the size cap while streaming).
#[derive(Clone)]
pub struct UploadedImage {
  pub original_filename: String,
  pub content_type: Option<String>,
  pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadedImage {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("UploadedImage")
      .field("original_filename", &self.original_filename)
      .field("content_type", &self.content_type)
      .field("bytes", &self.bytes.len())
      .finish()
  }
}

/// Field-level validation. Messages match what the admin UI already
/// renders, so keep the wording stable.
fn validate(payload: &ProductPayload, is_create: bool) -> Result<()> {
  let mut errors = FieldErrors::new();

  match payload.name.as_deref() {
    None if is_create => errors.add("name", "The name field is required."),
    // An empty string is never a valid name, create or update.
    Some("") => errors.add("name", "The name field is required."),
    Some(name) if name.chars().count() > 255 => {
      errors.add("name", "The name may not be greater than 255 characters.")
    }
    _ => {}
  }

  match payload.price {
    None if is_create => errors.add("price", "The price field is required."),
    Some(price) if price < Decimal::ZERO => errors.add("price", "The price must be at least 0."),
    _ => {}
  }

  if let Some(upload) = &payload.upload {
    if payload.image_url.is_some() {
      errors.add("image_url", "A file upload and a direct image URL may not be combined.");
    }
    match storage::extension_of(&upload.original_filename) {
      Some(ext) if storage::ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
      _ => errors.add("image", "The image must be a file of type: jpeg, png, jpg, gif, webp."),
    }
    if let Some(content_type) = &upload.content_type {
      if !content_type.starts_with("image/") {
        errors.add("image", "The image must be an image.");
      }
    }
    if upload.bytes.len() > storage::MAX_UPLOAD_BYTES {
      return Err(AppError::PayloadTooLarge {
        limit_bytes: storage::MAX_UPLOAD_BYTES,
      });
    }
  }

  errors.into_result()
}

pub async fn list_products(state: &AppState) -> Result<Vec<ProductResponse>> {
  let products: Vec<Product> = sqlx::query_as(
    "SELECT id, name, description, price, image, image_url, is_available, created_at, updated_at \
     FROM products ORDER BY id ASC",
  )
  .fetch_all(&state.db_pool)
  .await?;

  Ok(
    products
      .into_iter()
      .map(|p| p.into_response(&state.config.app_base_url))
      .collect(),
  )
}

pub async fn get_product(state: &AppState, id: i64) -> Result<ProductResponse> {
  Ok(fetch_product(state, id).await?.into_response(&state.config.app_base_url))
}

pub async fn create_product(state: &AppState, mut payload: ProductPayload) -> Result<ProductResponse> {
  validate(&payload, true)?;

  if let Some(upload) = payload.upload.take() {
    let store = ImageStore::new(&state.config.upload_dir);
    let stored = store.save(&upload.original_filename, &upload.bytes).await?;
    payload.image = Some(stored);
    payload.image_url = None;
  }

  let product: Product = sqlx::query_as(
    "INSERT INTO products (name, description, price, image, image_url, is_available) \
     VALUES ($1, $2, $3, $4, $5, $6) \
     RETURNING id, name, description, price, image, image_url, is_available, created_at, updated_at",
  )
  .bind(payload.name.as_deref().unwrap_or_default())
  .bind(&payload.description)
  .bind(payload.price.unwrap_or(Decimal::ZERO))
  .bind(&payload.image)
  .bind(&payload.image_url)
  .bind(payload.is_available.unwrap_or(true))
  .fetch_one(&state.db_pool)
  .await?;

  info!(product_id = product.id, name = %product.name, "Product created");
  Ok(product.into_response(&state.config.app_base_url))
}

pub async fn update_product(state: &AppState, id: i64, mut payload: ProductPayload) -> Result<ProductResponse> {
  let existing = fetch_product(state, id).await?;
  validate(&payload, false)?;

  // A new upload replaces (and removes) the previously stored file and
  // clears any direct URL.
  let mut clear_image_url = false;
  if let Some(upload) = payload.upload.take() {
    let store = ImageStore::new(&state.config.upload_dir);
    if let Some(old) = existing.image.as_deref() {
      store.delete(old).await;
    }
    let stored = store.save(&upload.original_filename, &upload.bytes).await?;
    payload.image = Some(stored);
    clear_image_url = true;
  }

  let product: Product = sqlx::query_as(
    "UPDATE products SET \
       name = COALESCE($2, name), \
       description = COALESCE($3, description), \
       price = COALESCE($4, price), \
       image = COALESCE($5, image), \
       image_url = CASE WHEN $6 THEN NULL ELSE COALESCE($7, image_url) END, \
       is_available = COALESCE($8, is_available), \
       updated_at = now() \
     WHERE id = $1 \
     RETURNING id, name, description, price, image, image_url, is_available, created_at, updated_at",
  )
  .bind(id)
  .bind(&payload.name)
  .bind(&payload.description)
  .bind(payload.price)
  .bind(&payload.image)
  .bind(clear_image_url)
  .bind(&payload.image_url)
  .bind(payload.is_available)
  .fetch_one(&state.db_pool)
  .await?;

  info!(product_id = id, "Product updated");
  Ok(product.into_response(&state.config.app_base_url))
}

pub async fn delete_product(state: &AppState, id: i64) -> Result<()> {
  let existing = fetch_product(state, id).await?;

  // Remove the stored file first; external URLs are left alone.
  if let Some(image) = existing.image.as_deref() {
    ImageStore::new(&state.config.upload_dir).delete(image).await;
  }

  sqlx::query("DELETE FROM products WHERE id = $1")
    .bind(id)
    .execute(&state.db_pool)
    .await?;

  info!(product_id = id, "Product deleted");
  Ok(())
}

async fn fetch_product(state: &AppState, id: i64) -> Result<Product> {
  sqlx::query_as(
    "SELECT id, name, description, price, image, image_url, is_available, created_at, updated_at \
     FROM products WHERE id = $1",
  )
  .bind(id)
  .fetch_optional(&state.db_pool)
  .await?
  .ok_or_else(|| AppError::NotFound(format!("Product with ID {id} not found.")))
}
