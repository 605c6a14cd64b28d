// server/src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::storage;

/// A catalog row. `image` is the internally stored file name of an
/// uploaded picture; `image_url` a direct external URL. When both are
/// set, `image_url` wins at display time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  pub price: Decimal,
  pub image: Option<String>,
  pub image_url: Option<String>,
  pub is_available: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// The JSON shape products are served as. `image_url` always carries the
/// resolved, publicly fetchable URL regardless of how the image is
/// stored.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  pub price: Decimal,
  pub image: Option<String>,
  pub image_url: Option<String>,
  pub is_available: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  pub fn into_response(self, app_base_url: &str) -> ProductResponse {
    let image_url = storage::display_url(self.image.as_deref(), self.image_url.as_deref(), app_base_url);
    ProductResponse {
      id: self.id,
      name: self.name,
      description: self.description,
      price: self.price,
      image: self.image,
      image_url,
      is_available: self.is_available,
      created_at: self.created_at,
      updated_at: self.updated_at,
    }
  }
}
