// server/src/web/forms.rs

//! Multipart form parsing for the product endpoints.
//!
//! The admin console submits products as `multipart/form-data` (text
//! fields plus an optional `image` file); everything else speaks JSON.
//! Both are funneled into the same [`ProductPayload`].

use actix_multipart::{Field, Multipart};
use futures_util::StreamExt;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::{AppError, Result};
use crate::services::catalog::{ProductPayload, UploadedImage};
use crate::storage;

/// Text fields stay well under this; it only guards against someone
/// streaming megabytes into `name`.
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

pub async fn product_payload_from_multipart(mut payload: Multipart) -> Result<ProductPayload> {
  let mut out = ProductPayload::default();

  while let Some(item) = payload.next().await {
    let mut field = item?;
    let field_name = field.name().to_string();

    match field_name.as_str() {
      "image" => {
        let original_filename: Option<String> = field
          .content_disposition()
          .get_filename()
          .filter(|f| !f.is_empty())
          .map(ToString::to_string);

        match original_filename {
          Some(original_filename) => {
            let content_type = field.content_type().map(|m| m.to_string());
            let bytes = read_field_bytes(&mut field, storage::MAX_UPLOAD_BYTES).await?;
            out.upload = Some(UploadedImage {
              original_filename,
              content_type,
              bytes,
            });
          }
          // No filename: the client sent `image` as a plain text value
          // (an existing stored path or a URL).
          None => out.image = non_empty(read_field_text(&mut field).await?),
        }
      }
      "name" => out.name = Some(read_field_text(&mut field).await?),
      "description" => out.description = non_empty(read_field_text(&mut field).await?),
      "price" => {
        let raw = read_field_text(&mut field).await?;
        let price = Decimal::from_str(raw.trim())
          .map_err(|_| AppError::validation("price", "The price must be a number."))?;
        out.price = Some(price);
      }
      "is_available" => {
        let raw = read_field_text(&mut field).await?;
        out.is_available = Some(parse_bool_field(&raw)?);
      }
      "image_url" => out.image_url = non_empty(read_field_text(&mut field).await?),
      // HTML form method-override marker; routing already treats POST
      // on /products/{id} as an update.
      "_method" => {
        drain_field(&mut field).await?;
      }
      _ => {
        tracing::debug!(field = %field_name, "Ignoring unknown multipart field");
        drain_field(&mut field).await?;
      }
    }
  }

  Ok(out)
}

fn non_empty(value: String) -> Option<String> {
  if value.is_empty() {
    None
  } else {
    Some(value)
  }
}

fn parse_bool_field(raw: &str) -> Result<bool> {
  match raw.trim() {
    "1" | "true" => Ok(true),
    "0" | "false" => Ok(false),
    _ => Err(AppError::validation(
      "is_available",
      "The is available field must be true or false.",
    )),
  }
}

async fn read_field_bytes(field: &mut Field, limit_bytes: usize) -> Result<Vec<u8>> {
  let mut buffer = Vec::new();
  while let Some(chunk) = field.next().await {
    let chunk = chunk?;
    if buffer.len() + chunk.len() > limit_bytes {
      return Err(AppError::PayloadTooLarge { limit_bytes });
    }
    buffer.extend_from_slice(&chunk);
  }
  Ok(buffer)
}

async fn read_field_text(field: &mut Field) -> Result<String> {
  let bytes = read_field_bytes(field, MAX_TEXT_FIELD_BYTES).await?;
  String::from_utf8(bytes).map_err(|_| AppError::BadRequest("Form fields must be valid UTF-8.".to_string()))
}

async fn drain_field(field: &mut Field) -> Result<()> {
  while let Some(chunk) = field.next().await {
    chunk?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_bool_field_accepts_form_style_values() {
    assert!(parse_bool_field("1").unwrap());
    assert!(parse_bool_field("true").unwrap());
    assert!(!parse_bool_field("0").unwrap());
    assert!(!parse_bool_field("false").unwrap());
    assert!(parse_bool_field("maybe").is_err());
  }

  #[test]
  fn test_empty_text_fields_become_none() {
    assert_eq!(non_empty(String::new()), None);
    assert_eq!(non_empty("x".to_string()).as_deref(), Some("x"));
  }
}
