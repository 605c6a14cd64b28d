// server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Field-level validation messages, keyed by the offending field.
///
/// Rendered as `{"errors": {"price": ["The price field is required."]}}`
/// so admin forms can highlight the exact input that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
  pub fn new() -> Self {
    FieldErrors::default()
  }

  pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.entry(field.into()).or_default().push(message.into());
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Ok when no messages were collected, otherwise a validation error.
  pub fn into_result(self) -> Result<(), AppError> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(AppError::Validation(self))
    }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, messages) in &self.0 {
      for message in messages {
        if !first {
          f.write_str("; ")?;
        }
        write!(f, "{field}: {message}")?;
        first = false;
      }
    }
    Ok(())
  }
}

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(FieldErrors),

  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Payload Too Large: uploads are limited to {limit_bytes} bytes")]
  PayloadTooLarge { limit_bytes: usize },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Shorthand for a single-field validation failure.
  pub fn validation(field: impl Into<String>, message: impl Into<String>) -> AppError {
    let mut errors = FieldErrors::new();
    errors.add(field, message);
    AppError::Validation(errors)
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in handlers that call `?` on anyhow-returning helpers.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(db_err) => AppError::Sqlx(db_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl From<actix_multipart::MultipartError> for AppError {
  fn from(err: actix_multipart::MultipartError) -> Self {
    AppError::BadRequest(format!("Malformed multipart payload: {err}"))
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response.
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(errors) => HttpResponse::UnprocessableEntity().json(json!({
        "message": "The given data was invalid.",
        "errors": errors,
      })),
      AppError::BadRequest(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::PayloadTooLarge { limit_bytes } => HttpResponse::PayloadTooLarge().json(json!({
        "error": "Uploaded file is too large.",
        "limit_bytes": limit_bytes,
      })),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      // Database and miscellaneous failures stay generic on the wire; the
      // detail lives in the server log only.
      AppError::Sqlx(_) => HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"})),
      AppError::Internal(_) => HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred"})),
    }
  }
}

// Define a Result type alias for the application.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::http::StatusCode;

  #[test]
  fn test_status_codes_follow_the_error_taxonomy() {
    assert_eq!(
      AppError::validation("name", "The name field is required.")
        .error_response()
        .status(),
      StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
      AppError::NotFound("Product 9 not found".into()).error_response().status(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      AppError::PayloadTooLarge { limit_bytes: 5 * 1024 * 1024 }
        .error_response()
        .status(),
      StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
      AppError::Internal("boom".into()).error_response().status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
      AppError::Sqlx(sqlx::Error::RowNotFound).error_response().status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_field_errors_accumulate_per_field() {
    let mut errors = FieldErrors::new();
    errors.add("name", "The name field is required.");
    errors.add("price", "The price must be a number.");
    errors.add("price", "The price must be at least 0.");

    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "name": ["The name field is required."],
        "price": ["The price must be a number.", "The price must be at least 0."],
      })
    );
    assert!(errors.clone().into_result().is_err());
    assert!(FieldErrors::new().into_result().is_ok());
  }
}
