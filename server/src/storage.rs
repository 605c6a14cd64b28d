// server/src/storage.rs

//! Stored product images: saving uploads, deleting them, and resolving
//! whatever a product row carries into a publicly fetchable URL.
//!
//! Uploads are stored flat under the configured directory with a
//! generated `{uuid}.{ext}` name, so original filenames (spaces, unicode,
//! anything) never touch the filesystem. The original basename does feed
//! the extension allowlist check during validation.

use std::path::PathBuf;

use crate::errors::{AppError, Result};
use uuid::Uuid;

/// Upload cap, matching the catalog validation rule (5 MB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image extensions for uploads.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Filesystem home of uploaded product images.
#[derive(Debug, Clone)]
pub struct ImageStore {
  dir: PathBuf,
}

impl ImageStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    ImageStore { dir: dir.into() }
  }

  /// Persist an upload and return the stored file name to keep in the
  /// product row. The caller has already validated type and size.
  pub async fn save(&self, original_filename: &str, bytes: &[u8]) -> Result<String> {
    let ext = extension_of(original_filename)
      .ok_or_else(|| AppError::validation("image", "The image must have a file extension."))?;
    let stored_name = format!("{}.{}", Uuid::new_v4(), ext);

    tokio::fs::create_dir_all(&self.dir)
      .await
      .map_err(|e| AppError::Internal(format!("Failed to create upload directory: {e}")))?;
    tokio::fs::write(self.dir.join(&stored_name), bytes)
      .await
      .map_err(|e| AppError::Internal(format!("Failed to store uploaded image: {e}")))?;

    tracing::info!(stored = %stored_name, bytes = bytes.len(), "Stored uploaded product image");
    Ok(stored_name)
  }

  /// Best-effort removal of a stored file. External URLs are never
  /// touched, and a missing file is only worth a log line.
  pub async fn delete(&self, stored: &str) {
    if is_external_url(stored) {
      return;
    }
    let Ok(filename) = sanitize_filename(basename(stored)) else {
      tracing::warn!(stored, "Refusing to delete suspicious stored image name");
      return;
    };
    if let Err(e) = tokio::fs::remove_file(self.dir.join(filename)).await {
      tracing::warn!(stored, error = %e, "Failed to remove stored image file");
    }
  }

  /// Resolve a requested filename to its on-disk path, rejecting
  /// anything that could escape the upload directory.
  pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
    let filename = sanitize_filename(filename)?;
    Ok(self.dir.join(filename))
  }
}

/// Reject empty names, path separators, and parent-directory hops.
pub fn sanitize_filename(filename: &str) -> Result<&str> {
  if filename.is_empty() || filename.contains('/') || filename.contains('\\') || filename.contains("..") {
    return Err(AppError::NotFound(format!("Image '{filename}' not found")));
  }
  Ok(filename)
}

/// Lowercased extension of a filename, if it has one.
pub fn extension_of(filename: &str) -> Option<String> {
  let (stem, ext) = filename.rsplit_once('.')?;
  if stem.is_empty() || ext.is_empty() {
    return None;
  }
  Some(ext.to_ascii_lowercase())
}

pub fn is_external_url(value: &str) -> bool {
  value.starts_with("http://") || value.starts_with("https://")
}

fn basename(path: &str) -> &str {
  path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// The publicly fetchable URL for a product's image, or None if it has
/// no image at all.
///
/// A stored direct URL wins verbatim. A stored file name (legacy rows
/// sometimes carry a URL in that column too) is served through
/// `GET /api/images/{filename}`, percent-encoded so names with spaces
/// survive the round trip.
pub fn display_url(image: Option<&str>, image_url: Option<&str>, app_base_url: &str) -> Option<String> {
  if let Some(url) = image_url.filter(|u| !u.is_empty()) {
    return Some(url.to_string());
  }

  let image = image.filter(|i| !i.is_empty())?;
  if is_external_url(image) {
    return Some(image.to_string());
  }

  let encoded = urlencoding::encode(basename(image));
  Some(format!("{}/api/images/{}", app_base_url.trim_end_matches('/'), encoded))
}

#[cfg(test)]
mod tests {
  use super::*;

  const BASE: &str = "http://127.0.0.1:8000";

  #[test]
  fn test_direct_url_wins_verbatim() {
    let url = display_url(
      Some("abc.jpg"),
      Some("https://cdn.example.com/dish.png"),
      BASE,
    );
    assert_eq!(url.as_deref(), Some("https://cdn.example.com/dish.png"));
  }

  #[test]
  fn test_stored_file_is_served_through_the_images_route() {
    let url = display_url(Some("products/abc.jpg"), None, BASE);
    assert_eq!(url.as_deref(), Some("http://127.0.0.1:8000/api/images/abc.jpg"));
  }

  #[test]
  fn test_filenames_with_spaces_are_percent_encoded() {
    let url = display_url(Some("kung pao chicken.webp"), None, BASE);
    assert_eq!(
      url.as_deref(),
      Some("http://127.0.0.1:8000/api/images/kung%20pao%20chicken.webp")
    );
  }

  #[test]
  fn test_url_shaped_image_column_passes_through() {
    let url = display_url(Some("http://legacy.example.com/x.gif"), None, BASE);
    assert_eq!(url.as_deref(), Some("http://legacy.example.com/x.gif"));
  }

  #[test]
  fn test_no_image_resolves_to_none() {
    assert_eq!(display_url(None, None, BASE), None);
    assert_eq!(display_url(Some(""), Some(""), BASE), None);
  }

  #[test]
  fn test_trailing_slash_on_base_url_is_tolerated() {
    let url = display_url(Some("abc.jpg"), None, "http://127.0.0.1:8000/");
    assert_eq!(url.as_deref(), Some("http://127.0.0.1:8000/api/images/abc.jpg"));
  }

  #[test]
  fn test_sanitize_rejects_traversal_attempts() {
    assert!(sanitize_filename("../secrets.txt").is_err());
    assert!(sanitize_filename("a/b.jpg").is_err());
    assert!(sanitize_filename("a\\b.jpg").is_err());
    assert!(sanitize_filename("").is_err());
    assert_eq!(sanitize_filename("dish image.jpg").unwrap(), "dish image.jpg");
  }

  #[test]
  fn test_extension_is_lowercased() {
    assert_eq!(extension_of("Dish.JPG").as_deref(), Some("jpg"));
    assert_eq!(extension_of("photo.webp").as_deref(), Some("webp"));
    assert_eq!(extension_of("noext"), None);
    assert_eq!(extension_of(".hidden"), None);
  }

  #[tokio::test]
  async fn test_save_and_delete_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ImageStore::new(tmp.path());

    let stored = store.save("menu photo.PNG", b"not really a png").await.unwrap();
    assert!(stored.ends_with(".png"));

    let path = store.resolve(&stored).unwrap();
    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"not really a png");

    store.delete(&stored).await;
    assert!(!path.exists());
  }

  #[tokio::test]
  async fn test_delete_leaves_external_urls_alone() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ImageStore::new(tmp.path());
    // No panic, no filesystem access for URL-shaped values.
    store.delete("https://cdn.example.com/dish.png").await;
  }
}
