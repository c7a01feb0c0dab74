//! Shared-secret header check for the sync endpoint.

use axum::http::HeaderMap;

use crate::error::ApiError;

/// Header carrying the edge node's shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Verify the `X-API-Key` header against the configured secret.
///
/// Runs before the body is even looked at; a missing or wrong key is a 401
/// regardless of what the request contains.
pub fn verify_api_key(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
  let presented = headers
    .get(API_KEY_HEADER)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  if presented != expected {
    return Err(ApiError::Unauthorized);
  }
  Ok(())
}
