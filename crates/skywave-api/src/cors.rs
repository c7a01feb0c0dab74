//! Permissive CORS middleware.
//!
//! Preflight OPTIONS requests are answered directly with an empty 204 and
//! never reach the routing layer; all other responses get the same
//! allow-everything headers appended.

use axum::{
  extract::Request,
  http::{HeaderMap, HeaderValue, Method, StatusCode, header},
  middleware::Next,
  response::{IntoResponse, Response},
};

pub async fn permissive(req: Request, next: Next) -> Response {
  if req.method() == Method::OPTIONS {
    let mut res = StatusCode::NO_CONTENT.into_response();
    apply(res.headers_mut());
    return res;
  }
  let mut res = next.run(req).await;
  apply(res.headers_mut());
  res
}

fn apply(headers: &mut HeaderMap) {
  headers.insert(
    header::ACCESS_CONTROL_ALLOW_ORIGIN,
    HeaderValue::from_static("*"),
  );
  headers.insert(
    header::ACCESS_CONTROL_ALLOW_METHODS,
    HeaderValue::from_static("GET, POST, OPTIONS"),
  );
  headers.insert(
    header::ACCESS_CONTROL_ALLOW_HEADERS,
    HeaderValue::from_static("Content-Type, X-API-Key"),
  );
}
