//! Content negotiation guard for the versioned API.

use axum::{
    extract::Request,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};

use crate::config::{API_MEDIA_TYPE, JSON_CONTENT_TYPE};
use crate::errors::AppError;

/// Reject requests that do not speak the API's media types.
///
/// Every request, body or not, must declare `Content-Type: application/json`
/// and accept the vendor media type.
pub async fn require_api_headers(request: Request, next: Next) -> Result<Response, AppError> {
    check_api_headers(request.headers())?;
    Ok(next.run(request).await)
}

/// Header checks behind [`require_api_headers`].
pub fn check_api_headers(headers: &HeaderMap) -> Result<(), AppError> {
    if !declares_json(headers) {
        return Err(AppError::UnsupportedMediaType);
    }
    if !accepts_api_media_type(headers) {
        return Err(AppError::NotAcceptable(API_MEDIA_TYPE));
    }
    Ok(())
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| media_type(v).eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}

fn accepts_api_media_type(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|v| media_type(v).eq_ignore_ascii_case(API_MEDIA_TYPE))
}

/// Strip parameters (`; charset=utf-8`, `; q=0.9`) and whitespace.
fn media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or_default().trim()
}
