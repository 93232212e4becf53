//! User ID path parameter extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::errors::AppError;

/// Extractor for the `{id}` path segment.
///
/// A segment that is not a UUID cannot name any user, so it is reported as
/// "User not found." rather than a bad request.
pub struct UserId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        Uuid::parse_str(&id).map(UserId).map_err(|_| {
            tracing::debug!("Invalid user id: {}", id);
            AppError::NotFound
        })
    }
}
