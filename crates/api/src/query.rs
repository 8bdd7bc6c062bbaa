//! Shared query parameter types for API handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use reno_core::error::CoreError;
use reno_core::pagination::PageRequest;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;

/// Query-string extractor whose rejection is an [`AppError`].
///
/// Behaves like [`Query`], but a malformed query string (`?page=abc`,
/// `?project_id=`) becomes a `VALIDATION_ERROR` in the usual JSON error
/// body instead of a plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri)
            .map_err(|rejection| AppError::Core(CoreError::Validation(rejection.body_text())))?;
        Ok(Self(value))
    }
}

/// Page-number pagination parameters (`?page=&page_size=`).
///
/// Extracted alongside each list endpoint's filter struct; both read the
/// same query string.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Validate against the configured maximum page size.
    pub fn to_request(&self, max_page_size: i64) -> Result<PageRequest, CoreError> {
        PageRequest::new(self.page, self.page_size, max_page_size)
    }
}
