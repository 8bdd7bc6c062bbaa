use reno_core::error::CoreError;

/// Error returned by repository operations.
///
/// Domain failures (validation, references, conflicts, missing rows) arrive
/// as [`CoreError`]; anything the store itself raises stays a `sqlx::Error`.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: reno_core::types::DbId) -> Self {
        Self::Core(CoreError::NotFound { entity, id })
    }
}
