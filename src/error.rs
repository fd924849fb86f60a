use thiserror::Error;

/// Failures surfaced by the listing service. Nothing here is retried locally.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}
