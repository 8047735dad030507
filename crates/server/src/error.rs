use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("datafile I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("datafile is corrupt: {corrupt} of {total} lines unreadable")]
    Corrupt { corrupt: usize, total: usize },
}

/// Failures surfaced to HTTP clients as plain-text 500s
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Could not save to database")]
    Save(#[source] StoreError),
    #[error("Could not delete from database")]
    Delete(#[source] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Save(e) | ApiError::Delete(e) => tracing::error!("{}: {}", self, e),
        }
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
