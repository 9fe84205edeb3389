//! Request-scoped error taxonomy. Unknown categorical values and missing
//! dates are encoding degradations, not errors, and never surface here.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("feature schema mismatch: expected {expected} columns, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("model error: {0}")]
    Model(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("no batch result found: {0}")]
    ResultNotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("signature verification failed: {0}")]
    Verification(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

impl From<csv::Error> for ServiceError {
    fn from(err: csv::Error) -> Self {
        ServiceError::Validation(format!("malformed tabular input: {}", err))
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::SchemaMismatch { .. } => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::ResultNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Verification(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Model(_)
            | ServiceError::Inference(_)
            | ServiceError::Storage(_)
            | ServiceError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
