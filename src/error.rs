use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::Config;
use crate::store::StoreError;

/// Why a create or filter request was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Status must be Present or Absent (got {0:?})")]
    InvalidStatus(String),

    #[error("Date must be formatted as YYYY-MM-DD (got {0:?})")]
    InvalidDate(String),
}

/// JSON envelope for every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Attendance record not found")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{message}")]
    Storage {
        message: &'static str,
        details: Option<String>,
    },

    #[error("{message}")]
    BadRequest {
        message: &'static str,
        details: String,
    },
}

impl AppError {
    /// Log a store failure and wrap it. The cause is only exposed to clients
    /// outside production.
    pub fn storage(message: &'static str, err: StoreError, config: &Config) -> Self {
        tracing::error!(error = %err, "{message}");
        let details = (!config.is_production()).then(|| err.to_string());
        AppError::Storage { message, details }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            AppError::Storage { details, .. } => details.clone(),
            AppError::BadRequest { details, .. } => Some(details.clone()),
            AppError::Validation(_) | AppError::NotFound(_) => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            details,
        })
    }
}
