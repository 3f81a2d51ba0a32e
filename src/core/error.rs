use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

/// Public message for any upstream fetch failure
pub const UPSTREAM_UNAVAILABLE: &str = "External data source unavailable";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Could not fetch data from RestCountries API: {0}")]
    CountrySourceUnavailable(String),

    #[error("Could not fetch data from Exchange Rates API: {0}")]
    RateSourceUnavailable(String),

    #[error("Failed to generate summary image: {0}")]
    Render(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some("Database error occurred".to_string()),
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::CountrySourceUnavailable(ref msg) => {
                tracing::error!("Country source unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    UPSTREAM_UNAVAILABLE.to_string(),
                    Some("Could not fetch data from RestCountries API".to_string()),
                )
            }
            AppError::RateSourceUnavailable(ref msg) => {
                tracing::error!("Exchange rate source unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    UPSTREAM_UNAVAILABLE.to_string(),
                    Some("Could not fetch data from Exchange Rates API".to_string()),
                )
            }
            AppError::Render(ref msg) => {
                tracing::error!("Render error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse { error, details });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors_map_to_service_unavailable() {
        let countries = AppError::CountrySourceUnavailable("timeout".to_string()).into_response();
        assert_eq!(countries.status(), StatusCode::SERVICE_UNAVAILABLE);

        let rates = AppError::RateSourceUnavailable("503".to_string()).into_response();
        assert_eq!(rates.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_not_found_and_internal_status() {
        let not_found = AppError::NotFound("Country not found".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let internal = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bad = AppError::BadRequest("bad".to_string()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }
}
