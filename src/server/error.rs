use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::views::ErrorView;
use crate::catalog::CatalogError;

pub enum ApiError {
    Catalog(CatalogError),
    /// Path id that is not an integer, treated like a missing entry.
    UnknownId(String),
    InvalidFormToken,
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorView {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Catalog(err) => match err {
                CatalogError::NotFound(_) => error_response(StatusCode::NOT_FOUND, err.to_string()),
                CatalogError::DuplicateTitle(_) => {
                    error_response(StatusCode::CONFLICT, err.to_string())
                }
                CatalogError::InvalidInput(_) => {
                    error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                }
                CatalogError::Upstream(_) | CatalogError::IncompleteDetail(_) => {
                    error!("Metadata lookup failed: {}", err);
                    error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Error fetching movie data",
                    )
                }
                CatalogError::Store(_) => {
                    error!("Movie store failure: {}", err);
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            ApiError::UnknownId(raw) => {
                error_response(StatusCode::NOT_FOUND, format!("No movie with id {}", raw))
            }
            ApiError::InvalidFormToken => {
                error_response(StatusCode::FORBIDDEN, "Missing or expired form token")
            }
        }
    }
}
