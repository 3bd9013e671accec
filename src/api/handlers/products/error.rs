use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::{PRODUCT_NOT_FOUND, types::ErrorBody};
use crate::{api::validation::ValidationErrors, store::StoreError};

#[derive(Debug)]
pub enum ProductError {
    Invalid(ValidationErrors),
    NotFound,
    Store(StoreError),
}

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}

impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ProductError {
    /// Validation and lookup failures get their own bodies; store failures are
    /// logged and surfaced as a bare `500`.
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(errors) => errors.into_response(),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: PRODUCT_NOT_FOUND.to_string(),
                }),
            )
                .into_response(),
            Self::Store(err) => {
                error!("Database error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
