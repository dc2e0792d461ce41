use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use garage_schema::FieldErrors;
use serde::Serialize;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum GarageError {
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Car not found for id={id}")]
    NotFound { id: i64 },

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl IntoResponse for GarageError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            // Field errors go out as the bare `{field: [messages]}` map.
            GarageError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
            }

            GarageError::InvalidBody(rejection) => {
                let status = rejection.status();
                let body = ApiErrorObject {
                    code: "INVALID_BODY".to_string(),
                    message: rejection.body_text(),
                };
                (status, body)
            }

            GarageError::NotFound { id } => {
                let status = StatusCode::NOT_FOUND;
                let body = ApiErrorObject {
                    code: "NOT_FOUND".to_string(),
                    message: format!("Car {id} not found."),
                };
                (status, body)
            }

            GarageError::DatabaseError(_)
            | GarageError::RactorError(_)
            | GarageError::UnexpectedError(_) => {
                error!(error = %self, "request failed with internal error");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
