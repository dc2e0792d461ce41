use crate::error::GarageError;
use crate::utils::logging::debug_json;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
};
use garage_schema::{CarFields, validate_for_create};
use serde_json::Value;
use tracing::debug;

/// Integer car id taken from the `{id}` path segment.
///
/// Only canonical decimal digits name a car: signs, leading zeros and values
/// outside `i64` are rejected with a bare 404 like any other unknown route.
#[derive(Debug, Clone, Copy)]
pub struct CarId(pub i64);

impl<S> FromRequestParts<S> for CarId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;

        parse_car_id(&raw).map(CarId).ok_or(StatusCode::NOT_FOUND)
    }
}

fn parse_car_id(raw: &str) -> Option<i64> {
    let canonical = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    if !canonical {
        return None;
    }
    raw.parse().ok()
}

/// A create payload that passed validation.
pub struct CarCreatePayload(pub CarFields);

impl<S> FromRequest<S> for CarCreatePayload
where
    S: Send + Sync,
{
    type Rejection = GarageError;

    /// Extract and validate a `POST /api/cars` body.
    ///
    /// - JSON syntax and content-type failures surface as `GarageError::InvalidBody`.
    /// - Field failures are collected in full and surface as `GarageError::Validation`.
    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, &()).await?;
        let fields = validate_for_create(&body)?;

        if let Some(pretty_body) = debug_json(&fields) {
            debug!(body = %pretty_body, "[Cars] Validated create payload");
        }

        Ok(Self(fields))
    }
}
