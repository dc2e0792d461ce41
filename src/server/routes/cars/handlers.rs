use super::extract::{CarCreatePayload, CarId};
use super::respond::{car_json, cars_json, created};
use crate::db::CarUpdate;
use crate::error::GarageError;
use crate::server::router::GarageState;
use crate::utils::logging::debug_json;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use garage_schema::{CarOutput, validate_for_update};
use serde_json::Value;
use tracing::{debug, info};

/// GET /api/cars
pub async fn list_cars(
    State(state): State<GarageState>,
) -> Result<Json<Vec<CarOutput>>, GarageError> {
    let cars = state.db.list().await?;
    debug!(count = cars.len(), "[Cars] Listed cars");
    Ok(cars_json(cars))
}

/// POST /api/cars
pub async fn create_car(
    State(state): State<GarageState>,
    CarCreatePayload(fields): CarCreatePayload,
) -> Result<Response, GarageError> {
    let car = state.db.create(fields).await?;
    info!(id = car.id, make = %car.make, model = %car.model, "[Cars] Created car");
    Ok(created(car))
}

/// GET /api/cars/{id}
pub async fn get_car(
    State(state): State<GarageState>,
    CarId(id): CarId,
) -> Result<Json<CarOutput>, GarageError> {
    let car = state.db.get(id).await?;
    Ok(car_json(car))
}

/// PUT /api/cars/{id}
///
/// Partial update: only the fields present in the body change. An unknown id
/// answers 404 regardless of what the body contains.
pub async fn update_car(
    State(state): State<GarageState>,
    CarId(id): CarId,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CarOutput>, GarageError> {
    let validated = payload
        .map_err(GarageError::from)
        .and_then(|Json(body)| validate_for_update(&body).map_err(GarageError::from));

    let patch = match validated {
        Ok(patch) => patch,
        Err(err) => {
            state.db.get(id).await?;
            return Err(err);
        }
    };

    if let Some(pretty_body) = debug_json(&patch) {
        debug!(id, body = %pretty_body, "[Cars] Validated update payload");
    }

    let car = state.db.update(CarUpdate::new(id, patch)).await?;
    info!(id, "[Cars] Updated car");
    Ok(car_json(car))
}

/// DELETE /api/cars/{id}
pub async fn delete_car(
    State(state): State<GarageState>,
    CarId(id): CarId,
) -> Result<StatusCode, GarageError> {
    state.db.delete(id).await?;
    info!(id, "[Cars] Deleted car");
    Ok(StatusCode::NO_CONTENT)
}
