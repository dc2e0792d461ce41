use crate::db::DbCar;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use garage_schema::CarOutput;

pub fn to_output(car: DbCar) -> CarOutput {
    CarOutput::from(car)
}

pub fn car_json(car: DbCar) -> Json<CarOutput> {
    Json(to_output(car))
}

pub fn cars_json(cars: Vec<DbCar>) -> Json<Vec<CarOutput>> {
    Json(cars.into_iter().map(to_output).collect())
}

pub fn created(car: DbCar) -> Response {
    (StatusCode::CREATED, car_json(car)).into_response()
}
