use crate::server::router::GarageState;
use axum::{Router, routing::get};

pub mod extract;
pub mod handlers;
pub mod respond;

pub fn router() -> Router<GarageState> {
    Router::new()
        .route(
            "/api/cars",
            get(handlers::list_cars).post(handlers::create_car),
        )
        .route(
            "/api/cars/{id}",
            get(handlers::get_car)
                .put(handlers::update_car)
                .patch(handlers::update_car)
                .delete(handlers::delete_car),
        )
}
