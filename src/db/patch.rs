use async_trait::async_trait;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::models::DbCar;
use crate::error::GarageError;

// Validated payloads come from the schema crate; re-exported so callers can
// stay on `garage::db::{CarFields, CarPatch}`.
pub use garage_schema::{CarFields, CarPatch};

/// Abstraction for applying a patch envelope to the database.
#[async_trait]
pub trait DbPatchable {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<DbCar, GarageError>;
}

/// A partial update addressed to one row.
#[derive(Debug, Clone, Serialize)]
pub struct CarUpdate {
    pub id: i64,
    pub patch: CarPatch,
}

impl CarUpdate {
    pub fn new(id: i64, patch: CarPatch) -> Self {
        Self { id, patch }
    }
}
