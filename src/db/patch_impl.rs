//! CarUpdate -> DbPatchable implementation.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::DbCar;
use crate::db::patch::{CarPatch, CarUpdate, DbPatchable};
use crate::error::GarageError;

#[async_trait]
impl DbPatchable for CarUpdate {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<DbCar, GarageError> {
        let id = self.id;
        let CarPatch { make, model, year } = self.patch.clone();

        let make_set = make.is_some();
        let model_set = model.is_some();
        // `Some(None)` clears the column, so `year` needs an explicit flag rather than COALESCE.
        let year_set = year.is_some();
        let year = year.flatten();
        let updated_at = Utc::now();

        let row = sqlx::query_as::<_, DbCar>(
            r#"
            UPDATE cars
            SET
                make = COALESCE(?, make),
                model = COALESCE(?, model),
                year = CASE WHEN ? THEN ? ELSE year END,
                updated_at = ?
            WHERE id = ?
            RETURNING id, make, model, year, created_at, updated_at
            "#,
        )
        .bind(make)
        .bind(model)
        .bind(year_set)
        .bind(year)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        debug!(
            table = "cars",
            id,
            found = row.is_some(),
            updated_at = %updated_at,
            make_set,
            model_set,
            year_set,
            "db patch applied"
        );

        row.ok_or(GarageError::NotFound { id })
    }
}
