use chrono::{DateTime, Utc};
use garage_schema::CarOutput;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbCar {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbCar> for CarOutput {
    fn from(car: DbCar) -> Self {
        CarOutput {
            id: car.id,
            make: car.make,
            model: car.model,
            year: car.year,
        }
    }
}
