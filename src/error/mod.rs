mod garage;

pub use garage::{ApiErrorBody, ApiErrorObject, GarageError};
