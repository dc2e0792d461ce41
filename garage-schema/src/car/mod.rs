mod errors;
mod validate;

pub use errors::FieldErrors;
pub use validate::{MAX_TEXT_LEN, validate_for_create, validate_for_update};

use serde::{Deserialize, Serialize};

/// Public projection of a stored car.
///
/// Always carries exactly `id`, `make`, `model` and `year`; a missing year is
/// serialized as `null` rather than omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CarOutput {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: Option<i64>,
}

/// Validated field set for inserting a new car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarFields {
    pub make: String,
    pub model: String,
    pub year: Option<i64>,
}

/// Validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CarPatch {
    /// `None` => do not change; `Some(v)` => update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    /// `None` => do not change; `Some(v)` => update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// `None` => do not change; `Some(None)` => clear; `Some(Some(v))` => update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Option<i64>>,
}
