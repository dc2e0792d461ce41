//! Payload validation for car writes.
//!
//! Both entry points collect every field failure before returning, so a client
//! sees all problems in one response. `id` and unrecognised keys are ignored.

use super::{CarFields, CarPatch, FieldErrors};
use serde_json::{Map, Value};

/// Upper bound (in characters) for `make` and `model`.
pub const MAX_TEXT_LEN: usize = 255;

/// Key used when the payload as a whole is unusable.
const SCHEMA_KEY: &str = "_schema";

const MSG_INVALID_INPUT: &str = "Invalid input type.";
const MSG_MISSING: &str = "Missing data for required field.";
const MSG_NULL: &str = "Field may not be null.";
const MSG_BLANK: &str = "Field may not be blank.";
const MSG_NOT_STRING: &str = "Not a valid string.";
const MSG_NOT_INTEGER: &str = "Not a valid integer.";

/// Validate a create payload: `make` and `model` required, `year` optional.
pub fn validate_for_create(payload: &Value) -> Result<CarFields, FieldErrors> {
    let object = as_object(payload)?;
    let mut errors = FieldErrors::new();

    let make = required_text(object, "make", &mut errors);
    let model = required_text(object, "model", &mut errors);
    let year = object
        .get("year")
        .and_then(|value| check_year(value, &mut errors))
        .flatten();

    match (make, model) {
        (Some(make), Some(model)) => errors.into_result(CarFields { make, model, year }),
        _ => Err(errors),
    }
}

/// Validate an update payload. Every field is optional; the ones present are
/// type-checked with the same rules as on create.
pub fn validate_for_update(payload: &Value) -> Result<CarPatch, FieldErrors> {
    let object = as_object(payload)?;
    let mut errors = FieldErrors::new();

    let patch = CarPatch {
        make: object
            .get("make")
            .and_then(|value| check_text("make", value, &mut errors)),
        model: object
            .get("model")
            .and_then(|value| check_text("model", value, &mut errors)),
        year: object
            .get("year")
            .and_then(|value| check_year(value, &mut errors)),
    };

    errors.into_result(patch)
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    payload.as_object().ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.add(SCHEMA_KEY, MSG_INVALID_INPUT);
        errors
    })
}

fn required_text(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match object.get(field) {
        Some(value) => check_text(field, value, errors),
        None => {
            errors.add(field, MSG_MISSING);
            None
        }
    }
}

/// Returns `None` when the value was rejected (the reason is recorded in `errors`).
fn check_text(field: &str, value: &Value, errors: &mut FieldErrors) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => {
            errors.add(field, MSG_BLANK);
            None
        }
        Value::String(s) if s.chars().count() > MAX_TEXT_LEN => {
            errors.add(field, format!("Longer than maximum length {MAX_TEXT_LEN}."));
            None
        }
        Value::String(s) => Some(s.clone()),
        Value::Null => {
            errors.add(field, MSG_NULL);
            None
        }
        _ => {
            errors.add(field, MSG_NOT_STRING);
            None
        }
    }
}

/// `Some(None)` for an explicit `null`, `Some(Some(y))` for an integer, `None` when rejected.
fn check_year(value: &Value, errors: &mut FieldErrors) -> Option<Option<i64>> {
    match value {
        Value::Null => Some(None),
        Value::Number(n) => match n.as_i64() {
            Some(year) => Some(Some(year)),
            None => {
                errors.add("year", MSG_NOT_INTEGER);
                None
            }
        },
        _ => {
            errors.add("year", MSG_NOT_INTEGER);
            None
        }
    }
}
