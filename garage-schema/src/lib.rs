pub mod car;

pub use car::{
    CarFields, CarOutput, CarPatch, FieldErrors, MAX_TEXT_LEN, validate_for_create,
    validate_for_update,
};
