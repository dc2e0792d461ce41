//! Database module: the car store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `patch.rs`: create/patch payloads and the `DbPatchable` contract
//! - `actor.rs`: the actor owning the pool, plus its cloneable handle

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;

mod patch_impl;

pub use models::DbCar;
pub use patch::{CarFields, CarPatch, CarUpdate, DbPatchable};
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
