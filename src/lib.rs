pub mod config;
pub mod db;
pub mod error;
pub mod server;

mod utils;

pub use error::GarageError;
