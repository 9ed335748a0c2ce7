pub mod db;

pub mod categories;
pub mod constants;
pub mod errors;
pub mod fees;
pub mod parking;
pub mod payments;
pub mod permits;
pub mod schema;

pub use errors::{Error, Result};
