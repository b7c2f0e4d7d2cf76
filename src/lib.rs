pub mod config;
pub mod error;
pub mod extract;
pub mod tag;
pub mod ui;
pub mod version;

pub use error::{NextverError, Result};
