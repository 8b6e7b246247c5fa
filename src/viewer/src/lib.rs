pub mod config;
pub mod driver;
mod error;
pub mod reveal;
pub mod surface;
pub mod svg;
pub mod time_manager;

pub use error::{Error, Result};
