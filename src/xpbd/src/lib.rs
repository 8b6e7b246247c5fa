pub mod chain;
pub mod config;
pub mod constraint;
pub mod controller_message;
mod error;
pub mod particle;
pub mod pointer;
pub mod pworld;

pub use error::{Error, Result};

pub type V2 = nalgebra::Vector2<f32>;
