pub mod data;
pub mod error;
pub mod module;
pub mod objective;

pub use error::{Error, Result};
