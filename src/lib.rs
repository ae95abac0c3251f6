pub mod config;
pub mod error;
pub mod qa;
pub mod server;

pub use error::{Error, Result};
