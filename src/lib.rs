pub mod config;
pub mod error;
pub mod server;
pub mod service;

pub use error::{Error, Result};
