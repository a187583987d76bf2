pub mod config;
pub mod dispatch;
pub mod error;
pub mod line;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
