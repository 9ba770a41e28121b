//! docqa core library
//!
//! This crate provides the foundational utilities shared by the docqa crates:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management (including the answer wording)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AnswerMessages, AppConfig};
pub use error::{AppError, AppResult};
