//! Utility modules

pub mod logging;

pub use logging::{LogFormat, LoggingConfig, LoggingSystem};
