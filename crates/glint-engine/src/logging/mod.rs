//! Logging utilities.
//!
//! Centralizes logger initialization and common diagnostics. Intentionally
//! small; everything else goes through the standard `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
