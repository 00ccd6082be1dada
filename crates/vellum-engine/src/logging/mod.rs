//! Logging utilities.
//!
//! Library code only emits through the `log` facade; hosts call
//! [`init_logging`] once to install an `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
