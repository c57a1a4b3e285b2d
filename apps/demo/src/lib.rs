//! # `SecureMem` demo
//!
//! Library half of the `securemem` binary: command line, layered configuration and the
//! walk-through that stores a user record, reads it back and round-trips a snapshot.

pub mod cli;
pub mod settings;
pub mod scenario;

pub use cli::Cli;
pub use settings::{CodecKind, ConfigError, DemoConfig, load_config};
pub use scenario::{Report, User, run};
