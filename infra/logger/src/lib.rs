//! # Logger
//!
//! Process-wide `tracing` setup for the `SecureMem` binaries.
//! It writes compact lines to the console and, optionally, plain or JSON lines to a
//! rolling file through a non-blocking worker.
//!
//! Settings come either from the builder or from a deserialized [`LogSettings`]
//! section of the application config. Vault crates only emit events; they never
//! install a subscriber themselves.
//!
//! ## Example
//!
//! ```rust
//! # use smem_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("my-app")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;
mod settings;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::settings::{FileSettings, LogSettings, RotationKind};
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    level: LevelFilter,
    filter: Option<String>,
    console: bool,
    file: Option<FileSettings>,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name of the logger, used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder {
            level: self.level,
            filter: self.filter,
            console: self.console,
            file: self.file,
            name: WithName(name.into()),
        }
    }
}

impl LoggerBuilder<WithName> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Adds explicit filter directives (e.g., `smem_vault=trace`).
    ///
    /// When set, `RUST_LOG` is ignored. Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enables console logging.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Enables rolling file output.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn file(mut self, file: FileSettings) -> Self {
        self.file = Some(file);
        self
    }

    /// Applies a deserialized settings section on top of the builder.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown level name.
    pub fn settings(mut self, settings: &LogSettings) -> Result<Self, LoggerError> {
        self.level = settings.level_filter()?;
        self.filter.clone_from(&settings.filter);
        self.console = settings.console;
        self.file.clone_from(&settings.file);
        Ok(self)
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. **Note:** This handle contains a [`WorkerGuard`]
    /// that must be kept alive for the duration of the program to ensure
    /// that non-blocking logs are flushed correctly.
    ///
    /// # Errors
    /// * [`LoggerError::Subscriber`] If a global subscriber has already been set.
    /// * [`LoggerError::InvalidConfiguration`] For an empty name, bad filter or no outputs.
    /// * [`LoggerError::Io`] If the log directory cannot be created.
    /// * [`LoggerError::Appender`] If the rolling file cannot be opened.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;

        let env_filter = self.env_filter_layer()?;
        let mut layers = Vec::new();

        if self.console {
            layers.push(layer().compact().with_target(true).with_ansi(true).boxed());
        }

        let guard = if let Some(file) = &self.file {
            fs::create_dir_all(&file.directory)
                .context(format!("Failed to create path: {}", file.directory.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(file.rotation.into())
                .filename_prefix(&self.name.0)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(file.max_files)
                .build(&file.directory)?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);

            layers.push(if file.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging outputs enabled. Enable the console or a log file.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.0.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        if self.file.as_ref().is_some_and(|file| file.max_files == 0) {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: Some("log.file".into()),
            });
        }

        Ok(())
    }

    fn env_filter_layer(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        self.filter.as_ref().map_or_else(
            || Ok(builder.from_env_lossy()),
            |filter| {
                builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{filter}': {e}").into(),
                    context: None,
                })
            },
        )
    }
}

/// A handle to the initialized logging system.
///
/// Holds the background file writer guard. Drop it only when the application
/// is shutting down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    ///
    /// The `name` is used as the prefix of rolling log files
    /// (e.g., `securemem.2026-10-18.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            level: LevelFilter::INFO,
            filter: None,
            console: true,
            file: None,
            name: NoName,
        }
    }

    /// Returns `true` when a rolling file writer is attached.
    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
