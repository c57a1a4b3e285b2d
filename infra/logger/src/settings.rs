//! Serializable logging settings, loaded from the application config file.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;

use crate::error::LoggerError;

const DEFAULT_MAX_FILES: usize = 10;

/// The `[log]` section of an application config.
///
/// ```toml
/// [log]
/// level = "debug"
/// filter = "smem_vault=trace"
/// console = true
///
/// [log.file]
/// directory = "logs"
/// rotation = "daily"
/// max_files = 7
/// json = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Minimum level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Extra `EnvFilter` directives. `RUST_LOG` is only consulted when this is unset.
    pub filter: Option<String>,
    pub console: bool,
    pub file: Option<FileSettings>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".into(), filter: None, console: true, file: None }
    }
}

impl LogSettings {
    /// Parses [`LogSettings::level`].
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown level name.
    pub fn level_filter(&self) -> Result<LevelFilter, LoggerError> {
        LevelFilter::from_str(self.level.trim()).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Unknown log level '{}': {e}", self.level).into(),
            context: None,
        })
    }
}

/// Rolling file output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub directory: PathBuf,
    #[serde(default)]
    pub rotation: RotationKind,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// One JSON object per line instead of plain text.
    #[serde(default)]
    pub json: bool,
}

impl FileSettings {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            rotation: RotationKind::default(),
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

const fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationKind {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<RotationKind> for Rotation {
    fn from(kind: RotationKind) -> Self {
        match kind {
            RotationKind::Minutely => Self::MINUTELY,
            RotationKind::Hourly => Self::HOURLY,
            RotationKind::Daily => Self::DAILY,
            RotationKind::Never => Self::NEVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_log_info_to_console() {
        let settings: LogSettings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings, LogSettings::default());
        assert_eq!(settings.level_filter().unwrap(), LevelFilter::INFO);
    }

    #[test]
    fn file_section_fills_defaults() {
        let settings: LogSettings =
            serde_json::from_str(r#"{"level":"debug","file":{"directory":"logs"}}"#).unwrap();
        let file = settings.file.unwrap();

        assert_eq!(file, FileSettings::new("logs"));
        assert_eq!(file.rotation, RotationKind::Daily);
        assert_eq!(file.max_files, DEFAULT_MAX_FILES);
    }

    #[test]
    fn rotation_names_are_lowercase() {
        let file: FileSettings =
            serde_json::from_str(r#"{"directory":"x","rotation":"hourly","json":true}"#).unwrap();

        assert_eq!(file.rotation, RotationKind::Hourly);
        assert!(file.json);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<LogSettings>(r#"{"colour":true}"#).is_err());
    }

    #[test]
    fn unknown_level_is_invalid_configuration() {
        let settings = LogSettings { level: "chatty".into(), ..LogSettings::default() };

        assert!(matches!(settings.level_filter(), Err(LoggerError::InvalidConfiguration { .. })));
    }
}
