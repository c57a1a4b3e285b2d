use config::{Config, Environment, File};
use serde::Deserialize;
use smem_logger::LogSettings;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of environment overrides, e.g. `SECUREMEM__LOG__LEVEL=debug`.
pub const ENV_PREFIX: &str = "SECUREMEM";

#[smem_derive::smem_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Value codec selected for the demo vault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    #[default]
    Postcard,
    Json,
}

#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// 64 hex characters. A random key is generated when absent.
    pub key_hex: Option<String>,
    /// Where to write and restore the snapshot. Persistence is skipped when absent.
    pub snapshot: Option<PathBuf>,
    pub codec: CodecKind,
    pub log: LogSettings,
}

impl fmt::Debug for DemoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoConfig")
            .field("key_hex", &self.key_hex.as_ref().map(|_| "<redacted>"))
            .field("snapshot", &self.snapshot)
            .field("codec", &self.codec)
            .field("log", &self.log)
            .finish()
    }
}

/// Loads [`DemoConfig`] from an optional TOML file, overlaid with `SECUREMEM__*` variables.
///
/// Nested keys use a double underscore: `SECUREMEM__LOG__LEVEL` maps to `log.level`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the given file is missing or a value does not fit.
pub fn load_config(path: Option<&Path>) -> Result<DemoConfig, ConfigError> {
    load_with(path, environment())
}

pub(crate) fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake)
}

pub(crate) fn load_with(path: Option<&Path>, env: Environment) -> Result<DemoConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        debug!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<DemoConfig>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
