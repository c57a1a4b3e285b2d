use clap::Parser;
use std::path::PathBuf;

use crate::settings::{CodecKind, DemoConfig};

/// Command line of the `securemem` demo. Flags override the config file and environment.
#[derive(Debug, Parser)]
#[command(name = "securemem")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stores a record in an encrypted in-memory vault and round-trips a snapshot")]
pub struct Cli {
    /// TOML config file; `SECUREMEM__*` environment variables override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Persist the vault here, then restore it into a fresh vault
    #[arg(short, long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// 256-bit key as 64 hex characters (random when omitted)
    #[arg(long, value_name = "HEX")]
    pub key_hex: Option<String>,

    /// Value codec
    #[arg(long, value_enum)]
    pub codec: Option<CodecKind>,
}

impl Cli {
    /// Applies the flags that were given on top of the loaded config.
    #[must_use]
    pub fn apply(self, mut config: DemoConfig) -> DemoConfig {
        if let Some(snapshot) = self.snapshot {
            config.snapshot = Some(snapshot);
        }
        if let Some(key_hex) = self.key_hex {
            config.key_hex = Some(key_hex);
        }
        if let Some(codec) = self.codec {
            config.codec = codec;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["securemem", "--snapshot", "out.bin", "--codec", "json"]);
        let base = DemoConfig { snapshot: Some("in.bin".into()), ..DemoConfig::default() };

        let config = cli.apply(base);

        assert_eq!(config.snapshot, Some(PathBuf::from("out.bin")));
        assert_eq!(config.codec, CodecKind::Json);
        assert!(config.key_hex.is_none());
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::parse_from(["securemem"]);
        let base = DemoConfig { codec: CodecKind::Json, ..DemoConfig::default() };

        assert_eq!(cli.apply(base).codec, CodecKind::Json);
    }
}
