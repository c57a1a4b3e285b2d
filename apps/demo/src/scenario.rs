use smem_vault::prelude::*;
use std::path::Path;
use tracing::{info, warn};

use crate::settings::{CodecKind, DemoConfig};

#[vault_model]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl User {
    #[must_use]
    pub fn alice() -> Self {
        Self { id: 42, name: "Alice".into(), email: "alice@example.com".into() }
    }
}

/// What the scenario observed.
#[derive(Debug)]
pub struct Report {
    pub recovered: User,
    /// Record read back from the snapshot by a fresh vault holding the same key.
    pub restored: Option<User>,
    /// Error a vault with an unrelated random key got when loading the snapshot.
    pub stranger: Option<VaultError>,
}

/// Runs the store / retrieve / persist / restore walk-through with the configured codec.
///
/// # Errors
/// Returns the first [`VaultError`] of the happy path. The stranger's failure is part of
/// the report, not an error.
pub fn run(config: &DemoConfig) -> Result<Report, VaultError> {
    match config.codec {
        CodecKind::Postcard => run_with::<Postcard>(config),
        CodecKind::Json => run_with::<Json>(config),
    }
}

fn run_with<S: Codec>(config: &DemoConfig) -> Result<Report, VaultError> {
    let key = match &config.key_hex {
        Some(encoded) => SecretKey::from_hex(encoded).context("key_hex")?,
        None => SecretKey::generate()?,
    };
    let handoff = key.to_hex();

    let vault = Vault::<Aes, S>::with_key(key)?;
    vault.put("user1", &User::alice())?;
    let recovered: User = vault.get("user1")?;
    info!(codec = S::NAME, entries = vault.len(), "Stored and retrieved user1");

    let Some(path) = config.snapshot.as_deref() else {
        return Ok(Report { recovered, restored: None, stranger: None });
    };

    vault.persist_to_file(path)?;
    let restored = restore::<S>(path, SecretKey::from_hex(&handoff)?)?;
    let stranger = Vault::<Aes, S>::new()?.load_from_file(path).err();
    if stranger.is_none() {
        warn!(path = %path.display(), "Snapshot opened under an unrelated key");
    }

    Ok(Report { recovered, restored: Some(restored), stranger })
}

fn restore<S: Codec>(path: &Path, key: SecretKey) -> Result<User, VaultError> {
    let fresh = Vault::<Aes, S>::with_key(key)?;
    fresh.load_from_file(path)?;
    fresh.get("user1")
}
