//! # Snapshots
//!
//! The whole map is persisted as a single sealed blob:
//!
//! ```text
//! [NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! The plaintext is the codec encoding of the map of already-sealed entries, with keys in
//! ascending order so equal maps encode to equal bytes. Entries are therefore sealed
//! twice on disk: once individually, once as part of the snapshot. The snapshot nonce is
//! independent of every entry nonce. There is no header and no version byte.
//!
//! Writes are not crash-atomic: the target is truncated and rewritten in place. A crash
//! mid-write leaves a file that fails to load with an authentication error.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::codec::Codec;
use crate::engine::{Entries, Vault};
use crate::error::{VaultError, VaultErrorExt};
use crate::types::VaultCipher;

/// Owner read/write only.
#[cfg(unix)]
const SNAPSHOT_MODE: u32 = 0o600;

impl<C, S> Vault<C, S>
where
    C: VaultCipher,
    S: Codec,
{
    /// Writes an encrypted snapshot of the whole vault to `path`.
    ///
    /// The file is created (or truncated) with owner-only permissions. On Unix an
    /// existing file is also narrowed to `0o600`.
    ///
    /// # Errors
    /// * [`VaultError::Marshal`] If the map cannot be encoded.
    /// * [`VaultError::NonceGeneration`] If the random source is unavailable.
    /// * [`VaultError::Io`] If the file cannot be created or written.
    pub fn persist_to_file(&self, path: impl AsRef<Path>) -> Result<(), VaultError> {
        let path = path.as_ref();
        let entries = self.inner.entries.read();

        let blob = self.seal_snapshot(&entries)?;
        let mut file = create_owner_only(path)
            .context(format!("Failed to create snapshot: {}", path.display()))?;
        file.write_all(&blob).context(format!("Failed to write snapshot: {}", path.display()))?;
        file.sync_all().context("Hardware sync failed")?;

        info!(path = %path.display(), entries = entries.len(), bytes = blob.len(), "Vault persisted");
        Ok(())
    }

    /// Writes an encrypted snapshot of the whole vault to `writer`.
    ///
    /// # Errors
    /// Same as [`Vault::persist_to_file`].
    pub fn persist_to_writer(&self, mut writer: impl Write) -> Result<(), VaultError> {
        let entries = self.inner.entries.read();

        let blob = self.seal_snapshot(&entries)?;
        writer.write_all(&blob).context("Failed to write snapshot")?;
        writer.flush().context("Failed to flush snapshot")?;

        info!(entries = entries.len(), bytes = blob.len(), "Vault persisted");
        Ok(())
    }

    /// Replaces the whole vault with the snapshot stored at `path`.
    ///
    /// This is a destructive full replace, not a merge. On error the current entries
    /// are left untouched.
    ///
    /// # Errors
    /// * [`VaultError::Io`] If the file cannot be read.
    /// * [`VaultError::InvalidCiphertext`] If the file is shorter than a nonce.
    /// * [`VaultError::Decryption`] If the tag does not verify (wrong key or tampering).
    /// * [`VaultError::Unmarshal`] If the plaintext is not a snapshot map.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<(), VaultError> {
        let path = path.as_ref();
        let mut entries = self.inner.entries.write();

        let data = fs::read(path).context(format!("Failed to read snapshot: {}", path.display()))?;
        let restored = self.open_snapshot(&data).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "Snapshot rejected");
        })?;

        info!(path = %path.display(), entries = restored.len(), "Vault restored");
        Self::replace_entries(&mut entries, restored);
        Ok(())
    }

    /// Replaces the whole vault with the snapshot read from `reader`.
    ///
    /// # Errors
    /// Same as [`Vault::load_from_file`].
    pub fn load_from_reader(&self, mut reader: impl Read) -> Result<(), VaultError> {
        let mut entries = self.inner.entries.write();

        let mut data = Vec::new();
        reader.read_to_end(&mut data).context("Failed to read snapshot")?;
        let restored = self.open_snapshot(&data).inspect_err(|err| {
            warn!(error = %err, "Snapshot rejected");
        })?;

        info!(entries = restored.len(), "Vault restored");
        Self::replace_entries(&mut entries, restored);
        Ok(())
    }

    fn seal_snapshot(&self, entries: &Entries) -> Result<Vec<u8>, VaultError> {
        let canonical: BTreeMap<&str, &Vec<u8>> =
            entries.iter().map(|(key, blob)| (key.as_str(), blob)).collect();

        let plaintext = Zeroizing::new(S::encode(&canonical).context("Encoding snapshot")?);
        self.inner.cipher.seal(&plaintext).context("Sealing snapshot")
    }

    fn open_snapshot(&self, data: &[u8]) -> Result<Entries, VaultError> {
        let plaintext = Zeroizing::new(self.inner.cipher.open(data).context("Opening snapshot")?);
        S::decode(&plaintext).context("Decoding snapshot")
    }
}

fn create_owner_only(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        options.mode(SNAPSHOT_MODE);
        let file = options.open(path)?;
        file.set_permissions(fs::Permissions::from_mode(SNAPSHOT_MODE))?;
        Ok(file)
    }

    #[cfg(not(unix))]
    {
        options.open(path)
    }
}
