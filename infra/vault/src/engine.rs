use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::builder::VaultBuilder;
use crate::cipher::AeadCipher;
use crate::codec::{Codec, Postcard};
use crate::error::{VaultError, VaultErrorExt};
use crate::key::SecretKey;
use crate::types::{Aes, VaultCipher, VaultValue};

/// Logical key → sealed blob (`nonce || ciphertext || tag`).
pub(crate) type Entries = HashMap<String, Vec<u8>>;

pub(crate) struct VaultInner<C: VaultCipher, S: Codec> {
    pub(crate) cipher: AeadCipher<C>,
    pub(crate) entries: RwLock<Entries>,
    _codec: PhantomData<S>,
}

/// A thread-safe, in-memory store of individually sealed values.
///
/// Every value is encoded with the codec `S` and sealed with the AEAD `C` before it is
/// kept in memory. The vault wraps its state in an [`Arc`], so clones are cheap and share
/// one map and one key.
///
/// ### Lock discipline
/// One read-write lock guards the whole map:
/// * [`Vault::put`] and [`Vault::load_from_file`] hold it exclusively for the entire
///   encode+seal or read+open+decode, so readers never observe a half-written entry.
/// * [`Vault::get`] and [`Vault::persist_to_file`] hold it shared and may run together.
///
/// There is no timeout. A caller that needs bounded latency must wrap the call.
///
/// ### Generic Parameters
/// * `C`: The AEAD algorithm. Defaults to [`Aes`] (AES-256-GCM).
/// * `S`: The value codec. Defaults to [`Postcard`].
///
/// ### Example
/// ```rust
/// use smem_vault::prelude::*;
///
/// #[vault_model]
/// struct User {
///     id: u64,
///     name: String,
///     email: String,
/// }
///
/// # fn main() -> Result<(), VaultError> {
/// let vault = Vault::<Aes>::new()?;
/// let user = User { id: 42, name: "Alice".into(), email: "alice@example.com".into() };
///
/// vault.put("user1", &user)?;
/// let recovered: User = vault.get("user1")?;
/// assert_eq!(user, recovered);
/// # Ok(())
/// # }
/// ```
pub struct Vault<C = Aes, S = Postcard>
where
    C: VaultCipher,
    S: Codec,
{
    pub(crate) inner: Arc<VaultInner<C, S>>,
}

impl<C: VaultCipher, S: Codec> Clone for Vault<C, S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C: VaultCipher, S: Codec> fmt::Debug for Vault<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vault")
            .field("cipher", &self.inner.cipher)
            .field("codec", &S::NAME)
            .field("entries", &self.len())
            .finish()
    }
}

impl<C, S> Vault<C, S>
where
    C: VaultCipher,
    S: Codec,
{
    /// Returns a new [`VaultBuilder`] to configure the vault.
    #[must_use]
    pub fn builder() -> VaultBuilder<C, S> {
        VaultBuilder::new()
    }

    /// Creates an empty vault under a freshly generated random key.
    ///
    /// The key never leaves the vault, so snapshots written by this vault can only be
    /// restored by this vault (or its clones). Use [`Vault::with_key`] when snapshots
    /// must outlive the process.
    ///
    /// # Errors
    /// * [`VaultError::KeyGeneration`] If the random source is unavailable.
    /// * [`VaultError::CipherInit`] If the primitive rejects the key.
    pub fn new() -> Result<Self, VaultError> {
        Self::builder().random_key()?.build()
    }

    /// Creates an empty vault under a caller-supplied key.
    ///
    /// # Errors
    /// Returns [`VaultError::CipherInit`] if the primitive rejects the key.
    pub fn with_key(key: SecretKey) -> Result<Self, VaultError> {
        Self::builder().key(key).build()
    }

    pub(crate) fn from_cipher(cipher: AeadCipher<C>) -> Self {
        Self {
            inner: Arc::new(VaultInner {
                cipher,
                entries: RwLock::new(Entries::new()),
                _codec: PhantomData,
            }),
        }
    }

    /// Encodes, seals and stores `value` under `key`, overwriting any previous entry.
    ///
    /// # Errors
    /// * [`VaultError::Marshal`] If the value cannot be encoded.
    /// * [`VaultError::NonceGeneration`] If the random source is unavailable.
    ///
    /// The store is unchanged when an error is returned.
    pub fn put<T: VaultValue>(&self, key: impl Into<String>, value: &T) -> Result<(), VaultError> {
        let key = key.into();
        let mut entries = self.inner.entries.write();

        let plaintext = Zeroizing::new(S::encode(value).context("Encoding value")?);
        let blob = self.inner.cipher.seal(&plaintext).context("Sealing value")?;

        trace!(key = %key, bytes = blob.len(), "Entry sealed");
        entries.insert(key, blob);
        Ok(())
    }

    /// Opens and decodes the value stored under `key`.
    ///
    /// # Errors
    /// * [`VaultError::KeyNotFound`] If there is no entry for `key`.
    /// * [`VaultError::InvalidCiphertext`] If the stored blob is shorter than a nonce.
    /// * [`VaultError::Decryption`] If the tag does not verify.
    /// * [`VaultError::Unmarshal`] If the plaintext does not decode as `T`.
    pub fn get<T: VaultValue>(&self, key: &str) -> Result<T, VaultError> {
        let plaintext = {
            let entries = self.inner.entries.read();
            let blob = entries.get(key).ok_or_else(|| VaultError::KeyNotFound {
                message: key.to_owned().into(),
                context: None,
            })?;
            Zeroizing::new(self.inner.cipher.open(blob)?)
        };

        trace!(key = %key, "Entry opened");
        S::decode(&plaintext)
    }

    /// Returns `true` if an entry exists for `key`. Does not decrypt it.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.entries.read().contains_key(key)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    pub(crate) fn replace_entries(entries: &mut Entries, restored: Entries) {
        debug!(previous = entries.len(), restored = restored.len(), "Vault entries replaced");
        *entries = restored;
    }
}
