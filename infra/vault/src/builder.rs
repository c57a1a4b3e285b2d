use crate::codec::{Codec, Postcard};
use crate::engine::Vault;
use crate::error::VaultError;
use crate::key::SecretKey;
use crate::types::{Aes, VaultCipher};
use private::Sealed;
use std::fmt;
use std::marker::PhantomData;

/// Typestate: no key supplied yet.
#[derive(Debug, Default)]
pub struct NoKey;

/// Typestate: key supplied, ready to build.
#[derive(Debug)]
pub struct WithKey(SecretKey);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoKey {}
impl Sealed for WithKey {}

/// A builder for secure initialization of the [`Vault`].
///
/// `build` is only available once a key has been supplied. The key is moved into the
/// builder and zeroed when the builder (or the vault built from it) is dropped.
#[allow(private_bounds)]
pub struct VaultBuilder<C: VaultCipher = Aes, S: Codec = Postcard, K: Sealed = NoKey> {
    _cipher: PhantomData<C>,
    _codec: PhantomData<S>,
    key: K,
}

#[allow(private_bounds)]
impl<C: VaultCipher, S: Codec, K: Sealed + fmt::Debug> fmt::Debug for VaultBuilder<C, S, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultBuilder")
            .field("cipher", &std::any::type_name::<C>())
            .field("codec", &S::NAME)
            .field("key", &self.key)
            .finish()
    }
}

impl<C: VaultCipher, S: Codec> Default for VaultBuilder<C, S> {
    fn default() -> Self {
        Self { _cipher: PhantomData, _codec: PhantomData, key: NoKey }
    }
}

impl<C: VaultCipher, S: Codec> VaultBuilder<C, S> {
    /// Creates a new empty builder.
    #[must_use = "Builder must be given a key before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh random key.
    ///
    /// # Errors
    /// Returns [`VaultError::KeyGeneration`] if the random source is unavailable.
    pub fn random_key(self) -> Result<VaultBuilder<C, S, WithKey>, VaultError> {
        Ok(self.key(SecretKey::generate()?))
    }

    /// Uses a caller-supplied key.
    #[must_use]
    pub fn key(self, key: SecretKey) -> VaultBuilder<C, S, WithKey> {
        VaultBuilder { _cipher: PhantomData, _codec: PhantomData, key: WithKey(key) }
    }

    /// Copies a raw 32-byte key.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidKey`] unless `bytes` is exactly 32 bytes.
    pub fn key_bytes(self, bytes: &[u8]) -> Result<VaultBuilder<C, S, WithKey>, VaultError> {
        Ok(self.key(SecretKey::from_slice(bytes)?))
    }

    /// Derives the key using HKDF-SHA256.
    ///
    /// # Arguments
    /// * `ikm`: Input Keying Material (Master Password/Secret).
    /// * `salt`: Uniquifies keys across different environments.
    /// * `info`: Binds the key to a specific purpose or identity.
    ///
    /// # Errors
    /// Returns [`VaultError::KeyGeneration`] if key derivation fails.
    pub fn derived_key(
        self,
        ikm: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
        info: impl AsRef<[u8]>,
    ) -> Result<VaultBuilder<C, S, WithKey>, VaultError> {
        Ok(self.key(SecretKey::derive(ikm, salt, info)?))
    }
}

#[allow(private_bounds)]
impl<C: VaultCipher, S: Codec, K: Sealed> VaultBuilder<C, S, K> {
    /// Switches the value codec.
    ///
    /// # Results
    /// Returns the builder with its key state preserved.
    #[must_use]
    pub fn codec<N: Codec>(self) -> VaultBuilder<C, N, K> {
        VaultBuilder { _cipher: PhantomData, _codec: PhantomData, key: self.key }
    }
}

impl<C: VaultCipher, S: Codec> VaultBuilder<C, S, WithKey> {
    /// Finalizes vault construction. The key is consumed and zeroed.
    ///
    /// # Results
    /// Returns an empty [`Vault`].
    ///
    /// # Errors
    /// Returns [`VaultError::CipherInit`] if the primitive rejects the key.
    pub fn build(self) -> Result<Vault<C, S>, VaultError> {
        let cipher = self.key.0.cipher::<C>()?;
        Ok(Vault::from_cipher(cipher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Json;
    use crate::types::ChaCha;

    #[test]
    fn builder_requires_key_then_builds() {
        let vault = VaultBuilder::<Aes>::new().random_key().unwrap().build().unwrap();
        assert!(vault.is_empty());
    }

    #[test]
    fn derived_keys_open_each_other() {
        let writer = Vault::<ChaCha>::builder()
            .derived_key("master", "salt", "vault")
            .unwrap()
            .build()
            .unwrap();
        writer.put("answer", &42u32).unwrap();

        let mut snapshot = Vec::new();
        writer.persist_to_writer(&mut snapshot).unwrap();

        let reader = Vault::<ChaCha>::builder()
            .derived_key("master", "salt", "vault")
            .unwrap()
            .build()
            .unwrap();
        reader.load_from_reader(snapshot.as_slice()).unwrap();
        assert_eq!(reader.get::<u32>("answer").unwrap(), 42);
    }

    #[test]
    fn key_bytes_rejects_short_input() {
        let err = VaultBuilder::<Aes>::new().key_bytes(&[1u8; 16]).unwrap_err();
        assert!(matches!(err, VaultError::InvalidKey { .. }));
    }

    #[test]
    fn codec_switch_keeps_key() {
        let vault: Vault<Aes, Json> = VaultBuilder::<Aes>::new()
            .key(SecretKey::from_bytes([3u8; 32]))
            .codec::<Json>()
            .build()
            .unwrap();
        vault.put("flag", &true).unwrap();

        assert!(vault.get::<bool>("flag").unwrap());
    }

    #[test]
    fn debug_redacts_key() {
        let builder = VaultBuilder::<Aes>::new().key(SecretKey::from_bytes([0xCD; 32]));
        let rendered = format!("{builder:?}");

        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("postcard"));
    }
}
