//! # Key Management
//!
//! [`SecretKey`] owns the 256-bit symmetric key of a vault. It is not `Clone` or
//! `Copy`, its `Debug` output is redacted, and its bytes are zeroed when it is dropped.

use crate::cipher::AeadCipher;
use crate::error::VaultError;
use crate::types::{KEY_LEN, VaultCipher};
use getrandom::fill;
use hkdf::Hkdf;
use sha2::Sha256;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// 32 bytes of secret key material.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; KEY_LEN],
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl SecretKey {
    const fn zeroed() -> Self {
        Self { bytes: [0u8; KEY_LEN] }
    }

    /// Draws a fresh key from the operating system CSPRNG.
    ///
    /// # Errors
    /// Returns [`VaultError::KeyGeneration`] if the random source is unavailable.
    pub fn generate() -> Result<Self, VaultError> {
        let mut key = Self::zeroed();
        fill(&mut key.bytes).map_err(|err| VaultError::KeyGeneration {
            message: err.to_string().into(),
            context: Some("System RNG unavailable".into()),
        })?;
        Ok(key)
    }

    /// Takes ownership of raw key bytes. The caller's copy is zeroed.
    #[must_use]
    pub fn from_bytes(mut bytes: [u8; KEY_LEN]) -> Self {
        let key = Self { bytes };
        bytes.zeroize();
        key
    }

    /// Copies key material out of a slice.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidKey`] unless the slice is exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VaultError> {
        if bytes.len() != KEY_LEN {
            return Err(VaultError::InvalidKey {
                message: format!("Invalid key length {}, must be {KEY_LEN} bytes", bytes.len())
                    .into(),
                context: None,
            });
        }

        let mut key = Self::zeroed();
        key.bytes.copy_from_slice(bytes);
        Ok(key)
    }

    /// Parses a 64-character hexadecimal key.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidKey`] on malformed hex or a wrong decoded length.
    pub fn from_hex(encoded: &str) -> Result<Self, VaultError> {
        let decoded = Zeroizing::new(hex::decode(encoded.trim()).map_err(|err| {
            VaultError::InvalidKey { message: err.to_string().into(), context: Some("hex".into()) }
        })?);
        Self::from_slice(&decoded)
    }

    /// Derives a key with HKDF-SHA256.
    ///
    /// # Arguments
    /// * `ikm`: Input keying material (master secret).
    /// * `salt`: Uniquifies keys across environments.
    /// * `info`: Binds the key to a purpose or identity.
    ///
    /// # Errors
    /// Returns [`VaultError::KeyGeneration`] if HKDF expansion fails.
    pub fn derive(
        ikm: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
        info: impl AsRef<[u8]>,
    ) -> Result<Self, VaultError> {
        let hk = Hkdf::<Sha256>::new(Some(salt.as_ref()), ikm.as_ref());
        let mut key = Self::zeroed();
        hk.expand(info.as_ref(), &mut key.bytes).map_err(|_| VaultError::KeyGeneration {
            message: "HKDF expansion failed".into(),
            context: None,
        })?;
        Ok(key)
    }

    /// Hex encoding of the key, zeroed on drop.
    ///
    /// Meant for handing the key to a later process that restores a snapshot.
    /// Never log the result.
    #[must_use]
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.bytes))
    }

    /// Builds the AEAD context for this key.
    ///
    /// # Errors
    /// Returns [`VaultError::CipherInit`] if the primitive rejects the key.
    pub fn cipher<C: VaultCipher>(&self) -> Result<AeadCipher<C>, VaultError> {
        AeadCipher::new(self)
    }

    pub(crate) const fn expose(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
