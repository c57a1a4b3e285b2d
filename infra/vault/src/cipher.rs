//! # AEAD Envelope
//!
//! Every seal operation produces a self-contained blob:
//!
//! ```text
//! [NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! No associated data is bound. The nonce is drawn from the OS CSPRNG on every call,
//! so a key never encrypts twice under the same nonce (with overwhelming probability).

use aead::inout::InOutBuf;
use aead::{Nonce, Tag};
use getrandom::fill;
use std::any::type_name;
use std::fmt;
use zeroize::Zeroize;

use crate::error::VaultError;
use crate::key::SecretKey;
use crate::types::{Aes, NONCE_LEN, TAG_LEN, VaultCipher};

/// An AEAD primitive keyed once and used for every seal/open of a vault.
pub struct AeadCipher<C: VaultCipher = Aes> {
    inner: C,
}

impl<C: VaultCipher> fmt::Debug for AeadCipher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadCipher").field("algorithm", &type_name::<C>()).finish_non_exhaustive()
    }
}

impl<C: VaultCipher> AeadCipher<C> {
    /// Keys the AEAD primitive.
    ///
    /// # Errors
    /// Returns [`VaultError::CipherInit`] if the primitive rejects the key.
    pub fn new(key: &SecretKey) -> Result<Self, VaultError> {
        let inner = C::new_from_slice(key.expose()).map_err(|_| VaultError::CipherInit {
            message: format!("{} rejected a {}-byte key", type_name::<C>(), key.expose().len())
                .into(),
            context: None,
        })?;
        Ok(Self { inner })
    }

    fn next_nonce() -> Result<Nonce<C>, VaultError> {
        let mut nonce = Nonce::<C>::default();
        fill(&mut nonce).map_err(|err| VaultError::NonceGeneration {
            message: err.to_string().into(),
            context: Some("System RNG unavailable".into()),
        })?;
        Ok(nonce)
    }

    /// Encrypts `plaintext` under a fresh nonce.
    ///
    /// # Results
    /// Returns `nonce || ciphertext || tag`.
    ///
    /// # Errors
    /// * [`VaultError::NonceGeneration`] If the random source is unavailable.
    /// * [`VaultError::Encryption`] If the plaintext exceeds the algorithm limit.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, VaultError> {
        let nonce = Self::next_nonce()?;

        let mut buf = Vec::with_capacity(NONCE_LEN + plaintext.len() + TAG_LEN);
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(plaintext);

        let in_out = InOutBuf::from(&mut buf[NONCE_LEN..]);
        let tag = match self.inner.encrypt_inout_detached(&nonce, &[], in_out) {
            Ok(tag) => tag,
            Err(_) => {
                buf.zeroize();
                return Err(VaultError::Encryption {
                    message: "AEAD encryption failed".into(),
                    context: Some(format!("plaintext of {} bytes", plaintext.len()).into()),
                });
            },
        };

        buf.extend_from_slice(tag.as_slice());
        Ok(buf)
    }

    /// Verifies and decrypts a blob produced by [`AeadCipher::seal`].
    ///
    /// # Errors
    /// * [`VaultError::InvalidCiphertext`] If the blob is shorter than the nonce.
    /// * [`VaultError::Decryption`] If the tag does not verify (tampering or wrong key).
    pub fn open(&self, blob: &[u8]) -> Result<Vec<u8>, VaultError> {
        if blob.len() < NONCE_LEN {
            return Err(VaultError::InvalidCiphertext {
                message: format!(
                    "Sealed blob too short ({} bytes), expected at least {NONCE_LEN}",
                    blob.len()
                )
                .into(),
                context: None,
            });
        }

        let (nonce_slice, rest) = blob.split_at(NONCE_LEN);
        if rest.len() < TAG_LEN {
            return Err(VaultError::Decryption {
                message: "AEAD authentication failed".into(),
                context: Some("no room for an authentication tag".into()),
            });
        }
        let (ciphertext, tag_slice) = rest.split_at(rest.len() - TAG_LEN);

        let nonce: Nonce<C> = nonce_slice.try_into().map_err(|_| VaultError::InvalidCiphertext {
            message: "Invalid nonce length".into(),
            context: None,
        })?;
        let tag: Tag<C> = tag_slice.try_into().map_err(|_| VaultError::Decryption {
            message: "Invalid tag length".into(),
            context: None,
        })?;

        let mut buf = ciphertext.to_vec();
        let in_out = InOutBuf::from(&mut buf[..]);

        if self.inner.decrypt_inout_detached(&nonce, &[], in_out, &tag).is_err() {
            buf.zeroize();
            return Err(VaultError::Decryption {
                message: "AEAD authentication failed".into(),
                context: None,
            });
        }

        Ok(buf)
    }
}
