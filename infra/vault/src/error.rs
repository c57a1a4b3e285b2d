//! # Vault Errors
//!
//! This module defines the [`VaultError`] enum used throughout the vault crate for
//! reporting key management, cryptographic, encoding, lookup and I/O failures.
//!
//! Every operation returns these errors to its immediate caller. The vault never
//! retries internally and never falls back to treating data as plaintext.

use std::borrow::Cow;

/// A specialized [`VaultError`] enum for vault-related failures.
#[smem_derive::smem_error]
pub enum VaultError {
    /// The system random source could not produce key material.
    #[error("Key generation error{}: {message}", format_context(.context))]
    KeyGeneration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Caller-supplied key material has the wrong length or encoding.
    #[error("Invalid key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The AEAD primitive rejected the key during construction.
    #[error("Cipher initialization error{}: {message}", format_context(.context))]
    CipherInit { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The system random source could not produce a nonce.
    #[error("Nonce generation error{}: {message}", format_context(.context))]
    NonceGeneration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The AEAD primitive refused to encrypt (plaintext exceeds the algorithm limit).
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A value could not be encoded by the codec.
    #[error("Marshal error{}: {message}", format_context(.context))]
    Marshal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Decrypted bytes do not match the requested type.
    #[error("Unmarshal error{}: {message}", format_context(.context))]
    Unmarshal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A sealed blob is shorter than the nonce.
    #[error("Invalid ciphertext{}: {message}", format_context(.context))]
    InvalidCiphertext { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Authentication tag verification failed.
    ///
    /// Covers both tampered data and a key that differs from the sealing key.
    /// Retrying with the same inputs cannot succeed.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No entry exists for the requested logical key.
    #[error("Key not found{}: {message}", format_context(.context))]
    KeyNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Reading or writing a snapshot failed.
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

impl VaultError {
    /// Returns `true` when retrying the same call may succeed.
    ///
    /// Only random-source exhaustion and I/O failures qualify. Authentication
    /// failures are deterministic and retrying them could mask tampering.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::KeyGeneration { .. } | Self::NonceGeneration { .. } | Self::Io { .. })
    }
}
