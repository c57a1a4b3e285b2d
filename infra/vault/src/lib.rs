//! A thread-safe, in-memory vault that keeps every value encrypted at rest.
//!
//! Values are encoded with a schema-directed [`Codec`] and sealed individually with an AEAD
//! primitive under one 256-bit key. Plaintext only exists transiently inside [`Vault::put`]
//! and [`Vault::get`], and those buffers are zeroed before they are released.
//!
//! ## Envelope Format
//!
//! Every sealed blob, whether a single entry or a whole snapshot, has the same layout:
//!
//! ```text
//! [NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! There is no header, no version byte and no associated data. A blob is only meaningful to
//! a vault holding the key that sealed it.
//!
//! ## Nonce Policy
//!
//! Every seal draws a fresh **random 96-bit nonce** from the operating system. This is the
//! usual approach for `AES-GCM` and `ChaCha20Poly1305`, but it is probabilistic: rotate keys
//! well before 2^32 seals under one key.
//!
//! ## Snapshots
//!
//! [`Vault::persist_to_file`] writes the whole map as one sealed blob and
//! [`Vault::load_from_file`] replaces the map with it. Entries inside a snapshot stay sealed,
//! so data on disk is encrypted twice. A random-key vault cannot restore its snapshots in a
//! later process; use [`Vault::with_key`] or the [`VaultBuilder`] for that.
//!
//! ## Examples
//!
//! ### Basic Usage via Prelude
//! ```rust
//! use smem_vault::prelude::*;
//!
//! #[vault_model]
//! struct UserProfile {
//!     id: u64,
//!     name: String,
//! }
//!
//! # fn main() -> Result<(), VaultError> {
//! let vault = Vault::<Aes>::builder()
//!     .derived_key("master-secret", "salt", "profiles")?
//!     .build()?;
//!
//! let profile = UserProfile { id: 42, name: "Ada".into() };
//! vault.put("profile", &profile)?;
//!
//! let mut snapshot = Vec::new();
//! vault.persist_to_writer(&mut snapshot)?;
//!
//! let restored = Vault::<Aes>::builder()
//!     .derived_key("master-secret", "salt", "profiles")?
//!     .build()?;
//! restored.load_from_reader(snapshot.as_slice())?;
//!
//! assert_eq!(restored.get::<UserProfile>("profile")?, profile);
//! # Ok(())
//! # }
//! ```

extern crate self as smem_vault;

mod builder;
mod cipher;
mod codec;
mod engine;
mod error;
mod key;
mod persist;
mod types;

pub use builder::{NoKey, VaultBuilder, WithKey};
pub use cipher::AeadCipher;
pub use codec::{Codec, Json, Postcard};
pub use engine::Vault;
pub use error::{VaultError, VaultErrorExt};
pub use key::SecretKey;
pub use serde;
pub use smem_derive::vault_model;
pub use types::{KEY_LEN, NONCE_LEN, TAG_LEN, VaultValue};

pub mod prelude {
    pub use crate::codec::{Codec, Json, Postcard};
    pub use crate::engine::Vault;
    pub use crate::error::{VaultError, VaultErrorExt};
    pub use crate::key::SecretKey;
    pub use crate::types::{Aes, ChaCha, VaultValue};
    pub use smem_derive::vault_model;
}

pub mod algorithms {
    pub use crate::types::{Aes, ChaCha, VaultCipher};
}
