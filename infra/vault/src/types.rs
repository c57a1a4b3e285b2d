use aead::{AeadInOut, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

// --- Aliases ---

pub type Aes = Aes256Gcm;
pub type ChaCha = ChaCha20Poly1305;

/// AEAD algorithms the vault can be instantiated with.
pub trait VaultCipher: AeadInOut + KeyInit + Send + Sync + 'static {}
impl<T: AeadInOut + KeyInit + Send + Sync + 'static> VaultCipher for T {}

// --- Envelope constants ---

/// Symmetric key length (256-bit).
pub const KEY_LEN: usize = 32;

/// AEAD nonce length (96-bit).
pub const NONCE_LEN: usize = 12;

/// AEAD tag length (128-bit).
pub const TAG_LEN: usize = 16;

// --- Values ---

/// Capability of a type to be stored in the vault.
///
/// Implemented explicitly: use `#[vault_model]` on your own structs and enums, or
/// write `impl VaultValue for MyType {}` next to hand-written serde impls.
/// Decoding is directed by the requested type, so `get::<T>` only succeeds when the
/// stored bytes decode as `T`.
pub trait VaultValue: Serialize + DeserializeOwned {}

macro_rules! impl_vault_value {
    ($($ty:ty),* $(,)?) => {
        $(impl VaultValue for $ty {})*
    };
}

impl_vault_value!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, String,
    ()
);

impl<T: VaultValue> VaultValue for Vec<T> {}
impl<T: VaultValue> VaultValue for Option<T> {}
impl<T: VaultValue> VaultValue for Box<T> {}
impl<T: VaultValue + Ord> VaultValue for BTreeSet<T> {}
impl<K: VaultValue + Ord, V: VaultValue> VaultValue for BTreeMap<K, V> {}
impl<T, S> VaultValue for HashSet<T, S>
where
    T: VaultValue + Eq + Hash,
    S: BuildHasher + Default,
{
}
impl<K, V, S> VaultValue for HashMap<K, V, S>
where
    K: VaultValue + Eq + Hash,
    V: VaultValue,
    S: BuildHasher + Default,
{
}
impl<A: VaultValue, B: VaultValue> VaultValue for (A, B) {}
impl<A: VaultValue, B: VaultValue, C: VaultValue> VaultValue for (A, B, C) {}
