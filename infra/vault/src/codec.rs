//! # Value Codecs
//!
//! A [`Codec`] turns values into the canonical bytes that get sealed, and back.
//! Decoding is schema-directed: the caller names the destination type.
//!
//! * [`Postcard`] (default): compact binary, the same format the rest of the platform uses.
//!   The format is not self-describing. Decoding must consume every byte, which rejects a
//!   read through a narrower type, but two types with the same wire shape (a `u8` of `1`
//!   and `true`, say) still decode into each other.
//! * [`Json`]: self-describing text, stricter about field names and types.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::VaultError;

/// Canonical byte encoding for vault entries and snapshots.
pub trait Codec: Send + Sync + 'static {
    /// Short name used in logs.
    const NAME: &'static str;

    /// Encodes a value.
    ///
    /// # Errors
    /// Returns [`VaultError::Marshal`] if the value has unsupported structure.
    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, VaultError>;

    /// Decodes bytes into `T`.
    ///
    /// # Errors
    /// Returns [`VaultError::Unmarshal`] on malformed input or a schema mismatch.
    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, VaultError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Postcard;

impl Codec for Postcard {
    const NAME: &'static str = "postcard";

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, VaultError> {
        postcard::to_stdvec(value)
            .map_err(|err| VaultError::Marshal { message: err.to_string().into(), context: None })
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, VaultError> {
        let (value, rest) = postcard::take_from_bytes(bytes).map_err(|err| {
            VaultError::Unmarshal { message: err.to_string().into(), context: None }
        })?;

        if !rest.is_empty() {
            return Err(VaultError::Unmarshal {
                message: format!("{} trailing bytes after value", rest.len()).into(),
                context: None,
            });
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json;

impl Codec for Json {
    const NAME: &'static str = "json";

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, VaultError> {
        serde_json::to_vec(value)
            .map_err(|err| VaultError::Marshal { message: err.to_string().into(), context: None })
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, VaultError> {
        serde_json::from_slice(bytes)
            .map_err(|err| VaultError::Unmarshal { message: err.to_string().into(), context: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Record {
        id: u64,
        name: String,
    }

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Other {
        flag: bool,
        score: f64,
    }

    #[test]
    fn postcard_roundtrip() {
        let record = Record { id: 42, name: "Alice".into() };
        let bytes = Postcard::encode(&record).unwrap();

        assert_eq!(Postcard::decode::<Record>(&bytes).unwrap(), record);
    }

    #[test]
    fn json_roundtrip_is_text() {
        let record = Record { id: 42, name: "Alice".into() };
        let bytes = Json::encode(&record).unwrap();

        assert_eq!(bytes, br#"{"id":42,"name":"Alice"}"#);
        assert_eq!(Json::decode::<Record>(&bytes).unwrap(), record);
    }

    #[test]
    fn json_schema_mismatch_is_unmarshal() {
        let bytes = Json::encode(&Record { id: 1, name: "x".into() }).unwrap();
        let err = Json::decode::<Other>(&bytes).unwrap_err();

        assert!(matches!(err, VaultError::Unmarshal { .. }));
    }

    #[test]
    fn postcard_truncated_input_is_unmarshal() {
        let bytes = Postcard::encode(&Record { id: 1, name: "truncated".into() }).unwrap();
        let err = Postcard::decode::<Record>(&bytes[..bytes.len() - 3]).unwrap_err();

        assert!(matches!(err, VaultError::Unmarshal { .. }));
    }

    #[test]
    fn postcard_trailing_bytes_are_unmarshal() {
        let bytes = Postcard::encode(&Record { id: 42, name: "Alice".into() }).unwrap();

        let as_int = Postcard::decode::<u64>(&bytes).unwrap_err();
        assert!(matches!(as_int, VaultError::Unmarshal { .. }));
        assert!(as_int.to_string().contains("trailing bytes"));

        let mut padded = bytes.clone();
        padded.push(0);
        assert!(matches!(
            Postcard::decode::<Record>(&padded),
            Err(VaultError::Unmarshal { .. })
        ));
    }

    #[test]
    fn postcard_same_wire_shape_still_decodes() {
        let bytes = Postcard::encode(&1u8).unwrap();

        assert!(Postcard::decode::<bool>(&bytes).unwrap());
    }

    #[test]
    fn non_string_map_keys_fail_json_marshal() {
        let mut map = HashMap::new();
        map.insert(vec![1u8, 2], "value");
        let err = Json::encode(&map).unwrap_err();

        assert!(matches!(err, VaultError::Marshal { .. }));
    }
}
