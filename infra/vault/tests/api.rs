pub mod fixtures;

use fixtures::*;
use smem_vault::prelude::*;
use smem_vault::{KEY_LEN, NONCE_LEN, TAG_LEN, VaultBuilder};
use std::collections::BTreeMap;

#[vault_model]
enum Role {
    Admin,
    Guest { expires: u64 },
}

#[test]
fn put_get_user_roundtrip() {
    let vault = setup_vault();
    vault.put("user1", &alice()).expect("put failed");

    let recovered: User = vault.get("user1").expect("get failed");
    assert_eq!(recovered, alice());
}

#[test]
fn enums_and_collections_are_storable() {
    let vault = setup_vault();
    let roles = BTreeMap::from([
        ("ada".to_owned(), Role::Admin),
        ("bob".to_owned(), Role::Guest { expires: 1_700_000_000 }),
    ]);

    vault.put("roles", &roles).unwrap();

    assert_eq!(vault.get::<BTreeMap<String, Role>>("roles").unwrap(), roles);
}

#[test]
fn empty_key_is_a_valid_key() {
    let vault = setup_vault();
    vault.put("", &"anonymous".to_owned()).unwrap();

    assert!(vault.contains_key(""));
    assert_eq!(vault.get::<String>("").unwrap(), "anonymous");
}

#[test]
fn get_on_empty_vault_is_key_not_found() {
    let vault = setup_vault();

    let err = vault.get::<User>("user1").unwrap_err();
    assert!(matches!(err, VaultError::KeyNotFound { .. }));
    assert!(err.to_string().contains("user1"));
}

#[test]
fn len_tracks_distinct_keys() {
    let vault = setup_vault();
    assert!(vault.is_empty());

    vault.put("a", &1u8).unwrap();
    vault.put("b", &2u8).unwrap();
    vault.put("a", &3u8).unwrap();

    assert_eq!(vault.len(), 2);
}

#[test]
fn algorithm_agility_cha_cha() {
    let vault = Vault::<ChaCha>::builder().derived_key("key", "salt", "id").unwrap().build().unwrap();
    let config = SecureConfig { db_password: "super-secret".into(), api_key: "abc-123".into() };

    vault.put("config", &config).unwrap();

    assert_eq!(vault.get::<SecureConfig>("config").unwrap(), config);
}

#[test]
fn json_codec_vault_roundtrip() {
    let vault = VaultBuilder::<Aes>::new().key(fixed_key()).codec::<Json>().build().unwrap();
    vault.put("user1", &alice()).unwrap();

    assert_eq!(vault.get::<User>("user1").unwrap(), alice());
}

#[test]
fn type_mismatch_is_unmarshal() {
    let vault = Vault::<Aes, Json>::with_key(fixed_key()).unwrap();
    vault.put("config", &SecureConfig { db_password: "pw".into(), api_key: "k".into() }).unwrap();

    let err = vault.get::<User>("config").unwrap_err();
    assert!(matches!(err, VaultError::Unmarshal { .. }));
    assert!(!err.is_retryable());
}

#[vault_model]
#[allow(dead_code)]
struct UserId {
    id: u64,
}

#[test]
fn default_codec_rejects_value_read_as_smaller_type() {
    let vault = setup_vault();
    vault.put("user1", &alice()).unwrap();

    let err = vault.get::<u64>("user1").unwrap_err();
    assert!(matches!(err, VaultError::Unmarshal { .. }));
}

#[test]
fn default_codec_rejects_field_prefix_struct() {
    let vault = setup_vault();
    vault.put("user1", &alice()).unwrap();

    let err = vault.get::<UserId>("user1").unwrap_err();
    assert!(matches!(err, VaultError::Unmarshal { .. }));
    assert!(!err.is_retryable());
}

#[test]
fn hex_keys_survive_a_handoff() {
    let key = SecretKey::generate().unwrap();
    let encoded = key.to_hex();
    assert_eq!(encoded.len(), KEY_LEN * 2);

    let writer = Vault::<Aes>::with_key(key).unwrap();
    writer.put("user1", &alice()).unwrap();
    let mut snapshot = Vec::new();
    writer.persist_to_writer(&mut snapshot).unwrap();

    let reader = Vault::<Aes>::with_key(SecretKey::from_hex(&encoded).unwrap()).unwrap();
    reader.load_from_reader(snapshot.as_slice()).unwrap();
    assert_eq!(reader.get::<User>("user1").unwrap(), alice());
}

#[test]
fn snapshot_of_empty_vault_is_bare_envelope() {
    let vault = setup_vault();
    let mut snapshot = Vec::new();
    vault.persist_to_writer(&mut snapshot).unwrap();

    // postcard encodes an empty map as a single length byte
    assert_eq!(snapshot.len(), NONCE_LEN + 1 + TAG_LEN);
}

#[test]
fn error_context_is_attached() {
    let vault = setup_vault();
    let err = vault.get::<User>("ghost").context("Loading profile").unwrap_err();

    assert_eq!(err.to_string(), "Key not found (Loading profile): ghost");
}
