use smem_demo::{CodecKind, DemoConfig, User, run};
use smem_vault::prelude::*;
use tempfile::tempdir;

const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

#[test]
fn json_snapshot_opens_with_the_configured_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vault.json.bin");
    let config = DemoConfig {
        key_hex: Some(KEY_HEX.into()),
        snapshot: Some(path.clone()),
        codec: CodecKind::Json,
        ..DemoConfig::default()
    };

    let report = run(&config).unwrap();
    assert_eq!(report.recovered, User::alice());
    assert_eq!(report.restored, Some(User::alice()));

    let reader = Vault::<Aes, Json>::with_key(SecretKey::from_hex(KEY_HEX).unwrap()).unwrap();
    reader.load_from_file(&path).unwrap();
    assert_eq!(reader.get::<User>("user1").unwrap(), User::alice());
}

#[test]
fn codec_mismatch_between_writer_and_reader_is_unmarshal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vault.bin");
    let config = DemoConfig {
        key_hex: Some(KEY_HEX.into()),
        snapshot: Some(path.clone()),
        ..DemoConfig::default()
    };
    run(&config).unwrap();

    let reader = Vault::<Aes, Json>::with_key(SecretKey::from_hex(KEY_HEX).unwrap()).unwrap();
    let err = reader.load_from_file(&path).unwrap_err();

    assert!(matches!(err, VaultError::Unmarshal { .. }));
    assert!(reader.is_empty());
}
