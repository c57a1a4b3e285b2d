use smem_vault::prelude::*;

#[vault_model]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[vault_model]
pub struct SecureConfig {
    pub db_password: String,
    pub api_key: String,
}

#[must_use]
pub fn alice() -> User {
    User { id: 42, name: "Alice".into(), email: "alice@example.com".into() }
}

/// Deterministic key shared by a writer and a later reader.
#[must_use]
pub fn fixed_key() -> SecretKey {
    SecretKey::derive("master-secret-123", "unique-salt", "integration").expect("HKDF failed")
}

/// Initializes a Vault instance with a fixed derived key for testing.
/// # Panics
/// * If Vault setup fails, the function will panic.
#[must_use]
pub fn setup_vault() -> Vault {
    Vault::with_key(fixed_key()).expect("Vault setup failed")
}
