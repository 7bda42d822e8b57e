//! CLI token issuing and hashing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use planr_core::db::{CliToken, NewCliToken};
use planr_core::Database;
use sha2::{Digest, Sha256};
use tracing::info;

/// Generate a random 32-byte key and return as base64
pub fn generate_raw_key() -> String {
    let key: [u8; 32] = rand::random();
    STANDARD.encode(key)
}

/// Hash a key using SHA-256 and return as hex
pub fn hash_key(raw_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Create a token for `user_id` in `org_id`. Returns the row and the raw key,
/// which is shown once and never stored.
pub fn issue_token(
    db: &Database,
    user_id: &str,
    org_id: &str,
    name: &str,
) -> planr_core::Result<(CliToken, String)> {
    let raw_key = generate_raw_key();
    let token_hash = hash_key(&raw_key);

    let token = db.create_cli_token(&NewCliToken {
        user_id,
        org_id,
        name,
        token_hash: &token_hash,
    })?;

    info!(
        "Issued CLI token '{}' for user {} in org {}",
        name, user_id, org_id
    );
    Ok((token, raw_key))
}
