//! Durable local signing identity with create-or-load semantics.
//!
//! The payer keypair is persisted as a JSON array of integers (the raw
//! 64-byte secret key) so that repeated runs reuse the same funded identity.
//! The serialization is versionless and matches the format written by the
//! common web3 tooling, so a keypair file is interchangeable between both.
//!
//! A corrupt file is a hard error: the store never generates a fresh
//! identity over an existing file, readable or not.
//!
//! Known limitation: there is no file locking. Concurrent runs against the
//! same identity file are unsafe.

use std::path::Path;

use solana_keypair::Keypair;
use tracing::info;

use crate::error::{SdkError, SdkResult};

/// Length of a serialized secret key (ed25519 seed + public key).
pub const SECRET_KEY_LEN: usize = 64;

/// Load the keypair at `path`, or generate and persist a new one if the file
/// does not exist.
///
/// Calling this twice against the same path yields bit-identical secret
/// bytes both times.
pub fn load_or_create(path: impl AsRef<Path>) -> SdkResult<Keypair> {
    let path = path.as_ref();
    if path.exists() {
        load(path)
    } else {
        let keypair = Keypair::new();
        save(&keypair, path)?;
        info!(path = %path.display(), "generated new identity");
        Ok(keypair)
    }
}

/// Load a keypair from a secret-key file.
///
/// Fails fast on unreadable files and on files whose content is not a
/// 64-integer JSON array holding valid key material.
pub fn load(path: impl AsRef<Path>) -> SdkResult<Keypair> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SdkError::IdentityIo {
        path: path.to_path_buf(),
        source,
    })?;

    let bytes: Vec<u8> = serde_json::from_str(&raw).map_err(|e| SdkError::IdentityCorrupt {
        path: path.to_path_buf(),
        reason: format!("not a JSON byte array: {e}"),
    })?;

    if bytes.len() != SECRET_KEY_LEN {
        return Err(SdkError::IdentityCorrupt {
            path: path.to_path_buf(),
            reason: format!("expected {SECRET_KEY_LEN} bytes, got {}", bytes.len()),
        });
    }

    Keypair::try_from(bytes.as_slice()).map_err(|e| SdkError::IdentityCorrupt {
        path: path.to_path_buf(),
        reason: format!("invalid key material: {e}"),
    })
}

/// Serialize the keypair's secret bytes as a JSON array of integers,
/// overwriting `path`.
pub fn save(keypair: &Keypair, path: impl AsRef<Path>) -> SdkResult<()> {
    let path = path.as_ref();
    let bytes = keypair.to_bytes().to_vec();
    let json = serde_json::to_string(&bytes).map_err(|e| SdkError::Serialization(e.to_string()))?;
    std::fs::write(path, json).map_err(|source| SdkError::IdentityIo {
        path: path.to_path_buf(),
        source,
    })
}
