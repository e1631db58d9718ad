//! Unified error types for the SDK.

use std::path::PathBuf;

use solana_client::client_error::ClientError;
use solana_pubkey::Pubkey;
use thiserror::Error;

use crate::shared::scaling::ScalingError;

/// Unified SDK error type.
#[derive(Debug, Error)]
pub enum SdkError {
    /// RPC transport or cluster error
    #[error("RPC error: {0}")]
    Rpc(#[from] ClientError),

    /// Identity file could not be read or written
    #[error("identity file error at {path}: {source}")]
    IdentityIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Identity file exists but holds unusable content
    #[error("corrupt identity file at {path}: {reason}")]
    IdentityCorrupt { path: PathBuf, reason: String },

    /// Faucet credit was requested but never confirmed
    #[error("faucet credit {signature} unconfirmed after {attempts} polls")]
    FaucetUnconfirmed { signature: String, attempts: u32 },

    /// Metadata record already exists at the derived address
    #[error("metadata record already exists at {0}")]
    MetadataAlreadyExists(Pubkey),

    /// Metadata record not found for the mint
    #[error("no metadata record at {0}")]
    MetadataNotFound(Pubkey),

    /// Account data shorter than the decoded layout requires
    #[error("invalid data length: expected at least {expected} bytes, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },

    /// Serialization or deserialization failure
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Metadata field validation failure
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Instruction construction failure
    #[error("instruction error: {0}")]
    Instruction(String),

    /// Invalid public key string
    #[error("invalid pubkey: {0}")]
    InvalidPubkey(String),

    /// Token amount scaling failure
    #[error("scaling error: {0}")]
    Scaling(#[from] ScalingError),

    /// Arithmetic overflow
    #[error("arithmetic overflow")]
    Overflow,
}

/// Result type alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;
