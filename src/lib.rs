//! # mintsmith
//!
//! Devnet SPL token provisioning: durable payer identity, mint creation,
//! associated-account resolution, supply minting, and Metaplex metadata.
//!
//! ## Modules
//!
//! - [`identity`]: load-or-create keypair persistence for the payer role
//! - [`program`]: on-chain interaction: constants, PDAs, instructions,
//!   account decoding, and the [`program::TokenClient`] RPC wrapper
//! - [`provision`]: the sequential provisioning flow
//! - [`config`]: one parameterized configuration for the whole flow
//! - [`shared`]: token amount scaling utilities
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mintsmith::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> SdkResult<()> {
//!     let payer = identity::load_or_create("payer-keypair.json")?;
//!     let config = ProvisionConfig::devnet();
//!     let client = TokenClient::new(&config.rpc_endpoint);
//!
//!     let report = provision_token(&client, &payer, &config).await?;
//!     println!("mint: {} supply: {}", report.mint, report.supply);
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Durable local signing identity with create-or-load semantics.
pub mod identity;

/// On-chain program interaction: constants, PDAs, instructions, accounts,
/// and the RPC client.
pub mod program;

/// The sequential token provisioning flow.
pub mod provision;

/// Provisioning flow configuration.
pub mod config;

/// Shared utilities (token amount scaling).
pub mod shared;

/// Network URL constants.
pub mod network;

/// Unified SDK error types.
pub mod error;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{
        MetadataStep, ProvisionConfig, DEFAULT_TOKEN_NAME, DEFAULT_TOKEN_SYMBOL, DEFAULT_TOKEN_URI,
    };
    pub use crate::error::{SdkError, SdkResult};
    pub use crate::identity;
    pub use crate::network::{explorer_address_url, DEVNET_RPC_URL};
    pub use crate::program::{
        get_associated_token_address, get_canonical_metadata_pda, get_metadata_pda, Collection,
        Creator, MetadataDescriptor, MetadataUpdate, TokenClient, TokenMetadata, Uses,
        DEFAULT_DECIMALS, LAMPORTS_PER_SOL, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
    };
    pub use crate::provision::{provision_token, ProvisionReport};
    pub use crate::shared::scaling::{format_token_amount, scale_token_amount, ScalingError};
}
