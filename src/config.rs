//! Provisioning flow configuration.
//!
//! One parameterized configuration replaces the constellation of
//! near-identical scripts this crate descends from: the RPC endpoint,
//! decimal precision, mint amount, funding thresholds, and the
//! create-vs-update metadata branch are all explicit values handed to the
//! flow, never module-level constants.

use crate::network::DEVNET_RPC_URL;
use crate::program::constants::{DEFAULT_DECIMALS, LAMPORTS_PER_SOL};
use crate::program::types::{MetadataDescriptor, MetadataUpdate};

/// Placeholder metadata used when the caller supplies no overrides.
pub const DEFAULT_TOKEN_NAME: &str = "Your Token Name";
pub const DEFAULT_TOKEN_SYMBOL: &str = "YTN";
pub const DEFAULT_TOKEN_URI: &str = "https://example.com/metadata.json";

/// Which metadata path the flow takes after minting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataStep {
    /// Create the record at the derived address (fails on duplicates).
    Create(MetadataDescriptor),
    /// Merge overrides into the existing record (fails when absent).
    Update(MetadataUpdate),
}

/// Configuration for a provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// RPC endpoint of the target cluster.
    pub rpc_endpoint: String,
    /// Decimal precision of the new mint.
    pub decimals: u8,
    /// Amount to mint, in base units (already scaled by `10^decimals`).
    pub mint_amount: u64,
    /// Payer balance below which a faucet credit is requested.
    pub min_payer_balance: u64,
    /// Lamports to request from the faucet.
    pub airdrop_lamports: u64,
    /// Metadata path to take after minting.
    pub metadata: MetadataStep,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            rpc_endpoint: DEVNET_RPC_URL.to_string(),
            decimals: DEFAULT_DECIMALS,
            // 100 whole tokens at 9 decimals
            mint_amount: 100_000_000_000,
            min_payer_balance: LAMPORTS_PER_SOL,
            airdrop_lamports: LAMPORTS_PER_SOL,
            metadata: MetadataStep::Create(MetadataDescriptor::new(
                DEFAULT_TOKEN_NAME,
                DEFAULT_TOKEN_SYMBOL,
                DEFAULT_TOKEN_URI,
            )),
        }
    }
}

impl ProvisionConfig {
    /// Default configuration against devnet.
    pub fn devnet() -> Self {
        Self::default()
    }

    pub fn rpc_endpoint(mut self, endpoint: &str) -> Self {
        self.rpc_endpoint = endpoint.to_string();
        self
    }

    pub fn decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn mint_amount(mut self, base_units: u64) -> Self {
        self.mint_amount = base_units;
        self
    }

    pub fn metadata(mut self, step: MetadataStep) -> Self {
        self.metadata = step;
        self
    }
}
