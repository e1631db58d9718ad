//! On-chain program interaction: constants, PDAs, instructions, accounts,
//! and the RPC client.

pub mod accounts;
pub mod client;
pub mod constants;
pub mod instructions;
pub mod pda;
pub mod types;
pub mod utils;

pub use accounts::TokenMetadata;
pub use client::TokenClient;
pub use constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, DEFAULT_DECIMALS, LAMPORTS_PER_SOL, SYSTEM_PROGRAM_ID,
    TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
pub use pda::{get_associated_token_address, get_canonical_metadata_pda, get_metadata_pda};
pub use types::{Collection, Creator, MetadataDescriptor, MetadataUpdate, Uses};
