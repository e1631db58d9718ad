//! Program IDs, PDA seeds, discriminators, and size constants.

use solana_pubkey::Pubkey;
use std::str::FromStr;

// ============================================================================
// Program IDs
// ============================================================================

lazy_static::lazy_static! {
    /// Metaplex Token Metadata Program ID
    pub static ref TOKEN_METADATA_PROGRAM_ID: Pubkey =
        Pubkey::from_str("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s").unwrap();
}

/// SPL Token Program ID
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;

/// Associated Token Account Program ID
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;

/// System Program ID
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk_ids::system_program::ID;

// ============================================================================
// Instruction Discriminators
// ============================================================================

/// Token Metadata instruction discriminators (single byte indices)
pub mod instruction {
    pub const CREATE_METADATA_ACCOUNT_V3: u8 = 33;
    pub const UPDATE_METADATA_ACCOUNT_V2: u8 = 15;
}

/// Associated Token Account instruction discriminators
pub mod ata_instruction {
    pub const CREATE: u8 = 0;
}

// ============================================================================
// PDA Seeds
// ============================================================================

/// Metadata PDA seed
pub const METADATA_SEED: &[u8] = b"metadata";

// ============================================================================
// Account Sizes and Keys
// ============================================================================

/// SPL Token mint account size in bytes
pub const MINT_ACCOUNT_SIZE: usize = 82;

/// Metadata account key byte for a MetadataV1 record
pub const METADATA_V1_KEY: u8 = 4;

// ============================================================================
// Metadata Field Limits (enforced by the metadata program)
// ============================================================================

/// Maximum metadata name length in bytes
pub const MAX_NAME_LENGTH: usize = 32;
/// Maximum metadata symbol length in bytes
pub const MAX_SYMBOL_LENGTH: usize = 10;
/// Maximum metadata URI length in bytes
pub const MAX_URI_LENGTH: usize = 200;
/// Maximum number of creators per metadata record
pub const MAX_CREATOR_LIMIT: usize = 5;

// ============================================================================
// Amounts
// ============================================================================

/// Lamports per SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Default decimal precision for provisioned mints
pub const DEFAULT_DECIMALS: u8 = 9;

// ============================================================================
// Faucet Confirmation Polling
// ============================================================================

/// Maximum confirmation polls for a faucet credit before giving up
pub const FAUCET_CONFIRM_ATTEMPTS: u32 = 30;
/// Delay between faucet confirmation polls, in milliseconds
pub const FAUCET_CONFIRM_INTERVAL_MS: u64 = 2_000;
