//! PDA (Program Derived Address) derivation functions.
//!
//! The metadata account for a mint is addressed deterministically: it is a
//! pure function of the mint address and the metadata program's identifier,
//! so recomputing it always yields the same address.

use solana_pubkey::Pubkey;

use crate::program::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, METADATA_SEED, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};

/// Get the Metadata PDA for a mint.
///
/// Seeds: ["metadata", metadata_program_id, mint]
pub fn get_metadata_pda(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[METADATA_SEED, program_id.as_ref(), mint.as_ref()],
        program_id,
    )
}

/// Get the Metadata PDA for a mint under the canonical metadata program.
pub fn get_canonical_metadata_pda(mint: &Pubkey) -> (Pubkey, u8) {
    get_metadata_pda(mint, &TOKEN_METADATA_PROGRAM_ID)
}

/// Get the Associated Token Address for a wallet and mint.
///
/// Seeds: [wallet, token_program, mint] under the ATA program.
pub fn get_associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[wallet.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .0
}
