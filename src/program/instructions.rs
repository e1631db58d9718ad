//! Instruction builders for the token-metadata and associated-token programs.
//!
//! Instructions are assembled by hand: account list plus a single-byte
//! discriminator followed by Borsh-encoded arguments.

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::program::constants::{ata_instruction, instruction, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::program::pda::{get_associated_token_address, get_metadata_pda};
use crate::program::types::{MetadataDescriptor, MetadataUpdate};
use crate::program::utils::{
    put_collection, put_creators, put_option, put_string, put_uses,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Create an account meta for a signer+writable account.
fn signer_mut(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, true)
}

/// Create an account meta for a signer, read-only account.
fn signer(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, true)
}

/// Create an account meta for a writable account.
fn writable(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, false)
}

/// Create an account meta for a read-only account.
fn readonly(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, false)
}

/// Serialize a DataV2 payload: name, symbol, uri, seller fee, creators,
/// collection, uses.
fn put_data_v2(buf: &mut Vec<u8>, descriptor: &MetadataDescriptor) {
    put_string(buf, &descriptor.name);
    put_string(buf, &descriptor.symbol);
    put_string(buf, &descriptor.uri);
    buf.extend_from_slice(&descriptor.seller_fee_basis_points.to_le_bytes());
    put_option(buf, descriptor.creators.as_deref(), |b, c| {
        put_creators(b, c)
    });
    put_option(buf, descriptor.collection.as_ref(), put_collection);
    put_option(buf, descriptor.uses.as_ref(), put_uses);
}

// ============================================================================
// Instruction Builders
// ============================================================================

/// Build CreateMetadataAccountV3 instruction.
///
/// Creates the metadata record at the PDA derived from the mint. The
/// program rejects a second creation for the same mint.
///
/// Accounts:
/// 0. metadata (mut) - Metadata PDA
/// 1. mint (readonly)
/// 2. mint_authority (signer)
/// 3. payer (signer, mut)
/// 4. update_authority (signer)
/// 5. system_program (readonly)
pub fn build_create_metadata_v3_ix(
    mint: &Pubkey,
    mint_authority: &Pubkey,
    payer: &Pubkey,
    update_authority: &Pubkey,
    descriptor: &MetadataDescriptor,
    program_id: &Pubkey,
) -> Instruction {
    let (metadata, _) = get_metadata_pda(mint, program_id);

    let keys = vec![
        writable(metadata),
        readonly(*mint),
        signer(*mint_authority),
        signer_mut(*payer),
        signer(*update_authority),
        readonly(SYSTEM_PROGRAM_ID),
    ];

    // Data: [discriminator, DataV2, is_mutable, collection_details (None)]
    let mut data = Vec::with_capacity(128);
    data.push(instruction::CREATE_METADATA_ACCOUNT_V3);
    put_data_v2(&mut data, descriptor);
    data.push(descriptor.is_mutable as u8);
    data.push(0); // collection_details: None

    Instruction {
        program_id: *program_id,
        accounts: keys,
        data,
    }
}

/// Build UpdateMetadataAccountV2 instruction.
///
/// `merged` must already hold the full post-merge field set; the program
/// replaces the record's data wholesale. Update authority and
/// primary-sale-happened are left unchanged.
///
/// Accounts:
/// 0. metadata (mut) - Metadata PDA
/// 1. update_authority (signer)
pub fn build_update_metadata_v2_ix(
    mint: &Pubkey,
    update_authority: &Pubkey,
    merged: &MetadataDescriptor,
    program_id: &Pubkey,
) -> Instruction {
    let (metadata, _) = get_metadata_pda(mint, program_id);

    let keys = vec![writable(metadata), signer(*update_authority)];

    // Data: [discriminator, Option<DataV2>, Option<new_update_authority>,
    //        Option<primary_sale_happened>, Option<is_mutable>]
    let mut data = Vec::with_capacity(128);
    data.push(instruction::UPDATE_METADATA_ACCOUNT_V2);
    data.push(1); // data: Some
    put_data_v2(&mut data, merged);
    data.push(0); // new_update_authority: None
    data.push(0); // primary_sale_happened: None
    data.push(0); // is_mutable: None

    Instruction {
        program_id: *program_id,
        accounts: keys,
        data,
    }
}

/// Build the ATA program's Create instruction for the canonical associated
/// token account of (owner, mint).
///
/// Accounts:
/// 0. funder (signer, mut)
/// 1. associated_token_account (mut)
/// 2. owner (readonly)
/// 3. mint (readonly)
/// 4. system_program (readonly)
/// 5. token_program (readonly)
pub fn build_create_associated_token_account_ix(
    funder: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    let ata = get_associated_token_address(owner, mint);

    let keys = vec![
        signer_mut(*funder),
        writable(ata),
        readonly(*owner),
        readonly(*mint),
        readonly(SYSTEM_PROGRAM_ID),
        readonly(TOKEN_PROGRAM_ID),
    ];

    Instruction {
        program_id: crate::program::constants::ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: keys,
        data: vec![ata_instruction::CREATE],
    }
}

/// Apply update overrides over an existing record's fields, producing the
/// full descriptor to submit. Creators, collection, and uses are carried
/// over unchanged.
pub fn merge_metadata_update(
    current: &crate::program::accounts::TokenMetadata,
    update: &MetadataUpdate,
) -> MetadataDescriptor {
    MetadataDescriptor {
        name: update.name.clone().unwrap_or_else(|| current.name.clone()),
        symbol: update
            .symbol
            .clone()
            .unwrap_or_else(|| current.symbol.clone()),
        uri: update.uri.clone().unwrap_or_else(|| current.uri.clone()),
        seller_fee_basis_points: update
            .seller_fee_basis_points
            .unwrap_or(current.seller_fee_basis_points),
        creators: current.creators.clone(),
        collection: current.collection.clone(),
        uses: current.uses.clone(),
        is_mutable: current.is_mutable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::constants::TOKEN_METADATA_PROGRAM_ID;
    use crate::program::types::Creator;

    fn descriptor() -> MetadataDescriptor {
        MetadataDescriptor::new("Your Token Name", "YTN", "https://x.test/m.json")
    }

    #[test]
    fn test_create_metadata_discriminator_and_accounts() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let payer = Pubkey::new_unique();

        let ix = build_create_metadata_v3_ix(
            &mint,
            &authority,
            &payer,
            &payer,
            &descriptor(),
            &TOKEN_METADATA_PROGRAM_ID,
        );

        assert_eq!(ix.program_id, *TOKEN_METADATA_PROGRAM_ID);
        assert_eq!(ix.data[0], 33);
        assert_eq!(ix.accounts.len(), 6);

        let (metadata, _) = get_metadata_pda(&mint, &TOKEN_METADATA_PROGRAM_ID);
        assert_eq!(ix.accounts[0].pubkey, metadata);
        assert!(ix.accounts[0].is_writable);
        assert!(!ix.accounts[0].is_signer);

        assert_eq!(ix.accounts[1].pubkey, mint);
        assert!(ix.accounts[2].is_signer); // mint authority
        assert!(ix.accounts[3].is_signer && ix.accounts[3].is_writable); // payer
        assert!(ix.accounts[4].is_signer); // update authority
        assert_eq!(ix.accounts[5].pubkey, SYSTEM_PROGRAM_ID);
    }

    #[test]
    fn test_create_metadata_data_layout() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let d = descriptor();

        let ix = build_create_metadata_v3_ix(
            &mint,
            &authority,
            &payer,
            &payer,
            &d,
            &TOKEN_METADATA_PROGRAM_ID,
        );

        // discriminator + 3 strings + u16 + 3 option tags + is_mutable +
        // collection_details tag
        let expected_len = 1
            + (4 + d.name.len())
            + (4 + d.symbol.len())
            + (4 + d.uri.len())
            + 2
            + 3
            + 1
            + 1;
        assert_eq!(ix.data.len(), expected_len);

        // name length prefix sits right after the discriminator
        assert_eq!(&ix.data[1..5], &(d.name.len() as u32).to_le_bytes());
        // trailing bytes: creators/collection/uses None, is_mutable true,
        // collection_details None
        assert_eq!(&ix.data[expected_len - 5..], &[0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_create_metadata_with_creators_encodes_vector() {
        let mint = Pubkey::new_unique();
        let signer_key = Pubkey::new_unique();
        let d = descriptor().with_sole_creator(signer_key);

        let ix = build_create_metadata_v3_ix(
            &mint,
            &signer_key,
            &signer_key,
            &signer_key,
            &d,
            &TOKEN_METADATA_PROGRAM_ID,
        );

        // 1 (Some) + 4 (vec len) + 34 (creator) extra over the no-creator form
        let bare = build_create_metadata_v3_ix(
            &mint,
            &signer_key,
            &signer_key,
            &signer_key,
            &descriptor(),
            &TOKEN_METADATA_PROGRAM_ID,
        );
        assert_eq!(ix.data.len(), bare.data.len() + 4 + 34);
    }

    #[test]
    fn test_update_metadata_discriminator_and_accounts() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let ix = build_update_metadata_v2_ix(
            &mint,
            &authority,
            &descriptor(),
            &TOKEN_METADATA_PROGRAM_ID,
        );

        assert_eq!(ix.data[0], 15);
        assert_eq!(ix.data[1], 1); // data: Some
        assert_eq!(&ix.data[ix.data.len() - 3..], &[0, 0, 0]);
        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[0].is_writable);
        assert!(ix.accounts[1].is_signer);
    }

    #[test]
    fn test_ata_create_accounts() {
        let funder = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ix = build_create_associated_token_account_ix(&funder, &owner, &mint);

        assert_eq!(ix.accounts.len(), 6);
        assert_eq!(ix.accounts[1].pubkey, get_associated_token_address(&owner, &mint));
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.data, vec![0]);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let current = crate::program::accounts::TokenMetadata {
            update_authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            name: "Old Name".to_string(),
            symbol: "OLD".to_string(),
            uri: "https://x.test/old.json".to_string(),
            seller_fee_basis_points: 0,
            creators: Some(Creator::sole(Pubkey::new_unique())),
            primary_sale_happened: false,
            is_mutable: true,
            collection: None,
            uses: None,
        };
        let update = MetadataUpdate {
            name: Some("New Token Name".to_string()),
            seller_fee_basis_points: Some(500),
            ..Default::default()
        };

        let merged = merge_metadata_update(&current, &update);
        assert_eq!(merged.name, "New Token Name");
        assert_eq!(merged.symbol, "OLD");
        assert_eq!(merged.uri, "https://x.test/old.json");
        assert_eq!(merged.seller_fee_basis_points, 500);
        assert_eq!(merged.creators, current.creators);
    }
}
