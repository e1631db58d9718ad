//! On-chain account deserialization.
//!
//! Only the metadata record is decoded locally; mint supply and token
//! balances come back pre-parsed from the RPC token endpoints.

use solana_pubkey::Pubkey;

use crate::error::{SdkError, SdkResult};
use crate::program::constants::METADATA_V1_KEY;
use crate::program::types::{Collection, Creator, Uses};
use crate::program::utils::Reader;

/// A decoded token-metadata record.
///
/// Fields past `uses` (collection details, programmable config) are ignored;
/// the update path never touches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
}

impl TokenMetadata {
    /// Decode a metadata account's data.
    ///
    /// The program stores strings NUL-padded to their maximum length; the
    /// padding is trimmed here.
    pub fn deserialize(data: &[u8]) -> SdkResult<Self> {
        let mut reader = Reader::new(data);

        let key = reader.read_u8()?;
        if key != METADATA_V1_KEY {
            return Err(SdkError::Serialization(format!(
                "unexpected metadata account key: {key}"
            )));
        }

        let update_authority = reader.read_pubkey()?;
        let mint = reader.read_pubkey()?;
        let name = reader.read_string()?;
        let symbol = reader.read_string()?;
        let uri = reader.read_string()?;
        let seller_fee_basis_points = reader.read_u16()?;
        let creators = reader.read_option(|r| r.read_creators())?;
        let primary_sale_happened = reader.read_bool()?;
        let is_mutable = reader.read_bool()?;

        // edition_nonce and token_standard precede the collection reference
        let _edition_nonce = reader.read_option(|r| r.read_u8())?;
        let _token_standard = reader.read_option(|r| r.read_u8())?;

        let collection = reader.read_option(|r| {
            let verified = r.read_bool()?;
            let key = r.read_pubkey()?;
            Ok(Collection { verified, key })
        })?;
        let uses = reader.read_option(|r| {
            let use_method = r.read_u8()?;
            let remaining = r.read_u64()?;
            let total = r.read_u64()?;
            Ok(Uses {
                use_method,
                remaining,
                total,
            })
        })?;

        Ok(Self {
            update_authority,
            mint,
            name,
            symbol,
            uri,
            seller_fee_basis_points,
            creators,
            primary_sale_happened,
            is_mutable,
            collection,
            uses,
        })
    }
}
