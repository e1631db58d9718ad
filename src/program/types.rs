//! Parameter types for metadata instructions.

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;

/// A royalty-sharing creator entry on a metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    /// Share of royalties, in percent. Shares across all creators must sum
    /// to 100.
    pub share: u8,
}

impl Creator {
    /// Single creator entry: the signer itself at 100% share.
    ///
    /// A creator equal to the transaction signer may be marked verified at
    /// creation time; any other address must start unverified.
    pub fn sole(address: Pubkey) -> Vec<Creator> {
        vec![Creator {
            address,
            verified: true,
            share: 100,
        }]
    }
}

/// Reference to a collection NFT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub verified: bool,
    pub key: Pubkey,
}

/// Usage restrictions descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uses {
    /// 0 = Burn, 1 = Multiple, 2 = Single
    pub use_method: u8,
    pub remaining: u64,
    pub total: u64,
}

/// Full descriptor submitted on metadata creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDescriptor {
    /// Display name (max 32 bytes)
    pub name: String,
    /// Ticker symbol (max 10 bytes)
    pub symbol: String,
    /// URI of the off-chain JSON descriptor (max 200 bytes). Stored only;
    /// never fetched by this crate.
    pub uri: String,
    /// Royalty in basis points
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
    pub is_mutable: bool,
}

impl MetadataDescriptor {
    /// Minimal descriptor: name, symbol, and URI with zero royalty and no
    /// creators, collection, or uses.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
            is_mutable: true,
        }
    }

    /// Attach a single creator entry for the signer at 100% share.
    pub fn with_sole_creator(mut self, signer: Pubkey) -> Self {
        self.creators = Some(Creator::sole(signer));
        self
    }
}

/// Field overrides for the metadata update path.
///
/// `None` fields keep the value currently on chain; the existing creators,
/// collection, and uses entries are always carried over unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataUpdate {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub uri: Option<String>,
    pub seller_fee_basis_points: Option<u16>,
}
