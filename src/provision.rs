//! The token provisioning flow.
//!
//! A strict forward sequence with no backward transitions: funded payer →
//! mint created → token account resolved → supply minted → metadata
//! attached. Each step is a confirmed round trip to the cluster, and a
//! failure at any step aborts the run. Nothing is rolled back; a mint
//! created before a later failure stays on the ledger, which the underlying
//! chain makes irreversible anyway.

use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use tracing::info;

use crate::config::{MetadataStep, ProvisionConfig};
use crate::error::SdkResult;
use crate::network::explorer_address_url;
use crate::program::client::TokenClient;
use crate::shared::scaling::format_token_amount;

/// Result of a completed provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    /// Address of the newly created mint.
    pub mint: Pubkey,
    /// Token account holding the minted supply.
    pub token_account: Pubkey,
    /// Whether the token account had to be created (false = reused).
    pub token_account_created: bool,
    /// Total mint supply after minting, in base units.
    pub supply: u64,
    /// Metadata account address.
    pub metadata: Pubkey,
}

/// Run the full provisioning flow with `payer` as fee payer, token owner,
/// and metadata update authority.
///
/// Fresh mint and freeze authorities are generated per run, and every run
/// creates a brand-new mint, matching one-shot demo semantics rather than
/// an idempotent deployment tool.
pub async fn provision_token(
    client: &TokenClient,
    payer: &Keypair,
    config: &ProvisionConfig,
) -> SdkResult<ProvisionReport> {
    info!(
        payer = %payer.pubkey(),
        explorer = explorer_address_url(&payer.pubkey().to_string()),
        "payer identity ready"
    );

    let balance = client
        .ensure_funded(
            &payer.pubkey(),
            config.min_payer_balance,
            config.airdrop_lamports,
        )
        .await?;
    info!(balance_lamports = balance, "payer funded");

    let mint_authority = Keypair::new();
    let freeze_authority = Keypair::new();
    let mint = client
        .create_mint(
            payer,
            &mint_authority.pubkey(),
            &freeze_authority.pubkey(),
            config.decimals,
        )
        .await?;
    info!(
        %mint,
        decimals = config.decimals,
        explorer = explorer_address_url(&mint.to_string()),
        "mint created"
    );

    let (token_account, token_account_created) = client
        .resolve_token_account(payer, &mint, &payer.pubkey())
        .await?;
    info!(
        %token_account,
        created = token_account_created,
        "token account resolved"
    );

    client
        .mint_to(payer, &mint, &token_account, &mint_authority, config.mint_amount)
        .await?;
    let supply = client.token_supply(&mint).await?;
    info!(
        base_units = config.mint_amount,
        supply,
        tokens = %format_token_amount(supply, config.decimals),
        "supply minted"
    );

    let metadata = match &config.metadata {
        MetadataStep::Create(descriptor) => {
            let pda = client
                .create_metadata(payer, &mint, &mint_authority, descriptor)
                .await?;
            info!(metadata = %pda, name = %descriptor.name, symbol = %descriptor.symbol, "metadata created");
            pda
        }
        MetadataStep::Update(update) => {
            let pda = client.update_metadata(payer, &mint, update).await?;
            info!(metadata = %pda, "metadata updated");
            pda
        }
    };

    Ok(ProvisionReport {
        mint,
        token_account,
        token_account_created,
        supply,
        metadata,
    })
}
