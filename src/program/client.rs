//! Async client for token provisioning against a Solana cluster.
//!
//! Every method is a blocking round trip to the cluster: the caller awaits
//! each step before the next, and nothing retries internally.

use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_commitment_config::CommitmentConfig;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solana_system_interface::instruction as system_instruction;
use solana_transaction::Transaction;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{SdkError, SdkResult};
use crate::program::accounts::TokenMetadata;
use crate::program::constants::{
    FAUCET_CONFIRM_ATTEMPTS, FAUCET_CONFIRM_INTERVAL_MS, MINT_ACCOUNT_SIZE,
    TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::program::instructions::{
    build_create_associated_token_account_ix, build_create_metadata_v3_ix,
    build_update_metadata_v2_ix, merge_metadata_update,
};
use crate::program::pda::{get_associated_token_address, get_metadata_pda};
use crate::program::types::{MetadataDescriptor, MetadataUpdate};
use crate::program::utils::{validate_descriptor, validate_metadata_fields};

/// Client for provisioning SPL tokens and their metadata records.
pub struct TokenClient {
    /// RPC client for the target cluster
    pub rpc_client: RpcClient,
    /// Token metadata program ID
    pub metadata_program_id: Pubkey,
}

impl TokenClient {
    /// Create a new client with the canonical metadata program ID.
    pub fn new(rpc_url: &str) -> Self {
        Self {
            rpc_client: RpcClient::new_with_commitment(
                rpc_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            metadata_program_id: *TOKEN_METADATA_PROGRAM_ID,
        }
    }

    /// Create a new client with a custom metadata program ID.
    pub fn with_metadata_program(rpc_url: &str, metadata_program_id: Pubkey) -> Self {
        Self {
            rpc_client: RpcClient::new_with_commitment(
                rpc_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            metadata_program_id,
        }
    }

    // ========================================================================
    // Funding
    // ========================================================================

    /// Fetch the lamport balance of an account.
    pub async fn balance(&self, pubkey: &Pubkey) -> SdkResult<u64> {
        Ok(self.rpc_client.get_balance(pubkey).await?)
    }

    /// Ensure `pubkey` holds at least `min_balance` lamports, requesting a
    /// single faucet credit when below the threshold.
    ///
    /// Blocks until the credit is confirmed, then re-queries and returns the
    /// balance. A credit that never confirms within the polling window
    /// surfaces as [`SdkError::FaucetUnconfirmed`]; the request is not
    /// retried here.
    pub async fn ensure_funded(
        &self,
        pubkey: &Pubkey,
        min_balance: u64,
        airdrop_lamports: u64,
    ) -> SdkResult<u64> {
        let balance = self.balance(pubkey).await?;
        if balance >= min_balance {
            return Ok(balance);
        }

        info!(
            %pubkey,
            balance_lamports = balance,
            airdrop_lamports,
            "balance below threshold, requesting faucet credit"
        );
        let signature = self
            .rpc_client
            .request_airdrop(pubkey, airdrop_lamports)
            .await?;

        for attempt in 0..FAUCET_CONFIRM_ATTEMPTS {
            if self.rpc_client.confirm_transaction(&signature).await? {
                debug!(%signature, attempt, "faucet credit confirmed");
                return self.balance(pubkey).await;
            }
            tokio::time::sleep(Duration::from_millis(FAUCET_CONFIRM_INTERVAL_MS)).await;
        }

        Err(SdkError::FaucetUnconfirmed {
            signature: signature.to_string(),
            attempts: FAUCET_CONFIRM_ATTEMPTS,
        })
    }

    // ========================================================================
    // Mint
    // ========================================================================

    /// Create a brand-new mint with the given authorities and decimal
    /// precision, returning its address.
    ///
    /// Every call creates a fresh mint account; there is deliberately no
    /// reuse of a previously created mint.
    pub async fn create_mint(
        &self,
        payer: &Keypair,
        mint_authority: &Pubkey,
        freeze_authority: &Pubkey,
        decimals: u8,
    ) -> SdkResult<Pubkey> {
        let mint = Keypair::new();
        let mint_pubkey = mint.pubkey();

        let rent = self
            .rpc_client
            .get_minimum_balance_for_rent_exemption(MINT_ACCOUNT_SIZE)
            .await?;

        let create_account_ix = system_instruction::create_account(
            &payer.pubkey(),
            &mint_pubkey,
            rent,
            MINT_ACCOUNT_SIZE as u64,
            &TOKEN_PROGRAM_ID,
        );
        let initialize_mint_ix = spl_token::instruction::initialize_mint(
            &TOKEN_PROGRAM_ID,
            &mint_pubkey,
            mint_authority,
            Some(freeze_authority),
            decimals,
        )
        .map_err(|e| SdkError::Instruction(e.to_string()))?;

        let signature = self
            .sign_and_send(
                &[create_account_ix, initialize_mint_ix],
                &payer.pubkey(),
                &[payer, &mint],
            )
            .await?;
        debug!(%signature, mint = %mint_pubkey, "mint account created");

        Ok(mint_pubkey)
    }

    /// Fetch the mint's total supply in base units.
    pub async fn token_supply(&self, mint: &Pubkey) -> SdkResult<u64> {
        let supply = self.rpc_client.get_token_supply(mint).await?;
        supply
            .amount
            .parse::<u64>()
            .map_err(|e| SdkError::Serialization(e.to_string()))
    }

    // ========================================================================
    // Token Accounts
    // ========================================================================

    /// Find an existing token account holding `mint` for `owner`, if any.
    pub async fn find_token_account(
        &self,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> SdkResult<Option<Pubkey>> {
        let accounts = self
            .rpc_client
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::Mint(*mint))
            .await?;

        match accounts.first() {
            Some(keyed) => {
                let pubkey = Pubkey::from_str(&keyed.pubkey)
                    .map_err(|e| SdkError::InvalidPubkey(e.to_string()))?;
                Ok(Some(pubkey))
            }
            None => Ok(None),
        }
    }

    /// Create the canonical associated token account for (owner, mint).
    pub async fn create_associated_token_account(
        &self,
        payer: &Keypair,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> SdkResult<Pubkey> {
        let ix = build_create_associated_token_account_ix(&payer.pubkey(), owner, mint);
        let signature = self
            .sign_and_send(&[ix], &payer.pubkey(), &[payer])
            .await?;
        debug!(%signature, "associated token account created");

        Ok(get_associated_token_address(owner, mint))
    }

    /// Resolve the token account for (mint, owner): reuse an existing
    /// account when one is found, otherwise create the canonical associated
    /// account. Never blindly creates; the token program enforces one
    /// associated account per (mint, owner) pair and rejects duplicates.
    ///
    /// Returns the account address and whether a creation call was made.
    pub async fn resolve_token_account(
        &self,
        payer: &Keypair,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> SdkResult<(Pubkey, bool)> {
        if let Some(existing) = self.find_token_account(mint, owner).await? {
            debug!(account = %existing, "existing token account found");
            return Ok((existing, false));
        }

        let created = self
            .create_associated_token_account(payer, mint, owner)
            .await?;
        Ok((created, true))
    }

    /// Fetch a token account's balance in base units.
    pub async fn token_balance(&self, account: &Pubkey) -> SdkResult<u64> {
        let balance = self.rpc_client.get_token_account_balance(account).await?;
        balance
            .amount
            .parse::<u64>()
            .map_err(|e| SdkError::Serialization(e.to_string()))
    }

    /// Mint `amount` base units to `recipient`.
    ///
    /// `amount` must already be scaled by the mint's decimal precision; use
    /// [`crate::shared::scaling::scale_token_amount`] for whole-token input.
    pub async fn mint_to(
        &self,
        payer: &Keypair,
        mint: &Pubkey,
        recipient: &Pubkey,
        mint_authority: &Keypair,
        amount: u64,
    ) -> SdkResult<Signature> {
        let ix = spl_token::instruction::mint_to(
            &TOKEN_PROGRAM_ID,
            mint,
            recipient,
            &mint_authority.pubkey(),
            &[],
            amount,
        )
        .map_err(|e| SdkError::Instruction(e.to_string()))?;

        let signers: Vec<&Keypair> = if mint_authority.pubkey() == payer.pubkey() {
            vec![payer]
        } else {
            vec![payer, mint_authority]
        };
        self.sign_and_send(&[ix], &payer.pubkey(), &signers).await
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Get the metadata PDA for a mint under this client's metadata program.
    pub fn get_metadata_pda(&self, mint: &Pubkey) -> Pubkey {
        get_metadata_pda(mint, &self.metadata_program_id).0
    }

    /// Fetch and decode the metadata record for a mint.
    ///
    /// Absence of the account is `Ok(None)`; transport and cluster errors
    /// propagate as [`SdkError::Rpc`] rather than reading as absence.
    pub async fn get_metadata(&self, mint: &Pubkey) -> SdkResult<Option<TokenMetadata>> {
        let pda = self.get_metadata_pda(mint);
        let account = self
            .rpc_client
            .get_account_with_commitment(&pda, self.rpc_client.commitment())
            .await?
            .value;
        match account {
            Some(account) => Ok(Some(TokenMetadata::deserialize(&account.data)?)),
            None => Ok(None),
        }
    }

    /// Create the metadata record for a mint.
    ///
    /// Fails with [`SdkError::MetadataAlreadyExists`] when a record is
    /// already present at the derived address; the program would reject the
    /// duplicate creation anyway, so surface it before submitting. The payer
    /// becomes the update authority.
    pub async fn create_metadata(
        &self,
        payer: &Keypair,
        mint: &Pubkey,
        mint_authority: &Keypair,
        descriptor: &MetadataDescriptor,
    ) -> SdkResult<Pubkey> {
        validate_descriptor(descriptor)?;

        let pda = self.get_metadata_pda(mint);
        let existing = self
            .rpc_client
            .get_account_with_commitment(&pda, self.rpc_client.commitment())
            .await?
            .value;
        if existing.is_some() {
            return Err(SdkError::MetadataAlreadyExists(pda));
        }

        let ix = build_create_metadata_v3_ix(
            mint,
            &mint_authority.pubkey(),
            &payer.pubkey(),
            &payer.pubkey(),
            descriptor,
            &self.metadata_program_id,
        );

        let signers: Vec<&Keypair> = if mint_authority.pubkey() == payer.pubkey() {
            vec![payer]
        } else {
            vec![payer, mint_authority]
        };
        let signature = self.sign_and_send(&[ix], &payer.pubkey(), &signers).await?;
        debug!(%signature, metadata = %pda, "metadata record created");

        Ok(pda)
    }

    /// Update an existing metadata record: fetch the current fields, apply
    /// the supplied overrides, and submit the merged record. The signer must
    /// be the record's update authority.
    pub async fn update_metadata(
        &self,
        update_authority: &Keypair,
        mint: &Pubkey,
        update: &MetadataUpdate,
    ) -> SdkResult<Pubkey> {
        validate_metadata_fields(
            update.name.as_deref(),
            update.symbol.as_deref(),
            update.uri.as_deref(),
        )?;

        let pda = self.get_metadata_pda(mint);
        let current = self
            .get_metadata(mint)
            .await?
            .ok_or(SdkError::MetadataNotFound(pda))?;

        let merged = merge_metadata_update(&current, update);
        let ix = build_update_metadata_v2_ix(
            mint,
            &update_authority.pubkey(),
            &merged,
            &self.metadata_program_id,
        );

        let signature = self
            .sign_and_send(&[ix], &update_authority.pubkey(), &[update_authority])
            .await?;
        debug!(%signature, metadata = %pda, "metadata record updated");

        Ok(pda)
    }

    // ========================================================================
    // Transaction Plumbing
    // ========================================================================

    /// Sign a transaction with a fresh blockhash and send it, waiting for
    /// confirmation.
    async fn sign_and_send(
        &self,
        instructions: &[solana_instruction::Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> SdkResult<Signature> {
        let blockhash = self.rpc_client.get_latest_blockhash().await?;
        let mut tx = Transaction::new_with_payer(instructions, Some(payer));
        tx.sign(&signers.to_vec(), blockhash);
        Ok(self.rpc_client.send_and_confirm_transaction(&tx).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::DEVNET_RPC_URL;

    #[test]
    fn test_client_creation() {
        let client = TokenClient::new(DEVNET_RPC_URL);
        assert_eq!(client.metadata_program_id, *TOKEN_METADATA_PROGRAM_ID);
    }

    #[test]
    fn test_client_with_custom_metadata_program() {
        let custom = Pubkey::new_unique();
        let client = TokenClient::with_metadata_program(DEVNET_RPC_URL, custom);
        assert_eq!(client.metadata_program_id, custom);
    }

    #[test]
    fn test_metadata_pda_helper_is_deterministic() {
        let client = TokenClient::new(DEVNET_RPC_URL);
        let mint = Pubkey::new_unique();

        assert_eq!(client.get_metadata_pda(&mint), client.get_metadata_pda(&mint));
        assert_ne!(client.get_metadata_pda(&mint), Pubkey::default());
    }

    // Nothing listens on port 1; a failed connection must surface as an RPC
    // error, never as "the account does not exist".

    #[tokio::test]
    async fn test_get_metadata_transport_error_is_not_absence() {
        let client = TokenClient::new("http://127.0.0.1:1");
        let mint = Pubkey::new_unique();

        let result = client.get_metadata(&mint).await;
        assert!(matches!(result, Err(SdkError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_create_metadata_transport_error_propagates() {
        let client = TokenClient::new("http://127.0.0.1:1");
        let payer = Keypair::new();
        let mint_authority = Keypair::new();
        let descriptor = MetadataDescriptor::new("T", "T", "https://x.test/m.json");

        let result = client
            .create_metadata(&payer, &Pubkey::new_unique(), &mint_authority, &descriptor)
            .await;
        assert!(matches!(result, Err(SdkError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_update_metadata_transport_error_is_not_missing_record() {
        let client = TokenClient::new("http://127.0.0.1:1");
        let authority = Keypair::new();

        let result = client
            .update_metadata(&authority, &Pubkey::new_unique(), &MetadataUpdate::default())
            .await;
        assert!(matches!(result, Err(SdkError::Rpc(_))));
    }
}
