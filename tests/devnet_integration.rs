//! Devnet integration tests for the provisioning flow.
//!
//! These run against a live devnet cluster and its faucet, so they are
//! ignored by default. Requires either a funded keypair at
//! `payer-keypair.json` or a working devnet faucet.
//!
//! Run: cargo test --test devnet_integration -- --nocapture --ignored

use mintsmith::prelude::*;
use solana_keypair::Keypair;
use solana_signer::Signer;

fn rpc_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("RPC_ENDPOINT").unwrap_or_else(|_| DEVNET_RPC_URL.to_string())
}

fn load_payer() -> Keypair {
    identity::load_or_create("payer-keypair.json").expect("load or create payer identity")
}

#[tokio::test]
#[ignore]
async fn test_end_to_end_provisioning() {
    let client = TokenClient::new(&rpc_url());
    let payer = load_payer();
    let config = ProvisionConfig::devnet().rpc_endpoint(&rpc_url());

    let report = provision_token(&client, &payer, &config)
        .await
        .expect("provisioning flow");

    // 100 whole tokens at 9 decimals
    assert_eq!(report.supply, 100_000_000_000);
    assert_ne!(report.mint, report.token_account);

    // The minted balance landed on the resolved account.
    let balance = client.token_balance(&report.token_account).await.unwrap();
    assert_eq!(balance, 100_000_000_000);

    // Metadata record readable back with the exact submitted fields.
    let metadata = client
        .get_metadata(&report.mint)
        .await
        .unwrap()
        .expect("metadata record exists");
    assert_eq!(metadata.name, "Your Token Name");
    assert_eq!(metadata.symbol, "YTN");
    assert_eq!(metadata.mint, report.mint);
    assert_eq!(metadata.update_authority, payer.pubkey());
}

#[tokio::test]
#[ignore]
async fn test_token_account_resolution_is_idempotent() {
    let client = TokenClient::new(&rpc_url());
    let payer = load_payer();

    client
        .ensure_funded(&payer.pubkey(), LAMPORTS_PER_SOL, LAMPORTS_PER_SOL)
        .await
        .expect("funded payer");

    let mint_authority = Keypair::new();
    let freeze_authority = Keypair::new();
    let mint = client
        .create_mint(
            &payer,
            &mint_authority.pubkey(),
            &freeze_authority.pubkey(),
            DEFAULT_DECIMALS,
        )
        .await
        .expect("create mint");

    let (first, created_first) = client
        .resolve_token_account(&payer, &mint, &payer.pubkey())
        .await
        .expect("first resolution");
    let (second, created_second) = client
        .resolve_token_account(&payer, &mint, &payer.pubkey())
        .await
        .expect("second resolution");

    assert_eq!(first, second);
    assert!(created_first);
    // The second resolution must find the existing account, not create.
    assert!(!created_second);
}

#[tokio::test]
#[ignore]
async fn test_mint_amount_accounting_is_exact() {
    let client = TokenClient::new(&rpc_url());
    let payer = load_payer();

    client
        .ensure_funded(&payer.pubkey(), LAMPORTS_PER_SOL, LAMPORTS_PER_SOL)
        .await
        .expect("funded payer");

    let mint_authority = Keypair::new();
    let freeze_authority = Keypair::new();
    let mint = client
        .create_mint(
            &payer,
            &mint_authority.pubkey(),
            &freeze_authority.pubkey(),
            DEFAULT_DECIMALS,
        )
        .await
        .expect("create mint");
    let (account, _) = client
        .resolve_token_account(&payer, &mint, &payer.pubkey())
        .await
        .expect("resolve account");

    let before = client.token_balance(&account).await.unwrap();
    assert_eq!(before, 0);

    let amount = scale_token_amount("7".parse().unwrap(), DEFAULT_DECIMALS).unwrap();
    client
        .mint_to(&payer, &mint, &account, &mint_authority, amount)
        .await
        .expect("mint to");

    let after = client.token_balance(&account).await.unwrap();
    assert_eq!(after, before + amount);
    assert_eq!(client.token_supply(&mint).await.unwrap(), amount);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_metadata_creation_fails() {
    let client = TokenClient::new(&rpc_url());
    let payer = load_payer();
    let config = ProvisionConfig::devnet().rpc_endpoint(&rpc_url());

    let report = provision_token(&client, &payer, &config)
        .await
        .expect("provisioning flow");

    // A second creation against the same mint must fail loudly, not
    // silently succeed or overwrite.
    let mint_authority = Keypair::new();
    let descriptor = MetadataDescriptor::new("Other", "OTH", "https://example.com/other.json");
    let result = client
        .create_metadata(&payer, &report.mint, &mint_authority, &descriptor)
        .await;

    assert!(matches!(result, Err(SdkError::MetadataAlreadyExists(_))));
}

#[tokio::test]
#[ignore]
async fn test_update_path_merges_over_existing_record() {
    let client = TokenClient::new(&rpc_url());
    let payer = load_payer();
    let config = ProvisionConfig::devnet().rpc_endpoint(&rpc_url());

    let report = provision_token(&client, &payer, &config)
        .await
        .expect("provisioning flow");

    let update = MetadataUpdate {
        name: Some("New Token Name".to_string()),
        symbol: Some("NEWTK".to_string()),
        uri: None,
        seller_fee_basis_points: Some(500),
    };
    client
        .update_metadata(&payer, &report.mint, &update)
        .await
        .expect("update metadata");

    let metadata = client
        .get_metadata(&report.mint)
        .await
        .unwrap()
        .expect("metadata record exists");
    assert_eq!(metadata.name, "New Token Name");
    assert_eq!(metadata.symbol, "NEWTK");
    // Unset fields keep their on-chain values.
    assert_eq!(metadata.uri, "https://example.com/metadata.json");
    assert_eq!(metadata.seller_fee_basis_points, 500);
}
