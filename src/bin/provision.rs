//! One-shot token provisioning run.
//!
//! Reads overrides from the environment (or a `.env` file), runs the full
//! flow once, and prints the resulting mint address and supply. Any step's
//! error is printed and the process exits non-zero; completed steps are not
//! rolled back.
//!
//! Recognized variables: `RPC_ENDPOINT`, `KEYPAIR_PATH`, `TOKEN_NAME`,
//! `TOKEN_SYMBOL`, `TOKEN_URI`, `TOKEN_DECIMALS`, `MINT_AMOUNT` (whole
//! tokens), `INITIALIZE_METADATA` (`true` = create path, `false` = update
//! path using the same field variables as overrides).

use std::env;

use tracing::error;
use tracing_subscriber::EnvFilter;

use mintsmith::prelude::*;

const DEFAULT_KEYPAIR_PATH: &str = "payer-keypair.json";

fn config_from_env() -> Result<ProvisionConfig, Box<dyn std::error::Error>> {
    let mut config = ProvisionConfig::devnet();

    if let Ok(endpoint) = env::var("RPC_ENDPOINT") {
        config.rpc_endpoint = endpoint;
    }
    if let Ok(decimals) = env::var("TOKEN_DECIMALS") {
        config.decimals = decimals.parse()?;
    }
    if let Ok(amount) = env::var("MINT_AMOUNT") {
        config.mint_amount =
            mintsmith::shared::scaling::scale_token_amount_str(&amount, config.decimals)?;
    }

    let initialize = env::var("INITIALIZE_METADATA")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true);

    config.metadata = if initialize {
        MetadataStep::Create(MetadataDescriptor::new(
            env::var("TOKEN_NAME").unwrap_or_else(|_| DEFAULT_TOKEN_NAME.to_string()),
            env::var("TOKEN_SYMBOL").unwrap_or_else(|_| DEFAULT_TOKEN_SYMBOL.to_string()),
            env::var("TOKEN_URI").unwrap_or_else(|_| DEFAULT_TOKEN_URI.to_string()),
        ))
    } else {
        MetadataStep::Update(MetadataUpdate {
            name: env::var("TOKEN_NAME").ok(),
            symbol: env::var("TOKEN_SYMBOL").ok(),
            uri: env::var("TOKEN_URI").ok(),
            seller_fee_basis_points: None,
        })
    };

    Ok(config)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config_from_env()?;
    let keypair_path =
        env::var("KEYPAIR_PATH").unwrap_or_else(|_| DEFAULT_KEYPAIR_PATH.to_string());

    let payer = identity::load_or_create(&keypair_path)?;
    let client = TokenClient::new(&config.rpc_endpoint);

    let report = provision_token(&client, &payer, &config).await?;

    println!("Mint Address: {}", report.mint);
    println!("Token Account: {}", report.token_account);
    println!("Supply (base units): {}", report.supply);
    println!("Metadata Account: {}", report.metadata);
    println!("Explorer: {}", explorer_address_url(&report.mint.to_string()));

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "provisioning failed");
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}
