//! Network URL constants.

/// Default RPC endpoint. Provisioning only makes sense against a cluster
/// with a faucet, so the default points at devnet.
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Explorer base URL, used for log output only.
pub const EXPLORER_URL: &str = "https://explorer.solana.com";

/// Explorer address link for the devnet cluster.
pub fn explorer_address_url(address: &str) -> String {
    format!("{EXPLORER_URL}/address/{address}?cluster=devnet")
}
