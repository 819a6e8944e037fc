// ============================================================================
// STELLAR-FUNDING - Configuration
// ============================================================================
// Endpoints and policy constants for testnet funding.

use serde::{Deserialize, Serialize};

/// Stroops per lumen (1 XLM = 10,000,000 stroops)
pub const STROOPS_PER_XLM: i128 = 10_000_000;

/// Friendbot grants 10,000 XLM; we forward 9,998 and keep 2 for fees.
pub const DEFAULT_BRIDGE_AMOUNT_XLM: u64 = 9_998;

/// Funding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingConfig {
    /// Network passphrase for transaction signing
    pub network_passphrase: String,

    /// Friendbot URL
    pub friendbot_url: String,

    /// Soroban RPC URL
    pub rpc_url: String,

    /// Native asset (XLM) Stellar Asset Contract id (C... address)
    pub native_asset_contract: String,

    /// Base fee in stroops, superseded by simulated resource fees
    pub base_fee: u32,

    /// Transaction validity window in seconds
    pub tx_timeout_secs: u64,

    /// Maximum `getAccount` attempts while waiting for the burner account
    pub poll_attempts: u32,

    /// Fixed delay between failed attempts, in milliseconds
    pub poll_delay_ms: u64,

    /// Amount forwarded from the burner account, in whole XLM
    pub bridge_amount_xlm: u64,

    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,

    /// Stellar Expert explorer base (network path included)
    pub explorer_url: String,
}

impl FundingConfig {
    /// Create testnet configuration
    pub fn testnet() -> Self {
        Self {
            network_passphrase: "Test SDF Network ; September 2015".to_string(),
            friendbot_url: "https://friendbot.stellar.org".to_string(),
            rpc_url: "https://soroban-testnet.stellar.org".to_string(),
            native_asset_contract: "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC"
                .to_string(),
            base_fee: 100, // 0.00001 XLM
            tx_timeout_secs: 60,
            poll_attempts: 10,
            poll_delay_ms: 2_000,
            bridge_amount_xlm: DEFAULT_BRIDGE_AMOUNT_XLM,
            http_timeout_secs: 30,
            explorer_url: "https://stellar.expert/explorer/testnet".to_string(),
        }
    }

    /// Override the Soroban RPC endpoint
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    /// Override the Friendbot endpoint
    pub fn with_friendbot_url(mut self, url: impl Into<String>) -> Self {
        self.friendbot_url = url.into();
        self
    }

    /// Get Stellar Expert explorer URL for an account
    pub fn explorer_account_url(&self, address: &str) -> String {
        format!("{}/account/{}", self.explorer_url, address)
    }

    /// Get Stellar Expert explorer URL for a transaction
    pub fn explorer_tx_url(&self, hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, hash)
    }

    /// Get Stellar Expert explorer URL for a contract
    pub fn explorer_contract_url(&self, address: &str) -> String {
        format!("{}/contract/{}", self.explorer_url, address)
    }
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self::testnet()
    }
}
