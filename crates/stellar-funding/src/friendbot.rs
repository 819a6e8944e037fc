// ============================================================================
// STELLAR-FUNDING - Friendbot Client
// ============================================================================
// Requests test lumens for an address from the testnet faucet.
// Single attempt: retry and fallback live in the orchestrator.
// ============================================================================

use crate::config::FundingConfig;
use crate::error::FundingError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const GENERIC_FAUCET_ERROR: &str = "Failed to fund wallet";

/// A service that credits test lumens to an address
#[async_trait]
pub trait FaucetService: Send + Sync {
    /// Fund `address`. Errors are always [`FundingError::Faucet`].
    async fn fund(&self, address: &str) -> Result<()>;
}

/// Friendbot problem / status document
#[derive(Debug, Deserialize)]
struct FriendbotReply {
    #[serde(default)]
    status: Option<serde_json::Value>,
    #[serde(default)]
    detail: Option<String>,
}

impl FriendbotReply {
    fn is_error(&self) -> bool {
        matches!(&self.status, Some(serde_json::Value::String(s)) if s == "error")
    }
}

/// HTTP client for Friendbot
pub struct FriendbotClient {
    http: Client,
    url: String,
}

impl FriendbotClient {
    pub fn new(config: &FundingConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| FundingError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.friendbot_url.clone(),
        })
    }

    async fn request(&self, address: &str) -> Result<()> {
        debug!("Requesting friendbot funding for: {}", address);

        let response = self
            .http
            .get(&self.url)
            .query(&[("addr", address)])
            .send()
            .await
            .map_err(|e| FundingError::faucet(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FundingError::faucet(e.to_string()))?;

        if !status.is_success() {
            return Err(FundingError::faucet(error_message(status.as_u16(), &body)));
        }

        let reply: FriendbotReply = serde_json::from_str(&body)
            .map_err(|e| FundingError::faucet(format!("Invalid friendbot response: {}", e)))?;

        if reply.is_error() {
            return Err(FundingError::faucet(
                reply.detail.unwrap_or_else(|| GENERIC_FAUCET_ERROR.to_string()),
            ));
        }

        debug!("Friendbot funded account: {}", address);
        Ok(())
    }
}

#[async_trait]
impl FaucetService for FriendbotClient {
    async fn fund(&self, address: &str) -> Result<()> {
        self.request(address).await
    }
}

/// Message for a non-2xx reply: problem `detail`, else body text, else status.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(reply) = serde_json::from_str::<FriendbotReply>(body) {
        if let Some(detail) = reply.detail.filter(|d| !d.is_empty()) {
            return detail;
        }
    }

    let text = body.trim();
    if text.is_empty() {
        format!("HTTP error! status: {}", status)
    } else {
        text.to_string()
    }
}
