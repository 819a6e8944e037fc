// ============================================================================
// STELLAR-FUNDING - Soroban RPC Client
// ============================================================================
// JSON-RPC 2.0 client for the Soroban RPC endpoints we need:
// - getLedgerEntries  (account lookup)
// - simulateTransaction
// - sendTransaction
// ============================================================================

use crate::config::FundingConfig;
use crate::error::FundingError;
use crate::strkey::decode_account_id;
use crate::xdr::{from_base64, to_base64};
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use stellar_xdr::curr::{
    AccountId, LedgerEntryData, LedgerKey, LedgerKeyAccount, PublicKey, TransactionEnvelope,
    Uint256,
};
use tracing::debug;

// ============================================================================
// DATA TYPES
// ============================================================================

/// On-ledger account state needed to build a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account public key (G... address)
    pub account_id: String,

    /// Current sequence number
    pub sequence: i64,
}

/// `simulateTransaction` result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTransactionResponse {
    /// Present when the host function failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// base64 `SorobanTransactionData`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_data: Option<String>,

    /// Resource fee in stroops, as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_resource_fee: Option<String>,

    #[serde(default)]
    pub results: Vec<SimulateHostFunctionResult>,

    /// base64 `DiagnosticEvent`s
    #[serde(default)]
    pub events: Vec<String>,

    #[serde(default)]
    pub latest_ledger: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulateHostFunctionResult {
    /// base64 `SorobanAuthorizationEntry`s
    #[serde(default)]
    pub auth: Vec<String>,

    /// base64 `ScVal` return value
    #[serde(default)]
    pub xdr: String,
}

/// `sendTransaction` result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionResponse {
    /// PENDING, DUPLICATE, TRY_AGAIN_LATER or ERROR
    pub status: String,

    pub hash: String,

    #[serde(default)]
    pub latest_ledger: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_ledger_close_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_result_xdr: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_events_xdr: Option<Vec<String>>,
}

impl SendTransactionResponse {
    pub fn is_pending(&self) -> bool {
        self.status == "PENDING"
    }
}

// ============================================================================
// LEDGER SERVICE TRAIT
// ============================================================================

/// Ledger-side services consumed by the funding flow.
///
/// Implementations perform one request per call and never retry.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Errors while the account is not yet visible
    async fn get_account(&self, address: &str) -> Result<AccountRecord>;

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateTransactionResponse>;

    async fn send_transaction(&self, envelope: &TransactionEnvelope) -> Result<SendTransactionResponse>;
}

// ============================================================================
// JSON-RPC WIRE TYPES
// ============================================================================

#[derive(Serialize)]
struct RpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Serialize)]
struct TransactionParams {
    transaction: String,
}

#[derive(Serialize)]
struct LedgerEntriesParams {
    keys: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerEntriesResult {
    #[serde(default)]
    entries: Option<Vec<LedgerEntryResult>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerEntryResult {
    /// base64 `LedgerEntryData`
    xdr: String,
}

// ============================================================================
// SOROBAN RPC CLIENT
// ============================================================================

/// Client for a Soroban RPC server
pub struct SorobanRpcClient {
    http: Client,
    url: String,
    next_id: AtomicU64,
}

impl SorobanRpcClient {
    pub fn new(config: &FundingConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| FundingError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.rpc_url.clone(),
            next_id: AtomicU64::new(1),
        })
    }

    async fn call<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize + Send,
        R: DeserializeOwned + Send,
    {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!("Soroban RPC call: {}", method);

        let response = self.http.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FundingError::Rpc(format!(
                "{} HTTP {}: {}",
                method,
                status.as_u16(),
                error_text
            )));
        }

        let body: RpcResponse<R> = response.json().await?;

        if let Some(error) = body.error {
            return Err(FundingError::Rpc(format!(
                "{} failed ({}): {}",
                method, error.code, error.message
            )));
        }

        body.result
            .ok_or_else(|| FundingError::Rpc(format!("{} returned no result", method)))
    }
}

/// Ledger key for an account's entry
pub fn account_ledger_key(address: &str) -> Result<LedgerKey> {
    let key = decode_account_id(address)?;
    Ok(LedgerKey::Account(LedgerKeyAccount {
        account_id: AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(key))),
    }))
}

fn parse_account_entry(address: &str, entry_xdr: &str) -> Result<AccountRecord> {
    match from_base64::<LedgerEntryData>(entry_xdr)? {
        LedgerEntryData::Account(account) => Ok(AccountRecord {
            account_id: address.to_string(),
            sequence: account.seq_num.0,
        }),
        _ => Err(FundingError::Rpc(format!(
            "Ledger entry for {} is not an account",
            address
        ))),
    }
}

#[async_trait]
impl LedgerRpc for SorobanRpcClient {
    async fn get_account(&self, address: &str) -> Result<AccountRecord> {
        let key = to_base64(&account_ledger_key(address)?)?;

        let result: LedgerEntriesResult = self
            .call("getLedgerEntries", LedgerEntriesParams { keys: vec![key] })
            .await?;

        let entry = result
            .entries
            .and_then(|entries| entries.into_iter().next())
            .ok_or_else(|| FundingError::Rpc(format!("Account not found: {}", address)))?;

        parse_account_entry(address, &entry.xdr)
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateTransactionResponse> {
        let transaction = to_base64(envelope)?;
        self.call("simulateTransaction", TransactionParams { transaction })
            .await
    }

    async fn send_transaction(&self, envelope: &TransactionEnvelope) -> Result<SendTransactionResponse> {
        let transaction = to_base64(envelope)?;
        self.call("sendTransaction", TransactionParams { transaction })
            .await
    }
}
