//! Scripted faucet and ledger doubles with call recording.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use stellar_funding::xdr::to_base64;
use stellar_funding::{
    AccountRecord, FaucetService, FundingConfig, FundingError, FundingOrchestrator, LedgerRpc,
    Result, SendTransactionResponse, SimulateTransactionResponse,
};
use stellar_xdr::curr::{
    ExtensionPoint, LedgerFootprint, SorobanResources, SorobanTransactionData,
    TransactionEnvelope, VecM,
};
use tokio::time::Instant;

pub const ACCOUNT: &str = "GAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7";
pub const CONTRACT: &str = "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC";
pub const TX_HASH: &str = "3389e9f0f1a65f19736cacf544c2e825313e8447f569233bb8db39aa607c8889";
pub const RESOURCE_FEE: i64 = 58_181;

// ============================================================================
// FAUCET
// ============================================================================

pub struct MockFaucet {
    /// Addresses the faucet refuses; `None` refuses everything
    refused: Option<Vec<String>>,
    error: String,
    calls: Mutex<Vec<String>>,
}

impl MockFaucet {
    pub fn ok() -> Self {
        Self {
            refused: Some(Vec::new()),
            error: String::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn refusing(address: &str, error: &str) -> Self {
        Self {
            refused: Some(vec![address.to_string()]),
            error: error.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            refused: None,
            error: error.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FaucetService for MockFaucet {
    async fn fund(&self, address: &str) -> Result<()> {
        self.calls.lock().unwrap().push(address.to_string());

        let refused = match &self.refused {
            Some(list) => list.iter().any(|a| a == address),
            None => true,
        };
        if refused {
            Err(FundingError::faucet(self.error.clone()))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// LEDGER
// ============================================================================

pub struct MockLedger {
    /// Account becomes visible on this `get_account` attempt
    visible_on: Option<u32>,
    simulation: SimulateTransactionResponse,
    send_status: String,
    account_calls: Mutex<Vec<Instant>>,
    simulated: Mutex<Vec<TransactionEnvelope>>,
    sent: Mutex<Vec<TransactionEnvelope>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            visible_on: Some(1),
            simulation: successful_simulation(),
            send_status: "PENDING".to_string(),
            account_calls: Mutex::new(Vec::new()),
            simulated: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn visible_on(mut self, attempt: Option<u32>) -> Self {
        self.visible_on = attempt;
        self
    }

    pub fn simulation(mut self, simulation: SimulateTransactionResponse) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn send_status(mut self, status: &str) -> Self {
        self.send_status = status.to_string();
        self
    }

    pub fn account_calls(&self) -> Vec<Instant> {
        self.account_calls.lock().unwrap().clone()
    }

    pub fn simulated(&self) -> Vec<TransactionEnvelope> {
        self.simulated.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<TransactionEnvelope> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn get_account(&self, address: &str) -> Result<AccountRecord> {
        let attempt = {
            let mut calls = self.account_calls.lock().unwrap();
            calls.push(Instant::now());
            calls.len() as u32
        };

        match self.visible_on {
            Some(n) if attempt >= n => Ok(AccountRecord {
                account_id: address.to_string(),
                sequence: 4_294_967_296,
            }),
            _ => Err(FundingError::Rpc(format!("Account not found: {}", address))),
        }
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateTransactionResponse> {
        self.simulated.lock().unwrap().push(envelope.clone());
        Ok(self.simulation.clone())
    }

    async fn send_transaction(&self, envelope: &TransactionEnvelope) -> Result<SendTransactionResponse> {
        self.sent.lock().unwrap().push(envelope.clone());
        Ok(SendTransactionResponse {
            status: self.send_status.clone(),
            hash: TX_HASH.to_string(),
            latest_ledger: 1_000,
            latest_ledger_close_time: Some("1700000000".to_string()),
            error_result_xdr: (self.send_status != "PENDING")
                .then(|| "AAAAAAAAAGT////7AAAAAA==".to_string()),
            diagnostic_events_xdr: None,
        })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn successful_simulation() -> SimulateTransactionResponse {
    let data = SorobanTransactionData {
        ext: ExtensionPoint::V0,
        resources: SorobanResources {
            footprint: LedgerFootprint {
                read_only: VecM::default(),
                read_write: VecM::default(),
            },
            instructions: 2_500_000,
            read_bytes: 1_200,
            write_bytes: 400,
        },
        resource_fee: RESOURCE_FEE,
    };

    SimulateTransactionResponse {
        transaction_data: Some(to_base64(&data).unwrap()),
        min_resource_fee: Some(RESOURCE_FEE.to_string()),
        latest_ledger: 999,
        ..Default::default()
    }
}

pub fn failed_simulation() -> SimulateTransactionResponse {
    SimulateTransactionResponse {
        error: Some("HostError: Error(Contract, #10)".to_string()),
        events: vec!["AAAAAQAAAAAAAAAA".to_string()],
        latest_ledger: 999,
        ..Default::default()
    }
}

pub fn orchestrator(faucet: &Arc<MockFaucet>, ledger: &Arc<MockLedger>) -> FundingOrchestrator {
    FundingOrchestrator::new(FundingConfig::testnet(), faucet.clone(), ledger.clone())
}
