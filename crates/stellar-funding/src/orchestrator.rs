// ============================================================================
// STELLAR-FUNDING - Funding Orchestrator
// ============================================================================
// Entry point for funding an address.
//
// Strategies:
// - Direct: Friendbot funds the address itself (G... only)
// - Bridge: Friendbot funds a fresh burner, which transfers to the target
//
// A failed Direct run falls back to Bridge once. Bridge is final.
// ============================================================================

use crate::address::{Address, AddressKind};
use crate::amount::TransferAmount;
use crate::config::FundingConfig;
use crate::error::{ErrorKind, FundingError};
use crate::friendbot::{FaucetService, FriendbotClient};
use crate::keypair::BurnerAccount;
use crate::pipeline::SubmissionPipeline;
use crate::poller::{wait_for_account, PollPolicy};
use crate::rpc::{LedgerRpc, SorobanRpcClient};
use crate::transaction::TransferBuilder;
use crate::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

/// How an address gets its lumens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingStrategy {
    Direct,
    Bridge,
}

impl FundingStrategy {
    /// Initial strategy for a parsed address
    pub fn for_kind(kind: AddressKind) -> Self {
        match kind {
            AddressKind::Account => FundingStrategy::Direct,
            AddressKind::Contract => FundingStrategy::Bridge,
        }
    }

    /// Strategy to try after this one fails
    pub fn fallback(self) -> Option<Self> {
        match self {
            FundingStrategy::Direct => Some(FundingStrategy::Bridge),
            FundingStrategy::Bridge => None,
        }
    }
}

/// Final result of [`FundingOrchestrator::fund_address`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum FundingOutcome {
    Success {
        /// Bridging transfer hash; `None` when Friendbot funded directly
        tx_hash: Option<String>,
        funded_address: Address,
    },
    Failure {
        kind: ErrorKind,
        message: String,
    },
}

impl FundingOutcome {
    fn failure(error: &FundingError) -> Self {
        FundingOutcome::Failure {
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FundingOutcome::Success { .. })
    }
}

pub struct FundingOrchestrator {
    config: FundingConfig,
    faucet: Arc<dyn FaucetService>,
    ledger: Arc<dyn LedgerRpc>,
}

impl FundingOrchestrator {
    pub fn new(config: FundingConfig, faucet: Arc<dyn FaucetService>, ledger: Arc<dyn LedgerRpc>) -> Self {
        Self { config, faucet, ledger }
    }

    /// Orchestrator backed by Friendbot and Soroban RPC at `config`'s endpoints
    pub fn from_config(config: FundingConfig) -> Result<Self> {
        let faucet = Arc::new(FriendbotClient::new(&config)?);
        let ledger = Arc::new(SorobanRpcClient::new(&config)?);
        Ok(Self::new(config, faucet, ledger))
    }

    pub fn config(&self) -> &FundingConfig {
        &self.config
    }

    /// Fund `input` with test lumens. Never panics; every failure is
    /// reported in the outcome.
    pub async fn fund_address(&self, input: &str) -> FundingOutcome {
        let span = info_span!("fund_address", address = %input.trim());
        self.run(input).instrument(span).await
    }

    async fn run(&self, input: &str) -> FundingOutcome {
        let target = match Address::parse(input) {
            Ok(address) => address,
            Err(e) => return FundingOutcome::failure(&e),
        };

        let mut strategy = FundingStrategy::for_kind(target.kind());

        loop {
            info!(?strategy, "Funding {}", target.short());

            let result = match strategy {
                FundingStrategy::Direct => self.fund_direct(&target).await,
                FundingStrategy::Bridge => self.fund_via_bridge(&target).await,
            };

            match result {
                Ok(tx_hash) => {
                    return FundingOutcome::Success {
                        tx_hash,
                        funded_address: target,
                    }
                }
                Err(e) => match strategy.fallback() {
                    Some(next) => {
                        warn!("{:?} funding failed, trying {:?}: {}", strategy, next, e);
                        strategy = next;
                    }
                    None => {
                        warn!("Funding {} failed: {}", target.short(), e);
                        return FundingOutcome::failure(&e);
                    }
                },
            }
        }
    }

    async fn fund_direct(&self, target: &Address) -> Result<Option<String>> {
        self.faucet.fund(target.as_str()).await?;
        Ok(None)
    }

    async fn fund_via_bridge(&self, target: &Address) -> Result<Option<String>> {
        let burner = BurnerAccount::generate();
        info!("Bridging through burner {}", burner.address());

        self.faucet
            .fund(burner.address())
            .await
            .map_err(|e| e.context("Failed to fund burner account"))?;

        let account = wait_for_account(
            self.ledger.as_ref(),
            burner.address(),
            PollPolicy::from_config(&self.config),
        )
        .await?;

        let built = TransferBuilder::new(&self.config, &account)
            .transfer(
                burner.address(),
                target.as_str(),
                TransferAmount::from_xlm(self.config.bridge_amount_xlm),
            )
            .build()?;

        let receipt = SubmissionPipeline::new(self.ledger.as_ref())
            .submit(built, &burner, target)
            .await
            .map_err(|e| e.context("Failed to transfer funds"))?;

        Ok(Some(receipt.hash))
    }
}
