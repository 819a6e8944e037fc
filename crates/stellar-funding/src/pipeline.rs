// ============================================================================
// STELLAR-FUNDING - Submission Pipeline
// ============================================================================
// Drives a built transfer through the network-facing stages:
//   simulate -> assemble -> sign -> submit
// Any failure stops the pipeline; nothing is signed or sent after a
// failed simulation.
// ============================================================================

use crate::address::Address;
use crate::error::FundingError;
use crate::keypair::BurnerAccount;
use crate::rpc::LedgerRpc;
use crate::transaction::BuiltTransaction;
use crate::Result;
use serde::Serialize;
use tracing::{debug, info};

/// Accepted transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    /// Hex transaction hash
    pub hash: String,
    pub target_address: Address,
}

pub struct SubmissionPipeline<'a> {
    ledger: &'a dyn LedgerRpc,
}

impl<'a> SubmissionPipeline<'a> {
    pub fn new(ledger: &'a dyn LedgerRpc) -> Self {
        Self { ledger }
    }

    /// Simulate, assemble, sign with `signer` and submit.
    pub async fn submit(
        &self,
        built: BuiltTransaction,
        signer: &BurnerAccount,
        target: &Address,
    ) -> Result<TransferReceipt> {
        let simulation = self
            .ledger
            .simulate_transaction(&built.envelope())
            .await
            .map_err(|e| FundingError::Simulation { diagnostic: e.to_string() })?;

        let simulated = built.simulated(&simulation)?;
        debug!("Simulation ok, resource fee {}", simulated.min_resource_fee());

        let signed = simulated.assemble()?.sign(signer)?;
        debug!("Signed transaction {}", signed.hash());

        let response = self
            .ledger
            .send_transaction(signed.envelope())
            .await
            .map_err(|e| FundingError::Submission {
                status: None,
                raw: e.to_string(),
            })?;

        let submitted = signed.submitted(response)?;
        info!("Transfer {} accepted for {}", submitted.hash(), target.short());

        Ok(TransferReceipt {
            hash: submitted.hash().to_string(),
            target_address: target.clone(),
        })
    }
}
