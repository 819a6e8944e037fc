//! Integration Tests: Direct Funding Flow
//!
//! - Friendbot funds G... addresses without touching the ledger
//! - A Friendbot failure falls back to bridging for the same address

use super::mocks::{orchestrator, MockFaucet, MockLedger, ACCOUNT, TX_HASH};
use std::sync::Arc;
use stellar_funding::transaction::{invoke_contract_args, sc_address};
use stellar_funding::{ErrorKind, FundingOutcome};
use stellar_xdr::curr::ScVal;

/// Test: G address funded directly, no transaction hash
#[tokio::test(start_paused = true)]
async fn test_direct_funding_success() {
    let faucet = Arc::new(MockFaucet::ok());
    let ledger = Arc::new(MockLedger::new());

    let outcome = orchestrator(&faucet, &ledger).fund_address(ACCOUNT).await;

    match outcome {
        FundingOutcome::Success { tx_hash, funded_address } => {
            assert_eq!(tx_hash, None);
            assert_eq!(funded_address.as_str(), ACCOUNT);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(faucet.calls(), vec![ACCOUNT.to_string()]);
    assert!(ledger.account_calls().is_empty());
    assert!(ledger.sent().is_empty());
}

/// Test: surrounding whitespace is ignored
#[tokio::test(start_paused = true)]
async fn test_direct_funding_trims_input() {
    let faucet = Arc::new(MockFaucet::ok());
    let ledger = Arc::new(MockLedger::new());

    let outcome = orchestrator(&faucet, &ledger)
        .fund_address(&format!("  {}\n", ACCOUNT))
        .await;

    assert!(outcome.is_success());
    assert_eq!(faucet.calls(), vec![ACCOUNT.to_string()]);
}

/// Test: Friendbot refuses the target, bridging funds it instead
#[tokio::test(start_paused = true)]
async fn test_direct_failure_falls_back_to_bridge() {
    let faucet = Arc::new(MockFaucet::refusing(ACCOUNT, "account already funded"));
    let ledger = Arc::new(MockLedger::new());

    let outcome = orchestrator(&faucet, &ledger).fund_address(ACCOUNT).await;

    // ==================== Step 1: target tried first ====================
    let calls = faucet.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], ACCOUNT);
    let burner = calls[1].clone();
    assert_ne!(burner, ACCOUNT);
    assert!(burner.starts_with('G'));

    // ==================== Step 2: transfer targets the G address ====================
    let simulated = ledger.simulated();
    assert_eq!(simulated.len(), 1);
    let args = invoke_contract_args(&simulated[0]).unwrap();
    assert_eq!(args.args[0], ScVal::Address(sc_address(&burner).unwrap()));
    assert_eq!(args.args[1], ScVal::Address(sc_address(ACCOUNT).unwrap()));

    // ==================== Step 3: bridging result is final ====================
    match outcome {
        FundingOutcome::Success { tx_hash, funded_address } => {
            assert_eq!(tx_hash.as_deref(), Some(TX_HASH));
            assert_eq!(funded_address.as_str(), ACCOUNT);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

/// Test: when bridging also fails, its error replaces the direct one
#[tokio::test(start_paused = true)]
async fn test_fallback_error_supersedes_direct_error() {
    let faucet = Arc::new(MockFaucet::failing("rate limited"));
    let ledger = Arc::new(MockLedger::new());

    let outcome = orchestrator(&faucet, &ledger).fund_address(ACCOUNT).await;

    assert_eq!(faucet.calls().len(), 2);
    match outcome {
        FundingOutcome::Failure { kind, message } => {
            assert_eq!(kind, ErrorKind::Faucet);
            assert_eq!(message, "Failed to fund burner account: rate limited");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(ledger.account_calls().is_empty());
}
