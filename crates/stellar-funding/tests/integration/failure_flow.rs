//! Integration Tests: Failure Paths
//!
//! Each failure surfaces as a `FundingOutcome::Failure` with its own kind,
//! and no later stage runs after the failing one.

use super::mocks::{
    failed_simulation, orchestrator, MockFaucet, MockLedger, ACCOUNT, CONTRACT,
};
use std::sync::Arc;
use std::time::Duration;
use stellar_funding::{ErrorKind, FundingOutcome};
use tokio::time::Instant;

fn expect_failure(outcome: FundingOutcome) -> (ErrorKind, String) {
    match outcome {
        FundingOutcome::Failure { kind, message } => (kind, message),
        other => panic!("expected failure, got {:?}", other),
    }
}

/// Test: invalid input never reaches the network
#[tokio::test]
async fn test_invalid_addresses() {
    let faucet = Arc::new(MockFaucet::ok());
    let ledger = Arc::new(MockLedger::new());
    let orchestrator = orchestrator(&faucet, &ledger);

    let (kind, message) = expect_failure(orchestrator.fund_address("   ").await);
    assert_eq!(kind, ErrorKind::Validation);
    assert_eq!(message, "Please enter a Stellar address");

    for input in ["not-an-address", "MAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7", &CONTRACT[..55]] {
        let (kind, message) = expect_failure(orchestrator.fund_address(input).await);
        assert_eq!(kind, ErrorKind::Validation);
        assert!(message.starts_with("Invalid Stellar address format"));
    }

    assert!(faucet.calls().is_empty());
    assert!(ledger.account_calls().is_empty());
}

/// Test: burner never visible, gives up after 10 attempts and 18s of waiting
#[tokio::test(start_paused = true)]
async fn test_burner_never_visible() {
    let faucet = Arc::new(MockFaucet::ok());
    let ledger = Arc::new(MockLedger::new().visible_on(None));
    let start = Instant::now();

    let outcome = orchestrator(&faucet, &ledger).fund_address(CONTRACT).await;

    let (kind, message) = expect_failure(outcome);
    assert_eq!(kind, ErrorKind::AccountUnavailable);
    assert!(message.contains("after 10 attempts"));
    assert_eq!(ledger.account_calls().len(), 10);
    assert!(start.elapsed() >= Duration::from_secs(18));
    assert!(ledger.simulated().is_empty());
    assert!(ledger.sent().is_empty());
}

/// Test: simulation error stops before signing and submission
#[tokio::test(start_paused = true)]
async fn test_simulation_error_skips_submit() {
    let faucet = Arc::new(MockFaucet::ok());
    let ledger = Arc::new(MockLedger::new().simulation(failed_simulation()));

    let outcome = orchestrator(&faucet, &ledger).fund_address(CONTRACT).await;

    let (kind, message) = expect_failure(outcome);
    assert_eq!(kind, ErrorKind::Simulation);
    assert!(message.starts_with("Failed to transfer funds: Simulation failed: "));
    assert!(message.contains("HostError: Error(Contract, #10)"));
    assert_eq!(ledger.simulated().len(), 1);
    assert!(ledger.sent().is_empty());
}

/// Test: non-PENDING status fails with the raw response
#[tokio::test(start_paused = true)]
async fn test_submission_rejected() {
    let faucet = Arc::new(MockFaucet::ok());
    let ledger = Arc::new(MockLedger::new().send_status("FAILED"));

    let outcome = orchestrator(&faucet, &ledger).fund_address(CONTRACT).await;

    let (kind, message) = expect_failure(outcome);
    assert_eq!(kind, ErrorKind::Submission);
    assert!(message.contains("\"status\":\"FAILED\""));
    assert!(message.contains("errorResultXdr"));
    assert_eq!(ledger.sent().len(), 1);
}

/// Test: a contract address with a bad checksum fails when the transfer is built
#[tokio::test(start_paused = true)]
async fn test_contract_checksum_checked_at_build() {
    let faucet = Arc::new(MockFaucet::ok());
    let ledger = Arc::new(MockLedger::new());

    // Valid shape, last character altered
    let mut bad = CONTRACT[..55].to_string();
    bad.push(if CONTRACT.ends_with('A') { 'B' } else { 'A' });

    let (kind, _) = expect_failure(orchestrator(&faucet, &ledger).fund_address(&bad).await);
    assert_eq!(kind, ErrorKind::Validation);
    assert_eq!(faucet.calls().len(), 1);
    assert!(ledger.simulated().is_empty());
}

/// Test: bridging failures for a G address are not retried again
#[tokio::test(start_paused = true)]
async fn test_single_fallback_for_accounts() {
    let faucet = Arc::new(MockFaucet::refusing(ACCOUNT, "bad request"));
    let ledger = Arc::new(MockLedger::new().simulation(failed_simulation()));

    let outcome = orchestrator(&faucet, &ledger).fund_address(ACCOUNT).await;

    let (kind, _) = expect_failure(outcome);
    assert_eq!(kind, ErrorKind::Simulation);
    assert_eq!(faucet.calls().len(), 2);
    assert_eq!(ledger.simulated().len(), 1);
}
