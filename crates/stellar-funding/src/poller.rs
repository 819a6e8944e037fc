// ============================================================================
// STELLAR-FUNDING - Ledger Visibility Poller
// ============================================================================
// Waits for a freshly funded account to become visible to the RPC server.
// Friendbot funding lands on the ledger before Soroban RPC serves the
// account entry, so lookups are retried a fixed number of times with a
// fixed delay. No backoff: worst case is `(attempts - 1) * delay`
// plus request latency.
// ============================================================================

use crate::config::FundingConfig;
use crate::error::FundingError;
use crate::rpc::{AccountRecord, LedgerRpc};
use crate::Result;
use std::time::Duration;
use tracing::{debug, info};

/// Attempt cap and delay for [`wait_for_account`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl PollPolicy {
    pub fn from_config(config: &FundingConfig) -> Self {
        Self {
            max_attempts: config.poll_attempts.max(1),
            delay: Duration::from_millis(config.poll_delay_ms),
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(2),
        }
    }
}

/// Poll `get_account` until it succeeds or `policy.max_attempts` is spent.
pub async fn wait_for_account(
    ledger: &dyn LedgerRpc,
    address: &str,
    policy: PollPolicy,
) -> Result<AccountRecord> {
    let mut attempt = 0;

    loop {
        attempt += 1;

        match ledger.get_account(address).await {
            Ok(account) => {
                info!("Account {} visible after {} attempt(s)", address, attempt);
                return Ok(account);
            }
            Err(e) if attempt >= policy.max_attempts => {
                return Err(FundingError::AccountUnavailable {
                    attempts: attempt,
                    last_error: e.to_string(),
                });
            }
            Err(e) => {
                debug!(attempt, "Account {} not visible yet: {}", address, e);
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
