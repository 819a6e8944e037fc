// ============================================================================
// STELLAR-FUNDING - Testnet Funding Core
// ============================================================================
// Funds any Stellar testnet address with test lumens.
//
// Standalone accounts (G...) are funded by Friendbot directly. Contract
// accounts (C...) cannot receive Friendbot funds, so we fund a fresh burner
// account and move the lumens over with a Stellar Asset Contract transfer.
//
// Flow:
// - Classify the address
// - Friendbot for G... addresses (falls back to bridging on failure)
// - Bridging: burner -> Friendbot -> wait for ledger -> build transfer
//   -> simulate -> assemble -> sign -> submit
// ============================================================================

pub mod address;
pub mod amount;
pub mod config;
pub mod error;
pub mod friendbot;
pub mod keypair;
pub mod orchestrator;
pub mod pipeline;
pub mod poller;
pub mod rpc;
pub mod strkey;
pub mod transaction;
pub mod xdr;

pub use address::{classify, Address, AddressClass, AddressKind};
pub use amount::TransferAmount;
pub use config::FundingConfig;
pub use error::{ErrorKind, FundingError};
pub use friendbot::{FaucetService, FriendbotClient};
pub use keypair::BurnerAccount;
pub use orchestrator::{FundingOrchestrator, FundingOutcome, FundingStrategy};
pub use pipeline::{SubmissionPipeline, TransferReceipt};
pub use poller::{wait_for_account, PollPolicy};
pub use rpc::{AccountRecord, LedgerRpc, SendTransactionResponse, SimulateTransactionResponse, SorobanRpcClient};
pub use transaction::{
    AssembledTransaction, BuiltTransaction, SignedTransaction, SimulatedTransaction,
    SubmittedTransaction, TransferBuilder,
};

/// Re-export for convenience
pub type Result<T> = std::result::Result<T, FundingError>;
