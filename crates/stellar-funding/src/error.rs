// ============================================================================
// STELLAR-FUNDING - Error Types
// ============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FundingError {
    // ==================== Input Errors ====================
    #[error("{0}")]
    Validation(String),

    // ==================== Faucet Errors ====================
    #[error("{0}")]
    Faucet(String),

    // ==================== Ledger Errors ====================
    #[error("Failed to load burner account after {attempts} attempts: {last_error}")]
    AccountUnavailable { attempts: u32, last_error: String },

    #[error("Simulation failed: {diagnostic}")]
    Simulation { diagnostic: String },

    #[error("Send failed: {raw}")]
    Submission { status: Option<String>, raw: String },

    // ==================== Transport Errors ====================
    #[error("RPC error: {0}")]
    Rpc(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    // ==================== Wrapped Errors ====================
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<FundingError>,
    },
}

/// Serializable discriminant of [`FundingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Faucet,
    AccountUnavailable,
    Simulation,
    Submission,
    Rpc,
    Internal,
}

impl FundingError {
    pub fn validation(msg: impl Into<String>) -> Self {
        FundingError::Validation(msg.into())
    }

    pub fn faucet(msg: impl Into<String>) -> Self {
        FundingError::Faucet(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FundingError::Validation(_) => ErrorKind::Validation,
            FundingError::Faucet(_) => ErrorKind::Faucet,
            FundingError::AccountUnavailable { .. } => ErrorKind::AccountUnavailable,
            FundingError::Simulation { .. } => ErrorKind::Simulation,
            FundingError::Submission { .. } => ErrorKind::Submission,
            FundingError::Rpc(_) => ErrorKind::Rpc,
            FundingError::Internal(_) => ErrorKind::Internal,
            FundingError::Context { source, .. } => source.kind(),
        }
    }

    /// Prefix the message with `context`, keeping the error kind.
    pub fn context(self, context: &str) -> Self {
        FundingError::Context {
            context: context.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<reqwest::Error> for FundingError {
    fn from(err: reqwest::Error) -> Self {
        FundingError::Rpc(err.to_string())
    }
}

impl From<serde_json::Error> for FundingError {
    fn from(err: serde_json::Error) -> Self {
        FundingError::Rpc(format!("malformed response: {}", err))
    }
}

impl From<stellar_xdr::curr::Error> for FundingError {
    fn from(err: stellar_xdr::curr::Error) -> Self {
        FundingError::Internal(format!("XDR: {}", err))
    }
}
