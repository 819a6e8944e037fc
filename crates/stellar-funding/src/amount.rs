// ============================================================================
// STELLAR-FUNDING - Transfer Amount
// ============================================================================
// Exact stroop amounts and their `i128` wire form.
// Soroban token amounts are `i128`, carried on the wire as
// `Int128Parts { hi: i64, lo: u64 }` with `hi = value >> 64` and
// `lo = value & (2^64 - 1)`.
// ============================================================================

use crate::config::STROOPS_PER_XLM;
use crate::error::FundingError;
use crate::Result;
use serde::{Deserialize, Serialize};
use stellar_xdr::curr::{Int128Parts, ScVal};

/// Non-negative amount in stroops
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransferAmount(i128);

impl TransferAmount {
    pub fn from_stroops(stroops: i128) -> Result<Self> {
        if stroops < 0 {
            return Err(FundingError::validation(format!(
                "Amount must be non-negative, got {}",
                stroops
            )));
        }
        Ok(Self(stroops))
    }

    /// Whole lumens to stroops. Cannot overflow: u64::MAX * 10^7 < i128::MAX.
    pub fn from_xlm(xlm: u64) -> Self {
        Self(xlm as i128 * STROOPS_PER_XLM)
    }

    pub fn stroops(&self) -> i128 {
        self.0
    }

    /// Split into the high (signed) and low (unsigned) 64-bit words.
    pub fn to_parts(&self) -> Int128Parts {
        Int128Parts {
            hi: (self.0 >> 64) as i64,
            lo: (self.0 & u64::MAX as i128) as u64,
        }
    }

    /// Recompose from wire words. Negative values are rejected.
    pub fn from_parts(parts: &Int128Parts) -> Result<Self> {
        let value = ((parts.hi as i128) << 64) | parts.lo as i128;
        Self::from_stroops(value)
    }

    pub fn to_sc_val(&self) -> ScVal {
        ScVal::I128(self.to_parts())
    }
}
