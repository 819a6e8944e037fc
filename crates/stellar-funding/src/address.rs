// ============================================================================
// STELLAR-FUNDING - Address Classification
// ============================================================================
// Decides which funding strategy an address needs:
// - G... ed25519 public keys: Friendbot can fund them directly
// - C... contract ids: Friendbot rejects them, bridging required
// ============================================================================

use crate::error::FundingError;
use crate::strkey::{is_valid_account_id, STRKEY_LEN};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

const EMPTY_ADDRESS: &str = "Please enter a Stellar address";
const INVALID_ADDRESS: &str = "Invalid Stellar address format. Please enter a valid Stellar public key (G...) or contract address (C...).";

/// Outcome of classifying raw user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressClass {
    DirectlyFundable,
    RequiresBridging,
    Invalid,
}

/// Which StrKey family a valid address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// G... standalone account
    Account,
    /// C... smart-contract account
    Contract,
}

/// Classify a Stellar address. Pure, no network access.
pub fn classify(input: &str) -> AddressClass {
    let address = input.trim();

    if address.is_empty() {
        AddressClass::Invalid
    } else if is_valid_account_id(address) {
        AddressClass::DirectlyFundable
    } else if is_contract_format(address) {
        AddressClass::RequiresBridging
    } else {
        AddressClass::Invalid
    }
}

/// `C` prefix, 56 chars, uppercase alphanumeric. The checksum is verified
/// later, when the transfer is encoded.
fn is_contract_format(address: &str) -> bool {
    address.starts_with('C')
        && address.len() == STRKEY_LEN
        && address.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// A classified, trimmed Stellar address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    value: String,
    kind: AddressKind,
}

impl Address {
    /// Trim and classify `input`
    pub fn parse(input: &str) -> Result<Self> {
        let value = input.trim();
        if value.is_empty() {
            return Err(FundingError::validation(EMPTY_ADDRESS));
        }

        let kind = match classify(value) {
            AddressClass::DirectlyFundable => AddressKind::Account,
            AddressClass::RequiresBridging => AddressKind::Contract,
            AddressClass::Invalid => return Err(FundingError::validation(INVALID_ADDRESS)),
        };

        Ok(Self {
            value: value.to_string(),
            kind,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn is_contract(&self) -> bool {
        self.kind == AddressKind::Contract
    }

    /// Abbreviated form for messages, e.g. `GABC…WXYZ`
    pub fn short(&self) -> String {
        let v = &self.value;
        if v.len() > 8 {
            format!("{}…{}", &v[..4], &v[v.len() - 4..])
        } else {
            v.clone()
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
