// ============================================================================
// STELLAR-FUNDING - StrKey Addresses
// ============================================================================
// G... account ids and C... contract ids over `stellar-strkey`.
// Decode failures are validation errors: they always come from user input.
// ============================================================================

use crate::error::FundingError;
use crate::Result;
use stellar_strkey::{ed25519, Contract};

/// Encoded length of a 32-byte key
pub const STRKEY_LEN: usize = 56;

/// Encode raw Ed25519 public key bytes as a G... address
pub fn encode_account_id(key_bytes: &[u8; 32]) -> String {
    ed25519::PublicKey(*key_bytes).to_string()
}

/// Decode a G... address to raw Ed25519 public key bytes
pub fn decode_account_id(address: &str) -> Result<[u8; 32]> {
    ed25519::PublicKey::from_string(address)
        .map(|pk| pk.0)
        .map_err(|e| FundingError::validation(format!("Invalid account id {}: {:?}", address, e)))
}

/// Encode a contract hash as a C... address
pub fn encode_contract_id(hash: &[u8; 32]) -> String {
    Contract(*hash).to_string()
}

/// Decode a C... address to the raw contract hash
pub fn decode_contract_id(address: &str) -> Result<[u8; 32]> {
    Contract::from_string(address)
        .map(|c| c.0)
        .map_err(|e| FundingError::validation(format!("Invalid contract id {}: {:?}", address, e)))
}

pub fn is_valid_account_id(address: &str) -> bool {
    decode_account_id(address).is_ok()
}
