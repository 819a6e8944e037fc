// ============================================================================
// STELLAR-FUNDING - XDR Helpers
// ============================================================================
// Base64 transport encoding for XDR values.
// ============================================================================

use crate::Result;
use base64::{engine::general_purpose, Engine as _};
use stellar_xdr::curr::{Limits, ReadXdr, WriteXdr};

pub fn to_base64<T: WriteXdr>(value: &T) -> Result<String> {
    let bytes = value.to_xdr(Limits::none())?;
    Ok(general_purpose::STANDARD.encode(bytes))
}

pub fn from_base64<T: ReadXdr>(encoded: &str) -> Result<T> {
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| crate::FundingError::Internal(format!("Invalid base64 XDR: {}", e)))?;
    Ok(T::from_xdr(bytes, Limits::none())?)
}
