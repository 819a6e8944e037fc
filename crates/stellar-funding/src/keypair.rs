// ============================================================================
// STELLAR-FUNDING - Burner Keypairs
// ============================================================================
// A burner is generated fresh for every bridging attempt, funded once,
// used to sign one transfer and then dropped. Never pool or reuse them.
// ============================================================================

use crate::strkey::encode_account_id;
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use std::fmt;

pub struct BurnerAccount {
    signing_key: SigningKey,
    address: String,
}

impl BurnerAccount {
    /// Fresh random keypair from the OS RNG
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Deterministic keypair from a 32-byte seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = encode_account_id(signing_key.verifying_key().as_bytes());
        Self { signing_key, address }
    }

    /// G... address
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Last 4 bytes of the public key, used as the signature hint
    pub fn signature_hint(&self) -> [u8; 4] {
        let pk = self.public_key_bytes();
        [pk[28], pk[29], pk[30], pk[31]]
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

// Never print the secret half.
impl fmt::Debug for BurnerAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BurnerAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
