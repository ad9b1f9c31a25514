use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

use super::{address::Address, parse_hex32, to_hex_upper};
use crate::error::{Result, UndoError};

/// Ed25519 key pair (SHA-512 variant, as used by Symbol)
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    pub fn random() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Restore from a 64-digit hex private key (case-insensitive)
    pub fn from_private_key_hex(private_key_hex: &str) -> Result<Self> {
        let seed = parse_hex32(private_key_hex).ok_or(UndoError::InvalidKey)?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    pub fn private_key_hex(&self) -> String {
        to_hex_upper(self.signing_key.as_bytes())
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn public_key_hex(&self) -> String {
        to_hex_upper(&self.public_key())
    }

    pub fn address(&self, network_identifier: u8) -> Address {
        Address::from_public_key(&self.public_key(), network_identifier)
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}
