use data_encoding::BASE32;
use ripemd::Ripemd160;
use sha3::Digest;
use std::fmt;

use super::hash::sha3_256;
use crate::error::{Result, UndoError};

pub const ADDRESS_SIZE: usize = 24;

/// Encoded form is 39 base32 characters
pub const ENCODED_SIZE: usize = 39;

const CHECKSUM_SIZE: usize = 3;

/// 24-byte Symbol address: network byte, ripemd160(sha3(pubkey)), checksum
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    pub fn from_public_key(public_key: &[u8; 32], network_identifier: u8) -> Self {
        let ripemd: [u8; 20] = Ripemd160::digest(sha3_256(public_key)).into();

        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = network_identifier;
        bytes[1..21].copy_from_slice(&ripemd);
        let checksum = sha3_256(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum[..CHECKSUM_SIZE]);
        Address(bytes)
    }

    /// Address of the signer behind a hex public key as reported by the node
    pub fn from_public_key_hex(public_key_hex: &str, network_identifier: u8) -> Option<Self> {
        super::parse_hex32(public_key_hex).map(|pk| Self::from_public_key(&pk, network_identifier))
    }

    /// Parse the 39-character form (dashes allowed) and verify network and checksum
    pub fn parse(s: &str, network_identifier: u8) -> Result<Self> {
        let address = Self::decode(s)
            .ok_or_else(|| UndoError::validation(format!("Invalid address: {s}")))?;

        if address.network_identifier() != network_identifier {
            return Err(UndoError::validation(format!(
                "Address {s} belongs to another network"
            )));
        }

        Ok(address)
    }

    fn decode(s: &str) -> Option<Self> {
        let cleaned: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if cleaned.len() != ENCODED_SIZE {
            return None;
        }

        let decoded = BASE32.decode(format!("{cleaned}A").as_bytes()).ok()?;
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes.copy_from_slice(decoded.get(..ADDRESS_SIZE)?);

        let checksum = sha3_256(&bytes[..21]);
        if bytes[21..] != checksum[..CHECKSUM_SIZE] {
            return None;
        }

        Some(Address(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn network_identifier(&self) -> u8 {
        self.0[0]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut padded = [0u8; ADDRESS_SIZE + 1];
        padded[..ADDRESS_SIZE].copy_from_slice(&self.0);
        let encoded = BASE32.encode(&padded);
        f.write_str(&encoded[..ENCODED_SIZE])
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}
