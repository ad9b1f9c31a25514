//! Minimal Symbol protocol layer
//!
//! Everything UNDO needs to talk to a Symbol node without an SDK: key pairs,
//! addresses, entity hashing and the binary layout of the handful of
//! transaction kinds the service builds.

pub mod address;
pub mod hash;
pub mod keys;
pub mod message;
pub mod transaction;

pub use address::Address;
pub use keys::KeyPair;

use crate::constants::network;

/// Parameters that pin transactions and addresses to one network
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkParams {
    /// Address prefix byte, also written into every transaction header
    pub identifier: u8,
    pub generation_hash: [u8; 32],
    pub epoch_adjustment: u64,
    pub currency_mosaic_id: u64,
}

impl NetworkParams {
    pub fn testnet() -> Self {
        Self {
            identifier: network::TESTNET_IDENTIFIER,
            generation_hash: network::TESTNET_GENERATION_HASH,
            epoch_adjustment: network::TESTNET_EPOCH_ADJUSTMENT,
            currency_mosaic_id: network::TESTNET_CURRENCY_MOSAIC_ID,
        }
    }

    pub fn mainnet() -> Self {
        Self {
            identifier: network::MAINNET_IDENTIFIER,
            generation_hash: network::MAINNET_GENERATION_HASH,
            epoch_adjustment: network::MAINNET_EPOCH_ADJUSTMENT,
            currency_mosaic_id: network::MAINNET_CURRENCY_MOSAIC_ID,
        }
    }

    /// Network-relative milliseconds to Unix milliseconds
    pub fn to_unix_millis(&self, network_millis: u64) -> i64 {
        network_millis as i64 + (self.epoch_adjustment as i64) * 1000
    }

    /// Deadline for a transaction created at `now_unix_secs`
    ///
    /// `(now - epochAdjustment + 7200) * 1000`; nodes reject anything past it.
    pub fn deadline_at(&self, now_unix_secs: u64) -> u64 {
        (now_unix_secs.saturating_sub(self.epoch_adjustment)
            + crate::constants::tx::DEADLINE_WINDOW_SECS)
            * 1000
    }

    /// Deadline for a transaction created now
    pub fn deadline(&self) -> u64 {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        self.deadline_at(now)
    }
}

/// Upper-case hex, the form the node and clients use for keys, hashes and payloads
pub fn to_hex_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Parse exactly 32 bytes of hex (keys, hashes)
pub fn parse_hex32(s: &str) -> Option<[u8; 32]> {
    let mut out = [0u8; 32];
    hex::decode_to_slice(s.trim(), &mut out).ok()?;
    Some(out)
}

/// Parse a 64-bit id written as hex (mosaic ids)
pub fn parse_id_hex(s: &str) -> Option<u64> {
    u64::from_str_radix(s.trim().trim_start_matches("0x"), 16).ok()
}
