//! Binary transaction layout, signing and hashing
//!
//! All integers are little-endian. A top-level transaction is a 128-byte
//! header followed by a type-specific body; transactions embedded in an
//! aggregate use a shorter 48-byte header and are padded to 8 bytes.

use super::{
    address::{Address, ADDRESS_SIZE},
    hash::{merkle_root, sha3_256},
    keys::KeyPair,
    to_hex_upper, NetworkParams,
};
use crate::constants::tx;
use crate::error::{Result, UndoError};

pub const HEADER_SIZE: usize = 128;
pub const EMBEDDED_HEADER_SIZE: usize = 48;

/// size + reserved + signature + signer + reserved
const SIGNING_PAYLOAD_OFFSET: usize = 4 + 4 + 64 + 32 + 4;

/// Header tail (version..deadline) plus the aggregate's transactions hash
const AGGREGATE_SIGNING_PAYLOAD_SIZE: usize = 1 + 1 + 2 + 8 + 8 + 32;

const ALIGNMENT: usize = 8;

/// Mosaic definition flag bits UNDO sets
pub mod flags {
    pub const TRANSFERABLE: u8 = 0x02;
    pub const RESTRICTABLE: u8 = 0x04;
}

/// Supply change direction; only minting is ever needed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupplyChangeAction {
    Increase = 1,
}

/// Length of a variable-size field, bounded by what the node accepts
fn checked_size(len: usize, max: usize, what: &str) -> Result<u16> {
    u16::try_from(len)
        .ok()
        .filter(|_| len <= max)
        .ok_or_else(|| UndoError::validation(format!("{what} exceeds {max} bytes")))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mosaic {
    pub id: u64,
    pub amount: u64,
}

/// Signed transaction ready for announcement
#[derive(Clone, Debug)]
pub struct SignedTransaction {
    pub hash: String,
    pub payload: String,
}

/// Top-level (signed) transaction
#[derive(Clone, Debug)]
pub struct Transaction {
    pub signature: [u8; 64],
    pub signer_public_key: [u8; 32],
    pub version: u8,
    pub network: u8,
    pub tx_type: u16,
    pub fee: u64,
    pub deadline: u64,
    body: Vec<u8>,
}

impl Transaction {
    pub fn transfer(
        network: u8,
        signer_public_key: [u8; 32],
        fee: u64,
        deadline: u64,
        recipient: &Address,
        mosaics: &[Mosaic],
        message: &[u8],
    ) -> Result<Self> {
        Ok(Self {
            signature: [0u8; 64],
            signer_public_key,
            version: tx::TRANSFER_VERSION,
            network,
            tx_type: tx::TRANSFER,
            fee,
            deadline,
            body: transfer_body(recipient, mosaics, message)?,
        })
    }

    pub fn aggregate_complete(
        network: u8,
        signer_public_key: [u8; 32],
        fee: u64,
        deadline: u64,
        embedded: &[EmbeddedTransaction],
    ) -> Self {
        let transactions_hash =
            merkle_root(embedded.iter().map(EmbeddedTransaction::hash).collect());

        let mut payload = Vec::new();
        for inner in embedded {
            let bytes = inner.serialize();
            let padding = padding_size(bytes.len());
            payload.extend_from_slice(&bytes);
            payload.resize(payload.len() + padding, 0);
        }

        let mut body = Vec::with_capacity(32 + 8 + payload.len());
        body.extend_from_slice(&transactions_hash);
        body.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        body.extend_from_slice(&0u32.to_le_bytes());
        body.extend_from_slice(&payload);

        Self {
            signature: [0u8; 64],
            signer_public_key,
            version: tx::AGGREGATE_COMPLETE_VERSION,
            network,
            tx_type: tx::AGGREGATE_COMPLETE,
            fee,
            deadline,
            body,
        }
    }

    pub fn size(&self) -> usize {
        HEADER_SIZE + self.body.len()
    }

    pub fn is_aggregate(&self) -> bool {
        self.tx_type == tx::AGGREGATE_COMPLETE
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        out.extend_from_slice(&(self.size() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.signer_public_key);
        out.extend_from_slice(&0u32.to_le_bytes());
        out.push(self.version);
        out.push(self.network);
        out.extend_from_slice(&self.tx_type.to_le_bytes());
        out.extend_from_slice(&self.fee.to_le_bytes());
        out.extend_from_slice(&self.deadline.to_le_bytes());
        out.extend_from_slice(&self.body);
        out
    }

    /// Bytes covered by the signature (after the generation hash seed)
    ///
    /// Aggregates only sign their header tail and transactions hash; the
    /// embedded transactions are bound through that hash.
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = self.serialize().split_off(SIGNING_PAYLOAD_OFFSET);
        if self.is_aggregate() {
            payload.truncate(AGGREGATE_SIGNING_PAYLOAD_SIZE);
        }
        payload
    }

    pub fn sign(&mut self, key_pair: &KeyPair, generation_hash: &[u8; 32]) {
        let mut data = generation_hash.to_vec();
        data.extend_from_slice(&self.signing_payload());
        self.signature = key_pair.sign(&data);
    }

    /// Entity hash the node assigns on acceptance
    pub fn hash(&self, generation_hash: &[u8; 32]) -> [u8; 32] {
        let mut data = Vec::with_capacity(64 + 32 + 32 + self.body.len() + 20);
        data.extend_from_slice(&self.signature);
        data.extend_from_slice(&self.signer_public_key);
        data.extend_from_slice(generation_hash);
        data.extend_from_slice(&self.signing_payload());
        sha3_256(&data)
    }

    /// Sign with `key_pair` and produce the announceable form
    pub fn sign_into(mut self, key_pair: &KeyPair, params: &NetworkParams) -> SignedTransaction {
        self.sign(key_pair, &params.generation_hash);
        SignedTransaction {
            hash: to_hex_upper(&self.hash(&params.generation_hash)),
            payload: to_hex_upper(&self.serialize()),
        }
    }
}

/// Transaction embedded in an aggregate (no signature, fee or deadline)
#[derive(Clone, Debug)]
pub struct EmbeddedTransaction {
    pub signer_public_key: [u8; 32],
    pub version: u8,
    pub network: u8,
    pub tx_type: u16,
    body: Vec<u8>,
}

impl EmbeddedTransaction {
    pub fn mosaic_definition(
        network: u8,
        signer_public_key: [u8; 32],
        mosaic_id: u64,
        duration: u64,
        nonce: u32,
        flags: u8,
        divisibility: u8,
    ) -> Self {
        let mut body = Vec::with_capacity(22);
        body.extend_from_slice(&mosaic_id.to_le_bytes());
        body.extend_from_slice(&duration.to_le_bytes());
        body.extend_from_slice(&nonce.to_le_bytes());
        body.push(flags);
        body.push(divisibility);

        Self {
            signer_public_key,
            version: tx::MOSAIC_DEFINITION_VERSION,
            network,
            tx_type: tx::MOSAIC_DEFINITION,
            body,
        }
    }

    pub fn mosaic_supply_change(
        network: u8,
        signer_public_key: [u8; 32],
        mosaic_id: u64,
        delta: u64,
        action: SupplyChangeAction,
    ) -> Self {
        let mut body = Vec::with_capacity(17);
        body.extend_from_slice(&mosaic_id.to_le_bytes());
        body.extend_from_slice(&delta.to_le_bytes());
        body.push(action as u8);

        Self {
            signer_public_key,
            version: tx::MOSAIC_SUPPLY_CHANGE_VERSION,
            network,
            tx_type: tx::MOSAIC_SUPPLY_CHANGE,
            body,
        }
    }

    /// Attach `value` to a mosaic; `value_size_delta` equals the full length
    /// for a key that holds no value yet
    pub fn mosaic_metadata(
        network: u8,
        signer_public_key: [u8; 32],
        target_address: &Address,
        scoped_metadata_key: u64,
        target_mosaic_id: u64,
        value: &[u8],
    ) -> Result<Self> {
        let value_size = checked_size(value.len(), tx::MAX_METADATA_VALUE_SIZE, "Metadata value")?;
        let value_size_delta = i16::try_from(value_size)
            .map_err(|_| UndoError::validation("Metadata value too large"))?;

        let mut body = Vec::with_capacity(ADDRESS_SIZE + 20 + value.len());
        body.extend_from_slice(target_address.as_bytes());
        body.extend_from_slice(&scoped_metadata_key.to_le_bytes());
        body.extend_from_slice(&target_mosaic_id.to_le_bytes());
        body.extend_from_slice(&value_size_delta.to_le_bytes());
        body.extend_from_slice(&value_size.to_le_bytes());
        body.extend_from_slice(value);

        Ok(Self {
            signer_public_key,
            version: tx::MOSAIC_METADATA_VERSION,
            network,
            tx_type: tx::MOSAIC_METADATA,
            body,
        })
    }

    pub fn size(&self) -> usize {
        EMBEDDED_HEADER_SIZE + self.body.len()
    }

    /// Unpadded bytes
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        out.extend_from_slice(&(self.size() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&self.signer_public_key);
        out.extend_from_slice(&0u32.to_le_bytes());
        out.push(self.version);
        out.push(self.network);
        out.extend_from_slice(&self.tx_type.to_le_bytes());
        out.extend_from_slice(&self.body);
        out
    }

    pub fn hash(&self) -> [u8; 32] {
        sha3_256(&self.serialize())
    }
}

/// Mosaic id derived from its owner and a nonce (namespace bit cleared)
pub fn generate_mosaic_id(owner: &Address, nonce: u32) -> u64 {
    let mut data = nonce.to_le_bytes().to_vec();
    data.extend_from_slice(owner.as_bytes());
    let digest = sha3_256(&data);

    let mut id = [0u8; 8];
    id.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(id) & 0x7FFF_FFFF_FFFF_FFFF
}

fn transfer_body(recipient: &Address, mosaics: &[Mosaic], message: &[u8]) -> Result<Vec<u8>> {
    let message_size = checked_size(message.len(), tx::MAX_MESSAGE_SIZE, "Message")?;
    let mosaic_count =
        u8::try_from(mosaics.len()).map_err(|_| UndoError::validation("Too many mosaics"))?;
    let mut sorted = mosaics.to_vec();
    sorted.sort_by_key(|m| m.id);

    let mut body = Vec::with_capacity(ADDRESS_SIZE + 8 + sorted.len() * 16 + message.len());
    body.extend_from_slice(recipient.as_bytes());
    body.extend_from_slice(&message_size.to_le_bytes());
    body.push(mosaic_count);
    body.extend_from_slice(&0u32.to_le_bytes());
    body.push(0);
    for mosaic in &sorted {
        body.extend_from_slice(&mosaic.id.to_le_bytes());
        body.extend_from_slice(&mosaic.amount.to_le_bytes());
    }
    body.extend_from_slice(message);
    Ok(body)
}

fn padding_size(size: usize) -> usize {
    (ALIGNMENT - size % ALIGNMENT) % ALIGNMENT
}
