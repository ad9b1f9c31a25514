use serde::{Deserialize, Serialize};

// ---- Node REST responses ----------------------------------------------------

/// Page wrapper used by the node's search endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

/// One confirmed transaction from `/transactions/confirmed`
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub meta: TransactionMeta,
    pub transaction: TransactionBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionMeta {
    pub hash: String,
    /// Milliseconds since the network epoch, as a decimal string
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBody {
    pub signer_public_key: String,
    /// Hex, first byte is the message type
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub mosaics: Vec<MosaicAmount>,
}

/// Mosaic id/amount pair as the node renders it (hex id, decimal amount)
#[derive(Debug, Clone, Deserialize)]
pub struct MosaicAmount {
    #[serde(alias = "mosaicId")]
    pub id: String,
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub account: AccountInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub mosaics: Vec<MosaicAmount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MosaicResponse {
    pub mosaic: MosaicInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MosaicInfo {
    #[serde(default)]
    pub supply: String,
    #[serde(default)]
    pub divisibility: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub metadata_entry: MetadataEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataEntry {
    /// Hex-encoded value bytes
    #[serde(default)]
    pub value: String,
}

// ---- API views ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

/// A confirmed post on the channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub hash: String,
    pub signer_public_key: String,
    pub signer_address: String,
    pub message: String,
    /// ISO-8601 UTC, millisecond precision
    pub timestamp: String,
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedLike {
    pub hash: String,
    pub post_hash: String,
    /// Shortened liker public key (`ABCDEF12...`)
    pub from: String,
    /// Native currency, two decimals
    pub amount: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub address: String,
    pub posts: Vec<Post>,
    pub received_likes: Vec<ReceivedLike>,
    pub total_received_xym: String,
    pub like_count: usize,
}

/// Chain-native NFT (mosaic with supply 1, divisibility 0)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nft {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

/// NFT held on the second chain, as reported by the indexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalNft {
    pub id: String,
    pub contract_address: String,
    pub token_id: String,
    pub name: String,
    pub collection_name: String,
    pub image_url: Option<String>,
    pub chain: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalNftListing {
    pub nfts: Vec<ExternalNft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---- API request bodies -------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreAccountRequest {
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub private_key: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub private_key: Option<String>,
    pub recipient_address: Option<String>,
    pub post_hash: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftCreateRequest {
    pub private_key: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressQuery {
    pub address: Option<String>,
}
