//! NFT lookup for Symbol mosaics
//!
//! An NFT is a mosaic with supply exactly "1" and divisibility 0. Name and
//! image come from mosaic metadata when present.

use futures::future::join_all;
use serde::Deserialize;

use crate::constants::query::METADATA_PAGE_SIZE;
use crate::node_api::NodeClient;
use crate::types::{MetadataEntry, MosaicInfo, Nft};

/// Interpretation of one metadata value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    /// JSON object; either field may be missing
    Json {
        name: Option<String>,
        image: Option<String>,
    },
    /// Bare image URL
    ImageUrl(String),
    Unrecognized,
}

#[derive(Deserialize)]
struct NftMetadataJson {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

const IMAGE_HINTS: [&str; 4] = [".png", ".jpg", ".gif", "ipfs"];

impl MetadataValue {
    /// Classify a hex-encoded metadata value; `None` when it is not hex or UTF-8
    pub fn decode_hex(value_hex: &str) -> Option<Self> {
        let bytes = hex::decode(value_hex.trim()).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        Some(Self::classify(&text))
    }

    pub fn classify(text: &str) -> Self {
        if let Ok(json) = serde_json::from_str::<NftMetadataJson>(text) {
            return MetadataValue::Json {
                name: json.name.filter(|s| !s.is_empty()),
                image: json.image.filter(|s| !s.is_empty()),
            };
        }
        if text.starts_with("http") && IMAGE_HINTS.iter().any(|hint| text.contains(hint)) {
            return MetadataValue::ImageUrl(text.to_string());
        }
        MetadataValue::Unrecognized
    }
}

pub fn is_nft(mosaic: &MosaicInfo) -> bool {
    mosaic.supply == "1" && mosaic.divisibility == 0
}

/// Fold metadata entries into (name, image); later entries win
pub fn name_and_image(entries: &[MetadataEntry]) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut image = None;

    for value in entries.iter().filter_map(|e| MetadataValue::decode_hex(&e.value)) {
        match value {
            MetadataValue::Json { name: n, image: i } => {
                if n.is_some() {
                    name = n;
                }
                if i.is_some() {
                    image = i;
                }
            }
            MetadataValue::ImageUrl(url) => image = Some(url),
            MetadataValue::Unrecognized => {}
        }
    }

    (name, image)
}

pub fn fallback_name(mosaic_id: &str) -> String {
    let prefix: String = mosaic_id.chars().take(8).collect();
    format!("NFT #{prefix}")
}

async fn lookup_nft(node: &NodeClient, mosaic_id: &str) -> Option<Nft> {
    let mosaic = match node.get_mosaic(mosaic_id).await {
        Ok(Some(mosaic)) => mosaic,
        Ok(None) => return None,
        Err(e) => {
            log::debug!("[nfts] Skipping mosaic {mosaic_id}: {e}");
            return None;
        }
    };
    if !is_nft(&mosaic) {
        return None;
    }

    let (name, image_url) = match node.get_mosaic_metadata(mosaic_id, METADATA_PAGE_SIZE).await {
        Ok(entries) => name_and_image(&entries),
        Err(e) => {
            log::debug!("[nfts] No metadata for {mosaic_id}: {e}");
            (None, None)
        }
    };

    Some(Nft {
        id: mosaic_id.to_string(),
        name: name.unwrap_or_else(|| fallback_name(mosaic_id)),
        image_url,
    })
}

/// NFTs held by `address`; an unknown or unreadable account holds none
///
/// Mosaics are inspected concurrently and a failing mosaic is left out
/// rather than failing the listing.
pub async fn list_owned_nfts(node: &NodeClient, address: &str) -> Vec<Nft> {
    let account = match node.get_account(address).await {
        Ok(Some(account)) => account,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("[nfts] Account lookup failed for {address}: {e}");
            return Vec::new();
        }
    };

    let lookups = account
        .mosaics
        .iter()
        .map(|mosaic| lookup_nft(node, &mosaic.id));
    let nfts: Vec<Nft> = join_all(lookups).await.into_iter().flatten().collect();

    log::info!(
        "[nfts] {} of {} mosaics held by {address} are NFTs",
        nfts.len(),
        account.mosaics.len()
    );
    nfts
}
