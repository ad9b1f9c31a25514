//! Polygon NFT lookup through the Alchemy NFT API (v3)

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use crate::constants::indexer::{CHAIN_NAME, MAX_RESULTS, MISSING_KEY_MESSAGE, PAGE_SIZE};
use crate::error::{Result, UndoError};
use crate::types::{ExternalNft, ExternalNftListing};

#[derive(Clone, Debug)]
pub struct AlchemyClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnedNftsResponse {
    #[serde(default)]
    owned_nfts: Vec<AlchemyNft>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlchemyNft {
    #[serde(default)]
    contract: AlchemyContract,
    #[serde(default)]
    token_id: String,
    name: Option<String>,
    image: Option<AlchemyImage>,
    raw: Option<AlchemyRaw>,
}

#[derive(Debug, Default, Deserialize)]
struct AlchemyContract {
    #[serde(default)]
    address: String,
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlchemyImage {
    cached_url: Option<String>,
    thumbnail_url: Option<String>,
    original_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AlchemyRaw {
    metadata: Option<AlchemyRawMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct AlchemyRawMetadata {
    name: Option<String>,
    image: Option<String>,
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl AlchemyNft {
    fn raw_metadata(&self) -> Option<&AlchemyRawMetadata> {
        self.raw.as_ref().and_then(|r| r.metadata.as_ref())
    }

    /// cached > thumbnail > original > raw metadata image
    fn image_url(&self) -> Option<String> {
        let image = self.image.as_ref();
        image
            .and_then(|i| non_empty(&i.cached_url))
            .or_else(|| image.and_then(|i| non_empty(&i.thumbnail_url)))
            .or_else(|| image.and_then(|i| non_empty(&i.original_url)))
            .or_else(|| self.raw_metadata().and_then(|m| non_empty(&m.image)))
    }

    fn into_view(self) -> Option<ExternalNft> {
        let image_url = self.image_url()?;
        let name = non_empty(&self.name)
            .or_else(|| self.raw_metadata().and_then(|m| non_empty(&m.name)))
            .unwrap_or_else(|| format!("#{}", self.token_id));

        Some(ExternalNft {
            id: format!("{}:{}", self.contract.address, self.token_id),
            contract_address: self.contract.address.clone(),
            token_id: self.token_id.clone(),
            name,
            collection_name: non_empty(&self.contract.name)
                .unwrap_or_else(|| "Unknown Collection".to_string()),
            image_url: Some(image_url),
            chain: CHAIN_NAME.to_string(),
        })
    }
}

/// `0x` followed by exactly 40 hex digits
pub fn is_evm_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .map(|digits| digits.len() == 40 && digits.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

impl AlchemyClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        http: reqwest::Client,
        timeout_ms: u64,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// NFTs with an image owned by `owner`, at most 20
    ///
    /// Rejects malformed addresses before any request is made. A 401/403
    /// (missing or invalid key) yields an empty listing with an explanation.
    /// The key is part of the request path, so transport errors are reported
    /// without their URL.
    pub async fn list_nfts_for_owner(&self, owner: &str) -> Result<ExternalNftListing> {
        if !is_evm_address(owner) {
            return Err(UndoError::validation("Invalid Ethereum address format"));
        }

        let url = format!("{}/nft/v3/{}/getNFTsForOwner", self.base_url, self.api_key);
        log::info!("[alchemy] Fetching Polygon NFTs for {owner}");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("owner", owner.to_string()),
                ("withMetadata", "true".to_string()),
                ("pageSize", PAGE_SIZE.to_string()),
            ])
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                UndoError::upstream(format!("Alchemy request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::warn!("[alchemy] API key rejected ({status})");
            return Ok(ExternalNftListing {
                nfts: Vec::new(),
                message: Some(MISSING_KEY_MESSAGE.to_string()),
            });
        }
        if !status.is_success() {
            return Err(UndoError::upstream(format!("Alchemy API error: {status}")));
        }

        let data: OwnedNftsResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            UndoError::upstream(format!("Failed to parse Alchemy response: {e}"))
        })?;

        let nfts: Vec<ExternalNft> = data
            .owned_nfts
            .into_iter()
            .filter_map(AlchemyNft::into_view)
            .take(MAX_RESULTS)
            .collect();

        Ok(ExternalNftListing {
            nfts,
            message: None,
        })
    }
}
