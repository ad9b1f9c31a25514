//! Symbol node REST client
//!
//! Thin wrapper over the node endpoints UNDO reads from and announces to.
//! Nothing here retries; callers decide what a failure means.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use crate::error::{Result, UndoError};
use crate::types::{
    AccountInfo, AccountResponse, MetadataEntry, MetadataRecord, MosaicInfo, MosaicResponse,
    Page, TransactionRecord,
};

/// Search filter for `/transactions/confirmed`
#[derive(Clone, Debug)]
pub struct TransactionQuery {
    pub recipient_address: String,
    pub tx_type: u16,
    pub page_size: u32,
    pub newest_first: bool,
}

#[derive(Clone, Debug)]
pub struct NodeClient {
    base_url: String,
    http: reqwest::Client,
    timeout: Duration,
}

impl NodeClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self::with_client(base_url, reqwest::Client::new(), timeout_ms)
    }

    /// Share a connection pool with other clients
    pub fn with_client(
        base_url: impl Into<String>,
        http: reqwest::Client,
        timeout_ms: u64,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("[node_api] GET {url}");
        Ok(self
            .http
            .get(&url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let response = self.get(path, query).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UndoError::upstream(format!(
                "Node error ({status}) on {path}: {body}"
            )));
        }
        let bytes = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Account holdings; `None` when the node has never seen the address
    pub async fn get_account(&self, address: &str) -> Result<Option<AccountInfo>> {
        Ok(self
            .get_json::<AccountResponse>(&format!("/accounts/{address}"), &[])
            .await?
            .map(|r| r.account))
    }

    pub async fn get_mosaic(&self, mosaic_id: &str) -> Result<Option<MosaicInfo>> {
        Ok(self
            .get_json::<MosaicResponse>(&format!("/mosaics/{mosaic_id}"), &[])
            .await?
            .map(|r| r.mosaic))
    }

    /// Metadata entries attached to a mosaic
    pub async fn get_mosaic_metadata(
        &self,
        mosaic_id: &str,
        page_size: u32,
    ) -> Result<Vec<MetadataEntry>> {
        let query = [
            ("targetId", mosaic_id.to_string()),
            (
                "metadataType",
                crate::constants::undo::MOSAIC_METADATA_TYPE.to_string(),
            ),
            ("pageSize", page_size.to_string()),
        ];
        Ok(self
            .get_json::<Page<MetadataRecord>>("/metadata", &query)
            .await?
            .map(|page| page.data.into_iter().map(|r| r.metadata_entry).collect())
            .unwrap_or_default())
    }

    pub async fn search_confirmed(&self, q: &TransactionQuery) -> Result<Vec<TransactionRecord>> {
        let mut query = vec![
            ("recipientAddress", q.recipient_address.clone()),
            ("type", q.tx_type.to_string()),
            ("pageSize", q.page_size.to_string()),
        ];
        if q.newest_first {
            query.push(("order", "desc".to_string()));
        }

        let page = self
            .get_json::<Page<TransactionRecord>>("/transactions/confirmed", &query)
            .await?
            .unwrap_or_default();
        log::debug!(
            "[node_api] {} confirmed transactions to {}",
            page.data.len(),
            q.recipient_address
        );
        Ok(page.data)
    }

    /// Announce a signed payload
    ///
    /// Any non-2xx answer becomes [`UndoError::SubmissionFailed`] with the
    /// node's body untouched.
    pub async fn announce(&self, payload_hex: &str) -> Result<Value> {
        let url = format!("{}/transactions", self.base_url);
        log::info!("[node_api] Announcing transaction ({} bytes)", payload_hex.len() / 2);

        let response = self
            .http
            .put(&url)
            .json(&json!({ "payload": payload_hex }))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::warn!("[node_api] Announce rejected ({status}): {body}");
            return Err(UndoError::SubmissionFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    pub async fn health(&self) -> Result<Value> {
        let response = self.get("/node/health", &[]).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UndoError::upstream(format!(
                "Node health check failed ({status})"
            )));
        }
        Ok(response.json().await?)
    }
}
