//! Feed aggregation: channel posts, like counts and user profiles
//!
//! Posts are transfers to the channel address whose plain-text message is
//! non-empty. Likes are transfers to a post's author with message
//! `LIKE:<postHash>`; they are found by scanning each author's inbox.

use chrono::{DateTime, SecondsFormat};
use futures::future::join_all;
use std::collections::{HashMap, HashSet};

use crate::account::{format_currency, mosaic_amount};
use crate::config::Config;
use crate::constants::{query, tx, undo};
use crate::error::Result;
use crate::node_api::{NodeClient, TransactionQuery};
use crate::symbol::{
    message::{decode_message_hex, parse_like},
    Address, NetworkParams,
};
use crate::types::{Post, ReceivedLike, TransactionRecord, UserProfile};

/// Node timestamp (ms since network epoch, decimal string) to ISO-8601 UTC
///
/// A missing or unparseable timestamp yields an empty string.
pub fn to_iso_timestamp(node_timestamp: Option<&str>, params: &NetworkParams) -> String {
    let Some(network_millis) = node_timestamp.and_then(|ts| ts.trim().parse::<u64>().ok()) else {
        return String::new();
    };
    DateTime::from_timestamp_millis(params.to_unix_millis(network_millis))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

fn record_message(record: &TransactionRecord) -> String {
    record
        .transaction
        .message
        .as_deref()
        .map(decode_message_hex)
        .unwrap_or_default()
}

/// Turn confirmed transfers into posts, dropping anything without plain text
///
/// Node order is kept.
pub fn posts_from_records(records: &[TransactionRecord], params: &NetworkParams) -> Vec<Post> {
    records
        .iter()
        .filter_map(|record| {
            let message = record_message(record);
            if message.is_empty() {
                return None;
            }

            let signer_public_key = record.transaction.signer_public_key.clone();
            let signer_address =
                Address::from_public_key_hex(&signer_public_key, params.identifier)
                    .map(|a| a.to_string())
                    .unwrap_or_default();

            Some(Post {
                hash: record.meta.hash.clone(),
                signer_public_key,
                signer_address,
                message,
                timestamp: to_iso_timestamp(record.meta.timestamp.as_deref(), params),
                likes: 0,
            })
        })
        .collect()
}

fn inbox_query(address: &str, page_size: u32, newest_first: bool) -> TransactionQuery {
    TransactionQuery {
        recipient_address: address.to_string(),
        tx_type: tx::TRANSFER,
        page_size,
        newest_first,
    }
}

/// Newest channel posts, without like counts
pub async fn list_channel_posts(node: &NodeClient, config: &Config) -> Result<Vec<Post>> {
    let records = node
        .search_confirmed(&inbox_query(
            &config.channel_address.to_string(),
            config.feed_page_size.min(query::MAX_PAGE_SIZE),
            true,
        ))
        .await?;

    let posts = posts_from_records(&records, &config.network);
    log::info!(
        "[feed] {} posts from {} channel transactions",
        posts.len(),
        records.len()
    );
    Ok(posts)
}

/// Likes per post hash found in one author's inbox
///
/// A transaction hash is only counted once even if the page repeats it.
pub fn count_likes(records: &[TransactionRecord]) -> HashMap<String, u64> {
    let mut seen = HashSet::new();
    let mut counts = HashMap::new();

    for record in records {
        if !seen.insert(record.meta.hash.as_str()) {
            continue;
        }
        let message = record_message(record);
        if let Some(post_hash) = parse_like(&message) {
            *counts.entry(post_hash.to_string()).or_insert(0) += 1;
        }
    }

    counts
}

/// Sum per-author like maps
pub fn merge_like_counts<I>(maps: I) -> HashMap<String, u64>
where
    I: IntoIterator<Item = HashMap<String, u64>>,
{
    let mut merged = HashMap::new();
    for map in maps {
        for (hash, count) in map {
            *merged.entry(hash).or_insert(0) += count;
        }
    }
    merged
}

/// Distinct author addresses, in first-seen order
pub fn distinct_authors(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .filter(|p| !p.signer_address.is_empty())
        .filter(|p| seen.insert(p.signer_address.as_str()))
        .map(|p| p.signer_address.clone())
        .collect()
}

/// Stamp each post with the likes found in its author's inbox
///
/// One query per distinct author, all in flight at once. An author whose
/// query fails contributes nothing.
pub async fn attach_like_counts(node: &NodeClient, posts: &mut [Post]) {
    let authors = distinct_authors(posts);

    let scans = authors.iter().map(|author| async move {
        match node
            .search_confirmed(&inbox_query(author, query::LIKE_SCAN_PAGE_SIZE, false))
            .await
        {
            Ok(records) => count_likes(&records),
            Err(e) => {
                log::warn!("[feed] Like scan failed for {author}: {e}");
                HashMap::new()
            }
        }
    });

    let counts = merge_like_counts(join_all(scans).await);
    for post in posts.iter_mut() {
        post.likes = counts.get(&post.hash).copied().unwrap_or(0);
    }
}

/// Channel posts with like counts
pub async fn list_feed(node: &NodeClient, config: &Config) -> Result<Vec<Post>> {
    let mut posts = list_channel_posts(node, config).await?;
    attach_like_counts(node, &mut posts).await;
    Ok(posts)
}

/// Likes an address has received, with the total native currency they carried
pub fn received_likes(
    records: &[TransactionRecord],
    params: &NetworkParams,
) -> (Vec<ReceivedLike>, u64) {
    let mut total = 0u64;
    let likes = records
        .iter()
        .filter_map(|record| {
            let message = record_message(record);
            let post_hash = message.strip_prefix(undo::LIKE_PREFIX)?.to_string();

            let amount = mosaic_amount(&record.transaction.mosaics, params.currency_mosaic_id);
            total = total.saturating_add(amount);

            let from: String = record.transaction.signer_public_key.chars().take(8).collect();
            Some(ReceivedLike {
                hash: record.meta.hash.clone(),
                post_hash,
                from: format!("{from}..."),
                amount: format_currency(amount),
                timestamp: to_iso_timestamp(record.meta.timestamp.as_deref(), params),
            })
        })
        .collect();
    (likes, total)
}

/// Posts authored by `address` and the likes it has received
///
/// Either half degrades to empty if its node query fails.
pub async fn user_profile(node: &NodeClient, config: &Config, address: &Address) -> UserProfile {
    let address_text = address.to_string();
    let params = &config.network;

    let channel_query = inbox_query(
        &config.channel_address.to_string(),
        query::LIKE_SCAN_PAGE_SIZE,
        false,
    );
    let likes_query = inbox_query(&address_text, query::LIKE_SCAN_PAGE_SIZE, false);
    let (channel, inbox) = futures::join!(
        node.search_confirmed(&channel_query),
        node.search_confirmed(&likes_query),
    );

    let posts = match channel {
        Ok(records) => posts_from_records(&records, params)
            .into_iter()
            .filter(|p| p.signer_address == address_text)
            .collect(),
        Err(e) => {
            log::warn!("[feed] Profile posts unavailable for {address_text}: {e}");
            Vec::new()
        }
    };

    let (received_likes, total) = match inbox {
        Ok(records) => received_likes(&records, params),
        Err(e) => {
            log::warn!("[feed] Profile likes unavailable for {address_text}: {e}");
            (Vec::new(), 0)
        }
    };

    UserProfile {
        address: address_text,
        posts,
        like_count: received_likes.len(),
        received_likes,
        total_received_xym: format_currency(total),
    }
}
