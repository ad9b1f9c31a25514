//! HTTP API for the UNDO web client
//!
//! ## Endpoints
//! - GET /health - Node health pass-through
//! - POST /api/account - Create a fresh account
//! - PUT /api/account - Restore an account from its private key
//! - GET /api/balance?address= - Native currency balance
//! - POST /api/post - Sign and announce a post
//! - GET /api/posts - Channel feed with like counts
//! - POST /api/like - Sign and announce a like stake
//! - POST /api/nft/create - Sign and announce a one-of-one mosaic mint
//! - GET /api/nfts?address= - Symbol NFTs held by an address
//! - GET /api/nfts/polygon?address= - Polygon NFTs held by an EVM address
//! - GET /api/user?address= - Posts and received likes for an address

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::Method,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::account::{self, create_account, restore_account};
use crate::alchemy_api::AlchemyClient;
use crate::builder::{build_like, build_nft_mint, build_post};
use crate::config::Config;
use crate::constants::undo::LIKE_AMOUNT_DISPLAY;
use crate::error::{Result, UndoError};
use crate::feed;
use crate::node_api::NodeClient;
use crate::nfts::list_owned_nfts;
use crate::symbol::{Address, KeyPair};
use crate::types::{
    AccountView, AddressQuery, ExternalNftListing, LikeRequest, Nft, NftCreateRequest, Post,
    PostRequest, RestoreAccountRequest, UserProfile,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub node: NodeClient,
    pub indexer: AlchemyClient,
}

impl AppState {
    /// Node and indexer clients share one connection pool
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let node = NodeClient::with_client(&config.node_url, http.clone(), config.rpc_timeout_ms);
        let indexer = AlchemyClient::new(
            &config.alchemy_base_url,
            &config.alchemy_api_key,
            http,
            config.rpc_timeout_ms,
        );
        Self {
            config: Arc::new(config),
            node,
            indexer,
        }
    }
}

#[derive(Debug, Serialize)]
struct BalanceResponse {
    balance: String,
}

#[derive(Debug, Serialize)]
struct SubmittedPost {
    hash: String,
    payload: String,
}

#[derive(Debug, Serialize)]
struct SubmittedLike {
    hash: String,
    amount: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmittedMint {
    hash: String,
    mosaic_id: String,
    name: String,
    image_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct PostsResponse {
    posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
struct NftsResponse {
    nfts: Vec<Nft>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/account",
            post(create_account_handler).put(restore_account_handler),
        )
        .route("/api/balance", get(balance_handler))
        .route("/api/post", post(post_handler))
        .route("/api/posts", get(posts_handler))
        .route("/api/like", post(like_handler))
        .route("/api/nft/create", post(nft_create_handler))
        .route("/api/nfts", get(nfts_handler))
        .route("/api/nfts/polygon", get(polygon_nfts_handler))
        .route("/api/user", get(user_handler))
        .layer(cors)
        .with_state(state)
}

/// Body of a JSON request, with unparseable bodies reported as a 400
fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|e| UndoError::validation(format!("Invalid request body: {}", e.body_text())))
}

/// Present and non-empty, or `None`
fn field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required_address(query: AddressQuery) -> Result<String> {
    field(query.address).ok_or_else(|| UndoError::validation("Missing address"))
}

/// Symbol address from the query, checked before it reaches a node URL
fn required_symbol_address(query: AddressQuery, network_identifier: u8) -> Result<Address> {
    Address::parse(&required_address(query)?, network_identifier)
}

/// Always 200; node failures are reported in the body
async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    match state.node.health().await {
        Ok(data) => Json(json!({ "status": "ok", "data": data })),
        Err(e) => {
            log::warn!("Node health check failed: {e}");
            Json(json!({ "status": "error", "message": e.to_string() }))
        }
    }
}

async fn create_account_handler(State(state): State<AppState>) -> Json<AccountView> {
    Json(create_account(&state.config.network))
}

async fn restore_account_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RestoreAccountRequest>, JsonRejection>,
) -> Result<Json<AccountView>> {
    let request = body(payload)?;
    let private_key = field(request.private_key).ok_or(UndoError::InvalidKey)?;
    Ok(Json(restore_account(&state.config.network, &private_key)?))
}

async fn balance_handler(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<BalanceResponse>> {
    let params = &state.config.network;
    let address = required_symbol_address(query, params.identifier)?;
    let balance = account::balance(&state.node, params, &address.to_string()).await?;
    Ok(Json(BalanceResponse { balance }))
}

async fn post_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<SubmittedPost>> {
    let request = body(payload)?;
    let (Some(private_key), Some(message)) = (field(request.private_key), field(request.message))
    else {
        return Err(UndoError::validation("Missing privateKey or message"));
    };

    let config = &state.config;
    let key_pair = KeyPair::from_private_key_hex(&private_key)?;
    let signed = build_post(
        &config.network,
        &key_pair,
        &config.channel_address,
        &message,
        config.post_fee,
    )?;
    state.node.announce(&signed.payload).await?;

    log::info!("Post announced: {}", signed.hash);
    Ok(Json(SubmittedPost {
        hash: signed.hash,
        payload: signed.payload,
    }))
}

async fn posts_handler(State(state): State<AppState>) -> Result<Json<PostsResponse>> {
    let posts = feed::list_feed(&state.node, &state.config).await?;
    Ok(Json(PostsResponse { posts }))
}

async fn like_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LikeRequest>, JsonRejection>,
) -> Result<Json<SubmittedLike>> {
    let request = body(payload)?;
    let (Some(private_key), Some(recipient), Some(post_hash)) = (
        field(request.private_key),
        field(request.recipient_address),
        field(request.post_hash),
    ) else {
        return Err(UndoError::validation(
            "Missing privateKey, recipientAddress, or postHash",
        ));
    };

    let params = &state.config.network;
    let key_pair = KeyPair::from_private_key_hex(&private_key)?;
    let recipient = Address::parse(&recipient, params.identifier)?;
    let signed = build_like(params, &key_pair, &recipient, &post_hash)?;
    state.node.announce(&signed.payload).await?;

    log::info!("Like announced for post {post_hash}: {}", signed.hash);
    Ok(Json(SubmittedLike {
        hash: signed.hash,
        amount: LIKE_AMOUNT_DISPLAY,
    }))
}

async fn nft_create_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NftCreateRequest>, JsonRejection>,
) -> Result<Json<SubmittedMint>> {
    let request = body(payload)?;
    let (Some(private_key), Some(name)) = (field(request.private_key), field(request.name)) else {
        return Err(UndoError::validation("Missing privateKey or name"));
    };
    let image_url = field(request.image_url);

    let key_pair = KeyPair::from_private_key_hex(&private_key)?;
    let mint = build_nft_mint(&state.config.network, &key_pair, &name, image_url.as_deref())?;
    state.node.announce(&mint.transaction.payload).await?;

    log::info!(
        "NFT mint announced: {} (mosaic {:X})",
        mint.transaction.hash,
        mint.mosaic_id
    );
    Ok(Json(SubmittedMint {
        hash: mint.transaction.hash,
        mosaic_id: format!("{:X}", mint.mosaic_id),
        name,
        image_url,
    }))
}

async fn nfts_handler(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<NftsResponse>> {
    let address = required_symbol_address(query, state.config.network.identifier)?;
    let nfts = list_owned_nfts(&state.node, &address.to_string()).await;
    Ok(Json(NftsResponse { nfts }))
}

async fn polygon_nfts_handler(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<ExternalNftListing>> {
    let address = required_address(query)?;
    Ok(Json(state.indexer.list_nfts_for_owner(&address).await?))
}

async fn user_handler(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<UserProfile>> {
    let address = required_symbol_address(query, state.config.network.identifier)?;
    let profile = feed::user_profile(&state.node, &state.config, &address).await;
    Ok(Json(profile))
}
