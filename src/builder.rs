//! Transaction builder for posts, likes and NFT mints
//!
//! Each builder signs with the caller's key and returns the entity hash and
//! the hex payload to announce. Deadlines come from
//! [`NetworkParams::deadline`] unless a test pins them. Messages or metadata
//! too large for a node are rejected as validation errors.

use rand::Rng;
use serde::Serialize;

use crate::constants::undo::{LIKE_AMOUNT, LIKE_FEE, NFT_METADATA_KEY, NFT_MINT_FEE};
use crate::error::Result;
use crate::symbol::{
    message::{encode_plain, like_message},
    transaction::{
        flags, generate_mosaic_id, EmbeddedTransaction, Mosaic, SignedTransaction,
        SupplyChangeAction, Transaction,
    },
    Address, KeyPair, NetworkParams,
};

/// Signed NFT mint plus the id of the mosaic it creates
#[derive(Clone, Debug)]
pub struct SignedMint {
    pub transaction: SignedTransaction,
    pub mosaic_id: u64,
}

/// Zero-value transfer carrying `message` as plain text to `channel`
pub fn build_post(
    params: &NetworkParams,
    key_pair: &KeyPair,
    channel: &Address,
    message: &str,
    fee: u64,
) -> Result<SignedTransaction> {
    build_post_with_deadline(params, key_pair, channel, message, fee, params.deadline())
}

pub fn build_post_with_deadline(
    params: &NetworkParams,
    key_pair: &KeyPair,
    channel: &Address,
    message: &str,
    fee: u64,
    deadline: u64,
) -> Result<SignedTransaction> {
    let transaction = Transaction::transfer(
        params.identifier,
        key_pair.public_key(),
        fee,
        deadline,
        channel,
        &[],
        &encode_plain(message),
    )?;
    Ok(transaction.sign_into(key_pair, params))
}

/// Like stake of the native currency to the post author, message `LIKE:<hash>`
pub fn build_like(
    params: &NetworkParams,
    key_pair: &KeyPair,
    recipient: &Address,
    post_hash: &str,
) -> Result<SignedTransaction> {
    let transaction = Transaction::transfer(
        params.identifier,
        key_pair.public_key(),
        LIKE_FEE,
        params.deadline(),
        recipient,
        &[Mosaic {
            id: params.currency_mosaic_id,
            amount: LIKE_AMOUNT,
        }],
        &encode_plain(&like_message(post_hash)),
    )?;
    Ok(transaction.sign_into(key_pair, params))
}

/// JSON stored under the NFT metadata key, fields in this order
#[derive(Serialize)]
struct NftMetadata<'a> {
    name: &'a str,
    image: &'a str,
}

pub fn nft_metadata_value(name: &str, image_url: Option<&str>) -> Result<Vec<u8>> {
    let metadata = NftMetadata {
        name,
        image: image_url.unwrap_or(""),
    };
    Ok(serde_json::to_vec(&metadata)?)
}

/// Aggregate minting a one-of-one mosaic with name/image metadata
pub fn build_nft_mint(
    params: &NetworkParams,
    key_pair: &KeyPair,
    name: &str,
    image_url: Option<&str>,
) -> Result<SignedMint> {
    let nonce: u32 = rand::thread_rng().gen();
    build_nft_mint_with_nonce(params, key_pair, name, image_url, nonce, params.deadline())
}

pub fn build_nft_mint_with_nonce(
    params: &NetworkParams,
    key_pair: &KeyPair,
    name: &str,
    image_url: Option<&str>,
    nonce: u32,
    deadline: u64,
) -> Result<SignedMint> {
    let signer = key_pair.public_key();
    let owner = key_pair.address(params.identifier);
    let mosaic_id = generate_mosaic_id(&owner, nonce);

    let inner = [
        // duration 0 = never expires
        EmbeddedTransaction::mosaic_definition(
            params.identifier,
            signer,
            mosaic_id,
            0,
            nonce,
            flags::TRANSFERABLE | flags::RESTRICTABLE,
            0,
        ),
        EmbeddedTransaction::mosaic_supply_change(
            params.identifier,
            signer,
            mosaic_id,
            1,
            SupplyChangeAction::Increase,
        ),
        EmbeddedTransaction::mosaic_metadata(
            params.identifier,
            signer,
            &owner,
            NFT_METADATA_KEY,
            mosaic_id,
            &nft_metadata_value(name, image_url)?,
        )?,
    ];

    let transaction = Transaction::aggregate_complete(
        params.identifier,
        signer,
        NFT_MINT_FEE,
        deadline,
        &inner,
    )
    .sign_into(key_pair, params);

    Ok(SignedMint {
        transaction,
        mosaic_id,
    })
}
