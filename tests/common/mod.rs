#![allow(dead_code)]

use serde_json::{json, Value};
use undo::config::{Config, Network};
use undo::symbol::message::encode_plain;
use undo::{KeyPair, NetworkParams};

pub fn test_config(node_url: &str, alchemy_url: &str) -> Config {
    let network = NetworkParams::testnet();
    Config {
        network_name: Network::Testnet,
        channel_address: KeyPair::random().address(network.identifier),
        network,
        node_url: node_url.to_string(),
        feed_page_size: 50,
        post_fee: 0,
        rpc_timeout_ms: 5000,
        alchemy_api_key: "test-key".to_string(),
        alchemy_base_url: alchemy_url.to_string(),
        port: 0,
    }
}

/// Confirmed transfer as the node renders it
pub fn transfer_json(hash: &str, signer: &KeyPair, message: &str) -> Value {
    json!({
        "meta": {"hash": hash, "height": "1", "timestamp": "1000"},
        "transaction": {
            "signerPublicKey": signer.public_key_hex(),
            "type": 16724,
            "message": hex::encode_upper(encode_plain(message)),
            "mosaics": []
        }
    })
}

pub fn page(records: Vec<Value>) -> Value {
    json!({ "data": records, "pagination": {"pageNumber": 1, "pageSize": 100} })
}
