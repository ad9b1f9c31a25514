mod common;

use serde_json::json;
use undo::account::balance;
use undo::node_api::NodeClient;
use undo::nfts::list_owned_nfts;
use undo::{NetworkParams, UndoError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_rejected_announce_keeps_node_body() {
    let server = MockServer::start().await;
    let rejection = json!({"code": "Conflict", "message": "transaction already exists"});

    Mock::given(method("PUT"))
        .and(path("/transactions"))
        .and(body_json(json!({"payload": "ABCD"})))
        .respond_with(ResponseTemplate::new(409).set_body_json(&rejection))
        .expect(1)
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    let err = node.announce("ABCD").await.unwrap_err();

    match &err {
        UndoError::SubmissionFailed { status, body } => {
            assert_eq!(*status, 409);
            let echoed: serde_json::Value = serde_json::from_str(body).unwrap();
            assert_eq!(echoed, rejection);
        }
        other => panic!("expected SubmissionFailed, got {other:?}"),
    }
    assert!(err.to_string().contains("transaction already exists"));
}

#[tokio::test]
async fn test_accepted_announce() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "message": "packet 9 was pushed to the network via /transactions"
        })))
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    let reply = node.announce("00").await.unwrap();
    assert!(reply["message"].as_str().unwrap().contains("pushed"));
}

#[tokio::test]
async fn test_unknown_account_has_zero_balance() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/TUNKNOWN"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "ResourceNotFound",
            "message": "no resource exists with id 'TUNKNOWN'"
        })))
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    let params = NetworkParams::testnet();
    assert_eq!(balance(&node, &params, "TUNKNOWN").await.unwrap(), "0");
}

#[tokio::test]
async fn test_balance_reads_currency_mosaic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/TRICH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "account": {
                "address": "98AA",
                "mosaics": [
                    {"id": "0123456789ABCDEF", "amount": "1"},
                    {"id": "72C0212E67A08BCE", "amount": "25000000"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    let params = NetworkParams::testnet();
    assert_eq!(balance(&node, &params, "TRICH").await.unwrap(), "25000000");
}

#[tokio::test]
async fn test_balance_surfaces_node_outage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/TDOWN"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    let params = NetworkParams::testnet();
    let err = balance(&node, &params, "TDOWN").await.unwrap_err();
    assert!(matches!(err, UndoError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn test_owned_nfts_skip_fungible_mosaics() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/TOWNER"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "account": {"mosaics": [
                {"id": "1111111111111111", "amount": "1"},
                {"id": "2222222222222222", "amount": "1000"},
                {"id": "3333333333333333", "amount": "1"}
            ]}
        })))
        .mount(&server)
        .await;

    for (id, supply, divisibility) in [
        ("1111111111111111", "1", 0),
        ("2222222222222222", "1000", 0),
        ("3333333333333333", "1", 0),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/mosaics/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "mosaic": {"id": id, "supply": supply, "divisibility": divisibility}
            })))
            .mount(&server)
            .await;
    }

    let metadata =
        hex::encode_upper(r#"{"name":"Sunset","image":"https://img.example/sunset.png"}"#);
    Mock::given(method("GET"))
        .and(path("/metadata"))
        .and(query_param("targetId", "1111111111111111"))
        .and(query_param("metadataType", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"metadataEntry": {"value": metadata}}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/metadata"))
        .and(query_param("targetId", "3333333333333333"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    let mut nfts = list_owned_nfts(&node, "TOWNER").await;
    nfts.sort_by(|a, b| a.id.cmp(&b.id));

    assert_eq!(nfts.len(), 2);
    assert_eq!(nfts[0].name, "Sunset");
    assert_eq!(
        nfts[0].image_url.as_deref(),
        Some("https://img.example/sunset.png")
    );
    assert_eq!(nfts[1].id, "3333333333333333");
    assert_eq!(nfts[1].name, "NFT #33333333");
    assert!(nfts[1].image_url.is_none());
    assert!(nfts.iter().all(|n| n.id != "2222222222222222"));
}

#[tokio::test]
async fn test_owned_nfts_empty_for_unknown_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/TNOBODY"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    assert!(list_owned_nfts(&node, "TNOBODY").await.is_empty());
}
