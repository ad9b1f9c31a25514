use serde_json::json;
use undo::alchemy_api::AlchemyClient;
use undo::UndoError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> AlchemyClient {
    AlchemyClient::new(server.uri(), "test-key", reqwest::Client::new(), 5000)
}

#[tokio::test]
async fn test_malformed_address_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ownedNfts": []})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .list_nfts_for_owner("not-an-address")
        .await
        .unwrap_err();
    assert!(matches!(err, UndoError::Validation(_)));
}

#[tokio::test]
async fn test_valid_address_queries_indexer() {
    let server = MockServer::start().await;
    let owner = format!("0x{}", "a".repeat(40));

    let mut owned: Vec<serde_json::Value> = (0..25)
        .map(|i| {
            json!({
                "contract": {"address": "0xfeed", "name": "Gallery"},
                "tokenId": i.to_string(),
                "name": format!("Piece {i}"),
                "image": {"cachedUrl": format!("https://cdn.example/{i}.png")}
            })
        })
        .collect();
    owned.insert(
        0,
        json!({"contract": {"address": "0xbare"}, "tokenId": "99", "image": {}}),
    );

    Mock::given(method("GET"))
        .and(path("/nft/v3/test-key/getNFTsForOwner"))
        .and(query_param("owner", owner.as_str()))
        .and(query_param("withMetadata", "true"))
        .and(query_param("pageSize", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ownedNfts": owned})))
        .expect(1)
        .mount(&server)
        .await;

    let listing = client(&server).list_nfts_for_owner(&owner).await.unwrap();
    assert_eq!(listing.nfts.len(), 20);
    assert!(listing.message.is_none());
    assert_eq!(listing.nfts[0].name, "Piece 0");
    assert_eq!(listing.nfts[0].collection_name, "Gallery");
    assert_eq!(listing.nfts[0].chain, "polygon");
    assert!(listing.nfts.iter().all(|n| n.contract_address != "0xbare"));
}

#[tokio::test]
async fn test_rejected_key_yields_empty_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let owner = format!("0x{}", "b".repeat(40));
    let listing = client(&server).list_nfts_for_owner(&owner).await.unwrap();
    assert!(listing.nfts.is_empty());
    assert!(listing.message.is_some());
}

#[tokio::test]
async fn test_unreachable_indexer_error_hides_api_key() {
    // nothing listens on port 1
    let client = AlchemyClient::new(
        "http://127.0.0.1:1",
        "SECRET-KEY-123",
        reqwest::Client::new(),
        2000,
    );
    let owner = format!("0x{}", "a".repeat(40));

    let err = client.list_nfts_for_owner(&owner).await.unwrap_err();
    assert!(matches!(err, UndoError::UpstreamUnavailable(_)));
    let text = err.to_string();
    assert!(text.starts_with("Alchemy request failed"), "{text}");
    assert!(!text.contains("SECRET-KEY-123"), "{text}");
}

#[tokio::test]
async fn test_garbled_indexer_reply_hides_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = AlchemyClient::new(server.uri(), "SECRET-KEY-456", reqwest::Client::new(), 5000);
    let owner = format!("0x{}", "c".repeat(40));

    let err = client.list_nfts_for_owner(&owner).await.unwrap_err();
    assert!(!err.to_string().contains("SECRET-KEY-456"));
}
