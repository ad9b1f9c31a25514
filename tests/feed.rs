mod common;

use common::{page, test_config, transfer_json};
use serde_json::json;
use undo::feed::{list_feed, user_profile};
use undo::node_api::NodeClient;
use undo::KeyPair;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_likes_counted_from_author_inboxes() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), "http://unused.invalid");
    let params = &config.network;

    let author_a = KeyPair::random();
    let author_b = KeyPair::random();
    let liker = KeyPair::random();
    let address_a = author_a.address(params.identifier).to_string();
    let address_b = author_b.address(params.identifier).to_string();

    Mock::given(method("GET"))
        .and(path("/transactions/confirmed"))
        .and(query_param("recipientAddress", config.channel_address.to_string()))
        .and(query_param("type", "16724"))
        .and(query_param("pageSize", "50"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            transfer_json("HB", &author_b, "second post"),
            transfer_json("HA", &author_a, "first post"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transactions/confirmed"))
        .and(query_param("recipientAddress", address_a.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            transfer_json("L1", &liker, "LIKE:HA"),
            transfer_json("X1", &liker, "just saying hi"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transactions/confirmed"))
        .and(query_param("recipientAddress", address_b.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    let posts = list_feed(&node, &config).await.unwrap();

    let summary: Vec<(&str, u64)> = posts.iter().map(|p| (p.hash.as_str(), p.likes)).collect();
    assert_eq!(summary, [("HB", 0), ("HA", 1)]);
    assert_eq!(posts[1].signer_address, address_a);
    assert_eq!(posts[1].message, "first post");
}

#[tokio::test]
async fn test_failed_like_scan_leaves_zero() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), "http://unused.invalid");
    let author = KeyPair::random();

    Mock::given(method("GET"))
        .and(path("/transactions/confirmed"))
        .and(query_param("recipientAddress", config.channel_address.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![transfer_json("H1", &author, "hello")])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transactions/confirmed"))
        .and(query_param(
            "recipientAddress",
            author.address(config.network.identifier).to_string(),
        ))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    let posts = list_feed(&node, &config).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].likes, 0);
}

#[tokio::test]
async fn test_user_profile_collects_posts_and_likes() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), "http://unused.invalid");
    let me = KeyPair::random();
    let someone = KeyPair::random();
    let my_address = me.address(config.network.identifier);

    Mock::given(method("GET"))
        .and(path("/transactions/confirmed"))
        .and(query_param("recipientAddress", config.channel_address.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            transfer_json("P1", &me, "mine"),
            transfer_json("P2", &someone, "theirs"),
        ])))
        .mount(&server)
        .await;

    let mut like = transfer_json("L1", &someone, "LIKE:P1");
    like["transaction"]["mosaics"] = json!([{"id": "72C0212E67A08BCE", "amount": "100000"}]);
    Mock::given(method("GET"))
        .and(path("/transactions/confirmed"))
        .and(query_param("recipientAddress", my_address.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![like])))
        .mount(&server)
        .await;

    let node = NodeClient::new(server.uri(), 5000);
    let profile = user_profile(&node, &config, &my_address).await;

    assert_eq!(profile.address, my_address.to_string());
    assert_eq!(profile.posts.len(), 1);
    assert_eq!(profile.posts[0].hash, "P1");
    assert_eq!(profile.like_count, 1);
    assert_eq!(profile.received_likes[0].post_hash, "P1");
    assert_eq!(profile.total_received_xym, "0.10");
}
