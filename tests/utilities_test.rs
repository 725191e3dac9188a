//! Utility and market-data operations against a mock BitGo server.

use std::sync::Arc;

use bitgo::execution::ReqwestTransport;
use bitgo::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CoinClient {
    let address = server.address();
    let config = Config::new("existing-token")
        .host(address.ip().to_string())
        .port(address.port())
        .secure(false);
    CoinClient::with_transport(
        config,
        CoinType::Tbtc,
        Arc::new(ReqwestTransport::new().expect("client")),
    )
}

#[tokio::test]
async fn encrypt_hits_the_unscoped_express_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/encrypt"))
        .and(body_json(json!({
            "password": "hello-world",
            "input": "xprv9s21"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "encrypted": "{\"iv\":\"...\"}"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .utilities()
        .encrypt()
        .input("xprv9s21")
        .password("hello-world")
        .send()
        .await
        .unwrap();

    assert!(response["encrypted"].is_string());
}

#[tokio::test]
async fn decrypt_round_trips_through_the_same_surface() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/decrypt"))
        .and(body_json(json!({
            "password": "hello-world",
            "input": "{\"iv\":\"...\"}"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "decrypted": "xprv9s21"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .utilities()
        .decrypt()
        .input("{\"iv\":\"...\"}")
        .password("hello-world")
        .send()
        .await
        .unwrap();

    assert_eq!(response["decrypted"], json!("xprv9s21"));
}

#[tokio::test]
async fn keychain_lookup_stays_coin_scoped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/tbtc/key/key-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "key-1",
            "pub": "xpub661"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .utilities()
        .keychains()
        .key_id("key-1")
        .send()
        .await
        .unwrap();

    assert_eq!(response["pub"], json!("xpub661"));
}

#[tokio::test]
async fn local_keychain_creation_posts_an_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/tbtc/keychain/local"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prv": "xprv9s21",
            "pub": "xpub661"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .utilities()
        .create_keychain()
        .send()
        .await
        .unwrap();

    assert_eq!(response["pub"], json!("xpub661"));
}

#[tokio::test]
async fn rates_fetch_the_latest_market_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/tbtc/market/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latest": {"currencies": {"USD": {"last": 64023.1}}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).rates().send().await.unwrap();
    assert_eq!(
        response["latest"]["currencies"]["USD"]["last"],
        json!(64023.1)
    );
}

#[tokio::test]
async fn wallet_generation_and_listing_share_the_scope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/tbtc/wallet/generate"))
        .and(body_json(json!({
            "label": "my new wallet",
            "passphrase": "hello-world"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "w-new"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/tbtc/wallet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"wallets": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .generate_wallet()
        .label("my new wallet")
        .passphrase("hello-world")
        .send()
        .await
        .unwrap();
    assert_eq!(created["id"], json!("w-new"));

    let listed = client.wallets().send().await.unwrap();
    assert_eq!(listed["wallets"], json!([]));
}
