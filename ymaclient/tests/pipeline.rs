//! Tests d'intégration de la chaîne d'acquisition contre un serveur HTTP simulé

use std::collections::HashSet;

use ymaclient::error::ClientError;
use ymaclient::{CatalogClient, Session, signing};

fn client_for(server: &mockito::ServerGuard, token: &str) -> CatalogClient {
    CatalogClient::new(server.url(), Session::authenticated(token)).unwrap()
}

/// Autorité attendue dans le header `host` (l'URL mockito est http://127.0.0.1:PORT)
fn expected_host(server: &mockito::ServerGuard) -> String {
    server.url().trim_start_matches("http://").to_string()
}

#[tokio::test]
async fn resolve_uid_sends_auth_and_host_headers() {
    let mut server = mockito::Server::new_async().await;
    let host = expected_host(&server);

    let mock = server
        .mock("GET", "/account/status")
        .match_header("authorization", "OAuth test-token")
        .match_header("host", host.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result":{"account":{"uid":123456}}}"#)
        .create_async()
        .await;

    let client = client_for(&server, "test-token");
    let uid = client.resolve_uid().await.unwrap();

    assert_eq!(uid, "123456");
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = mockito::Server::new_async().await;
    // Aucun mock déclaré : toute requête renverrait un 501 mockito,
    // mais l'absence de token doit échouer avant même l'envoi.
    let client = CatalogClient::new(server.url(), Session::new()).unwrap();

    let result = client.resolve_uid().await;
    assert!(matches!(result, Err(ClientError::AuthMissing)));
}

#[tokio::test]
async fn non_2xx_status_aborts_the_stage() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/account/status")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = client_for(&server, "test-token");
    let result = client.resolve_uid().await;

    assert!(matches!(result, Err(ClientError::Status { code: 500 })));
}

#[tokio::test]
async fn empty_uid_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/account/status")
        .with_status(200)
        .with_body(r#"{"result":{"account":{"uid":""}}}"#)
        .create_async()
        .await;

    let client = client_for(&server, "test-token");
    assert!(matches!(
        client.resolve_uid().await,
        Err(ClientError::Parse(_))
    ));
}

#[tokio::test]
async fn random_pick_covers_the_whole_library() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/42/likes/tracks")
        .match_header("authorization", "OAuth test-token")
        .with_status(200)
        .with_body(r#"{"result":{"library":{"tracks":[{"id":1},{"id":2},{"id":3}]}}}"#)
        .expect_at_least(1)
        .create_async()
        .await;

    let client = client_for(&server, "test-token");

    // Sur un grand nombre de tirages, chaque piste doit sortir au moins une
    // fois et aucune piste étrangère ne doit apparaître.
    let mut seen: HashSet<String> = HashSet::new();
    for _ in 0..60 {
        let track = client.pick_random_liked_track("42").await.unwrap();
        assert!(["1", "2", "3"].contains(&track.id.as_str()));
        seen.insert(track.id);
    }
    assert_eq!(seen.len(), 3);
}

#[tokio::test]
async fn empty_library_aborts_the_pipeline() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/42/likes/tracks")
        .with_status(200)
        .with_body(r#"{"result":{"library":{"tracks":[]}}}"#)
        .create_async()
        .await;

    let client = client_for(&server, "test-token");
    assert!(matches!(
        client.pick_random_liked_track("42").await,
        Err(ClientError::EmptyLibrary)
    ));
}

#[tokio::test]
async fn negotiation_prefers_highest_mp3_bitrate() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/tracks/777/download-info")
        .with_status(200)
        .with_body(
            r#"{"result":[
                {"codec":"mp3","downloadInfoUrl":"https://x/info-128","bitrateInKbps":128},
                {"codec":"mp3","downloadInfoUrl":"https://x/info-320","bitrateInKbps":320},
                {"codec":"aac","downloadInfoUrl":"https://x/info-aac","bitrateInKbps":500}
            ]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server, "test-token");
    let url = client.negotiate_download("777").await.unwrap();
    assert_eq!(url, "https://x/info-320");
}

#[tokio::test]
async fn negotiation_without_mp3_variant_fails() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/tracks/777/download-info")
        .with_status(200)
        .with_body(r#"{"result":[{"codec":"aac","downloadInfoUrl":"https://x/a","bitrateInKbps":500}]}"#)
        .create_async()
        .await;

    let client = client_for(&server, "test-token");
    assert!(matches!(
        client.negotiate_download("777").await,
        Err(ClientError::NoMp3Variant)
    ));
}

#[tokio::test]
async fn descriptor_fetch_parses_the_four_leaf_elements() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/download-info/777")
        .match_header("authorization", "OAuth test-token")
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(
            r#"<?xml version="1.0" encoding="utf-8"?>
<download-info>
  <host>storage.example.net</host>
  <path>/get-audio/777/file.mp3</path>
  <ts>5f1e2d3c</ts>
  <region>-1</region>
  <s>server-nonce</s>
</download-info>"#,
        )
        .create_async()
        .await;

    let client = client_for(&server, "test-token");
    let url = format!("{}/download-info/777", server.url());
    let descriptor = client.fetch_descriptor(&url).await.unwrap();

    assert_eq!(descriptor.host, "storage.example.net");
    assert_eq!(descriptor.path, "/get-audio/777/file.mp3");
    assert_eq!(descriptor.ts, "5f1e2d3c");
    assert_eq!(descriptor.s, "server-nonce");

    // La signature dérivée du descripteur est stable et bien formée.
    let sign = signing::sign(&descriptor.path, &descriptor.s);
    assert_eq!(sign.len(), 32);
    assert_eq!(sign, signing::sign(&descriptor.path, &descriptor.s));
}

#[tokio::test]
async fn truncated_descriptor_invalidates_the_negotiation() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/download-info/777")
        .with_status(200)
        .with_body("<download-info><host>x</host><path>/p</path></download-info>")
        .create_async()
        .await;

    let client = client_for(&server, "test-token");
    let url = format!("{}/download-info/777", server.url());
    assert!(matches!(
        client.fetch_descriptor(&url).await,
        Err(ClientError::IncompleteDescriptor)
    ));
}
