mod common;

use common::*;
use tigris_sdk::*;

#[tokio::test]
async fn test_client_signs_with_static_keypair() {
    let stub = StubHttpClient::new(200, LIST_BUCKETS_BODY);
    let client = Client::new([
        with_endpoint(TEST_ENDPOINT),
        with_path_style(true),
        with_region("iad"),
        with_access_keypair("tid_static", "tsec_static"),
    ])
    .await
    .unwrap();
    let client = route_through(&client, &stub);

    client.list_bucket_snapshots("photos", []).await.unwrap();

    let request = stub.only_request();
    let authorization = request.header("authorization").unwrap_or_default();
    assert!(
        authorization.contains("Credential=tid_static/"),
        "unexpected authorization: {}",
        authorization
    );
    assert!(authorization.contains("/iad/s3/aws4_request"));
    assert!(!authorization.contains("tsec_static"));
}

#[tokio::test]
async fn test_client_defaults_to_auto_region() {
    let stub = StubHttpClient::new(200, LIST_BUCKETS_BODY);
    let client = Client::new([
        with_endpoint(TEST_ENDPOINT),
        with_access_keypair("tid_static", "tsec_static"),
    ])
    .await
    .unwrap();
    let client = route_through(&client, &stub);

    client.list_buckets().send().await.unwrap();

    let request = stub.only_request();
    let authorization = request.header("authorization").unwrap_or_default();
    assert!(
        authorization.contains(&format!("/{}/s3/aws4_request", DEFAULT_REGION)),
        "unexpected authorization: {}",
        authorization
    );
}

#[tokio::test]
async fn test_partial_keypair_falls_back_to_ambient_credentials() {
    let stub = StubHttpClient::new(200, LIST_BUCKETS_BODY);
    let client = Client::new([
        with_endpoint(TEST_ENDPOINT),
        with_path_style(true),
        with_access_keypair("tid_static", ""),
    ])
    .await
    .unwrap();
    let client = route_through(&client, &stub);

    // Without ambient credentials the call fails before anything is sent.
    let _ = client.list_buckets().send().await;

    for request in stub.requests() {
        let authorization = request.header("authorization").unwrap_or_default();
        assert!(
            !authorization.contains("tid_static"),
            "partial keypair was used: {}",
            authorization
        );
    }
}

#[tokio::test]
async fn test_client_rejects_invalid_endpoint() {
    let result = Client::new([with_endpoint("t3.storage.dev")]).await;
    assert!(matches!(result, Err(TigrisError::ConfigLoad { .. })));
}

#[tokio::test]
async fn test_client_binds_endpoint_and_path_style() {
    let stub = StubHttpClient::new(200, "");
    let client = Client::new([
        with_fly_endpoint(),
        with_path_style(true),
        with_access_keypair("tid_static", "tsec_static"),
    ])
    .await
    .unwrap();
    let client = route_through(&client, &stub);

    client.head_bucket().bucket("dst").send().await.unwrap();

    let request = stub.only_request();
    assert!(
        request.uri.starts_with(&format!("{}/dst", FLY_ENDPOINT)),
        "unexpected uri: {}",
        request.uri
    );
}

#[tokio::test]
async fn test_client_from_options_uses_virtual_hosts() {
    let stub = StubHttpClient::new(200, "");
    let options = Options::with_options([
        with_fly_endpoint(),
        with_access_keypair("tid_static", "tsec_static"),
    ]);
    assert!(!options.use_path_style);

    let client = Client::from_options(options).await.unwrap();
    let client = route_through(&client, &stub);

    client.head_bucket().bucket("dst").send().await.unwrap();

    let request = stub.only_request();
    assert!(
        request
            .uri
            .starts_with("https://dst.fly.storage.tigris.dev"),
        "unexpected uri: {}",
        request.uri
    );
}
