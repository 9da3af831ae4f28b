use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_smithy_runtime_api::client::http::{
    HttpClient, HttpConnector, HttpConnectorFuture, HttpConnectorSettings, SharedHttpConnector,
};
use aws_smithy_runtime_api::client::orchestrator::{HttpRequest, HttpResponse};
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_runtime_api::http::{Headers, StatusCode};
use aws_smithy_types::body::SdkBody;
use std::sync::{Arc, Mutex};
use tigris_sdk::Client;

pub const TEST_ENDPOINT: &str = "http://localhost:9000";

/// A request as seen by the stub transport, after signing
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub headers: Headers,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn header_count(&self, name: &str) -> usize {
        self.headers.get_all(name).count()
    }
}

#[derive(Debug)]
struct StubState {
    status: u16,
    headers: Vec<(&'static str, &'static str)>,
    body: &'static str,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Transport that records every request and answers with one canned response
#[derive(Debug, Clone)]
pub struct StubHttpClient {
    state: Arc<StubState>,
}

#[allow(dead_code)]
impl StubHttpClient {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self::with_headers(status, &[], body)
    }

    pub fn with_headers(
        status: u16,
        headers: &[(&'static str, &'static str)],
        body: &'static str,
    ) -> Self {
        Self {
            state: Arc::new(StubState {
                status,
                headers: headers.to_vec(),
                body,
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The single request sent through this stub
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl HttpConnector for StubHttpClient {
    fn call(&self, request: HttpRequest) -> HttpConnectorFuture {
        self.state.requests.lock().unwrap().push(RecordedRequest {
            method: request.method().to_string(),
            uri: request.uri().to_string(),
            headers: request.headers().clone(),
        });

        let mut response = HttpResponse::new(
            StatusCode::try_from(self.state.status).unwrap(),
            SdkBody::from(self.state.body),
        );
        for (name, value) in &self.state.headers {
            response.headers_mut().insert(*name, *value);
        }

        HttpConnectorFuture::ready(Ok(response))
    }
}

impl HttpClient for StubHttpClient {
    fn http_connector(
        &self,
        _settings: &HttpConnectorSettings,
        _components: &RuntimeComponents,
    ) -> SharedHttpConnector {
        SharedHttpConnector::new(self.clone())
    }
}

/// A Tigris client whose requests all go to `stub`
pub fn stub_client(stub: &StubHttpClient) -> Client {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("auto"))
        .endpoint_url(TEST_ENDPOINT)
        .force_path_style(true)
        .credentials_provider(Credentials::new("tid_test", "tsec_test", None, None, "stub"))
        .retry_config(RetryConfig::disabled())
        .http_client(stub.clone())
        .build();

    Client::from_s3_client(aws_sdk_s3::Client::from_conf(config))
}

/// `client` with its own configuration, but sending through `stub`
#[allow(dead_code)]
pub fn route_through(client: &Client, stub: &StubHttpClient) -> Client {
    let config = client
        .s3()
        .config()
        .to_builder()
        .retry_config(RetryConfig::disabled())
        .http_client(stub.clone())
        .build();

    Client::from_s3_client(aws_sdk_s3::Client::from_conf(config))
}

#[allow(dead_code)]
pub const LIST_BUCKETS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Owner><ID>owner</ID><DisplayName>owner</DisplayName></Owner>
  <Buckets>
    <Bucket><Name>photos</Name><CreationDate>2024-05-01T10:00:00.000Z</CreationDate></Bucket>
  </Buckets>
</ListAllMyBucketsResult>"#;

#[allow(dead_code)]
pub const COPY_OBJECT_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CopyObjectResult><LastModified>2024-05-01T10:00:00.000Z</LastModified><ETag>"9b2cf535f27731c974343645a3985328"</ETag></CopyObjectResult>"#;

#[allow(dead_code)]
pub const BUCKET_EXISTS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>BucketAlreadyExists</Code><Message>The requested bucket name is not available.</Message><RequestId>req-1</RequestId></Error>"#;
