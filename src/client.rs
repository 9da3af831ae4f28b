//! Tigris client construction and pass-through operations

use crate::config::{ConfigOption, Options};
use crate::error::TigrisResult;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::operation::copy_object::builders::CopyObjectFluentBuilder;
use aws_sdk_s3::operation::create_bucket::builders::CreateBucketFluentBuilder;
use aws_sdk_s3::operation::delete_bucket::builders::DeleteBucketFluentBuilder;
use aws_sdk_s3::operation::delete_object::builders::DeleteObjectFluentBuilder;
use aws_sdk_s3::operation::delete_objects::builders::DeleteObjectsFluentBuilder;
use aws_sdk_s3::operation::get_object::builders::GetObjectFluentBuilder;
use aws_sdk_s3::operation::head_bucket::builders::HeadBucketFluentBuilder;
use aws_sdk_s3::operation::head_object::builders::HeadObjectFluentBuilder;
use aws_sdk_s3::operation::list_buckets::builders::ListBucketsFluentBuilder;
use aws_sdk_s3::operation::list_objects_v2::builders::ListObjectsV2FluentBuilder;
use aws_sdk_s3::operation::put_object::builders::PutObjectFluentBuilder;
use tracing::debug;

/// S3 client wired up for Tigris.
///
/// Cloning is cheap and clones share the underlying connection pool. The
/// Tigris-specific operations live in [`crate::operations`]; everything else
/// is forwarded to the wrapped [`aws_sdk_s3::Client`].
#[derive(Debug, Clone)]
pub struct Client {
    inner: aws_sdk_s3::Client,
}

impl Client {
    /// Create a new client from the default options plus `options`
    pub async fn new(options: impl IntoIterator<Item = ConfigOption>) -> TigrisResult<Self> {
        Self::from_options(Options::with_options(options)).await
    }

    /// Create a new client from fully resolved options.
    ///
    /// Ambient configuration (environment, profile files, instance metadata)
    /// is loaded through `aws_config`; a complete static keypair in `options`
    /// replaces the ambient credential chain. No network calls are made here.
    pub async fn from_options(options: Options) -> TigrisResult<Self> {
        options.validate()?;

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(options.region.clone()));

        if let Some(credentials) = options.static_credentials() {
            debug!("Using static access keypair");
            loader = loader.credentials_provider(credentials);
        }

        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .endpoint_url(&options.base_endpoint)
            .force_path_style(options.use_path_style)
            .build();

        debug!(
            "Created Tigris client for endpoint: {}, region: {}, path_style: {}",
            options.base_endpoint, options.region, options.use_path_style
        );

        Ok(Self::from_s3_client(aws_sdk_s3::Client::from_conf(s3_config)))
    }

    /// Wrap an already configured S3 client
    pub fn from_s3_client(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }

    /// The wrapped S3 client
    pub fn s3(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// Unwrap into the underlying S3 client
    pub fn into_inner(self) -> aws_sdk_s3::Client {
        self.inner
    }

    /// Start a create-bucket request
    pub fn create_bucket(&self) -> CreateBucketFluentBuilder {
        self.inner.create_bucket()
    }

    /// Start a delete-bucket request
    pub fn delete_bucket(&self) -> DeleteBucketFluentBuilder {
        self.inner.delete_bucket()
    }

    /// Start a head-bucket request
    pub fn head_bucket(&self) -> HeadBucketFluentBuilder {
        self.inner.head_bucket()
    }

    /// Start a list-buckets request
    pub fn list_buckets(&self) -> ListBucketsFluentBuilder {
        self.inner.list_buckets()
    }

    /// Start a list-objects (v2) request
    pub fn list_objects_v2(&self) -> ListObjectsV2FluentBuilder {
        self.inner.list_objects_v2()
    }

    /// Start a get-object request
    pub fn get_object(&self) -> GetObjectFluentBuilder {
        self.inner.get_object()
    }

    /// Start a put-object request
    pub fn put_object(&self) -> PutObjectFluentBuilder {
        self.inner.put_object()
    }

    /// Start a head-object request
    pub fn head_object(&self) -> HeadObjectFluentBuilder {
        self.inner.head_object()
    }

    /// Start a copy-object request
    pub fn copy_object(&self) -> CopyObjectFluentBuilder {
        self.inner.copy_object()
    }

    /// Start a delete-object request
    pub fn delete_object(&self) -> DeleteObjectFluentBuilder {
        self.inner.delete_object()
    }

    /// Start a batch delete-objects request
    pub fn delete_objects(&self) -> DeleteObjectsFluentBuilder {
        self.inner.delete_objects()
    }
}

impl From<aws_sdk_s3::Client> for Client {
    fn from(inner: aws_sdk_s3::Client) -> Self {
        Self::from_s3_client(inner)
    }
}
