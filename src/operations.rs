//! Tigris-specific bucket and object operations
//!
//! Each operation wraps one standard S3 call. It appends a header option to
//! the caller's per-call options and delegates. Errors from the underlying
//! call are returned as-is.

use crate::client::Client;
use crate::error::TigrisResult;
use crate::headers::{
    FORK_SOURCE_BUCKET, RequestOption, SNAPSHOT, fold_options, with_enable_snapshot,
    with_header, with_rename, with_take_snapshot,
};
use crate::metadata::{ForkOrSnapshotMetadata, RawResponseSlot};
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::copy_object::builders::CopyObjectFluentBuilder;
use aws_sdk_s3::operation::copy_object::{CopyObjectError, CopyObjectOutput};
use aws_sdk_s3::operation::create_bucket::builders::CreateBucketFluentBuilder;
use aws_sdk_s3::operation::create_bucket::{CreateBucketError, CreateBucketOutput};
use aws_sdk_s3::operation::head_bucket::builders::HeadBucketFluentBuilder;
use aws_sdk_s3::operation::list_buckets::{ListBucketsError, ListBucketsOutput};
use aws_smithy_runtime_api::client::interceptors::SharedInterceptor;
use tracing::debug;

/// Build an `x-amz-copy-source` value for `key` in `bucket`.
///
/// The service URL-decodes this header, so every key segment is
/// percent-encoded. Slashes between segments are kept.
pub fn copy_source(bucket: &str, key: &str) -> String {
    let key = key
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", bucket, key)
}

impl Client {
    /// Create bucket `name` as a copy-on-write fork of `source`
    pub async fn create_bucket_fork(
        &self,
        source: &str,
        name: &str,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> Result<CreateBucketOutput, SdkError<CreateBucketError>> {
        debug!("Forking bucket {} from {}", name, source);

        self.s3()
            .create_bucket()
            .bucket(name)
            .customize()
            .config_override(fold_options(
                options,
                Some(with_header(FORK_SOURCE_BUCKET, source.to_string())),
            ))
            .send()
            .await
    }

    /// Take a snapshot of the bucket named in `request`, labelled with `description`
    pub async fn create_bucket_snapshot(
        &self,
        request: CreateBucketFluentBuilder,
        description: &str,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> Result<CreateBucketOutput, SdkError<CreateBucketError>> {
        debug!(
            "Snapshotting bucket {:?} ({})",
            request.get_bucket(),
            description
        );

        request
            .customize()
            .config_override(fold_options(options, Some(with_take_snapshot(description))))
            .send()
            .await
    }

    /// Create the bucket in `request` with snapshots enabled
    pub async fn create_snapshottable_bucket(
        &self,
        request: CreateBucketFluentBuilder,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> Result<CreateBucketOutput, SdkError<CreateBucketError>> {
        debug!("Creating snapshottable bucket {:?}", request.get_bucket());

        request
            .customize()
            .config_override(fold_options(options, Some(with_enable_snapshot())))
            .send()
            .await
    }

    /// Head the bucket in `request` and decode its fork and snapshot headers
    pub async fn head_bucket_fork_or_snapshot(
        &self,
        request: HeadBucketFluentBuilder,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> TigrisResult<ForkOrSnapshotMetadata> {
        debug!("Reading fork/snapshot state of {:?}", request.get_bucket());

        let slot = RawResponseSlot::new();
        let capture = slot.clone();
        let injected: RequestOption = Box::new(move |builder: &mut S3ConfigBuilder| {
            builder.push_interceptor(SharedInterceptor::new(capture));
        });

        request
            .customize()
            .config_override(fold_options(options, Some(injected)))
            .send()
            .await?;

        let headers = slot.headers("HeadBucket")?;
        Ok(ForkOrSnapshotMetadata::from_headers(&headers))
    }

    /// List the snapshots of `bucket_name`
    pub async fn list_bucket_snapshots(
        &self,
        bucket_name: &str,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> Result<ListBucketsOutput, SdkError<ListBucketsError>> {
        debug!("Listing snapshots of {}", bucket_name);

        self.s3()
            .list_buckets()
            .customize()
            .config_override(fold_options(
                options,
                Some(with_header(SNAPSHOT, bucket_name.to_string())),
            ))
            .send()
            .await
    }

    /// Rename the copy source of `request` to its destination without copying data
    pub async fn rename_object(
        &self,
        request: CopyObjectFluentBuilder,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> Result<CopyObjectOutput, SdkError<CopyObjectError>> {
        debug!(
            "Renaming {:?} to {:?}/{:?}",
            request.get_copy_source(),
            request.get_bucket(),
            request.get_key()
        );

        request
            .customize()
            .config_override(fold_options(options, Some(with_rename())))
            .send()
            .await
    }
}
