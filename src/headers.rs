//! Per-call request options and Tigris request headers
//!
//! A [`RequestOption`] mutates the S3 config override for a single call. The
//! header helpers in this module register a [`HeaderInterceptor`] that sets
//! one header right before the request is signed.

use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::interceptors::context::BeforeTransmitInterceptorContextMut;
use aws_smithy_runtime_api::client::interceptors::{Intercept, SharedInterceptor};
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_types::config_bag::ConfigBag;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Source bucket of a fork, on create-bucket requests and head-bucket responses
pub const FORK_SOURCE_BUCKET: &str = "X-Tigris-Fork-Source-Bucket";
/// Snapshot of the source bucket a fork was created from
pub const FORK_SOURCE_BUCKET_SNAPSHOT: &str = "X-Tigris-Fork-Source-Bucket-Snapshot";
/// Whether other buckets have been forked from this one
pub const IS_FORK_PARENT: &str = "X-Tigris-Is-Fork-Parent";
/// Snapshot support on a bucket
pub const ENABLE_SNAPSHOT: &str = "X-Tigris-Enable-Snapshot";
/// Take a snapshot (create-bucket) or scope a listing to snapshots (list-buckets)
pub const SNAPSHOT: &str = "X-Tigris-Snapshot";
/// Read from a specific snapshot version
pub const SNAPSHOT_VERSION: &str = "X-Tigris-Snapshot-Version";
/// Rename instead of copy on copy-object
pub const RENAME: &str = "X-Tigris-Rename";
/// Static replication regions
pub const REGIONS: &str = "X-Tigris-Regions";
/// Metadata query on list-objects
pub const QUERY: &str = "X-Tigris-Query";
/// Compare-and-swap on conditional writes
pub const COMPARE_AND_SWAP: &str = "X-Tigris-CAS";

/// A per-call override of the S3 client configuration
pub type RequestOption = Box<dyn FnOnce(&mut S3ConfigBuilder) + Send>;

/// Sets a single header on every request it intercepts.
///
/// The header is inserted, not appended, so the last interceptor to run wins.
#[derive(Debug, Clone)]
pub struct HeaderInterceptor {
    name: Cow<'static, str>,
    value: String,
}

impl HeaderInterceptor {
    /// Create a new header interceptor
    pub fn new(name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Header name
    pub fn header_name(&self) -> &str {
        &self.name
    }

    /// Header value
    pub fn header_value(&self) -> &str {
        &self.value
    }
}

impl Intercept for HeaderInterceptor {
    fn name(&self) -> &'static str {
        "TigrisHeaderInterceptor"
    }

    fn modify_before_signing(
        &self,
        context: &mut BeforeTransmitInterceptorContextMut<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        context
            .request_mut()
            .headers_mut()
            .try_insert(self.name.clone(), self.value.clone())?;
        Ok(())
    }
}

/// Fold per-call options into a single config override.
///
/// Caller options are applied first and `injected` last, so headers it sets
/// take precedence over caller-set headers with the same name.
pub(crate) fn fold_options(
    options: impl IntoIterator<Item = RequestOption>,
    injected: Option<RequestOption>,
) -> S3ConfigBuilder {
    let mut builder = S3ConfigBuilder::default();
    for option in options.into_iter().chain(injected) {
        option(&mut builder);
    }
    builder
}

/// Set an arbitrary header on a single request
pub fn with_header(name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> RequestOption {
    let interceptor = HeaderInterceptor::new(name, value);
    Box::new(move |builder: &mut S3ConfigBuilder| {
        builder.push_interceptor(SharedInterceptor::new(interceptor));
    })
}

/// Take a snapshot of the bucket, labelled with `description`
pub fn with_take_snapshot(description: impl AsRef<str>) -> RequestOption {
    with_header(SNAPSHOT, format!("true; name={}", description.as_ref()))
}

/// Enable snapshots on a new bucket
pub fn with_enable_snapshot() -> RequestOption {
    with_header(ENABLE_SNAPSHOT, "true")
}

/// Rename the source object instead of copying it
pub fn with_rename() -> RequestOption {
    with_header(RENAME, "true")
}

/// Read objects as they were in the given snapshot
pub fn with_snapshot_version(version: impl Into<String>) -> RequestOption {
    with_header(SNAPSHOT_VERSION, version)
}

/// Replicate a new object to a fixed set of regions
pub fn with_static_replication_regions<I, S>(regions: I) -> RequestOption
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let regions: Vec<String> = regions
        .into_iter()
        .map(|region| region.as_ref().to_string())
        .collect();
    with_header(REGIONS, regions.join(","))
}

/// Filter a listing with a metadata query, e.g. `WHERE "Content-Type" = 'text/plain'`
pub fn with_query(query: impl Into<String>) -> RequestOption {
    with_header(QUERY, query)
}

/// Only write the object if nothing exists at the key yet
pub fn with_create_object_if_not_exists() -> RequestOption {
    with_header("If-None-Match", "*")
}

/// Only act if the object's ETag matches
pub fn with_if_etag_matches(etag: impl Into<String>) -> RequestOption {
    with_header("If-Match", etag)
}

/// Only act if the object changed after `since`
pub fn with_modified_since(since: DateTime<Utc>) -> RequestOption {
    with_header("If-Modified-Since", http_date(since))
}

/// Only act if the object did not change after `since`
pub fn with_unmodified_since(since: DateTime<Utc>) -> RequestOption {
    with_header("If-Unmodified-Since", http_date(since))
}

/// Evaluate conditional headers against the latest committed version
pub fn with_compare_and_swap() -> RequestOption {
    with_header(COMPARE_AND_SWAP, "true")
}

fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
