//! Fork and snapshot metadata decoded from head-bucket responses

use crate::error::{TigrisError, TigrisResult};
use crate::headers::{ENABLE_SNAPSHOT, FORK_SOURCE_BUCKET, FORK_SOURCE_BUCKET_SNAPSHOT, IS_FORK_PARENT};
use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::interceptors::Intercept;
use aws_smithy_runtime_api::client::interceptors::context::BeforeDeserializationInterceptorContextRef;
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_runtime_api::http::Headers;
use aws_smithy_types::config_bag::ConfigBag;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Fork and snapshot state of a bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkOrSnapshotMetadata {
    /// Snapshots are enabled on the bucket
    pub snapshots_enabled: bool,
    /// Bucket this one was forked from, empty if not a fork
    pub source_bucket: String,
    /// Snapshot of the source bucket the fork was taken at
    pub source_bucket_snapshot: String,
    /// Other buckets have been forked from this one
    pub is_fork_parent: bool,
}

impl ForkOrSnapshotMetadata {
    /// Decode the metadata from raw response headers.
    ///
    /// Flags are only set when the header value is exactly `"true"`.
    /// Missing string headers decode as empty strings.
    pub fn from_headers(headers: &Headers) -> Self {
        let text = |name: &str| headers.get(name).unwrap_or_default().to_string();
        let flag = |name: &str| headers.get(name) == Some("true");

        Self {
            snapshots_enabled: flag(ENABLE_SNAPSHOT),
            source_bucket: text(FORK_SOURCE_BUCKET),
            source_bucket_snapshot: text(FORK_SOURCE_BUCKET_SNAPSHOT),
            is_fork_parent: flag(IS_FORK_PARENT),
        }
    }

    /// Whether the bucket was forked from another bucket
    pub fn is_fork(&self) -> bool {
        !self.source_bucket.is_empty()
    }
}

/// Keeps the headers of the raw HTTP response for one call.
///
/// Registered on a single operation; the SDK does not hand the transport
/// response back with the output, so this is how it is recovered.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawResponseSlot {
    headers: Arc<Mutex<Option<Headers>>>,
}

impl RawResponseSlot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Take the captured headers, failing if no response reached deserialization
    pub(crate) fn headers(&self, operation: &'static str) -> TigrisResult<Headers> {
        self.headers
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
            .ok_or_else(|| TigrisError::transport_metadata(operation))
    }
}

impl Intercept for RawResponseSlot {
    fn name(&self) -> &'static str {
        "TigrisRawResponseSlot"
    }

    fn read_before_deserialization(
        &self,
        context: &BeforeDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        let mut slot = self
            .headers
            .lock()
            .map_err(|_| "raw response slot lock poisoned")?;
        *slot = Some(context.response().headers().clone());
        Ok(())
    }
}
