//! # Tigris SDK
//!
//! A thin layer over [`aws_sdk_s3`] for the Tigris object storage service.
//! Tigris speaks the S3 API and adds bucket forks, bucket snapshots and
//! zero-copy renames, all driven by extra HTTP headers. This crate builds a
//! correctly configured S3 client and attaches those headers for you.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tigris_sdk::{Client, with_access_keypair, with_region};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new([with_region("auto"), with_access_keypair("tid_...", "tsec_...")]).await?;
//!
//! client.create_bucket_fork("production", "staging", []).await?;
//!
//! let metadata = client
//!     .head_bucket_fork_or_snapshot(client.head_bucket().bucket("staging"), [])
//!     .await?;
//! assert_eq!(metadata.source_bucket, "production");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod metadata;
pub mod operations;

pub use client::Client;
pub use config::{
    ConfigOption, DEFAULT_REGION, FLY_ENDPOINT, GLOBAL_ENDPOINT, Options, with_access_keypair,
    with_endpoint, with_fly_endpoint, with_global_endpoint, with_path_style, with_region,
};
pub use error::{TigrisError, TigrisResult};
pub use headers::{
    HeaderInterceptor, RequestOption, with_compare_and_swap, with_create_object_if_not_exists,
    with_enable_snapshot, with_header, with_if_etag_matches, with_modified_since, with_query,
    with_rename, with_snapshot_version, with_static_replication_regions, with_take_snapshot,
    with_unmodified_since,
};
pub use metadata::ForkOrSnapshotMetadata;
pub use operations::copy_source;
