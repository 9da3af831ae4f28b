//! Client configuration
//!
//! Configuration is layered: [`Options::default`], then an optional YAML or
//! JSON file ([`Options::from_file`]), then [`ConfigOption`] functions applied
//! in call order. Later layers override earlier ones field by field.

use crate::error::{TigrisError, TigrisResult};
use aws_sdk_s3::config::Credentials;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use url::Url;

/// Global Tigris endpoint
pub const GLOBAL_ENDPOINT: &str = "https://t3.storage.dev";

/// Endpoint for workloads running on Fly.io
pub const FLY_ENDPOINT: &str = "https://fly.storage.tigris.dev";

/// Region marker that lets Tigris pick the region
pub const DEFAULT_REGION: &str = "auto";

/// Provider name reported for keypairs supplied through [`with_access_keypair`]
const STATIC_PROVIDER_NAME: &str = "tigris-static";

/// A configuration option, applied to [`Options`] before the client is built
pub type ConfigOption = Box<dyn FnOnce(&mut Options) + Send>;

/// Settings used to construct a [`Client`](crate::Client)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Base endpoint URL
    pub base_endpoint: String,
    /// Signing region
    pub region: String,
    /// Put the bucket name in the URL path instead of the host
    pub use_path_style: bool,
    /// Access key ID
    pub access_key_id: Option<String>,
    /// Secret access key
    pub secret_access_key: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_endpoint: GLOBAL_ENDPOINT.to_string(),
            region: DEFAULT_REGION.to_string(),
            use_path_style: false,
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("base_endpoint", &self.base_endpoint)
            .field("region", &self.region)
            .field("use_path_style", &self.use_path_style)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

impl Options {
    /// Apply configuration options in order
    pub fn apply(&mut self, options: impl IntoIterator<Item = ConfigOption>) {
        for option in options {
            option(self);
        }
    }

    /// Defaults with the given options applied
    pub fn with_options(options: impl IntoIterator<Item = ConfigOption>) -> Self {
        let mut resolved = Self::default();
        resolved.apply(options);
        resolved
    }

    /// Load options from a YAML or JSON file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    /// Fields missing from the file keep their defaults.
    pub fn from_file(path: &Path) -> TigrisResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TigrisError::config_load_with_source(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let options: Options = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&content).map_err(|e| {
                TigrisError::config_load_with_source("Failed to parse config file", e)
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                TigrisError::config_load_with_source("Failed to parse config file", e)
            })?
        };

        options.validate()?;
        Ok(options)
    }

    /// Validate the options
    pub fn validate(&self) -> TigrisResult<()> {
        let endpoint = Url::parse(&self.base_endpoint).map_err(|e| {
            TigrisError::config_load_with_source(
                format!("Invalid endpoint URL: {}", self.base_endpoint),
                e,
            )
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TigrisError::config_load(format!(
                "Endpoint must use http or https: {}",
                self.base_endpoint
            )));
        }

        if self.region.trim().is_empty() {
            return Err(TigrisError::config_load("Region cannot be empty"));
        }

        Ok(())
    }

    /// Static credentials, if both halves of the keypair are set.
    ///
    /// A partially set keypair yields `None` so the ambient credential chain
    /// is used instead.
    pub fn static_credentials(&self) -> Option<Credentials> {
        match (
            self.access_key_id.as_deref(),
            self.secret_access_key.as_deref(),
        ) {
            (Some(access_key), Some(secret_key))
                if !access_key.is_empty() && !secret_key.is_empty() =>
            {
                Some(Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    STATIC_PROVIDER_NAME,
                ))
            }
            _ => None,
        }
    }
}

/// Use the Fly.io endpoint
pub fn with_fly_endpoint() -> ConfigOption {
    Box::new(|o: &mut Options| o.base_endpoint = FLY_ENDPOINT.to_string())
}

/// Use the global endpoint (the default)
pub fn with_global_endpoint() -> ConfigOption {
    Box::new(|o: &mut Options| o.base_endpoint = GLOBAL_ENDPOINT.to_string())
}

/// Use a custom endpoint URL
pub fn with_endpoint(endpoint: impl Into<String>) -> ConfigOption {
    let endpoint = endpoint.into();
    Box::new(move |o: &mut Options| o.base_endpoint = endpoint)
}

/// Override the region
pub fn with_region(region: impl Into<String>) -> ConfigOption {
    let region = region.into();
    Box::new(move |o: &mut Options| o.region = region)
}

/// Toggle path-style addressing
pub fn with_path_style(enabled: bool) -> ConfigOption {
    Box::new(move |o: &mut Options| o.use_path_style = enabled)
}

/// Use a static, non-refreshing access keypair
pub fn with_access_keypair(
    access_key_id: impl Into<String>,
    secret_access_key: impl Into<String>,
) -> ConfigOption {
    let access_key_id = access_key_id.into();
    let secret_access_key = secret_access_key.into();
    Box::new(move |o: &mut Options| {
        o.access_key_id = Some(access_key_id);
        o.secret_access_key = Some(secret_access_key);
    })
}
