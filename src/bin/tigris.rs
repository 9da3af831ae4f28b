//! # Tigris CLI
//!
//! Command-line access to Tigris bucket forks, snapshots and renames.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tigris_sdk::{
    Client, ConfigOption, Options, copy_source, with_access_keypair, with_endpoint,
    with_fly_endpoint, with_path_style, with_region,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tigris")]
#[command(about = "Fork, snapshot and rename on Tigris object storage")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct ConnectionArgs {
    /// YAML or JSON file with client options
    #[arg(long, env = "TIGRIS_CONFIG")]
    config: Option<PathBuf>,

    /// Use the Fly.io endpoint
    #[arg(long, conflicts_with = "endpoint")]
    fly: bool,

    /// Custom endpoint URL
    #[arg(long, env = "TIGRIS_ENDPOINT")]
    endpoint: Option<String>,

    /// Region
    #[arg(long)]
    region: Option<String>,

    /// Use path-style addressing
    #[arg(long)]
    path_style: bool,

    /// Access key ID
    #[arg(long, env = "TIGRIS_ACCESS_KEY_ID", requires = "secret_access_key")]
    access_key_id: Option<String>,

    /// Secret access key
    #[arg(long, env = "TIGRIS_SECRET_ACCESS_KEY", hide_env_values = true)]
    secret_access_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a bucket forked from another bucket
    Fork {
        /// Bucket to fork from
        source: String,
        /// Name of the new bucket
        name: String,
    },
    /// Take a snapshot of a bucket
    Snapshot {
        bucket: String,
        /// Snapshot description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Create a bucket
    CreateBucket {
        bucket: String,
        /// Enable snapshots on the new bucket
        #[arg(long)]
        snapshots: bool,
    },
    /// List the snapshots of a bucket
    Snapshots { bucket: String },
    /// Show fork and snapshot state of a bucket
    Info { bucket: String },
    /// Rename an object without copying its data
    Rename {
        bucket: String,
        from: String,
        to: String,
    },
}

impl ConnectionArgs {
    fn into_options(self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_file(path)?,
            None => Options::default(),
        };

        let mut overrides: Vec<ConfigOption> = Vec::new();
        if self.fly {
            overrides.push(with_fly_endpoint());
        }
        if let Some(endpoint) = self.endpoint {
            overrides.push(with_endpoint(endpoint));
        }
        if let Some(region) = self.region {
            overrides.push(with_region(region));
        }
        if self.path_style {
            overrides.push(with_path_style(true));
        }
        if let (Some(access_key_id), Some(secret_access_key)) =
            (self.access_key_id, self.secret_access_key)
        {
            overrides.push(with_access_keypair(access_key_id, secret_access_key));
        }

        options.apply(overrides);
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let client = Client::from_options(cli.connection.into_options()?).await?;

    match cli.command {
        Commands::Fork { source, name } => {
            client
                .create_bucket_fork(&source, &name, [])
                .await
                .with_context(|| format!("Failed to fork {} into {}", source, name))?;
            info!("Forked {} into {}", source, name);
        }
        Commands::Snapshot {
            bucket,
            description,
        } => {
            client
                .create_bucket_snapshot(client.create_bucket().bucket(&bucket), &description, [])
                .await
                .with_context(|| format!("Failed to snapshot {}", bucket))?;
            info!("Took snapshot of {}", bucket);
        }
        Commands::CreateBucket { bucket, snapshots } => {
            let request = client.create_bucket().bucket(&bucket);
            let created = if snapshots {
                client.create_snapshottable_bucket(request, []).await
            } else {
                request.send().await
            };
            created.with_context(|| format!("Failed to create {}", bucket))?;
            info!("Created bucket {}", bucket);
        }
        Commands::Snapshots { bucket } => {
            let output = client
                .list_bucket_snapshots(&bucket, [])
                .await
                .with_context(|| format!("Failed to list snapshots of {}", bucket))?;
            for snapshot in output.buckets() {
                println!(
                    "{}\t{}",
                    snapshot.name().unwrap_or_default(),
                    snapshot
                        .creation_date()
                        .map(|date| date.to_string())
                        .unwrap_or_default()
                );
            }
        }
        Commands::Info { bucket } => {
            let metadata = client
                .head_bucket_fork_or_snapshot(client.head_bucket().bucket(&bucket), [])
                .await?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Commands::Rename { bucket, from, to } => {
            let request = client
                .copy_object()
                .bucket(&bucket)
                .copy_source(copy_source(&bucket, &from))
                .key(&to);
            client
                .rename_object(request, [])
                .await
                .with_context(|| format!("Failed to rename {} to {}", from, to))?;
            info!("Renamed {}/{} to {}", bucket, from, to);
        }
    }

    Ok(())
}
