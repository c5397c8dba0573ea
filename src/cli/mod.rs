pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::domain::AssetKind;

#[derive(Parser)]
#[command(name = "assetsync")]
#[command(about = "Prefetch player and tournament images into the site's image cache", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (default: ./assetsync.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// GraphQL endpoint, overrides config and PUBLIC_GRAPHQL_ENDPOINT
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output root; images land under <OUTPUT>/images
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Number of downloads in flight per chunk
    #[arg(short, long, global = true)]
    pub concurrency: Option<usize>,

    /// List the images that would be downloaded without fetching them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Exit non-zero if any single download failed
    #[arg(long, global = true)]
    pub fail_on_error: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flags take precedence over every other configuration source.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(output) = &self.output {
            config.output_root = output.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
    }
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Download player then tournament images (default)
    All,
    /// Download player headshots only
    Players,
    /// Download tournament avatars only
    Tournaments,
    /// Write a commented default config file
    InitConfig {
        /// Where to write the file
        #[arg(default_value = crate::config::CONFIG_FILE_NAME)]
        path: PathBuf,
    },
}

impl Commands {
    /// Asset kinds synced by this command, in processing order
    pub fn kinds(&self) -> &'static [AssetKind] {
        match self {
            Commands::All => &AssetKind::ALL,
            Commands::Players => &[AssetKind::Player],
            Commands::Tournaments => &[AssetKind::Tournament],
            Commands::InitConfig { .. } => &[],
        }
    }
}
