//! # assetsync
//!
//! Build-time prefetcher for the site's player and tournament images.
//!
//! ## Architecture
//!
//! ```text
//! GraphQL → Resolver → BulkFetcher → image cache
//! ```
//!
//! - [`graphql`]: queries the backend for players and tournaments
//! - [`resolver`]: filters, deduplicates and maps records to download tasks
//! - [`fetcher`]: HTTP downloads, run in bounded sequential chunks
//! - [`cache`]: skip-if-present checks and atomic writes
//!
//! ## Quick Start
//!
//! ```bash
//! # Players then tournaments, into ./public/images
//! assetsync
//!
//! # Only headshots, against another backend
//! PUBLIC_GRAPHQL_ENDPOINT=https://api.example.com/graphql assetsync players
//!
//! # See what is missing without downloading
//! assetsync --dry-run
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the resolver,
/// bulk fetcher and store from one [`Config`](config::Config).
pub mod app;

/// On-disk image cache.
///
/// - [`AssetStore`](cache::AssetStore): existence checks, writes, directories
/// - [`FsStore`](cache::FsStore): filesystem implementation with atomic writes
pub mod cache;

/// Command-line interface using clap.
///
/// - `all` (default) - players then tournaments
/// - `players` - player headshots only
/// - `tournaments` - tournament avatars only
/// - `init-config` - write a commented config file
pub mod cli;

/// Configuration loading: TOML file, environment, flags.
pub mod config;

/// Core domain models: [`FetchTask`](domain::FetchTask),
/// [`AssetKind`](domain::AssetKind), outcomes and batch reports.
pub mod domain;

/// Image downloading.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for a single download
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`BulkFetcher`](fetcher::bulk::BulkFetcher): chunked concurrent downloads
pub mod fetcher;

/// GraphQL client and response types for the upstream backend.
pub mod graphql;

/// Maps upstream entity lists to download tasks.
pub mod resolver;
