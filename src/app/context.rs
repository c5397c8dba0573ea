use std::sync::Arc;

use crate::app::error::Result;
use crate::cache::{AssetStore, FsStore};
use crate::config::Config;
use crate::fetcher::bulk::BulkFetcher;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::graphql::{AssetSource, GraphQlClient};
use crate::resolver::Resolver;

pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn AssetStore + Send + Sync>,
    pub resolver: Resolver,
    pub bulk_fetcher: BulkFetcher,
}

impl AppContext {
    /// Validate `config` and wire the HTTP-backed components.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let source: Arc<dyn AssetSource + Send + Sync> = Arc::new(GraphQlClient::new(
            config.endpoint.clone(),
            config.timeout(),
            &config.user_agent,
        )?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(config.timeout(), &config.user_agent)?);

        Ok(Self::with_parts(config, source, fetcher, Arc::new(FsStore::new())))
    }

    pub fn with_parts(
        config: Config,
        source: Arc<dyn AssetSource + Send + Sync>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        store: Arc<dyn AssetStore + Send + Sync>,
    ) -> Self {
        let resolver = Resolver::new(source, config.clone());
        let bulk_fetcher =
            BulkFetcher::with_concurrency(fetcher, store.clone(), config.concurrency);

        Self {
            config,
            store,
            resolver,
            bulk_fetcher,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SyncError;

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let config = Config {
            endpoint: "localhost graphql".into(),
            ..Default::default()
        };
        assert!(matches!(AppContext::new(config), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_new_uses_configured_concurrency() {
        let config = Config {
            concurrency: 0,
            ..Default::default()
        };
        let ctx = AppContext::new(config).unwrap();
        assert_eq!(ctx.bulk_fetcher.concurrency(), 1);
    }
}
