use std::sync::Arc;

use crate::config::Config;
use crate::resolver::LookupResolver;
use crate::search::gateway::{ElasticsearchGateway, SearchGateway};

/// Shared application state. Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub resolver: LookupResolver,
}

impl AppState {
    /// State backed by the Elasticsearch index named in `config`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let gateway = ElasticsearchGateway::new(&config.index)?;
        Ok(Self::with_gateway(Arc::new(gateway)))
    }

    /// State backed by any gateway, e.g. an in-memory index in tests.
    pub fn with_gateway(gateway: Arc<dyn SearchGateway>) -> Self {
        Self {
            resolver: LookupResolver::new(gateway),
        }
    }
}
