use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        providers::{CatalogProvider, RecommendationSource, RemoteApiProvider},
        RecommendationSourceResolver,
    },
};

/// Shared application state
///
/// Immutable after start-up; handlers only clone the `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub resolver: RecommendationSourceResolver,
    pub catalog: Arc<dyn CatalogProvider>,
    pub catalog_page_size: usize,
}

impl AppState {
    /// Creates state from explicit providers
    pub fn new(
        recommendations: Arc<dyn RecommendationSource>,
        catalog: Arc<dyn CatalogProvider>,
        catalog_page_size: usize,
    ) -> Self {
        Self {
            resolver: RecommendationSourceResolver::new(recommendations),
            catalog,
            catalog_page_size,
        }
    }

    /// Creates state backed by the remote API named in the configuration
    pub fn from_config(config: &Config) -> Self {
        let provider = Arc::new(RemoteApiProvider::new(config.api_base_url.clone()));

        tracing::info!(api_url = %config.api_base_url, "Using remote recommendation API");

        Self::new(provider.clone(), provider, config.catalog_page_size)
    }
}
