use crate::config::SearchConfig;
use crate::estimate::{Estimator, RandomEstimator};
use crate::model::{SearchCriteria, SearchOutcome};
use crate::providers::{ProviderFactory, RecipeProvider, SampleProvider};
use crate::SearchError;
use log::{debug, info, warn};
use std::sync::Arc;

/// Runs a search against one provider and falls back to the sample catalogue
/// when that provider fails
pub struct RecipeSearch {
    provider: Box<dyn RecipeProvider>,
    fallback: SampleProvider,
}

impl RecipeSearch {
    /// Create a search over the provider selected in `config`
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::with_estimator(config, Arc::new(RandomEstimator))
    }

    /// Like [`RecipeSearch::new`], with a custom source of placeholder values
    pub fn with_estimator(
        config: &SearchConfig,
        estimator: Arc<dyn Estimator>,
    ) -> Result<Self, SearchError> {
        let provider = ProviderFactory::create(config, estimator)?;
        info!("Searching recipes with '{}'", provider.provider_name());
        Ok(Self::with_provider(provider))
    }

    /// Use an already constructed provider
    pub fn with_provider(provider: Box<dyn RecipeProvider>) -> Self {
        RecipeSearch {
            provider,
            fallback: SampleProvider::new(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Search for recipes matching `criteria`.
    ///
    /// Never fails: provider errors are reported in `SearchOutcome::error`
    /// alongside results from the sample catalogue.
    pub async fn search(&self, criteria: &SearchCriteria) -> SearchOutcome {
        if criteria.is_empty() {
            debug!("No ingredients or equipment given, skipping search");
            return SearchOutcome::default();
        }

        match self.provider.search(criteria).await {
            Ok(recipes) => {
                info!(
                    "Found {} recipes using {}",
                    recipes.len(),
                    self.provider.provider_name()
                );
                SearchOutcome::succeeded(recipes)
            }
            Err(e) => {
                warn!(
                    "Provider {} failed, using sample recipes: {}",
                    self.provider.provider_name(),
                    e
                );
                SearchOutcome::fell_back(self.fallback.rank(criteria), e.to_string())
            }
        }
    }
}
