use crate::config::{ProviderKind, SearchConfig};
use crate::estimate::Estimator;
use crate::http::HttpClient;
use crate::providers::{
    EdamamProvider, RecipeProvider, SampleProvider, SpoonacularProvider, TheMealDbProvider,
};
use crate::SearchError;
use log::debug;
use std::sync::Arc;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the provider selected in `config`.
    ///
    /// Missing credentials are not checked here; keyed providers report them
    /// when searched so that the sample fallback applies.
    pub fn create(
        config: &SearchConfig,
        estimator: Arc<dyn Estimator>,
    ) -> Result<Box<dyn RecipeProvider>, SearchError> {
        debug!("Creating '{}' provider", config.provider);

        let http = HttpClient::new(Some(config.timeout()))?;
        let endpoints = &config.endpoints;

        let provider: Box<dyn RecipeProvider> = match config.provider {
            ProviderKind::TheMealDb => Box::new(TheMealDbProvider::new(
                http,
                endpoints.themealdb.clone(),
                estimator,
            )),
            ProviderKind::Spoonacular => Box::new(SpoonacularProvider::new(
                http,
                endpoints.spoonacular.clone(),
                config.api_key.clone(),
            )),
            ProviderKind::Edamam => Box::new(EdamamProvider::new(
                http,
                endpoints.edamam.clone(),
                config.app_id.clone(),
                config.api_key.clone(),
                estimator,
            )),
            ProviderKind::Sample => Box::new(SampleProvider::new()),
        };

        Ok(provider)
    }

    /// Create a provider by name, with every other setting taken from `config`
    pub fn create_named(
        name: &str,
        config: &SearchConfig,
        estimator: Arc<dyn Estimator>,
    ) -> Result<Box<dyn RecipeProvider>, SearchError> {
        let config = SearchConfig {
            provider: name.parse()?,
            ..config.clone()
        };
        Self::create(&config, estimator)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["themealdb", "spoonacular", "edamam", "mock"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::FixedEstimator;

    fn estimator() -> Arc<dyn Estimator> {
        Arc::new(FixedEstimator::default())
    }

    #[test]
    fn test_create_each_provider() {
        for name in ProviderFactory::available_providers() {
            let provider =
                ProviderFactory::create_named(name, &SearchConfig::default(), estimator())
                    .unwrap();
            assert_eq!(provider.provider_name(), name);
        }
    }

    #[test]
    fn test_create_default_provider() {
        let provider = ProviderFactory::create(&SearchConfig::default(), estimator()).unwrap();
        assert_eq!(provider.provider_name(), "themealdb");
    }

    #[test]
    fn test_create_keyed_provider_without_key() {
        let config = SearchConfig::for_provider(ProviderKind::Spoonacular);
        assert!(config.api_key.is_none());
        assert!(ProviderFactory::create(&config, estimator()).is_ok());
    }

    #[test]
    fn test_create_unknown_provider() {
        let result =
            ProviderFactory::create_named("allrecipes", &SearchConfig::default(), estimator());
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Unknown provider"));
        }
    }

    #[test]
    fn test_available_providers() {
        let providers = ProviderFactory::available_providers();
        assert_eq!(providers.len(), 4);
        assert!(providers.contains(&"themealdb"));
        assert!(providers.contains(&"mock"));
    }
}
