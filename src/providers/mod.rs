mod edamam;
mod factory;
mod sample;
mod spoonacular;
mod themealdb;

pub use edamam::EdamamProvider;
pub use factory::ProviderFactory;
pub use sample::SampleProvider;
pub use spoonacular::SpoonacularProvider;
pub use themealdb::TheMealDbProvider;

use crate::model::{MealType, RankedRecipe, Recipe, SearchCriteria};
use crate::{ranking, SearchError};
use async_trait::async_trait;
use log::debug;

/// Number of recipes requested when the user gave neither an ingredient nor a
/// meal type
pub const RANDOM_DISCOVERY_COUNT: usize = 12;

/// Unified trait for all recipe sources
///
/// Adapters absorb failures of individual lookups and return what they could
/// fetch. An `Err` means the whole search cannot be served by this provider.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Get the provider name (e.g., "themealdb", "spoonacular")
    fn provider_name(&self) -> &str;

    /// Recipes that use `ingredient`
    async fn find_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, SearchError>;

    /// Recipes in the provider's category closest to `meal_type`
    async fn find_by_category(&self, meal_type: MealType) -> Result<Vec<Recipe>, SearchError>;

    /// Up to `count` arbitrary recipes
    async fn find_random(&self, count: usize) -> Result<Vec<Recipe>, SearchError>;

    /// Query the provider for `criteria` and rank what comes back.
    ///
    /// Only the first ingredient narrows the query; the rest are used for
    /// scoring.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<RankedRecipe>, SearchError> {
        let mut candidates = Vec::new();

        if let Some(first) = criteria.ingredients.first() {
            candidates.extend(self.find_by_ingredient(first).await?);
        }

        if let Some(meal_type) = criteria.meal_type {
            candidates.extend(self.find_by_category(meal_type).await?);
        }

        if criteria.ingredients.is_empty() && criteria.meal_type.is_none() {
            candidates.extend(self.find_random(RANDOM_DISCOVERY_COUNT).await?);
        }

        debug!(
            "{} returned {} candidate recipes",
            self.provider_name(),
            candidates.len()
        );

        Ok(ranking::rank_external(candidates, criteria))
    }
}
