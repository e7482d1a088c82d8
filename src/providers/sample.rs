use crate::catalogue::sample_recipes;
use crate::model::{MealType, RankedRecipe, Recipe, SearchCriteria};
use crate::providers::RecipeProvider;
use crate::{ranking, SearchError};
use async_trait::async_trait;

/// Offline provider backed by the bundled sample catalogue.
///
/// Also the fallback used when a live provider fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleProvider;

impl SampleProvider {
    pub fn new() -> Self {
        SampleProvider
    }

    /// Score the whole catalogue against `criteria`
    pub fn rank(&self, criteria: &SearchCriteria) -> Vec<RankedRecipe> {
        ranking::rank_catalogue(sample_recipes(), criteria)
    }
}

#[async_trait]
impl RecipeProvider for SampleProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn find_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, SearchError> {
        let needle = ingredient.to_lowercase();
        Ok(sample_recipes()
            .into_iter()
            .filter(|recipe| {
                recipe
                    .ingredients
                    .iter()
                    .any(|i| i.to_lowercase().contains(&needle))
            })
            .collect())
    }

    async fn find_by_category(&self, meal_type: MealType) -> Result<Vec<Recipe>, SearchError> {
        Ok(sample_recipes()
            .into_iter()
            .filter(|recipe| recipe.meal_type == meal_type)
            .collect())
    }

    async fn find_random(&self, count: usize) -> Result<Vec<Recipe>, SearchError> {
        Ok(sample_recipes().into_iter().take(count).collect())
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<RankedRecipe>, SearchError> {
        Ok(self.rank(criteria))
    }
}
