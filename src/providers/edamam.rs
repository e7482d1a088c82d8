use crate::estimate::Estimator;
use crate::http::HttpClient;
use crate::model::{Difficulty, MealType, Recipe};
use crate::providers::RecipeProvider;
use crate::SearchError;
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::sync::Arc;

const RESULT_COUNT: usize = 12;
/// Broad query term used for discovery, the API requires one
const DISCOVERY_QUERY: &str = "recipe";
/// Minutes assumed when the API reports no total time
const DEFAULT_COOKING_TIME: u32 = 30;
const INSTRUCTIONS_PLACEHOLDER: &str = "Visit the source URL for detailed instructions";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    recipe: EdamamRecipe,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EdamamRecipe {
    uri: String,
    label: String,
    #[serde(default)]
    image: String,
    #[serde(default, rename = "yield")]
    servings: f64,
    #[serde(default)]
    diet_labels: Vec<String>,
    #[serde(default)]
    health_labels: Vec<String>,
    #[serde(default)]
    ingredient_lines: Vec<String>,
    #[serde(default)]
    calories: f64,
    #[serde(default)]
    total_time: f64,
    #[serde(default)]
    cuisine_type: Vec<String>,
    #[serde(default)]
    meal_type: Vec<String>,
}

fn meal_type_from_labels(labels: &[String]) -> MealType {
    let label = labels.first().map(|l| l.to_lowercase()).unwrap_or_default();

    if label.contains("breakfast") {
        MealType::Breakfast
    } else if label.contains("lunch") {
        MealType::Lunch
    } else if label.contains("snack") || label.contains("teatime") {
        MealType::Snack
    } else {
        MealType::Dinner
    }
}

/// Recipe id is the fragment of the recipe uri
fn recipe_id(uri: &str) -> String {
    match uri.split_once('#') {
        Some((_, fragment)) if !fragment.is_empty() => fragment.to_string(),
        _ => uri.to_string(),
    }
}

pub struct EdamamProvider {
    http: HttpClient,
    base_url: String,
    app_id: Option<String>,
    api_key: Option<String>,
    estimator: Arc<dyn Estimator>,
}

impl EdamamProvider {
    pub fn new(
        http: HttpClient,
        base_url: impl Into<String>,
        app_id: Option<String>,
        api_key: Option<String>,
        estimator: Arc<dyn Estimator>,
    ) -> Self {
        EdamamProvider {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            estimator,
        }
    }

    async fn query(&self, extra: &[(&str, &str)]) -> Result<Vec<Recipe>, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::missing_credential("Edamam"))?;

        let url = format!("{}/search", self.base_url);
        let mut query = vec![
            ("app_id", self.app_id.as_deref().unwrap_or("")),
            ("app_key", api_key),
            ("from", "0"),
        ];
        query.extend_from_slice(extra);

        let response: SearchResponse = self
            .http
            .get_json(self.provider_name(), &url, &query)
            .await?;
        debug!("Edamam: {} hits", response.hits.len());

        Ok(response
            .hits
            .into_iter()
            .map(|hit| self.normalize(hit.recipe))
            .collect())
    }

    fn normalize(&self, recipe: EdamamRecipe) -> Recipe {
        let servings = (recipe.servings.round() as u32).max(1);
        let cooking_time = match recipe.total_time.round() as u32 {
            0 => DEFAULT_COOKING_TIME,
            minutes => minutes,
        };

        let mut dietary_tags = recipe.diet_labels;
        dietary_tags.extend(recipe.health_labels);

        Recipe {
            id: recipe_id(&recipe.uri),
            description: format!(
                "Delicious {} recipe with {} ingredients.",
                recipe.cuisine_type.first().map(String::as_str).unwrap_or(""),
                recipe.ingredient_lines.len()
            ),
            image: recipe.image,
            // No ratings upstream
            rating: self.estimator.rating(),
            review_count: self.estimator.review_count(),
            cooking_time,
            servings,
            calories: (recipe.calories / servings as f64).round().max(0.0) as u32,
            difficulty: Difficulty::from_ready_time(cooking_time),
            meal_type: meal_type_from_labels(&recipe.meal_type),
            dietary_tags,
            ingredients: recipe.ingredient_lines,
            equipment: vec!["oven".to_string(), "stovetop".to_string()],
            instructions: vec![INSTRUCTIONS_PLACEHOLDER.to_string()],
            title: recipe.label,
        }
    }
}

#[async_trait]
impl RecipeProvider for EdamamProvider {
    fn provider_name(&self) -> &str {
        "edamam"
    }

    async fn find_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, SearchError> {
        let to = RESULT_COUNT.to_string();
        self.query(&[("q", ingredient), ("to", to.as_str())]).await
    }

    async fn find_by_category(&self, meal_type: MealType) -> Result<Vec<Recipe>, SearchError> {
        let to = RESULT_COUNT.to_string();
        let term = meal_type.as_str().to_lowercase();
        self.query(&[
            ("q", term.as_str()),
            ("mealType", meal_type.as_str()),
            ("to", to.as_str()),
        ])
        .await
    }

    async fn find_random(&self, count: usize) -> Result<Vec<Recipe>, SearchError> {
        let to = count.to_string();
        self.query(&[("q", DISCOVERY_QUERY), ("to", to.as_str())])
            .await
    }
}
