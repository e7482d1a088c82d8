use crate::http::HttpClient;
use crate::model::{Difficulty, MealType, Recipe};
use crate::providers::RecipeProvider;
use crate::SearchError;
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

const RESULT_COUNT: &str = "12";
const DESCRIPTION_LENGTH: usize = 200;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid html tag pattern"));

#[derive(Debug, Deserialize)]
struct IngredientHit {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ComplexSearchResponse {
    #[serde(default)]
    results: Vec<SpoonacularRecipe>,
}

#[derive(Debug, Deserialize)]
struct RandomResponse {
    #[serde(default)]
    recipes: Vec<SpoonacularRecipe>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpoonacularRecipe {
    id: u64,
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    ready_in_minutes: u32,
    #[serde(default)]
    servings: u32,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    dish_types: Vec<String>,
    #[serde(default)]
    diets: Vec<String>,
    #[serde(default)]
    analyzed_instructions: Vec<InstructionBlock>,
    #[serde(default)]
    extended_ingredients: Vec<ExtendedIngredient>,
    nutrition: Option<Nutrition>,
    spoonacular_score: Option<f64>,
    aggregate_likes: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct InstructionBlock {
    #[serde(default)]
    steps: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    step: String,
}

#[derive(Debug, Deserialize)]
struct ExtendedIngredient {
    name: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    unit: String,
}

#[derive(Debug, Deserialize)]
struct Nutrition {
    #[serde(default)]
    nutrients: Vec<Nutrient>,
}

#[derive(Debug, Deserialize)]
struct Nutrient {
    name: String,
    amount: f64,
}

impl From<SpoonacularRecipe> for Recipe {
    fn from(recipe: SpoonacularRecipe) -> Self {
        let servings = recipe.servings.max(1);
        let total_calories = recipe
            .nutrition
            .as_ref()
            .and_then(|n| n.nutrients.iter().find(|n| n.name == "Calories"))
            .map(|n| n.amount)
            .unwrap_or(0.0);
        // Spoonacular scores run 0-100
        let score = recipe.spoonacular_score.filter(|s| *s > 0.0).unwrap_or(50.0);
        let cooking_time = recipe.ready_in_minutes.max(1);

        Recipe {
            id: recipe.id.to_string(),
            description: summarize(&recipe.summary),
            image: recipe.image.unwrap_or_default(),
            rating: (score / 20.0).clamp(0.0, 5.0),
            review_count: recipe.aggregate_likes.unwrap_or(0),
            cooking_time,
            servings,
            calories: (total_calories / servings as f64).round().max(0.0) as u32,
            difficulty: Difficulty::from_ready_time(cooking_time),
            meal_type: meal_type_from_dish_types(&recipe.dish_types),
            dietary_tags: recipe.diets,
            ingredients: recipe
                .extended_ingredients
                .iter()
                .map(|i| format!("{} {} {}", i.amount, i.unit, i.name))
                .collect(),
            equipment: vec!["oven".to_string(), "stovetop".to_string()],
            instructions: recipe
                .analyzed_instructions
                .into_iter()
                .next()
                .map(|block| block.steps.into_iter().map(|s| s.step).collect())
                .unwrap_or_default(),
            title: recipe.title,
        }
    }
}

/// Plain-text summary: tags stripped, cut to 200 characters
fn summarize(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, "");
    let mut summary: String = text.chars().take(DESCRIPTION_LENGTH).collect();
    summary.push_str("...");
    summary
}

fn meal_type_from_dish_types(dish_types: &[String]) -> MealType {
    let dish_type = dish_types
        .first()
        .map(|d| d.to_lowercase())
        .unwrap_or_default();

    if dish_type.contains("breakfast") {
        MealType::Breakfast
    } else if dish_type.contains("lunch") {
        MealType::Lunch
    } else if dish_type.contains("snack") || dish_type.contains("appetizer") {
        MealType::Snack
    } else {
        MealType::Dinner
    }
}

/// Spoonacular dish type closest to a meal type
fn dish_type_for(meal_type: MealType) -> &'static str {
    match meal_type {
        MealType::Breakfast => "breakfast",
        MealType::Lunch | MealType::Dinner => "main course",
        MealType::Snack => "snack",
    }
}

pub struct SpoonacularProvider {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl SpoonacularProvider {
    pub fn new(http: HttpClient, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        SpoonacularProvider {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn api_key(&self) -> Result<&str, SearchError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SearchError::missing_credential("Spoonacular"))
    }

    async fn information(&self, api_key: &str, id: u64) -> Option<Recipe> {
        let url = format!("{}/recipes/{}/information", self.base_url, id);
        let query = [("apiKey", api_key), ("includeNutrition", "true")];
        match self
            .http
            .get_json::<SpoonacularRecipe>(self.provider_name(), &url, &query)
            .await
        {
            Ok(recipe) => Some(recipe.into()),
            Err(e) => {
                warn!("Spoonacular detail lookup for {} failed: {}", id, e);
                None
            }
        }
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularProvider {
    fn provider_name(&self) -> &str {
        "spoonacular"
    }

    async fn find_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, SearchError> {
        let api_key = self.api_key()?;
        let url = format!("{}/recipes/findByIngredients", self.base_url);
        let query = [
            ("apiKey", api_key),
            ("ingredients", ingredient),
            ("number", RESULT_COUNT),
            // Maximize used ingredients
            ("ranking", "2"),
            ("ignorePantry", "true"),
        ];

        let hits: Vec<IngredientHit> = self
            .http
            .get_json(self.provider_name(), &url, &query)
            .await?;
        debug!("Spoonacular: {} hits for {:?}", hits.len(), ingredient);

        let lookups = hits.iter().map(|hit| self.information(api_key, hit.id));
        Ok(join_all(lookups).await.into_iter().flatten().collect())
    }

    async fn find_by_category(&self, meal_type: MealType) -> Result<Vec<Recipe>, SearchError> {
        let api_key = self.api_key()?;
        let url = format!("{}/recipes/complexSearch", self.base_url);
        let query = [
            ("apiKey", api_key),
            ("type", dish_type_for(meal_type)),
            ("number", RESULT_COUNT),
            ("addRecipeInformation", "true"),
            ("addRecipeNutrition", "true"),
        ];

        let response: ComplexSearchResponse = self
            .http
            .get_json(self.provider_name(), &url, &query)
            .await?;
        Ok(response.results.into_iter().map(Recipe::from).collect())
    }

    async fn find_random(&self, count: usize) -> Result<Vec<Recipe>, SearchError> {
        let api_key = self.api_key()?;
        let url = format!("{}/recipes/random", self.base_url);
        let number = count.to_string();
        let query = [
            ("apiKey", api_key),
            ("number", number.as_str()),
            ("includeNutrition", "true"),
        ];

        let response: RandomResponse = self
            .http
            .get_json(self.provider_name(), &url, &query)
            .await?;
        Ok(response.recipes.into_iter().map(Recipe::from).collect())
    }
}
