use crate::estimate::Estimator;
use crate::http::HttpClient;
use crate::model::{Difficulty, MealType, Recipe};
use crate::providers::RecipeProvider;
use crate::SearchError;
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Ingredient slots in a TheMealDB meal (strIngredient1..strIngredient20)
const INGREDIENT_SLOTS: usize = 20;
/// Detail lookups made after an ingredient filter query
const INGREDIENT_DETAIL_LIMIT: usize = 6;
/// Detail lookups made after a category filter query
const CATEGORY_DETAIL_LIMIT: usize = 4;
/// The free tier serves one meal per random request
const RANDOM_REQUEST_LIMIT: usize = 8;

const MEAT_KEYWORDS: &[&str] = &["meat", "chicken", "beef", "pork", "fish", "salmon"];
const DINNER_CATEGORIES: &[&str] = &["Chicken", "Beef", "Pork", "Seafood"];

#[derive(Debug, Deserialize)]
struct MealsResponse<T> {
    meals: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealSummary {
    id_meal: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meal {
    id_meal: String,
    str_meal: String,
    str_category: Option<String>,
    str_area: Option<String>,
    str_instructions: Option<String>,
    str_meal_thumb: Option<String>,
    /// strIngredientN / strMeasureN slots
    #[serde(flatten)]
    slots: HashMap<String, Value>,
}

impl Meal {
    fn slot(&self, key: &str) -> &str {
        self.slots
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("")
    }
}

pub struct TheMealDbProvider {
    http: HttpClient,
    base_url: String,
    estimator: Arc<dyn Estimator>,
}

impl TheMealDbProvider {
    pub fn new(
        http: HttpClient,
        base_url: impl Into<String>,
        estimator: Arc<dyn Estimator>,
    ) -> Self {
        TheMealDbProvider {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            estimator,
        }
    }

    /// GET an endpoint, logging and swallowing any failure
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Option<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        match self.http.get_json(self.provider_name(), &url, query).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("TheMealDB request to {} failed: {}", endpoint, e);
                None
            }
        }
    }

    async fn lookup(&self, id: &str) -> Option<Meal> {
        let response: MealsResponse<Meal> = self.fetch("lookup.php", &[("i", id)]).await?;
        response.meals?.into_iter().next()
    }

    /// Run a filter query and fetch full details for the first `limit` hits,
    /// keeping the filter's order
    async fn filter_with_details(&self, query: (&str, &str), limit: usize) -> Vec<Recipe> {
        let response: Option<MealsResponse<MealSummary>> =
            self.fetch("filter.php", &[query]).await;
        let summaries = match response.and_then(|r| r.meals) {
            Some(meals) => meals,
            None => return Vec::new(),
        };

        let ids = summaries.iter().map(|summary| summary.id_meal.as_str());
        lookup_in_order(ids, limit, |id| self.lookup(id))
            .await
            .into_iter()
            .map(|meal| self.normalize(meal))
            .collect()
    }

    fn normalize(&self, meal: Meal) -> Recipe {
        let ingredients = assemble_ingredients(&meal);
        let raw_instructions = meal.str_instructions.as_deref().unwrap_or("");
        let instructions = split_instructions(raw_instructions);
        let category = meal.str_category.as_deref().unwrap_or("");
        let area = meal.str_area.as_deref().unwrap_or("");

        Recipe {
            description: format!(
                "Delicious {} {} recipe with {} ingredients.",
                area,
                category.to_lowercase(),
                ingredients.len()
            ),
            image: meal.str_meal_thumb.clone().unwrap_or_default(),
            rating: self.estimator.rating(),
            review_count: self.estimator.review_count(),
            cooking_time: estimate_cooking_time(instructions.len()),
            servings: 4,
            calories: self.estimator.calories(),
            difficulty: infer_difficulty(ingredients.len(), instructions.len()),
            meal_type: infer_meal_type(category),
            dietary_tags: infer_dietary_tags(&ingredients, category, area),
            equipment: infer_equipment(raw_instructions),
            ingredients,
            instructions,
            title: meal.str_meal,
            id: meal.id_meal,
        }
    }
}

/// Look up the first `limit` ids concurrently. Results follow the order of
/// `ids`, not the order the lookups finish in, and failed lookups are dropped.
async fn lookup_in_order<'a, T, F, Fut>(
    ids: impl IntoIterator<Item = &'a str>,
    limit: usize,
    lookup: F,
) -> Vec<T>
where
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    join_all(ids.into_iter().take(limit).map(lookup))
        .await
        .into_iter()
        .flatten()
        .collect()
}

/// TheMealDB category closest to a meal type
fn category_for(meal_type: MealType) -> &'static str {
    match meal_type {
        MealType::Breakfast => "Breakfast",
        // No lunch category upstream; use a popular one
        MealType::Lunch => "Chicken",
        MealType::Dinner => "Beef",
        MealType::Snack => "Dessert",
    }
}

fn assemble_ingredients(meal: &Meal) -> Vec<String> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|i| {
            let name = meal.slot(&format!("strIngredient{}", i));
            if name.is_empty() {
                return None;
            }
            let measure = meal.slot(&format!("strMeasure{}", i));
            Some(if measure.is_empty() {
                name.to_string()
            } else {
                format!("{} {}", measure, name)
            })
        })
        .collect()
}

fn split_instructions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn infer_dietary_tags(ingredients: &[String], category: &str, area: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let text = ingredients.join(" ").to_lowercase();

    if !MEAT_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        tags.push("Vegetarian".to_string());
    }
    if category == "Vegan" {
        tags.push("Vegan".to_string());
    }
    if !area.trim().is_empty() {
        tags.push(area.to_string());
    }

    tags
}

fn estimate_cooking_time(steps: usize) -> u32 {
    (steps.saturating_mul(8)).clamp(20, 120) as u32
}

fn infer_difficulty(ingredients: usize, steps: usize) -> Difficulty {
    if ingredients <= 5 && steps <= 4 {
        Difficulty::Easy
    } else if ingredients > 10 || steps > 8 {
        Difficulty::Hard
    } else {
        Difficulty::Medium
    }
}

fn infer_meal_type(category: &str) -> MealType {
    match category {
        "Breakfast" => MealType::Breakfast,
        "Dessert" => MealType::Snack,
        c if DINNER_CATEGORIES.contains(&c) => MealType::Dinner,
        _ => MealType::Lunch,
    }
}

fn infer_equipment(raw_instructions: &str) -> Vec<String> {
    let text = raw_instructions.to_lowercase();
    let mut equipment = vec!["stovetop".to_string()];

    if text.contains("bake") || text.contains("oven") {
        equipment.push("oven".to_string());
    }
    if text.contains("grill") {
        equipment.push("grill".to_string());
    }
    if text.contains("blend") {
        equipment.push("blender".to_string());
    }
    if text.contains("fry") || text.contains("pan") {
        equipment.push("pan".to_string());
    }

    equipment
}

#[async_trait]
impl RecipeProvider for TheMealDbProvider {
    fn provider_name(&self) -> &str {
        "themealdb"
    }

    async fn find_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, SearchError> {
        let recipes = self
            .filter_with_details(("i", ingredient), INGREDIENT_DETAIL_LIMIT)
            .await;
        debug!(
            "TheMealDB: {} recipes for ingredient {:?}",
            recipes.len(),
            ingredient
        );
        Ok(recipes)
    }

    async fn find_by_category(&self, meal_type: MealType) -> Result<Vec<Recipe>, SearchError> {
        let category = category_for(meal_type);
        let recipes = self
            .filter_with_details(("c", category), CATEGORY_DETAIL_LIMIT)
            .await;
        debug!(
            "TheMealDB: {} recipes for category {}",
            recipes.len(),
            category
        );
        Ok(recipes)
    }

    async fn find_random(&self, count: usize) -> Result<Vec<Recipe>, SearchError> {
        let requests = (0..count.min(RANDOM_REQUEST_LIMIT))
            .map(|_| self.fetch::<MealsResponse<Meal>>("random.php", &[]));

        let recipes = join_all(requests)
            .await
            .into_iter()
            .flatten()
            .filter_map(|response| response.meals?.into_iter().next())
            .map(|meal| self.normalize(meal))
            .collect();

        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::FixedEstimator;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::sleep;

    fn meal(value: Value) -> Meal {
        serde_json::from_value(value).unwrap()
    }

    fn provider() -> TheMealDbProvider {
        TheMealDbProvider::new(
            HttpClient::new(None).unwrap(),
            "http://localhost/api/json/v1/1/",
            Arc::new(FixedEstimator::default()),
        )
    }

    #[test]
    fn test_assemble_ingredients_skips_blank_slots() {
        let m = meal(json!({
            "idMeal": "1",
            "strMeal": "Test",
            "strIngredient1": "Chicken",
            "strMeasure1": "1 lb ",
            "strIngredient2": "  ",
            "strMeasure2": "2 tbsp",
            "strIngredient3": "Salt",
            "strMeasure3": "",
            "strIngredient4": null,
            "strIngredient20": "Pepper",
            "strMeasure20": "pinch"
        }));

        assert_eq!(
            assemble_ingredients(&m),
            vec!["1 lb Chicken", "Salt", "pinch Pepper"]
        );
    }

    #[test]
    fn test_split_instructions() {
        let steps = split_instructions("Preheat oven.\r\n\r\n  Mix well.  \nBake 20 minutes.\n");
        assert_eq!(
            steps,
            vec!["Preheat oven.", "Mix well.", "Bake 20 minutes."]
        );
    }

    #[test]
    fn test_dietary_tags() {
        let veg = vec!["2 Eggs".to_string(), "1 cup Flour".to_string()];
        assert_eq!(
            infer_dietary_tags(&veg, "Vegan", "British"),
            vec!["Vegetarian", "Vegan", "British"]
        );

        let meaty = vec!["200g Smoked Salmon".to_string()];
        assert!(infer_dietary_tags(&meaty, "Seafood", "").is_empty());
    }

    #[test]
    fn test_cooking_time_clamped() {
        assert_eq!(estimate_cooking_time(0), 20);
        assert_eq!(estimate_cooking_time(3), 24);
        assert_eq!(estimate_cooking_time(15), 120);
        assert_eq!(estimate_cooking_time(20), 120);
    }

    #[test]
    fn test_difficulty_rules() {
        assert_eq!(infer_difficulty(5, 4), Difficulty::Easy);
        assert_eq!(infer_difficulty(6, 4), Difficulty::Medium);
        assert_eq!(infer_difficulty(11, 2), Difficulty::Hard);
        assert_eq!(infer_difficulty(3, 9), Difficulty::Hard);
    }

    #[test]
    fn test_meal_type_rules() {
        assert_eq!(infer_meal_type("Breakfast"), MealType::Breakfast);
        assert_eq!(infer_meal_type("Dessert"), MealType::Snack);
        assert_eq!(infer_meal_type("Seafood"), MealType::Dinner);
        assert_eq!(infer_meal_type("Pasta"), MealType::Lunch);
        assert_eq!(infer_meal_type(""), MealType::Lunch);
    }

    #[test]
    fn test_equipment_triggers_are_cumulative() {
        assert_eq!(infer_equipment("Stir well."), vec!["stovetop"]);
        assert_eq!(
            infer_equipment("Bake the crust, then GRILL the peppers and fry the onions."),
            vec!["stovetop", "oven", "grill", "pan"]
        );
        assert_eq!(
            infer_equipment("Blend until smooth"),
            vec!["stovetop", "blender"]
        );
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(category_for(MealType::Breakfast), "Breakfast");
        assert_eq!(category_for(MealType::Lunch), "Chicken");
        assert_eq!(category_for(MealType::Dinner), "Beef");
        assert_eq!(category_for(MealType::Snack), "Dessert");
    }

    #[test]
    fn test_normalize() {
        let recipe = provider().normalize(meal(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strInstructions":
                "Preheat oven to 350.\r\nCombine soy sauce in a pan.\r\nBake 15 minutes.",
            "strMealThumb": "https://example.com/teriyaki.jpg",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "chicken breasts",
            "strMeasure2": "2"
        })));

        assert_eq!(recipe.id, "52772");
        assert_eq!(recipe.title, "Teriyaki Chicken Casserole");
        assert_eq!(
            recipe.description,
            "Delicious Japanese chicken recipe with 2 ingredients."
        );
        assert_eq!(
            recipe.ingredients,
            vec!["3/4 cup soy sauce", "2 chicken breasts"]
        );
        assert_eq!(recipe.instructions.len(), 3);
        assert_eq!(recipe.cooking_time, 24);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.meal_type, MealType::Dinner);
        assert_eq!(recipe.dietary_tags, vec!["Japanese"]);
        assert_eq!(recipe.equipment, vec!["stovetop", "oven", "pan"]);
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.calories, 350);
        assert_eq!(recipe.rating, 4.5);
        assert_eq!(recipe.review_count, 100);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(provider().base_url, "http://localhost/api/json/v1/1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_results_keep_list_order() {
        let finished = Arc::new(Mutex::new(Vec::new()));

        // 101 answers last, 102 fails
        let recipes = lookup_in_order(["101", "102", "103", "104"], 3, |id| {
            let finished = finished.clone();
            async move {
                let delay = match id {
                    "101" => 300,
                    "102" => 20,
                    _ => 10,
                };
                sleep(Duration::from_millis(delay)).await;
                finished.lock().unwrap().push(id);
                (id != "102").then(|| id.to_string())
            }
        })
        .await;

        assert_eq!(*finished.lock().unwrap(), vec!["103", "102", "101"]);
        assert_eq!(recipes, vec!["101", "103"]);
    }
}
