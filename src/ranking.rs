//! Scoring, filtering and ordering of candidate recipes.
//!
//! Two scoring variants exist. Results normalized from a live provider are
//! scored on ingredients alone and never drop below [`MIN_RELEVANCE`]. The
//! sample catalogue is scored on ingredients and equipment together, and
//! recipes with no overlap at all are left out.

use crate::model::{RankedRecipe, Recipe, SearchCriteria, NO_COOKING_TIME_CAP};
use std::collections::HashSet;

/// Most results returned for a live provider search
pub const MAX_EXTERNAL_RESULTS: usize = 12;

/// Lowest score an externally sourced recipe can have
pub const MIN_RELEVANCE: u8 = 25;

/// Keep the first recipe seen for every id
pub fn dedupe_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|recipe| seen.insert(recipe.id.clone()))
        .collect()
}

/// Count recipe ingredients that contain, or are contained in, a user ingredient
fn count_ingredient_matches(recipe_ingredients: &[String], user_ingredients: &[String]) -> usize {
    let user: Vec<String> = user_ingredients.iter().map(|u| u.to_lowercase()).collect();
    recipe_ingredients
        .iter()
        .map(|ingredient| ingredient.to_lowercase())
        .filter(|ingredient| {
            user.iter()
                .any(|u| ingredient.contains(u.as_str()) || u.contains(ingredient.as_str()))
        })
        .count()
}

fn percent(matches: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((matches as f64 / total as f64) * 100.0).round() as u8
}

/// Ingredient-only score, floored at [`MIN_RELEVANCE`]
pub fn ingredient_match_percentage(recipe: &Recipe, user_ingredients: &[String]) -> u8 {
    let matches = count_ingredient_matches(&recipe.ingredients, user_ingredients);
    let total = recipe.ingredients.len().max(1);
    percent(matches, total).max(MIN_RELEVANCE)
}

/// Ingredient and equipment score. Equipment must match exactly.
pub fn combined_match_percentage(
    recipe: &Recipe,
    user_ingredients: &[String],
    user_equipment: &[String],
) -> u8 {
    let ingredient_matches = count_ingredient_matches(&recipe.ingredients, user_ingredients);
    let equipment_matches = recipe
        .equipment
        .iter()
        .filter(|item| user_equipment.contains(item))
        .count();

    percent(
        ingredient_matches + equipment_matches,
        recipe.ingredients.len() + recipe.equipment.len(),
    )
}

/// Case-insensitive substring match of the preference against any tag
pub fn matches_dietary_preference(recipe: &Recipe, preference: &str) -> bool {
    let preference = preference.to_lowercase();
    recipe
        .dietary_tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(&preference))
}

/// Dietary preference, cooking time cap and rating floor
pub fn apply_filters(recipes: Vec<RankedRecipe>, criteria: &SearchCriteria) -> Vec<RankedRecipe> {
    recipes
        .into_iter()
        .filter(|ranked| {
            criteria
                .dietary_preference
                .as_deref()
                .map_or(true, |pref| matches_dietary_preference(&ranked.recipe, pref))
        })
        .filter(|ranked| {
            criteria.max_cooking_time >= NO_COOKING_TIME_CAP
                || ranked.recipe.cooking_time <= criteria.max_cooking_time
        })
        .filter(|ranked| criteria.min_rating <= 0.0 || ranked.recipe.rating >= criteria.min_rating)
        .collect()
}

/// Best match first, then highest rating. Ties keep their input order.
pub fn sort_ranked(recipes: &mut [RankedRecipe]) {
    recipes.sort_by(|a, b| {
        b.match_percentage
            .cmp(&a.match_percentage)
            .then_with(|| b.recipe.rating.total_cmp(&a.recipe.rating))
    });
}

/// Rank recipes normalized from a live provider
pub fn rank_external(recipes: Vec<Recipe>, criteria: &SearchCriteria) -> Vec<RankedRecipe> {
    let scored = dedupe_by_id(recipes)
        .into_iter()
        .map(|recipe| RankedRecipe {
            match_percentage: ingredient_match_percentage(&recipe, &criteria.ingredients),
            recipe,
        })
        .collect();

    let mut ranked = apply_filters(scored, criteria);
    sort_ranked(&mut ranked);
    ranked.truncate(MAX_EXTERNAL_RESULTS);
    ranked
}

/// Rank the sample catalogue
pub fn rank_catalogue(recipes: Vec<Recipe>, criteria: &SearchCriteria) -> Vec<RankedRecipe> {
    let scored = dedupe_by_id(recipes)
        .into_iter()
        .map(|recipe| RankedRecipe {
            match_percentage: combined_match_percentage(
                &recipe,
                &criteria.ingredients,
                &criteria.equipment,
            ),
            recipe,
        })
        .filter(|ranked| ranked.match_percentage > 0)
        .filter(|ranked| {
            criteria
                .meal_type
                .map_or(true, |meal_type| ranked.recipe.meal_type == meal_type)
        })
        .collect();

    let mut ranked = apply_filters(scored, criteria);
    sort_ranked(&mut ranked);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, MealType};

    fn recipe(id: &str, ingredients: &[&str], rating: f64) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            description: String::new(),
            image: String::new(),
            rating,
            review_count: 0,
            cooking_time: 30,
            servings: 2,
            calories: 300,
            difficulty: Difficulty::Medium,
            meal_type: MealType::Dinner,
            dietary_tags: vec![],
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            equipment: vec![],
            instructions: vec![],
        }
    }

    fn scored(recipe: Recipe, match_percentage: u8) -> RankedRecipe {
        RankedRecipe {
            recipe,
            match_percentage,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let mut second = recipe("a", &["rice"], 3.0);
        second.title = "Duplicate".to_string();

        let deduped = dedupe_by_id(vec![
            recipe("a", &["chicken"], 4.0),
            recipe("b", &["beef"], 4.0),
            second,
        ]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id, "a");
        assert_eq!(deduped[0].title, "Recipe a");
        assert_eq!(deduped[1].id, "b");
    }

    #[test]
    fn test_ingredient_match_is_bidirectional_and_case_insensitive() {
        let r = recipe("1", &["2 cups Chicken Stock", "salt", "olive oil"], 4.0);

        // "chicken" is inside "2 cups chicken stock"; "salt" is inside "sea salt"
        let score = ingredient_match_percentage(&r, &strings(&["CHICKEN", "sea salt"]));
        assert_eq!(score, 67);
    }

    #[test]
    fn test_ingredient_score_floor() {
        let r = recipe("1", &["beef", "onion", "carrot", "celery"], 4.0);
        assert_eq!(ingredient_match_percentage(&r, &strings(&["tofu"])), 25);
        assert_eq!(ingredient_match_percentage(&r, &[]), 25);
    }

    #[test]
    fn test_ingredient_score_with_no_ingredients() {
        let r = recipe("1", &[], 4.0);
        assert_eq!(ingredient_match_percentage(&r, &strings(&["egg"])), 25);
    }

    #[test]
    fn test_ingredient_score_is_monotonic() {
        let r = recipe(
            "1",
            &["1 lb chicken", "2 garlic", "1 lemon", "thyme", "butter"],
            4.0,
        );
        let pool = ["garlic", "lemon", "tofu", "thyme", "butter", "chicken"];

        let mut previous = 0;
        for n in 0..=pool.len() {
            let score = ingredient_match_percentage(&r, &strings(&pool[..n]));
            assert!(score >= previous, "score dropped at {} ingredients", n);
            assert!(score >= MIN_RELEVANCE);
            previous = score;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn test_combined_score_counts_equipment_exactly() {
        let mut r = recipe("1", &["rice", "egg"], 4.0);
        r.equipment = strings(&["wok", "stovetop"]);

        let user_equipment = strings(&["wok", "Stovetop"]);
        let score = combined_match_percentage(&r, &strings(&["rice"]), &user_equipment);
        assert_eq!(score, 50);
    }

    #[test]
    fn test_combined_score_zero_denominator() {
        let r = recipe("1", &[], 4.0);
        assert_eq!(combined_match_percentage(&r, &strings(&["rice"]), &[]), 0);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut ranked = vec![
            scored(recipe("first", &[], 4.5), 50),
            scored(recipe("top", &[], 4.0), 80),
            scored(recipe("second", &[], 4.5), 50),
            scored(recipe("rated", &[], 4.9), 50),
        ];

        sort_ranked(&mut ranked);

        let ids: Vec<_> = ranked.iter().map(|r| r.recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "rated", "first", "second"]);
    }

    #[test]
    fn test_filters_are_idempotent() {
        let mut quick = recipe("quick", &["egg"], 4.9);
        quick.cooking_time = 10;
        quick.dietary_tags = strings(&["Vegetarian"]);
        let mut slow = recipe("slow", &["egg"], 4.9);
        slow.cooking_time = 90;
        slow.dietary_tags = strings(&["Vegetarian"]);
        let mut meaty = recipe("meaty", &["beef"], 4.9);
        meaty.cooking_time = 10;
        let low = recipe("low", &["egg"], 3.0);

        let criteria = SearchCriteria::new()
            .dietary_preference("vegetarian")
            .max_cooking_time(30)
            .min_rating(4.5);

        let ranked: Vec<_> = [quick, slow, meaty, low]
            .into_iter()
            .map(|recipe| scored(recipe, 50))
            .collect();

        let once = apply_filters(ranked, &criteria);
        let twice = apply_filters(once.clone(), &criteria);

        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
        assert_eq!(once[0].recipe.id, "quick");
    }

    #[test]
    fn test_filters_disabled_at_sentinels() {
        let mut slow = recipe("slow", &["egg"], 0.5);
        slow.cooking_time = 240;

        let ranked = vec![scored(slow, 25)];
        let filtered = apply_filters(ranked, &SearchCriteria::new());
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_dietary_preference_substring() {
        let mut r = recipe("1", &[], 4.0);
        r.dietary_tags = strings(&["Gluten-Free", "High-Protein"]);

        assert!(matches_dietary_preference(&r, "gluten"));
        assert!(matches_dietary_preference(&r, "High-Protein"));
        assert!(!matches_dietary_preference(&r, "Vegan"));
    }

    #[test]
    fn test_rank_external_caps_results() {
        let recipes: Vec<_> = (0..20)
            .map(|i| recipe(&i.to_string(), &["flour"], 4.0))
            .collect();

        let ranked = rank_external(recipes, &SearchCriteria::new().ingredient("flour"));
        assert_eq!(ranked.len(), MAX_EXTERNAL_RESULTS);
        assert!(ranked.iter().all(|r| r.match_percentage == 100));
        assert_eq!(ranked[0].recipe.id, "0");
    }

    #[test]
    fn test_rank_external_dedupes_before_scoring() {
        let recipes = vec![
            recipe("7", &["pork"], 4.1),
            recipe("8", &["pork", "apple"], 4.2),
            recipe("7", &["pork"], 4.1),
        ];

        let ranked = rank_external(recipes, &SearchCriteria::new().ingredient("pork"));
        let ids: Vec<_> = ranked.iter().map(|r| r.recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "8"]);
    }

    #[test]
    fn test_rank_catalogue_drops_zero_scores_and_filters_meal_type() {
        let mut breakfast = recipe("b", &["eggs"], 4.0);
        breakfast.meal_type = MealType::Breakfast;
        let dinner = recipe("d", &["eggs"], 4.0);
        let unrelated = recipe("u", &["beef"], 5.0);

        let criteria = SearchCriteria::new().ingredient("eggs");
        let all = rank_catalogue(
            vec![breakfast.clone(), dinner.clone(), unrelated.clone()],
            &criteria,
        );
        assert_eq!(all.len(), 2);

        let only_breakfast = rank_catalogue(
            vec![breakfast, dinner, unrelated],
            &criteria.meal_type(MealType::Breakfast),
        );
        assert_eq!(only_breakfast.len(), 1);
        assert_eq!(only_breakfast[0].recipe.id, "b");
    }
}
