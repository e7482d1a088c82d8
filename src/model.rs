use crate::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cooking time (minutes) at or above which no cap is applied
pub const NO_COOKING_TIME_CAP: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Difficulty derived from the total ready time of a recipe
    pub fn from_ready_time(minutes: u32) -> Self {
        if minutes > 60 {
            Difficulty::Hard
        } else if minutes > 30 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(SearchError::UnknownMealType(s.to_string())),
        }
    }
}

/// Canonical recipe record shared by every provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique within one provider only
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    /// 0.0 to 5.0
    pub rating: f64,
    pub review_count: u32,
    /// Minutes
    pub cooking_time: u32,
    pub servings: u32,
    /// Per serving
    pub calories: u32,
    pub difficulty: Difficulty,
    pub meal_type: MealType,
    pub dietary_tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub equipment: Vec<String>,
    /// Execution order
    pub instructions: Vec<String>,
}

/// A recipe together with its relevance to the current search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// 0 to 100
    pub match_percentage: u8,
}

/// What the user has on hand, plus result filters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub ingredients: Vec<String>,
    pub equipment: Vec<String>,
    pub meal_type: Option<MealType>,
    pub dietary_preference: Option<String>,
    /// `NO_COOKING_TIME_CAP` disables the filter
    pub max_cooking_time: u32,
    /// 0.0 disables the filter
    pub min_rating: f64,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            ingredients: Vec::new(),
            equipment: Vec::new(),
            meal_type: None,
            dietary_preference: None,
            max_cooking_time: NO_COOKING_TIME_CAP,
            min_rating: 0.0,
        }
    }
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient; blanks and duplicates are ignored
    pub fn ingredient(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.ingredients, name.into());
        self
    }

    pub fn ingredients<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |c, n| c.ingredient(n))
    }

    /// Add a piece of equipment; blanks and duplicates are ignored
    pub fn equipment_item(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.equipment, name.into());
        self
    }

    pub fn equipment<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |c, n| c.equipment_item(n))
    }

    pub fn meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = Some(meal_type);
        self
    }

    pub fn dietary_preference(mut self, preference: impl Into<String>) -> Self {
        let preference = preference.into();
        let preference = preference.trim();
        self.dietary_preference = if preference.is_empty() {
            None
        } else {
            Some(preference.to_string())
        };
        self
    }

    pub fn max_cooking_time(mut self, minutes: u32) -> Self {
        self.max_cooking_time = minutes;
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = rating;
        self
    }

    /// True when neither ingredients nor equipment were given
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.equipment.is_empty()
    }
}

fn push_unique(items: &mut Vec<String>, value: String) {
    let value = value.trim();
    if !value.is_empty() && !items.iter().any(|v| v == value) {
        items.push(value.to_string());
    }
}

/// Result of one search as seen by the consumer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub recipes: Vec<RankedRecipe>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SearchOutcome {
    /// A new search is in flight. Previous results stay visible until it
    /// finishes.
    pub fn mark_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn succeeded(recipes: Vec<RankedRecipe>) -> Self {
        Self {
            recipes,
            is_loading: false,
            error: None,
        }
    }

    /// Results served from the sample catalogue after the live provider failed
    pub fn fell_back(recipes: Vec<RankedRecipe>, error: impl Into<String>) -> Self {
        Self {
            recipes,
            is_loading: false,
            error: Some(error.into()),
        }
    }
}
