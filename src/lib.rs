//! Find recipes you can cook with the ingredients and equipment on hand.
//!
//! Recipes come from a live provider (TheMealDB, Spoonacular or Edamam),
//! are normalized into one [`Recipe`] shape and ranked by how well they match
//! what the user has. When the live provider fails, the bundled sample
//! catalogue is searched instead.
//!
//! # Example
//! ```no_run
//! # use recipe_finder::{search_recipes, SearchCriteria};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let criteria = SearchCriteria::new()
//!     .ingredients(["chicken", "garlic"])
//!     .equipment_item("oven");
//! let outcome = search_recipes(&criteria).await?;
//! for ranked in outcome.recipes {
//!     println!("{}% {}", ranked.match_percentage, ranked.recipe.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalogue;
pub mod config;
pub mod error;
pub mod estimate;
pub mod http;
pub mod model;
pub mod providers;
pub mod ranking;
pub mod search;
pub mod session;

pub use config::{ProviderKind, SearchConfig};
pub use error::SearchError;
pub use estimate::{Estimator, FixedEstimator, RandomEstimator};
pub use model::{Difficulty, MealType, RankedRecipe, Recipe, SearchCriteria, SearchOutcome};
pub use providers::{ProviderFactory, RecipeProvider};
pub use search::RecipeSearch;
pub use session::SearchSession;

/// Load configuration and run a single search
///
/// Only configuration errors are returned; provider failures are reported in
/// the outcome.
pub async fn search_recipes(criteria: &SearchCriteria) -> Result<SearchOutcome, SearchError> {
    let config = SearchConfig::load()?;
    let search = RecipeSearch::new(&config)?;
    Ok(search.search(criteria).await)
}
