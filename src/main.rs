use clap::Parser;
use log::debug;
use recipe_finder::catalogue::{AVAILABLE_EQUIPMENT, AVAILABLE_INGREDIENTS};
use recipe_finder::model::NO_COOKING_TIME_CAP;
use recipe_finder::{MealType, ProviderKind, RecipeSearch, SearchConfig, SearchCriteria};

/// recipe-finder - recipes you can cook with what you have
#[derive(Parser, Debug)]
#[command(name = "recipe-finder", version)]
#[command(about = "Find recipes matching the ingredients and equipment on hand", long_about = None)]
struct Cli {
    /// Ingredient you have (repeatable); the first one narrows the provider query
    #[arg(short, long = "ingredient")]
    ingredients: Vec<String>,

    /// Equipment you have (repeatable)
    #[arg(short, long = "equipment")]
    equipment: Vec<String>,

    /// Only breakfast, lunch, dinner or snack recipes
    #[arg(long)]
    meal_type: Option<MealType>,

    /// Dietary preference, e.g. Vegetarian or Gluten-Free
    #[arg(long)]
    diet: Option<String>,

    /// Maximum cooking time in minutes (120 means no limit)
    #[arg(long, default_value_t = NO_COOKING_TIME_CAP)]
    max_time: u32,

    /// Minimum rating, 0 to 5
    #[arg(long, default_value_t = 0.0)]
    min_rating: f64,

    /// Recipe provider: themealdb, spoonacular, edamam or mock (overrides config)
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// API key for the provider (overrides config)
    #[arg(long)]
    api_key: Option<String>,

    /// Print the results as JSON
    #[arg(long)]
    json: bool,

    /// Print the suggested ingredient names and exit
    #[arg(long)]
    list_ingredients: bool,

    /// Print the suggested equipment names and exit
    #[arg(long)]
    list_equipment: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_ingredients || cli.list_equipment {
        let names = if cli.list_ingredients {
            AVAILABLE_INGREDIENTS
        } else {
            AVAILABLE_EQUIPMENT
        };
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut config = SearchConfig::load()?;
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }
    if cli.api_key.is_some() {
        config.api_key = cli.api_key.clone();
    }
    debug!(
        "Using provider {} (timeout {}s)",
        config.provider, config.timeout
    );

    let mut criteria = SearchCriteria::new()
        .ingredients(cli.ingredients)
        .equipment(cli.equipment)
        .max_cooking_time(cli.max_time)
        .min_rating(cli.min_rating);
    if let Some(meal_type) = cli.meal_type {
        criteria = criteria.meal_type(meal_type);
    }
    if let Some(diet) = cli.diet {
        criteria = criteria.dietary_preference(diet);
    }

    // Empty criteria give an empty outcome without querying the provider
    let search = RecipeSearch::new(&config)?;
    let outcome = search.search(&criteria).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if criteria.is_empty() {
        eprintln!("Give at least one --ingredient or --equipment to search.");
        return Ok(());
    }

    if let Some(error) = &outcome.error {
        eprintln!(
            "{} is unavailable ({}), showing sample recipes.",
            search.provider_name(),
            error
        );
    }

    if outcome.recipes.is_empty() {
        println!("No recipes found.");
    }

    for ranked in &outcome.recipes {
        let recipe = &ranked.recipe;
        println!(
            "{:>3}% match  {}  ({:.1}★, {} min, {:?}, {})",
            ranked.match_percentage,
            recipe.title,
            recipe.rating,
            recipe.cooking_time,
            recipe.difficulty,
            recipe.meal_type
        );
        if !recipe.dietary_tags.is_empty() {
            println!("            {}", recipe.dietary_tags.join(", "));
        }
    }

    Ok(())
}
