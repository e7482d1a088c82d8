//! Bundled sample recipes, served when no live provider is used or when the
//! live provider fails.

use crate::model::{Difficulty, MealType, Recipe};

/// Ingredients offered as suggestions to the user
pub const AVAILABLE_INGREDIENTS: &[&str] = &[
    "chicken",
    "salmon",
    "beef",
    "pork",
    "eggs",
    "milk",
    "cheese",
    "butter",
    "rice",
    "pasta",
    "flour",
    "bread",
    "potatoes",
    "broccoli",
    "carrots",
    "bell peppers",
    "mushrooms",
    "onions",
    "garlic",
    "ginger",
    "tomatoes",
    "spinach",
    "lettuce",
    "cucumbers",
    "olive oil",
    "soy sauce",
    "salt",
    "pepper",
    "herbs",
    "spices",
    "lemon",
    "lime",
    "apples",
    "bananas",
];

/// Equipment offered as suggestions to the user
pub const AVAILABLE_EQUIPMENT: &[&str] = &[
    "oven",
    "stovetop",
    "microwave",
    "grill",
    "air fryer",
    "pan",
    "pot",
    "wok",
    "baking sheet",
    "roasting pan",
    "blender",
    "food processor",
    "mixer",
    "whisk",
    "tongs",
    "ladle",
];

struct SampleRecipe {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    image: &'static str,
    rating: f64,
    review_count: u32,
    cooking_time: u32,
    servings: u32,
    calories: u32,
    difficulty: Difficulty,
    meal_type: MealType,
    dietary_tags: &'static [&'static str],
    ingredients: &'static [&'static str],
    equipment: &'static [&'static str],
    instructions: &'static [&'static str],
}

impl From<&SampleRecipe> for Recipe {
    fn from(sample: &SampleRecipe) -> Self {
        Recipe {
            id: sample.id.to_string(),
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            image: sample.image.to_string(),
            rating: sample.rating,
            review_count: sample.review_count,
            cooking_time: sample.cooking_time,
            servings: sample.servings,
            calories: sample.calories,
            difficulty: sample.difficulty,
            meal_type: sample.meal_type,
            dietary_tags: owned(sample.dietary_tags),
            ingredients: owned(sample.ingredients),
            equipment: owned(sample.equipment),
            instructions: owned(sample.instructions),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const SAMPLE_RECIPES: &[SampleRecipe] = &[
    SampleRecipe {
        id: "1",
        title: "Garlic Herb Roasted Chicken",
        description: "Juicy roasted chicken with aromatic herbs and garlic, perfect for a family dinner.",
        image: "https://images.pexels.com/photos/2338407/pexels-photo-2338407.jpeg?auto=compress&cs=tinysrgb&w=800",
        rating: 4.8,
        review_count: 342,
        cooking_time: 75,
        servings: 4,
        calories: 285,
        difficulty: Difficulty::Medium,
        meal_type: MealType::Dinner,
        dietary_tags: &["Gluten-Free", "High-Protein"],
        ingredients: &[
            "chicken",
            "garlic",
            "rosemary",
            "thyme",
            "olive oil",
            "lemon",
        ],
        equipment: &["oven", "roasting pan"],
        instructions: &[
            "Preheat oven to 425°F (220°C)",
            "Mix herbs, garlic, and olive oil",
            "Rub mixture under and over chicken skin",
            "Roast for 60-75 minutes until internal temp reaches 165°F",
            "Let rest 10 minutes before carving",
        ],
    },
    SampleRecipe {
        id: "2",
        title: "Cheesy Broccoli Rice Bowl",
        description: "Comforting rice bowl with steamed broccoli and melted cheese.",
        image: "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=800",
        rating: 4.5,
        review_count: 128,
        cooking_time: 25,
        servings: 2,
        calories: 320,
        difficulty: Difficulty::Easy,
        meal_type: MealType::Lunch,
        dietary_tags: &["Vegetarian", "Gluten-Free"],
        ingredients: &["rice", "broccoli", "cheese", "butter", "garlic"],
        equipment: &["stovetop", "pan", "pot"],
        instructions: &[
            "Cook rice according to package instructions",
            "Steam broccoli until tender",
            "Sauté garlic in butter",
            "Mix rice, broccoli, and cheese",
            "Serve hot with garlic butter",
        ],
    },
    SampleRecipe {
        id: "3",
        title: "Mediterranean Grilled Salmon",
        description: "Fresh salmon fillet grilled to perfection with Mediterranean herbs.",
        image: "https://images.pexels.com/photos/3171837/pexels-photo-3171837.jpeg?auto=compress&cs=tinysrgb&w=800",
        rating: 4.9,
        review_count: 256,
        cooking_time: 20,
        servings: 2,
        calories: 245,
        difficulty: Difficulty::Medium,
        meal_type: MealType::Dinner,
        dietary_tags: &["Keto", "Low-Carb", "High-Protein"],
        ingredients: &["salmon", "olive oil", "lemon", "oregano", "garlic"],
        equipment: &["grill", "tongs"],
        instructions: &[
            "Preheat grill to medium-high heat",
            "Brush salmon with olive oil and seasonings",
            "Grill 4-6 minutes per side",
            "Check internal temperature reaches 145°F",
            "Serve with lemon wedges",
        ],
    },
    SampleRecipe {
        id: "4",
        title: "Quick Vegetable Stir Fry",
        description: "Colorful mix of fresh vegetables stir-fried with savory sauce.",
        image: "https://images.pexels.com/photos/2233348/pexels-photo-2233348.jpeg?auto=compress&cs=tinysrgb&w=800",
        rating: 4.6,
        review_count: 89,
        cooking_time: 15,
        servings: 3,
        calories: 180,
        difficulty: Difficulty::Easy,
        meal_type: MealType::Lunch,
        dietary_tags: &["Vegan", "Low-Calorie", "Gluten-Free"],
        ingredients: &[
            "broccoli",
            "carrots",
            "bell peppers",
            "soy sauce",
            "garlic",
            "ginger",
        ],
        equipment: &["stovetop", "wok", "pan"],
        instructions: &[
            "Heat oil in wok or large pan",
            "Add garlic and ginger, stir for 30 seconds",
            "Add harder vegetables first (carrots, broccoli)",
            "Stir-fry for 3-4 minutes",
            "Add softer vegetables and sauce, cook 2 minutes more",
        ],
    },
    SampleRecipe {
        id: "5",
        title: "Classic Pancakes",
        description: "Fluffy, golden pancakes perfect for weekend breakfast.",
        image: "https://images.pexels.com/photos/376464/pexels-photo-376464.jpeg?auto=compress&cs=tinysrgb&w=800",
        rating: 4.7,
        review_count: 445,
        cooking_time: 20,
        servings: 4,
        calories: 195,
        difficulty: Difficulty::Easy,
        meal_type: MealType::Breakfast,
        dietary_tags: &["Vegetarian"],
        ingredients: &["flour", "milk", "eggs", "butter", "sugar", "baking powder"],
        equipment: &["stovetop", "pan", "whisk"],
        instructions: &[
            "Mix dry ingredients in large bowl",
            "Whisk wet ingredients separately",
            "Combine wet and dry ingredients until just mixed",
            "Cook on medium heat until bubbles form",
            "Flip and cook until golden brown",
        ],
    },
    SampleRecipe {
        id: "6",
        title: "Creamy Mushroom Risotto",
        description: "Rich and creamy risotto with sautéed mushrooms and parmesan.",
        image: "https://images.pexels.com/photos/8697800/pexels-photo-8697800.jpeg?auto=compress&cs=tinysrgb&w=800",
        rating: 4.4,
        review_count: 167,
        cooking_time: 45,
        servings: 4,
        calories: 380,
        difficulty: Difficulty::Hard,
        meal_type: MealType::Dinner,
        dietary_tags: &["Vegetarian", "Gluten-Free"],
        ingredients: &[
            "arborio rice",
            "mushrooms",
            "parmesan",
            "butter",
            "white wine",
            "onion",
        ],
        equipment: &["stovetop", "pan", "ladle"],
        instructions: &[
            "Sauté mushrooms and set aside",
            "Cook onion until translucent",
            "Add rice, stir to coat with oil",
            "Add wine, stir until absorbed",
            "Add warm broth one ladle at a time, stirring constantly",
            "Finish with butter, cheese, and mushrooms",
        ],
    },
];

/// Fresh copies of every sample recipe, in catalogue order
pub fn sample_recipes() -> Vec<Recipe> {
    SAMPLE_RECIPES.iter().map(Recipe::from).collect()
}
