use crate::client::{LarderClient, NewRecipe};
use anyhow::{Context, Result};

struct SeedRecipe {
    name: &'static str,
    image: Option<&'static str>,
    ingredients: &'static str,
    instructions: &'static str,
}

const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        name: "Chili",
        image: None,
        ingredients: "beans, ground beef, tomatoes, onion, chili powder",
        instructions: "1. Brown the beef with the onion.
2. Add tomatoes, beans and chili powder.
3. Simmer for 45 minutes.",
    },
    SeedRecipe {
        name: "Classic Spaghetti Carbonara",
        image: Some("carbonara.png"),
        ingredients: "400 g spaghetti, 200 g pancetta, 4 eggs, 100 g Pecorino Romano, black pepper",
        instructions: "1. Cook spaghetti until al dente.
2. Fry pancetta until crispy.
3. Whisk eggs with cheese and pepper.
4. Toss hot pasta with pancetta off the heat, then stir in the egg mixture.",
    },
    SeedRecipe {
        name: "Banana Bread",
        image: Some("banana-bread.png"),
        ingredients: "3 ripe bananas, 1/3 cup melted butter, 3/4 cup sugar, 1 egg, 1.5 cups flour",
        instructions: "1. Preheat oven to 350°F (175°C).
2. Mash bananas and mix in butter, sugar and egg.
3. Fold in flour and bake for 60 minutes.",
    },
    SeedRecipe {
        name: "Overnight Oats",
        image: None,
        ingredients: "1/2 cup rolled oats, 1/2 cup milk, 1/4 cup yogurt, honey",
        instructions: "Stir everything together and refrigerate overnight.",
    },
];

/// Post the sample recipes for `user_id`, returning the new identifiers.
pub async fn seed(client: &LarderClient, user_id: i32) -> Result<Vec<i32>> {
    let mut ids = Vec::with_capacity(SAMPLE_RECIPES.len());

    for sample in SAMPLE_RECIPES {
        let recipe = NewRecipe {
            user_id,
            name: sample.name.to_string(),
            image: sample.image.map(str::to_string),
            ingredients: Some(sample.ingredients.to_string()),
            instructions: sample.instructions.to_string(),
        };

        let id = client
            .add_recipe(&recipe)
            .await
            .with_context(|| format!("Failed to create recipe '{}'", sample.name))?;
        println!("Created recipe {} ({})", id, sample.name);
        ids.push(id);
    }

    Ok(ids)
}
