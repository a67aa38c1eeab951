mod client;
mod seed;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::{LarderClient, NewRecipe, Recipe, RecipeFilter};

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Larder CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, global = true, default_value = "http://localhost:3000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ping the server
    Ping,
    /// Add a recipe and print its identifier
    Add {
        /// Owning user ID
        #[arg(long)]
        user: i32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        instructions: String,
        #[arg(long)]
        image: Option<String>,
        /// Free-form ingredient text
        #[arg(long)]
        ingredients: Option<String>,
    },
    /// List recipes, optionally only one user's or one meal's
    List {
        #[arg(long, conflicts_with = "meal")]
        user: Option<i32>,
        #[arg(long)]
        meal: Option<i32>,
    },
    /// Add a set of sample recipes for a user
    Seed {
        #[arg(long)]
        user: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = LarderClient::new(&cli.server);

    match cli.command {
        Commands::Ping => {
            println!("{}", client.ping().await?);
        }
        Commands::Add {
            user,
            name,
            instructions,
            image,
            ingredients,
        } => {
            let recipe = NewRecipe {
                user_id: user,
                name,
                image,
                ingredients,
                instructions,
            };
            println!("{}", client.add_recipe(&recipe).await?);
        }
        Commands::List { user, meal } => {
            let filter = match (user, meal) {
                (Some(user), _) => RecipeFilter::Owner(user),
                (None, Some(meal)) => RecipeFilter::Meal(meal),
                (None, None) => RecipeFilter::All,
            };
            for recipe in client.list_recipes(filter).await? {
                println!("{}", format_recipe(&recipe));
            }
        }
        Commands::Seed { user } => {
            let ids = seed::seed(&client, user).await?;
            println!("Seeded {} recipes", ids.len());
        }
    }

    Ok(())
}

fn format_recipe(recipe: &Recipe) -> String {
    if recipe.image.is_empty() {
        format!("{:>5}  {}  (user {})", recipe.id, recipe.name, recipe.user_id)
    } else {
        format!(
            "{:>5}  {}  (user {}, image {})",
            recipe.id, recipe.name, recipe.user_id, recipe.image
        )
    }
}
