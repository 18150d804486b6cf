use clap::{Args, Subcommand, ValueEnum};

use crate::sync::PlaceRepository;
use crate::view::{self, HomeFilter};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct PlaceCommand {
    #[command(subcommand)]
    pub command: PlaceSubcommand,
}

#[derive(Subcommand)]
pub enum PlaceSubcommand {
    /// List cached places
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Substring match on name/description
        #[arg(long)]
        search: Option<String>,

        /// Only favorites
        #[arg(long)]
        favorites: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List known categories
    Categories,

    /// Show a place's details
    Show {
        /// Place id
        id: i64,
    },

    /// Toggle a place's favorite flag
    Favorite {
        /// Place id
        id: i64,
    },
}

impl PlaceCommand {
    pub async fn run(&self, repo: &PlaceRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PlaceSubcommand::List {
                category,
                search,
                favorites,
                format,
            } => {
                let snapshot = repo.places().borrow().clone();

                let rows = if *favorites {
                    view::favorites(&snapshot)
                } else {
                    let filter = HomeFilter {
                        category: category.clone(),
                        query: search.clone().unwrap_or_default(),
                    };
                    filter.apply(&snapshot)
                };

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&rows)?);
                    }
                    OutputFormat::Text => {
                        if rows.is_empty() {
                            println!("No places in the local cache. Run 'sync' first.");
                            return Ok(());
                        }
                        for place in &rows {
                            let marker = if place.is_favorite { "★" } else { " " };
                            println!(
                                "{} {:>4}  {:<40} {:<12} S/ {:>7.2}  {:.1}",
                                marker,
                                place.id,
                                place.name,
                                place.categoria,
                                place.precio,
                                place.rating
                            );
                        }
                    }
                }
            }

            PlaceSubcommand::Categories => {
                let snapshot = repo.places().borrow().clone();
                for categoria in view::categories(&snapshot) {
                    println!("{}", categoria);
                }
            }

            PlaceSubcommand::Show { id } => match repo.get(*id).await? {
                Some(place) => println!("{}", place),
                None => println!("Place {} is not in the local cache. Run 'sync' first.", id),
            },

            PlaceSubcommand::Favorite { id } => {
                let place = repo
                    .get(*id)
                    .await?
                    .ok_or_else(|| format!("Place {} is not in the local cache", id))?;

                let now_favorite = repo.toggle_favorite(*id, place.is_favorite).await?;
                if now_favorite {
                    println!("Added '{}' to favorites", place.name);
                } else {
                    println!("Removed '{}' from favorites", place.name);
                }
            }
        }

        Ok(())
    }
}
