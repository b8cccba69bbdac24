//! Pokedex CLI - browse the public Pokemon catalog from the terminal.
//!
//! Listing pages are cached on disk for an hour and favorites persist
//! between runs. Pass `--no-cache` to keep everything in memory.

use std::io;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pokedex_core::{
    App, CatalogClient, Config, FileStore, KeyValueStore, MemoryStore, Pokemon, SimplePokemon,
};

/// Maximum concurrent detail requests
const MAX_CONCURRENT_REQUESTS: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the Pokemon catalog with a local page cache and favorites")]
#[command(version)]
struct Cli {
    /// Keep the page cache and favorites in memory for this run only
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a page of the catalog
    List {
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Page size (defaults to the configured page size)
        #[arg(long)]
        limit: Option<u32>,
        /// Number of consecutive pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Filter the first page by name
    Search { query: String },
    /// Show the details of one Pokemon
    Show { id: u32 },
    /// List favorites
    Favorites {
        /// Fetch type, height and weight for each favorite
        #[arg(long)]
        details: bool,
    },
    /// Add or remove a favorite
    #[command(subcommand)]
    Fav(FavCommand),
}

#[derive(Subcommand, Debug)]
enum FavCommand {
    Add { id: u32 },
    Remove { id: u32 },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    info!(base_url = %config.api_base_url, "Pokedex starting");

    let client =
        Arc::new(CatalogClient::from_config(&config).context("Failed to build HTTP client")?);

    if cli.no_cache {
        run(cli.command, config, client, Arc::new(MemoryStore::new())).await
    } else {
        let dir = config.cache_dir()?;
        let storage = FileStore::new(dir.clone())
            .with_context(|| format!("Failed to open cache directory {}", dir.display()))?;
        run(cli.command, config, client, Arc::new(storage)).await
    }
}

async fn run<S: KeyValueStore>(
    command: Command,
    config: Config,
    client: Arc<CatalogClient>,
    storage: Arc<S>,
) -> Result<()> {
    let mut app = App::new(config, Arc::clone(&client), storage);

    match command {
        Command::List { offset, limit, pages } => {
            app.favorites().initialize();
            let limit = limit.unwrap_or(app.config.page_size);
            app.load_pages(offset, limit, pages).await?;
            print_listing(&app, &app.displayed_pokemons());

            let shown = app.listing().pokemons().len();
            match app.listing().pagination() {
                Some(pagination) => println!(
                    "\n{} of {} shown{}",
                    shown,
                    pagination.count,
                    if pagination.has_next() { ", more available" } else { "" }
                ),
                None => println!("\n{} shown (from cache)", shown),
            }
        }
        Command::Search { query } => {
            app.start().await?;
            app.on_search(&query);
            if app.has_no_results() {
                println!("No Pokemon found matching \"{}\"", query);
            } else {
                print_listing(&app, &app.displayed_pokemons());
            }
        }
        Command::Show { id } => {
            let pokemon = fetch_detail(&app, id).await?;
            print_detail(&pokemon);
        }
        Command::Favorites { details } => {
            app.favorites().initialize();
            let favorites = app.favorites().favorites();
            if favorites.is_empty() {
                println!("No favorites yet");
                return Ok(());
            }
            if !details {
                print_listing(&app, &favorites);
                return Ok(());
            }

            let app_ref = &app;
            let results: Vec<_> = stream::iter(favorites)
                .map(|fav| async move {
                    (fav.id, app_ref.details().fetch_pokemon_data(fav.id).await)
                })
                .buffered(MAX_CONCURRENT_REQUESTS)
                .collect()
                .await;
            for (id, pokemon) in results {
                match pokemon {
                    Some(p) => println!(
                        "{:>5}  {:<14} {:<18} {:>7} {:>8}",
                        p.id,
                        p.display_name(),
                        p.types,
                        p.height_display(),
                        p.weight_display()
                    ),
                    None => println!("{:>5}  (failed to load)", id),
                }
            }
        }
        Command::Fav(FavCommand::Add { id }) => {
            app.favorites().initialize();
            if app.favorites().is_favorite(id) {
                println!("#{} is already a favorite", id);
                return Ok(());
            }
            let pokemon = fetch_detail(&app, id).await?;
            let entry = SimplePokemon {
                id: pokemon.id,
                name: pokemon.name.clone(),
                url: client.pokemon_url(pokemon.id),
            };
            app.on_pokemon_selected(entry);
            app.on_toggle_favorite(id);
            app.on_modal_closed();
            println!("Added {} to favorites", pokemon.display_name());
        }
        Command::Fav(FavCommand::Remove { id }) => {
            app.favorites().initialize();
            if !app.favorites().is_favorite(id) {
                println!("#{} is not a favorite", id);
                return Ok(());
            }
            app.on_toggle_favorite(id);
            println!("Removed #{} from favorites", id);
        }
    }

    Ok(())
}

async fn fetch_detail<S: KeyValueStore>(app: &App<CatalogClient, S>, id: u32) -> Result<Pokemon> {
    match app.details().fetch_pokemon_data(id).await {
        Some(pokemon) => Ok(pokemon),
        None => bail!(
            "{} (#{})",
            app.details().error().unwrap_or_else(|| "Unknown error".to_string()),
            id
        ),
    }
}

fn print_listing<S: KeyValueStore>(app: &App<CatalogClient, S>, pokemons: &[SimplePokemon]) {
    for p in pokemons {
        let star = if app.favorites().is_favorite(p.id) { "*" } else { " " };
        println!("{:>5} {} {}", p.id, star, p.name);
    }
}

fn print_detail(pokemon: &Pokemon) {
    println!("#{} {}", pokemon.id, pokemon.display_name());
    println!("  Type:   {}", pokemon.types);
    println!("  Height: {}", pokemon.height_display());
    println!("  Weight: {}", pokemon.weight_display());
    if let Some(image) = &pokemon.image {
        println!("  Image:  {}", image);
    }
}
