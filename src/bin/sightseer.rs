//! sightseer: command-line front end for the fetch orchestrator.
//!
//! Resolves places and photos against the Places API and prints city
//! guides. Useful for checking an API key and cache settings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use sightseer::config::{API_KEY_ENV_VAR, Config, Secrets};
use sightseer::discovery::DEFAULT_LIMIT;
use sightseer::{
    CityList, Discovery, FetchOrchestrator, GooglePlacesClient, Image, PlaceRecord, SightseerError,
};

/// Sightseer CLI
#[derive(Parser)]
#[command(name = "sightseer")]
#[command(version = sightseer::PKG_VERSION)]
#[command(about = "Place and photo lookup for travel discovery")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Places API key (overrides secrets file and environment).
    #[arg(long, env = "SIGHTSEER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a free-text query to a place and its photo
    Place {
        /// Place to search for (e.g. "Lisbon, Portugal")
        query: String,
        /// Fetch the large photo tier instead of the compact one
        #[arg(long)]
        expanded: bool,
        /// Write the photo to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Look up a place by provider id
    PlaceId {
        /// Provider place id
        id: String,
        #[arg(long)]
        expanded: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pick a random city from the bundled list and resolve it
    Random {
        #[arg(long)]
        expanded: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List top sights in a city
    Sights {
        city: String,
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },

    /// List top eateries in a city
    Eateries {
        city: String,
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Show rating and reviews for a place id
    Reviews {
        /// Provider place id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let api_key = match args.api_key {
        Some(key) => key,
        None => Secrets::load()?.api_key().ok_or_else(|| {
            SightseerError::Configuration(format!(
                "no API key: set {API_KEY_ENV_VAR} or ~/.sightseer/secrets.toml"
            ))
        })?,
    };

    let client = Arc::new(GooglePlacesClient::with_options(
        api_key,
        &config.provider.base_url,
        config.provider.timeout(),
    )?);
    info!(version = sightseer::PKG_VERSION, base_url = %config.provider.base_url, "sightseer starting");

    let photo_size = |expanded: bool| {
        if expanded {
            config.expanded_size()
        } else {
            config.compact_size()
        }
    };

    match args.command {
        Command::Place {
            query,
            expanded,
            output,
        } => {
            let orchestrator = build_orchestrator(&config, client)?;
            let (place, image) = orchestrator
                .fetch_place_and_image(&query, photo_size(expanded))
                .await?;
            print_place(&place);
            write_image(&image, output.as_deref()).await?;
        }

        Command::PlaceId {
            id,
            expanded,
            output,
        } => {
            let orchestrator = build_orchestrator(&config, client)?;
            let (place, image) = orchestrator
                .fetch_place_and_image_by_id(&id, photo_size(expanded))
                .await?;
            print_place(&place);
            write_image(&image, output.as_deref()).await?;
        }

        Command::Random { expanded, output } => {
            let orchestrator = build_orchestrator(&config, client)?;
            let cities = CityList::bundled()?;
            let (place, image) = orchestrator
                .fetch_random_city(&cities, photo_size(expanded))
                .await?;
            print_place(&place);
            write_image(&image, output.as_deref()).await?;
        }

        Command::Sights { city, limit } => {
            let places = Discovery::new(client).top_sights(&city, limit).await?;
            print_list(&places);
        }

        Command::Eateries { city, limit } => {
            let places = Discovery::new(client).top_eateries(&city, limit).await?;
            print_list(&places);
        }

        Command::Reviews { id } => {
            let place = Discovery::new(client).reviews(&id).await?;
            println!("{}", place.display_name);
            if let Some(rating) = place.rating {
                println!(
                    "rating: {rating:.1} ({} ratings)",
                    place.user_rating_count.unwrap_or(0)
                );
            }
            if place.reviews.is_empty() {
                println!("no reviews");
            }
            for review in &place.reviews {
                println!(
                    "- {} ({}/5, {})",
                    review.author,
                    review.rating,
                    review.relative_time.as_deref().unwrap_or("undated")
                );
                if let Some(ref text) = review.text {
                    println!("  {text}");
                }
            }
        }
    }

    Ok(())
}

fn build_orchestrator(
    config: &Config,
    client: Arc<GooglePlacesClient>,
) -> sightseer::Result<FetchOrchestrator> {
    FetchOrchestrator::builder()
        .provider(client)
        .retry(config.retry_config())
        .cache_config(config.cache_config())
        .build()
}

fn print_place(place: &PlaceRecord) {
    println!("{}", place.display_name);
    println!("id: {}", place.id);
    if let Some(ref address) = place.address {
        println!("address: {address}");
    }
    println!(
        "location: {:.5}, {:.5}",
        place.coordinate.latitude, place.coordinate.longitude
    );
    println!("photos: {}", place.photos.len());
}

fn print_list(places: &[PlaceRecord]) {
    if places.is_empty() {
        println!("no places found");
        return;
    }
    for (i, place) in places.iter().enumerate() {
        let rating = place
            .rating
            .map(|r| format!(" [{r:.1}]"))
            .unwrap_or_default();
        println!("{:>2}. {}{rating}", i + 1, place.display_name);
        if let Some(ref address) = place.address {
            println!("    {address}");
        }
    }
}

async fn write_image(image: &Image, output: Option<&Path>) -> std::io::Result<()> {
    match output {
        Some(path) => {
            let path = if path.extension().is_none() {
                path.with_extension(image.extension())
            } else {
                path.to_path_buf()
            };
            tokio::fs::write(&path, &image.data[..]).await?;
            println!("image: {} bytes written to {}", image.len(), path.display());
        }
        None => println!("image: {} bytes ({})", image.len(), image.content_type),
    }
    Ok(())
}
