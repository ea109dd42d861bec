use clap::{Parser, Subcommand};

use campusmap_core::{AppConfig, Category, SortOrder};
use campusmap_providers::{Geocode, GeocodeClient, LocalSearchClient};
use campusmap_search::{MapController, SearchOrchestrator, SessionStatus};

#[derive(Debug, Parser)]
#[command(name = "campusmap-cli")]
#[command(about = "Campus place search command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for places around campus and print the resolved list.
    Search {
        /// Free-text query, e.g. "카페" or "춘천 닭갈비".
        query: String,
        /// Sidebar category label: 음식, 카페, 상점, 디저트 or 별점.
        #[arg(long, default_value = "별점")]
        category: String,
        /// Rating sort direction under 별점: high or low.
        #[arg(long, default_value = "high")]
        sort: String,
    },
    /// Geocode a single address and print its coordinate matches.
    Geocode {
        address: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::Search {
            query,
            category,
            sort,
        } => run_search(&config, &query, &category, &sort).await,
        Commands::Geocode { address } => run_geocode(&config, &address).await,
    }
}

async fn run_search(
    config: &AppConfig,
    query: &str,
    category: &str,
    sort: &str,
) -> anyhow::Result<()> {
    let category = Category::from_label(category)
        .ok_or_else(|| anyhow::anyhow!("unknown category label '{category}'"))?;
    let order = match sort {
        "high" => SortOrder::Descending,
        "low" => SortOrder::Ascending,
        other => anyhow::bail!("unknown sort direction '{other}' (use high or low)"),
    };

    let keyword = LocalSearchClient::from_config(config)?;
    let geocoder = GeocodeClient::from_config(config)?;
    let controller = MapController::new(
        SearchOrchestrator::new(keyword, geocoder).with_page_size(config.search_page_size),
    );

    controller.submit(query).await;
    let session = controller.session();

    match session.status {
        SessionStatus::Error => {
            anyhow::bail!("search failed: no provider reachable for \"{}\"", session.query)
        }
        SessionStatus::Done if session.places.is_empty() => {
            println!("no results for \"{}\"", session.query);
            return Ok(());
        }
        _ => {}
    }

    let shown = controller.view(category, order);
    println!(
        "{} result(s) for \"{}\" [{}]:",
        shown.len(),
        session.query,
        category.label(),
    );
    for place in &shown {
        let category_label = if place.category.is_empty() {
            "-"
        } else {
            place.category.as_str()
        };
        println!(
            "  \u{2605} {:<4} {:<24} {}  [{}]",
            format!("{:.1}", place.rating),
            place.name,
            place.address,
            category_label,
        );
    }

    if let Some(viewport) = controller.viewport() {
        tracing::debug!(
            south = viewport.south,
            west = viewport.west,
            north = viewport.north,
            east = viewport.east,
            "viewport fitted to result set"
        );
    }

    Ok(())
}

async fn run_geocode(config: &AppConfig, address: &str) -> anyhow::Result<()> {
    let geocoder = GeocodeClient::from_config(config)?;
    let matches = geocoder.geocode(address).await?;

    if matches.is_empty() {
        println!("no coordinate matches for \"{address}\"");
        return Ok(());
    }

    for hit in &matches {
        println!(
            "  {} ({:.5}, {:.5})",
            hit.formatted_address, hit.position.lat, hit.position.lng,
        );
    }
    Ok(())
}
