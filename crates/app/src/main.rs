//! Atelier Storefront CLI

use std::{fs, path::PathBuf, process};

use atelier::sitemap::{DEFAULT_SITEMAP_PATH, Sitemap, parse_routes};
use atelier_app::{
    config::AppConfig,
    context::AppContext,
    domain::catalog::FetchState,
    report::{
        artworks_table, cart_table, catalog_table, fetch_status, menu_table, selection_table,
    },
};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "atelier", about = "Atelier storefront CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write the sitemap
    Sitemap(SitemapArgs),

    /// Price an artwork selection
    Artwork(ArtworkArgs),

    /// Print the navigation menu tree
    Menu,

    /// Fetch every catalog collection and report its state
    Catalog,
}

#[derive(Debug, Args)]
struct SitemapArgs {
    /// File listing static routes, one per line or as a YAML list
    #[arg(long)]
    routes: PathBuf,

    /// Output file
    #[arg(long, default_value = DEFAULT_SITEMAP_PATH)]
    output: PathBuf,

    /// Also list every artwork detail page
    #[arg(long)]
    with_artworks: bool,
}

#[derive(Debug, Args)]
struct ArtworkArgs {
    /// Artwork id
    id: String,

    /// Size name to select
    #[arg(long)]
    size: Option<String>,

    /// Colour variant id to select
    #[arg(long)]
    variant: Option<String>,

    /// Units to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Add the selection to a cart and print it
    #[arg(long)]
    add: bool,

    /// Also list related artworks
    #[arg(long)]
    related: bool,
}

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level)),
        )
        .init();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let ctx = AppContext::from_config(&cli.config)
        .map_err(|error| format!("failed to initialise: {error}"))?;

    match cli.command {
        Commands::Sitemap(args) => write_sitemap(&ctx, cli.config.hostname.as_deref(), args).await,
        Commands::Artwork(args) => price_artwork(&ctx, args).await,
        Commands::Menu => print_menu(&ctx).await,
        Commands::Catalog => print_catalog(&ctx).await,
    }
}

async fn write_sitemap(
    ctx: &AppContext,
    hostname: Option<&str>,
    args: SitemapArgs,
) -> Result<(), String> {
    let hostname = hostname.ok_or("a hostname is required (--hostname or ATELIER_HOSTNAME)")?;

    let contents = fs::read_to_string(&args.routes)
        .map_err(|error| format!("failed to read {}: {error}", args.routes.display()))?;

    let routes = parse_routes(&contents).map_err(|error| error.to_string())?;
    let mut sitemap = Sitemap::new(hostname).map_err(|error| error.to_string())?;

    sitemap.add_routes(&routes);

    if args.with_artworks {
        let artworks = ctx
            .artworks
            .list_artworks()
            .await
            .map_err(|error| format!("failed to list artworks: {error}"))?;

        for artwork in &artworks {
            sitemap.add_artwork(&artwork.id, None);
        }
    }

    sitemap
        .write_to_path(&args.output)
        .map_err(|error| error.to_string())?;

    info!(
        path = %args.output.display(),
        entries = sitemap.entries().len(),
        "sitemap written"
    );

    Ok(())
}

async fn price_artwork(ctx: &AppContext, args: ArtworkArgs) -> Result<(), String> {
    let artwork = ctx
        .artworks
        .get_artwork(&args.id)
        .await
        .map_err(|error| format!("failed to load artwork {}: {error}", args.id))?;

    let mut selection = ctx.selection(&artwork);

    if let Some(size) = &args.size {
        selection.select_size(size).map_err(|error| error.to_string())?;
    }

    if let Some(variant) = &args.variant {
        selection
            .select_variant(variant)
            .map_err(|error| error.to_string())?;
    }

    selection
        .set_quantity(args.quantity)
        .map_err(|error| error.to_string())?;

    println!("{}", selection_table(&selection));

    if args.add {
        match ctx.add_to_cart(&selection).await {
            Ok(Some(_)) => {}
            Ok(None) => println!("nothing was added to the cart"),
            Err(error) => return Err(error.to_string()),
        }

        println!("{}", cart_table(&*ctx.cart.lock().await, ctx.currency));
    }

    if args.related {
        let related = ctx
            .artworks
            .related_artworks(&artwork)
            .await
            .map_err(|error| format!("failed to load related artworks: {error}"))?;

        println!("{}", artworks_table(&related, ctx.currency));
    }

    Ok(())
}

async fn print_menu(ctx: &AppContext) -> Result<(), String> {
    ctx.catalog.fetch_menus().await;

    match ctx.catalog.menu_tree().await {
        FetchState::Success(forest) => {
            println!("{}", menu_table(&forest));
            Ok(())
        }
        FetchState::Error(message) => Err(format!("failed to load menus: {message}")),
        FetchState::Idle | FetchState::Loading => Ok(()),
    }
}

async fn print_catalog(ctx: &AppContext) -> Result<(), String> {
    let catalog = &ctx.catalog;

    catalog.fetch_all().await;

    let configuration = match catalog.configuration().await {
        FetchState::Success(configuration) => format!("currency {}", configuration.currency),
        state => fetch_status(&state.map(|configuration| vec![configuration])),
    };

    let rows = [
        ("categories", fetch_status(&catalog.categories().await)),
        (
            "section categories",
            fetch_status(&catalog.section_categories().await),
        ),
        ("products", fetch_status(&catalog.products().await)),
        ("menus", fetch_status(&catalog.menus().await)),
        ("artists", fetch_status(&catalog.artists().await)),
        ("banners", fetch_status(&catalog.banners().await)),
        (
            "home collections",
            fetch_status(&catalog.home_collections().await),
        ),
        ("configuration", configuration),
    ];

    println!("{}", catalog_table(&rows));

    Ok(())
}
