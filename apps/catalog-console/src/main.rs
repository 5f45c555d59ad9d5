use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use modkit::TracedClient;
use products::RestProductsClient;
use products_store::{ListingStore, ProductForm, SortKey};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod render;

/// Catalog Console - browse and edit the product catalog over HTTP
#[derive(Parser)]
#[command(name = "catalog-console")]
#[command(about = "Catalog Console - browse and edit the product catalog over HTTP")]
#[command(version = "0.1.0")]
struct Cli {
    /// Base URL of the catalog API
    #[arg(long, env = "CATALOG_API_URL", default_value = "http://127.0.0.1:5000/api")]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_sec: u64,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of products
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 10)]
        limit: u64,
        /// Case-insensitive match on the title
        #[arg(long, default_value = "")]
        search: String,
        /// Exact category match
        #[arg(long, default_value = "")]
        category: String,
        /// title, price-low, price-high or category
        #[arg(long, default_value = "title")]
        sort: SortKey,
    },
    /// Show a single product
    Show { id: Uuid },
    /// Create a product
    Create(FormArgs),
    /// Replace the editable fields of a product
    Update {
        id: Uuid,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a product
    Delete { id: Uuid },
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    image: String,
}

impl From<FormArgs> for ProductForm {
    fn from(a: FormArgs) -> Self {
        Self {
            title: a.title,
            description: a.description,
            price: a.price,
            category: a.category,
            image: a.image,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_sec))
        .build()
        .context("failed to build HTTP client")?;
    let api = RestProductsClient::new(TracedClient::new(http), &cli.base_url)
        .with_context(|| format!("invalid base URL {}", cli.base_url))?;
    tracing::debug!(base_url = %api.base_url(), "catalog console starting");
    let store = ListingStore::new(Arc::new(api));

    match cli.command {
        Commands::List {
            page,
            limit,
            search,
            category,
            sort,
        } => {
            store.load(page, limit).await?;
            store.set_search_term(search);
            store.set_category_filter(category);
            store.set_sort_key(sort);
            print!("{}", render::listing(&store.snapshot()));
        }
        Commands::Show { id } => {
            let product = store.load_detail(id).await?;
            print!("{}", render::detail(&product));
        }
        Commands::Create(form) => {
            let product = store.create(form.into()).await?;
            println!("Created product {}", product.id);
            print!("{}", render::detail(&product));
        }
        Commands::Update { id, form } => {
            let product = store.update(id, form.into()).await?;
            println!("Updated product {}", product.id);
            print!("{}", render::detail(&product));
        }
        Commands::Delete { id } => {
            store.delete(id).await?;
            println!("Product deleted successfully");
        }
    }
    Ok(())
}
