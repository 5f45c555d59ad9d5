use anyhow::{anyhow, Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use products::{Products, ProductsConfig};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
/// - Adds `mode=rwc` so a missing database file is created.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    // Rebuild DSN with absolute path and normalized slashes
    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    match query {
        Some(q) if q.contains("mode=") => {
            out.push('?');
            out.push_str(q);
        }
        Some(q) => {
            out.push('?');
            out.push_str(q);
            out.push_str("&mode=rwc");
        }
        None => out.push_str("?mode=rwc"),
    }
    Ok(out)
}

/// Catalog Server - product listing REST service
#[derive(Parser)]
#[command(name = "catalog-server")]
#[command(about = "Catalog Server - product listing REST service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity / mock database)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Catalog Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

/// Only SQLite is supported by the storage layer.
fn check_backend(cfg: &DatabaseConfig) -> Result<()> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    match raw.split_once(':').map(|(scheme, _)| scheme) {
        Some("sqlite") => Ok(()),
        Some(other) => Err(anyhow!("Unsupported database type: {}", other)),
        None => Err(anyhow!("Invalid database DSN '{}'", raw)),
    }
}

async fn connect_db(db_config: &DatabaseConfig, base_dir: &Path) -> Result<DatabaseConnection> {
    check_backend(db_config)?;
    let dsn = absolutize_sqlite_dsn(db_config.url.trim(), base_dir, true)?;

    let mut opts = ConnectOptions::new(dsn.clone());
    opts.max_connections(db_config.max_conns.unwrap_or(10))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if let Some(ms) = db_config.busy_timeout_ms {
        opts.map_sqlx_sqlite_opts(move |o| o.busy_timeout(Duration::from_millis(u64::from(ms))));
    }

    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {dsn}"))?;
    tracing::info!("Connected DB backend: sqlite");
    Ok(db)
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("No database configuration found"))?;
    let base_dir = PathBuf::from(&config.server.home_dir);
    let db = connect_db(&db_config, &base_dir).await?;

    let products_cfg: ProductsConfig = config.module_config("products")?;
    let products = Products::default();
    products.init(products_cfg, db).await?;

    let ingress_cfg: ApiIngressConfig = config.module_config("api_ingress")?;
    let mut ingress = ApiIngress::new(ingress_cfg);
    if config.server.timeout_sec > 0 {
        ingress = ingress.with_request_timeout(Duration::from_secs(config.server.timeout_sec));
    }
    ingress.register_openapi(products.openapi());

    let routes = products.register_rest(axum::Router::new())?;
    let router = ingress.build_router(routes)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = runtime::wait_for_shutdown().await {
            tracing::error!(error = %e, "failed to install signal handlers");
        }
        on_signal.cancel();
    });

    ingress.serve(router, addr, cancel).await?;
    tracing::info!("Catalog Server stopped");
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(db) = &config.database {
        check_backend(db)?;
    }
    let _: ProductsConfig = config.module_config("products")?;
    let _: ApiIngressConfig = config.module_config("api_ingress")?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsn_is_kept() {
        let out = absolutize_sqlite_dsn("sqlite://:memory:", Path::new("/base"), false).unwrap();
        assert_eq!(out, "sqlite::memory:");
    }

    #[test]
    fn relative_dsn_is_anchored_at_base_dir() {
        let out =
            absolutize_sqlite_dsn("sqlite://database/catalog.db", Path::new("/base"), false)
                .unwrap();
        assert_eq!(out, "sqlite:///base/database/catalog.db?mode=rwc");
    }

    #[test]
    fn explicit_mode_is_preserved() {
        let out = absolutize_sqlite_dsn("sqlite:///tmp/c.db?mode=ro", Path::new("/base"), false)
            .unwrap();
        assert_eq!(out, "sqlite:///tmp/c.db?mode=ro");
    }

    #[test]
    fn non_sqlite_backends_are_rejected() {
        let cfg = DatabaseConfig {
            url: "postgresql://localhost/catalog".into(),
            max_conns: None,
            busy_timeout_ms: None,
        };
        assert!(check_backend(&cfg).is_err());
    }
}
