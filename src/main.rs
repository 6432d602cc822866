//! Lab record query service entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*};

use lab_records::api::{create_router, AppState};
use lab_records::config::Config;
use lab_records::metrics;
use lab_records::records::load_store;
use lab_records::utils::shutdown_signal;

/// Read-only HTTP service over a static set of lab records.
#[derive(Parser, Debug)]
#[command(name = "lab-records")]
#[command(about = "Serve lab records loaded from a JSON data file")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Data file holding the LabRecords section (overrides LAB_DATA_PATH).
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,

    /// Check configuration and data file validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so RUST_LOG from .env is honored
    let config = Config::load();

    let mut log_config = config.as_ref().cloned().unwrap_or_default();
    log_config.verbose |= args.verbose;
    let filter = log_config.log_filter();

    let (text_layer, json_layer) = if log_config.log_json {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(text_layer)
        .with(json_layer)
        .with(filter)
        .init();

    let mut config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    config.verbose = log_config.verbose;
    if let Some(data) = args.data {
        config.lab_data_path = data;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config).await,
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Check configuration and data file validity.
async fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("LAB RECORDS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Loading data file... ");
    let store = match load_store(&config.lab_data_path).await {
        Ok(store) => {
            println!("OK");
            store
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Data file load failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Data File: {}", config.lab_data_path.display());
    println!("  Records: {}", store.len());
    println!("  Lab Names: {}", store.list_distinct_names().join(", "));
    println!("  Listen Address: {}", config.listen_addr());
    match config.metrics_addr() {
        Some(addr) => println!("  Metrics: {}", addr),
        None => println!("  Metrics: Disabled"),
    }
    println!(
        "  OpenAPI: {}",
        if config.enable_openapi { "Enabled" } else { "Disabled" }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Load the record set and serve the HTTP API until shutdown.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    metrics::init_metrics();
    if let Some(addr) = config.metrics_addr() {
        metrics::install_exporter(addr)?;
    }

    info!("Loading lab records from {}", config.lab_data_path.display());
    let store = load_store(&config.lab_data_path).await.map_err(|e| {
        error!("Failed to load lab records: {}", e);
        e
    })?;
    metrics::set_records_loaded(store.len());

    let app_state = AppState::new(store);
    let router = create_router(app_state, config.enable_openapi);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
