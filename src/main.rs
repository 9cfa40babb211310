//! Air-quality backend entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use airpulse::api::{create_router, AppState};
use airpulse::aqi::{LiveMetricFacade, ResolveOutcome};
use airpulse::config::Config;
use airpulse::metrics;
use airpulse::utils::shutdown_signal;

/// Live air-quality facade and hospital advisory backend.
#[derive(Parser, Debug)]
#[command(name = "airpulse")]
#[command(about = "Serves live AQI readings, heatmaps and hospital advisories")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Resolve the AQI for one city and print it.
    Resolve {
        /// City name.
        city: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("airpulse=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    let json_layer = args.json_logs.then(|| fmt::layer().json());
    let text_layer = (!args.json_logs).then(fmt::layer);
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    if let Err(e) = config.ensure_valid() {
        error!("{}", e);
        return Err(e.into());
    }

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Resolve { city }) => cmd_resolve(&config, &city).await,
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("AIRPULSE - CONFIGURATION CHECK");
    println!("======================================================================");
    let search = if config.has_search_key() {
        "configured"
    } else {
        "missing, fallback only"
    };
    let gemini = if config.has_gemini_key() {
        "configured"
    } else {
        "missing"
    };
    println!("  Live AQI (Serper):   {search}");
    println!("  Advisory (Gemini):   {gemini}");
    println!("  Serper URL:          {}", config.serper_url);
    println!("  Gemini model:        {}", config.gemini_model);
    println!("  HTTP timeout:        {}ms", config.http_timeout_ms);
    println!("  Poll interval:       {}s", config.poll_interval_secs);
    println!("  Default city:        {}", config.default_city);
    println!("  Frontend dir:        {}", config.frontend_dir);
    println!("  Port:                {}", config.port);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");
    Ok(())
}

/// Resolve one city and print the outcome.
async fn cmd_resolve(config: &Config, city: &str) -> anyhow::Result<()> {
    let facade = LiveMetricFacade::from_config(config)?;

    match facade.resolve_outcome(city).await {
        ResolveOutcome::Live(value) => println!("{city}: AQI {value} (live)"),
        ResolveOutcome::Fallback { value, reason } => {
            println!("{city}: AQI {value} (fallback: {})", reason.label())
        }
    }
    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    let port = port_override.unwrap_or(config.port);

    if !config.has_search_key() {
        warn!("SERPER_API_KEY not set, AQI readings will be synthetic");
    }
    if !config.has_gemini_key() {
        warn!("GEMINI_API_KEY not set, advisory endpoints will return an error message");
    }

    let mut state = AppState::from_config(config)?;
    match metrics::init_metrics() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!(error = %e, "Metrics recorder not installed"),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
