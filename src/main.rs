//! Userecho gateway entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use userecho_gateway::api::{create_router, AppState};
use userecho_gateway::config::{Config, FetcherMode};
use userecho_gateway::fetch::{FixedUsernameFetcher, UserEchoClient, UsernameFetcher};
use userecho_gateway::metrics;
use userecho_gateway::utils::shutdown_signal;

/// Authenticated single-hop gateway for the userecho service.
#[derive(Parser, Debug)]
#[command(name = "userecho-gateway")]
#[command(about = "Forwards authenticated /user requests to a downstream userecho service")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT from the environment).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the gateway server (default).
    Run {
        /// HTTP server port (overrides PORT from the environment).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Check that the downstream userecho service is reachable.
    CheckUpstream,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("userecho_gateway=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::CheckUpstream) => cmd_check_upstream().await,
        Some(Command::Run { port }) => cmd_run(port).await,
        None => cmd_run(args.port).await,
    }
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("USERECHO GATEWAY - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!(
        "  Fetcher: {}",
        match config.fetcher {
            FetcherMode::Userecho => "userecho (live downstream)",
            FetcherMode::Fixed => "fixed (no network calls)",
        }
    );
    println!("  Userecho URL: {}", config.userecho_url);
    println!("  Request timeout: {}ms", config.http_timeout_ms);
    println!("  Connect timeout: {}ms", config.http_connect_timeout_ms);
    println!(
        "  Auth tokens: {}",
        if config.gateway_auth_tokens.is_empty() {
            "any non-empty credential".to_string()
        } else {
            format!("{} listed", config.gateway_auth_tokens.len())
        }
    );
    println!("  Port: {}", config.port);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Check that the downstream userecho service is reachable.
async fn cmd_check_upstream() -> anyhow::Result<()> {
    let config = Config::load()?;
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let client = UserEchoClient::new(&config)?;
    info!("Probing {} ...", client.base_url());

    match client.probe().await {
        Ok(status) => {
            info!("Userecho reachable, answered HTTP {}", status);
            Ok(())
        }
        Err(e) => {
            error!("Userecho unreachable: {}", e);
            Err(anyhow::anyhow!("Upstream check failed: {}", e))
        }
    }
}

/// Run the gateway server.
async fn cmd_run(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    // Install the Prometheus recorder before any metric is touched
    let prometheus = PrometheusBuilder::new().install_recorder()?;
    metrics::init_metrics();

    // Select the fetch implementation once, at composition time
    let fetcher: Arc<dyn UsernameFetcher> = match config.fetcher {
        FetcherMode::Userecho => {
            info!("Fetcher: userecho at {}", config.userecho_url);
            Arc::new(UserEchoClient::new(&config)?)
        }
        FetcherMode::Fixed => {
            info!("Fetcher: fixed (no downstream calls)");
            Arc::new(FixedUsernameFetcher::new())
        }
    };

    let state = AppState::new(fetcher, config.gateway_auth_tokens.clone())
        .with_prometheus(prometheus);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}
