mod config;
mod gateway;
mod logging;
mod signals;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use footprint::FootprintModule;
use mimalloc::MiMalloc;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Footprint Server - eco footprint dashboard
#[derive(Parser)]
#[command(name = "footprint-server")]
#[command(about = "Footprint Server - eco footprint dashboard")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port)?;

    logging::init_logging(&config.logging, cli.verbose)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Footprint Server starting");

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    let module =
        FootprintModule::new(&config.footprint).context("failed to initialize footprint module")?;
    let router = gateway::build_router(&module, &config.server);

    let cancel = CancellationToken::new();
    let server = tokio::spawn({
        let cancel = cancel.clone();
        let server_config = config.server.clone();
        async move {
            let result = gateway::serve(router, &server_config, cancel.clone()).await;
            // Stop waiting for signals if the server exits on its own.
            cancel.cancel();
            result
        }
    });

    tokio::select! {
        result = signals::wait_for_shutdown() => {
            result?;
            cancel.cancel();
        }
        () = cancel.cancelled() => {}
    }

    server.await.context("HTTP server task panicked")??;
    tracing::info!("Footprint Server stopped");
    Ok(())
}
