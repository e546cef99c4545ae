mod cli;
mod config;
mod core;
mod models;
mod services;

use clap::Parser;
use cli::Cli;
use config::Settings;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    // Initialize logging: RUST_LOG wins, then --verbose, then settings
    let level = if args.verbose {
        "debug".to_string()
    } else {
        settings.logging.level.clone()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    if let Err(e) = cli::run(args.command, settings).await {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
