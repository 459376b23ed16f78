//! Main entry point for the bistro ordering service.
//!
//! Loads the configuration, builds the engine with the configured storage
//! backend and menu catalog, and serves the HTTP API next to the engine's
//! event loop.

use bistro_config::Config;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod factory_registry;
mod server;

/// Command-line arguments for the bistro service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml", env = "BISTRO_CONFIG")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the bistro service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging
/// 3. Loads configuration from file
/// 4. Builds the engine with the configured implementations
/// 5. Runs the engine and, when enabled, the API server until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started bistro");

	let config_path = args
		.config
		.to_str()
		.ok_or("Configuration path is not valid UTF-8")?;
	let config = Config::from_file(config_path).await?;
	tracing::info!("Loaded configuration [{}]", config.restaurant.name);

	let engine = Arc::new(factory_registry::build_engine_from_config(config.clone())?);

	if let Some(api_config) = config.enabled_api().cloned() {
		let engine_task = engine.run();
		let api_task = server::start_server(api_config, Arc::clone(&engine));

		tokio::select! {
			result = engine_task => {
				tracing::info!("Engine finished");
				result?;
			}
			result = api_task => {
				tracing::info!("API server finished");
				result?;
			}
		}
	} else {
		tracing::info!("API disabled, running engine only");
		engine.run().await?;
	}

	tracing::info!("Stopped bistro");
	Ok(())
}
