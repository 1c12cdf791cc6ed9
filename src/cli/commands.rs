//! CLI command implementations
//!
//! Both commands load configuration, open the pool and make sure the songs
//! table exists. `start` then serves HTTP until a shutdown signal arrives.

use std::path::Path;

use tracing::{info, warn};

use crate::config::{AppConfig, ConfigSource};
use crate::db::Database;
use crate::http_server::HttpServer;
use crate::observability::init_tracing;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&load_config(&config)?),
        Command::Start { config, port } => start(load_config(&config)?, port),
    }
}

/// Create the database and the songs table
pub fn init(config: &AppConfig) -> CliResult<()> {
    block_on(async {
        let database = open_database(config).await?;
        database.close().await;
        Ok::<(), CliError>(())
    })?;

    println!("Database ready at {}", config.database.url);
    Ok(())
}

/// Serve the songs API
pub fn start(mut config: AppConfig, port: Option<u16>) -> CliResult<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    block_on(async move {
        let database = open_database(&config).await?;
        let server = HttpServer::with_config(config.server, database);

        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Read the config file and install logging
fn load_config(config_path: &Path) -> CliResult<AppConfig> {
    let (config, source) = AppConfig::load(config_path)?;
    init_tracing(&config.logging)?;

    match source {
        ConfigSource::File => info!(path = %config_path.display(), "configuration loaded"),
        ConfigSource::Defaults => warn!(
            path = %config_path.display(),
            "configuration file not found, using defaults"
        ),
    }

    Ok(config)
}

async fn open_database(config: &AppConfig) -> CliResult<Database> {
    let database = Database::connect(&config.database).await?;
    database.ensure_schema().await?;
    Ok(database)
}

fn block_on<F>(future: F) -> CliResult<()>
where
    F: std::future::Future<Output = CliResult<()>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(future)
}
