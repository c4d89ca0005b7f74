//! EdgeQuota events receiver - Binary Entry Point

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use edgequota_events::config::ServerConfig;
use edgequota_events::logging::init_tracing;
use edgequota_events::server;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();
    init_tracing(&config.log_level, config.log_format);

    match server::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
