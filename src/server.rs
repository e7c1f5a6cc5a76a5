use crate::config::Config;
use crate::core_network::network;
use crate::helpers::log_config;
use anyhow::Result;
use log::{error, info};
use std::sync::Arc;

/// Runs the FTP server on `listen_port` with the provided configuration.
///
/// The configuration, credential table included, is shared read-only by all
/// sessions for the lifetime of the process.
///
/// # Returns
///
/// Result<(), anyhow::Error> indicating the success or failure of the operation.
pub async fn run(listen_port: u16, config: Config) -> Result<()> {
    info!("Starting server with config:");
    log_config(&config, listen_port);

    if let Err(e) = network::start_server(listen_port, Arc::new(config)).await {
        error!("Failed to start server: {}", e);
        return Err(e);
    }

    Ok(())
}
