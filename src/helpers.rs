use crate::config::Config;
use log::info;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Sends a single `<code> <message>` reply line on the control connection.
pub async fn send_response<W>(writer: &mut W, code: u16, message: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = format!("{} {}\r\n", code, message);
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}

// Helper function to log configuration options
pub fn log_config(config: &Config, listen_port: u16) {
    info!("  Listen Port: {}", listen_port);
    match config.server.pasv_address {
        Some(addr) => info!("  PASV Address: {}", addr),
        None => info!("  PASV Address: <control connection address>"),
    }
    info!(
        "  Upload Buffer Size: {} KB",
        config.server.upload_buffer_size / 1024
    );
    info!(
        "  Download Buffer Size: {} KB",
        config.server.download_buffer_size / 1024
    );
    info!("  Users: {}", config.users.len());
}
