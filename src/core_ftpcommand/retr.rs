use crate::config::Config;
use crate::core_network::error::TransferError;
use crate::helpers::send_response;
use crate::session::Session;
use log::{error, info, warn};
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader};

/// Handles the RETR (Retrieve) FTP command.
///
/// This function streams a file from the user's tree to the client over the
/// data connection. The data connection is closed before the final reply,
/// whatever the outcome.
///
/// # Arguments
///
/// * `writer` - The control connection.
/// * `config` - Server configuration (download buffer size).
/// * `session` - The state of the current session.
/// * `arg` - The file to retrieve.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_retr_command<W>(
    writer: &mut W,
    config: &Config,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let (remote, local) = session.resolve(&arg);
    info!("Received RETR command for {} ({:?})", remote, local);

    let stream = match session.data.open_for_transfer().await {
        Ok(stream) => stream,
        Err(e) => {
            error!("RETR: {}", e);
            let (code, message) = e.to_ftp_response();
            return send_response(writer, code, message).await;
        }
    };

    send_response(writer, 125, "Opening data connection").await?;
    let result = send_file(stream, &local, config.server.download_buffer_size).await;
    session.data.close().await;

    match result {
        Ok(bytes) => {
            info!("Sent {} bytes from {:?}", bytes, local);
            send_response(writer, 226, "Transfer complete").await
        }
        Err(TransferError::Source(e)) => {
            warn!("Cannot open {:?}: {}", local, e);
            send_response(writer, 450, "Can't open file").await
        }
        Err(e @ TransferError::Stream(_)) => {
            error!("Error sending {:?}: {}", local, e);
            send_response(writer, 451, "Transfer file failed").await
        }
    }
}

async fn send_file<S>(stream: &mut S, path: &Path, buffer_size: usize) -> Result<u64, TransferError>
where
    S: AsyncWrite + Unpin,
{
    let file = File::open(path).await.map_err(TransferError::Source)?;
    let metadata = file.metadata().await.map_err(TransferError::Source)?;
    if !metadata.is_file() {
        return Err(TransferError::Source(io::Error::other("not a regular file")));
    }

    let mut reader = BufReader::with_capacity(buffer_size, file);
    let bytes = tokio::io::copy_buf(&mut reader, stream)
        .await
        .map_err(TransferError::Stream)?;
    stream.flush().await.map_err(TransferError::Stream)?;
    Ok(bytes)
}
