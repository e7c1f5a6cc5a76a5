use crate::config::Config;
use crate::core_network::error::TransferError;
use crate::helpers::send_response;
use crate::session::Session;
use log::{error, info, warn};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufWriter};

/// Handles the STOR (Store File) FTP command.
///
/// The destination is created or truncated and filled with everything the
/// client sends until it closes the data connection.
pub async fn handle_stor_command<W>(
    writer: &mut W,
    config: &Config,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let (remote, local) = session.resolve(&arg);
    info!("Received STOR command for {} ({:?})", remote, local);

    let stream = match session.data.open_for_transfer().await {
        Ok(stream) => stream,
        Err(e) => {
            error!("STOR: {}", e);
            let (code, message) = e.to_ftp_response();
            return send_response(writer, code, message).await;
        }
    };

    send_response(writer, 125, "Ready to receive").await?;
    let result = receive_file(stream, &local, config.server.upload_buffer_size).await;
    session.data.close().await;

    match result {
        Ok(bytes) => {
            info!("File stored successfully: {:?} ({} bytes)", local, bytes);
            send_response(writer, 226, "Transfer complete").await
        }
        Err(TransferError::Source(e)) => {
            warn!("Failed to create file: {:?}, error: {}", local, e);
            send_response(writer, 450, "Can't create file").await
        }
        Err(e @ TransferError::Stream(_)) => {
            error!("Error storing {:?}: {}", local, e);
            send_response(writer, 451, "Store file failed").await
        }
    }
}

async fn receive_file<S>(stream: &mut S, path: &Path, buffer_size: usize) -> Result<u64, TransferError>
where
    S: AsyncRead + Unpin,
{
    let file = File::create(path).await.map_err(TransferError::Source)?;
    let mut file = BufWriter::with_capacity(buffer_size, file);

    let bytes = tokio::io::copy(stream, &mut file)
        .await
        .map_err(TransferError::Stream)?;
    file.flush().await.map_err(TransferError::Stream)?;
    Ok(bytes)
}
