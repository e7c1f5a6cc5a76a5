use crate::helpers::send_response;
use crate::session::Session;
use log::{error, info, warn};
use std::io::ErrorKind;
use tokio::fs;
use tokio::io::AsyncWrite;

/// Handles the DELE (Delete File) FTP command.
///
/// # Arguments
///
/// * `writer` - The control connection.
/// * `session` - The state of the current session.
/// * `arg` - The file to delete.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_dele_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let (remote, local) = session.resolve(&arg);
    info!("Received DELE command, resolved to {} ({:?})", remote, local);

    match fs::metadata(&local).await {
        Ok(metadata) if metadata.is_dir() => {
            warn!("Refusing to DELE a directory: {:?}", local);
            return send_response(writer, 550, "Is a directory").await;
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return send_response(writer, 450, "File does not exist").await;
        }
        Err(e) => {
            error!("Failed to stat {:?}: {}", local, e);
            return send_response(writer, 550, "Delete file failed").await;
        }
    }

    match fs::remove_file(&local).await {
        Ok(_) => send_response(writer, 250, "File deleted").await,
        Err(e) => {
            error!("Failed to delete file: {:?}, error: {}", local, e);
            send_response(writer, 550, "Delete file failed").await
        }
    }
}
