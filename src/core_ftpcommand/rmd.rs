use crate::helpers::send_response;
use crate::session::Session;
use log::{error, info, warn};
use std::io::ErrorKind;
use tokio::fs;
use tokio::io::AsyncWrite;

/// Handles the RMD (Remove Directory) FTP command.
///
/// Only empty directories are removed, and never the virtual root.
pub async fn handle_rmd_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let (remote, local) = session.resolve(&arg);
    info!("Received RMD command, resolved to {} ({:?})", remote, local);

    if remote == "/" {
        warn!("Refusing to remove the home directory");
        return send_response(writer, 550, "Permission denied").await;
    }

    match fs::metadata(&local).await {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            warn!("Not a directory: {:?}", local);
            return send_response(writer, 550, "Not a directory").await;
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Directory does not exist: {:?}", local);
            return send_response(writer, 500, "Directory does not exist").await;
        }
        Err(e) => {
            error!("Failed to stat {:?}: {}", local, e);
            return send_response(writer, 550, "Remove directory failed").await;
        }
    }

    match fs::remove_dir(&local).await {
        Ok(_) => {
            info!("Directory removed successfully: {:?}", local);
            send_response(writer, 250, "Directory removed").await
        }
        Err(e) => {
            error!("Failed to remove directory: {:?}, error: {}", local, e);
            send_response(writer, 550, "Remove directory failed").await
        }
    }
}
