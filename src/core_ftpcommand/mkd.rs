use crate::core_ftpcommand::utils::quote_path;
use crate::helpers::send_response;
use crate::session::Session;
use log::{error, info, warn};
use std::io::ErrorKind;
use tokio::fs;
use tokio::io::AsyncWrite;

/// Handles the MKD (Make Directory) FTP command.
///
/// Missing parent directories are created as well. The reply carries the
/// quoted virtual path of the new directory.
///
/// # Arguments
///
/// * `writer` - The control connection.
/// * `session` - The state of the current session.
/// * `arg` - The directory to create.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_mkd_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let (remote, local) = session.resolve(&arg);
    info!("Received MKD command, resolved to {} ({:?})", remote, local);

    match fs::metadata(&local).await {
        Ok(_) => {
            warn!("Directory already exists: {:?}", local);
            return send_response(writer, 500, "Folder is already existed").await;
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            error!("Failed to stat {:?}: {}", local, e);
            return send_response(writer, 550, "Create directory failed").await;
        }
    }

    match fs::create_dir_all(&local).await {
        Ok(_) => {
            info!("Directory created successfully: {:?}", local);
            let message = format!("{} directory created", quote_path(&remote));
            send_response(writer, 257, &message).await
        }
        Err(e) => {
            error!("Failed to create directory: {:?}, error: {}", local, e);
            send_response(writer, 550, "Create directory failed").await
        }
    }
}
