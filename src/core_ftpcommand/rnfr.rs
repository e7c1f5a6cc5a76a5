use crate::helpers::send_response;
use crate::session::Session;
use log::{error, info, warn};
use std::io::ErrorKind;
use tokio::fs;
use tokio::io::AsyncWrite;

/// Handles the RNFR (Rename From) FTP command.
///
/// Stages the source path for the RNTO that must follow immediately.
pub async fn handle_rnfr_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let (remote, local) = session.resolve(&arg);

    if remote == "/" {
        warn!("Refusing to rename the home directory");
        return send_response(writer, 550, "Permission denied").await;
    }

    match fs::metadata(&local).await {
        Ok(_) => {
            info!("Rename source staged: {:?}", local);
            session.rename_from = Some(local);
            send_response(writer, 350, &format!("Rename from {}", remote)).await
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            send_response(writer, 450, "File does not exist").await
        }
        Err(e) => {
            error!("Failed to stat {:?}: {}", local, e);
            send_response(writer, 550, "Rename failed").await
        }
    }
}
