use crate::helpers::send_response;
use crate::session::Session;
use log::{error, info, warn};
use tokio::fs;
use tokio::io::AsyncWrite;

/// Handles the RNTO (Rename To) FTP command.
///
/// Consumes the source staged by RNFR; without one nothing is renamed.
pub async fn handle_rnto_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let Some(old_path) = session.rename_from.take() else {
        warn!("RNTO without a preceding RNFR");
        return send_response(writer, 503, "RNFR required first").await;
    };

    let (remote, new_path) = session.resolve(&arg);

    match fs::rename(&old_path, &new_path).await {
        Ok(_) => {
            info!("Renamed {:?} to {:?}", old_path, new_path);
            send_response(writer, 250, &format!("Rename to {}", remote)).await
        }
        Err(e) => {
            error!("Failed to rename {:?} to {:?}: {}", old_path, new_path, e);
            send_response(writer, 550, "Rename failed").await
        }
    }
}
