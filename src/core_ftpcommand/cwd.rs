use crate::helpers::send_response;
use crate::session::Session;
use log::{error, info, warn};
use tokio::fs;
use tokio::io::AsyncWrite;

pub async fn handle_cwd_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let (remote, local) = session.resolve(&arg);
    info!("Received CWD command, resolved to {} ({:?})", remote, local);

    match fs::metadata(&local).await {
        Ok(metadata) if metadata.is_dir() => {
            session.current_dir = remote;
            info!("Directory successfully changed to: {}", session.current_dir);
            send_response(writer, 250, "Working directory changed").await
        }
        Ok(_) => {
            warn!("Not a directory: {:?}", local);
            send_response(writer, 500, "Change directory failed").await
        }
        Err(e) => {
            error!("Failed to stat {:?}: {}", local, e);
            send_response(writer, 500, "Change directory failed").await
        }
    }
}
