use crate::constants::SYSTEM_TYPE;
use crate::helpers::send_response;
use log::info;
use tokio::io::AsyncWrite;

/// Handles the SYST (System) FTP command.
///
/// This function sends a response to the client indicating the system type of the server.
pub async fn handle_syst_command<W>(writer: &mut W) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    info!("Responding to SYST command with system type.");
    send_response(writer, 215, SYSTEM_TYPE).await
}
