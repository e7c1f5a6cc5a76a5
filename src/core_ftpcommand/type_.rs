use crate::helpers::send_response;
use log::debug;
use tokio::io::AsyncWrite;

/// Handles the TYPE FTP command.
///
/// Every transfer is binary, so the requested type is acknowledged and
/// otherwise ignored.
pub async fn handle_type_command<W>(writer: &mut W, arg: String) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    debug!("TYPE {} acknowledged", arg);
    send_response(writer, 200, "Type set").await
}
