use crate::helpers::send_response;
use crate::session::Session;
use log::info;
use tokio::io::AsyncWrite;

/// Handles the QUIT FTP command.
///
/// Closes any data connection, forgets the login and stops the session loop
/// once the reply is sent.
pub async fn handle_quit_command<W>(writer: &mut W, session: &mut Session) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    info!("Received QUIT command. Closing connection.");
    session.data.close().await;
    session.username = None;
    session.terminate();
    send_response(writer, 221, "Goodbye").await
}
