use crate::core_ftpcommand::cwd::handle_cwd_command;
use crate::session::Session;
use tokio::io::AsyncWrite;

/// CDUP is CWD to the parent; at the virtual root it stays at the root.
pub async fn handle_cdup_command<W>(writer: &mut W, session: &mut Session) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    handle_cwd_command(writer, session, String::from("..")).await
}
