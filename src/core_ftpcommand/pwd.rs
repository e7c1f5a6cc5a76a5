// src/core_ftpcommand/pwd.rs
use crate::core_ftpcommand::utils::quote_path;
use crate::helpers::send_response;
use crate::session::Session;
use tokio::io::AsyncWrite;

pub async fn handle_pwd_command<W>(writer: &mut W, session: &Session) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response = format!("{} is the current directory", quote_path(&session.current_dir));
    send_response(writer, 257, &response).await
}
