use crate::config::Config;
use crate::core_auth::{is_anonymous, lookup_user};
use crate::helpers::send_response;
use crate::session::{LoginState, Session};
use log::{info, warn};
use tokio::io::AsyncWrite;

/// Handles the USER FTP command.
///
/// An unknown user ends the session. The anonymous account is logged in on
/// the spot; any other known user is asked for a password.
///
/// # Arguments
///
/// * `writer` - The control connection.
/// * `config` - Server configuration holding the credential table.
/// * `session` - The state of the current session.
/// * `username` - The username provided by the client.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_user_command<W>(
    writer: &mut W,
    config: &Config,
    session: &mut Session,
    username: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    info!("Received USER command with username: {}", username);

    let Some(record) = lookup_user(config, &username) else {
        warn!("Unknown user {:?}, closing session", username);
        session.terminate();
        return send_response(writer, 550, "Invalid User").await;
    };

    session.username = Some(username.clone());

    if is_anonymous(&username) {
        session.login(record.home_dir.clone());
        info!("Anonymous login, home directory {:?}", session.home_dir);
        send_response(writer, 230, "Anonymous login okay").await
    } else {
        session.state = LoginState::AwaitingPassword;
        send_response(writer, 331, "User name okay, need password").await
    }
}
