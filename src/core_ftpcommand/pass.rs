use crate::config::Config;
use crate::core_auth::{lookup_user, verify_password};
use crate::helpers::send_response;
use crate::session::{LoginState, Session};
use log::{info, warn};
use tokio::io::AsyncWrite;

/// Handles the PASS FTP command.
///
/// A wrong password ends the session; there is no retry.
pub async fn handle_pass_command<W>(
    writer: &mut W,
    config: &Config,
    session: &mut Session,
    password: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    match session.state {
        LoginState::AwaitingPassword => {}
        LoginState::Authenticated => {
            return send_response(writer, 230, "Already logged in").await;
        }
        _ => {
            warn!("PASS received before USER");
            return send_response(writer, 530, "Login with USER first").await;
        }
    }

    let username = session.username.clone().unwrap_or_default();
    match lookup_user(config, &username) {
        Some(record) if verify_password(&password, &record.password) => {
            session.login(record.home_dir.clone());
            info!("User {} logged in, home directory {:?}", username, session.home_dir);
            send_response(writer, 230, "User logged in, proceed").await
        }
        _ => {
            warn!("Wrong password for user {}, closing session", username);
            session.terminate();
            send_response(writer, 530, "Password is not correct").await
        }
    }
}
