use crate::config::Config;
use crate::constants::{ACCEPT_ERROR_BACKOFF_MS, MAX_COMMAND_LINE, WELCOME_MESSAGE};
use crate::core_ftpcommand::ftpcommand::{parse_command_line, FtpCommand};
use crate::core_ftpcommand::handlers::dispatch_command;
use crate::helpers::send_response;
use crate::session::Session;
use anyhow::Result;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::{TcpListener, TcpStream};

pub async fn start_server(listen_port: u16, config: Arc<Config>) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", listen_port)).await?;
    info!("Server listening on port {}", listen_port);
    serve(listener, config).await
}

/// Accept loop: one task per control connection.
pub async fn serve(listener: TcpListener, config: Arc<Config>) -> Result<()> {
    loop {
        let (socket, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                tokio::time::sleep(Duration::from_millis(ACCEPT_ERROR_BACKOFF_MS)).await;
                continue;
            }
        };
        info!("New connection from {}", addr);

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, config).await {
                error!("Connection error: {:?}", e);
            }
            info!("Connection closed for {}", addr);
        });
    }
}

pub async fn handle_connection(socket: TcpStream, config: Arc<Config>) -> Result<()> {
    let local_ip = socket.local_addr()?.ip();
    // Before login, paths resolve against the server's working directory.
    let home_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut session = Session::new(home_dir, local_ip);

    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);

    let result = async {
        send_response(&mut writer, 220, WELCOME_MESSAGE).await?;
        run_command_loop(&mut reader, &mut writer, &config, &mut session).await
    }
    .await;

    session.data.close().await;
    if let Err(e) = writer.shutdown().await {
        debug!("Control connection shutdown failed: {}", e);
    }
    Ok(result?)
}

/// Reads and executes commands until the session stops running, the client
/// disconnects, or the control channel fails.
pub async fn run_command_loop<R, W>(
    reader: &mut R,
    writer: &mut W,
    config: &Config,
    session: &mut Session,
) -> Result<(), std::io::Error>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = String::new();

    while session.running {
        buffer.clear();
        let limit = MAX_COMMAND_LINE as u64 + 1;
        if (&mut *reader).take(limit).read_line(&mut buffer).await? == 0 {
            info!("Client disconnected");
            break;
        }
        if buffer.len() > MAX_COMMAND_LINE && !buffer.ends_with('\n') {
            warn!("Command line longer than {} bytes, ending session", MAX_COMMAND_LINE);
            session.terminate();
            break;
        }

        let Some((verb, arg)) = parse_command_line(&buffer) else {
            warn!("Empty command line, ending session");
            session.terminate();
            break;
        };

        match FtpCommand::from_verb(&verb) {
            Some(command) => {
                if command == FtpCommand::PASS {
                    debug!("Received command: PASS ****");
                } else {
                    debug!("Received command: {} {}", verb, arg);
                }
                dispatch_command(writer, config, session, command, arg).await?;
            }
            None => {
                warn!("Unknown command: {}", verb);
                send_response(writer, 500, "Command not found").await?;
            }
        }
    }
    Ok(())
}
