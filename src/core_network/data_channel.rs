use crate::core_network::error::DataChannelError;
use log::{debug, info, trace};
use std::net::{IpAddr, SocketAddr, SocketAddrV4};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

/// How the next data connection is established.
#[derive(Debug, Default)]
pub enum DataMode {
    #[default]
    None,
    /// PORT: the server dials the client.
    Active(SocketAddrV4),
    /// PASV: the client dials this listener.
    Passive(TcpListener),
}

/// Owns the data channel of one session: the mode selected by PORT/PASV and
/// the single connection of the transfer in flight.
#[derive(Debug, Default)]
pub struct DataChannel {
    mode: DataMode,
    stream: Option<TcpStream>,
}

impl DataChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &DataMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Switches to active mode, dropping any passive listener.
    pub async fn enter_active(&mut self, target: SocketAddrV4) {
        self.close().await;
        if matches!(self.mode, DataMode::Passive(_)) {
            debug!("Closing passive listener, switching to active mode");
        }
        self.mode = DataMode::Active(target);
        info!("Active mode target set to {}", target);
    }

    /// Switches to passive mode on a fresh listener bound to `bind_ip` and
    /// an ephemeral port. Returns the bound address.
    pub async fn enter_passive(&mut self, bind_ip: IpAddr) -> Result<SocketAddr, DataChannelError> {
        self.close().await;
        // Release the previous listener before binding the new one.
        self.mode = DataMode::None;

        let listener = TcpListener::bind((bind_ip, 0)).await?;
        let addr = listener.local_addr()?;
        self.mode = DataMode::Passive(listener);
        info!("Passive listener bound on {}", addr);
        Ok(addr)
    }

    /// Establishes the data connection for one transfer, replacing any
    /// connection still open.
    ///
    /// In passive mode this waits until the client connects.
    pub async fn open_for_transfer(&mut self) -> Result<&mut TcpStream, DataChannelError> {
        self.close().await;

        let stream = match &self.mode {
            DataMode::None => return Err(DataChannelError::NotConfigured),
            DataMode::Active(target) => {
                trace!("Dialing active data connection to {}", target);
                let stream = TcpStream::connect(*target).await?;
                debug!("Active data connection established with {}", target);
                stream
            }
            DataMode::Passive(listener) => {
                trace!("Waiting for passive data connection");
                let (stream, peer) = listener.accept().await?;
                debug!("Accepted passive data connection from {}", peer);
                stream
            }
        };

        Ok(self.stream.insert(stream))
    }

    /// Closes the current data connection, if any. The mode is kept.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                debug!("Data connection shutdown failed: {}", e);
            }
            trace!("Data connection closed");
        }
    }
}
