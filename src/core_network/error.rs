use std::net::IpAddr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataChannelError {
    #[error("no data connection configured")]
    NotConfigured,

    #[error("passive mode needs an IPv4 control address, got {0}")]
    NotIpv4(IpAddr),

    #[error("data connection I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataChannelError {
    pub fn to_ftp_response(&self) -> (u16, &'static str) {
        match self {
            DataChannelError::NotIpv4(_) => (500, "Passive mode error"),
            _ => (425, "Can't open data connection"),
        }
    }
}

/// Failure of a LIST/RETR/STOR once the data connection is up.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The file or directory on the server side could not be opened.
    #[error("cannot access transfer source: {0}")]
    Source(#[source] std::io::Error),

    #[error("transfer interrupted: {0}")]
    Stream(#[source] std::io::Error),
}
