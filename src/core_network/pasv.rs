use crate::config::Config;
use crate::core_network::error::DataChannelError;
use crate::helpers::send_response;
use crate::session::Session;
use log::{debug, error};
use std::net::{IpAddr, Ipv4Addr};
use tokio::io::AsyncWrite;

/// Handles the PASV FTP command.
///
/// Opens a new listener on the control connection's local address and tells
/// the client where to connect. Any previous listener or active target is
/// discarded.
pub async fn handle_pasv_command<W>(
    writer: &mut W,
    config: &Config,
    session: &mut Session,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let advertised = match advertised_address(config, session.local_ip) {
        Ok(ip) => ip,
        Err(e) => {
            error!("Cannot enter passive mode: {}", e);
            let (code, message) = e.to_ftp_response();
            return send_response(writer, code, message).await;
        }
    };

    match session.data.enter_passive(session.local_ip).await {
        Ok(addr) => {
            let reply = format_pasv_reply(advertised, addr.port());
            debug!("PASV reply: {}", reply);
            send_response(writer, 227, &reply).await
        }
        Err(e) => {
            error!("Failed to set up passive listener: {}", e);
            send_response(writer, 500, "Passive mode error").await
        }
    }
}

/// Address announced to the client: the configured one, or the local IPv4
/// address the client reached us on.
pub fn advertised_address(config: &Config, local_ip: IpAddr) -> Result<Ipv4Addr, DataChannelError> {
    if let Some(addr) = config.server.pasv_address {
        return Ok(addr);
    }
    match local_ip {
        IpAddr::V4(ip) => Ok(ip),
        IpAddr::V6(ip) => ip
            .to_ipv4_mapped()
            .ok_or(DataChannelError::NotIpv4(local_ip)),
    }
}

/// `Entering Passive Mode (h1,h2,h3,h4,p1,p2)`
pub fn format_pasv_reply(ip: Ipv4Addr, port: u16) -> String {
    let [h1, h2, h3, h4] = ip.octets();
    format!(
        "Entering Passive Mode ({},{},{},{},{},{})",
        h1,
        h2,
        h3,
        h4,
        port >> 8,
        port & 0xFF
    )
}
