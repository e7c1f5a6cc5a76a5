use crate::helpers::send_response;
use crate::session::Session;
use log::{debug, info, warn};
use std::net::{Ipv4Addr, SocketAddrV4};
use tokio::io::AsyncWrite;

/// Parses the `h1,h2,h3,h4,p1,p2` argument of PORT.
///
/// Returns `None` unless there are exactly six fields, each made only of
/// ASCII digits and in `0..=255`.
pub fn parse_port_argument(arg: &str) -> Option<SocketAddrV4> {
    let fields = arg
        .split(',')
        .map(|field| {
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            field.parse::<u8>().ok()
        })
        .collect::<Option<Vec<u8>>>()?;

    let &[h1, h2, h3, h4, p1, p2] = fields.as_slice() else {
        return None;
    };
    let port = u16::from(p1) << 8 | u16::from(p2);
    Some(SocketAddrV4::new(Ipv4Addr::new(h1, h2, h3, h4), port))
}

/// Handles the PORT (Active Mode) FTP command.
///
/// Only records the target; the connection is dialed when a transfer starts.
pub async fn handle_port_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let Some(target) = parse_port_argument(&arg) else {
        warn!("Malformed PORT argument: {:?}", arg);
        return send_response(writer, 501, "Parameter error").await;
    };

    info!("Received PORT command with target {}", target);
    debug!("Previous data mode: {:?}", session.data.mode());
    session.data.enter_active(target).await;
    send_response(writer, 200, "PORT command successful").await
}
