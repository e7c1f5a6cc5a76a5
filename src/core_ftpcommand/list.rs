use crate::constants::LIST_RECENT_DAYS;
use crate::core_network::error::TransferError;
use crate::helpers::send_response;
use crate::session::Session;
use chrono::{DateTime, Duration, Local};
use log::{error, info, warn};
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// One line of a directory listing.
#[derive(Debug, Clone)]
pub struct ListEntry {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Local>,
    pub is_dir: bool,
}

impl ListEntry {
    fn from_metadata(name: String, metadata: &Metadata) -> Self {
        let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
        Self {
            name,
            size: metadata.len(),
            modified: DateTime::<Local>::from(modified),
            is_dir: metadata.is_dir(),
        }
    }
}

/// Handles the LIST FTP command.
///
/// Lists the given path, or the working directory when none is given, over
/// the data connection in `ls -l` style.
pub async fn handle_list_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let (remote, local) = session.resolve(listing_target(&arg));
    info!("Received LIST command for {} ({:?})", remote, local);

    let stream = match session.data.open_for_transfer().await {
        Ok(stream) => stream,
        Err(e) => {
            error!("LIST: {}", e);
            let (code, message) = e.to_ftp_response();
            return send_response(writer, code, message).await;
        }
    };

    send_response(writer, 125, "Here comes the directory listing").await?;
    let result = write_listing(stream, &local).await;
    session.data.close().await;

    match result {
        Ok(count) => {
            info!("Directory listing sent successfully ({} entries).", count);
            send_response(writer, 226, "Transfer complete").await
        }
        Err(TransferError::Source(e)) => {
            warn!("Cannot list {:?}: {}", local, e);
            send_response(writer, 450, "Directory not found").await
        }
        Err(e @ TransferError::Stream(_)) => {
            error!("Failed to send directory listing: {}", e);
            send_response(writer, 451, "Transfer failed").await
        }
    }
}

/// Drops leading option tokens such as `-la` that many clients send.
fn listing_target(arg: &str) -> &str {
    let mut rest = arg.trim_start();
    while rest.starts_with('-') {
        rest = rest
            .split_once(char::is_whitespace)
            .map(|(_, tail)| tail.trim_start())
            .unwrap_or("");
    }
    rest
}

async fn write_listing<S>(stream: &mut S, path: &Path) -> Result<usize, TransferError>
where
    S: AsyncWrite + Unpin,
{
    let entries = read_entries(path).await.map_err(TransferError::Source)?;
    let now = Local::now();
    let listing: String = entries
        .iter()
        .map(|entry| format_list_entry(entry, now))
        .collect();

    stream
        .write_all(listing.as_bytes())
        .await
        .map_err(TransferError::Stream)?;
    stream.flush().await.map_err(TransferError::Stream)?;
    Ok(entries.len())
}

/// Entries of a directory sorted by name; a regular file lists as itself.
pub async fn read_entries(path: &Path) -> io::Result<Vec<ListEntry>> {
    let metadata = fs::metadata(path).await?;
    if !metadata.is_dir() {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(vec![ListEntry::from_metadata(name, &metadata)]);
    }

    let mut entries = Vec::new();
    let mut dir = fs::read_dir(path).await?;
    while let Some(entry) = dir.next_entry().await? {
        // Follow symlinks; fall back to the link itself when dangling.
        let metadata = match fs::metadata(entry.path()).await {
            Ok(metadata) => metadata,
            Err(_) => match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Failed to get metadata for {:?}: {}", entry.path(), e);
                    continue;
                }
            },
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push(ListEntry::from_metadata(name, &metadata));
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Formats an entry the way `ls -l` does: time of day for recent entries,
/// the year for anything older than about six months.
pub fn format_list_entry(entry: &ListEntry, now: DateTime<Local>) -> String {
    let file_type = if entry.is_dir { "d" } else { "-" };
    let date = if now.signed_duration_since(entry.modified) > Duration::days(LIST_RECENT_DAYS) {
        entry.modified.format("%b %d  %Y").to_string()
    } else {
        entry.modified.format("%b %d %H:%M").to_string()
    };

    format!(
        "{}rwxr-xr-x 1 ftp ftp {:>12} {} {}\r\n",
        file_type, entry.size, date, entry.name
    )
}
