// src/constants.rs

pub const USERNAME_REGEX: &str = r"^[a-zA-Z0-9_.-]{1,32}$";

pub const DEFAULT_LISTEN_PORT: u16 = 9021;
pub const DEFAULT_CONFIG_PATH: &str = "minftpd.toml";

pub const DEFAULT_UPLOAD_BUFFER_SIZE: usize = 256 * 1024;
pub const DEFAULT_DOWNLOAD_BUFFER_SIZE: usize = 128 * 1024;

/// Account that logs in without a password step.
pub const ANONYMOUS_USER: &str = "anonymous";

pub const WELCOME_MESSAGE: &str = "minftpd ready";
pub const SYSTEM_TYPE: &str = "UNIX Type: L8";

/// Entries modified longer ago than this show a year in LIST output.
pub const LIST_RECENT_DAYS: i64 = 180;

/// Longest control line accepted before the session is dropped.
pub const MAX_COMMAND_LINE: usize = 8 * 1024;

/// Pause after a failed accept so a persistent error (EMFILE) cannot spin.
pub const ACCEPT_ERROR_BACKOFF_MS: u64 = 100;
