use crate::config::{Config, UserConfig};
use crate::constants::ANONYMOUS_USER;

/// Looks up a user in the credential table loaded at startup.
///
/// The table is never mutated once the server runs, so sessions read it
/// concurrently without synchronisation.
pub fn lookup_user<'a>(config: &'a Config, username: &str) -> Option<&'a UserConfig> {
    config.users.get(username)
}

/// The anonymous account skips the password step.
pub fn is_anonymous(username: &str) -> bool {
    username == ANONYMOUS_USER
}
