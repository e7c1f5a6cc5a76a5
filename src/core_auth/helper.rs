use bcrypt::verify;
use log::error;

/// Checks a client-supplied password against the stored one.
///
/// Stored passwords starting with `$2` are treated as bcrypt hashes, anything
/// else is compared as plain text.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.starts_with("$2") {
        return verify(password, stored).unwrap_or_else(|e| {
            error!("Invalid bcrypt hash in credential table: {}", e);
            false
        });
    }
    password == stored
}
