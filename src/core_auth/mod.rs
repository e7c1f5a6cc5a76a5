pub mod core_auth;
pub mod helper;

pub use core_auth::{is_anonymous, lookup_user};
pub use helper::verify_password;
