use crate::core_ftpcommand::utils::resolve_path;
use crate::core_network::data_channel::DataChannel;
use std::net::IpAddr;
use std::path::PathBuf;

/// Login progress of a control connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Unauthenticated,
    AwaitingPassword,
    Authenticated,
    Closed,
}

/// Per-connection state, owned exclusively by the task serving the connection.
#[derive(Debug)]
pub struct Session {
    pub username: Option<String>, // Set by USER
    pub state: LoginState,
    pub home_dir: PathBuf,   // Filesystem root of the virtual tree
    pub current_dir: String, // Virtual, normalized, starts at "/"
    pub rename_from: Option<PathBuf>,
    pub data: DataChannel,
    pub local_ip: IpAddr, // Local address of the control connection
    pub running: bool,
}

impl Session {
    pub fn new(home_dir: PathBuf, local_ip: IpAddr) -> Self {
        Self {
            username: None,
            state: LoginState::Unauthenticated,
            home_dir,
            current_dir: String::from("/"),
            rename_from: None,
            data: DataChannel::new(),
            local_ip,
            running: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == LoginState::Authenticated
    }

    /// Marks the session logged in and roots it at `home_dir`.
    pub fn login(&mut self, home_dir: PathBuf) {
        self.home_dir = home_dir;
        self.current_dir = String::from("/");
        self.state = LoginState::Authenticated;
    }

    /// Ends the session after the current reply has been sent.
    pub fn terminate(&mut self) {
        self.state = LoginState::Closed;
        self.running = false;
    }

    /// Maps a client path onto `(virtual path, filesystem path)`.
    pub fn resolve(&self, arg: &str) -> (String, PathBuf) {
        resolve_path(&self.current_dir, &self.home_dir, arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_new_session() {
        let session = Session::new(PathBuf::from("/srv"), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(session.state, LoginState::Unauthenticated);
        assert_eq!(session.current_dir, "/");
        assert!(session.running);
        assert!(!session.is_authenticated());
        assert!(!session.data.is_open());
    }

    #[test]
    fn test_login_resets_cwd() {
        let mut session = Session::new(PathBuf::from("/srv"), IpAddr::V4(Ipv4Addr::LOCALHOST));
        session.current_dir = String::from("/old");
        session.login(PathBuf::from("/home/bob"));
        assert!(session.is_authenticated());
        assert_eq!(session.current_dir, "/");

        let (remote, local) = session.resolve("docs");
        assert_eq!(remote, "/docs");
        assert_eq!(local, PathBuf::from("/home/bob/docs"));
    }

    #[test]
    fn test_terminate() {
        let mut session = Session::new(PathBuf::from("/srv"), IpAddr::V4(Ipv4Addr::LOCALHOST));
        session.terminate();
        assert!(!session.running);
        assert_eq!(session.state, LoginState::Closed);
    }
}
