use crate::constants::DEFAULT_CONFIG_PATH;
use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "minftpd", about = "A minimal FTP server written in Rust.")]
pub struct Cli {
    /// Port to listen on (overrides `listen_port` from the configuration file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["minftpd"]);
        assert_eq!(cli.port, None);
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_port_flag() {
        let cli = Cli::parse_from(["minftpd", "-p", "2121", "--config", "ftp.toml", "-v"]);
        assert_eq!(cli.port, Some(2121));
        assert_eq!(cli.config, "ftp.toml");
        assert!(cli.verbose);
    }
}
