use crate::constants::{
    DEFAULT_DOWNLOAD_BUFFER_SIZE, DEFAULT_LISTEN_PORT, DEFAULT_UPLOAD_BUFFER_SIZE, USERNAME_REGEX,
};
use anyhow::{bail, Context, Result};
use log::warn;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_port: u16,
    pub pasv_address: Option<Ipv4Addr>, // Address advertised in PASV replies
    pub upload_buffer_size: usize,
    pub download_buffer_size: usize,
}

/// One entry of the credential table.
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub password: String,
    pub home_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub users: HashMap<String, UserConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            pasv_address: None,
            upload_buffer_size: DEFAULT_UPLOAD_BUFFER_SIZE,
            download_buffer_size: DEFAULT_DOWNLOAD_BUFFER_SIZE,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server.upload_buffer_size == 0 || self.server.download_buffer_size == 0 {
            bail!("Buffer sizes must be greater than zero");
        }

        let username_re = Regex::new(USERNAME_REGEX)?;
        for (username, user) in &self.users {
            if !username_re.is_match(username) {
                bail!("Invalid username in credential table: {:?}", username);
            }
            if !user.home_dir.is_dir() {
                warn!(
                    "Home directory of user {} is not an existing directory: {:?}",
                    username, user.home_dir
                );
            }
        }
        Ok(())
    }
}
