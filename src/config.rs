use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::render::HighlightStyle;

pub const ENV_API_BASE_URL: &str = "CP_API_BASE_URL";
pub const ENV_ADMIN_AUTH_TOKEN: &str = "ADMIN_AUTH_TOKEN";
pub const ENV_LOCAL_API_KEY_PATH: &str = "LOCAL_CP_API_PK_PATH";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub highlight: HighlightStyle,
    #[serde(default = "default_private_key_path")]
    pub private_key_path: String,
    /// Where the local API server expects its copy of the private key.
    #[serde(default)]
    pub local_api_key_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
    /// Repository the local end-to-end run clones the API server from.
    #[serde(default = "default_e2e_repo_url")]
    pub e2e_repo_url: String,
    /// Program and arguments that start the server inside the clone.
    #[serde(default = "default_e2e_server_command")]
    pub e2e_server_command: Vec<String>,
    #[serde(default = "default_e2e_dir")]
    pub e2e_dir: String,
    /// host:port the started server listens on.
    #[serde(default = "default_e2e_server_addr")]
    pub e2e_server_addr: String,
    /// Only ever read from the environment, never written to disk.
    #[serde(skip)]
    pub admin_auth_token: Option<String>,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_private_key_path() -> String {
    "cp.pem".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_e2e_repo_url() -> String {
    "https://github.com/reddhouse/cp-api".to_string()
}
fn default_e2e_server_command() -> Vec<String> {
    ["go", "run", ".", "-env=dev"].map(String::from).to_vec()
}
fn default_e2e_dir() -> String {
    "temp-e2e".to_string()
}
fn default_e2e_server_addr() -> String {
    "localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            highlight: HighlightStyle::default(),
            private_key_path: default_private_key_path(),
            local_api_key_path: None,
            log_level: default_log_level(),
            log_file: None,
            e2e_repo_url: default_e2e_repo_url(),
            e2e_server_command: default_e2e_server_command(),
            e2e_dir: default_e2e_dir(),
            e2e_server_addr: default_e2e_server_addr(),
            admin_auth_token: None,
        }
    }
}

impl Config {
    /// Load from the default location, writing a default file if none exists.
    /// An unwritable default is only a warning on stderr, since logging is
    /// not set up until the config is known.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        match Self::load_or_create(&path) {
            Err(e) if !path.exists() => {
                eprintln!("Warning: could not create default config: {e:#}");
                Ok(Config::default())
            }
            result => result,
        }
    }

    /// Load `path`, or write and return the default config when it is missing.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Config::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Write the default config if missing. Returns its path either way.
    pub fn ensure_default() -> Result<PathBuf> {
        let path = Self::config_path();
        if !path.exists() {
            Config::default().save_to(&path)?;
        }
        Ok(path)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cp-admin")
            .join("config.toml")
    }

    pub fn default_log_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cp-admin")
            .join("cp-admin.log")
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_log_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Overlay values from the environment. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(token) = get(ENV_ADMIN_AUTH_TOKEN) {
            self.admin_auth_token = Some(token);
        }
        if let Some(path) = get(ENV_LOCAL_API_KEY_PATH) {
            self.local_api_key_path = Some(path);
        }
    }

    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }
}
