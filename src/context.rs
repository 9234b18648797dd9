use std::path::PathBuf;

use crate::commands::api::ApiClient;
use crate::config::Config;

/// Everything commands need, built once at startup and shared by the menu
/// entries that close over it.
pub struct AdminContext {
    pub config: Config,
    pub api: ApiClient,
}

impl AdminContext {
    pub fn new(config: Config) -> Self {
        let api = ApiClient::new(
            &config.api_base_url,
            config.request_timeout(),
            config.admin_auth_token.clone(),
        );
        Self { config, api }
    }

    pub fn private_key_path(&self) -> PathBuf {
        PathBuf::from(&self.config.private_key_path)
    }

    pub fn local_api_key_path(&self) -> Option<PathBuf> {
        self.config.local_api_key_path.as_ref().map(PathBuf::from)
    }
}
