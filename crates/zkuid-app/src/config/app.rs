use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use zkuid_types::{ZkuidError, ZkuidResult};

use super::api::ApiConfig;
use super::logging::LoggingConfig;
use super::storage::StorageConfig;
use super::wallet::WalletConfig;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub wallet: WalletConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> ZkuidResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| ZkuidError::Config(format!("Failed to read config: {}", e)))?;

            toml::from_str(&contents)
                .map_err(|e| ZkuidError::Config(format!("Failed to parse config: {}", e)))?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ZkuidResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ZkuidError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ZkuidError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| ZkuidError::Config(format!("Failed to write config: {}", e)))?;

        info!("Configuration saved to {:?}", path.as_ref());
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ZKUID_API_URL") {
            self.api.base_url = url;
        }

        if let Some(timeout) = var("ZKUID_API_TIMEOUT") {
            match timeout.parse() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid ZKUID_API_TIMEOUT: {}", timeout),
            }
        }

        if let Some(rpc) = var("ZKUID_WALLET_RPC") {
            self.wallet.rpc_url = Some(rpc).filter(|s| !s.trim().is_empty());
        }

        if let Some(dir) = var("ZKUID_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(level) = var("ZKUID_LOG_LEVEL") {
            match level.parse() {
                Ok(level) => self.logging.level = level,
                Err(_) => warn!("Ignoring invalid ZKUID_LOG_LEVEL: {}", level),
            }
        }

        if var("ZKUID_LOG_JSON").is_some() {
            self.logging.json = true;
        }
    }

    pub fn validate(&self) -> ZkuidResult<()> {
        if !is_http_url(&self.api.base_url) {
            return Err(ZkuidError::Config(format!(
                "API base URL must start with http:// or https://: {}",
                self.api.base_url
            )));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ZkuidError::Config(
                "Request timeout must be at least 1 second".into(),
            ));
        }

        if let Some(ref rpc) = self.wallet.rpc_url {
            if !is_http_url(rpc) {
                return Err(ZkuidError::Config(format!(
                    "Wallet RPC URL must start with http:// or https://: {}",
                    rpc
                )));
            }
        }

        if !is_http_url(&self.storage.ipfs_gateway) {
            return Err(ZkuidError::Config(format!(
                "IPFS gateway must start with http:// or https://: {}",
                self.storage.ipfs_gateway
            )));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "zkUID Configuration")?;
        writeln!(f, "===================")?;
        writeln!(f, "API: {}", self.api.base_url)?;
        writeln!(f, "Request timeout: {}s", self.api.request_timeout_secs)?;
        writeln!(
            f,
            "Wallet RPC: {}",
            self.wallet.rpc_url.as_deref().unwrap_or("(none)")
        )?;
        writeln!(f, "Data dir: {:?}", self.storage.data_dir)?;
        writeln!(f, "IPFS gateway: {}", self.storage.ipfs_gateway)?;
        writeln!(f, "Log level: {}", self.logging.level)?;
        Ok(())
    }
}
