use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use super::constants::{DEFAULT_DATA_DIR_NAME, HISTORY_FILE_NAME};
use zkuid_types::DEFAULT_IPFS_GATEWAY;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub ipfs_gateway: String,
}

impl StorageConfig {
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE_NAME)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir: home.join(DEFAULT_DATA_DIR_NAME),
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_string(),
        }
    }
}
