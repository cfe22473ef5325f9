use serde::{Deserialize, Serialize};

/// Where to find a wallet provider. With no `rpc_url` the application runs
/// as if no wallet were installed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub rpc_url: Option<String>,
}
