use crate::provider::WalletProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;
use zkuid_types::{ZkuidError, ZkuidResult};

/// EIP-1193 "User Rejected Request".
pub const USER_REJECTED_CODE: i64 = 4001;

const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// Wallet provider reached over JSON-RPC 2.0 on HTTP, for wallets and
/// signers that expose the standard account methods on a local endpoint.
pub struct JsonRpcWalletProvider {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcWalletProvider {
    pub fn new(url: impl Into<String>) -> ZkuidResult<Self> {
        // The account request waits on a human, so the timeout is generous.
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> ZkuidResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ZkuidError::Provider(format!("Failed to build RPC client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call_accounts(&self, method: &str) -> ZkuidResult<Vec<String>> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": [],
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
        });

        debug!("Wallet RPC {} -> {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ZkuidError::Provider(format!("{} failed: {}", method, e)))?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| ZkuidError::Provider(format!("Failed to parse RPC response: {}", e)))?;

        if let Some(error) = body.error {
            if error.code == USER_REJECTED_CODE {
                return Err(ZkuidError::UserRejected(error.message));
            }
            return Err(ZkuidError::Provider(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }

        let result = body
            .result
            .ok_or_else(|| ZkuidError::Provider(format!("{} returned no result", method)))?;

        serde_json::from_value(result)
            .map_err(|e| ZkuidError::Provider(format!("Failed to parse RPC result: {}", e)))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWalletProvider {
    async fn request_accounts(&self) -> ZkuidResult<Vec<String>> {
        self.call_accounts("eth_requestAccounts").await
    }

    async fn authorized_accounts(&self) -> ZkuidResult<Vec<String>> {
        self.call_accounts("eth_accounts").await
    }
}
