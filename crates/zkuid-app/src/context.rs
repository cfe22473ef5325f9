use crate::config::AppConfig;
use crate::controller::IdentityActionController;
use crate::history::ProofHistory;
use crate::remote::{DynRemoteIdentityClient, HttpIdentityClient};
use std::sync::Arc;
use tracing::{debug, info};
use zkuid_types::ZkuidResult;
use zkuid_wallet::{DynWalletProvider, JsonRpcWalletProvider, WalletSession, WalletSessionManager};

/// Everything one application instance needs, wired from configuration.
pub struct AppContext {
    pub config: AppConfig,
    pub session: Arc<WalletSessionManager>,
    pub history: Arc<ProofHistory>,
    pub controller: IdentityActionController,
}

impl AppContext {
    pub fn from_config(config: AppConfig) -> ZkuidResult<Self> {
        let provider: Option<DynWalletProvider> = match config.wallet.rpc_url {
            Some(ref url) => {
                debug!("Using wallet provider at {}", url);
                Some(Arc::new(JsonRpcWalletProvider::new(url.clone())?))
            }
            None => None,
        };

        let remote: DynRemoteIdentityClient = Arc::new(HttpIdentityClient::from_config(&config)?);
        let history = Arc::new(ProofHistory::open(config.storage.history_path()));

        Ok(Self::with_parts(
            config,
            Arc::new(WalletSessionManager::new(provider)),
            remote,
            history,
        ))
    }

    pub fn with_parts(
        config: AppConfig,
        session: Arc<WalletSessionManager>,
        remote: DynRemoteIdentityClient,
        history: Arc<ProofHistory>,
    ) -> Self {
        let controller =
            IdentityActionController::new(session.clone(), remote).with_history(history.clone());

        Self {
            config,
            session,
            history,
            controller,
        }
    }

    /// Startup: re-derive the wallet session without prompting.
    pub async fn start(&self) -> WalletSession {
        let session = self.session.query_existing_session().await;
        if !self.session.has_provider() {
            info!("No wallet provider configured");
        }
        session
    }
}
