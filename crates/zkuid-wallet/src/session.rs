use crate::format::format_short;
use crate::provider::DynWalletProvider;
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use zkuid_types::{Address, ZkuidError, ZkuidResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    pub address: Option<Address>,
}

impl WalletSession {
    pub fn empty() -> Self {
        Self { address: None }
    }

    pub fn connected(address: Address) -> Self {
        Self { address: Some(address) }
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn short_address(&self) -> String {
        let rendered = self.address.map(|a| a.to_checksum());
        format_short(rendered.as_deref())
    }
}

#[derive(Default)]
struct SessionFlags {
    /// Set by `disconnect`. Keeps the startup query from silently restoring
    /// an account the user just disconnected, since the provider itself is
    /// never told.
    locally_disconnected: bool,
}

/// Owns the single wallet session of an application instance.
///
/// Only `connect` and `query_existing_session` talk to the provider, and
/// they run one at a time.
pub struct WalletSessionManager {
    provider: Option<DynWalletProvider>,
    session: watch::Sender<WalletSession>,
    flags: Mutex<SessionFlags>,
}

impl WalletSessionManager {
    pub fn new(provider: Option<DynWalletProvider>) -> Self {
        let (session, _) = watch::channel(WalletSession::empty());
        Self {
            provider,
            session,
            flags: Mutex::new(SessionFlags::default()),
        }
    }

    pub fn without_provider() -> Self {
        Self::new(None)
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn session(&self) -> WalletSession {
        *self.session.borrow()
    }

    pub fn address(&self) -> Option<Address> {
        self.session.borrow().address
    }

    pub fn is_connected(&self) -> bool {
        self.session.borrow().is_connected()
    }

    pub fn subscribe(&self) -> watch::Receiver<WalletSession> {
        self.session.subscribe()
    }

    /// Re-derives the session from accounts the provider already authorized.
    /// Never prompts and never fails: a missing provider, a provider error or
    /// an unparseable account all yield an empty session.
    pub async fn query_existing_session(&self) -> WalletSession {
        let flags = self.flags.lock().await;

        let provider = match &self.provider {
            Some(p) => p,
            None => {
                debug!("No wallet provider present, starting without a session");
                return self.publish(WalletSession::empty());
            }
        };

        if flags.locally_disconnected {
            debug!("Wallet was disconnected locally, not restoring session");
            return self.publish(WalletSession::empty());
        }

        let session = match provider.authorized_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(raw) => match Address::from_hex(raw) {
                    Ok(address) => {
                        info!("Restored wallet session for {}", format_short(Some(raw)));
                        WalletSession::connected(address)
                    }
                    Err(e) => {
                        warn!("Provider returned an unusable account: {}", e);
                        WalletSession::empty()
                    }
                },
                None => WalletSession::empty(),
            },
            Err(e) => {
                warn!("Error checking wallet connection: {}", e);
                WalletSession::empty()
            }
        };

        drop(flags);
        self.publish(session)
    }

    /// Requests account access and adopts the first returned account.
    pub async fn connect(&self) -> ZkuidResult<Address> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(ZkuidError::ProviderUnavailable)?;

        let accounts = provider.request_accounts().await.map_err(|e| {
            warn!("Error connecting wallet: {}", e);
            e
        })?;

        let raw = accounts
            .first()
            .ok_or_else(|| ZkuidError::Provider("provider returned no accounts".into()))?;

        let address = Address::from_hex(raw)
            .map_err(|e| ZkuidError::Provider(format!("provider returned an invalid account: {}", e)))?;

        // The prompt above may never resolve, so the flags are only locked
        // once it has.
        let mut flags = self.flags.lock().await;
        flags.locally_disconnected = false;
        self.publish(WalletSession::connected(address));
        info!("Wallet connected: {}", format_short(Some(&address.to_checksum())));
        Ok(address)
    }

    /// Forgets the local session. The provider is not contacted.
    pub async fn disconnect(&self) {
        let mut flags = self.flags.lock().await;
        flags.locally_disconnected = true;
        if self.session.borrow().is_connected() {
            info!("Wallet disconnected");
        }
        self.publish(WalletSession::empty());
    }

    fn publish(&self, session: WalletSession) -> WalletSession {
        self.session.send_replace(session);
        session
    }
}
