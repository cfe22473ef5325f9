use super::guard::{InFlight, Rollback};
use crate::remote::RemoteIdentityClient;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};
use zkuid_types::{RegistrationRequest, RegistrationResult, ZkuidError, ZkuidResult};
use zkuid_wallet::WalletSessionManager;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RegistrationState {
    #[default]
    Idle,
    Submitting,
    Complete(RegistrationResult),
    Failed { reason: String },
}

impl RegistrationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RegistrationState::Complete(_) | RegistrationState::Failed { .. })
    }

    pub fn result(&self) -> Option<&RegistrationResult> {
        match self {
            RegistrationState::Complete(result) => Some(result),
            _ => None,
        }
    }
}

/// `idle -> submitting -> {complete, failed}`.
pub struct RegistrationFlow {
    state: watch::Sender<RegistrationState>,
    in_flight: InFlight,
}

impl RegistrationFlow {
    pub fn new() -> Self {
        let (state, _) = watch::channel(RegistrationState::Idle);
        Self {
            state,
            in_flight: InFlight::new("Registration"),
        }
    }

    pub fn state(&self) -> RegistrationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RegistrationState> {
        self.state.subscribe()
    }

    /// While true the form should be disabled and a progress indicator shown.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub async fn submit(
        &self,
        session: &WalletSessionManager,
        remote: &dyn RemoteIdentityClient,
        request: RegistrationRequest,
    ) -> ZkuidResult<RegistrationResult> {
        let _token = self.in_flight.try_acquire()?;

        if !session.is_connected() {
            return Err(ZkuidError::WalletNotConnected);
        }

        if matches!(*self.state.borrow(), RegistrationState::Complete(_)) {
            return Err(ZkuidError::InvalidState(
                "registration already complete, reset to register another".into(),
            ));
        }

        let request = match request.validate() {
            Ok(request) => request,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };

        let pending = Rollback::begin(
            &self.state,
            RegistrationState::Submitting,
            RegistrationState::Failed {
                reason: "registration interrupted".into(),
            },
        );
        info!("Submitting registration");

        match remote.register(&request).await {
            Ok(result) => {
                info!("Registration complete: uid={}", result.uid);
                pending.commit(RegistrationState::Complete(result.clone()));
                Ok(result)
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                pending.commit(RegistrationState::Failed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Clears any stored result or failure so a fresh registration can start.
    pub fn reset(&self) -> ZkuidResult<()> {
        let _token = self.in_flight.try_acquire()?;
        self.state.send_replace(RegistrationState::Idle);
        Ok(())
    }

    fn fail(&self, error: &ZkuidError) {
        warn!("Registration rejected: {}", error);
        self.state.send_replace(RegistrationState::Failed {
            reason: error.to_string(),
        });
    }
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}
