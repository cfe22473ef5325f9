mod guard;
mod proof;
mod registration;

pub use guard::{InFlight, InFlightToken};
pub use proof::{ProofFlow, ProofPhase, VerificationReport};
pub use registration::{RegistrationFlow, RegistrationState};

use crate::history::ProofHistory;
use crate::remote::DynRemoteIdentityClient;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;
use zkuid_types::{
    require_uid, ProofArtifactRef, ProofOutcome, ProofRequest, RegistrationRequest,
    RegistrationResult, UserRecord, ZkuidResult,
};
use zkuid_wallet::WalletSessionManager;

/// Drives the user-initiated identity actions against the remote service,
/// consulting the wallet session where an action needs one.
pub struct IdentityActionController {
    session: Arc<WalletSessionManager>,
    remote: DynRemoteIdentityClient,
    registration: RegistrationFlow,
    proof: ProofFlow,
    history: Option<Arc<ProofHistory>>,
}

impl IdentityActionController {
    pub fn new(session: Arc<WalletSessionManager>, remote: DynRemoteIdentityClient) -> Self {
        Self {
            session,
            remote,
            registration: RegistrationFlow::new(),
            proof: ProofFlow::new(),
            history: None,
        }
    }

    pub fn with_history(mut self, history: Arc<ProofHistory>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn session(&self) -> &WalletSessionManager {
        &self.session
    }

    pub fn registration(&self) -> &RegistrationFlow {
        &self.registration
    }

    pub fn proof(&self) -> &ProofFlow {
        &self.proof
    }

    pub fn history(&self) -> Option<&Arc<ProofHistory>> {
        self.history.as_ref()
    }

    pub async fn submit_registration(
        &self,
        request: RegistrationRequest,
    ) -> ZkuidResult<RegistrationResult> {
        self.registration
            .submit(&self.session, self.remote.as_ref(), request)
            .await
    }

    pub fn reset_registration(&self) -> ZkuidResult<()> {
        self.registration.reset()
    }

    pub fn registration_state(&self) -> RegistrationState {
        self.registration.state()
    }

    pub fn subscribe_registration(&self) -> watch::Receiver<RegistrationState> {
        self.registration.subscribe()
    }

    pub async fn generate_proof(&self, request: &ProofRequest) -> ZkuidResult<ProofArtifactRef> {
        self.proof.generate(self.remote.as_ref(), request).await
    }

    /// Verifies the generated proof and returns whether it was accepted.
    /// Every outcome reported by the service is appended to the history.
    pub async fn verify_proof(&self) -> ZkuidResult<bool> {
        let report = self.proof.verify(self.remote.as_ref()).await?;

        if let Some(ref history) = self.history {
            let recorded = history
                .record(report.verification_type, report.verified(), report.tx_hash().cloned())
                .await;
            if let Err(e) = recorded {
                warn!("Failed to record proof history: {}", e);
            }
        }

        Ok(report.verified())
    }

    pub fn reset_proof(&self) -> ZkuidResult<()> {
        self.proof.reset()
    }

    pub fn proof_phase(&self) -> ProofPhase {
        self.proof.phase()
    }

    pub fn proof_outcome(&self) -> ProofOutcome {
        self.proof.outcome()
    }

    pub fn subscribe_proof(&self) -> watch::Receiver<ProofPhase> {
        self.proof.subscribe()
    }

    pub async fn fetch_user_data(&self, uid: &str) -> ZkuidResult<UserRecord> {
        let uid = require_uid(uid)?;
        self.remote.get_user_data(uid).await
    }
}
