use super::guard::{InFlight, Rollback};
use crate::remote::RemoteIdentityClient;
use tokio::sync::watch;
use tracing::{info, warn};
use zkuid_types::{
    ProofArtifactRef, ProofOutcome, ProofRequest, TxHash, VerificationType, VerifiedProof,
    ZkuidError, ZkuidResult,
};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ProofPhase {
    #[default]
    Idle,
    Generating(ProofRequest),
    Generated {
        request: ProofRequest,
        artifact: ProofArtifactRef,
    },
    Verifying(ProofRequest),
    Verified(VerifiedProof),
    Unverified(VerificationType),
}

impl ProofPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ProofPhase::Idle => "idle",
            ProofPhase::Generating(_) => "generating",
            ProofPhase::Generated { .. } => "generated",
            ProofPhase::Verifying(_) => "verifying",
            ProofPhase::Verified(_) => "verified",
            ProofPhase::Unverified(_) => "unverified",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProofPhase::Verified(_) | ProofPhase::Unverified(_))
    }

    /// The verification outcome this phase represents.
    pub fn outcome(&self) -> ProofOutcome {
        match self {
            ProofPhase::Idle | ProofPhase::Generated { .. } => ProofOutcome::NotStarted,
            ProofPhase::Generating(_) | ProofPhase::Verifying(_) => ProofOutcome::Pending,
            ProofPhase::Verified(proof) => ProofOutcome::Succeeded(proof.clone()),
            ProofPhase::Unverified(_) => ProofOutcome::Failed,
        }
    }
}

/// What a completed verification reported, along with what was being proven.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationReport {
    pub verification_type: VerificationType,
    pub outcome: ProofOutcome,
}

impl VerificationReport {
    pub fn verified(&self) -> bool {
        matches!(self.outcome, ProofOutcome::Succeeded(_))
    }

    pub fn tx_hash(&self) -> Option<&TxHash> {
        match &self.outcome {
            ProofOutcome::Succeeded(proof) => proof.tx_hash(),
            _ => None,
        }
    }
}

/// `idle -> generating -> generated -> verifying -> {verified, unverified}`,
/// with an explicit reset back to idle.
pub struct ProofFlow {
    phase: watch::Sender<ProofPhase>,
    in_flight: InFlight,
}

impl ProofFlow {
    pub fn new() -> Self {
        let (phase, _) = watch::channel(ProofPhase::Idle);
        Self {
            phase,
            in_flight: InFlight::new("Proof request"),
        }
    }

    pub fn phase(&self) -> ProofPhase {
        self.phase.borrow().clone()
    }

    pub fn outcome(&self) -> ProofOutcome {
        self.phase.borrow().outcome()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProofPhase> {
        self.phase.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Asks the identity service for a proof. A missing UID is rejected
    /// before anything else happens. Failure returns the flow to idle.
    pub async fn generate(
        &self,
        remote: &dyn RemoteIdentityClient,
        request: &ProofRequest,
    ) -> ZkuidResult<ProofArtifactRef> {
        let uid = request.require_uid()?;
        let _token = self.in_flight.try_acquire()?;

        let previous = self.phase();
        if !matches!(previous, ProofPhase::Idle | ProofPhase::Generated { .. }) {
            return Err(ZkuidError::InvalidState(format!(
                "cannot generate a proof while {}, reset first",
                previous.name()
            )));
        }

        let request = ProofRequest::new(uid, request.verification_type);
        let pending = Rollback::begin(
            &self.phase,
            ProofPhase::Generating(request.clone()),
            previous,
        );
        info!("Generating {} proof for {}", request.verification_type, uid);

        match remote.generate_proof(uid, request.verification_type).await {
            Ok(artifact) => {
                info!("ZK proof generated");
                pending.commit(ProofPhase::Generated {
                    request,
                    artifact: artifact.clone(),
                });
                Ok(artifact)
            }
            Err(e) => {
                warn!("Failed to generate proof: {}", e);
                pending.commit(ProofPhase::Idle);
                Err(e)
            }
        }
    }

    /// Verifies the generated proof. Only valid from `generated`; from any
    /// other phase it fails without contacting the service. The transaction
    /// reference is optional: `verified: true` without one still succeeds.
    pub async fn verify(&self, remote: &dyn RemoteIdentityClient) -> ZkuidResult<VerificationReport> {
        let _token = self.in_flight.try_acquire()?;

        let previous = self.phase();
        let request = match &previous {
            ProofPhase::Generated { request, .. } => request.clone(),
            other => {
                return Err(ZkuidError::InvalidState(format!(
                    "no generated proof to verify (currently {})",
                    other.name()
                )))
            }
        };

        let pending = Rollback::begin(&self.phase, ProofPhase::Verifying(request.clone()), previous);

        match remote
            .verify_proof(&request.uid, request.verification_type)
            .await
        {
            Ok(receipt) if receipt.verified => {
                let proof = VerifiedProof::new(request.verification_type, receipt.tx_hash);
                info!("Identity verified: {}", proof.label());
                pending.commit(ProofPhase::Verified(proof.clone()));
                Ok(VerificationReport {
                    verification_type: request.verification_type,
                    outcome: ProofOutcome::Succeeded(proof),
                })
            }
            Ok(_) => {
                warn!("Verification failed for {} proof", request.verification_type);
                pending.commit(ProofPhase::Unverified(request.verification_type));
                Ok(VerificationReport {
                    verification_type: request.verification_type,
                    outcome: ProofOutcome::Failed,
                })
            }
            Err(e) => {
                warn!("Verification failed: {}", e);
                pending.commit(ProofPhase::Unverified(request.verification_type));
                Err(e)
            }
        }
    }

    pub fn reset(&self) -> ZkuidResult<()> {
        let _token = self.in_flight.try_acquire()?;
        self.phase.send_replace(ProofPhase::Idle);
        Ok(())
    }
}

impl Default for ProofFlow {
    fn default() -> Self {
        Self::new()
    }
}
