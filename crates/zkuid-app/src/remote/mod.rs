mod http;

pub use http::HttpIdentityClient;

use async_trait::async_trait;
use std::sync::Arc;
use zkuid_types::{
    ProofArtifactRef, RegistrationRequest, RegistrationResult, UserRecord, VerificationReceipt,
    VerificationType, ZkuidResult,
};

pub type DynRemoteIdentityClient = Arc<dyn RemoteIdentityClient>;

/// The identity service that stores encrypted profiles and produces and
/// checks proofs. Every call is a single request/response; failures are
/// `Network`, `Validation` or `Server` errors and are never retried here.
#[async_trait]
pub trait RemoteIdentityClient: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> ZkuidResult<RegistrationResult>;

    async fn generate_proof(
        &self,
        uid: &str,
        verification_type: VerificationType,
    ) -> ZkuidResult<ProofArtifactRef>;

    async fn verify_proof(
        &self,
        uid: &str,
        verification_type: VerificationType,
    ) -> ZkuidResult<VerificationReceipt>;

    async fn get_user_data(&self, uid: &str) -> ZkuidResult<UserRecord>;
}
