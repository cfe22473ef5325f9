#![forbid(unsafe_code)]
#![warn(clippy::all)]

//! Shared data model for the zkUID client: addresses, identifiers,
//! registration and proof types, and the error taxonomy every crate uses.

pub mod address;
pub mod constants;
pub mod error;
pub mod identity;
pub mod proof;

pub use address::{Address, Identifier};
pub use constants::*;
pub use error::{ZkuidError, ZkuidResult};
pub use identity::{ContentAddress, RegistrationForm, RegistrationRequest, RegistrationResult, UserRecord};
pub use proof::{
    require_uid, ProofArtifactRef, ProofHistoryEntry, ProofOutcome, ProofRequest, TxHash, VerificationReceipt,
    VerificationType, VerifiedProof,
};
