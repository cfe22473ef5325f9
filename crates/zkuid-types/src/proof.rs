use crate::constants::TX_HASH_PREVIEW_CHARS;
use crate::error::{ZkuidError, ZkuidResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationType {
    #[default]
    Age,
    Email,
    Full,
    Kyc,
}

impl VerificationType {
    pub const ALL: [VerificationType; 4] = [
        VerificationType::Age,
        VerificationType::Email,
        VerificationType::Full,
        VerificationType::Kyc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationType::Age => "age",
            VerificationType::Email => "email",
            VerificationType::Full => "full",
            VerificationType::Kyc => "kyc",
        }
    }

    /// Label shown when choosing what to prove.
    pub fn selection_label(&self) -> &'static str {
        match self {
            VerificationType::Age => "Age Verification (18+)",
            VerificationType::Email => "Email Ownership",
            VerificationType::Full => "Full Identity",
            VerificationType::Kyc => "KYC Verification",
        }
    }

    /// Label shown on a successful verification.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            VerificationType::Age => "Age 18+",
            VerificationType::Email => "Email Verified",
            VerificationType::Full => "Full Identity",
            VerificationType::Kyc => "KYC Approved",
        }
    }
}

impl FromStr for VerificationType {
    type Err = ZkuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "age" => Ok(VerificationType::Age),
            "email" => Ok(VerificationType::Email),
            "full" => Ok(VerificationType::Full),
            "kyc" => Ok(VerificationType::Kyc),
            other => Err(ZkuidError::Validation(format!(
                "unknown verification type '{}', expected one of age, email, full, kyc",
                other
            ))),
        }
    }
}

impl fmt::Display for VerificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn short(&self) -> String {
        let preview: String = self.0.chars().take(TX_HASH_PREVIEW_CHARS).collect();
        format!("{}...", preview)
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRequest {
    pub uid: String,
    #[serde(rename = "type")]
    pub verification_type: VerificationType,
}

impl ProofRequest {
    pub fn new(uid: impl Into<String>, verification_type: VerificationType) -> Self {
        Self {
            uid: uid.into(),
            verification_type,
        }
    }

    pub fn require_uid(&self) -> ZkuidResult<&str> {
        require_uid(&self.uid)
    }
}

/// Returns the trimmed UID, or `MissingUid` if there is none.
pub fn require_uid(uid: &str) -> ZkuidResult<&str> {
    let uid = uid.trim();
    if uid.is_empty() {
        return Err(ZkuidError::MissingUid);
    }
    Ok(uid)
}

/// Handle to a generated proof artifact held by the identity service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofArtifactRef {
    #[serde(default)]
    pub proof_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReceipt {
    pub verified: bool,
    #[serde(default)]
    pub tx_hash: Option<TxHash>,
}

/// Result of a successful verification. It names what was proven and where
/// it was recorded; no profile data is ever carried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedProof {
    verification_type: VerificationType,
    tx_hash: Option<TxHash>,
    #[serde(skip_deserializing)]
    disclosed_fields: BTreeSet<String>,
}

impl VerifiedProof {
    pub fn new(verification_type: VerificationType, tx_hash: Option<TxHash>) -> Self {
        Self {
            verification_type,
            tx_hash,
            disclosed_fields: BTreeSet::new(),
        }
    }

    pub fn verification_type(&self) -> VerificationType {
        self.verification_type
    }

    pub fn tx_hash(&self) -> Option<&TxHash> {
        self.tx_hash.as_ref()
    }

    pub fn disclosed_fields(&self) -> &BTreeSet<String> {
        &self.disclosed_fields
    }

    pub fn label(&self) -> &'static str {
        self.verification_type.outcome_label()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProofOutcome {
    #[default]
    NotStarted,
    Pending,
    Succeeded(VerifiedProof),
    Failed,
}

impl ProofOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProofOutcome::Succeeded(_) | ProofOutcome::Failed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofHistoryEntry {
    pub id: String,
    pub date: chrono::NaiveDate,
    pub verification_type: VerificationType,
    pub verified: bool,
    #[serde(default)]
    pub tx_hash: Option<TxHash>,
}
