use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZkuidError {
    #[error("No wallet provider found. Please install a wallet extension")]
    ProviderUnavailable,

    #[error("Wallet request rejected: {0}")]
    UserRejected(String),

    #[error("Wallet provider error: {0}")]
    Provider(String),

    #[error("Please connect your wallet first")]
    WalletNotConnected,

    #[error("Please enter a UID")]
    MissingUid,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("{0} already in progress")]
    ActionInProgress(&'static str),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ZkuidError {
    /// True for failures reported by, or on the way to, the remote identity service.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ZkuidError::Network(_) | ZkuidError::Validation(_) | ZkuidError::Server { .. }
        )
    }

    /// True when resubmitting the same action may succeed without the user
    /// changing anything (transient transport or backend trouble).
    pub fn is_retryable_by_user(&self) -> bool {
        match self {
            ZkuidError::Network(_) | ZkuidError::ActionInProgress(_) => true,
            ZkuidError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ZkuidError {
    fn from(e: serde_json::Error) -> Self {
        ZkuidError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for ZkuidError {
    fn from(e: std::io::Error) -> Self {
        ZkuidError::Io(e.to_string())
    }
}

pub type ZkuidResult<T> = Result<T, ZkuidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_classification() {
        assert!(ZkuidError::Network("timeout".into()).is_remote());
        assert!(ZkuidError::Validation("bad email".into()).is_remote());
        assert!(ZkuidError::Server { status: 502, message: "bad gateway".into() }.is_remote());
        assert!(!ZkuidError::MissingUid.is_remote());
        assert!(!ZkuidError::ProviderUnavailable.is_remote());
    }

    #[test]
    fn test_retryable() {
        assert!(ZkuidError::Network("reset".into()).is_retryable_by_user());
        assert!(ZkuidError::Server { status: 503, message: String::new() }.is_retryable_by_user());
        assert!(!ZkuidError::Server { status: 418, message: String::new() }.is_retryable_by_user());
        assert!(!ZkuidError::Validation("age".into()).is_retryable_by_user());
    }

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(ZkuidError::MissingUid.to_string(), "Please enter a UID");
        assert_eq!(
            ZkuidError::ActionInProgress("Proof generation").to_string(),
            "Proof generation already in progress"
        );
    }
}
