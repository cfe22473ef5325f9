use async_trait::async_trait;
use std::sync::Arc;
use zkuid_types::ZkuidResult;

pub type DynWalletProvider = Arc<dyn WalletProvider>;

/// The account-access surface of an injected wallet.
///
/// Both calls return account address strings with the active account first.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Asks the user to grant account access. May prompt and may wait on the
    /// user indefinitely. Implementations report a dismissed prompt as
    /// `ZkuidError::UserRejected` and anything else as `ZkuidError::Provider`.
    async fn request_accounts(&self) -> ZkuidResult<Vec<String>>;

    /// Lists accounts the user already authorized. Must never prompt.
    async fn authorized_accounts(&self) -> ZkuidResult<Vec<String>>;
}
