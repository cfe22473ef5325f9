#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod format;
pub mod provider;
pub mod rpc;
pub mod session;

pub use format::format_short;
pub use provider::{DynWalletProvider, WalletProvider};
pub use rpc::JsonRpcWalletProvider;
pub use session::{WalletSession, WalletSessionManager};
