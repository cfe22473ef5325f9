#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod controller;
pub mod history;
pub mod remote;

pub use config::{ApiConfig, AppConfig, LogLevel, LoggingConfig, StorageConfig, WalletConfig};
pub use context::AppContext;
pub use controller::{
    IdentityActionController, InFlight, ProofFlow, ProofPhase, RegistrationFlow,
    RegistrationState, VerificationReport,
};
pub use history::{HistoryStats, ProofHistory};
pub use remote::{DynRemoteIdentityClient, HttpIdentityClient, RemoteIdentityClient};
