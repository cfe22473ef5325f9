mod api;
mod app;
mod constants;
mod logging;
mod storage;
mod types;
mod wallet;

pub use api::ApiConfig;
pub use app::AppConfig;
pub use constants::*;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;
pub use types::LogLevel;
pub use wallet::WalletConfig;
