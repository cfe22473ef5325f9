mod commands;
mod config_cmd;
mod history;
mod proof;
mod register;
mod user;
mod utils;
mod wallet;

pub use commands::{Cli, Commands};
pub use config_cmd::handle_config;
pub use history::show_history;
pub use proof::handle_prove;
pub use register::handle_register;
pub use user::show_user;
pub use utils::{failure, init_logging};
pub use wallet::handle_wallet;
