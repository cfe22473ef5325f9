mod cli;

use clap::Parser;
use cli::{
    failure, handle_config, handle_prove, handle_register, handle_wallet, init_logging,
    show_history, show_user, Cli, Commands,
};
use std::path::PathBuf;
use std::process::ExitCode;
use zkuid_app::{AppConfig, AppContext};
use zkuid_types::{RegistrationForm, ZkuidResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            failure(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ZkuidResult<()> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| {
        dirs::home_dir()
            .map(|h| h.join(zkuid_app::config::DEFAULT_DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(zkuid_app::config::DEFAULT_DATA_DIR_NAME))
    });

    let config_path = cli.config.clone().unwrap_or_else(|| data_dir.join("config.toml"));

    let mut config = AppConfig::load(&config_path)?;
    if cli.data_dir.is_some() {
        config.storage.data_dir = data_dir;
    }

    init_logging(&cli, &config.logging);

    let format = cli.format;

    if let Commands::Config { action } = cli.command {
        return handle_config(&config_path, &config, action, format);
    }

    let ctx = AppContext::from_config(config)?;

    match cli.command {
        Commands::Wallet { action } => handle_wallet(&ctx, action, format).await,
        Commands::Register { name, email, age, country, twitter, linkedin } => {
            let form = RegistrationForm {
                name,
                email,
                age,
                country,
                twitter: twitter.unwrap_or_default(),
                linkedin: linkedin.unwrap_or_default(),
            };
            handle_register(&ctx, form, format).await
        }
        Commands::Prove { uid, verification_type, no_verify } => {
            handle_prove(&ctx, uid, verification_type, !no_verify, format).await
        }
        Commands::User { uid } => show_user(&ctx, &uid, format).await,
        Commands::History => show_history(&ctx, format).await,
        Commands::Config { .. } => Ok(()),
    }
}
