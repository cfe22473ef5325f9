use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use zkuid_types::VerificationType;

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "zkuid")]
#[command(version = BUILD_VERSION)]
#[command(about = "zkUID - Register an identity once, prove facts about it without revealing it")]
#[command(long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(short, long, global = true, value_name = "FILE", help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(short = 'd', long, global = true, value_name = "DIR", env = "ZKUID_DATA_DIR", help = "Data directory path")]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(long, global = true, value_name = "FILE", help = "Write logs to file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text", help = "Output format")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Manage the wallet session")]
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },

    #[command(about = "Register an identity")]
    #[command(long_about = "Submit personal information to the identity service.\n\nRequires a connected wallet. On success the service returns a UID and the content address of the stored record.")]
    Register {
        #[arg(long, help = "Full name")]
        name: String,
        #[arg(long, help = "Email address")]
        email: String,
        #[arg(long, help = "Age in years")]
        age: String,
        #[arg(long, help = "Country of residence")]
        country: String,
        #[arg(long, value_name = "HANDLE", help = "Twitter handle")]
        twitter: Option<String>,
        #[arg(long, value_name = "URL", help = "LinkedIn profile")]
        linkedin: Option<String>,
    },

    #[command(about = "Generate and verify a zero-knowledge proof")]
    Prove {
        #[arg(long, help = "UID returned at registration")]
        uid: String,
        #[arg(long = "type", default_value = "age", help = "Verification type (age, email, full, kyc)")]
        verification_type: VerificationType,
        #[arg(long, help = "Stop after generating the proof")]
        no_verify: bool,
    },

    #[command(about = "Fetch the service's record for a UID")]
    User {
        uid: String,
    },

    #[command(about = "Show local proof history")]
    History,

    #[command(about = "Manage configuration")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum WalletAction {
    #[command(about = "Show the current session without prompting")]
    Status,
    #[command(about = "Request account access from the provider")]
    Connect,
    #[command(about = "Clear the local session")]
    Disconnect,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Show effective configuration")]
    Show,
    #[command(about = "Write a default configuration file")]
    Init {
        #[arg(short, long, help = "Overwrite existing configuration")]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_prove() {
        let cli = Cli::try_parse_from(["zkuid", "prove", "--uid", "0xabc", "--type", "email"]).unwrap();
        match cli.command {
            Commands::Prove { uid, verification_type, no_verify } => {
                assert_eq!(uid, "0xabc");
                assert_eq!(verification_type, VerificationType::Email);
                assert!(!no_verify);
            }
            _ => panic!("expected prove"),
        }
    }

    #[test]
    fn test_parse_prove_defaults_to_age() {
        let cli = Cli::try_parse_from(["zkuid", "prove", "--uid", "0xabc"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Prove { verification_type: VerificationType::Age, .. }
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["zkuid", "prove", "--uid", "0xabc", "--type", "dna"]).is_err());
    }

    #[test]
    fn test_parse_register() {
        let cli = Cli::try_parse_from([
            "zkuid", "--format", "json", "register",
            "--name", "Ada", "--email", "ada@x.com", "--age", "30", "--country", "UK",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Register { twitter: None, .. }));
    }
}
