use super::commands::{Cli, OutputFormat};
use serde::Serialize;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zkuid_app::LoggingConfig;
use zkuid_types::{ZkuidError, ZkuidResult};

pub fn init_logging(cli: &Cli, logging: &LoggingConfig) {
    let level = if cli.quiet {
        "warn".to_string()
    } else {
        match cli.verbose {
            0 => logging.level.as_filter().to_string(),
            1 => "info,zkuid_app=debug,zkuid_wallet=debug".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = cli.log_file.clone().or_else(|| logging.file.clone());
    let (writer, ansi) = match log_file {
        Some(ref path) => match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => (BoxMakeWriter::new(std::sync::Mutex::new(file)), false),
            Err(e) => {
                eprintln!("Failed to open log file {:?}: {}", path, e);
                (BoxMakeWriter::new(std::io::stderr), true)
            }
        },
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if logging.json {
        subscriber.with(fmt::layer().json().with_writer(writer)).init();
    } else {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(cli.verbose >= 2);
        subscriber.with(layer).init();
    }
}

pub fn print_json<T: Serialize>(value: &T) -> ZkuidResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| ZkuidError::Serialization(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}

pub fn success(format: OutputFormat, message: &str) {
    if matches!(format, OutputFormat::Text) {
        println!("\x1b[38;5;46m[+]\x1b[0m {}", message);
    }
}

pub fn failure(message: &str) {
    eprintln!("\x1b[38;5;196m[-]\x1b[0m {}", message);
}

pub fn hint(message: &str) {
    println!("\x1b[38;5;245m{}\x1b[0m", message);
}
