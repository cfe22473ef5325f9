use super::commands::{ConfigAction, OutputFormat};
use super::utils::{hint, print_json, success};
use std::path::Path;
use zkuid_app::AppConfig;
use zkuid_types::{ZkuidError, ZkuidResult};

pub fn handle_config(
    config_path: &Path,
    config: &AppConfig,
    action: Option<ConfigAction>,
    format: OutputFormat,
) -> ZkuidResult<()> {
    match action {
        Some(ConfigAction::Show) | None => match format {
            OutputFormat::Json => print_json(config)?,
            OutputFormat::Text => {
                print!("{}", config);
                if !config_path.exists() {
                    hint(&format!("No configuration file found at {:?}", config_path));
                    println!("Run '\x1b[38;5;51mzkuid config init\x1b[0m' to create one");
                }
            }
        },
        Some(ConfigAction::Init { force }) => {
            if config_path.exists() && !force {
                return Err(ZkuidError::Config(format!(
                    "Configuration already exists at {:?} (use --force to overwrite)",
                    config_path
                )));
            }
            let mut fresh = AppConfig::default();
            fresh.storage.data_dir = config.storage.data_dir.clone();
            fresh.save(config_path)?;
            success(format, &format!("Configuration written to {:?}", config_path));
        }
    }
    Ok(())
}
