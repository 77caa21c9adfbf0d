//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use campushub_core::config::AppConfig;
use campushub_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Check that the configuration loads and summarize it
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.auth.jwt_secret = mask_secret(&shown.auth.jwt_secret);
            output::print_item(&shown, format);
        }
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv(
                "Store",
                &if config.store.persist {
                    config.store.data_file.clone()
                } else {
                    "in-memory".to_string()
                },
            );
            output::print_kv(
                "Password min length",
                &config.auth.password_min_length.to_string(),
            );
            output::print_kv("OAuth provider", &config.auth.oauth_provider_label);
            output::print_kv("Logging", &config.logging.format);
            if config.auth.jwt_secret == AppConfig::default().auth.jwt_secret {
                output::print_warning("auth.jwt_secret is still the default value");
            }
        }
    }
    Ok(())
}

/// Hide all but the first characters of a secret.
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
