use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Common CLI arguments shared by every hotel-sgs command
#[derive(Parser, Debug, Clone, Default)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Enable quiet mode (minimal output)")]
    pub quiet: bool,
}

impl CommonArgs {
    /// Default log filter implied by the flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Subcommands that only look at the resolved configuration
#[derive(Subcommand, Debug, Clone)]
pub enum CommonCommands {
    /// Show current configuration and exit
    Config {
        #[arg(long, help = "Show configuration in JSON format")]
        json: bool,
    },
    /// Validate configuration and exit
    Validate,
    /// Show version information and exit
    Version,
}

/// Utility functions for CLI operations
pub mod utils {
    use super::*;
    use crate::config::Configuration;
    use anyhow::{Context, Result};
    use std::fs::OpenOptions;
    use std::path::Path;
    use std::sync::Mutex;
    use tracing_subscriber::EnvFilter;

    fn filter(args: &CommonArgs) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()))
    }

    /// Initialize logging to stderr based on CLI arguments.
    ///
    /// `RUST_LOG` wins over the flags when set.
    pub fn init_logging(args: &CommonArgs) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter(args))
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Initialize logging into a file, for when the terminal is taken over by the console
    pub fn init_file_logging(args: &CommonArgs, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        let level = if args.verbose || args.quiet {
            args.log_level()
        } else {
            "info"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
        Ok(())
    }

    /// Load configuration with optional override from CLI
    pub fn load_config(config_path: Option<&PathBuf>) -> Result<Configuration> {
        match config_path {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                Configuration::load_from_path(path).context("Failed to load configuration")
            }
            None => Configuration::load().context("Failed to load configuration"),
        }
    }

    /// Display configuration in human-readable or JSON format
    pub fn display_config(config: &Configuration, json: bool) -> Result<()> {
        if json {
            let json = serde_json::to_string_pretty(config)
                .context("Failed to serialize configuration to JSON")?;
            println!("{json}");
        } else {
            println!("Hotel SGS Configuration:");
            println!("========================");
            println!("API base URL: {}", config.api.base_url);
            println!("API timeout: {:?}", config.api.timeout);
            println!("Session file: {}", config.session.session_file.display());
            println!("Console refresh rate: {:?}", config.console.refresh_rate);
            println!("Console log file: {}", config.console.log_file.display());
        }
        Ok(())
    }

    /// Validate configuration and report any issues
    pub fn validate_config(config: &Configuration) -> Result<()> {
        tracing::debug!("Validating configuration...");

        let url = url::Url::parse(&config.api.base_url)
            .with_context(|| format!("Invalid API base URL '{}'", config.api.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("API base URL must use http or https, got '{}'", url.scheme());
        }

        if config.api.timeout.is_zero() {
            anyhow::bail!("API timeout must be greater than zero");
        }

        if config.console.refresh_rate.is_zero() {
            anyhow::bail!("Console refresh rate must be greater than zero");
        }

        if config.session.session_file.as_os_str().is_empty() {
            anyhow::bail!("Session file path cannot be empty");
        }

        Ok(())
    }

    /// Run one of the configuration-only commands
    pub fn handle_common_command(command: &CommonCommands, config: &Configuration) -> Result<()> {
        match command {
            CommonCommands::Config { json } => display_config(config, *json),
            CommonCommands::Validate => {
                validate_config(config)?;
                println!("Configuration is valid.");
                Ok(())
            }
            CommonCommands::Version => {
                println!("{}", version_info());
                Ok(())
            }
        }
    }

    /// Standard version information
    pub fn version_info() -> String {
        format!(
            "{} {} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_RUST_VERSION")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use std::time::Duration;

    #[test]
    fn test_log_level_follows_flags() {
        let mut args = CommonArgs::default();
        assert_eq!(args.log_level(), "warn");
        args.verbose = true;
        assert_eq!(args.log_level(), "debug");
        args.quiet = true;
        assert_eq!(args.log_level(), "error");
    }

    #[test]
    fn test_default_config_is_valid() {
        utils::validate_config(&Configuration::default()).unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_url_and_zero_timeout() {
        let mut config = Configuration::default();
        config.api.base_url = "ftp://hotel/api".into();
        assert!(utils::validate_config(&config).is_err());

        config.api.base_url = "not a url".into();
        assert!(utils::validate_config(&config).is_err());

        let mut config = Configuration::default();
        config.api.timeout = Duration::ZERO;
        assert!(utils::validate_config(&config).is_err());
    }

    #[test]
    fn test_version_info() {
        let version = utils::version_info();
        assert!(version.contains(env!("CARGO_PKG_VERSION")));
    }
}
