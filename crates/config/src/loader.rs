//! Configuration loading utilities

use crate::{ConfigValidationError, Settings};
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Default config file stem, resolved relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config";

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("Failed to read configuration: {0}")]
	Source(#[from] ConfigError),
	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from `$CONFIG_PATH` or `config/config`
///
/// The file is optional; missing sections fall back to `Settings::default()`.
/// `TSENDER__SECTION__KEY` environment variables override file values.
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
	load_config_from(&path)
}

/// Load and validate configuration from the given file stem
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(Environment::with_prefix("TSENDER").separator("__"))
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}
