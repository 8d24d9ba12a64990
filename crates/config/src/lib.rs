//! TSender Configuration
//!
//! Configuration management and startup utilities for the TSender airdrop client.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	ChainSettings, ClientSettings, ConfigValidationError, LogFormat, LoggingSettings, Settings,
	StorageBackend, StorageSettings,
};
pub use startup_logger::{log_service_info, log_startup_complete};
