//! Configuration settings structures

use crate::{configurable_value::ConfigurableValue, ConfigurableValueError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tsender_types::{parse_address, AddressError, ChainContracts, ChainRoutes, SecretString};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	/// Extra or overriding chain routes, keyed by a human-readable chain name
	pub chains: HashMap<String, ChainSettings>,
	pub client: ClientSettings,
	pub storage: StorageSettings,
	pub logging: LoggingSettings,
}

/// Route configuration for one chain
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainSettings {
	pub chain_id: u64,
	/// TSender contract address (`0x` + 40 hex characters)
	pub tsender: String,
	pub no_check: Option<String>,
	/// Disabled entries remove the chain from the table, built-in or not
	#[serde(default = "default_true")]
	pub enabled: bool,
}

fn default_true() -> bool {
	true
}

/// JSON-RPC chain client configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientSettings {
	/// Endpoint URL, usually `env:RPC_URL` since it may embed an API key
	pub rpc_url: ConfigurableValue,
	/// Timeout for a single HTTP round trip
	pub request_timeout_ms: u64,
	/// Delay between `eth_getTransactionReceipt` polls
	pub receipt_poll_interval_ms: u64,
	/// Give up waiting for a receipt after this long
	pub receipt_timeout_ms: u64,
}

impl Default for ClientSettings {
	fn default() -> Self {
		Self {
			rpc_url: ConfigurableValue::from_plain("http://127.0.0.1:8545"),
			request_timeout_ms: 10_000,
			receipt_poll_interval_ms: 1_000,
			receipt_timeout_ms: 120_000,
		}
	}
}

/// Where form inputs are persisted
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
	Memory,
	File,
}

/// Form persistence configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageSettings {
	pub backend: StorageBackend,
	/// JSON file used by the `file` backend
	pub path: String,
}

impl Default for StorageSettings {
	fn default() -> Self {
		Self {
			backend: StorageBackend::Memory,
			path: ".tsender/form.json".to_string(),
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Semantic configuration errors detected after deserialization
#[derive(Debug, Error)]
pub enum ConfigValidationError {
	#[error("Chain '{name}' has an invalid {field} address: {source}")]
	InvalidChainAddress {
		name: String,
		field: &'static str,
		#[source]
		source: AddressError,
	},

	#[error("Chain id {chain_id} is configured more than once")]
	DuplicateChain { chain_id: u64 },

	#[error("Client setting '{field}' must be greater than zero")]
	ZeroDuration { field: &'static str },

	#[error("Receipt poll interval ({poll_ms}ms) exceeds the receipt timeout ({timeout_ms}ms)")]
	PollExceedsTimeout { poll_ms: u64, timeout_ms: u64 },

	#[error("Storage path must not be empty for the file backend")]
	EmptyStoragePath,
}

impl Settings {
	/// Check addresses, chain ids and client timings
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		let mut seen = HashMap::new();
		for (name, chain) in &self.chains {
			chain.contracts(name)?;
			if seen.insert(chain.chain_id, name).is_some() {
				return Err(ConfigValidationError::DuplicateChain {
					chain_id: chain.chain_id,
				});
			}
		}

		let client = &self.client;
		for (field, value) in [
			("request_timeout_ms", client.request_timeout_ms),
			("receipt_poll_interval_ms", client.receipt_poll_interval_ms),
			("receipt_timeout_ms", client.receipt_timeout_ms),
		] {
			if value == 0 {
				return Err(ConfigValidationError::ZeroDuration { field });
			}
		}
		if client.receipt_poll_interval_ms > client.receipt_timeout_ms {
			return Err(ConfigValidationError::PollExceedsTimeout {
				poll_ms: client.receipt_poll_interval_ms,
				timeout_ms: client.receipt_timeout_ms,
			});
		}

		if self.storage.backend == StorageBackend::File && self.storage.path.trim().is_empty() {
			return Err(ConfigValidationError::EmptyStoragePath);
		}

		Ok(())
	}

	/// Built-in routes merged with the configured chains
	///
	/// Configured entries replace built-in ones for the same chain id;
	/// disabled entries remove the chain entirely.
	pub fn chain_routes(&self) -> Result<ChainRoutes, ConfigValidationError> {
		let mut routes = ChainRoutes::builtin();
		let mut disabled = Vec::new();

		for (name, chain) in &self.chains {
			if chain.enabled {
				routes = routes.with_route(chain.chain_id, chain.contracts(name)?);
			} else {
				disabled.push(chain.chain_id);
			}
		}

		if disabled.is_empty() {
			return Ok(routes);
		}

		Ok(routes
			.chain_ids()
			.into_iter()
			.filter(|chain_id| !disabled.contains(chain_id))
			.filter_map(|chain_id| routes.get(chain_id).map(|contracts| (chain_id, *contracts)))
			.collect())
	}

	/// Resolve the RPC endpoint for secure handling
	pub fn rpc_url(&self) -> Result<SecretString, ConfigurableValueError> {
		self.client.rpc_url.resolve_for_secret()
	}
}

impl ChainSettings {
	/// Parse the configured addresses into a route entry
	pub fn contracts(&self, name: &str) -> Result<ChainContracts, ConfigValidationError> {
		let tsender =
			parse_address(&self.tsender).map_err(|source| ConfigValidationError::InvalidChainAddress {
				name: name.to_string(),
				field: "tsender",
				source,
			})?;

		let mut contracts = ChainContracts::new(tsender);
		if let Some(no_check) = &self.no_check {
			let no_check =
				parse_address(no_check).map_err(|source| ConfigValidationError::InvalidChainAddress {
					name: name.to_string(),
					field: "no_check",
					source,
				})?;
			contracts = contracts.with_no_check(no_check);
		}

		Ok(contracts)
	}
}
