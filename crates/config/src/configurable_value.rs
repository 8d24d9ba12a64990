//! Configuration values that are either given inline or read from the environment

use serde::{Deserialize, Serialize};
use std::fmt;
use tsender_types::SecretString;

/// A value given inline or looked up from an environment variable at startup
///
/// Both the tagged form and the `env:` shorthand are accepted, so the value can
/// also be overridden through a single environment variable:
///
/// ```toml
/// [client]
/// rpc_url = { type = "env", value = "RPC_URL" }
/// # or
/// rpc_url = "env:RPC_URL"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(from = "RawConfigurableValue")]
pub struct ConfigurableValue {
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Either the environment variable name or the literal value
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve the actual value based on the type
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve straight into a `SecretString` so the raw value never hits a log line
	pub fn resolve_for_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		self.resolve().map(SecretString::from)
	}

	/// Where the value comes from, safe to log
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain => "configured plain value".to_string(),
		}
	}
}

/// Accepted input shapes for [`ConfigurableValue`]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfigurableValue {
	Shorthand(String),
	Tagged {
		#[serde(rename = "type")]
		value_type: ValueType,
		value: String,
	},
}

impl From<RawConfigurableValue> for ConfigurableValue {
	fn from(raw: RawConfigurableValue) -> Self {
		match raw {
			RawConfigurableValue::Shorthand(value) => ConfigurableValue::from(value),
			RawConfigurableValue::Tagged { value_type, value } => Self { value_type, value },
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
}

impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// `env:NAME` strings become environment references, anything else is plain
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		match value.strip_prefix("env:") {
			Some(env_var) => Self::from_env(env_var),
			None => Self::from_plain(value),
		}
	}
}

impl From<String> for ConfigurableValue {
	fn from(value: String) -> Self {
		ConfigurableValue::from(value.as_str())
	}
}
