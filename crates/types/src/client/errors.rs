//! Error types for chain client operations

use alloy_primitives::TxHash;
use thiserror::Error;

/// EIP-1193 provider error code for a request the user declined
pub const USER_REJECTED_CODE: i64 = 4001;

/// Chain client operation errors
#[derive(Error, Debug)]
pub enum ChainClientError {
	#[error("User rejected the request: {message}")]
	UserRejected { message: String },

	#[error("RPC error {code}: {message}")]
	Rpc { code: i64, message: String },

	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Timed out after {timeout_ms}ms waiting for transaction {hash}")]
	ReceiptTimeout { hash: TxHash, timeout_ms: u64 },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Failed to decode {function}: {reason}")]
	Decode { function: String, reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },
}

impl ChainClientError {
	/// Build the error for a JSON-RPC error object, recognising wallet rejections
	pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
		let message = message.into();
		if code == USER_REJECTED_CODE {
			Self::UserRejected { message }
		} else {
			Self::Rpc { code, message }
		}
	}

	/// Whether the wallet declined the request
	pub fn is_user_rejection(&self) -> bool {
		matches!(self, Self::UserRejected { .. })
	}

	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			Self::HttpStatusError { status_code, .. } => Some(*status_code),
			Self::HttpError(reqwest_error) => reqwest_error.status().map(|status| status.as_u16()),
			_ => None,
		}
	}
}
