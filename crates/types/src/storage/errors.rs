//! Error types for storage operations

use thiserror::Error;

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
	#[error("Storage I/O error: {message}")]
	Io { message: String },
	#[error("Serialization error: {message}")]
	Serialization { message: String },
	#[error("Storage operation failed: {message}")]
	Operation { message: String },
}

impl From<std::io::Error> for StorageError {
	fn from(error: std::io::Error) -> Self {
		Self::Io {
			message: error.to_string(),
		}
	}
}

impl From<serde_json::Error> for StorageError {
	fn from(error: serde_json::Error) -> Self {
		Self::Serialization {
			message: error.to_string(),
		}
	}
}
