//! Storage traits for pluggable key-value backends

use super::StorageResult;
use async_trait::async_trait;

/// String key-value store, the local persistence available to the form
///
/// Writes are not transactional: a crash between two `set` calls may leave a
/// mix of old and new values behind.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
	/// Get the value stored under `key`
	async fn get(&self, key: &str) -> StorageResult<Option<String>>;

	/// Store `value` under `key`, replacing any previous value
	async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

	/// Remove `key`, returning whether it was present
	async fn remove(&self, key: &str) -> StorageResult<bool>;

	/// All keys currently stored
	async fn keys(&self) -> StorageResult<Vec<String>>;
}
