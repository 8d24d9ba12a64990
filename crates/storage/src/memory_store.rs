//! In-memory key-value storage using DashMap

use crate::traits::{KeyValueStore, StorageResult};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// In-memory key-value store
///
/// Clones share the same underlying map, so a "reloaded" form built from a
/// clone sees everything written through the original.
#[derive(Clone, Default)]
pub struct MemoryStore {
	entries: Arc<DashMap<String, String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[async_trait]
impl KeyValueStore for MemoryStore {
	async fn get(&self, key: &str) -> StorageResult<Option<String>> {
		Ok(self.entries.get(key).map(|entry| entry.value().clone()))
	}

	async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
		debug!("Storing {} bytes under '{}'", value.len(), key);
		self.entries.insert(key.to_string(), value.to_string());
		Ok(())
	}

	async fn remove(&self, key: &str) -> StorageResult<bool> {
		Ok(self.entries.remove(key).is_some())
	}

	async fn keys(&self) -> StorageResult<Vec<String>> {
		let mut keys: Vec<String> = self.entries.iter().map(|entry| entry.key().clone()).collect();
		keys.sort();
		Ok(keys)
	}
}
