//! JSON file backed key-value storage
//!
//! The whole map is kept in memory and rewritten on every change. Writes go
//! to a sibling temp file first and are then renamed over the target.

use crate::traits::{KeyValueStore, StorageResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Key-value store persisted as a single JSON object on disk
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
	/// Open the store at `path`, starting empty if the file does not exist
	pub async fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
		let path = path.as_ref().to_path_buf();

		let entries = match tokio::fs::read(&path).await {
			Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
			Ok(bytes) => serde_json::from_slice(&bytes)?,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
			Err(e) => return Err(e.into()),
		};

		info!(
			"Opened file store at {} with {} entries",
			path.display(),
			entries.len()
		);

		Ok(Self {
			path,
			entries: Mutex::new(entries),
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	async fn flush(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
		if let Some(parent) = self.path.parent() {
			if !parent.as_os_str().is_empty() {
				tokio::fs::create_dir_all(parent).await?;
			}
		}

		let bytes = serde_json::to_vec_pretty(entries)?;
		let tmp = self.path.with_extension("json.tmp");
		tokio::fs::write(&tmp, bytes).await?;
		tokio::fs::rename(&tmp, &self.path).await?;

		debug!("Flushed {} entries to {}", entries.len(), self.path.display());
		Ok(())
	}
}

#[async_trait]
impl KeyValueStore for FileStore {
	async fn get(&self, key: &str) -> StorageResult<Option<String>> {
		Ok(self.entries.lock().await.get(key).cloned())
	}

	async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
		let mut entries = self.entries.lock().await;
		entries.insert(key.to_string(), value.to_string());
		self.flush(&entries).await
	}

	async fn remove(&self, key: &str) -> StorageResult<bool> {
		let mut entries = self.entries.lock().await;
		if entries.remove(key).is_none() {
			return Ok(false);
		}
		self.flush(&entries).await?;
		Ok(true)
	}

	async fn keys(&self) -> StorageResult<Vec<String>> {
		Ok(self.entries.lock().await.keys().cloned().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::traits::StorageError;

	#[tokio::test]
	async fn test_values_survive_reopen() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("form.json");

		let store = FileStore::open(&path).await.unwrap();
		store.set("tsender_recipients", "0xabc,\n0xdef").await.unwrap();
		store.set("tsender_amounts", "1,2").await.unwrap();
		assert!(store.remove("tsender_amounts").await.unwrap());
		drop(store);

		let reopened = FileStore::open(&path).await.unwrap();
		assert_eq!(
			reopened.get("tsender_recipients").await.unwrap().as_deref(),
			Some("0xabc,\n0xdef")
		);
		assert_eq!(reopened.get("tsender_amounts").await.unwrap(), None);
		assert_eq!(reopened.keys().await.unwrap(), vec!["tsender_recipients"]);
	}

	#[tokio::test]
	async fn test_missing_file_starts_empty() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::open(dir.path().join("absent.json")).await.unwrap();
		assert!(store.keys().await.unwrap().is_empty());
		assert!(!store.remove("anything").await.unwrap());
	}

	#[tokio::test]
	async fn test_corrupt_file_is_reported() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("form.json");
		tokio::fs::write(&path, b"not json").await.unwrap();

		let result = FileStore::open(&path).await;
		assert!(matches!(result, Err(StorageError::Serialization { .. })));
	}
}
