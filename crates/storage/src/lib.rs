//! TSender Storage
//!
//! Key-value store implementations backing form persistence.
//! Supports an in-memory backend and a JSON file backend.

pub mod file_store;
pub mod memory_store;
pub mod traits;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::{keys, KeyValueStore, StorageError, StorageResult};
