//! Storage traits for pluggable storage implementations

// Re-export the storage traits from types crate
pub use tsender_types::storage::{keys, KeyValueStore, StorageError, StorageResult};
