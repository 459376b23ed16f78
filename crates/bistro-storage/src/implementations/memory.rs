//! In-memory storage backend.
//!
//! Orders live for the lifetime of the process and are lost on exit.

use crate::{StorageError, StorageFactory, StorageInterface, StorageRegistry};
use async_trait::async_trait;
use bistro_types::{ConfigSchema, Field, FieldType, ImplementationRegistry, Schema, ValidationError};
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Settings for the `memory` backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryStorageConfig {
	/// Number of records to reserve room for up front.
	#[serde(default)]
	pub initial_capacity: usize,
}

/// Process-local key/value store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: RwLock::new(HashMap::with_capacity(capacity)),
		}
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		self.entries
			.read()
			.await
			.get(key)
			.cloned()
			.ok_or(StorageError::NotFound)
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		self.entries.write().await.insert(key.to_owned(), value);
		Ok(())
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		Ok(self.entries.read().await.contains_key(key))
	}
}

/// Schema for the `memory` table: an optional non-negative capacity hint.
pub struct MemoryStorageSchema;

impl ConfigSchema for MemoryStorageSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::new(
			vec![],
			vec![Field::new(
				"initial_capacity",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			)],
		)
		.validate(config)
	}
}

/// Builds the memory backend from its `[storage.implementations.memory]` table.
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	MemoryStorageSchema
		.validate(config)
		.map_err(|e| StorageError::Configuration(e.to_string()))?;

	let settings: MemoryStorageConfig = config
		.clone()
		.try_into()
		.map_err(|e| StorageError::Configuration(format!("Invalid memory storage config: {}", e)))?;

	tracing::debug!(
		initial_capacity = settings.initial_capacity,
		"Created in-memory storage backend"
	);
	Ok(Box::new(MemoryStorage::with_capacity(
		settings.initial_capacity,
	)))
}

/// Registry entry for the `memory` backend.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "memory";
	type Factory = StorageFactory;

	fn factory() -> Self::Factory {
		create_storage
	}
}

impl StorageRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_set_get_and_overwrite() {
		let storage = MemoryStorage::new();
		let key = "orders:ab12cd34";

		assert!(matches!(
			storage.get_bytes(key).await,
			Err(StorageError::NotFound)
		));
		assert!(!storage.exists(key).await.unwrap());

		storage.set_bytes(key, b"Pending".to_vec()).await.unwrap();
		storage.set_bytes(key, b"Cooking".to_vec()).await.unwrap();

		assert!(storage.exists(key).await.unwrap());
		assert_eq!(storage.get_bytes(key).await.unwrap(), b"Cooking".to_vec());
	}

	#[test]
	fn test_factory_config() {
		let empty = toml::Value::Table(toml::Table::new());
		assert!(create_storage(&empty).is_ok());

		let sized: toml::Value = toml::from_str("initial_capacity = 256").unwrap();
		assert!(create_storage(&sized).is_ok());

		for bad in [
			toml::Value::String("memory".to_string()),
			toml::from_str("initial_capacity = -1").unwrap(),
		] {
			assert!(matches!(
				create_storage(&bad),
				Err(StorageError::Configuration(_))
			));
		}
	}
}
