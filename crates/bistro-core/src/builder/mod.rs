//! Builder for constructing bistro engines.
//!
//! Composes a [`BistroEngine`] from the storage and menu implementations
//! named in configuration, using factory functions looked up by name.

use crate::engine::{event_bus::EventBus, BistroEngine};
use bistro_config::Config;
use bistro_menu::{MenuError, MenuInterface, MenuService};
use bistro_storage::{StorageError, StorageInterface, StorageService};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during engine construction.
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Missing required component: {0}")]
	MissingComponent(String),
}

/// Factory functions for every pluggable component, keyed by
/// implementation name.
pub struct BistroFactories<SF, MF> {
	pub storage_factories: HashMap<String, SF>,
	pub menu_factories: HashMap<String, MF>,
}

/// Builder for constructing a BistroEngine with pluggable implementations.
pub struct BistroBuilder {
	config: Config,
}

impl BistroBuilder {
	/// Creates a new BistroBuilder with the given configuration.
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Builds the engine, creating each configured implementation with its
	/// factory.
	pub fn build<SF, MF>(
		self,
		factories: BistroFactories<SF, MF>,
	) -> Result<BistroEngine, BuilderError>
	where
		SF: Fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>,
		MF: Fn(&toml::Value) -> Result<Box<dyn MenuInterface>, MenuError>,
	{
		let mut storage_impls = create_implementations(
			"storage",
			&self.config.storage.primary,
			&self.config.storage.implementations,
			&factories.storage_factories,
		)?;

		let primary_storage = &self.config.storage.primary;
		let storage_backend = storage_impls.remove(primary_storage).ok_or_else(|| {
			BuilderError::MissingComponent(format!(
				"Primary storage '{}' failed to load or has invalid configuration",
				primary_storage
			))
		})?;
		let storage = Arc::new(StorageService::new(storage_backend));

		let menu_impls: HashMap<String, Arc<dyn MenuInterface>> = create_implementations(
			"menu",
			&self.config.menu.primary,
			&self.config.menu.implementations,
			&factories.menu_factories,
		)?
		.into_iter()
		.map(|(name, implementation)| (name, Arc::from(implementation)))
		.collect();

		let menu = MenuService::new(menu_impls, self.config.menu.primary.clone())
			.map_err(|e| BuilderError::MissingComponent(e.to_string()))?;

		Ok(BistroEngine::new(
			self.config,
			storage,
			Arc::new(menu),
			EventBus::default(),
		))
	}
}

/// Runs the factory of every configured implementation that has one.
fn create_implementations<T, E, F>(
	component: &str,
	primary: &str,
	configs: &HashMap<String, toml::Value>,
	factories: &HashMap<String, F>,
) -> Result<HashMap<String, T>, BuilderError>
where
	E: std::fmt::Display,
	F: Fn(&toml::Value) -> Result<T, E>,
{
	let mut implementations = HashMap::new();

	for (name, config) in configs {
		let Some(factory) = factories.get(name) else {
			tracing::warn!(component, implementation = %name, "No factory registered, skipping");
			continue;
		};

		match factory(config) {
			Ok(implementation) => {
				let is_primary = primary == name;
				tracing::info!(component, implementation = %name, enabled = %is_primary, "Loaded");
				implementations.insert(name.clone(), implementation);
			},
			Err(e) => {
				tracing::error!(
					component,
					implementation = %name,
					error = %e,
					"Failed to create implementation"
				);
				return Err(BuilderError::Config(format!(
					"Failed to create {} implementation '{}': {}",
					component, name, e
				)));
			},
		}
	}

	if implementations.is_empty() {
		return Err(BuilderError::Config(format!(
			"No valid {} implementations available",
			component
		)));
	}

	Ok(implementations)
}
