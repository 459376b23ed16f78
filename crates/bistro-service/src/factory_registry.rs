//! Factory registry for pluggable implementations.
//!
//! Collects the factories every implementation crate registers and resolves
//! the implementation names found in configuration against them.

use bistro_config::Config;
use bistro_core::{BistroBuilder, BistroEngine, BistroFactories};
use bistro_menu::MenuFactory;
use bistro_storage::StorageFactory;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Registry of every known implementation factory
pub struct FactoryRegistry {
	pub storage: HashMap<String, StorageFactory>,
	pub menu: HashMap<String, MenuFactory>,
}

impl FactoryRegistry {
	/// Create a new empty registry
	pub fn new() -> Self {
		Self {
			storage: HashMap::new(),
			menu: HashMap::new(),
		}
	}

	/// Register a storage implementation
	pub fn register_storage(&mut self, name: impl Into<String>, factory: StorageFactory) {
		self.storage.insert(name.into(), factory);
	}

	/// Register a menu implementation
	pub fn register_menu(&mut self, name: impl Into<String>, factory: MenuFactory) {
		self.menu.insert(name.into(), factory);
	}
}

static REGISTRY: OnceLock<FactoryRegistry> = OnceLock::new();

/// Initialize the global registry with all available implementations
pub fn initialize_registry() -> &'static FactoryRegistry {
	REGISTRY.get_or_init(|| {
		let mut registry = FactoryRegistry::new();

		for (name, factory) in bistro_storage::get_all_implementations() {
			tracing::debug!("Registering storage implementation: {}", name);
			registry.register_storage(name, factory);
		}

		for (name, factory) in bistro_menu::get_all_implementations() {
			tracing::debug!("Registering menu implementation: {}", name);
			registry.register_menu(name, factory);
		}

		registry
	})
}

/// Get the global factory registry
pub fn get_registry() -> &'static FactoryRegistry {
	initialize_registry()
}

/// Picks the registered factory for every implementation named in config
macro_rules! build_factories {
	($registry:expr, $config_impls:expr, $registry_field:ident, $type_name:literal) => {{
		let mut factories = HashMap::new();
		for name in $config_impls.keys() {
			if let Some(factory) = $registry.$registry_field.get(name) {
				factories.insert(name.clone(), *factory);
			} else {
				let mut available: Vec<_> = $registry.$registry_field.keys().cloned().collect();
				available.sort();
				return Err(format!(
					"Unknown {} implementation '{}'. Available: [{}]",
					$type_name,
					name,
					available.join(", ")
				)
				.into());
			}
		}
		factories
	}};
}

/// Build the engine using the registry and config
pub fn build_engine_from_config(
	config: Config,
) -> Result<BistroEngine, Box<dyn std::error::Error>> {
	let registry = get_registry();

	let storage_factories =
		build_factories!(registry, config.storage.implementations, storage, "storage");
	let menu_factories = build_factories!(registry, config.menu.implementations, menu, "menu");

	let factories = BistroFactories {
		storage_factories,
		menu_factories,
	};

	Ok(BistroBuilder::new(config).build(factories)?)
}
