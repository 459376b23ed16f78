//! Menu catalog module for the bistro ordering system.
//!
//! The catalog is the only source of prices: intake reprices every cart line
//! against it. Catalogs are pluggable implementations selected by
//! configuration, following the same trait-based pattern as storage.

use bistro_types::{ImplementationRegistry, MenuItem};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod static_menu;
}

/// Errors that can occur while building a menu catalog.
#[derive(Debug, Error)]
pub enum MenuError {
	/// Error that occurs when configuration is invalid.
	#[error("Configuration error: {0}")]
	Configuration(String),
	/// Error that occurs when a catalog breaks a uniqueness or range rule.
	#[error("Invalid menu: {0}")]
	InvalidMenu(String),
}

/// Trait defining the interface for menu catalogs.
///
/// A catalog is fixed once created. Lookups never fail, an unknown name
/// simply has no match.
pub trait MenuInterface: Send + Sync {
	/// All items in display order.
	fn items(&self) -> &[MenuItem];

	/// Finds the first item whose name matches exactly.
	fn find_by_name(&self, name: &str) -> Option<&MenuItem> {
		self.items().iter().find(|item| item.name == name)
	}
}

/// Type alias for menu factory functions.
pub type MenuFactory = fn(&toml::Value) -> Result<Box<dyn MenuInterface>, MenuError>;

/// Registry trait for menu implementations.
pub trait MenuRegistry: ImplementationRegistry<Factory = MenuFactory> {}

/// Get all registered menu implementations.
pub fn get_all_implementations() -> Vec<(&'static str, MenuFactory)> {
	use implementations::static_menu;

	vec![(static_menu::Registry::NAME, static_menu::Registry::factory())]
}

/// Service that exposes the primary catalog to the rest of the system.
///
/// Several catalogs may be configured, but only the primary one is ever
/// shown or used for pricing.
pub struct MenuService {
	/// Name of the implementation used for display and pricing.
	primary_implementation: String,
	/// The primary implementation itself.
	primary: Arc<dyn MenuInterface>,
}

impl std::fmt::Debug for MenuService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MenuService")
			.field("primary_implementation", &self.primary_implementation)
			.field("items", &self.items().len())
			.finish()
	}
}

impl MenuService {
	/// Creates a new MenuService serving the primary of the given catalogs.
	pub fn new(
		mut implementations: HashMap<String, Arc<dyn MenuInterface>>,
		primary_implementation: String,
	) -> Result<Self, MenuError> {
		let primary = implementations
			.remove(&primary_implementation)
			.ok_or_else(|| {
				MenuError::Configuration(format!(
					"Primary implementation '{}' not found in available implementations",
					primary_implementation
				))
			})?;

		for name in implementations.keys() {
			tracing::debug!(catalog = %name, "Catalog loaded but not primary, ignoring");
		}

		Ok(Self {
			primary_implementation,
			primary,
		})
	}

	/// Creates a service backed by a single catalog.
	pub fn single(name: impl Into<String>, implementation: Box<dyn MenuInterface>) -> Self {
		Self {
			primary_implementation: name.into(),
			primary: Arc::from(implementation),
		}
	}

	/// All items of the primary catalog in display order.
	pub fn items(&self) -> &[MenuItem] {
		self.primary.items()
	}

	/// Finds a menu item by exact name.
	pub fn find_by_name(&self, name: &str) -> Option<&MenuItem> {
		self.primary.find_by_name(name)
	}
}
