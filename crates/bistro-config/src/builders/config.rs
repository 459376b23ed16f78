//! Configuration builder for tests and local development.
//!
//! Produces a valid [`Config`] backed by the in-memory store and the house
//! menu without touching the filesystem.

use crate::{ApiConfig, Config, MenuConfig, RestaurantConfig, StorageConfig};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Builder for creating `Config` instances with a fluent API.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
	gst_rate: Decimal,
	storage_primary: String,
	menu_primary: String,
	menu_config: toml::Value,
	api: Option<ApiConfig>,
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigBuilder {
	/// Creates a new `ConfigBuilder` with default values suitable for testing.
	pub fn new() -> Self {
		Self {
			gst_rate: Decimal::new(5, 2),
			storage_primary: "memory".to_string(),
			menu_primary: "static".to_string(),
			menu_config: toml::Value::Table(toml::Table::new()),
			api: None,
		}
	}

	/// Sets the GST rate.
	pub fn gst_rate(mut self, rate: Decimal) -> Self {
		self.gst_rate = rate;
		self
	}

	/// Sets the primary storage implementation.
	pub fn storage_primary(mut self, primary: impl Into<String>) -> Self {
		self.storage_primary = primary.into();
		self
	}

	/// Sets the primary menu implementation.
	pub fn menu_primary(mut self, primary: impl Into<String>) -> Self {
		self.menu_primary = primary.into();
		self
	}

	/// Sets the table passed to the primary menu implementation.
	pub fn menu_config(mut self, config: toml::Value) -> Self {
		self.menu_config = config;
		self
	}

	/// Sets the API configuration.
	pub fn api(mut self, api: Option<ApiConfig>) -> Self {
		self.api = api;
		self
	}

	/// Builds the `Config` with the configured values.
	pub fn build(self) -> Config {
		let mut storage_implementations = HashMap::new();
		storage_implementations.insert(
			self.storage_primary.clone(),
			toml::Value::Table(toml::Table::new()),
		);

		let mut menu_implementations = HashMap::new();
		menu_implementations.insert(self.menu_primary.clone(), self.menu_config);

		Config {
			restaurant: RestaurantConfig {
				name: "Test Bistro".to_string(),
				gst_rate: self.gst_rate,
			},
			storage: StorageConfig {
				primary: self.storage_primary,
				implementations: storage_implementations,
			},
			menu: MenuConfig {
				primary: self.menu_primary,
				implementations: menu_implementations,
			},
			api: self.api,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_built_config_validates() {
		let config = ConfigBuilder::new()
			.gst_rate(Decimal::new(18, 2))
			.api(Some(ApiConfig::default()))
			.build();

		assert!(config.validate().is_ok());
		assert_eq!(config.restaurant.gst_rate, Decimal::new(18, 2));
		assert!(config.storage.implementations.contains_key("memory"));
		assert!(config.menu.implementations.contains_key("static"));
		assert_eq!(config.enabled_api().map(|api| api.port), Some(5001));
	}
}
