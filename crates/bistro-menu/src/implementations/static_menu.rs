//! Static menu catalog.
//!
//! Serves the house menu, or a replacement list of items taken from the
//! implementation's configuration table. Either way the catalog is fixed
//! for the lifetime of the process.

use crate::{MenuError, MenuFactory, MenuInterface, MenuRegistry};
use bistro_types::{
	ConfigSchema, Decimal, Field, FieldType, ImplementationRegistry, MenuItem, Schema,
	ValidationError,
};
use serde::Deserialize;
use std::collections::HashSet;

/// Configuration for the static catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticMenuConfig {
	/// Replacement catalog. The house menu is used when absent.
	#[serde(default)]
	pub items: Option<Vec<MenuItem>>,
}

/// The dishes served when no catalog is configured.
pub fn house_menu() -> Vec<MenuItem> {
	vec![
		MenuItem::new(1, "Idli", 40),
		MenuItem::new(2, "Dosa", 70),
		MenuItem::new(3, "Paneer Butter Masala", 160),
		MenuItem::new(4, "Veg Biryani", 140),
		MenuItem::new(5, "Butter Naan", 30),
	]
}

/// Configuration schema for the static catalog.
pub struct StaticMenuSchema;

impl ConfigSchema for StaticMenuSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let item = Schema::new(
			vec![
				Field::new(
					"id",
					FieldType::Integer {
						min: Some(0),
						max: Some(u32::MAX as i64),
					},
				),
				Field::new("name", FieldType::String).with_validator(|value| {
					match value.as_str() {
						Some(name) if name.trim().is_empty() => {
							Err("Menu item name cannot be empty".to_string())
						},
						_ => Ok(()),
					}
				}),
				Field::new("price", FieldType::Number { min: Some(0.0) }),
			],
			vec![],
		);

		let schema = Schema::new(
			vec![],
			vec![Field::new(
				"items",
				FieldType::Array(Box::new(FieldType::Table(item))),
			)],
		);

		schema.validate(config)
	}
}

/// Fixed, read-only catalog.
#[derive(Debug, Clone)]
pub struct StaticMenu {
	items: Vec<MenuItem>,
}

impl StaticMenu {
	/// Creates a catalog from a list of items.
	///
	/// Ids and names must be unique and prices must not be negative.
	pub fn new(items: Vec<MenuItem>) -> Result<Self, MenuError> {
		let mut ids = HashSet::new();
		let mut names = HashSet::new();

		for item in &items {
			if !ids.insert(item.id) {
				return Err(MenuError::InvalidMenu(format!(
					"Duplicate menu item id {}",
					item.id
				)));
			}
			if !names.insert(item.name.as_str()) {
				return Err(MenuError::InvalidMenu(format!(
					"Duplicate menu item name '{}'",
					item.name
				)));
			}
			if item.price < Decimal::ZERO {
				return Err(MenuError::InvalidMenu(format!(
					"Menu item '{}' has a negative price",
					item.name
				)));
			}
		}

		Ok(Self { items })
	}
}

impl Default for StaticMenu {
	fn default() -> Self {
		Self { items: house_menu() }
	}
}

impl MenuInterface for StaticMenu {
	fn items(&self) -> &[MenuItem] {
		&self.items
	}
}

/// Factory function to create the static catalog from configuration.
///
/// Configuration parameters:
/// - `items` (optional): array of `{ id, name, price }` tables
pub fn create_menu(config: &toml::Value) -> Result<Box<dyn MenuInterface>, MenuError> {
	StaticMenuSchema
		.validate(config)
		.map_err(|e| MenuError::Configuration(e.to_string()))?;

	let menu_config: StaticMenuConfig = config
		.clone()
		.try_into()
		.map_err(|e| MenuError::Configuration(format!("Invalid static menu config: {}", e)))?;

	let menu = match menu_config.items {
		Some(items) => StaticMenu::new(items)?,
		None => StaticMenu::default(),
	};

	tracing::debug!(items = menu.items.len(), "Loaded static menu");
	Ok(Box::new(menu))
}

/// Registry for the static catalog implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "static";
	type Factory = MenuFactory;

	fn factory() -> Self::Factory {
		create_menu
	}
}

impl MenuRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	fn table(src: &str) -> toml::Value {
		toml::from_str(src).unwrap()
	}

	#[test]
	fn test_house_menu_by_default() {
		let menu = create_menu(&table("")).unwrap();
		let names: Vec<_> = menu.items().iter().map(|i| i.name.as_str()).collect();
		assert_eq!(
			names,
			vec![
				"Idli",
				"Dosa",
				"Paneer Butter Masala",
				"Veg Biryani",
				"Butter Naan"
			]
		);
		assert_eq!(
			menu.find_by_name("Dosa").map(|i| i.price),
			Some(Decimal::from(70))
		);
	}

	#[test]
	fn test_configured_items_replace_house_menu() {
		let menu = create_menu(&table(
			r#"
items = [
	{ id = 10, name = "Masala Chai", price = 25 },
	{ id = 11, name = "Filter Coffee", price = 30.5 },
]
"#,
		))
		.unwrap();

		assert_eq!(menu.items().len(), 2);
		assert!(menu.find_by_name("Idli").is_none());
		assert_eq!(
			menu.find_by_name("Filter Coffee").map(|i| i.price),
			Some(Decimal::new(305, 1))
		);
	}

	#[test]
	fn test_duplicate_names_rejected() {
		let result = create_menu(&table(
			r#"
items = [
	{ id = 1, name = "Idli", price = 40 },
	{ id = 2, name = "Idli", price = 45 },
]
"#,
		));
		assert!(matches!(result, Err(MenuError::InvalidMenu(msg)) if msg.contains("Idli")));
	}

	#[test]
	fn test_duplicate_ids_rejected() {
		let result = StaticMenu::new(vec![MenuItem::new(1, "Idli", 40), MenuItem::new(1, "Dosa", 70)]);
		assert!(matches!(result, Err(MenuError::InvalidMenu(_))));
	}

	#[test]
	fn test_negative_price_rejected_by_schema() {
		let result = create_menu(&table(r#"items = [{ id = 1, name = "Idli", price = -40 }]"#));
		assert!(matches!(result, Err(MenuError::Configuration(_))));
	}

	#[test]
	fn test_blank_name_rejected_by_schema() {
		let result = create_menu(&table(r#"items = [{ id = 1, name = " ", price = 40 }]"#));
		assert!(matches!(result, Err(MenuError::Configuration(msg)) if msg.contains("name")));
	}
}
