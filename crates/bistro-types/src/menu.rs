//! Menu catalog types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dish offered by the restaurant.
///
/// Menu items are defined when the process starts and never change
/// afterwards. The name doubles as the lookup key used when pricing carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
	/// Stable numeric identifier.
	pub id: u32,
	/// Display name, unique within a catalog.
	pub name: String,
	/// Unit price, never negative.
	pub price: Decimal,
}

impl MenuItem {
	/// Creates a menu item from a whole-rupee price.
	pub fn new(id: u32, name: impl Into<String>, price: i64) -> Self {
		Self {
			id,
			name: name.into(),
			price: Decimal::from(price),
		}
	}
}
