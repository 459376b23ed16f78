//! Order types for the bistro system.
//!
//! This module defines the order record kept by the order store, its
//! repriced line items and the kitchen status value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer order as accepted by intake.
///
/// Orders are created once and never removed. The only field that changes
/// after creation is `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Short identifier handed back to the customer.
	pub id: String,
	/// Name the customer gave at checkout.
	pub customer_name: Option<String>,
	/// Table the order should be served to.
	pub table_number: Option<String>,
	/// Contact number.
	pub phone: Option<String>,
	/// Line items repriced against the menu, in cart order.
	pub order_items: Vec<OrderLineItem>,
	/// Sum of price times quantity over all line items.
	pub subtotal: Decimal,
	/// Goods and services tax on the subtotal.
	pub gst: Decimal,
	/// Subtotal plus tax.
	pub total: Decimal,
	/// Kitchen status.
	pub status: OrderStatus,
	/// Local creation time, formatted like `07:45 PM`.
	pub timestamp: String,
}

/// A single repriced line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
	/// Menu item name.
	pub name: String,
	/// Number of portions, always positive.
	pub quantity: u32,
	/// Unit price copied from the menu when the order was placed.
	pub price: Decimal,
}

impl OrderLineItem {
	/// Price of the whole line, or `None` if it does not fit a [`Decimal`].
	pub fn line_total(&self) -> Option<Decimal> {
		self.price.checked_mul(Decimal::from(self.quantity))
	}
}

/// Kitchen status of an order.
///
/// The kitchen normally moves orders through `Pending -> Cooking -> Ready`,
/// but any other value sent by a client is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
	/// Order received, not started.
	#[default]
	Pending,
	/// Being prepared.
	Cooking,
	/// Ready to serve.
	Ready,
	/// Any unrecognised status string.
	Other(String),
}

impl OrderStatus {
	/// Returns the string stored for this status.
	pub fn as_str(&self) -> &str {
		match self {
			OrderStatus::Pending => "Pending",
			OrderStatus::Cooking => "Cooking",
			OrderStatus::Ready => "Ready",
			OrderStatus::Other(s) => s,
		}
	}

	/// Whether this is one of the statuses the kitchen workflow knows about.
	pub fn is_known(&self) -> bool {
		!matches!(self, OrderStatus::Other(_))
	}
}

impl From<String> for OrderStatus {
	fn from(s: String) -> Self {
		match s.as_str() {
			"Pending" => OrderStatus::Pending,
			"Cooking" => OrderStatus::Cooking,
			"Ready" => OrderStatus::Ready,
			_ => OrderStatus::Other(s),
		}
	}
}

impl From<&str> for OrderStatus {
	fn from(s: &str) -> Self {
		OrderStatus::from(s.to_string())
	}
}

impl From<OrderStatus> for String {
	fn from(status: OrderStatus) -> Self {
		match status {
			OrderStatus::Other(s) => s,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_serializes_as_plain_string() {
		let json = serde_json::to_string(&OrderStatus::Cooking).unwrap();
		assert_eq!(json, "\"Cooking\"");

		let parsed: OrderStatus = serde_json::from_str("\"Ready\"").unwrap();
		assert_eq!(parsed, OrderStatus::Ready);
	}

	#[test]
	fn test_unknown_status_is_kept_verbatim() {
		let parsed: OrderStatus = serde_json::from_str("\"Served to table\"").unwrap();
		assert_eq!(parsed, OrderStatus::Other("Served to table".to_string()));
		assert!(!parsed.is_known());
		assert_eq!(
			serde_json::to_string(&parsed).unwrap(),
			"\"Served to table\""
		);
	}

	#[test]
	fn test_status_matching_is_case_sensitive() {
		assert_eq!(
			OrderStatus::from("pending"),
			OrderStatus::Other("pending".to_string())
		);
	}

	#[test]
	fn test_line_total() {
		let line = OrderLineItem {
			name: "Dosa".to_string(),
			quantity: 2,
			price: Decimal::from(70),
		};
		assert_eq!(line.line_total(), Some(Decimal::from(140)));
	}

	#[test]
	fn test_line_total_overflow() {
		let line = OrderLineItem {
			name: "Gold".to_string(),
			quantity: u32::MAX,
			price: Decimal::MAX,
		};
		assert_eq!(line.line_total(), None);
	}
}
