//! Storage-related types for the bistro system.

/// Storage keys for different data collections.
///
/// This enum provides type safety for storage operations by replacing
/// string literals with strongly typed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Key for storing order records by id
	Orders,
}

impl StorageKey {
	/// Returns the namespace this key stores under.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Orders => "orders",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_orders_namespace() {
		assert_eq!(StorageKey::Orders.as_str(), "orders");
	}
}
