//! Startup and shutdown for the bistro engine.

use super::{BistroEngine, EngineError};

impl BistroEngine {
	/// Performs any initialization required before running
	pub async fn initialize(&self) -> Result<(), EngineError> {
		tracing::info!(
			restaurant = %self.config.restaurant.name,
			menu_items = self.menu.items().len(),
			gst_rate = %self.config.restaurant.gst_rate,
			"Initializing bistro engine"
		);

		if self.menu.items().is_empty() {
			return Err(EngineError::Config(
				"Menu has no items, nothing can be ordered".into(),
			));
		}
		Ok(())
	}

	/// Performs cleanup operations
	pub async fn shutdown(&self) -> Result<(), EngineError> {
		let orders = self.order_store.len().await;

		// Memory storage goes away with the process
		tracing::info!(orders, "Shutting down bistro engine, orders are not kept");
		Ok(())
	}
}
