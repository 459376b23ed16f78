//! Read-only views: the customer menu and the kitchen board.

use bistro_core::BistroEngine;
use bistro_types::{APIError, KitchenResponse, MenuResponse};

/// Handles GET /.
pub fn menu(engine: &BistroEngine) -> MenuResponse {
	MenuResponse {
		items: engine.menu().items().to_vec(),
	}
}

/// Handles GET /kitchen.
pub async fn kitchen(engine: &BistroEngine) -> Result<KitchenResponse, APIError> {
	let orders = engine.order_store().list().await.map_err(|e| {
		tracing::warn!(error = %e, "Failed to list orders");
		APIError::InternalServerError {
			message: "Failed to load orders".to_string(),
		}
	})?;

	Ok(KitchenResponse { orders })
}
