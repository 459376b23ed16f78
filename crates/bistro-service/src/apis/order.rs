//! Order endpoints.
//!
//! Placing an order, moving it through the kitchen and looking one up by id.
//! Domain errors are mapped onto [`APIError`] here so the handlers in the
//! core crate stay free of HTTP concerns.

use bistro_core::handlers::status::ORDER_NOT_FOUND;
use bistro_core::{BistroEngine, IntakeError, OrderStoreError, StatusError};
use bistro_types::{
	APIError, Order, PlaceOrderRequest, PlaceOrderResponse, UpdateStatusRequest,
	UpdateStatusResponse,
};
use tracing::warn;

/// Handles POST /api/place-order.
pub async fn place_order(
	request: PlaceOrderRequest,
	engine: &BistroEngine,
) -> Result<PlaceOrderResponse, APIError> {
	let order = engine
		.intake()
		.place_order(request)
		.await
		.map_err(intake_error)?;

	Ok(PlaceOrderResponse::new(order.id))
}

/// Handles POST /api/update-status.
pub async fn update_status(
	request: UpdateStatusRequest,
	engine: &BistroEngine,
) -> Result<UpdateStatusResponse, APIError> {
	engine
		.status()
		.update_status(request)
		.await
		.map_err(status_error)?;

	Ok(UpdateStatusResponse::ok())
}

/// Handles GET /api/orders/{id}.
pub async fn get_order_by_id(id: &str, engine: &BistroEngine) -> Result<Order, APIError> {
	engine.order_store().get(id).await.map_err(|e| match e {
		OrderStoreError::NotFound(_) => APIError::NotFound {
			message: ORDER_NOT_FOUND.to_string(),
		},
		other => {
			warn!(order_id = %id, error = %other, "Order lookup failed");
			APIError::InternalServerError {
				message: "Failed to load order".to_string(),
			}
		},
	})
}

fn intake_error(e: IntakeError) -> APIError {
	match e {
		IntakeError::InvalidInput(message) => APIError::BadRequest { message },
		IntakeError::Storage(message) => {
			warn!(%message, "Order could not be stored");
			APIError::InternalServerError {
				message: "Failed to store order".to_string(),
			}
		},
	}
}

fn status_error(e: StatusError) -> APIError {
	match e {
		StatusError::InvalidInput(message) => APIError::BadRequest { message },
		StatusError::NotFound => APIError::NotFound {
			message: ORDER_NOT_FOUND.to_string(),
		},
		StatusError::Storage(message) => {
			warn!(%message, "Order status could not be stored");
			APIError::InternalServerError {
				message: "Failed to update order".to_string(),
			}
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_mapping() {
		let invalid = intake_error(IntakeError::InvalidInput("Invalid order data".into()));
		assert_eq!(invalid.status_code(), 400);
		assert_eq!(invalid.message(), "Invalid order data");

		let missing = status_error(StatusError::NotFound);
		assert_eq!(missing.status_code(), 404);
		assert_eq!(missing.message(), "Order not found");

		let storage = status_error(StatusError::Storage("disk on fire".into()));
		assert_eq!(storage.status_code(), 500);
		assert!(!storage.message().contains("disk"));
	}
}
