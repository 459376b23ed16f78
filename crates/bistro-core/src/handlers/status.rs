//! Status updates from the kitchen.

use crate::engine::event_bus::EventBus;
use crate::state::{OrderStore, OrderStoreError};
use bistro_types::{BistroEvent, Order, OrderEvent, OrderStatus, UpdateStatusRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Message returned when no order has the requested id.
pub const ORDER_NOT_FOUND: &str = "Order not found";

/// Errors that can occur while updating an order's status.
#[derive(Debug, Error)]
pub enum StatusError {
	#[error("{0}")]
	InvalidInput(String),
	#[error("Order not found")]
	NotFound,
	#[error("Storage error: {0}")]
	Storage(String),
}

/// Handler that overwrites the status of a stored order.
pub struct StatusHandler {
	store: Arc<OrderStore>,
	event_bus: EventBus,
}

impl StatusHandler {
	pub fn new(store: Arc<OrderStore>, event_bus: EventBus) -> Self {
		Self { store, event_bus }
	}

	/// Sets the status of one order.
	///
	/// Any status text is accepted and stored verbatim. No other field of the
	/// order changes, and an unknown id leaves the store untouched.
	#[instrument(skip_all, fields(order_id = ?request.order_id))]
	pub async fn update_status(&self, request: UpdateStatusRequest) -> Result<Order, StatusError> {
		let order_id = request
			.order_id
			.ok_or_else(|| StatusError::InvalidInput("Missing order_id".to_string()))?;
		let status = request
			.status
			.map(OrderStatus::from)
			.ok_or_else(|| StatusError::InvalidInput("Missing status".to_string()))?;

		let (before, after) = self
			.store
			.update_with(&order_id, |order| order.status = status)
			.await
			.map_err(|e| match e {
				OrderStoreError::NotFound(_) => StatusError::NotFound,
				other => StatusError::Storage(other.to_string()),
			})?;

		if !after.status.is_known() {
			tracing::warn!(status = %after.status, "Order moved to a non-standard status");
		}
		tracing::info!(from = %before.status, to = %after.status, "Updated order status");

		self.event_bus
			.publish(BistroEvent::Order(OrderEvent::StatusChanged {
				order_id,
				previous: before.status,
				status: after.status.clone(),
			}))
			.ok();

		Ok(after)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bistro_storage::{implementations::memory::MemoryStorage, StorageService};
	use bistro_types::{Decimal, OrderLineItem};

	fn order(id: &str) -> Order {
		Order {
			id: id.to_string(),
			customer_name: Some("Meera".to_string()),
			table_number: Some("2".to_string()),
			phone: Some("555".to_string()),
			order_items: vec![OrderLineItem {
				name: "Dosa".to_string(),
				quantity: 2,
				price: Decimal::from(70),
			}],
			subtotal: Decimal::from(140),
			gst: Decimal::new(700, 2),
			total: Decimal::new(14700, 2),
			status: OrderStatus::Pending,
			timestamp: "12:05 PM".to_string(),
		}
	}

	async fn fixture() -> (StatusHandler, Arc<OrderStore>, EventBus) {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		let store = Arc::new(OrderStore::new(storage));
		store.append(&order("aaaa0001")).await.unwrap();
		store.append(&order("bbbb0002")).await.unwrap();
		let event_bus = EventBus::default();
		let handler = StatusHandler::new(store.clone(), event_bus.clone());
		(handler, store, event_bus)
	}

	fn request(order_id: Option<&str>, status: Option<&str>) -> UpdateStatusRequest {
		UpdateStatusRequest {
			order_id: order_id.map(str::to_string),
			status: status.map(str::to_string),
		}
	}

	#[tokio::test]
	async fn test_only_status_changes() {
		let (handler, store, _) = fixture().await;

		let updated = handler
			.update_status(request(Some("bbbb0002"), Some("Cooking")))
			.await
			.unwrap();

		let mut expected = order("bbbb0002");
		expected.status = OrderStatus::Cooking;
		assert_eq!(updated, expected);
		assert_eq!(store.get("bbbb0002").await.unwrap(), expected);
		assert_eq!(store.get("aaaa0001").await.unwrap(), order("aaaa0001"));
	}

	#[tokio::test]
	async fn test_unknown_id_is_not_found() {
		let (handler, store, _) = fixture().await;
		let before = store.list().await.unwrap();

		let result = handler
			.update_status(request(Some("zzzz9999"), Some("Ready")))
			.await;

		assert!(matches!(result, Err(StatusError::NotFound)));
		assert_eq!(StatusError::NotFound.to_string(), ORDER_NOT_FOUND);
		assert_eq!(store.list().await.unwrap(), before);
	}

	#[tokio::test]
	async fn test_free_text_status_stored_verbatim() {
		let (handler, store, _) = fixture().await;

		handler
			.update_status(request(Some("aaaa0001"), Some("Served")))
			.await
			.unwrap();

		let stored = store.get("aaaa0001").await.unwrap();
		assert_eq!(stored.status.as_str(), "Served");
		assert!(!stored.status.is_known());
	}

	#[tokio::test]
	async fn test_missing_fields_rejected() {
		let (handler, store, _) = fixture().await;
		let before = store.list().await.unwrap();

		let no_id = handler.update_status(request(None, Some("Ready"))).await;
		let no_status = handler.update_status(request(Some("aaaa0001"), None)).await;

		assert!(matches!(no_id, Err(StatusError::InvalidInput(_))));
		assert!(matches!(no_status, Err(StatusError::InvalidInput(_))));
		assert_eq!(store.list().await.unwrap(), before);
	}

	#[tokio::test]
	async fn test_status_changed_event() {
		let (handler, _, event_bus) = fixture().await;
		let mut events = event_bus.subscribe();

		handler
			.update_status(request(Some("aaaa0001"), Some("Ready")))
			.await
			.unwrap();

		match events.recv().await.unwrap() {
			BistroEvent::Order(OrderEvent::StatusChanged {
				order_id,
				previous,
				status,
			}) => {
				assert_eq!(order_id, "aaaa0001");
				assert_eq!(previous, OrderStatus::Pending);
				assert_eq!(status, OrderStatus::Ready);
			},
			other => panic!("unexpected event {:?}", other),
		}
	}
}
