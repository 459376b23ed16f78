//! Order intake.
//!
//! Validates a cart submission, reprices every line against the menu,
//! computes the bill and appends the new order to the store.

use crate::engine::event_bus::EventBus;
use crate::pricing::Bill;
use crate::state::{OrderStore, OrderStoreError};
use bistro_menu::MenuService;
use bistro_types::{
	BistroEvent, CartLine, CustomerDetails, Decimal, Order, OrderEvent, OrderLineItem,
	OrderStatus, PlaceOrderRequest,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Message returned when the customer or the cart is missing.
pub const INVALID_ORDER_DATA: &str = "Invalid order data";

/// Message returned when the bill does not fit a decimal amount.
pub const ORDER_TOO_LARGE: &str = "Order total is too large";

/// Length of generated order ids.
const ORDER_ID_LEN: usize = 8;

/// Attempts at finding an unused order id before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum IntakeError {
	#[error("{0}")]
	InvalidInput(String),
	#[error("Storage error: {0}")]
	Storage(String),
}

/// Handler that turns cart submissions into stored orders.
pub struct IntakeHandler {
	menu: Arc<MenuService>,
	store: Arc<OrderStore>,
	event_bus: EventBus,
	gst_rate: Decimal,
}

impl IntakeHandler {
	pub fn new(
		menu: Arc<MenuService>,
		store: Arc<OrderStore>,
		event_bus: EventBus,
		gst_rate: Decimal,
	) -> Self {
		Self {
			menu,
			store,
			event_bus,
			gst_rate,
		}
	}

	/// Places an order.
	///
	/// The customer must carry at least one detail and the cart must hold at
	/// least one line. Lines naming dishes that are not on the menu are
	/// dropped. Prices always come from the menu. Nothing is stored when the
	/// request is rejected.
	#[instrument(skip_all, fields(lines = request.cart.as_ref().map_or(0, Vec::len)))]
	pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<Order, IntakeError> {
		let result = self.try_place_order(request).await;

		match &result {
			Ok(order) => {
				self.event_bus
					.publish(BistroEvent::Order(OrderEvent::Placed {
						order: order.clone(),
					}))
					.ok();
			},
			Err(IntakeError::InvalidInput(reason)) => {
				tracing::debug!(%reason, "Rejected order");
				self.event_bus
					.publish(BistroEvent::Order(OrderEvent::Rejected {
						reason: reason.clone(),
					}))
					.ok();
			},
			Err(e) => tracing::error!(error = %e, "Failed to place order"),
		}

		result
	}

	async fn try_place_order(&self, request: PlaceOrderRequest) -> Result<Order, IntakeError> {
		let (customer, cart) = match (request.customer, request.cart) {
			(Some(customer), Some(cart)) if !customer.is_empty() && !cart.is_empty() => {
				(customer, cart)
			},
			_ => return Err(IntakeError::InvalidInput(INVALID_ORDER_DATA.to_string())),
		};

		let order_items = self.reprice(&cart)?;
		let bill = Bill::for_items(&order_items, self.gst_rate)
			.ok_or_else(|| IntakeError::InvalidInput(ORDER_TOO_LARGE.to_string()))?;
		let timestamp = chrono::Local::now().format("%I:%M %p").to_string();

		let CustomerDetails {
			name, table, phone, ..
		} = customer;
		let mut order = Order {
			id: new_order_id(),
			customer_name: name,
			table_number: table,
			phone,
			order_items,
			subtotal: bill.subtotal,
			gst: bill.gst,
			total: bill.total,
			status: OrderStatus::Pending,
			timestamp,
		};

		for attempt in 1..=MAX_ID_ATTEMPTS {
			match self.store.append(&order).await {
				Ok(()) => {
					tracing::info!(
						order_id = %order.id,
						items = order.order_items.len(),
						total = %order.total,
						"Placed order"
					);
					return Ok(order);
				},
				Err(OrderStoreError::Duplicate(id)) => {
					tracing::debug!(order_id = %id, attempt, "Order id taken, regenerating");
					order.id = new_order_id();
				},
				Err(e) => return Err(IntakeError::Storage(e.to_string())),
			}
		}

		Err(IntakeError::Storage(format!(
			"No free order id after {} attempts",
			MAX_ID_ATTEMPTS
		)))
	}

	/// Matches cart lines to menu items and copies the menu price.
	fn reprice(&self, cart: &[CartLine]) -> Result<Vec<OrderLineItem>, IntakeError> {
		let mut items = Vec::with_capacity(cart.len());

		for line in cart {
			let Some(item) = self.menu.find_by_name(&line.name) else {
				tracing::debug!(name = %line.name, "Dropping cart line not on the menu");
				continue;
			};

			let quantity = line
				.quantity
				.coerce()
				.map_err(|e| IntakeError::InvalidInput(format!("{} for '{}'", e, line.name)))?;
			let quantity = u32::try_from(quantity)
				.ok()
				.filter(|q| *q > 0)
				.ok_or_else(|| {
					IntakeError::InvalidInput(format!(
						"Quantity for '{}' must be a positive integer, got {}",
						line.name, quantity
					))
				})?;

			items.push(OrderLineItem {
				name: item.name.clone(),
				quantity,
				price: item.price,
			});
		}

		Ok(items)
	}
}

/// Short order id taken from a random v4 UUID.
fn new_order_id() -> String {
	let mut id = uuid::Uuid::new_v4().simple().to_string();
	id.truncate(ORDER_ID_LEN);
	id
}

#[cfg(test)]
mod tests {
	use super::*;
	use bistro_menu::implementations::static_menu::StaticMenu;
	use bistro_storage::{implementations::memory::MemoryStorage, StorageService};
	use bistro_types::{MenuItem, Quantity};
	use serde_json::json;

	struct Fixture {
		handler: IntakeHandler,
		store: Arc<OrderStore>,
		event_bus: EventBus,
	}

	fn fixture() -> Fixture {
		fixture_with_menu(StaticMenu::default())
	}

	fn fixture_with_menu(menu: StaticMenu) -> Fixture {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		let store = Arc::new(OrderStore::new(storage));
		let menu = Arc::new(MenuService::single("static", Box::new(menu)));
		let event_bus = EventBus::default();
		let handler = IntakeHandler::new(
			menu,
			store.clone(),
			event_bus.clone(),
			Decimal::new(5, 2),
		);
		Fixture {
			handler,
			store,
			event_bus,
		}
	}

	fn customer() -> CustomerDetails {
		CustomerDetails {
			name: Some("Asha".to_string()),
			table: Some("7".to_string()),
			phone: Some("9876543210".to_string()),
			..Default::default()
		}
	}

	fn line(name: &str, quantity: serde_json::Value) -> CartLine {
		CartLine {
			name: name.to_string(),
			quantity: Quantity(quantity),
		}
	}

	fn request(cart: Vec<CartLine>) -> PlaceOrderRequest {
		PlaceOrderRequest {
			customer: Some(customer()),
			cart: Some(cart),
		}
	}

	#[tokio::test]
	async fn test_two_dosas() {
		let f = fixture();
		let order = f
			.handler
			.place_order(request(vec![line("Dosa", json!(2))]))
			.await
			.unwrap();

		assert_eq!(order.id.len(), 8);
		assert!(order.id.chars().all(|c| c.is_ascii_hexdigit()));
		assert_eq!(order.subtotal, Decimal::from(140));
		assert_eq!(order.gst, Decimal::new(700, 2));
		assert_eq!(order.total, Decimal::new(14700, 2));
		assert_eq!(order.status, OrderStatus::Pending);
		assert_eq!(order.customer_name.as_deref(), Some("Asha"));
		assert_eq!(order.table_number.as_deref(), Some("7"));
		assert_eq!(order.timestamp.len(), 8);
		assert!(order.timestamp.ends_with("AM") || order.timestamp.ends_with("PM"));

		assert_eq!(f.store.get(&order.id).await.unwrap(), order);
	}

	#[tokio::test]
	async fn test_unknown_items_dropped() {
		let f = fixture();
		let order = f
			.handler
			.place_order(request(vec![
				line("Idli", json!(1)),
				line("Unknown", json!(5)),
			]))
			.await
			.unwrap();

		assert_eq!(order.order_items.len(), 1);
		assert_eq!(order.order_items[0].name, "Idli");
		assert_eq!(order.subtotal, Decimal::from(40));
	}

	#[tokio::test]
	async fn test_only_unknown_items_gives_empty_order() {
		let f = fixture();
		let order = f
			.handler
			.place_order(request(vec![line("Pizza", json!("lots"))]))
			.await
			.unwrap();

		assert!(order.order_items.is_empty());
		assert_eq!(order.total, Decimal::ZERO);
		assert_eq!(f.store.len().await, 1);
	}

	#[tokio::test]
	async fn test_prices_come_from_menu() {
		let f = fixture();
		let order = f
			.handler
			.place_order(request(vec![
				line("Paneer Butter Masala", json!("2")),
				line("Butter Naan", json!(3.7)),
			]))
			.await
			.unwrap();

		assert_eq!(order.order_items[0].price, Decimal::from(160));
		assert_eq!(order.order_items[0].quantity, 2);
		assert_eq!(order.order_items[1].quantity, 3);
		assert_eq!(order.subtotal, Decimal::from(410));
	}

	#[tokio::test]
	async fn test_missing_customer_rejected() {
		let f = fixture();
		let result = f
			.handler
			.place_order(PlaceOrderRequest {
				customer: None,
				cart: Some(vec![line("Idli", json!(1))]),
			})
			.await;

		assert!(matches!(result, Err(IntakeError::InvalidInput(msg)) if msg == INVALID_ORDER_DATA));
		assert!(f.store.is_empty().await);
	}

	#[tokio::test]
	async fn test_empty_customer_rejected() {
		let f = fixture();
		let result = f
			.handler
			.place_order(PlaceOrderRequest {
				customer: Some(CustomerDetails::default()),
				cart: Some(vec![line("Idli", json!(1))]),
			})
			.await;

		assert!(matches!(result, Err(IntakeError::InvalidInput(_))));
		assert!(f.store.is_empty().await);
	}

	#[tokio::test]
	async fn test_empty_cart_rejected() {
		let f = fixture();
		let mut events = f.event_bus.subscribe();

		let result = f.handler.place_order(request(vec![])).await;

		assert!(matches!(result, Err(IntakeError::InvalidInput(_))));
		assert!(f.store.is_empty().await);
		assert!(matches!(
			events.recv().await.unwrap(),
			BistroEvent::Order(OrderEvent::Rejected { .. })
		));
	}

	#[tokio::test]
	async fn test_bad_quantity_rejected() {
		let f = fixture();

		for quantity in [json!("two"), json!(0), json!(-3), json!(null)] {
			let result = f
				.handler
				.place_order(request(vec![line("Dosa", quantity.clone())]))
				.await;
			assert!(
				matches!(result, Err(IntakeError::InvalidInput(ref msg)) if msg.contains("Dosa")),
				"quantity {} gave {:?}",
				quantity,
				result
			);
		}

		assert!(f.store.is_empty().await);
	}

	#[tokio::test]
	async fn test_placed_event_published() {
		let f = fixture();
		let mut events = f.event_bus.subscribe();

		let order = f
			.handler
			.place_order(request(vec![line("Veg Biryani", json!(1))]))
			.await
			.unwrap();

		match events.recv().await.unwrap() {
			BistroEvent::Order(OrderEvent::Placed { order: published }) => {
				assert_eq!(published, order)
			},
			other => panic!("unexpected event {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_orders_listed_in_submission_order() {
		let f = fixture();
		let mut ids = Vec::new();
		for name in ["Idli", "Dosa", "Butter Naan"] {
			let order = f
				.handler
				.place_order(request(vec![line(name, json!(1))]))
				.await
				.unwrap();
			ids.push(order.id);
		}

		let listed: Vec<_> = f
			.store
			.list()
			.await
			.unwrap()
			.into_iter()
			.map(|o| o.id)
			.collect();
		assert_eq!(listed, ids);
	}

	#[tokio::test]
	async fn test_unknown_item_without_quantity_dropped() {
		let f = fixture();
		let request: PlaceOrderRequest = serde_json::from_value(json!({
			"customer": {"name": "A"},
			"cart": [{"name": "Idli", "quantity": 1}, {"name": "Pizza"}],
		}))
		.unwrap();

		let order = f.handler.place_order(request).await.unwrap();

		assert_eq!(order.order_items.len(), 1);
		assert_eq!(order.order_items[0].name, "Idli");
		assert_eq!(order.total, Decimal::from(42));
	}

	#[tokio::test]
	async fn test_overflowing_total_rejected() {
		let gold = MenuItem {
			id: 1,
			name: "Gold".to_string(),
			price: Decimal::from_i128_with_scale(10_i128.pow(20), 0),
		};
		let f = fixture_with_menu(StaticMenu::new(vec![gold]).unwrap());

		let result = f
			.handler
			.place_order(request(vec![line("Gold", json!(4_000_000_000_u32))]))
			.await;

		assert!(matches!(result, Err(IntakeError::InvalidInput(msg)) if msg == ORDER_TOO_LARGE));
		assert!(f.store.is_empty().await);
	}

	#[tokio::test]
	async fn test_customer_with_only_unknown_details_accepted() {
		let f = fixture();
		let request: PlaceOrderRequest = serde_json::from_value(json!({
			"customer": {"email": "a@example.com"},
			"cart": [{"name": "Dosa", "quantity": 1}],
		}))
		.unwrap();

		let order = f.handler.place_order(request).await.unwrap();

		assert!(order.customer_name.is_none());
		assert_eq!(f.store.len().await, 1);
	}
}
