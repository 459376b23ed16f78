//! Bistro engine.
//!
//! Owns the configured services and the two request handlers, and runs the
//! loop that follows order lifecycle events until shutdown.

pub mod event_bus;
pub mod lifecycle;

use crate::handlers::{IntakeHandler, StatusHandler};
use crate::state::OrderStore;
use bistro_config::Config;
use bistro_menu::MenuService;
use bistro_storage::StorageService;
use bistro_types::{BistroEvent, OrderEvent};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("Configuration error: {0}")]
	Config(String),
}

/// Main engine tying the order store, menu and handlers together.
#[derive(Clone)]
pub struct BistroEngine {
	/// Service configuration.
	pub(crate) config: Config,
	/// Menu catalog used for display and pricing.
	pub(crate) menu: Arc<MenuService>,
	/// All orders placed since startup.
	pub(crate) order_store: Arc<OrderStore>,
	/// Event bus for order lifecycle events.
	pub(crate) event_bus: event_bus::EventBus,
	/// Order intake handler
	pub(crate) intake_handler: Arc<IntakeHandler>,
	/// Status update handler
	pub(crate) status_handler: Arc<StatusHandler>,
}

impl BistroEngine {
	/// Creates a new engine with the given services.
	pub fn new(
		config: Config,
		storage: Arc<StorageService>,
		menu: Arc<MenuService>,
		event_bus: event_bus::EventBus,
	) -> Self {
		let order_store = Arc::new(OrderStore::new(storage));

		let intake_handler = Arc::new(IntakeHandler::new(
			menu.clone(),
			order_store.clone(),
			event_bus.clone(),
			config.restaurant.gst_rate,
		));

		let status_handler = Arc::new(StatusHandler::new(
			order_store.clone(),
			event_bus.clone(),
		));

		Self {
			config,
			menu,
			order_store,
			event_bus,
			intake_handler,
			status_handler,
		}
	}

	/// Main execution loop, runs until Ctrl+C.
	pub async fn run(&self) -> Result<(), EngineError> {
		self.run_until(async {
			if let Err(e) = tokio::signal::ctrl_c().await {
				tracing::error!(error = %e, "Failed to listen for shutdown signal");
			}
		})
		.await
	}

	/// Runs the event loop until `shutdown` completes.
	pub async fn run_until<F>(&self, shutdown: F) -> Result<(), EngineError>
	where
		F: Future<Output = ()>,
	{
		self.initialize().await?;

		let mut event_receiver = self.event_bus.subscribe();
		tokio::pin!(shutdown);

		loop {
			tokio::select! {
				event = event_receiver.recv() => {
					match event {
						Ok(event) => self.log_event(&event),
						Err(RecvError::Lagged(skipped)) => {
							tracing::warn!(skipped, "Event loop fell behind, events dropped");
						}
						Err(RecvError::Closed) => break,
					}
				}

				_ = &mut shutdown => {
					break;
				}
			}
		}

		self.shutdown().await
	}

	fn log_event(&self, event: &BistroEvent) {
		match event {
			BistroEvent::Order(OrderEvent::Placed { order }) => {
				tracing::info!(
					order_id = %order.id,
					customer = order.customer_name.as_deref().unwrap_or("-"),
					table = order.table_number.as_deref().unwrap_or("-"),
					total = %order.total,
					"New order for the kitchen"
				);
			},
			BistroEvent::Order(OrderEvent::Rejected { reason }) => {
				tracing::warn!(%reason, "Order rejected");
			},
			BistroEvent::Order(OrderEvent::StatusChanged {
				order_id,
				previous,
				status,
			}) => {
				tracing::info!(%order_id, from = %previous, to = %status, "Order status changed");
			},
		}
	}

	/// Returns a reference to the configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Returns the menu catalog.
	pub fn menu(&self) -> &Arc<MenuService> {
		&self.menu
	}

	/// Returns the order store.
	pub fn order_store(&self) -> &Arc<OrderStore> {
		&self.order_store
	}

	/// Returns the order intake handler.
	pub fn intake(&self) -> &Arc<IntakeHandler> {
		&self.intake_handler
	}

	/// Returns the status update handler.
	pub fn status(&self) -> &Arc<StatusHandler> {
		&self.status_handler
	}
}
