//! Event types for inter-service communication.
//!
//! Events flow through the engine's event bus so that other parts of the
//! system can react to orders being placed or moving through the kitchen.

use crate::{Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// Main event type encompassing all bistro events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BistroEvent {
	/// Events from order intake and the status updater.
	Order(OrderEvent),
}

/// Events related to the order lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderEvent {
	/// A new order was accepted and stored.
	Placed { order: Order },
	/// An order submission was refused.
	Rejected { reason: String },
	/// The kitchen changed an order's status.
	StatusChanged {
		order_id: String,
		previous: OrderStatus,
		status: OrderStatus,
	},
}
