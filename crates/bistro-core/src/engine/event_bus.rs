//! Event bus for order lifecycle events.
//!
//! A thin wrapper over a tokio broadcast channel. Publishing never blocks,
//! and a publish with no subscribers is not an error for callers that
//! ignore the result.

use bistro_types::BistroEvent;
use tokio::sync::broadcast;

/// Default number of events buffered per subscriber.
const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone, Debug)]
pub struct EventBus {
	sender: broadcast::Sender<BistroEvent>,
}

impl EventBus {
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Publishes an event, returning the number of subscribers reached.
	pub fn publish(
		&self,
		event: BistroEvent,
	) -> Result<usize, broadcast::error::SendError<BistroEvent>> {
		self.sender.send(event)
	}

	pub fn subscribe(&self) -> broadcast::Receiver<BistroEvent> {
		self.sender.subscribe()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}
