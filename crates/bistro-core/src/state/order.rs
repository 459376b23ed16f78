//! Order store.
//!
//! Order records live in the storage service keyed by id. Submission order is
//! tracked in memory by an id index guarded by the same lock writers take, so
//! appends and read-modify-write updates never interleave.

use bistro_storage::{StorageError, StorageService};
use bistro_types::{Order, StorageKey};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur during order store operations.
#[derive(Debug, Error)]
pub enum OrderStoreError {
	#[error("Order not found: {0}")]
	NotFound(String),
	#[error("Order {0} already exists")]
	Duplicate(String),
	#[error("Storage error: {0}")]
	Storage(String),
}

impl From<StorageError> for OrderStoreError {
	fn from(err: StorageError) -> Self {
		OrderStoreError::Storage(err.to_string())
	}
}

/// Process-lifetime collection of orders in submission order.
///
/// Orders are only ever appended. After creation the only supported mutation
/// is [`update_with`](Self::update_with).
pub struct OrderStore {
	storage: Arc<StorageService>,
	/// Ids in submission order.
	sequence: Mutex<Vec<String>>,
}

impl OrderStore {
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self {
			storage,
			sequence: Mutex::new(Vec::new()),
		}
	}

	/// Appends a new order.
	///
	/// Fails with `Duplicate` if an order with the same id is already stored,
	/// leaving the store unchanged.
	pub async fn append(&self, order: &Order) -> Result<(), OrderStoreError> {
		let mut sequence = self.sequence.lock().await;

		if self
			.storage
			.exists(StorageKey::Orders.as_str(), &order.id)
			.await?
		{
			return Err(OrderStoreError::Duplicate(order.id.clone()));
		}

		// Record before index so every indexed id resolves
		self.storage
			.store(StorageKey::Orders.as_str(), &order.id, order)
			.await?;
		sequence.push(order.id.clone());

		Ok(())
	}

	/// Gets an order by id.
	pub async fn get(&self, order_id: &str) -> Result<Order, OrderStoreError> {
		self.storage
			.retrieve(StorageKey::Orders.as_str(), order_id)
			.await
			.map_err(|e| match e {
				StorageError::NotFound => OrderStoreError::NotFound(order_id.to_string()),
				other => other.into(),
			})
	}

	/// Returns every order in submission order.
	pub async fn list(&self) -> Result<Vec<Order>, OrderStoreError> {
		let sequence = self.sequence.lock().await.clone();
		let mut orders = Vec::with_capacity(sequence.len());
		for order_id in &sequence {
			orders.push(self.get(order_id).await?);
		}
		Ok(orders)
	}

	/// Number of stored orders.
	pub async fn len(&self) -> usize {
		self.sequence.lock().await.len()
	}

	/// Whether no order has been placed yet.
	pub async fn is_empty(&self) -> bool {
		self.len().await == 0
	}

	/// Updates an order with a closure and persists it.
	///
	/// Returns the order as it was before the update and as it is after.
	pub async fn update_with<F>(
		&self,
		order_id: &str,
		updater: F,
	) -> Result<(Order, Order), OrderStoreError>
	where
		F: FnOnce(&mut Order),
	{
		let _guard = self.sequence.lock().await;

		let before = self.get(order_id).await?;
		let mut after = before.clone();
		updater(&mut after);

		self.storage
			.update(StorageKey::Orders.as_str(), order_id, &after)
			.await
			.map_err(|e| match e {
				StorageError::NotFound => OrderStoreError::NotFound(order_id.to_string()),
				other => other.into(),
			})?;

		Ok((before, after))
	}
}
