//! State owned by the engine.
//!
//! The order store is the only mutable state in the system and is shared by
//! both request handlers.

pub mod order;

pub use order::{OrderStore, OrderStoreError};
