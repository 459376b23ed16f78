//! Core engine for the bistro ordering system.
//!
//! This crate holds the order store, the bill arithmetic, the two request
//! handlers (order intake and status updates) and the engine that wires them
//! to the configured storage backend, menu catalog and event bus.

pub mod builder;
pub mod engine;
pub mod handlers;
pub mod pricing;
pub mod state;

pub use builder::{BistroBuilder, BistroFactories, BuilderError};
pub use engine::{event_bus::EventBus, BistroEngine, EngineError};
pub use handlers::{IntakeError, IntakeHandler, StatusError, StatusHandler};
pub use pricing::Bill;
pub use state::{OrderStore, OrderStoreError};
