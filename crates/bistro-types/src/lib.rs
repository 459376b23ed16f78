//! Common types module for the bistro ordering system.
//!
//! This module defines the core data types shared by every bistro crate:
//! the menu and order model, HTTP request/response envelopes, lifecycle
//! events and the configuration validation framework used by pluggable
//! implementations.

/// API types for HTTP endpoints and request/response structures.
pub mod api;
/// Event types for inter-service communication.
pub mod events;
/// Menu catalog types.
pub mod menu;
/// Order types including line items and status values.
pub mod order;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Storage types for keying persisted collections.
pub mod storage;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

// Re-export all types for convenient access
pub use api::*;
pub use events::*;
pub use menu::*;
pub use order::*;
pub use registry::*;
pub use storage::*;
pub use validation::*;

/// Decimal type used for every monetary amount.
pub use rust_decimal::Decimal;
