//! API endpoint implementations.

pub mod order;
pub mod views;
