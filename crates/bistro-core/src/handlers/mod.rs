//! Request handlers.
//!
//! Intake turns cart submissions into orders. The status handler lets the
//! kitchen move an order along.

pub mod intake;
pub mod status;

pub use intake::{IntakeError, IntakeHandler};
pub use status::{StatusError, StatusHandler};
