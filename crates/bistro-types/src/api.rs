//! API types for the bistro HTTP API.
//!
//! This module defines the request bodies accepted by the ordering endpoints,
//! the success and failure envelopes they answer with, and the `APIError`
//! type that maps domain failures onto HTTP status codes.

use crate::{MenuItem, Order};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Customer details sent with an order.
///
/// Table and phone are usually typed into text inputs, but numeric JSON
/// values are accepted too and kept as text. Keys other than the three known
/// ones are allowed and only count towards the customer being present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct CustomerDetails {
	/// Customer name.
	pub name: Option<String>,
	/// Table number.
	pub table: Option<String>,
	/// Contact phone number.
	pub phone: Option<String>,
	/// Number of keys the client sent, known or not.
	#[serde(skip)]
	pub supplied_keys: usize,
}

impl CustomerDetails {
	/// True for a customer object without a single key.
	pub fn is_empty(&self) -> bool {
		self.supplied_keys == 0
			&& self.name.is_none()
			&& self.table.is_none()
			&& self.phone.is_none()
	}
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for CustomerDetails {
	type Error = String;

	fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self, Self::Error> {
		let text = |key: &str| match map.get(key) {
			None | Some(serde_json::Value::Null) => Ok(None),
			Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
			Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
			Some(other) => Err(format!("customer {}: expected text or number, got {}", key, other)),
		};

		Ok(Self {
			name: text("name")?,
			table: text("table")?,
			phone: text("phone")?,
			supplied_keys: map.len(),
		})
	}
}

/// A cart line as submitted by the client.
///
/// Only the name and quantity are read. Any price the client sends along is
/// ignored, pricing always comes from the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
	/// Menu item name, matched exactly.
	pub name: String,
	/// Requested quantity, coerced to an integer at pricing time. Absent
	/// quantities read as null and fail coercion only on matched lines.
	#[serde(default)]
	pub quantity: Quantity,
}

/// Raw quantity value from a cart line.
///
/// Clients send numbers or numeric strings. Coercion is deferred until the
/// line has matched a menu item, so a garbage quantity on an unknown dish is
/// dropped together with the line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(pub serde_json::Value);

/// Errors that can occur when coercing a cart quantity.
#[derive(Debug, Error, PartialEq)]
pub enum QuantityError {
	/// The value is not a number or a numeric string.
	#[error("Quantity must be an integer, got {0}")]
	NotNumeric(String),
}

impl Quantity {
	/// Coerces the raw value to an integer.
	///
	/// Integers are taken as-is, floats are truncated toward zero and strings
	/// are trimmed and parsed as base-10 integers.
	pub fn coerce(&self) -> Result<i64, QuantityError> {
		let not_numeric = || QuantityError::NotNumeric(self.0.to_string());
		match &self.0 {
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					return Ok(i);
				}
				match n.as_f64() {
					Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
					_ => Err(not_numeric()),
				}
			},
			serde_json::Value::String(s) => s.trim().parse::<i64>().map_err(|_| not_numeric()),
			_ => Err(not_numeric()),
		}
	}
}

impl From<i64> for Quantity {
	fn from(value: i64) -> Self {
		Quantity(serde_json::Value::from(value))
	}
}

/// Request body for `POST /api/place-order`.
///
/// Both fields are optional at the wire level so that a missing customer or
/// cart is reported with the failure envelope instead of a parser error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
	/// Who is ordering.
	#[serde(default)]
	pub customer: Option<CustomerDetails>,
	/// What they are ordering.
	#[serde(default)]
	pub cart: Option<Vec<CartLine>>,
}

/// Response for a successfully placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
	/// Always true.
	pub success: bool,
	/// Identifier of the new order.
	pub order_id: String,
}

impl PlaceOrderResponse {
	pub fn new(order_id: String) -> Self {
		Self {
			success: true,
			order_id,
		}
	}
}

/// Request body for `POST /api/update-status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
	/// Order to update.
	#[serde(default)]
	pub order_id: Option<String>,
	/// New status, stored verbatim.
	#[serde(default)]
	pub status: Option<String>,
}

/// Response for a successful status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
	/// Always true.
	pub success: bool,
}

impl UpdateStatusResponse {
	pub fn ok() -> Self {
		Self { success: true }
	}
}

/// Customer view: the menu in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
	pub items: Vec<MenuItem>,
}

/// Kitchen view: every order in submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenResponse {
	pub orders: Vec<Order>,
}

/// API failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Always false.
	pub success: bool,
	/// Human-readable description.
	pub message: String,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug)]
pub enum APIError {
	/// Missing or malformed input (400)
	BadRequest { message: String },
	/// Unknown order (404)
	NotFound { message: String },
	/// Internal server error (500)
	InternalServerError { message: String },
}

impl APIError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			APIError::BadRequest { .. } => 400,
			APIError::NotFound { .. } => 404,
			APIError::InternalServerError { .. } => 500,
		}
	}

	/// The message shown to the client.
	pub fn message(&self) -> &str {
		match self {
			APIError::BadRequest { message }
			| APIError::NotFound { message }
			| APIError::InternalServerError { message } => message,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		ErrorResponse {
			success: false,
			message: self.message().to_string(),
		}
	}
}

impl fmt::Display for APIError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			APIError::BadRequest { message } => write!(f, "Bad Request: {}", message),
			APIError::NotFound { message } => write!(f, "Not Found: {}", message),
			APIError::InternalServerError { message } => {
				write!(f, "Internal Server Error: {}", message)
			},
		}
	}
}

impl std::error::Error for APIError {}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for APIError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = match self.status_code() {
			400 => StatusCode::BAD_REQUEST,
			404 => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		};

		(status, Json(self.to_error_response())).into_response()
	}
}
