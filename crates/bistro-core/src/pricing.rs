//! Bill arithmetic.
//!
//! Every amount is a [`Decimal`]. Tax is rounded to two places with
//! round-half-to-even, the subtotal and total are exact. Arithmetic is
//! checked, a bill that does not fit a `Decimal` has no value.

use bistro_types::{Decimal, OrderLineItem};
use rust_decimal::RoundingStrategy;

/// Number of decimal places kept for tax amounts.
const MONEY_SCALE: u32 = 2;

/// Subtotal, tax and total for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bill {
	pub subtotal: Decimal,
	pub gst: Decimal,
	pub total: Decimal,
}

impl Bill {
	/// Computes the bill for the given lines at the given GST rate.
	///
	/// Returns `None` when any amount overflows.
	pub fn for_items(items: &[OrderLineItem], gst_rate: Decimal) -> Option<Self> {
		let subtotal = items.iter().try_fold(Decimal::ZERO, |acc, item| {
			acc.checked_add(item.line_total()?)
		})?;
		let gst = round_money(subtotal.checked_mul(gst_rate)?);

		Some(Self {
			subtotal,
			gst,
			total: subtotal.checked_add(gst)?,
		})
	}
}

/// Rounds an amount to two decimal places, ties to even.
pub fn round_money(amount: Decimal) -> Decimal {
	amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn line(name: &str, quantity: u32, price: i64) -> OrderLineItem {
		OrderLineItem {
			name: name.to_string(),
			quantity,
			price: Decimal::from(price),
		}
	}

	#[test]
	fn test_two_dosas() {
		let bill = Bill::for_items(&[line("Dosa", 2, 70)], Decimal::new(5, 2)).unwrap();

		assert_eq!(bill.subtotal, Decimal::from(140));
		assert_eq!(bill.gst, Decimal::new(700, 2));
		assert_eq!(bill.total, Decimal::new(14700, 2));
	}

	#[test]
	fn test_empty_bill() {
		let bill = Bill::for_items(&[], Decimal::new(5, 2)).unwrap();

		assert_eq!(bill.subtotal, Decimal::ZERO);
		assert_eq!(bill.gst, Decimal::ZERO);
		assert_eq!(bill.total, Decimal::ZERO);
	}

	#[test]
	fn test_mixed_lines() {
		let items = [line("Idli", 3, 40), line("Butter Naan", 2, 30)];
		let bill = Bill::for_items(&items, Decimal::new(5, 2)).unwrap();

		assert_eq!(bill.subtotal, Decimal::from(180));
		assert_eq!(bill.gst, Decimal::from(9));
		assert_eq!(bill.total, Decimal::from(189));
	}

	#[test]
	fn test_tax_ties_round_to_even() {
		// 0.125 and 0.135 sit exactly between two cents
		assert_eq!(round_money(Decimal::new(125, 3)), Decimal::new(12, 2));
		assert_eq!(round_money(Decimal::new(135, 3)), Decimal::new(14, 2));

		let items = [OrderLineItem {
			name: "Chai".to_string(),
			quantity: 1,
			price: Decimal::new(250, 2),
		}];
		let bill = Bill::for_items(&items, Decimal::new(5, 2)).unwrap();
		assert_eq!(bill.gst, Decimal::new(12, 2));
		assert_eq!(bill.total, Decimal::new(262, 2));
	}

	#[test]
	fn test_zero_rate() {
		let bill = Bill::for_items(&[line("Veg Biryani", 1, 140)], Decimal::ZERO).unwrap();
		assert_eq!(bill.gst, Decimal::ZERO);
		assert_eq!(bill.total, bill.subtotal);
	}

	#[test]
	fn test_overflow_has_no_bill() {
		let gold = OrderLineItem {
			name: "Gold".to_string(),
			quantity: 4_000_000_000,
			price: Decimal::from_i128_with_scale(10_i128.pow(20), 0),
		};
		assert_eq!(Bill::for_items(&[gold], Decimal::new(5, 2)), None);

		// Each line fits but the sum does not
		let half = OrderLineItem {
			name: "Half".to_string(),
			quantity: 1,
			price: Decimal::MAX,
		};
		assert_eq!(Bill::for_items(&[half.clone(), half], Decimal::ZERO), None);
	}
}
