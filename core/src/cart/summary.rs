// storefront/src/cart/summary.rs

//! Order totals shown at checkout.

use rust_decimal::Decimal;

/// 10 %.
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
  pub subtotal: Decimal,
  pub tax: Decimal,
  pub shipping: Decimal,
  pub total: Decimal,
}

impl CartSummary {
  /// Tax is rounded to cents. An empty cart (zero subtotal) costs nothing,
  /// shipping included.
  pub fn from_subtotal(subtotal: Decimal) -> Self {
    if subtotal.is_zero() {
      return Self {
        subtotal,
        tax: Decimal::ZERO,
        shipping: Decimal::ZERO,
        total: Decimal::ZERO,
      };
    }
    let tax = (subtotal * TAX_RATE).round_dp(2);
    let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
      Decimal::ZERO
    } else {
      FLAT_SHIPPING
    };
    Self {
      subtotal,
      tax,
      shipping,
      total: subtotal + tax + shipping,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn small_orders_pay_flat_shipping() {
    let summary = CartSummary::from_subtotal(Decimal::new(2999, 2));
    assert_eq!(summary.tax, Decimal::new(300, 2));
    assert_eq!(summary.shipping, Decimal::new(999, 2));
    assert_eq!(summary.total, Decimal::new(4298, 2));
  }

  #[test]
  fn threshold_is_exclusive() {
    assert_eq!(CartSummary::from_subtotal(Decimal::from(50)).shipping, FLAT_SHIPPING);
    assert_eq!(CartSummary::from_subtotal(Decimal::new(5001, 2)).shipping, Decimal::ZERO);
  }

  #[test]
  fn empty_cart_is_free() {
    let summary = CartSummary::from_subtotal(Decimal::ZERO);
    assert_eq!(summary.total, Decimal::ZERO);
    assert_eq!(summary.shipping, Decimal::ZERO);
  }
}
