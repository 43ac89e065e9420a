//! Coupon codes.
//!
//! Coupons are a static mapping from code to discount fraction. There is no
//! expiry, usage counting or stacking: a cart carries at most one coupon and
//! re-applying the same code changes nothing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors looking up a coupon.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CouponError {
    #[error("please enter a coupon code")]
    Empty,
    #[error("invalid coupon code: {0}")]
    Unknown(String),
}

/// A valid coupon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coupon {
    /// Canonical (uppercase) code.
    pub code: String,
    /// Fraction of the subtotal taken off, e.g. `0.10`.
    pub fraction: Decimal,
}

impl Coupon {
    /// Create a coupon; the code is stored uppercase.
    #[must_use]
    pub fn new(code: &str, fraction: Decimal) -> Self {
        Self {
            code: code.to_uppercase(),
            fraction,
        }
    }

    /// Discount as a whole percentage, e.g. `10`.
    #[must_use]
    pub fn percent(&self) -> Decimal {
        (self.fraction * Decimal::ONE_HUNDRED).normalize()
    }
}

/// The set of codes the store accepts.
#[derive(Debug, Clone)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl Default for CouponBook {
    fn default() -> Self {
        Self::standard()
    }
}

impl CouponBook {
    /// Build a book from coupons.
    #[must_use]
    pub const fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// The store's standing promotions.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Coupon::new("SAVE10", Decimal::new(10, 2)),
            Coupon::new("WELCOME20", Decimal::new(20, 2)),
            Coupon::new("STUDENT15", Decimal::new(15, 2)),
        ])
    }

    /// All accepted coupons.
    #[must_use]
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Look up a code typed by the shopper.
    ///
    /// Matching ignores case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::Empty`] for a blank code and
    /// [`CouponError::Unknown`] when no coupon matches.
    pub fn lookup(&self, code: &str) -> Result<&Coupon, CouponError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CouponError::Empty);
        }
        let wanted = code.to_uppercase();
        self.coupons
            .iter()
            .find(|c| c.code == wanted)
            .ok_or_else(|| CouponError::Unknown(code.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let book = CouponBook::standard();
        assert_eq!(book.lookup("save10").unwrap().fraction, Decimal::new(10, 2));
        assert_eq!(book.lookup("Welcome20").unwrap().fraction, Decimal::new(20, 2));
        assert_eq!(book.lookup(" STUDENT15 ").unwrap().code, "STUDENT15");
    }

    #[test]
    fn test_lookup_unknown() {
        let book = CouponBook::standard();
        assert_eq!(
            book.lookup("SAVE100"),
            Err(CouponError::Unknown("SAVE100".to_string()))
        );
        assert_eq!(book.lookup("  "), Err(CouponError::Empty));
    }

    #[test]
    fn test_lookup_twice_returns_same_coupon() {
        let book = CouponBook::standard();
        let first = book.lookup("save10").unwrap().clone();
        let second = book.lookup("SAVE10").unwrap();
        assert_eq!(&first, second);
    }

    #[test]
    fn test_percent() {
        let book = CouponBook::standard();
        assert_eq!(book.lookup("STUDENT15").unwrap().percent().to_string(), "15");
    }
}
