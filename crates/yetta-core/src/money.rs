//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing cake options as floats:                                        │
//! │    30.10 + 2.20 = 32.300000000000004  ❌ WRONG!                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3010 + 220 = 3230 cents, displayed as 32.30                          │
//! │                                                                         │
//! │  Floats only appear at the REST boundary, where the bakery API          │
//! │  speaks JSON numbers in major units (Ksh).                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use yetta_core::money::Money;
//!
//! let size = Money::from_major_minor(30, 0);   // Ksh 30.00
//! let topping = Money::from_cents(200);        // Ksh 2.00
//!
//! assert_eq!((size + topping).to_string(), "32.00");
//! assert_eq!((topping * 3).cents(), 600);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  OptionChoice.price ──► custom_price() ──► Purchasable.price           │
/// │                                                 │                       │
/// │  Catalog item price ────────────────────────────┤                       │
/// │                                                 ▼                       │
/// │                              CartLineItem.price × quantity              │
/// │                                                 │                       │
/// │                                                 ▼                       │
/// │                          Cart.total() ──► CheckoutRequest.total (f64)   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use yetta_core::money::Money;
    ///
    /// let price = Money::from_cents(4200);
    /// assert_eq!(price.cents(), 4200);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a JSON number in major units into Money.
    ///
    /// The bakery API exchanges prices as floating point numbers (`42.5`).
    /// This is the only place a float enters the system, and it is rounded
    /// to the nearest cent immediately.
    ///
    /// ```rust
    /// use yetta_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(42.5).cents(), 4250);
    /// assert_eq!(Money::from_major_f64(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_major_f64(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Converts to a JSON number in major units for the REST boundary.
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use yetta_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2500); // Seasonal Fruit Pie
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 7500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money with exactly two decimals and no currency symbol.
///
/// The currency symbol is a display concern of the storefront config
/// (`Ksh. 42.00`), so it is not baked in here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(4250);
        assert_eq!(money.cents(), 4250);
        assert_eq!(money.major(), 42);
        assert_eq!(money.minor(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(30, 0).cents(), 3000);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4200).to_string(), "42.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_float_boundary_rounds_to_cent() {
        assert_eq!(Money::from_major_f64(19.999).cents(), 2000);
        assert_eq!(Money::from_major_f64(45.0).cents(), 4500);
        assert_eq!(Money::from_major_f64(f64::NAN), Money::zero());
        assert!((Money::from_cents(4250).to_major_f64() - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_cents(3000), Money::from_cents(200), Money::from_cents(1000)];
        let total: Money = prices.iter().sum();
        assert_eq!(total.cents(), 4200);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }
}
