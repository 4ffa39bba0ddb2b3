//! # Credits Module
//!
//! Provides the `Credits` type for catalog prices and cart totals.
//!
//! ## Why Floating Point?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CATALOG PRICES ARE NOT CENTS                                           │
//! │                                                                         │
//! │  The catalog reports costs as free text: "149999", "8000000",          │
//! │  "unknown". Totals are whole credits, tax is fractional:               │
//! │    149999 × 10.75 / 100 = 16124.8925                                   │
//! │                                                                         │
//! │  A cost that cannot be parsed becomes NaN, and NaN poisons every       │
//! │  total it reaches. That is the contract: the cart never fails, the     │
//! │  totals show the problem.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use swcart_core::credits::Credits;
//!
//! let unit = Credits::new(50_000.0);
//! let line = unit * 3;
//! assert_eq!(line.value(), 150_000.0);
//!
//! let poisoned = line + Credits::nan();
//! assert!(poisoned.is_nan());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Credits Type
// =============================================================================

/// An amount of galactic credits.
///
/// ## Design Decisions
/// - **f64**: catalog costs arrive as arbitrary numeric text and tax is
///   fractional
/// - **NaN is a value**: unparseable costs propagate instead of erroring
/// - **Single field tuple struct**: zero-cost abstraction over f64
///
/// ## Where Credits Flow
/// ```text
/// Vehicle.cost_in_credits ──► CartLine::line_total ──► sub_total
///                                                         │
///                              delivery_fee ◄─────────────┤
///                              tax ◄──────────────────────┤
///                                                         ▼
///                                          sub_total + fee + tax = total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Credits(f64);

impl Credits {
    /// Creates a Credits value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Credits(value)
    }

    /// Returns zero credits.
    #[inline]
    pub const fn zero() -> Self {
        Credits(0.0)
    }

    /// Returns the "not a number" amount produced by unparseable costs.
    #[inline]
    pub const fn nan() -> Self {
        Credits(f64::NAN)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is `NaN`.
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Multiplies the amount by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use swcart_core::credits::Credits;
    ///
    /// let unit = Credits::new(10_500.0);
    /// assert_eq!(unit.multiply_quantity(2).value(), 21_000.0);
    /// assert_eq!(unit.multiply_quantity(-1).value(), -10_500.0);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Credits(qty as f64 * self.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain number, no currency symbol: display formatting belongs to the UI.
impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Credits {
    fn default() -> Self {
        Credits::zero()
    }
}

impl From<f64> for Credits {
    fn from(value: f64) -> Self {
        Credits(value)
    }
}

impl Add for Credits {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Credits(self.0 + other.0)
    }
}

impl AddAssign for Credits {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Credits {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Credits(self.0 - other.0)
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Credits {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Credits {
    fn sum<I: Iterator<Item = Credits>>(iter: I) -> Self {
        iter.fold(Credits::zero(), |acc, c| acc + c)
    }
}

impl<'a> Sum<&'a Credits> for Credits {
    fn sum<I: Iterator<Item = &'a Credits>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
