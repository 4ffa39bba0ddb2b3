//! # Pricing
//!
//! Derived totals for a list of cart lines.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lines ──► sub_total = Σ quantity × cost                                │
//! │                 │                                                       │
//! │                 ├──► delivery_fee = 0 if sub_total ≥ 100000 else 999    │
//! │                 │                                                       │
//! │                 ├──► tax = sub_total × 10.75 / 100                      │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  total_price = sub_total + delivery_fee + tax                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `NaN` subtotal is not "below the threshold", so it ships free and the
//! `NaN` surfaces in tax and total.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::credits::Credits;
use crate::types::{CartLine, TaxRate};
use crate::{DEFAULT_DELIVERY_FEE, DEFAULT_FREE_DELIVERY_THRESHOLD};

// =============================================================================
// Pricing Policy
// =============================================================================

/// The numbers that turn a subtotal into a grand total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Subtotal at or above which delivery is free.
    pub free_delivery_threshold: Credits,

    /// Fee charged when the subtotal is below the threshold.
    pub delivery_fee: Credits,

    pub tax_rate: TaxRate,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            free_delivery_threshold: Credits::new(DEFAULT_FREE_DELIVERY_THRESHOLD),
            delivery_fee: Credits::new(DEFAULT_DELIVERY_FEE),
            tax_rate: TaxRate::default(),
        }
    }
}

impl PricingPolicy {
    /// Σ `quantity × cost` over the lines.
    pub fn sub_total(&self, lines: &[CartLine]) -> Credits {
        lines.iter().map(CartLine::line_total).sum()
    }

    /// Delivery fee for a given subtotal.
    pub fn delivery_fee_for(&self, sub_total: Credits) -> Credits {
        if sub_total < self.free_delivery_threshold {
            self.delivery_fee
        } else {
            Credits::zero()
        }
    }

    /// Tax for a given subtotal.
    #[inline]
    pub fn tax_for(&self, sub_total: Credits) -> Credits {
        self.tax_rate.apply(sub_total)
    }

    /// Computes every derived value in one pass.
    pub fn totals(&self, lines: &[CartLine]) -> CartTotals {
        let sub_total = self.sub_total(lines);
        let delivery_fee = self.delivery_fee_for(sub_total);
        let tax = self.tax_for(sub_total);

        CartTotals {
            item_count: lines.len(),
            total_quantity: lines
                .iter()
                .map(|l| l.quantity)
                .fold(0i64, i64::saturating_add),
            sub_total,
            delivery_fee,
            tax,
            total_price: sub_total + delivery_fee + tax,
        }
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary handed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of lines (duplicates counted separately).
    pub item_count: usize,
    /// Sum of line quantities, clamped at the `i64` bounds.
    pub total_quantity: i64,
    pub sub_total: Credits,
    pub delivery_fee: Credits,
    pub tax: Credits,
    pub total_price: Credits,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vehicle;

    fn line(name: &str, cost: &str, quantity: i64) -> CartLine {
        CartLine::new(Vehicle::new(name, cost), quantity)
    }

    fn approx(a: Credits, b: f64) -> bool {
        (a.value() - b).abs() < 1e-6
    }

    #[test]
    fn test_empty_cart_pays_delivery() {
        let totals = PricingPolicy::default().totals(&[]);
        assert!(totals.sub_total.is_zero());
        assert_eq!(totals.delivery_fee.value(), 999.0);
        assert!(totals.tax.is_zero());
        assert_eq!(totals.total_price.value(), 999.0);
    }

    #[test]
    fn test_x_wing_scenario() {
        let totals = PricingPolicy::default().totals(&[line("X-Wing", "149999", 1)]);

        assert_eq!(totals.sub_total.value(), 149999.0);
        assert!(totals.delivery_fee.is_zero());
        assert!(approx(totals.tax, 16124.8925));
        assert!(approx(totals.total_price, 166123.8925));
    }

    #[test]
    fn test_total_quantity_saturates() {
        let lines = [line("TIE", "50000", i64::MAX), line("TIE", "50000", i64::MAX)];
        let totals = PricingPolicy::default().totals(&lines);
        assert_eq!(totals.total_quantity, i64::MAX);

        let lines = [line("TIE", "50000", i64::MIN), line("TIE", "50000", -1)];
        assert_eq!(PricingPolicy::default().totals(&lines).total_quantity, i64::MIN);
    }

    #[test]
    fn test_delivery_fee_boundary() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.delivery_fee_for(Credits::new(99_999.99)).value(), 999.0);
        assert!(policy.delivery_fee_for(Credits::new(100_000.0)).is_zero());
        assert!(policy.delivery_fee_for(Credits::new(100_000.01)).is_zero());
    }

    #[test]
    fn test_tax_is_exact_fraction_of_subtotal() {
        let policy = PricingPolicy::default();
        for amount in [0.0, 1.0, 999.0, 50_000.0, 149_999.0, 1_000_000.0] {
            let tax = policy.tax_for(Credits::new(amount));
            assert!((tax.value() - amount * 0.1075).abs() < 1e-6);
        }
    }

    #[test]
    fn test_subtotal_counts_quantity_and_negative_lines() {
        let lines = vec![line("TIE", "50000", 3), line("Speeder", "8000", -1)];
        let totals = PricingPolicy::default().totals(&lines);

        assert_eq!(totals.sub_total.value(), 142_000.0);
        assert_eq!(totals.total_quantity, 2);
        assert_eq!(totals.item_count, 2);
    }

    #[test]
    fn test_nan_cost_poisons_totals_without_delivery_fee() {
        let lines = vec![line("TIE", "50000", 1), line("AT-AT", "unknown", 1)];
        let totals = PricingPolicy::default().totals(&lines);

        assert!(totals.sub_total.is_nan());
        assert!(totals.delivery_fee.is_zero());
        assert!(totals.tax.is_nan());
        assert!(totals.total_price.is_nan());
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            free_delivery_threshold: Credits::new(10.0),
            delivery_fee: Credits::new(5.0),
            tax_rate: TaxRate::from_bps(0),
        };
        let totals = policy.totals(&[line("Skiff", "4", 2)]);
        assert_eq!(totals.total_price.value(), 13.0);
    }
}
