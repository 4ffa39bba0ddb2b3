//! # swcart-core: Pure Cart Logic
//!
//! The state-bearing heart of the vehicle catalog: cart commands, the fold
//! that turns a command history into cart lines, and the totals derived from
//! those lines. Everything here is a pure function of its inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        swcart Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Catalog UI (external collaborator)              │   │
//! │  │    Vehicle list ──► Add to cart ──► Cart view (qty, totals)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    swcart-session                               │   │
//! │  │    CartSession: history, snapshot, listeners, watch channel     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ swcart-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   fold    │  │  pricing  │  │ validation│  │   │
//! │  │   │  Vehicle  │  │  apply    │  │  Policy   │  │ quantity  │  │   │
//! │  │   │  CartLine │  │  fold     │  │  Totals   │  │ rates     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Vehicle, CartLine, CartCommand, TaxRate, QuantityMode
//! - [`credits`] - Credits amount type (floating point, `NaN` propagates)
//! - [`fold`] - The one reduction from command history to cart lines
//! - [`pricing`] - Subtotal, delivery fee, tax and grand total
//! - [`error`] - Domain error types
//! - [`validation`] - Opt-in input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use swcart_core::{fold, CartCommand, CartLine, PricingPolicy, Vehicle};
//!
//! let x_wing = Vehicle::new("X-Wing", "149999");
//! let history = vec![CartCommand::add(CartLine::new(x_wing, 1))];
//!
//! let lines = fold::fold(&history);
//! let totals = PricingPolicy::default().totals(&lines);
//!
//! assert_eq!(lines.len(), 1);
//! assert_eq!(totals.sub_total.value(), 149999.0);
//! assert_eq!(totals.delivery_fee.value(), 0.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod credits;
pub mod error;
pub mod fold;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use credits::Credits;
pub use error::{CoreError, CoreResult, ValidationError};
pub use pricing::{CartTotals, PricingPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Subtotal at or above which delivery is free.
pub const DEFAULT_FREE_DELIVERY_THRESHOLD: f64 = 100_000.0;

/// Flat delivery fee charged below the free-delivery threshold.
pub const DEFAULT_DELIVERY_FEE: f64 = 999.0;

/// Default tax rate in basis points (1075 = 10.75%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1075;

/// Upper bound accepted for a tax rate (100%).
pub const MAX_TAX_RATE_BPS: u32 = 10_000;
