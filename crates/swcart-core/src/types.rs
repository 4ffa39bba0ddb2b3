//! # Domain Types
//!
//! Core domain types used throughout swcart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Vehicle      │   │    CartLine     │   │  CartCommand    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │◄──│  vehicle        │◄──│  action         │       │
//! │  │  cost_in_credits│   │  quantity (i64) │   │  item           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CostInCredits   │   │  CommandKind    │   │    TaxRate      │       │
//! │  │  Number | Text  │   │  add, update,   │   │  bps (u32)      │       │
//! │  │                 │   │  delete, unknown│   │  1075 = 10.75%  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A vehicle is identified by its `name`. Cart lines and commands match on
//! that name and nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::credits::Credits;
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1075 bps = 10.75%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Applies the rate to an amount: `amount × percentage / 100`.
    ///
    /// ## Example
    /// ```rust
    /// use swcart_core::{Credits, TaxRate};
    ///
    /// let tax = TaxRate::from_bps(1075).apply(Credits::new(150_000.0));
    /// assert_eq!(tax.value(), 16_125.0);
    /// ```
    #[inline]
    pub fn apply(&self, amount: Credits) -> Credits {
        Credits::new(amount.value() * self.percentage() / 100.0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Vehicle
// =============================================================================

/// A vehicle's list price as the catalog reports it.
///
/// The catalog sends text (`"149999"`, `"unknown"`); programmatic callers may
/// pass a number. Both are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum CostInCredits {
    Number(f64),
    Text(String),
}

impl CostInCredits {
    /// Reads the cost as a number, `NaN` when it cannot be read.
    ///
    /// Text follows the browser's numeric conversion: surrounding whitespace
    /// is trimmed, blank text is zero, `0x`/`0o`/`0b` prefixes select a radix
    /// (unsigned only), and `Infinity` is the only spelled-out value.
    pub fn to_credits(&self) -> Credits {
        match self {
            CostInCredits::Number(n) => Credits::new(*n),
            CostInCredits::Text(raw) => Credits::new(parse_numeric_text(raw)),
        }
    }
}

fn parse_numeric_text(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
    }

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    // Rust also accepts spellings like "inf" and "nan"; browsers do not.
    if unsigned
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

impl fmt::Display for CostInCredits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostInCredits::Number(n) => write!(f, "{}", n),
            CostInCredits::Text(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<f64> for CostInCredits {
    fn from(value: f64) -> Self {
        CostInCredits::Number(value)
    }
}

impl From<&str> for CostInCredits {
    fn from(value: &str) -> Self {
        CostInCredits::Text(value.to_string())
    }
}

impl From<String> for CostInCredits {
    fn from(value: String) -> Self {
        CostInCredits::Text(value)
    }
}

/// A vehicle from the catalog.
///
/// Supplied whole by the catalog and treated as an immutable value object.
/// Only `name` and `cost_in_credits` matter to the cart; the remaining
/// fields ride along for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Vehicle {
    /// Unique identity key.
    pub name: String,

    /// List price, text or number.
    pub cost_in_credits: CostInCredits,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_class: Option<String>,
}

impl Vehicle {
    /// Creates a vehicle with just the fields the cart needs.
    pub fn new(name: impl Into<String>, cost_in_credits: impl Into<CostInCredits>) -> Self {
        Vehicle {
            name: name.into(),
            cost_in_credits: cost_in_credits.into(),
            model: None,
            manufacturer: None,
            vehicle_class: None,
        }
    }

    /// Returns the cost as credits (`NaN` if unreadable).
    #[inline]
    pub fn cost(&self) -> Credits {
        self.cost_in_credits.to_credits()
    }

    /// Returns the cost, or an error if it is not numeric.
    ///
    /// For callers that want to reject priceless vehicles before they reach
    /// the cart. The cart itself never calls this.
    pub fn try_cost(&self) -> CoreResult<Credits> {
        let cost = self.cost();
        if cost.is_nan() {
            return Err(CoreError::InvalidCost {
                vehicle: self.name.clone(),
                raw: self.cost_in_credits.to_string(),
            });
        }
        Ok(cost)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One entry pairing a vehicle with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub vehicle: Vehicle,
    /// Unchecked: zero and negative values are representable.
    pub quantity: i64,
}

impl CartLine {
    pub fn new(vehicle: Vehicle, quantity: i64) -> Self {
        CartLine { vehicle, quantity }
    }

    /// Returns true if this line holds the given vehicle (matched by name).
    #[inline]
    pub fn is_for(&self, vehicle: &Vehicle) -> bool {
        self.vehicle.name == vehicle.name
    }

    /// `quantity × cost`.
    #[inline]
    pub fn line_total(&self) -> Credits {
        self.vehicle.cost().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Command
// =============================================================================

/// The kind of a cart mutation.
///
/// Any action name outside the three known ones deserializes to `Unknown`,
/// which the fold treats as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Add,
    Update,
    Delete,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Add => write!(f, "add"),
            CommandKind::Update => write!(f, "update"),
            CommandKind::Delete => write!(f, "delete"),
            CommandKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// An immutable record of a requested cart mutation.
///
/// Serialized as `{ "action": "add", "item": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCommand {
    #[serde(rename = "action")]
    pub kind: CommandKind,
    #[serde(rename = "item")]
    pub line: CartLine,
}

impl CartCommand {
    pub fn new(kind: CommandKind, line: CartLine) -> Self {
        CartCommand { kind, line }
    }

    pub fn add(line: CartLine) -> Self {
        Self::new(CommandKind::Add, line)
    }

    pub fn update(line: CartLine) -> Self {
        Self::new(CommandKind::Update, line)
    }

    pub fn delete(line: CartLine) -> Self {
        Self::new(CommandKind::Delete, line)
    }
}

// =============================================================================
// Quantity Mode
// =============================================================================

/// How `update_in_cart` treats zero and negative quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityMode {
    /// Accept any quantity; the line keeps it.
    #[default]
    Permissive,

    /// A quantity of zero or less removes the line instead.
    Normalize,
}

impl fmt::Display for QuantityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityMode::Permissive => write!(f, "permissive"),
            QuantityMode::Normalize => write!(f, "normalize"),
        }
    }
}

impl FromStr for QuantityMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(QuantityMode::Permissive),
            "normalize" | "normalise" => Ok(QuantityMode::Normalize),
            other => Err(CoreError::UnknownQuantityMode(other.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
