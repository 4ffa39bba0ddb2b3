//! # Cart Configuration
//!
//! Pricing numbers and quantity handling for a cart session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SWCART_FREE_DELIVERY_THRESHOLD=100000                              │
//! │     SWCART_DELIVERY_FEE=999                                            │
//! │     SWCART_TAX_RATE=10.75          (percent)                           │
//! │     SWCART_QUANTITY_MODE=normalize                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/swcart/cart.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.swcart.cart/cart.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     free delivery at 100000, fee 999, tax 10.75%, permissive           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! free_delivery_threshold = 100000
//! delivery_fee = 999
//! tax_rate_bps = 1075
//!
//! [cart]
//! quantity_mode = "permissive"  # permissive | normalize
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use swcart_core::validation::{validate_amount, validate_tax_rate_bps};
use swcart_core::{
    CoreError, Credits, PricingPolicy, QuantityMode, TaxRate, DEFAULT_DELIVERY_FEE,
    DEFAULT_FREE_DELIVERY_THRESHOLD, DEFAULT_TAX_RATE_BPS,
};
use tracing::{debug, info, warn};

use crate::error::SessionResult;

// =============================================================================
// Pricing Settings
// =============================================================================

/// Pricing numbers as they appear in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Subtotal at or above which delivery is free.
    #[serde(default = "default_free_delivery_threshold")]
    pub free_delivery_threshold: f64,

    /// Flat delivery fee below the threshold.
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: f64,

    /// Tax rate in basis points (1075 = 10.75%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,
}

fn default_free_delivery_threshold() -> f64 {
    DEFAULT_FREE_DELIVERY_THRESHOLD
}

fn default_delivery_fee() -> f64 {
    DEFAULT_DELIVERY_FEE
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            free_delivery_threshold: default_free_delivery_threshold(),
            delivery_fee: default_delivery_fee(),
            tax_rate_bps: default_tax_rate_bps(),
        }
    }
}

impl PricingSettings {
    /// Converts the settings into the policy the cart computes with.
    pub fn to_policy(&self) -> PricingPolicy {
        PricingPolicy {
            free_delivery_threshold: Credits::new(self.free_delivery_threshold),
            delivery_fee: Credits::new(self.delivery_fee),
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
        }
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSettings {
    #[serde(default)]
    pub quantity_mode: QuantityMode,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document.
    pub fn from_toml(contents: &str) -> SessionResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        let policy = self.policy();

        validate_amount("free_delivery_threshold", policy.free_delivery_threshold)
            .map_err(CoreError::from)?;
        validate_amount("delivery_fee", policy.delivery_fee).map_err(CoreError::from)?;
        validate_tax_rate_bps(self.pricing.tax_rate_bps).map_err(CoreError::from)?;

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides read through `lookup`, keyed by environment variable
    /// name. Values that do not parse are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SWCART_FREE_DELIVERY_THRESHOLD") {
            match value.trim().parse::<f64>() {
                Ok(threshold) => {
                    debug!(threshold, "Overriding free delivery threshold from environment");
                    self.pricing.free_delivery_threshold = threshold;
                }
                Err(_) => warn!(value = %value, "Ignoring non-numeric SWCART_FREE_DELIVERY_THRESHOLD"),
            }
        }

        if let Some(value) = lookup("SWCART_DELIVERY_FEE") {
            match value.trim().parse::<f64>() {
                Ok(fee) => self.pricing.delivery_fee = fee,
                Err(_) => warn!(value = %value, "Ignoring non-numeric SWCART_DELIVERY_FEE"),
            }
        }

        if let Some(value) = lookup("SWCART_TAX_RATE") {
            match value.trim().parse::<f64>() {
                Ok(pct) if pct >= 0.0 => {
                    self.pricing.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(value = %value, "Ignoring invalid SWCART_TAX_RATE"),
            }
        }

        if let Some(value) = lookup("SWCART_QUANTITY_MODE") {
            match value.parse::<QuantityMode>() {
                Ok(mode) => {
                    debug!(%mode, "Overriding quantity mode from environment");
                    self.cart.quantity_mode = mode;
                }
                Err(e) => warn!(error = %e, "Ignoring SWCART_QUANTITY_MODE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "swcart", "cart")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn policy(&self) -> PricingPolicy {
        self.pricing.to_policy()
    }

    pub fn quantity_mode(&self) -> QuantityMode {
        self.cart.quantity_mode
    }
}
