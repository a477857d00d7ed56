//! # Cart Service Configuration
//!
//! ## Read Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SelfHeal (default)                                                    │
//! │    get_cart drops lines whose product is missing/inactive, saves the   │
//! │    cleaned cart, then returns it. Same as reconcile_cart.              │
//! │                                                                         │
//! │  FlagStale                                                             │
//! │    get_cart never writes. Unavailable lines come back with             │
//! │    `stale: true` and are left out of the totals. reconcile_cart is     │
//! │    the only way to drop them.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use storefront_core::DEFAULT_CURRENCY;

/// How `get_cart` treats lines whose product went away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadPolicy {
    #[default]
    SelfHeal,
    FlagStale,
}

impl FromStr for ReadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self_heal" => Ok(ReadPolicy::SelfHeal),
            "flag_stale" => Ok(ReadPolicy::FlagStale),
            other => Err(format!(
                "unknown read policy '{}', expected self_heal or flag_stale",
                other
            )),
        }
    }
}

impl fmt::Display for ReadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadPolicy::SelfHeal => f.write_str("self_heal"),
            ReadPolicy::FlagStale => f.write_str("flag_stale"),
        }
    }
}

/// Cart Service settings.
///
/// ## Example
/// ```rust
/// use storefront_cart::{CartConfig, ReadPolicy};
///
/// let config = CartConfig::default()
///     .read_policy(ReadPolicy::FlagStale)
///     .max_write_attempts(5);
/// assert_eq!(config.currency, "INR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub read_policy: ReadPolicy,

    /// Attempts per mutation before a persistent version conflict is
    /// reported as an internal error. Default: 3
    pub max_write_attempts: u32,

    /// Currency code on checkout summaries. Default: "INR"
    pub currency: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            read_policy: ReadPolicy::SelfHeal,
            max_write_attempts: 3,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl CartConfig {
    pub fn read_policy(mut self, policy: ReadPolicy) -> Self {
        self.read_policy = policy;
        self
    }

    /// Values below 1 are raised to 1.
    pub fn max_write_attempts(mut self, attempts: u32) -> Self {
        self.max_write_attempts = attempts.max(1);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}
