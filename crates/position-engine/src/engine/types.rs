//! Request and result types for position calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::convert::PriceOrPips;
use crate::catalog::AssetClass;
use crate::policy::RiskLevel;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Long position: profit when price rises.
    Buy,
    /// Short position: profit when price falls.
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Commission model for a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "rate")]
pub enum Commission {
    /// Flat rate per lot, charged round trip (open plus close).
    PerLot(Decimal),
    /// Flat rate per trade.
    PerTrade(Decimal),
}

/// One position-sizing request.
///
/// Exactly one of `risk_percentage` / `risk_amount` must be supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Instrument symbol (resolved against the catalog by the caller).
    pub symbol: String,
    /// Trade direction.
    pub direction: Direction,
    /// Entry price; must be positive.
    pub entry_price: Decimal,
    /// Stop-loss level, as a price or a pip distance.
    pub stop_loss: PriceOrPips,
    /// Optional take-profit level.
    #[serde(default)]
    pub take_profit: Option<PriceOrPips>,
    /// Account capital in the account currency; must be positive.
    pub account_capital: Decimal,
    /// Risk as a percentage of capital, in (0, 100].
    #[serde(default)]
    pub risk_percentage: Option<Decimal>,
    /// Risk as an absolute amount in the account currency.
    #[serde(default)]
    pub risk_amount: Option<Decimal>,
    /// Account leverage; 1 means no margin reduction.
    #[serde(default = "default_leverage")]
    pub leverage: Decimal,
    /// Optional commission model.
    #[serde(default)]
    pub commission: Option<Commission>,
    /// Optional current market price for unrealized-performance figures.
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Currency the capital and risk amounts are denominated in.
    #[serde(default = "default_account_currency")]
    pub account_currency: String,
}

impl Default for CalculationRequest {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            direction: Direction::Buy,
            entry_price: Decimal::ZERO,
            stop_loss: PriceOrPips::Price(Decimal::ZERO),
            take_profit: None,
            account_capital: Decimal::ZERO,
            risk_percentage: None,
            risk_amount: None,
            leverage: default_leverage(),
            commission: None,
            current_price: None,
            account_currency: default_account_currency(),
        }
    }
}

const fn default_leverage() -> Decimal {
    Decimal::ONE
}

fn default_account_currency() -> String {
    "USD".to_string()
}

/// Result of one position calculation.
///
/// All monetary figures are in the account currency unless noted. The
/// reported `risk_amount` is recomputed from the floored lot size, so the
/// result stays internally consistent with the size actually tradable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Instrument symbol, normalized uppercase.
    pub symbol: String,
    /// Trade direction.
    pub direction: Direction,
    /// Asset class of the instrument.
    pub asset_class: AssetClass,
    /// Recommended position size in lots, floored to the instrument's
    /// lot step.
    pub lot_size: Decimal,
    /// Effective monetary risk for the floored lot size.
    pub risk_amount: Decimal,
    /// Effective risk as a percentage of capital.
    pub risk_percentage: Decimal,
    /// Stop distance in pips.
    pub stop_distance_pips: Decimal,
    /// Take-profit distance in pips, when a target was supplied.
    pub take_profit_distance_pips: Option<Decimal>,
    /// Monetary value of a one-pip move for the recommended lot size.
    pub pip_value: Decimal,
    /// Notional position value (`lot * contract size * entry`), in the
    /// instrument's quote currency.
    pub position_value: Decimal,
    /// Margin reserved by leverage, in the instrument's quote currency.
    pub margin_required: Decimal,
    /// Potential profit at the target, net of commission.
    pub potential_profit: Option<Decimal>,
    /// Target distance divided by stop distance.
    pub risk_reward_ratio: Option<Decimal>,
    /// Commission charged for the trade.
    pub commission_cost: Decimal,
    /// Signed pip distance from entry to the current price.
    pub unrealized_pips: Option<Decimal>,
    /// Unrealized profit or loss at the current price.
    pub unrealized_profit: Option<Decimal>,
    /// Categorical risk level for the requested risk percentage.
    pub risk_level: RiskLevel,
    /// Human-readable cautions.
    pub warnings: Vec<String>,
    /// Human-readable suggestions.
    pub recommendations: Vec<String>,
}
