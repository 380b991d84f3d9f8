//! Rate source port: external currency-conversion and price lookups.
//!
//! The calculator depends on this abstraction rather than a concrete feed.
//! An unavailable rate is reported as `None` and surfaced by the calculator
//! as [`EngineError::RateUnavailable`](crate::error::EngineError::RateUnavailable);
//! the engine never assumes a 1:1 rate across differing currencies. Retry
//! and timeout policy belong to the implementation, not the engine.

use std::collections::HashMap;

use rust_decimal::Decimal;

/// Port for conversion rates and spot prices.
pub trait RateSource {
    /// Conversion rate from one currency into another, when available.
    fn conversion_rate(&self, from: &str, to: &str) -> Option<Decimal>;

    /// Current price for a symbol, when available.
    ///
    /// Used only for the optional unrealized-performance figures; the
    /// calculation itself never depends on it.
    fn current_price(&self, _symbol: &str) -> Option<Decimal> {
        None
    }
}

/// Rate source that never resolves anything.
///
/// Suitable when every instrument quotes in the account currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRateSource;

impl RateSource for NoOpRateSource {
    fn conversion_rate(&self, _from: &str, _to: &str) -> Option<Decimal> {
        None
    }
}

/// In-memory rate source backed by fixed tables.
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    rates: HashMap<(String, String), Decimal>,
    prices: HashMap<String, Decimal>,
}

impl StaticRateSource {
    /// Create an empty rate source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a conversion rate.
    #[must_use]
    pub fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> Self {
        self.rates
            .insert((from.to_uppercase(), to.to_uppercase()), rate);
        self
    }

    /// Add a current price for a symbol.
    #[must_use]
    pub fn with_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.prices.insert(symbol.to_uppercase(), price);
        self
    }
}

impl RateSource for StaticRateSource {
    fn conversion_rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates
            .get(&(from.to_uppercase(), to.to_uppercase()))
            .copied()
    }

    fn current_price(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(&symbol.to_uppercase()).copied()
    }
}
