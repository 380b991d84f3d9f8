//! Lossless conversion between pip distances and absolute price levels.
//!
//! Stop-loss and take-profit levels may be supplied either way; the two
//! representations convert exactly given direction, entry price, and pip
//! size, so the conversion lives here once instead of at every call site.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Direction;

/// Role of a price level relative to the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    /// Protective stop: sits against the trade direction.
    Stop,
    /// Profit target: sits with the trade direction.
    Target,
}

/// A stop or target level, as an absolute price or a pip distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceOrPips {
    /// Absolute price level.
    Price(Decimal),
    /// Distance from the entry price, in pips.
    Pips(Decimal),
}

impl PriceOrPips {
    /// Resolve the level to an absolute price.
    ///
    /// A stop on a buy sits below the entry and a target above it; both are
    /// mirrored for a sell. An absolute price passes through unchanged.
    #[must_use]
    pub fn resolve(
        &self,
        kind: LevelKind,
        direction: Direction,
        entry_price: Decimal,
        pip_size: Decimal,
    ) -> Decimal {
        match *self {
            Self::Price(price) => price,
            Self::Pips(pips) => {
                let offset = pips * pip_size;
                let below = match (kind, direction) {
                    (LevelKind::Stop, Direction::Buy) | (LevelKind::Target, Direction::Sell) => {
                        true
                    }
                    (LevelKind::Stop, Direction::Sell) | (LevelKind::Target, Direction::Buy) => {
                        false
                    }
                };
                if below {
                    entry_price - offset
                } else {
                    entry_price + offset
                }
            }
        }
    }
}

/// Unsigned distance between a price level and the entry, in pips.
#[must_use]
pub fn price_to_pips(entry_price: Decimal, price: Decimal, pip_size: Decimal) -> Decimal {
    (entry_price - price).abs() / pip_size
}
