//! Instrument catalog: symbol to trading-specification resolution.
//!
//! The catalog is an immutable table built once at startup and shared
//! freely across callers; lookups are case-normalized and listing honors
//! an optional asset-class filter combined (AND) with a free-text search.

mod builtin;

use std::collections::{HashMap, HashSet};
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Asset class of a tradable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Currency pairs (EURUSD, USDJPY, ...).
    Forex,
    /// Precious metals (gold, silver).
    Metals,
    /// Crypto-currencies.
    Crypto,
    /// Equity indices.
    Indices,
    /// Raw commodities (oil, ...).
    Commodities,
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forex => write!(f, "forex"),
            Self::Metals => write!(f, "metals"),
            Self::Crypto => write!(f, "crypto"),
            Self::Indices => write!(f, "indices"),
            Self::Commodities => write!(f, "commodities"),
        }
    }
}

/// Trading specification of a single instrument.
///
/// Invariants (enforced by [`InstrumentCatalog::from_instruments`]):
/// `pip_size > 0`, `contract_size > 0`, `lot_step > 0`, `min_lot <= max_lot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Unique symbol, stored uppercase.
    pub symbol: String,
    /// Human-readable display name.
    pub name: String,
    /// Asset class.
    pub asset_class: AssetClass,
    /// Smallest quoted increment treated as one pip.
    pub pip_size: Decimal,
    /// Units of the base instrument per 1.0 lot.
    pub contract_size: Decimal,
    /// Currency the price (and pip value) is denominated in.
    pub quote_currency: String,
    /// Smallest tradable lot.
    pub min_lot: Decimal,
    /// Largest tradable lot.
    pub max_lot: Decimal,
    /// Tradable lot increment.
    pub lot_step: Decimal,
}

impl Instrument {
    /// Monetary value of a one-pip move for one lot, in the quote currency.
    #[must_use]
    pub fn pip_value_per_lot(&self) -> Decimal {
        self.contract_size * self.pip_size
    }
}

/// Optional filters for [`InstrumentCatalog::list`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Keep only instruments of this asset class.
    #[serde(default)]
    pub asset_class: Option<AssetClass>,
    /// Case-insensitive substring match against symbol or display name.
    #[serde(default)]
    pub search: Option<String>,
}

/// Immutable symbol-keyed instrument table.
#[derive(Debug, Clone)]
pub struct InstrumentCatalog {
    instruments: Vec<Instrument>,
    index: HashMap<String, usize>,
}

impl InstrumentCatalog {
    /// Build the catalog of built-in instruments.
    #[must_use]
    pub fn builtin() -> Self {
        let catalog = Self::index_instruments(builtin::builtin_instruments());
        tracing::debug!(
            instruments = catalog.instruments.len(),
            "instrument catalog initialized"
        );
        catalog
    }

    /// Build a catalog from caller-supplied instruments.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInstrument`] when an entry violates an
    /// instrument invariant or duplicates a symbol already present.
    pub fn from_instruments(instruments: Vec<Instrument>) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        for instrument in &instruments {
            Self::validate(instrument)?;
            let key = instrument.symbol.trim().to_uppercase();
            if !seen.insert(key) {
                return Err(EngineError::InvalidInstrument {
                    symbol: instrument.symbol.clone(),
                    reason: "duplicate symbol".to_string(),
                });
            }
        }
        Ok(Self::index_instruments(instruments))
    }

    /// Resolve a symbol to its instrument, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownInstrument`] when the symbol is absent.
    pub fn lookup(&self, symbol: &str) -> Result<&Instrument, EngineError> {
        self.index
            .get(&symbol.trim().to_uppercase())
            .map(|&i| &self.instruments[i])
            .ok_or_else(|| EngineError::UnknownInstrument {
                symbol: symbol.to_string(),
            })
    }

    /// List instruments matching the filter, in catalog-insertion order.
    #[must_use]
    pub fn list(&self, filter: &CatalogFilter) -> Vec<&Instrument> {
        let search = filter.search.as_ref().map(|s| s.to_uppercase());
        self.instruments
            .iter()
            .filter(|instrument| {
                filter
                    .asset_class
                    .is_none_or(|class| instrument.asset_class == class)
            })
            .filter(|instrument| {
                search.as_ref().is_none_or(|needle| {
                    instrument.symbol.to_uppercase().contains(needle)
                        || instrument.name.to_uppercase().contains(needle)
                })
            })
            .collect()
    }

    /// Number of instruments in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    fn validate(instrument: &Instrument) -> Result<(), EngineError> {
        let fail = |reason: &str| EngineError::InvalidInstrument {
            symbol: instrument.symbol.clone(),
            reason: reason.to_string(),
        };
        if instrument.symbol.trim().is_empty() {
            return Err(fail("symbol is empty"));
        }
        if instrument.pip_size <= Decimal::ZERO {
            return Err(fail("pip size must be positive"));
        }
        if instrument.contract_size <= Decimal::ZERO {
            return Err(fail("contract size must be positive"));
        }
        if instrument.lot_step <= Decimal::ZERO {
            return Err(fail("lot step must be positive"));
        }
        if instrument.min_lot <= Decimal::ZERO || instrument.min_lot > instrument.max_lot {
            return Err(fail("lot range is invalid"));
        }
        Ok(())
    }

    fn index_instruments(instruments: Vec<Instrument>) -> Self {
        let index = instruments
            .iter()
            .enumerate()
            .map(|(i, instrument)| (instrument.symbol.trim().to_uppercase(), i))
            .collect();
        Self { instruments, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = InstrumentCatalog::builtin();
        let instrument = catalog.lookup("eurusd").expect("should resolve eurusd");
        assert_eq!(instrument.symbol, "EURUSD");
        assert_eq!(instrument.pip_size, dec!(0.0001));
        assert_eq!(instrument.pip_value_per_lot(), dec!(10));
    }

    #[test]
    fn test_lookup_unknown_symbol() {
        let catalog = InstrumentCatalog::builtin();
        let err = catalog.lookup("FOOBAR").expect_err("should fail");
        assert_eq!(
            err,
            EngineError::UnknownInstrument {
                symbol: "FOOBAR".to_string()
            }
        );
    }

    #[test]
    fn test_list_unfiltered_preserves_insertion_order() {
        let catalog = InstrumentCatalog::builtin();
        let all = catalog.list(&CatalogFilter::default());
        assert_eq!(all.len(), catalog.len());
        assert_eq!(all[0].symbol, "EURUSD");
    }

    #[test]
    fn test_list_filters_are_anded() {
        let catalog = InstrumentCatalog::builtin();
        let filter = CatalogFilter {
            asset_class: Some(AssetClass::Metals),
            search: Some("gold".to_string()),
        };
        let matched = catalog.list(&filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].symbol, "XAUUSD");

        // Same search term under the wrong class matches nothing.
        let filter = CatalogFilter {
            asset_class: Some(AssetClass::Crypto),
            search: Some("gold".to_string()),
        };
        assert!(catalog.list(&filter).is_empty());
    }

    #[test]
    fn test_list_search_matches_symbol_substring() {
        let catalog = InstrumentCatalog::builtin();
        let filter = CatalogFilter {
            asset_class: None,
            search: Some("usd".to_string()),
        };
        let matched = catalog.list(&filter);
        assert!(matched.iter().any(|i| i.symbol == "BTCUSD"));
        assert!(matched.iter().all(|i| {
            i.symbol.contains("USD") || i.name.to_uppercase().contains("USD")
        }));
    }

    #[test]
    fn test_from_instruments_rejects_zero_pip_size() {
        let mut instrument = InstrumentCatalog::builtin()
            .lookup("EURUSD")
            .expect("should resolve")
            .clone();
        instrument.pip_size = Decimal::ZERO;
        let err = InstrumentCatalog::from_instruments(vec![instrument]).expect_err("should fail");
        assert!(matches!(err, EngineError::InvalidInstrument { .. }));
    }

    #[test]
    fn test_from_instruments_rejects_duplicate_symbol() {
        let instrument = InstrumentCatalog::builtin()
            .lookup("EURUSD")
            .expect("should resolve")
            .clone();
        let mut duplicate = instrument.clone();
        duplicate.symbol = "eurusd".to_string();
        let err = InstrumentCatalog::from_instruments(vec![instrument, duplicate])
            .expect_err("should fail");
        assert_eq!(
            err,
            EngineError::InvalidInstrument {
                symbol: "eurusd".to_string(),
                reason: "duplicate symbol".to_string()
            }
        );
    }
}
