//! Error types shared by the instrument catalog and the position calculator.

use thiserror::Error;

/// Error returned by catalog lookups and position calculations.
///
/// Every failure is surfaced as a typed variant so callers can render an
/// actionable message; the engine never falls back to a silent default.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Missing or out-of-range request field.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Stop loss equals the entry price, so the stop distance is zero and
    /// no position size can be derived.
    #[error("Stop loss cannot equal the entry price")]
    ZeroRiskDistance,

    /// Symbol absent from the instrument catalog.
    #[error("Unknown instrument '{symbol}'")]
    UnknownInstrument {
        /// The symbol that failed to resolve (as supplied by the caller).
        symbol: String,
    },

    /// Cross-currency pip value could not be resolved from the rate source.
    #[error("No conversion rate available from {from} to {to}")]
    RateUnavailable {
        /// Quote currency of the instrument.
        from: String,
        /// Account currency of the request.
        to: String,
    },

    /// Catalog entry violates an instrument invariant (non-positive pip
    /// size, duplicate symbol, ...).
    #[error("Invalid instrument '{symbol}': {reason}")]
    InvalidInstrument {
        /// Offending symbol.
        symbol: String,
        /// Violated invariant.
        reason: String,
    },
}
