// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::default_trait_access
    )
)]

//! Position Engine - Rust Core Library
//!
//! Deterministic position-sizing and risk-calculation engine for the
//! MindTrader trading tools. The engine is a pure function over its
//! inputs: no internal state, no I/O beyond the [`rates::RateSource`]
//! port, no ordering constraints between calls.
//!
//! # Modules
//!
//! - [`catalog`]: immutable instrument table (symbol, pip size, contract
//!   size, quote currency) with case-insensitive lookup and filtered
//!   listing
//! - [`engine`]: the calculation entry point, request/result types, and
//!   pip/price conversion
//! - [`policy`]: configurable risk-level thresholds and advisory cut points
//! - [`rates`]: external conversion-rate and price port
//! - [`history`]: caller-owned bounded list of recent results
//!
//! All failures are typed ([`error::EngineError`]) and surfaced to the
//! caller; the engine never logs, never retries, and never substitutes a
//! default for a missing rate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Instrument catalog: symbol resolution and listing.
pub mod catalog;

/// Position-sizing engine and its request/result types.
pub mod engine;

/// Error taxonomy shared by catalog and engine.
pub mod error;

/// Bounded calculation history for callers.
pub mod history;

/// Risk-level thresholds and advisory policy.
pub mod policy;

/// External rate/price source port.
pub mod rates;

pub use catalog::{AssetClass, CatalogFilter, Instrument, InstrumentCatalog};
pub use engine::{
    CalculationRequest, CalculationResult, Commission, Direction, LevelKind, PositionCalculator,
    PriceOrPips, price_to_pips,
};
pub use error::EngineError;
pub use history::{CalculationHistory, HistoryRecord, HistoryStats};
pub use policy::{RiskLevel, RiskPolicy};
pub use rates::{NoOpRateSource, RateSource, StaticRateSource};
