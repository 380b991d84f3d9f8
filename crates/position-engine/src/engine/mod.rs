//! Position-sizing engine.
//!
//! The single entry point is [`PositionCalculator::calculate`]: given a
//! [`CalculationRequest`] and a resolved instrument, it derives the
//! recommended lot size, the effective risk, take-profit metrics, margin,
//! commission, a categorical risk level, and advisory output.
//!
//! # Example
//!
//! ```rust,ignore
//! use position_engine::{
//!     CalculationRequest, Direction, InstrumentCatalog, NoOpRateSource,
//!     PositionCalculator, PriceOrPips,
//! };
//! use rust_decimal_macros::dec;
//!
//! let catalog = InstrumentCatalog::builtin();
//! let calculator = PositionCalculator::default();
//!
//! let request = CalculationRequest {
//!     symbol: "EURUSD".to_string(),
//!     direction: Direction::Buy,
//!     entry_price: dec!(1.0850),
//!     stop_loss: PriceOrPips::Price(dec!(1.0800)),
//!     account_capital: dec!(10000),
//!     risk_percentage: Some(dec!(1)),
//!     ..Default::default()
//! };
//!
//! let result = calculator.calculate_for_symbol(&catalog, &request, &NoOpRateSource)?;
//! assert_eq!(result.lot_size, dec!(0.2)); // 100 USD over 50 pips at 10 USD/pip
//! ```

mod advice;
mod calculator;
mod convert;
mod types;

pub use calculator::PositionCalculator;
pub use convert::{LevelKind, PriceOrPips, price_to_pips};
pub use types::{CalculationRequest, CalculationResult, Commission, Direction};
