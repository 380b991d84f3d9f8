//! Core position-sizing calculation.

use rust_decimal::Decimal;

use super::advice::{AdviceContext, build_advice};
use super::convert::{LevelKind, price_to_pips};
use super::types::{CalculationRequest, CalculationResult, Commission, Direction};
use crate::catalog::{Instrument, InstrumentCatalog};
use crate::error::EngineError;
use crate::policy::RiskPolicy;
use crate::rates::RateSource;

/// Stateless position calculator.
///
/// Every call is a pure function of the request, the instrument, and the
/// rate source; identical inputs against an unchanged rate source yield
/// identical results. The calculator holds only the risk policy and may be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct PositionCalculator {
    policy: RiskPolicy,
}

impl PositionCalculator {
    /// Create a calculator with a custom risk policy.
    #[must_use]
    pub const fn with_policy(policy: RiskPolicy) -> Self {
        Self { policy }
    }

    /// The risk policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// Resolve the request's symbol against the catalog, then calculate.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownInstrument`] for an unresolvable
    /// symbol, otherwise any error [`Self::calculate`] can produce.
    pub fn calculate_for_symbol(
        &self,
        catalog: &InstrumentCatalog,
        request: &CalculationRequest,
        rates: &dyn RateSource,
    ) -> Result<CalculationResult, EngineError> {
        let instrument = catalog.lookup(&request.symbol)?;
        self.calculate(request, instrument, rates)
    }

    /// Compute the recommended lot size and derived risk metrics.
    ///
    /// The lot size is floored (not rounded) to the instrument's lot step,
    /// so the realized risk never exceeds the requested risk amount; the
    /// reported risk figures are recomputed from the floored size.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidInput`] for non-positive prices, capital, or
    ///   leverage, or when not exactly one risk specifier is supplied.
    /// - [`EngineError::ZeroRiskDistance`] when the stop equals the entry.
    /// - [`EngineError::RateUnavailable`] when the instrument quotes in a
    ///   currency other than the account currency and the rate source has
    ///   no conversion for it.
    pub fn calculate(
        &self,
        request: &CalculationRequest,
        instrument: &Instrument,
        rates: &dyn RateSource,
    ) -> Result<CalculationResult, EngineError> {
        let (requested_risk, requested_risk_pct) = validate(request)?;

        let entry = request.entry_price;
        let pip_size = instrument.pip_size;

        let stop_price =
            request
                .stop_loss
                .resolve(LevelKind::Stop, request.direction, entry, pip_size);
        if stop_price <= Decimal::ZERO {
            return Err(EngineError::InvalidInput(
                "Stop loss must resolve to a positive price".to_string(),
            ));
        }
        if stop_price == entry {
            return Err(EngineError::ZeroRiskDistance);
        }
        let stop_pips = price_to_pips(entry, stop_price, pip_size);

        // Pip value for one lot, converted into the account currency.
        let mut pip_value_per_lot = instrument.pip_value_per_lot();
        let quote = instrument.quote_currency.to_uppercase();
        let account = request.account_currency.to_uppercase();
        let conversion = if quote == account {
            Decimal::ONE
        } else {
            let rate = rates
                .conversion_rate(&quote, &account)
                .filter(|rate| *rate > Decimal::ZERO)
                .ok_or_else(|| EngineError::RateUnavailable {
                    from: quote.clone(),
                    to: account.clone(),
                })?;
            pip_value_per_lot *= rate;
            rate
        };

        // Floor to the lot step and cap at the instrument maximum; both
        // only ever shrink the position.
        let raw_lot = requested_risk / (stop_pips * pip_value_per_lot);
        let mut lot_size = floor_to_step(raw_lot, instrument.lot_step);
        let capped_at_max = lot_size > instrument.max_lot;
        if capped_at_max {
            lot_size = instrument.max_lot;
        }

        let risk_amount = lot_size * stop_pips * pip_value_per_lot;
        let risk_percentage = risk_amount / request.account_capital * Decimal::ONE_HUNDRED;
        let pip_value = lot_size * pip_value_per_lot;

        let commission_cost = match request.commission {
            None => Decimal::ZERO,
            // Round trip: opening and closing legs both pay.
            Some(Commission::PerLot(rate)) => lot_size * rate * Decimal::TWO,
            Some(Commission::PerTrade(rate)) => rate,
        };

        let mut take_profit_distance_pips = None;
        let mut potential_profit = None;
        let mut risk_reward_ratio = None;
        if let Some(target) = request.take_profit {
            let target_price = target.resolve(LevelKind::Target, request.direction, entry, pip_size);
            if target_price <= Decimal::ZERO {
                return Err(EngineError::InvalidInput(
                    "Take profit must resolve to a positive price".to_string(),
                ));
            }
            let target_pips = price_to_pips(entry, target_price, pip_size);
            take_profit_distance_pips = Some(target_pips);
            potential_profit = Some(lot_size * target_pips * pip_value_per_lot - commission_cost);
            risk_reward_ratio = Some(target_pips / stop_pips);
        }

        let position_value = lot_size * instrument.contract_size * entry;
        let margin_required = position_value / request.leverage;

        let (unrealized_pips, unrealized_profit) = request
            .current_price
            .or_else(|| rates.current_price(&instrument.symbol))
            .filter(|price| *price > Decimal::ZERO)
            .map_or((None, None), |price| {
                let signed = match request.direction {
                    Direction::Buy => price - entry,
                    Direction::Sell => entry - price,
                };
                let pips = signed / pip_size;
                (Some(pips), Some(pips * pip_value_per_lot * lot_size))
            });

        let (warnings, recommendations) = build_advice(
            &AdviceContext {
                instrument,
                direction: request.direction,
                entry_price: entry,
                stop_price,
                requested_risk_pct,
                lot_size,
                capped_at_max,
                risk_reward_ratio,
                margin_in_account_currency: margin_required * conversion,
                account_capital: request.account_capital,
            },
            &self.policy,
        );

        Ok(CalculationResult {
            symbol: instrument.symbol.clone(),
            direction: request.direction,
            asset_class: instrument.asset_class,
            lot_size,
            risk_amount,
            risk_percentage,
            stop_distance_pips: stop_pips,
            take_profit_distance_pips,
            pip_value,
            position_value,
            margin_required,
            potential_profit,
            risk_reward_ratio,
            commission_cost,
            unrealized_pips,
            unrealized_profit,
            risk_level: self.policy.classify(requested_risk_pct),
            warnings,
            recommendations,
        })
    }
}

/// Validate request invariants and resolve the requested risk.
///
/// Returns the requested monetary risk and its percentage of capital.
fn validate(request: &CalculationRequest) -> Result<(Decimal, Decimal), EngineError> {
    if request.entry_price <= Decimal::ZERO {
        return Err(EngineError::InvalidInput(
            "Entry price must be positive".to_string(),
        ));
    }
    if request.account_capital <= Decimal::ZERO {
        return Err(EngineError::InvalidInput(
            "Account capital must be positive".to_string(),
        ));
    }
    if request.leverage <= Decimal::ZERO {
        return Err(EngineError::InvalidInput(
            "Leverage must be positive".to_string(),
        ));
    }

    match (request.risk_percentage, request.risk_amount) {
        (Some(_), Some(_)) => Err(EngineError::InvalidInput(
            "Supply either a risk percentage or a risk amount, not both".to_string(),
        )),
        (None, None) => Err(EngineError::InvalidInput(
            "A risk percentage or a risk amount is required".to_string(),
        )),
        (Some(pct), None) => {
            if pct <= Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(EngineError::InvalidInput(
                    "Risk percentage must be within (0, 100]".to_string(),
                ));
            }
            Ok((request.account_capital * pct / Decimal::ONE_HUNDRED, pct))
        }
        (None, Some(amount)) => {
            if amount <= Decimal::ZERO {
                return Err(EngineError::InvalidInput(
                    "Risk amount must be positive".to_string(),
                ));
            }
            Ok((amount, amount / request.account_capital * Decimal::ONE_HUNDRED))
        }
    }
}

/// Largest multiple of `step` not exceeding `value`.
fn floor_to_step(value: Decimal, step: Decimal) -> Decimal {
    (value / step).floor() * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::convert::PriceOrPips;
    use crate::rates::{NoOpRateSource, StaticRateSource};
    use rust_decimal_macros::dec;

    fn eurusd_request() -> CalculationRequest {
        CalculationRequest {
            symbol: "EURUSD".to_string(),
            direction: Direction::Buy,
            entry_price: dec!(1.0850),
            stop_loss: PriceOrPips::Price(dec!(1.0800)),
            account_capital: dec!(10000),
            risk_percentage: Some(dec!(1)),
            ..Default::default()
        }
    }

    fn calculate(request: &CalculationRequest) -> Result<CalculationResult, EngineError> {
        let catalog = InstrumentCatalog::builtin();
        PositionCalculator::default().calculate_for_symbol(&catalog, request, &NoOpRateSource)
    }

    #[test]
    fn test_eurusd_one_percent_risk() {
        let result = calculate(&eurusd_request()).expect("should calculate");
        // 100 USD risk over 50 pips at 10 USD/pip/lot.
        assert_eq!(result.stop_distance_pips, dec!(50));
        assert_eq!(result.lot_size, dec!(0.2));
        assert_eq!(result.risk_amount, dec!(100));
        assert_eq!(result.risk_percentage, dec!(1));
        assert_eq!(result.pip_value, dec!(2));
        assert_eq!(result.position_value, dec!(21700));
        assert_eq!(result.margin_required, dec!(21700));
        assert_eq!(result.risk_level, crate::policy::RiskLevel::Low);
        assert_eq!(result.take_profit_distance_pips, None);
        assert_eq!(result.risk_reward_ratio, None);
    }

    #[test]
    fn test_flooring_keeps_risk_under_request() {
        let mut request = eurusd_request();
        // 97 USD over 50 pips -> raw 0.194 lots, floored to 0.19.
        request.risk_percentage = None;
        request.risk_amount = Some(dec!(97));
        let result = calculate(&request).expect("should calculate");
        assert_eq!(result.lot_size, dec!(0.19));
        assert_eq!(result.risk_amount, dec!(95));
    }

    #[test]
    fn test_stop_as_pips_matches_stop_as_price() {
        let mut request = eurusd_request();
        request.stop_loss = PriceOrPips::Pips(dec!(50));
        let by_pips = calculate(&request).expect("should calculate");
        let by_price = calculate(&eurusd_request()).expect("should calculate");
        assert_eq!(by_pips, by_price);
    }

    #[test]
    fn test_take_profit_metrics() {
        let mut request = eurusd_request();
        request.take_profit = Some(PriceOrPips::Price(dec!(1.0950)));
        let result = calculate(&request).expect("should calculate");
        assert_eq!(result.take_profit_distance_pips, Some(dec!(100)));
        assert_eq!(result.risk_reward_ratio, Some(dec!(2)));
        // 0.2 lots * 100 pips * 10 USD.
        assert_eq!(result.potential_profit, Some(dec!(200)));
    }

    #[test]
    fn test_commission_reduces_potential_profit() {
        let mut request = eurusd_request();
        request.take_profit = Some(PriceOrPips::Price(dec!(1.0950)));
        request.commission = Some(Commission::PerLot(dec!(7)));
        let result = calculate(&request).expect("should calculate");
        // 0.2 lots * 7 * 2 legs = 2.80.
        assert_eq!(result.commission_cost, dec!(2.8));
        assert_eq!(result.potential_profit, Some(dec!(197.2)));

        request.commission = Some(Commission::PerTrade(dec!(5)));
        let result = calculate(&request).expect("should calculate");
        assert_eq!(result.commission_cost, dec!(5));
        assert_eq!(result.potential_profit, Some(dec!(195)));
    }

    #[test]
    fn test_leverage_reduces_margin() {
        let mut request = eurusd_request();
        request.leverage = dec!(30);
        let result = calculate(&request).expect("should calculate");
        assert_eq!(result.position_value, dec!(21700));
        assert_eq!(result.margin_required, dec!(21700) / dec!(30));
    }

    #[test]
    fn test_stop_equal_to_entry_is_zero_risk_distance() {
        let mut request = eurusd_request();
        request.stop_loss = PriceOrPips::Price(dec!(1.0850));
        assert_eq!(calculate(&request), Err(EngineError::ZeroRiskDistance));

        request.stop_loss = PriceOrPips::Pips(Decimal::ZERO);
        assert_eq!(calculate(&request), Err(EngineError::ZeroRiskDistance));
    }

    #[test]
    fn test_both_or_neither_risk_specifier_rejected() {
        let mut request = eurusd_request();
        request.risk_amount = Some(dec!(100));
        assert!(matches!(
            calculate(&request),
            Err(EngineError::InvalidInput(_))
        ));

        request.risk_percentage = None;
        request.risk_amount = None;
        assert!(matches!(
            calculate(&request),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_risk_percentage_rejected() {
        let mut request = eurusd_request();
        request.risk_percentage = Some(Decimal::ZERO);
        assert!(matches!(
            calculate(&request),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_positive_entry_and_capital_rejected() {
        let mut request = eurusd_request();
        request.entry_price = Decimal::ZERO;
        assert!(matches!(
            calculate(&request),
            Err(EngineError::InvalidInput(_))
        ));

        let mut request = eurusd_request();
        request.account_capital = dec!(-1);
        assert!(matches!(
            calculate(&request),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unknown_symbol_surfaces_before_calculation() {
        let mut request = eurusd_request();
        request.symbol = "FOOBAR".to_string();
        assert_eq!(
            calculate(&request),
            Err(EngineError::UnknownInstrument {
                symbol: "FOOBAR".to_string()
            })
        );
    }

    #[test]
    fn test_cross_currency_requires_rate() {
        let request = CalculationRequest {
            symbol: "USDJPY".to_string(),
            direction: Direction::Sell,
            entry_price: dec!(147.50),
            stop_loss: PriceOrPips::Price(dec!(148.00)),
            account_capital: dec!(10000),
            risk_percentage: Some(dec!(1)),
            ..Default::default()
        };
        assert_eq!(
            calculate(&request),
            Err(EngineError::RateUnavailable {
                from: "JPY".to_string(),
                to: "USD".to_string()
            })
        );

        let rates = StaticRateSource::new().with_rate("JPY", "USD", dec!(0.0068));
        let catalog = InstrumentCatalog::builtin();
        let result = PositionCalculator::default()
            .calculate_for_symbol(&catalog, &request, &rates)
            .expect("should calculate with rate");
        // 1000 JPY per pip per lot -> 6.80 USD; 100 USD over 50 pips.
        assert_eq!(result.stop_distance_pips, dec!(50));
        assert_eq!(result.lot_size, dec!(0.29));
        assert_eq!(result.risk_amount, dec!(0.29) * dec!(50) * dec!(6.8));
    }

    #[test]
    fn test_zero_conversion_rate_is_unavailable() {
        let request = CalculationRequest {
            symbol: "USDJPY".to_string(),
            direction: Direction::Buy,
            entry_price: dec!(147.50),
            stop_loss: PriceOrPips::Pips(dec!(50)),
            account_capital: dec!(10000),
            risk_percentage: Some(dec!(1)),
            ..Default::default()
        };
        let rates = StaticRateSource::new().with_rate("JPY", "USD", Decimal::ZERO);
        let catalog = InstrumentCatalog::builtin();
        let result = PositionCalculator::default().calculate_for_symbol(&catalog, &request, &rates);
        assert!(matches!(result, Err(EngineError::RateUnavailable { .. })));
    }

    #[test]
    fn test_direction_mismatch_warns_but_succeeds() {
        let mut request = eurusd_request();
        request.stop_loss = PriceOrPips::Price(dec!(1.0900));
        let result = calculate(&request).expect("should calculate");
        assert_eq!(result.stop_distance_pips, dec!(50));
        assert_eq!(result.lot_size, dec!(0.2));
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("absolute values"))
        );
    }

    #[test]
    fn test_unrealized_performance_from_request_price() {
        let mut request = eurusd_request();
        request.current_price = Some(dec!(1.0870));
        let result = calculate(&request).expect("should calculate");
        assert_eq!(result.unrealized_pips, Some(dec!(20)));
        // 20 pips * 10 USD * 0.2 lots.
        assert_eq!(result.unrealized_profit, Some(dec!(40)));
    }

    #[test]
    fn test_unrealized_performance_falls_back_to_rate_source() {
        let request = eurusd_request();
        let rates = StaticRateSource::new().with_price("EURUSD", dec!(1.0830));
        let catalog = InstrumentCatalog::builtin();
        let result = PositionCalculator::default()
            .calculate_for_symbol(&catalog, &request, &rates)
            .expect("should calculate");
        assert_eq!(result.unrealized_pips, Some(dec!(-20)));
        assert_eq!(result.unrealized_profit, Some(dec!(-40)));
    }

    #[test]
    fn test_lot_capped_at_instrument_maximum() {
        let request = CalculationRequest {
            symbol: "BTCUSD".to_string(),
            direction: Direction::Buy,
            entry_price: dec!(60000),
            stop_loss: PriceOrPips::Price(dec!(59990)),
            account_capital: dec!(100000000),
            risk_percentage: Some(dec!(2)),
            ..Default::default()
        };
        let result = calculate(&request).expect("should calculate");
        assert_eq!(result.lot_size, dec!(10));
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("maximum lot size"))
        );
    }

    #[test]
    fn test_tiny_capital_floors_to_zero_lots_with_warning() {
        let mut request = eurusd_request();
        request.account_capital = dec!(100);
        // 1 USD of risk over 50 pips cannot buy a 0.01 lot.
        let result = calculate(&request).expect("should calculate");
        assert_eq!(result.lot_size, Decimal::ZERO);
        assert_eq!(result.risk_amount, Decimal::ZERO);
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("below the minimum tradable lot"))
        );
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let mut request = eurusd_request();
        request.take_profit = Some(PriceOrPips::Pips(dec!(120)));
        let first = calculate(&request).expect("should calculate");
        let second = calculate(&request).expect("should calculate");
        assert_eq!(first, second);
    }
}
