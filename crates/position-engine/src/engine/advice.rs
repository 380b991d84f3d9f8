//! Advisory output: warnings and recommendations attached to a result.
//!
//! Everything here is non-fatal commentary for the caller to surface;
//! cut points come from the [`RiskPolicy`]. Output order is fixed so
//! identical inputs produce identical results.

use rust_decimal::Decimal;

use super::types::Direction;
use crate::catalog::{AssetClass, Instrument};
use crate::policy::RiskPolicy;

/// Inputs the advisory pass looks at.
pub(super) struct AdviceContext<'a> {
    pub instrument: &'a Instrument,
    pub direction: Direction,
    pub entry_price: Decimal,
    pub stop_price: Decimal,
    /// Risk percentage as requested (before lot flooring).
    pub requested_risk_pct: Decimal,
    pub lot_size: Decimal,
    /// Lot was reduced to the instrument maximum.
    pub capped_at_max: bool,
    pub risk_reward_ratio: Option<Decimal>,
    /// Margin converted to the account currency.
    pub margin_in_account_currency: Decimal,
    pub account_capital: Decimal,
}

/// Build the warning and recommendation lists for a successful calculation.
pub(super) fn build_advice(
    ctx: &AdviceContext<'_>,
    policy: &RiskPolicy,
) -> (Vec<String>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    // Stop on the wrong side of the entry contradicts the declared
    // direction; the math proceeded on absolute distances.
    let stop_contradicts = match ctx.direction {
        Direction::Buy => ctx.stop_price > ctx.entry_price,
        Direction::Sell => ctx.stop_price < ctx.entry_price,
    };
    if stop_contradicts {
        warnings.push(format!(
            "Stop loss {} does not protect a {} from {}; distances were taken as absolute values",
            ctx.stop_price, ctx.direction, ctx.entry_price
        ));
    }

    let risk_pct = ctx.requested_risk_pct.round_dp(2).normalize();
    if ctx.requested_risk_pct > policy.warn_risk_pct {
        warnings.push(format!(
            "High risk: {risk_pct}% of capital at stake - consider reducing the position"
        ));
    } else if ctx.requested_risk_pct < policy.conservative_risk_pct {
        recommendations.push(format!(
            "Very conservative risk ({risk_pct}% of capital) - there is room to size up"
        ));
    } else {
        recommendations.push(format!("Risk at {risk_pct}% of capital is within policy"));
    }

    if let Some(ratio) = ctx.risk_reward_ratio {
        let rounded = ratio.round_dp(2).normalize();
        if ratio < policy.min_risk_reward {
            warnings.push(format!(
                "Risk/reward ratio {rounded} is below {} - look for a better target",
                policy.min_risk_reward
            ));
        } else if ratio >= policy.good_risk_reward {
            recommendations.push(format!("Excellent risk/reward ratio of {rounded}:1"));
        }
    }

    if ctx.account_capital > Decimal::ZERO {
        let margin_pct =
            ctx.margin_in_account_currency / ctx.account_capital * Decimal::ONE_HUNDRED;
        if margin_pct > policy.margin_warn_pct {
            warnings.push(format!(
                "Margin consumes {}% of capital - margin call risk",
                margin_pct.round_dp(1).normalize()
            ));
        }
    }

    if ctx.lot_size < ctx.instrument.min_lot {
        warnings.push(format!(
            "Calculated size {} is below the minimum tradable lot {}",
            ctx.lot_size, ctx.instrument.min_lot
        ));
    }
    if ctx.capped_at_max {
        warnings.push(format!(
            "Position capped at the maximum lot size of {}",
            ctx.instrument.max_lot
        ));
    }

    match ctx.instrument.asset_class {
        AssetClass::Crypto => recommendations
            .push("Crypto markets are highly volatile - watch upcoming news".to_string()),
        AssetClass::Metals => recommendations
            .push("Precious metals are sensitive to US economic data and inflation".to_string()),
        _ => {}
    }
    if ctx.instrument.symbol.ends_with("JPY") {
        recommendations.push("JPY pair - watch Bank of Japan announcements".to_string());
    }

    (warnings, recommendations)
}
