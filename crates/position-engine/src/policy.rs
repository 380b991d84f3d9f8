//! Risk policy: classification thresholds and advisory cut points.
//!
//! The exact boundaries are a policy choice, not a numeric contract, so they
//! live in a serde-deserializable struct with conservative defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical risk level derived from the requested risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// At or below the low threshold.
    Low,
    /// Above low, at or below the medium threshold.
    Medium,
    /// Above medium, at or below the high threshold.
    High,
    /// Above the high threshold.
    Extreme,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Extreme => write!(f, "extreme"),
        }
    }
}

/// Risk-level thresholds and advisory cut points.
///
/// All percentage fields are expressed against account capital
/// (`1` means 1%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Upper bound of the low risk band.
    #[serde(default = "default_low_max_pct")]
    pub low_max_pct: Decimal,
    /// Upper bound of the medium risk band.
    #[serde(default = "default_medium_max_pct")]
    pub medium_max_pct: Decimal,
    /// Upper bound of the high risk band; anything above is extreme.
    #[serde(default = "default_high_max_pct")]
    pub high_max_pct: Decimal,
    /// Risk percentage above which a warning is emitted.
    #[serde(default = "default_warn_risk_pct")]
    pub warn_risk_pct: Decimal,
    /// Risk percentage below which the position is flagged as very
    /// conservative.
    #[serde(default = "default_conservative_risk_pct")]
    pub conservative_risk_pct: Decimal,
    /// Risk/reward ratio below which a warning is emitted.
    #[serde(default = "default_min_risk_reward")]
    pub min_risk_reward: Decimal,
    /// Risk/reward ratio at or above which the setup is commended.
    #[serde(default = "default_good_risk_reward")]
    pub good_risk_reward: Decimal,
    /// Share of capital consumed by margin above which a warning is emitted.
    #[serde(default = "default_margin_warn_pct")]
    pub margin_warn_pct: Decimal,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            low_max_pct: default_low_max_pct(),
            medium_max_pct: default_medium_max_pct(),
            high_max_pct: default_high_max_pct(),
            warn_risk_pct: default_warn_risk_pct(),
            conservative_risk_pct: default_conservative_risk_pct(),
            min_risk_reward: default_min_risk_reward(),
            good_risk_reward: default_good_risk_reward(),
            margin_warn_pct: default_margin_warn_pct(),
        }
    }
}

impl RiskPolicy {
    /// Map a risk percentage onto its categorical level.
    ///
    /// Total and monotonic: every percentage maps to exactly one level, and
    /// a larger percentage never maps to a lower level.
    #[must_use]
    pub fn classify(&self, risk_pct: Decimal) -> RiskLevel {
        if risk_pct <= self.low_max_pct {
            RiskLevel::Low
        } else if risk_pct <= self.medium_max_pct {
            RiskLevel::Medium
        } else if risk_pct <= self.high_max_pct {
            RiskLevel::High
        } else {
            RiskLevel::Extreme
        }
    }
}

const fn default_low_max_pct() -> Decimal {
    Decimal::from_parts(1, 0, 0, false, 0) // 1
}

const fn default_medium_max_pct() -> Decimal {
    Decimal::from_parts(2, 0, 0, false, 0) // 2
}

const fn default_high_max_pct() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 0) // 5
}

const fn default_warn_risk_pct() -> Decimal {
    Decimal::from_parts(3, 0, 0, false, 0) // 3
}

const fn default_conservative_risk_pct() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 1) // 0.5
}

const fn default_min_risk_reward() -> Decimal {
    Decimal::from_parts(15, 0, 0, false, 1) // 1.5
}

const fn default_good_risk_reward() -> Decimal {
    Decimal::from_parts(3, 0, 0, false, 0) // 3
}

const fn default_margin_warn_pct() -> Decimal {
    Decimal::from_parts(30, 0, 0, false, 0) // 30
}
