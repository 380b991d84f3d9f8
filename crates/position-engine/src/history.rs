//! Caller-owned, bounded calculation history.
//!
//! The engine itself is stateless; callers that want a "recent
//! calculations" list (journal replay, the calculator page) keep one of
//! these. The buffer holds the most recent `capacity` results and evicts
//! the oldest on overflow.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::CalculationResult;
use crate::policy::RiskLevel;

/// One stored calculation with its capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The calculation result.
    pub result: CalculationResult,
    /// When the result was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Ring buffer of the most recent calculation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationHistory {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl CalculationHistory {
    /// Create a history bounded to `capacity` entries (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a result now.
    pub fn push(&mut self, result: CalculationResult) {
        self.push_at(result, Utc::now());
    }

    /// Record a result with an explicit timestamp.
    pub fn push_at(&mut self, result: CalculationResult, recorded_at: DateTime<Utc>) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(HistoryRecord {
            result,
            recorded_at,
        });
    }

    /// Records, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter().rev()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records retained.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Summarize the stored records.
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        let total = self.records.len();
        let mut by_risk_level: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_symbol: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total_risk = Decimal::ZERO;
        let mut conservative = 0usize;
        let mut aggressive = 0usize;

        for record in &self.records {
            *by_risk_level
                .entry(record.result.risk_level.to_string())
                .or_default() += 1;
            *by_symbol.entry(record.result.symbol.as_str()).or_default() += 1;
            total_risk += record.result.risk_amount;
            match record.result.risk_level {
                RiskLevel::Low => conservative += 1,
                RiskLevel::High | RiskLevel::Extreme => aggressive += 1,
                RiskLevel::Medium => {}
            }
        }

        // BTreeMap keeps ties deterministic: the lexicographically first
        // symbol among the most frequent wins.
        let mut most_used_symbol = None;
        let mut best_count = 0usize;
        for (symbol, count) in &by_symbol {
            if *count > best_count {
                best_count = *count;
                most_used_symbol = Some((*symbol).to_string());
            }
        }

        let average_risk_amount = if total == 0 {
            Decimal::ZERO
        } else {
            total_risk / Decimal::from(total)
        };

        HistoryStats {
            total_calculations: total,
            most_used_symbol,
            average_risk_amount,
            by_risk_level,
            conservative_trader: conservative > aggressive,
        }
    }
}

/// Usage summary over a [`CalculationHistory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Number of stored calculations.
    pub total_calculations: usize,
    /// Symbol appearing most often, if any.
    pub most_used_symbol: Option<String>,
    /// Mean effective risk amount.
    pub average_risk_amount: Decimal,
    /// Calculation count per risk level.
    pub by_risk_level: BTreeMap<String, usize>,
    /// More low-risk than high/extreme-risk calculations.
    pub conservative_trader: bool,
}
