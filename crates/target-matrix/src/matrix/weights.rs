use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::catalog::{criteria, find_criterion};
use super::input::RawInput;

pub const MIN_WEIGHT: u8 = 0;
pub const MAX_WEIGHT: u8 = 40;
pub const EXPECTED_TOTAL_WEIGHT: u32 = 100;

/// Analyst importance weights, one per catalog criterion.
///
/// Weights are relative multipliers, not a partition: ranking proceeds whatever the total is,
/// and [`WeightConfiguration::diagnostic`] only reports drift from 100. Weights are session
/// state and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightConfiguration {
    weights: BTreeMap<&'static str, u8>,
    locked: bool,
}

/// What a weight edit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WeightChange {
    Updated { previous: u8, current: u8 },
    Unchanged,
    /// Blank or non-numeric input; the prior weight is retained.
    Rejected,
    UnknownCriterion,
    Locked,
    Reset,
}

impl Default for WeightConfiguration {
    fn default() -> Self {
        Self::catalog_defaults()
    }
}

impl WeightConfiguration {
    pub fn catalog_defaults() -> Self {
        Self {
            weights: default_weights(),
            locked: false,
        }
    }

    /// Catalog defaults that ignore every edit.
    pub fn locked() -> Self {
        Self {
            weights: default_weights(),
            locked: true,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Clamps `raw` into 0-40 after rounding. Out-of-range input is never an error.
    pub fn set_weight(&mut self, criterion_id: &str, raw: impl Into<RawInput>) -> WeightChange {
        if self.locked {
            return WeightChange::Locked;
        }
        let Some(criterion) = find_criterion(criterion_id) else {
            return WeightChange::UnknownCriterion;
        };
        let Some(current) = raw.into().clamp_to(MIN_WEIGHT, MAX_WEIGHT) else {
            return WeightChange::Rejected;
        };

        let slot = self.weights.entry(criterion.id).or_insert(criterion.default_weight);
        let previous = *slot;
        if previous == current {
            return WeightChange::Unchanged;
        }
        *slot = current;
        debug!(criterion = criterion.id, previous, current, "weight updated");
        WeightChange::Updated { previous, current }
    }

    pub fn reset_to_defaults(&mut self) -> WeightChange {
        if self.locked {
            return WeightChange::Locked;
        }
        self.weights = default_weights();
        WeightChange::Reset
    }

    /// Configured weight, or 0 for ids outside the catalog.
    pub fn weight(&self, criterion_id: &str) -> u8 {
        self.weights.get(criterion_id).copied().unwrap_or(0)
    }

    /// Multiplier applied to a 1-10 score: weight / 10.
    pub fn multiplier(&self, criterion_id: &str) -> f64 {
        f64::from(self.weight(criterion_id)) / 10.0
    }

    pub fn total_weight(&self) -> u32 {
        self.weights.values().map(|weight| u32::from(*weight)).sum()
    }

    pub fn diagnostic(&self) -> WeightDiagnostic {
        WeightDiagnostic::for_total(self.total_weight())
    }

    /// Weights in catalog order alongside their defaults.
    pub fn entries(&self) -> Vec<WeightEntry> {
        criteria()
            .iter()
            .map(|criterion| WeightEntry {
                criterion_id: criterion.id,
                label: criterion.label,
                weight: self.weight(criterion.id),
                default_weight: criterion.default_weight,
            })
            .collect()
    }
}

fn default_weights() -> BTreeMap<&'static str, u8> {
    criteria()
        .iter()
        .map(|criterion| (criterion.id, criterion.default_weight))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightEntry {
    pub criterion_id: &'static str,
    pub label: &'static str,
    pub weight: u8,
    pub default_weight: u8,
}

/// Non-blocking warning state for weight totals that drift from 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightDiagnostic {
    pub total: u32,
    pub balanced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WeightDiagnostic {
    pub fn for_total(total: u32) -> Self {
        let balanced = total == EXPECTED_TOTAL_WEIGHT;
        let message = (!balanced)
            .then(|| format!("weights sum to {total} (should be {EXPECTED_TOTAL_WEIGHT})"));
        Self {
            total,
            balanced,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_total_one_hundred() {
        let weights = WeightConfiguration::default();
        assert_eq!(weights.total_weight(), 100);
        assert!(weights.diagnostic().balanced);
        assert_eq!(weights.diagnostic().message, None);
        assert_eq!(weights.weight("liability"), 25);
        assert!((weights.multiplier("classVsArb") - 0.8).abs() < 1e-9);
    }

    #[test]
    fn set_weight_clamps_silently() {
        let mut weights = WeightConfiguration::default();
        assert_eq!(
            weights.set_weight("liability", 55),
            WeightChange::Updated {
                previous: 25,
                current: 40
            }
        );
        assert_eq!(
            weights.set_weight("claimants", -5),
            WeightChange::Updated {
                previous: 20,
                current: 0
            }
        );
        assert_eq!(weights.weight("liability"), 40);
        assert_eq!(weights.weight("claimants"), 0);
    }

    #[test]
    fn non_numeric_input_keeps_prior_weight() {
        let mut weights = WeightConfiguration::default();
        assert_eq!(weights.set_weight("solvency", "lots"), WeightChange::Rejected);
        assert_eq!(weights.set_weight("solvency", ""), WeightChange::Rejected);
        assert_eq!(weights.weight("solvency"), 10);
        assert_eq!(weights.set_weight("solvency", "10"), WeightChange::Unchanged);
    }

    #[test]
    fn unknown_criterion_is_ignored() {
        let mut weights = WeightConfiguration::default();
        assert_eq!(
            weights.set_weight("reputation", 10),
            WeightChange::UnknownCriterion
        );
        assert_eq!(weights.weight("reputation"), 0);
        assert_eq!(weights.total_weight(), 100);
    }

    #[test]
    fn drift_is_reported_not_rejected() {
        let mut weights = WeightConfiguration::default();
        weights.set_weight("liability", 35);
        let diagnostic = weights.diagnostic();
        assert_eq!(diagnostic.total, 110);
        assert!(!diagnostic.balanced);
        assert_eq!(
            diagnostic.message.as_deref(),
            Some("weights sum to 110 (should be 100)")
        );
    }

    #[test]
    fn reset_restores_catalog_defaults() {
        let mut weights = WeightConfiguration::default();
        weights.set_weight("liability", 5);
        weights.set_weight("settlementPressure", 30);
        assert_eq!(weights.reset_to_defaults(), WeightChange::Reset);
        assert_eq!(weights.total_weight(), 100);
        assert_eq!(weights, WeightConfiguration::catalog_defaults());
    }

    #[test]
    fn locked_configuration_ignores_edits() {
        let mut weights = WeightConfiguration::locked();
        assert_eq!(weights.set_weight("liability", 10), WeightChange::Locked);
        assert_eq!(weights.reset_to_defaults(), WeightChange::Locked);
        assert_eq!(weights.weight("liability"), 25);
        assert!(weights.is_locked());
    }

    #[test]
    fn entries_follow_catalog_order() {
        let weights = WeightConfiguration::default();
        let entries = weights.entries();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0].criterion_id, "liability");
        assert_eq!(entries[7].criterion_id, "settlementPressure");
        assert_eq!(entries[7].weight, 3);
    }
}
