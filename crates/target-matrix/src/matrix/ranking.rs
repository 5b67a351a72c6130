//! Pure ranking over a target snapshot and a weight configuration.
//!
//! Nothing here is cached: every call recomputes from its inputs. A target's weighted score
//! is the literal dot product of its set scores and `weight / 10`; unset scores contribute 0
//! and are never imputed, and the total is never renormalised against the weight sum.

use serde::Serialize;
use tracing::debug;

use super::catalog::criteria;
use super::score::{Score, ScoreGrade};
use super::target::Target;
use super::weights::{WeightConfiguration, WeightDiagnostic};

/// A target with its derived ranking fields. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTarget {
    #[serde(flatten)]
    pub target: Target,
    pub weighted_score: f64,
    /// Same dot product under the catalog default weights.
    pub baseline_score: f64,
    pub scored_count: usize,
    pub rank: usize,
    pub tier: ScoreTier,
    pub contributions: Vec<Contribution>,
}

impl RankedTarget {
    /// True when no criterion has been scored yet.
    pub fn is_unscored(&self) -> bool {
        self.scored_count == 0
    }
}

/// One criterion's share of a weighted score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub criterion_id: &'static str,
    pub score: Score,
    pub weight: u8,
    pub contribution: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<ScoreGrade>,
}

/// Presentation bucket for a weighted score; has no effect on ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Priority,
    Viable,
    Marginal,
}

impl ScoreTier {
    pub fn of(weighted_score: f64) -> Self {
        if weighted_score >= 65.0 {
            Self::Priority
        } else if weighted_score >= 50.0 {
            Self::Viable
        } else {
            Self::Marginal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Priority => "Priority",
            Self::Viable => "Viable",
            Self::Marginal => "Marginal",
        }
    }
}

/// Ranked targets together with the weight diagnostic that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub weights: WeightDiagnostic,
    pub targets: Vec<RankedTarget>,
}

/// Σ score × weight / 10 over the catalog criteria with a set score.
pub fn weighted_score(target: &Target, weights: &WeightConfiguration) -> f64 {
    contributions(target, weights)
        .iter()
        .map(|entry| entry.contribution)
        .sum()
}

pub fn contributions(target: &Target, weights: &WeightConfiguration) -> Vec<Contribution> {
    criteria()
        .iter()
        .map(|criterion| {
            let score = target.score(criterion.id);
            let weight = weights.weight(criterion.id);
            let contribution = match score {
                Score::Set(value) => f64::from(value) * f64::from(weight) / 10.0,
                Score::Unset => 0.0,
            };
            Contribution {
                criterion_id: criterion.id,
                score,
                weight,
                contribution,
                grade: score.grade(),
            }
        })
        .collect()
}

/// Orders targets by weighted score, highest first, with 1-based ranks.
///
/// The sort is stable: equal scores keep the input order, which is store mutation order.
/// Ties never share a rank.
pub fn rank(targets: &[Target], weights: &WeightConfiguration) -> Vec<RankedTarget> {
    let baseline = WeightConfiguration::catalog_defaults();

    let mut ranked: Vec<RankedTarget> = targets
        .iter()
        .map(|target| {
            let contributions = contributions(target, weights);
            let total: f64 = contributions.iter().map(|entry| entry.contribution).sum();
            RankedTarget {
                target: target.clone(),
                weighted_score: total,
                baseline_score: weighted_score(target, &baseline),
                scored_count: target.scored_count(),
                rank: 0,
                tier: ScoreTier::of(total),
                contributions,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));
    for (position, entry) in ranked.iter_mut().enumerate() {
        entry.rank = position + 1;
    }

    debug!(
        targets = ranked.len(),
        total_weight = weights.total_weight(),
        "ranking recomputed"
    );
    ranked
}

pub fn ranking(targets: &[Target], weights: &WeightConfiguration) -> Ranking {
    Ranking {
        weights: weights.diagnostic(),
        targets: rank(targets, weights),
    }
}
