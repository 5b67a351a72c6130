use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::{criteria, is_known_criterion};
use super::input::RawInput;
use super::score::Score;

pub const SECURITY: &str = "Security";
pub const TELECOM: &str = "Telecom";
pub const FINANCE_INSTALLMENT: &str = "Finance/Installment";
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Categories used by the seed dataset. The label set is open; analysts may add others.
pub const KNOWN_CATEGORIES: [&str; 3] = [SECURITY, TELECOM, FINANCE_INSTALLMENT];

/// Identifier wrapper for scored targets. Values are creation timestamps in milliseconds,
/// bumped when needed to stay strictly increasing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(pub i64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate defendant scored against the rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
    /// One entry per catalog criterion once normalised. Extra keys are kept but never ranked.
    #[serde(default)]
    pub scores: BTreeMap<String, Score>,
    /// Free-text citations per criterion; informational only.
    #[serde(default)]
    pub sources: BTreeMap<String, String>,
}

impl Target {
    pub fn score(&self, criterion_id: &str) -> Score {
        self.scores.get(criterion_id).copied().unwrap_or_default()
    }

    /// Number of catalog criteria carrying a set score.
    pub fn scored_count(&self) -> usize {
        criteria()
            .iter()
            .filter(|criterion| self.score(criterion.id).is_set())
            .count()
    }

    /// Ensures every catalog criterion has a score entry.
    pub fn normalize(&mut self) {
        for criterion in criteria() {
            self.scores
                .entry(criterion.id.to_string())
                .or_insert(Score::Unset);
        }
        if self.category.trim().is_empty() {
            self.category = UNCATEGORIZED.to_string();
        }
    }
}

/// Analyst input for a new target. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TargetDraft {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub scores: BTreeMap<String, RawInput>,
    #[serde(default)]
    pub sources: BTreeMap<String, String>,
}

impl TargetDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn score(mut self, criterion_id: impl Into<String>, raw: impl Into<RawInput>) -> Self {
        self.scores.insert(criterion_id.into(), raw.into());
        self
    }

    pub fn source(mut self, criterion_id: impl Into<String>, citation: impl Into<String>) -> Self {
        self.sources.insert(criterion_id.into(), citation.into());
        self
    }

    /// Validates the draft and builds the stored record. Supplied scores are clamped into
    /// 1-10; anything missing, blank, non-numeric, or outside the catalog ends up unset.
    pub fn into_target(self, id: TargetId) -> Result<Target, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let scores = criteria()
            .iter()
            .map(|criterion| {
                let input = self.scores.get(criterion.id).copied().unwrap_or_default();
                (criterion.id.to_string(), Score::Unset.apply(input))
            })
            .collect();

        let sources = self
            .sources
            .into_iter()
            .filter(|(criterion_id, citation)| {
                is_known_criterion(criterion_id) && !citation.trim().is_empty()
            })
            .collect();

        let mut target = Target {
            id,
            name: name.to_string(),
            category: self.category.unwrap_or_default().trim().to_string(),
            notes: self.notes.unwrap_or_default(),
            scores,
            sources,
        };
        target.normalize();
        Ok(target)
    }
}

/// Input rejected at creation time. The store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("target name must not be empty")]
    EmptyName,
}
