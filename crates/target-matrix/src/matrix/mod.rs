//! Scoring core: catalog, weights, store, ranking, and persistence.

pub mod catalog;
pub mod export;
mod input;
pub mod persistence;
pub mod ranking;
pub mod router;
pub mod score;
mod seed;
pub mod service;
pub mod store;
pub mod target;
pub mod weights;

#[cfg(test)]
mod tests;

pub use catalog::{criteria, find_criterion, Criterion, ScoringBand};
pub use input::RawInput;
pub use persistence::{
    FileSlot, KeyValueSlot, LoadSource, Loaded, MemorySlot, PersistenceAdapter, SlotError,
};
pub use ranking::{rank, ranking, Contribution, RankedTarget, Ranking, ScoreTier};
pub use router::matrix_router;
pub use score::{Score, ScoreGrade};
pub use seed::seed_targets;
pub use service::MatrixService;
pub use store::TargetStore;
pub use target::{Target, TargetDraft, TargetId, ValidationError, KNOWN_CATEGORIES};
pub use weights::{WeightChange, WeightConfiguration, WeightDiagnostic, WeightEntry};
