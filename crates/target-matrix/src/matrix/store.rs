use chrono::Utc;
use tracing::debug;

use super::catalog::find_criterion;
use super::input::RawInput;
use super::seed::seed_targets;
use super::target::{Target, TargetDraft, TargetId, ValidationError};

/// The mutable set of scored targets, kept in mutation order.
///
/// Insertion order matters: the ranking engine breaks ties by it. Every operation that
/// addresses a missing target or criterion is a silent no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetStore {
    targets: Vec<Target>,
    last_id: i64,
}

impl TargetStore {
    pub fn new(targets: Vec<Target>) -> Self {
        let mut store = Self::default();
        store.replace(targets);
        store
    }

    pub fn seeded() -> Self {
        Self::new(seed_targets())
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|target| target.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn add_target(&mut self, draft: TargetDraft) -> Result<&Target, ValidationError> {
        self.add_target_at(draft, Utc::now().timestamp_millis())
    }

    /// Adds a target whose id derives from `now_millis`, bumped past the last issued id.
    pub fn add_target_at(
        &mut self,
        draft: TargetDraft,
        now_millis: i64,
    ) -> Result<&Target, ValidationError> {
        let id = TargetId(now_millis.max(self.last_id.saturating_add(1)));
        let target = draft.into_target(id)?;
        self.last_id = id.0;
        debug!(target_id = %id, name = %target.name, "target added");
        self.targets.push(target);
        Ok(&self.targets[self.targets.len() - 1])
    }

    /// Applies analyst input to one score. Blank input un-sets the score, numbers are clamped
    /// into 1-10, and non-numeric input keeps the current value. Returns `None` when either id
    /// is unknown.
    pub fn update_score(
        &mut self,
        target_id: TargetId,
        criterion_id: &str,
        raw: impl Into<RawInput>,
    ) -> Option<&Target> {
        let criterion = find_criterion(criterion_id)?;
        let target = self.targets.iter_mut().find(|target| target.id == target_id)?;

        let slot = target.scores.entry(criterion.id.to_string()).or_default();
        *slot = slot.apply(raw.into());
        debug!(%target_id, criterion = criterion.id, score = ?slot, "score updated");
        Some(target)
    }

    /// Removes a target. Returns whether anything was removed; absent ids are not an error.
    pub fn delete_target(&mut self, target_id: TargetId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|target| target.id != target_id);
        before != self.targets.len()
    }

    /// Replaces the whole store with the seed dataset.
    pub fn reset_all(&mut self) {
        self.replace(seed_targets());
    }

    fn replace(&mut self, mut targets: Vec<Target>) {
        for target in &mut targets {
            target.normalize();
        }
        self.last_id = targets
            .iter()
            .map(|target| target.id.0)
            .max()
            .unwrap_or(0)
            .max(self.last_id);
        self.targets = targets;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::score::Score;

    const NOW: i64 = 1_767_225_600_000;

    fn empty_store() -> TargetStore {
        TargetStore::new(Vec::new())
    }

    #[test]
    fn add_assigns_unique_increasing_ids() {
        let mut store = empty_store();
        let first = store
            .add_target_at(TargetDraft::named("Alpha"), NOW)
            .expect("valid")
            .id;
        let second = store
            .add_target_at(TargetDraft::named("Beta"), NOW)
            .expect("valid")
            .id;
        let third = store
            .add_target_at(TargetDraft::named("Gamma"), NOW - 10)
            .expect("valid")
            .id;

        assert_eq!(first, TargetId(NOW));
        assert_eq!(second, TargetId(NOW + 1));
        assert_eq!(third, TargetId(NOW + 2));
    }

    #[test]
    fn add_rejects_blank_name_without_side_effects() {
        let mut store = TargetStore::seeded();
        let before = store.clone();
        assert_eq!(
            store.add_target(TargetDraft::named(" ")).map(|t| t.id),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(store, before);
    }

    #[test]
    fn ids_continue_after_seeded_records() {
        let mut store = TargetStore::seeded();
        let added = store
            .add_target_at(TargetDraft::named("Late entrant"), 5)
            .expect("valid");
        assert_eq!(added.id, TargetId(13));
    }

    #[test]
    fn update_score_clamps_and_unsets() {
        let mut store = empty_store();
        let id = store
            .add_target_at(TargetDraft::named("Alpha"), NOW)
            .expect("valid")
            .id;

        let updated = store.update_score(id, "liability", 15).expect("hit");
        assert_eq!(updated.score("liability"), Score::Set(10));

        let updated = store.update_score(id, "liability", -3).expect("hit");
        assert_eq!(updated.score("liability"), Score::Set(1));

        store.update_score(id, "claimants", "7");
        assert_eq!(store.get(id).expect("present").scored_count(), 2);

        let updated = store.update_score(id, "claimants", "").expect("hit");
        assert_eq!(updated.score("claimants"), Score::Unset);
        assert_eq!(updated.scored_count(), 1);
    }

    #[test]
    fn update_score_misses_are_no_ops() {
        let mut store = TargetStore::seeded();
        let before = store.clone();
        assert!(store.update_score(TargetId(999), "liability", 5).is_none());
        assert!(store.update_score(TargetId(1), "reputation", 5).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = TargetStore::seeded();
        assert!(store.delete_target(TargetId(3)));
        assert_eq!(store.len(), 11);
        assert!(!store.delete_target(TargetId(3)));
        assert!(!store.delete_target(TargetId(404)));
        assert_eq!(store.len(), 11);
    }

    #[test]
    fn reset_replaces_rather_than_merges() {
        let mut store = TargetStore::seeded();
        store
            .add_target_at(TargetDraft::named("Extra"), NOW)
            .expect("valid");
        store.delete_target(TargetId(1));
        store.update_score(TargetId(2), "liability", 1);

        store.reset_all();
        assert_eq!(store, TargetStore::seeded().with_last_id(NOW));
        assert_eq!(store.len(), 12);
        assert_eq!(store.get(TargetId(2)).expect("seeded").score("liability"), Score::Set(9));
    }

    impl TargetStore {
        fn with_last_id(mut self, last_id: i64) -> Self {
            self.last_id = last_id;
            self
        }
    }
}
