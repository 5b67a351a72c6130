use std::sync::Arc;

use tracing::info;

use super::input::RawInput;
use super::persistence::{KeyValueSlot, LoadSource, PersistenceAdapter};
use super::ranking::{ranking, Ranking};
use super::store::TargetStore;
use super::target::{Target, TargetDraft, TargetId, ValidationError};
use super::weights::{WeightChange, WeightConfiguration};

/// Explicit application state: the target store, the session's weights, and the slot the
/// store is mirrored to.
///
/// Every store mutation is written through synchronously before the call returns. Weights
/// are never persisted. Rankings are recomputed on every call to [`MatrixService::ranking`].
pub struct MatrixService<S> {
    store: TargetStore,
    weights: WeightConfiguration,
    persistence: PersistenceAdapter<S>,
    load_source: LoadSource,
}

impl<S> MatrixService<S>
where
    S: KeyValueSlot,
{
    /// Loads the store from `slot`, falling back to the seed dataset.
    pub fn open(slot: Arc<S>, key: impl Into<String>, weights: WeightConfiguration) -> Self {
        let persistence = PersistenceAdapter::new(slot, key);
        let loaded = persistence.load_with_source();
        info!(
            key = persistence.key(),
            targets = loaded.targets.len(),
            source = ?loaded.source,
            weights_locked = weights.is_locked(),
            "target matrix opened"
        );

        Self {
            store: TargetStore::new(loaded.targets),
            weights,
            persistence,
            load_source: loaded.source,
        }
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn store(&self) -> &TargetStore {
        &self.store
    }

    pub fn targets(&self) -> &[Target] {
        self.store.targets()
    }

    pub fn weights(&self) -> &WeightConfiguration {
        &self.weights
    }

    pub fn ranking(&self) -> Ranking {
        ranking(self.store.targets(), &self.weights)
    }

    pub fn total_weight(&self) -> u32 {
        self.weights.total_weight()
    }

    pub fn set_weight(&mut self, criterion_id: &str, raw: impl Into<RawInput>) -> WeightChange {
        self.weights.set_weight(criterion_id, raw)
    }

    pub fn reset_weights(&mut self) -> WeightChange {
        self.weights.reset_to_defaults()
    }

    pub fn add_target(&mut self, draft: TargetDraft) -> Result<Target, ValidationError> {
        let created = self.store.add_target(draft)?.clone();
        self.persist();
        Ok(created)
    }

    /// Returns the updated target, or `None` when the target or criterion is unknown.
    pub fn update_score(
        &mut self,
        target_id: TargetId,
        criterion_id: &str,
        raw: impl Into<RawInput>,
    ) -> Option<Target> {
        let updated = self
            .store
            .update_score(target_id, criterion_id, raw)?
            .clone();
        self.persist();
        Some(updated)
    }

    /// Removes a target; deleting an absent id is a no-op.
    pub fn delete_target(&mut self, target_id: TargetId) -> bool {
        let removed = self.store.delete_target(target_id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn reset_all(&mut self) {
        self.store.reset_all();
        info!(targets = self.store.len(), "target store reset to seed dataset");
        self.persist();
    }

    fn persist(&self) {
        self.persistence.save(self.store.targets());
    }
}
