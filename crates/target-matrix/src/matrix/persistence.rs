//! Best-effort mirroring of the target store into a single key-value slot.
//!
//! Reads never fail: a missing, unreadable, or malformed slot falls back to the seed dataset.
//! Writes never fail either; transport errors are logged and dropped.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::seed::seed_targets;
use super::target::Target;

pub const SCHEMA_VERSION: u32 = 1;

/// Storage abstraction so the adapter can be exercised against memory or disk.
pub trait KeyValueSlot: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;
    fn write(&self, key: &str, value: &str) -> Result<(), SlotError>;
}

/// Slot transport failure. Never escapes [`PersistenceAdapter`].
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("slot io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("slot unavailable: {0}")]
    Unavailable(String),
}

/// Process-local slot, handy for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let slot = Self::default();
        slot.entries
            .lock()
            .expect("slot mutex poisoned")
            .insert(key.into(), value.into());
        slot
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("slot mutex poisoned")
            .get(key)
            .cloned()
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        self.entries
            .lock()
            .expect("slot mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl KeyValueSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }
}

/// Where a loaded target list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Stored,
    /// Bare target array written before the envelope existed.
    Legacy,
    SeedMissing,
    SeedCorrupt,
    SeedUnavailable,
}

impl LoadSource {
    pub fn is_seed(self) -> bool {
        matches!(
            self,
            Self::SeedMissing | Self::SeedCorrupt | Self::SeedUnavailable
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub targets: Vec<Target>,
    pub source: LoadSource,
}

#[derive(Serialize)]
struct Envelope<'a> {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    targets: &'a [Target],
}

/// Serializes the target store to one slot key.
pub struct PersistenceAdapter<S> {
    slot: Arc<S>,
    key: String,
}

impl<S> PersistenceAdapter<S>
where
    S: KeyValueSlot,
{
    pub fn new(slot: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &Arc<S> {
        &self.slot
    }

    /// Targets from the slot, or the seed dataset when the slot is absent or unusable.
    pub fn load(&self) -> Vec<Target> {
        self.load_with_source().targets
    }

    pub fn load_with_source(&self) -> Loaded {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored targets; using seed dataset");
                return seeded(LoadSource::SeedMissing);
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "target slot unreadable; using seed dataset");
                return seeded(LoadSource::SeedUnavailable);
            }
        };

        match decode(&raw) {
            Ok((targets, source)) => {
                debug!(key = %self.key, count = targets.len(), ?source, "targets restored");
                Loaded { targets, source }
            }
            Err(reason) => {
                warn!(key = %self.key, %reason, "stored targets are corrupt; using seed dataset");
                seeded(LoadSource::SeedCorrupt)
            }
        }
    }

    /// Writes the full target list. Returns whether the write landed; failures are logged.
    pub fn save(&self, targets: &[Target]) -> bool {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            saved_at: Utc::now(),
            targets,
        };
        let encoded = match serde_json::to_string(&envelope) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to encode targets; skipping save");
                return false;
            }
        };

        match self.slot.write(&self.key, &encoded) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to persist targets");
                false
            }
        }
    }
}

fn seeded(source: LoadSource) -> Loaded {
    Loaded {
        targets: seed_targets(),
        source,
    }
}

fn decode(raw: &str) -> Result<(Vec<Target>, LoadSource), String> {
    let value: Value = serde_json::from_str(raw).map_err(|err| err.to_string())?;

    let (records, source) = match value {
        Value::Array(_) => (value, LoadSource::Legacy),
        Value::Object(mut object) => {
            let version = object
                .get("schema_version")
                .and_then(Value::as_u64)
                .ok_or_else(|| "missing schema_version".to_string())?;
            if version != u64::from(SCHEMA_VERSION) {
                return Err(format!("unsupported schema_version {version}"));
            }
            let records = object
                .remove("targets")
                .ok_or_else(|| "missing targets".to_string())?;
            (records, LoadSource::Stored)
        }
        _ => return Err("expected an object or array".to_string()),
    };

    let mut targets: Vec<Target> =
        serde_json::from_value(records).map_err(|err| err.to_string())?;
    targets.retain(|target| !target.name.trim().is_empty());
    for target in &mut targets {
        target.normalize();
    }
    Ok((targets, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::score::Score;
    use crate::matrix::target::TargetId;

    const KEY: &str = "targets";

    struct BrokenSlot;

    impl KeyValueSlot for BrokenSlot {
        fn read(&self, _key: &str) -> Result<Option<String>, SlotError> {
            Err(SlotError::Unavailable("disk offline".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), SlotError> {
            Err(SlotError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn adapter(slot: MemorySlot) -> PersistenceAdapter<MemorySlot> {
        PersistenceAdapter::new(Arc::new(slot), KEY)
    }

    #[test]
    fn missing_slot_loads_seed() {
        let loaded = adapter(MemorySlot::default()).load_with_source();
        assert_eq!(loaded.source, LoadSource::SeedMissing);
        assert_eq!(loaded.targets, seed_targets());
    }

    #[test]
    fn corrupt_slot_loads_seed() {
        for blob in ["{not json", "42", r#"{"targets": []}"#, r#"[{"name": 5}]"#] {
            let loaded = adapter(MemorySlot::with_entry(KEY, blob)).load_with_source();
            assert_eq!(loaded.source, LoadSource::SeedCorrupt, "blob {blob}");
            assert_eq!(loaded.targets.len(), 12);
        }
    }

    #[test]
    fn load_returns_the_seed_dataset_for_a_corrupt_slot() {
        let targets = adapter(MemorySlot::with_entry(KEY, "{not json")).load();
        assert_eq!(targets.len(), 12);
        assert_eq!(targets, seed_targets());
    }

    #[test]
    fn future_schema_versions_are_treated_as_corrupt() {
        let blob = r#"{"schema_version": 2, "targets": []}"#;
        let loaded = adapter(MemorySlot::with_entry(KEY, blob)).load_with_source();
        assert_eq!(loaded.source, LoadSource::SeedCorrupt);
    }

    #[test]
    fn unreadable_slot_loads_seed_and_writes_are_swallowed() {
        let adapter = PersistenceAdapter::new(Arc::new(BrokenSlot), KEY);
        let loaded = adapter.load_with_source();
        assert_eq!(loaded.source, LoadSource::SeedUnavailable);
        assert!(loaded.source.is_seed());
        assert!(!adapter.save(&loaded.targets));
    }

    #[test]
    fn save_then_load_restores_store_order() {
        let adapter = adapter(MemorySlot::default());
        let mut targets = seed_targets();
        targets.reverse();
        targets[0].scores.insert("liability".to_string(), Score::Unset);
        assert!(adapter.save(&targets));

        let raw = adapter.slot().get(KEY).expect("written");
        assert!(raw.contains("\"schema_version\":1"));

        let loaded = adapter.load_with_source();
        assert_eq!(loaded.source, LoadSource::Stored);
        assert_eq!(loaded.targets, targets);
    }

    #[test]
    fn legacy_arrays_are_normalised() {
        let blob = r#"[
            {"id": 1700000000000, "name": "Legacy Alarm", "category": "Security",
             "notes": "", "scores": {"liability": 12, "claimants": "", "perClaimant": "4"}},
            {"id": 1700000000001, "name": "  ", "scores": {}}
        ]"#;
        let loaded = adapter(MemorySlot::with_entry(KEY, blob)).load_with_source();
        assert_eq!(loaded.source, LoadSource::Legacy);
        assert_eq!(loaded.targets.len(), 1);
        let target = &loaded.targets[0];
        assert_eq!(target.id, TargetId(1_700_000_000_000));
        assert_eq!(target.score("liability"), Score::Set(10));
        assert_eq!(target.score("claimants"), Score::Unset);
        assert_eq!(target.score("perClaimant"), Score::Set(4));
        assert_eq!(target.scores.len(), 8);
    }

    #[test]
    fn an_empty_stored_list_is_respected() {
        let adapter = adapter(MemorySlot::default());
        assert!(adapter.save(&[]));
        let loaded = adapter.load_with_source();
        assert_eq!(loaded.source, LoadSource::Stored);
        assert!(loaded.targets.is_empty());
    }

    #[test]
    fn file_slot_round_trips_and_reports_missing_keys() {
        let dir = std::env::temp_dir().join(format!(
            "target-matrix-slot-{}-{}",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let slot = FileSlot::new(&dir);
        assert!(slot.read("absent").expect("readable").is_none());

        slot.write("nc/referral targets", "[]").expect("writable");
        assert_eq!(
            slot.read("nc/referral targets").expect("readable").as_deref(),
            Some("[]")
        );
        assert_eq!(
            slot.path_for("nc/referral targets"),
            dir.join("nc_referral_targets.json")
        );

        fs::remove_dir_all(&dir).expect("cleanup");
    }
}
