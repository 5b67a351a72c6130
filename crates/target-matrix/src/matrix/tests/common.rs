use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::matrix::persistence::{KeyValueSlot, MemorySlot, SlotError};
use crate::matrix::router::SharedMatrix;
use crate::matrix::service::MatrixService;
use crate::matrix::target::{Target, TargetDraft, TargetId};
use crate::matrix::weights::WeightConfiguration;

pub(super) const SLOT_KEY: &str = "target-matrix.targets";

pub(super) fn cpi_draft() -> TargetDraft {
    TargetDraft::named("CPI Security Systems")
        .category("Security")
        .score("liability", 10)
        .score("claimants", 5)
        .score("perClaimant", 6)
        .score("arbProcedure", 10)
        .score("solvency", 7)
        .score("classVsArb", 7)
        .score("diligenceBurden", 9)
        .score("settlementPressure", 6)
}

pub(super) fn scored(id: i64, name: &str, scores: &[(&str, i32)]) -> Target {
    scores
        .iter()
        .fold(TargetDraft::named(name), |draft, (criterion, score)| {
            draft.score(*criterion, *score)
        })
        .into_target(TargetId(id))
        .expect("valid target")
}

pub(super) fn build_service() -> (MatrixService<MemorySlot>, Arc<MemorySlot>) {
    let slot = Arc::new(MemorySlot::default());
    let service = MatrixService::open(slot.clone(), SLOT_KEY, WeightConfiguration::default());
    (service, slot)
}

pub(super) fn empty_service() -> (MatrixService<MemorySlot>, Arc<MemorySlot>) {
    let slot = Arc::new(MemorySlot::with_entry(
        SLOT_KEY,
        r#"{"schema_version": 1, "targets": []}"#,
    ));
    let service = MatrixService::open(slot.clone(), SLOT_KEY, WeightConfiguration::default());
    (service, slot)
}

pub(super) fn shared(service: MatrixService<MemorySlot>) -> SharedMatrix<MemorySlot> {
    Arc::new(Mutex::new(service))
}

pub(super) fn stored_targets(slot: &MemorySlot) -> Vec<Target> {
    let raw = slot.get(SLOT_KEY).expect("slot written");
    let value: Value = serde_json::from_str(&raw).expect("slot holds json");
    serde_json::from_value(value["targets"].clone()).expect("targets decode")
}

/// Slot that accepts reads but rejects every write, like a full browser quota.
#[derive(Default)]
pub(super) struct QuotaExceededSlot {
    pub(super) attempts: Mutex<usize>,
}

impl KeyValueSlot for QuotaExceededSlot {
    fn read(&self, _key: &str) -> Result<Option<String>, SlotError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), SlotError> {
        *self.attempts.lock().expect("attempts mutex poisoned") += 1;
        Err(SlotError::Unavailable("quota exceeded".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 payload")
}
