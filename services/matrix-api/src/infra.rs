use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use target_matrix::config::AppConfig;
use target_matrix::error::AppError;
use target_matrix::matrix::{FileSlot, MatrixService, WeightConfiguration};
use target_matrix::telemetry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Opens the session against the configured on-disk slot.
pub(crate) fn open_session(config: &AppConfig) -> MatrixService<FileSlot> {
    let weights = if config.weights_locked {
        WeightConfiguration::locked()
    } else {
        WeightConfiguration::catalog_defaults()
    };
    MatrixService::open(
        Arc::new(FileSlot::new(config.storage.data_dir.clone())),
        config.storage.slot_key.clone(),
        weights,
    )
}

/// One-shot CLI entry: installs logging so slot recovery warnings reach stderr, then opens
/// the session.
pub(crate) fn start_session(config: &AppConfig) -> Result<MatrixService<FileSlot>, AppError> {
    telemetry::init(&config.telemetry)?;
    Ok(open_session(config))
}

/// `criterion=value` pair from the command line. The value stays raw so blank and
/// non-numeric input reach the same clamping rules as every other entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub(crate) criterion_id: String,
    pub(crate) value: String,
}

pub(crate) fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (criterion_id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CRITERION=VALUE, got '{raw}'"))?;
    let criterion_id = criterion_id.trim();
    if criterion_id.is_empty() {
        return Err(format!("missing criterion id in '{raw}'"));
    }
    Ok(Assignment {
        criterion_id: criterion_id.to_string(),
        value: value.trim().to_string(),
    })
}
