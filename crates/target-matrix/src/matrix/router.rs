use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::{criteria, Criterion};
use super::export::rankings_csv;
use super::input::RawInput;
use super::persistence::KeyValueSlot;
use super::ranking::Ranking;
use super::service::MatrixService;
use super::target::{Target, TargetDraft, TargetId};
use super::weights::{WeightChange, WeightDiagnostic, WeightEntry};
use crate::error::AppError;

/// The service behind one lock, so at most one mutation is in flight.
pub type SharedMatrix<S> = Arc<Mutex<MatrixService<S>>>;

/// Router builder exposing the ranking, weight, and target endpoints.
pub fn matrix_router<S>(service: SharedMatrix<S>) -> Router
where
    S: KeyValueSlot + 'static,
{
    Router::new()
        .route("/api/v1/criteria", get(criteria_handler))
        .route("/api/v1/weights", get(weights_handler::<S>))
        .route("/api/v1/weights/reset", post(reset_weights_handler::<S>))
        .route(
            "/api/v1/weights/:criterion_id",
            put(set_weight_handler::<S>),
        )
        .route("/api/v1/rankings", get(rankings_handler::<S>))
        .route("/api/v1/rankings.csv", get(rankings_csv_handler::<S>))
        .route("/api/v1/targets", post(add_target_handler::<S>))
        .route("/api/v1/targets/reset", post(reset_targets_handler::<S>))
        .route(
            "/api/v1/targets/:target_id",
            delete(delete_target_handler::<S>),
        )
        .route(
            "/api/v1/targets/:target_id/scores/:criterion_id",
            put(update_score_handler::<S>),
        )
        .with_state(service)
}

/// Body for weight and score edits. A missing `value` counts as blank.
#[derive(Debug, Default, Deserialize)]
pub struct ValueUpdate {
    #[serde(default)]
    pub value: RawInput,
}

#[derive(Debug, Serialize)]
pub struct WeightsView {
    pub locked: bool,
    pub diagnostic: WeightDiagnostic,
    pub weights: Vec<WeightEntry>,
}

#[derive(Debug, Serialize)]
pub struct WeightChangeView {
    pub change: WeightChange,
    #[serde(flatten)]
    pub weights: WeightsView,
}

fn lock<S>(service: &SharedMatrix<S>) -> std::sync::MutexGuard<'_, MatrixService<S>> {
    service.lock().expect("matrix mutex poisoned")
}

fn weights_view<S: KeyValueSlot>(service: &MatrixService<S>) -> WeightsView {
    let weights = service.weights();
    WeightsView {
        locked: weights.is_locked(),
        diagnostic: weights.diagnostic(),
        weights: weights.entries(),
    }
}

fn ranking_of<S: KeyValueSlot>(service: &MatrixService<S>) -> Ranking {
    let ranking = service.ranking();
    if let Some(message) = &ranking.weights.message {
        warn!(total = ranking.weights.total, "{message}");
    }
    ranking
}

pub(crate) async fn criteria_handler() -> Json<&'static [Criterion]> {
    Json(criteria())
}

pub(crate) async fn weights_handler<S>(State(service): State<SharedMatrix<S>>) -> Json<WeightsView>
where
    S: KeyValueSlot + 'static,
{
    Json(weights_view(&lock(&service)))
}

pub(crate) async fn set_weight_handler<S>(
    State(service): State<SharedMatrix<S>>,
    Path(criterion_id): Path<String>,
    Json(update): Json<ValueUpdate>,
) -> Json<WeightChangeView>
where
    S: KeyValueSlot + 'static,
{
    let mut service = lock(&service);
    let change = service.set_weight(&criterion_id, update.value);
    Json(WeightChangeView {
        change,
        weights: weights_view(&service),
    })
}

pub(crate) async fn reset_weights_handler<S>(
    State(service): State<SharedMatrix<S>>,
) -> Json<WeightChangeView>
where
    S: KeyValueSlot + 'static,
{
    let mut service = lock(&service);
    let change = service.reset_weights();
    Json(WeightChangeView {
        change,
        weights: weights_view(&service),
    })
}

pub(crate) async fn rankings_handler<S>(State(service): State<SharedMatrix<S>>) -> Json<Ranking>
where
    S: KeyValueSlot + 'static,
{
    Json(ranking_of(&lock(&service)))
}

pub(crate) async fn rankings_csv_handler<S>(
    State(service): State<SharedMatrix<S>>,
) -> Result<Response, AppError>
where
    S: KeyValueSlot + 'static,
{
    let ranking = ranking_of(&lock(&service));
    let body = rankings_csv(&ranking.targets)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    )
        .into_response())
}

pub(crate) async fn add_target_handler<S>(
    State(service): State<SharedMatrix<S>>,
    Json(draft): Json<TargetDraft>,
) -> Result<(StatusCode, Json<Target>), AppError>
where
    S: KeyValueSlot + 'static,
{
    let created = lock(&service).add_target(draft)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_score_handler<S>(
    State(service): State<SharedMatrix<S>>,
    Path((target_id, criterion_id)): Path<(i64, String)>,
    Json(update): Json<ValueUpdate>,
) -> Json<Ranking>
where
    S: KeyValueSlot + 'static,
{
    let mut service = lock(&service);
    service.update_score(TargetId(target_id), &criterion_id, update.value);
    Json(ranking_of(&service))
}

pub(crate) async fn delete_target_handler<S>(
    State(service): State<SharedMatrix<S>>,
    Path(target_id): Path<i64>,
) -> StatusCode
where
    S: KeyValueSlot + 'static,
{
    lock(&service).delete_target(TargetId(target_id));
    StatusCode::NO_CONTENT
}

pub(crate) async fn reset_targets_handler<S>(
    State(service): State<SharedMatrix<S>>,
) -> Json<Ranking>
where
    S: KeyValueSlot + 'static,
{
    let mut service = lock(&service);
    service.reset_all();
    Json(ranking_of(&service))
}
