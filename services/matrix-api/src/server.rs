use crate::cli::ServeArgs;
use crate::infra::{open_session, AppState};
use crate::routes::with_matrix_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use target_matrix::config::AppConfig;
use target_matrix::error::AppError;
use target_matrix::telemetry;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let session = open_session(&config);
    let load_source = session.load_source();
    if load_source.is_seed() {
        warn!(?load_source, "serving seed dataset");
    }
    info!(
        targets = session.targets().len(),
        weights_locked = config.weights_locked,
        data_dir = %config.storage.data_dir.display(),
        "target matrix loaded"
    );

    let app = with_matrix_routes(Arc::new(Mutex::new(session)))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "target scoring matrix ready");

    axum::serve(listener, app).await?;
    Ok(())
}
