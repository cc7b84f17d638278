use crate::cli::ServeArgs;
use crate::infra::{spawn_scoring_worker, AppState, InMemoryCardRequestStore};
use crate::routes::with_card_request_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use card_requests::config::{AppConfig, StoreConfig};
use card_requests::error::AppError;
use card_requests::telemetry;
use card_requests::workflows::card_requests::{CardRequestLifecycle, RandomScoreSource};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(container) = args.container.take() {
        config.store = StoreConfig::new(container)?;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (store, notifications) =
        InMemoryCardRequestStore::with_notifications(config.store.container.clone());
    let lifecycle = Arc::new(CardRequestLifecycle::new(
        Arc::new(store),
        Arc::new(RandomScoreSource),
        config.lifecycle(),
    ));
    let _worker = spawn_scoring_worker(lifecycle.clone(), notifications);

    let app = with_card_request_routes(lifecycle)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        container = %config.store.container,
        "card request service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
