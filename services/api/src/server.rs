use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use propstack::config::AppConfig;
use propstack::desk::DealDeskService;
use propstack::error::AppError;
use propstack::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryMarket, InMemoryProgress, InMemoryWallet};
use crate::routes::with_desk_routes;

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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let market = Arc::new(InMemoryMarket::default());
    let wallet = Arc::new(InMemoryWallet::default());
    let progress = Arc::new(InMemoryProgress::default());
    let service = Arc::new(DealDeskService::new(
        market,
        wallet,
        progress,
        config.desk.clone(),
    ));

    let app = with_desk_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "deal desk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
