use crate::cli::ServeArgs;
use crate::infra::{cors_layer, AppState, InMemoryPortfolioRepository, InMemorySettingsRepository};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use kodex::config::AppConfig;
use kodex::error::AppError;
use kodex::portfolio::PortfolioService;
use kodex::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let portfolio_service = Arc::new(PortfolioService::new(
        Arc::new(InMemoryPortfolioRepository::default()),
        Arc::new(InMemorySettingsRepository::default()),
    ));

    let app = app_router(portfolio_service)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.cors))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        origins = ?config.cors.allowed_origins,
        "kodex api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
