use crate::cli::ServeArgs;
use crate::infra::{load_catalog, load_rates, AppState};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use claim_rating::config::AppConfig;
use claim_rating::error::AppError;
use claim_rating::rating::{ClaimRatingService, IntakeGuard, RatingEngine};
use claim_rating::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let rates = load_rates(&config.data, None)?;
    let catalog = load_catalog(&config.data)?;
    info!(
        schedule = %rates.schedule,
        conditions = catalog.len(),
        "rating data loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(ClaimRatingService::new(
        IntakeGuard::default(),
        catalog,
        RatingEngine::new(rates),
    ));

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "claim rating engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
