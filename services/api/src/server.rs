use crate::cli::ServeArgs;
use crate::infra::{AppState, Services};
use crate::routes::with_wardrobe_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wardrobe_ai::config::AppConfig;
use wardrobe_ai::error::AppError;
use wardrobe_ai::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    let overridden = args.host.is_some() || args.port.is_some();

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if overridden && std::env::var("STORAGE_PUBLIC_BASE_URL").is_err() {
        config.storage.public_base_url =
            format!("http://{}:{}", config.server.host, config.server.port);
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let services = Services::in_memory(&config);
    let app = with_wardrobe_routes(&services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        jitter = ?config.outfits.jitter,
        "wardrobe service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
