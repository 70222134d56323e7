use crate::cli::ServeArgs;
use crate::infra::{build_shortlist_service, AppState};
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use degreepath::config::AppConfig;
use degreepath::content::PostLibrary;
use degreepath::error::AppError;
use degreepath::telemetry;
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
    let posts = PostLibrary::new(config.content.posts_dir());
    let shortlist = Arc::new(build_shortlist_service(&config)?);

    let app_state = AppState {
        environment: config.environment,
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        posts,
        shortlist,
    };

    let app = router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, content = %config.content.root.display(), "degreepath service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
