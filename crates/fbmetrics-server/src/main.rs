//! fbmetrics server
//!
//! - Loads strict YAML config (`FBMETRICS_CONFIG`, default `fbmetrics.yaml`)
//! - Builds the metrics registry; a registration failure aborts startup
//! - Serves `/healthz` and `/metrics`

use tracing_subscriber::{fmt, EnvFilter};

use fbmetrics_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = config::config_path();
    let cfg = config::load_from_file(&path).expect("config load failed");

    let state = match app_state::AppState::new(cfg) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "metrics registry construction failed");
            std::process::exit(1);
        }
    };
    let listen = state
        .cfg()
        .server
        .listen_addr()
        .expect("server.listen must be a valid SocketAddr");
    let instance = state.instance();
    tracing::info!(
        %listen,
        config = %path,
        version = %instance.version,
        edition = %instance.edition,
        metrics = state.metrics().is_enabled(),
        "fbmetrics-server starting"
    );
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
