use std::future::Future;

use axum::Router;
use common::admin_http::spawn_admin_server;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::observability;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve configuration from `config.toml` and the environment.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Router over a fresh, empty store.
pub fn build_app(cfg: &AppConfig) -> Router {
    routes::build_router(ServerState::in_memory(), build_cors(), cfg.server.max_body_bytes)
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(event = "shutdown_signal", signal = "ctrl_c", "shutting down"),
        _ = terminate => info!(event = "shutdown_signal", signal = "terminate", "shutting down"),
    }
}

/// Serve `app` on `listener` until `shutdown` resolves; in-flight requests
/// are allowed to finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Run the store with an already resolved configuration.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    if let Some(admin_addr) = cfg.admin.addr.as_deref() {
        let (bound, _admin_task) = spawn_admin_server(admin_addr, observability::encode_metrics).await?;
        info!(addr = %bound, "admin listener enabled");
    }

    let app = build_app(&cfg);

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(addr = %listener.local_addr()?, max_body_bytes = cfg.server.max_body_bytes, "memkv listening");

    serve(listener, app, shutdown_signal()).await
}
