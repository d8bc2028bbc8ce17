//! Lightweight admin HTTP server spawner
//!
//! Exposes `/healthz` and `/metrics` endpoints, with metrics provided by caller.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

async fn healthz() -> &'static str { "OK" }

async fn metrics_handler(f: fn() -> (StatusCode, String)) -> (StatusCode, String) {
    f()
}

fn admin_router(metrics_fn: fn() -> (StatusCode, String)) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(move || metrics_handler(metrics_fn)))
}

/// Bind the admin listener and serve it on a background task.
///
/// Binding happens before this returns, so a bad address surfaces as an
/// error to the caller instead of a dead task. Returns the bound address
/// (useful with port 0) and the serving task.
pub async fn spawn_admin_server(
    addr: &str,
    metrics_fn: fn() -> (StatusCode, String),
) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind admin listener {addr}: {e}"))?;
    let local = listener.local_addr()?;
    info!(addr = %local, "admin server listening");
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, admin_router(metrics_fn)).await {
            error!(error = %e, "admin server stopped");
        }
    });
    Ok((local, handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_metrics() -> (StatusCode, String) {
        (StatusCode::OK, "fake_metric 1\n".to_string())
    }

    #[tokio::test]
    async fn serves_healthz_and_metrics() -> anyhow::Result<()> {
        let (addr, handle) = spawn_admin_server("127.0.0.1:0", fake_metrics).await?;
        let base = format!("http://{addr}");

        let res = reqwest::get(format!("{base}/healthz")).await?;
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        assert_eq!(res.text().await?, "OK");

        let res = reqwest::get(format!("{base}/metrics")).await?;
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        assert!(res.text().await?.contains("fake_metric 1"));

        handle.abort();
        Ok(())
    }

    #[tokio::test]
    async fn bad_address_is_an_error() {
        assert!(spawn_admin_server("not-an-address", fake_metrics).await.is_err());
    }
}
