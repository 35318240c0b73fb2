use axum::{
    Router,
    routing::{get, post},
};
use chrono_tz::Tz;
use engine::Currency;

use crate::reports;

#[derive(Clone, Copy)]
pub struct ServerState {
    /// Default reporting timezone when a request does not carry one.
    pub timezone: Tz,
    /// Default display currency.
    pub currency: Currency,
}

pub(crate) fn router(state: ServerState) -> Router {
    Router::new()
        .route("/report", post(reports::get_report))
        .route("/report/document", post(reports::get_document))
        .route("/report/csv", post(reports::get_csv))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

pub async fn run(timezone: Tz) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(timezone, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    timezone: Tz,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        timezone,
        currency: Currency::default(),
    };

    axum::serve(listener, router(state)).await
}
