use axum::{
    Router,
    extract::{MatchedPath, Request},
    routing::{get, post},
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use tower_http::trace::TraceLayer;

use std::{net::SocketAddr, sync::Arc};

use crate::{summary, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Timezone "today" is computed in, when a request omits `as_of`.
    pub timezone: Tz,
}

impl ServerState {
    pub fn new(engine: Engine, timezone: Tz) -> Self {
        Self {
            engine: Arc::new(engine),
            timezone,
        }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: ServerState) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();
            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // 5xx are logged where the error is mapped.
        .on_failure(());

    Router::new()
        .route("/health", get(health))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/history", get(summary::history))
        .route("/transactions/collapsed", get(summary::collapsed))
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .put(transactions::replace)
                .delete(transactions::delete),
        )
        .route("/installments", post(transactions::installment_plan_new))
        .route("/summary", get(summary::get_summary))
        .layer(tracing_layer)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    timezone: Tz,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine, timezone))).await
}

pub fn spawn_with_listener(
    engine: Engine,
    timezone: Tz,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, timezone, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
