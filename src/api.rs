use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::ToSocketAddrs;

use crate::collector::Collector;
use crate::exposition;

async fn root() -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/metrics")],
    )
        .into_response()
}

async fn metrics(collector: State<Collector>) -> Response {
    let samples = collector.collect().await;
    match exposition::encode_text(&samples) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(err) => {
            log::error!("Failed to encode metrics: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to encode metrics",
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub fn new(collector: Collector) -> Self {
        let router = axum::Router::new()
            .route("/", get(root))
            .route("/metrics", get(metrics))
            .route("/health", get(health))
            .with_state(collector);
        Self { router }
    }

    pub async fn listen(self, addr: impl ToSocketAddrs) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("Starting server at {}", listener.local_addr()?);
        axum::serve(listener, self.router.into_make_service()).await
    }
}
