//! HTTP front of the dashboard: router assembly, middleware and serving.

use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderName, Request, Response, StatusCode};
use footprint::FootprintModule;
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::ServerConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Dashboard routes wrapped in the gateway middleware.
pub fn build_router(module: &FootprintModule, server: &ServerConfig) -> Router {
    let router = module.register_rest(Router::new());
    apply_middleware_stack(router, server)
}

/// Layers are registered innermost first. At runtime requests pass
/// `SetRequestId` → `PropagateRequestId` → Trace → Timeout → `BodyLimit` →
/// routes.
fn apply_middleware_stack(mut router: Router, server: &ServerConfig) -> Router {
    // 5) Body limit
    router = router.layer(RequestBodyLimitLayer::new(server.body_limit_bytes));

    // 4) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        server.request_timeout,
    ));

    // 3) Trace
    router = apply_trace_layer(router);

    // 2) PropagateRequestId
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

    // 1) SetRequestId (outermost)
    router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &Response<Body>, latency: Duration, span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    )
}

/// Bind and serve until `cancel` fires, then drain in-flight requests.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(router: Router, server: &ServerConfig, cancel: CancellationToken) -> Result<()> {
    let addr = server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "HTTP server bound");

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
