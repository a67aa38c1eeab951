//! Logging, optional OpenTelemetry export, and per-request query counting.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};
use std::time::Duration;
use tracing::{span::Id, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::Context, registry::LookupSpan, EnvFilter, Layer};

/// Response header carrying the number of SQL round trips a request made.
pub const DB_QUERY_COUNT_HEADER: &str = "X-DB-Query-Count";

/// Initialize logging, exporting to an OTLP collector when one is configured.
///
/// If OTEL_EXPORTER_OTLP_ENDPOINT is set and reachable, traces and logs are sent
/// to the collector. Otherwise, only console logging is used.
pub fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok() else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(DbQueryCountingLayer)
            .init();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return;
    };

    if !collector_reachable(&endpoint) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(DbQueryCountingLayer)
            .init();
        tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        );
        return;
    }

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "larder-server".to_string());

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.clone())
        .build();

    let trace_exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(DbQueryCountingLayer)
                .init();
            tracing::warn!("Failed to create OTLP trace exporter: {}", e);
            return;
        }
    };

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();
    let tracer = trace_provider.tracer("larder-server");
    opentelemetry::global::set_tracer_provider(trace_provider);
    let otel_trace_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    let log_provider = match opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
    {
        Ok(exporter) => Some(
            SdkLoggerProvider::builder()
                .with_batch_exporter(exporter)
                .with_resource(resource)
                .build(),
        ),
        Err(e) => {
            eprintln!("Failed to create OTLP log exporter: {e}");
            None
        }
    };
    let otel_log_layer = log_provider
        .as_ref()
        .map(OpenTelemetryTracingBridge::new);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(DbQueryCountingLayer)
        .with(otel_trace_layer)
        .with(otel_log_layer)
        .init();

    tracing::info!(
        "OpenTelemetry enabled, exporting traces and logs to {} as {}",
        endpoint,
        service_name
    );
}

/// Quick TCP check that the collector is up (resolving the hostname first).
fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://");

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

tokio::task_local! {
    /// Task-local counter for database queries in the current request.
    /// This follows the async task across await points and thread migrations.
    static DB_QUERY_COUNTER: Arc<AtomicU32>;
}

/// Get the current database query count for this request, if available.
pub fn get_query_count() -> Option<u32> {
    DB_QUERY_COUNTER
        .try_with(|counter| counter.load(Ordering::Relaxed))
        .ok()
}

/// A tracing Layer that counts `db.query` spans per HTTP request.
///
/// The store opens one `db.query` span per SQL round trip. Diesel runs
/// synchronously inside the handler's task, so the task-local counter set up
/// by [`query_counting_middleware`] is visible when the span is created.
pub struct DbQueryCountingLayer;

impl<S> Layer<S> for DbQueryCountingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, _attrs: &tracing::span::Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };

        if span.name() == "db.query" {
            let _ = DB_QUERY_COUNTER.try_with(|counter| {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
    }
}

/// Middleware that initializes the per-request database query counter.
///
/// Must wrap the TraceLayer so the counter exists for the whole request.
pub async fn query_counting_middleware(request: Request<Body>, next: Next) -> Response {
    let counter = Arc::new(AtomicU32::new(0));
    DB_QUERY_COUNTER.scope(counter, next.run(request)).await
}

/// Middleware that adds the query count header when `enabled`.
pub async fn db_query_count_header_middleware(
    State(enabled): State<bool>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    if enabled {
        if let Some(count) = get_query_count() {
            if let Ok(value) = HeaderValue::from_str(&count.to_string()) {
                response.headers_mut().insert(DB_QUERY_COUNT_HEADER, value);
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    #[test]
    fn test_counts_only_db_query_spans() {
        let subscriber = tracing_subscriber::registry().with(DbQueryCountingLayer);
        let counter = Arc::new(AtomicU32::new(0));

        tracing::subscriber::with_default(subscriber, || {
            DB_QUERY_COUNTER.sync_scope(counter.clone(), || {
                let _request = tracing::info_span!("http_request").entered();
                let _insert = tracing::info_span!("db.query").entered();
                let _read = tracing::info_span!("db.query").entered();
            });
        });

        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_no_count_outside_request() {
        assert_eq!(get_query_count(), None);
    }

    fn counting_app(enabled: bool) -> Router {
        Router::new()
            .route(
                "/",
                get(|| async {
                    DB_QUERY_COUNTER.with(|c| c.fetch_add(3, Ordering::Relaxed));
                    "ok"
                }),
            )
            .layer(middleware::from_fn_with_state(
                enabled,
                db_query_count_header_middleware,
            ))
            .layer(middleware::from_fn(query_counting_middleware))
    }

    #[tokio::test]
    async fn test_header_reports_count_when_enabled() {
        let response = counting_app(true)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(DB_QUERY_COUNT_HEADER).unwrap(),
            "3"
        );
    }

    #[tokio::test]
    async fn test_header_absent_when_disabled() {
        let response = counting_app(false)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().get(DB_QUERY_COUNT_HEADER).is_none());
    }

    #[test]
    fn test_unreachable_collector() {
        assert!(!collector_reachable("http://definitely-not-a-host.invalid:4317"));
    }
}
