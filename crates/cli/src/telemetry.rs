//! Observability wiring.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter`, a text or
//! JSON formatter, and, when an OTLP endpoint is configured, an
//! OpenTelemetry span exporter. Every `tracing` span and event emitted by the
//! workspace crates flows through this registry.

use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace::TracerProvider};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Instrumentation scope name for exported spans. The exported service name
/// is taken from `OTEL_SERVICE_NAME`.
const TRACER_NAME: &str = "trello-callback";

/// Flushes and shuts down the span exporter when dropped.
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("failed to shut down tracer provider: {e}");
            }
        }
    }
}

/// Installs the global subscriber.
///
/// Must be called from within the tokio runtime when `otlp_endpoint` is set;
/// the batch exporter runs on it.
///
/// # Errors
///
/// Fails if `RUST_LOG` is not a valid filter, the OTLP exporter cannot be
/// built, or a global subscriber is already installed.
pub fn init(format: LogFormat, otlp_endpoint: Option<&str>) -> Result<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("invalid RUST_LOG filter")?;

    let provider = match otlp_endpoint {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .build()
                .context("failed to build OTLP span exporter")?;
            Some(TracerProvider::builder().with_batch_exporter(exporter, runtime::Tokio).build())
        },
        None => None,
    };

    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(TRACER_NAME)));

    let registry = tracing_subscriber::registry().with(filter).with(otel_layer);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_span_list(false))
            .try_init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
    }
    .context("failed to install tracing subscriber")?;

    Ok(TelemetryGuard { provider })
}
