/*!
 * Structured Tracing
 * Subscriber setup and per-demonstration spans using the tracing crate
 */

use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - PLAYGROUND_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let use_json = std::env::var("PLAYGROUND_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let initialized = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_names(true)
                    .compact(),
            )
            .try_init()
    };

    if initialized.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one demonstration run
///
/// Logs the elapsed time when dropped.
pub struct DemoSpan {
    span: tracing::Span,
    start: Instant,
    demo: &'static str,
}

impl DemoSpan {
    pub fn new(demo: &'static str, contexts: usize) -> Self {
        let span = span!(
            Level::INFO,
            "demo",
            demo = demo,
            contexts = contexts,
            duration_us = tracing::field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
            demo,
        }
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }
}

impl Drop for DemoSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_us", duration.as_micros() as u64);
        let _entered = self.span.enter();
        debug!(
            demo = self.demo,
            duration_us = duration.as_micros() as u64,
            "demo finished"
        );
    }
}
