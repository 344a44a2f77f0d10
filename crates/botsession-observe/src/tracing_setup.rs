//! Subscriber setup for hosts embedding the session middleware.
//!
//! The session crates only emit `tracing` events: loads and saves at
//! `debug`, provisioning at `info`, tolerated "already exists" errors at
//! `warn`. Nothing is printed until a host installs a subscriber, e.g.
//!
//! ```no_run
//! use botsession_observe::tracing_setup::{init_tracing, TracingOptions};
//!
//! init_tracing(&TracingOptions::default()).unwrap();
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: session provisioning is visible,
/// per-update traffic is not.
pub const DEFAULT_FILTER: &str = "warn,botsession_core=info,botsession_infra=info";

static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct TracingOptions {
    /// Directives used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    /// Also export spans through OpenTelemetry to stdout.
    pub enable_otel: bool,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            default_filter: DEFAULT_FILTER.to_string(),
            enable_otel: false,
        }
    }
}

impl TracingOptions {
    /// `RUST_LOG` when it parses, otherwise [`Self::default_filter`].
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Install the global subscriber described by `options`.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing(options: &TracingOptions) -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let registry = tracing_subscriber::registry()
        .with(options.env_filter())
        .with(fmt_layer);

    if !options.enable_otel {
        registry.try_init()?;
        return Ok(());
    }

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .build();
    let otel_layer = tracing_opentelemetry::layer().with_tracer(provider.tracer("botsession"));
    registry.with(otel_layer).try_init()?;

    let _ = TRACER_PROVIDER.set(provider.clone());
    opentelemetry::global::set_tracer_provider(provider);
    Ok(())
}

/// Flush buffered spans. No-op unless OpenTelemetry export was enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
