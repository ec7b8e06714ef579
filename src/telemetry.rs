//! Telemetry helpers for applications embedding `scroll-chart-rs`.
//!
//! The widget only emits `tracing` events. Installing a subscriber is left to
//! the host, either through these helpers or its own setup.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Honors `RUST_LOG` and falls back to `info`.
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Like [`init_default_tracing`] with an explicit fallback directive, e.g.
/// `"scroll_chart=debug"`, used when `RUST_LOG` is unset or invalid.
#[must_use]
pub fn init_tracing_with_filter(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
