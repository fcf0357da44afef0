//! Opt-in `tracing` setup for hosts of `chart-model`.
//!
//! The engine only emits events: `debug` when data sets are replaced or
//! chart bounds recomputed, `trace` for per-entry mutations and touch
//! resolution, `warn` when a render pass is skipped. Hosts that already own
//! a subscriber never need this module.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart_model=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with caller-chosen fallback directives,
/// e.g. `"chart_model=trace"` while debugging touch resolution.
#[must_use]
pub fn init_tracing_with_filter(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_directives));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::*;

    #[test]
    fn disabled_feature_installs_nothing() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_filter("chart_model=trace"));
    }
}
