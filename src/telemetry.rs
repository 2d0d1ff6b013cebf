//! Opt-in tracing setup for hosts embedding `opsboard`.
//!
//! The crate only emits `tracing` events. Hosts either install their own
//! subscriber or, with the `telemetry` feature, call one of the helpers below.

/// Filter used when `RUST_LOG` is unset: dashboard events at `info`, the
/// live refresh path at `debug` so discarded notifications stay visible.
pub const DEFAULT_TRACING_FILTER: &str = "opsboard=info,opsboard::live=debug";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the feature is disabled or a global subscriber exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_TRACING_FILTER)
}

/// Like [`init_default_tracing`] with caller-chosen fallback directives.
#[must_use]
pub fn init_tracing_with_filter(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_directives));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_TRACING_FILTER, init_default_tracing, init_tracing_with_filter};

    #[test]
    fn default_filter_scopes_to_this_crate() {
        assert!(
            DEFAULT_TRACING_FILTER
                .split(',')
                .all(|directive| directive.starts_with("opsboard"))
        );
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn tracing_init_is_a_no_op_without_feature() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_filter("warn"));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn only_the_first_subscriber_is_installed() {
        let _ = init_tracing_with_filter("warn");
        assert!(!init_default_tracing());
    }
}
