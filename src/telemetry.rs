//! Opt-in log output for the image tooling.
//!
//! The library itself only emits `tracing` events; a binary decides whether
//! anything is printed.

/// Environment variable read for the log filter, e.g. `trajectory_plot=debug`.
pub const LOG_ENV: &str = "TRAJECTORY_PLOT_LOG";

/// Filter used when `LOG_ENV` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "trajectory_plot=info,generate_trajectory_pngs=info";

/// Installs a compact stderr subscriber filtered by `LOG_ENV`.
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback filter.
#[must_use]
pub fn init_tracing(
    #[cfg_attr(not(feature = "telemetry"), allow(unused_variables))] fallback_directive: &str,
) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
