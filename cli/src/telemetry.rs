//! Telemetry helpers for structured logging.

/// Install an env-filtered fmt subscriber unless one is already set.
///
/// Verbosity follows `RUST_LOG` (e.g. `RUST_LOG=clinic_simulator_core_rs=debug`).
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
