//! Logging setup
//!
//! The engine logs through the `log` facade; per-pass statistics at
//! `debug`, per-volume flux updates at `trace`. Binaries call [`init`]
//! once at startup to install the `env_logger` backend.

/// Install the `env_logger` backend
///
/// Honors `RUST_LOG`; defaults to `info` when unset. Later calls are
/// no-ops, so tests and embedding hosts may call it freely.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
