//! # Logging Setup
//!
//! Reconcilers emit structured `tracing` events with a `resource_type` field and, where an
//! entity is addressed, an `id` field:
//!
//! - `debug!` before each remote call, with the outbound payload;
//! - `info!` when an operation completes a transition;
//! - `warn!` when a remote call or a policy check fails.
//!
//! Hosts that want these events on stderr call [`setup_tracing`] once at startup.
//!
//! ## Environment Variables
//!
//! `RUST_LOG` controls verbosity:
//! - `RUST_LOG=info` - completed operations and failures
//! - `RUST_LOG=debug` - every remote call with its payload
//! - `RUST_LOG=reconcile_framework=debug,n8n_provider_core=info` - per-crate levels

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // resource_type already names the source
        .compact()
        .try_init();
}
