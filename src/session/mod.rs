//! The frame loop and declarative scenario replay.

/// The per-frame animation loop and its lifecycle.
pub mod run_loop;
/// Declarative scenarios: a background plus frame-stamped input events.
pub mod scenario;
