//! Per-frame animation state.

/// Eased drift of the composition center toward a route-determined target.
pub mod drift;
