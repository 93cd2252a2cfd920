//! Rasterization: the drawable surface contract, its CPU implementation, and
//! frame sinks.

/// Surface trait, frame buffer type, and the clear-and-redraw entry point.
pub mod backend;
/// CPU surface implementation powered by `vello_cpu`.
pub mod cpu;
/// Frame sink trait and built-in sinks.
pub mod sink;
