//! Host input state consumed by the frame loop.

/// Last-observed pointer position.
pub mod pointer;
