//! Boundary scene model: serde definitions, palette colors, and the validated
//! [`Background`](background::Background) the loop runs against.

/// Validated background composition and its derived ring palette.
pub mod background;
/// Color definitions accepted by palette configuration.
pub mod color;
/// Serde-facing definition structs.
pub mod model;
