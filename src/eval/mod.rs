//! Pure per-frame layout evaluation.

/// Frame evaluation: pointer parallax plus drift into positioned discs.
pub mod frame;
