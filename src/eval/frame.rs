use crate::foundation::core::{Point, Rgba8Premul, Vec2, Viewport};
use crate::scene::background::Background;

/// One positioned, colored disc, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvaluatedRing {
    pub center: Point,
    /// May be zero or negative for degenerate viewports; drawing skips those.
    pub radius: f64,
    pub color: Rgba8Premul,
}

/// The full composition for one frame.
///
/// `rings` is in ascending palette index order, which is also the painting
/// order: the outermost (largest) disc is first so that every later disc
/// occludes it where they overlap.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedFrame {
    /// Composition center: viewport center plus the current drift offset.
    pub center: Point,
    pub rings: Vec<EvaluatedRing>,
}

/// Normalized pointer displacement from the viewport center, in `[-1, 1]` per
/// axis for on-screen pointers. Zero for degenerate viewports.
pub fn parallax_vector(pointer: Point, viewport: Viewport) -> Vec2 {
    if viewport.is_degenerate() {
        return Vec2::ZERO;
    }
    let c = viewport.center();
    Vec2::new((pointer.x - c.x) / c.x, (pointer.y - c.y) / c.y)
}

/// Evaluate one frame of the composition.
///
/// `drift` is the eased composition-center offset (zero outside translate
/// mode); `angle_rad` is the route's parallax rotation (zero outside rotate
/// mode). Per ring, the parallax vector is rotated, then scaled by
/// `parallax_px` and the ring's depth factor.
#[tracing::instrument(skip(background), level = "trace")]
pub fn evaluate_frame(
    background: &Background,
    viewport: Viewport,
    pointer: Point,
    drift: Vec2,
    angle_rad: f64,
) -> EvaluatedFrame {
    let center = viewport.center() + drift;

    let p = parallax_vector(pointer, viewport);
    let (sin, cos) = angle_rad.sin_cos();
    let rotated = Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);

    let magnitude = background.def().parallax_px;
    let rings = background
        .rings()
        .iter()
        .map(|ring| EvaluatedRing {
            center: center + rotated * (magnitude * ring.depth),
            radius: background.ring_radius(viewport, ring.index),
            color: ring.color,
        })
        .collect();

    EvaluatedFrame { center, rings }
}
