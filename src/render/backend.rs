use crate::eval::frame::EvaluatedFrame;
use crate::foundation::core::{Point, Rgba8Premul, Viewport};
use crate::foundation::error::RingdriftResult;

/// A rendered frame as RGBA8 pixels, premultiplied alpha, tightly packed,
/// row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes; empty for degenerate (zero-area) viewports.
    pub data: Vec<u8>,
}

/// An owned drawable region sized to the viewport.
///
/// Per-frame contract: [`clear`](Surface::clear) once, then any number of
/// [`fill_circle`](Surface::fill_circle) calls in painting order (later discs
/// occlude earlier ones), then [`finish`](Surface::finish) to read the frame
/// back. [`resize`](Surface::resize) reallocates the backing drawable so the
/// next frame covers the full new area.
pub trait Surface {
    fn resize(&mut self, viewport: Viewport);

    fn viewport(&self) -> Viewport;

    /// Erase all prior pixel content for the current dimensions.
    fn clear(&mut self);

    /// Paint one filled, anti-aliased disc with a flat fill. Zero or negative
    /// radii are a no-op, not a fault.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8Premul);

    /// Read back the finished frame.
    fn finish(&mut self) -> RingdriftResult<FrameRGBA>;
}

/// Clear-and-redraw one evaluated frame.
///
/// Rings are submitted in the order the evaluation produced them (ascending
/// palette index), so the innermost discs land on top.
pub fn draw_frame(surface: &mut dyn Surface, frame: &EvaluatedFrame) -> RingdriftResult<FrameRGBA> {
    surface.clear();
    for ring in &frame.rings {
        surface.fill_circle(ring.center, ring.radius, ring.color);
    }
    surface.finish()
}
