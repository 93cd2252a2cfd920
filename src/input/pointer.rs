use crate::foundation::core::Point;

/// Last observed pointer position in viewport pixel coordinates.
///
/// Overwritten by every pointer-move notification, unthrottled and
/// unvalidated; read (never written) by the frame loop. Starts at the origin
/// until the pointer first moves, which renders as a fixed base position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    x: f64,
    y: f64,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored coordinates.
    pub fn on_move(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Read the last stored coordinates. Never blocks, always succeeds.
    pub fn read(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_origin_and_keeps_last_move() {
        let mut p = PointerTracker::new();
        assert_eq!(p.read(), Point::new(0.0, 0.0));
        p.on_move(12.5, -3.0);
        p.on_move(640.0, 480.0);
        assert_eq!(p.read(), Point::new(640.0, 480.0));
    }
}
