use crate::foundation::core::Vec2;
use crate::foundation::error::{RingdriftError, RingdriftResult};

/// Eases a 2D offset toward a retargetable goal, one step per frame.
///
/// `current` is read by layout every frame; `target` is overwritten whenever
/// navigation resolves to a new offset. Easing is exponential:
/// `current += (target - current) * k`. The offset approaches the target
/// asymptotically and never reaches it exactly, which reads as settled after
/// roughly a second at 60 Hz with the reference `k = 0.05`.
#[derive(Clone, Copy, Debug)]
pub struct DriftController {
    current: Vec2,
    target: Vec2,
    smoothing: f64,
}

impl DriftController {
    /// Create a controller at rest at the origin.
    ///
    /// `smoothing` is the per-frame easing constant `k`, required in `(0, 1]`.
    pub fn new(smoothing: f64) -> RingdriftResult<Self> {
        if !smoothing.is_finite() || smoothing <= 0.0 || smoothing > 1.0 {
            return Err(RingdriftError::animation("smoothing must be in (0, 1]"));
        }
        Ok(Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            smoothing,
        })
    }

    /// Overwrite the target. Leaves `current` untouched; the next ticks ease
    /// toward the new goal from wherever the offset is now.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Advance one frame of easing. Call exactly once per animation frame,
    /// before reading [`current`](Self::current) for layout.
    pub fn tick(&mut self) {
        self.current += (self.target - self.current) * self.smoothing;
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }
}
