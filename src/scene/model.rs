use crate::foundation::core::{Fps, Viewport};
use crate::foundation::error::{RingdriftError, RingdriftResult};
use crate::scene::color::ColorDef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A 2D offset in a definition file. Accepts `[x, y]` or `{x, y}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec2Def {
    pub x: f64,
    pub y: f64,
}

impl Vec2Def {
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<'de> Deserialize<'de> for Vec2Def {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 2]),
            Obj { x: f64, y: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y]) => Ok(Self { x, y }),
            Repr::Obj { x, y } => Ok(Self { x, y }),
        }
    }
}

/// How translate-mode targets are expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetUnits {
    /// Absolute pixel offsets.
    #[default]
    Px,
    /// Fractions of the live viewport; re-resolved against it on every resize.
    ViewportFraction,
}

/// Route-change reaction policy. The policies are mutually exclusive over the
/// same ring-rendering core; a deployment picks exactly one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum TransitionDef {
    /// Route changes retarget an eased drift of the whole composition center.
    Translate {
        #[serde(default)]
        units: TargetUnits,
        targets: BTreeMap<String, Vec2Def>,
    },
    /// Route changes rotate the pointer-parallax direction by a fixed per-route
    /// angle, applied immediately (no easing).
    Rotate { angles_rad: BTreeMap<String, f64> },
    /// Single-page variant: navigation leaves the composition untouched.
    #[default]
    None,
}

impl TransitionDef {
    fn validate(&self) -> RingdriftResult<()> {
        match self {
            Self::Translate { targets, .. } => {
                for (route, t) in targets {
                    if !t.is_finite() {
                        return Err(RingdriftError::validation(format!(
                            "translate target for route '{route}' must be finite"
                        )));
                    }
                }
                Ok(())
            }
            Self::Rotate { angles_rad } => {
                for (route, a) in angles_rad {
                    if !a.is_finite() {
                        return Err(RingdriftError::validation(format!(
                            "rotation angle for route '{route}' must be finite"
                        )));
                    }
                }
                Ok(())
            }
            Self::None => Ok(()),
        }
    }
}

/// Boundary definition of a ring background composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundDef {
    /// Initial viewport; resize notifications override it at runtime.
    pub viewport: Viewport,
    /// Display refresh clock, used only for real-time pacing.
    #[serde(default = "default_fps")]
    pub fps: Fps,
    /// Ordered ring colors, outermost first. Painting order follows this order.
    pub palette: Vec<ColorDef>,
    /// Exponential easing constant `k` applied once per frame.
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
    /// Pointer-parallax magnitude in pixels for the innermost ring.
    #[serde(default = "default_parallax_px")]
    pub parallax_px: f64,
    /// Outermost ring radius as a fraction of the viewport's smaller side.
    #[serde(default = "default_radius_scale")]
    pub radius_scale: f64,
    #[serde(default)]
    pub transition: TransitionDef,
}

fn default_fps() -> Fps {
    Fps { num: 60, den: 1 }
}

fn default_smoothing() -> f64 {
    0.05
}

fn default_parallax_px() -> f64 {
    50.0
}

fn default_radius_scale() -> f64 {
    0.4
}

impl BackgroundDef {
    pub fn validate(&self) -> RingdriftResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.palette.is_empty() {
            return Err(RingdriftError::validation(
                "palette must have at least one color",
            ));
        }
        for (i, c) in self.palette.iter().enumerate() {
            if !c.is_finite() {
                return Err(RingdriftError::validation(format!(
                    "palette color {i} must be finite"
                )));
            }
        }
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 || self.smoothing > 1.0 {
            return Err(RingdriftError::validation(
                "smoothing must be in (0, 1]",
            ));
        }
        if !self.parallax_px.is_finite() || self.parallax_px < 0.0 {
            return Err(RingdriftError::validation(
                "parallax_px must be finite and >= 0",
            ));
        }
        if !self.radius_scale.is_finite() || self.radius_scale <= 0.0 || self.radius_scale > 1.0 {
            return Err(RingdriftError::validation(
                "radius_scale must be in (0, 1]",
            ));
        }
        self.transition.validate()
    }
}
