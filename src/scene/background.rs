use crate::foundation::core::{Rgba8Premul, Vec2, Viewport};
use crate::foundation::error::RingdriftResult;
use crate::scene::model::{BackgroundDef, TargetUnits, TransitionDef};

/// One concentric disc of the palette, in painting order.
///
/// `depth` grows strictly with the index, from `1/N` for the outermost ring to
/// `1` for the innermost, and scales how strongly the ring reacts to pointer
/// parallax.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub index: usize,
    pub color: Rgba8Premul,
    pub depth: f64,
}

/// A validated background composition with its derived ring palette.
///
/// Construction runs [`BackgroundDef::validate`]; everything downstream can
/// assume a non-empty palette and finite constants.
#[derive(Clone, Debug)]
pub struct Background {
    def: BackgroundDef,
    rings: Vec<Ring>,
}

impl Background {
    pub fn from_def(def: BackgroundDef) -> RingdriftResult<Self> {
        def.validate()?;
        let n = def.palette.len();
        let rings = def
            .palette
            .iter()
            .enumerate()
            .map(|(i, c)| Ring {
                index: i,
                color: c.to_rgba8_premul(),
                depth: (i + 1) as f64 / n as f64,
            })
            .collect();
        Ok(Self { def, rings })
    }

    pub fn def(&self) -> &BackgroundDef {
        &self.def
    }

    /// Rings in ascending index order (the painting order).
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Radius of ring `index` for the given viewport.
    ///
    /// `min(w, h) * radius_scale * (1 - i/N)`: strictly decreasing with the
    /// index, zero for a degenerate viewport.
    pub fn ring_radius(&self, viewport: Viewport, index: usize) -> f64 {
        let n = self.rings.len() as f64;
        viewport.min_side() * self.def.radius_scale * (1.0 - index as f64 / n)
    }

    /// Resolve a route to its drift target in pixels.
    ///
    /// Unknown routes and non-translate policies resolve to zero, never an
    /// error. Viewport-fraction targets are scaled against the live viewport.
    pub fn resolve_target(&self, route: &str, viewport: Viewport) -> Vec2 {
        let TransitionDef::Translate { units, targets } = &self.def.transition else {
            return Vec2::ZERO;
        };
        let Some(t) = targets.get(route) else {
            return Vec2::ZERO;
        };
        match units {
            TargetUnits::Px => Vec2::new(t.x, t.y),
            TargetUnits::ViewportFraction => Vec2::new(
                t.x * f64::from(viewport.width),
                t.y * f64::from(viewport.height),
            ),
        }
    }

    /// Resolve a route to its parallax rotation angle in radians.
    ///
    /// Zero for unknown routes and non-rotate policies.
    pub fn resolve_angle(&self, route: &str) -> f64 {
        let TransitionDef::Rotate { angles_rad } = &self.def.transition else {
            return 0.0;
        };
        angles_rad.get(route).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::color::ColorDef;
    use crate::scene::model::Vec2Def;
    use std::collections::BTreeMap;

    fn def_with_palette(n: usize) -> BackgroundDef {
        serde_json::from_value(serde_json::json!({
            "viewport": {"width": 800, "height": 600},
            "palette": (0..n).map(|_| "#8D6E63").collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    #[test]
    fn radii_strictly_decrease_and_depth_strictly_increases() {
        let bg = Background::from_def(def_with_palette(8)).unwrap();
        let vp = Viewport::new(800, 600);
        for w in bg.rings().windows(2) {
            assert!(w[0].depth < w[1].depth);
            assert!(bg.ring_radius(vp, w[0].index) > bg.ring_radius(vp, w[1].index));
        }
        assert!((bg.rings()[0].depth - 1.0 / 8.0).abs() < 1e-12);
        assert!((bg.rings()[7].depth - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reference_radii_for_three_rings() {
        let bg = Background::from_def(def_with_palette(3)).unwrap();
        let vp = Viewport::new(800, 600);
        assert!((bg.ring_radius(vp, 0) - 240.0).abs() < 1e-9);
        assert!((bg.ring_radius(vp, 1) - 160.0).abs() < 1e-9);
        assert!((bg.ring_radius(vp, 2) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_viewport_collapses_radii() {
        let bg = Background::from_def(def_with_palette(3)).unwrap();
        assert_eq!(bg.ring_radius(Viewport::new(0, 600), 0), 0.0);
    }

    #[test]
    fn unknown_route_resolves_to_zero() {
        let mut def = def_with_palette(3);
        let mut targets = BTreeMap::new();
        targets.insert("about".to_owned(), Vec2Def { x: -240.0, y: -180.0 });
        def.transition = TransitionDef::Translate {
            units: TargetUnits::Px,
            targets,
        };
        let bg = Background::from_def(def).unwrap();
        let vp = Viewport::new(800, 600);
        assert_eq!(bg.resolve_target("about", vp), Vec2::new(-240.0, -180.0));
        assert_eq!(bg.resolve_target("no-such-route", vp), Vec2::ZERO);
        assert_eq!(bg.resolve_angle("about"), 0.0);
    }

    #[test]
    fn fraction_targets_scale_with_the_viewport() {
        let mut def = def_with_palette(3);
        let mut targets = BTreeMap::new();
        targets.insert("about".to_owned(), Vec2Def { x: -0.3, y: -0.3 });
        def.transition = TransitionDef::Translate {
            units: TargetUnits::ViewportFraction,
            targets,
        };
        let bg = Background::from_def(def).unwrap();
        assert_eq!(
            bg.resolve_target("about", Viewport::new(800, 600)),
            Vec2::new(-240.0, -180.0)
        );
        assert_eq!(
            bg.resolve_target("about", Viewport::new(400, 300)),
            Vec2::new(-120.0, -90.0)
        );
    }

    #[test]
    fn rotate_policy_resolves_angles_only() {
        let mut def = def_with_palette(3);
        let mut angles = BTreeMap::new();
        angles.insert("about".to_owned(), std::f64::consts::FRAC_PI_4);
        def.transition = TransitionDef::Rotate { angles_rad: angles };
        let bg = Background::from_def(def).unwrap();
        let vp = Viewport::new(800, 600);
        assert_eq!(bg.resolve_angle("about"), std::f64::consts::FRAC_PI_4);
        assert_eq!(bg.resolve_angle("home"), 0.0);
        assert_eq!(bg.resolve_target("about", vp), Vec2::ZERO);
    }

    #[test]
    fn from_def_rejects_invalid_defs() {
        let mut def = def_with_palette(3);
        def.palette = Vec::<ColorDef>::new();
        assert!(Background::from_def(def).is_err());
    }
}
