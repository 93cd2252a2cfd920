//! Ringdrift renders a full-bleed background of concentric discs that react
//! to the pointer and to navigation.
//!
//! The composition is a fixed ordered palette of rings. Every frame, each
//! ring is displaced by a depth-scaled pointer-parallax vector; navigation
//! either eases the whole composition toward a per-route offset (translate
//! mode) or rotates the parallax direction by a per-route angle (rotate
//! mode). The API is loop-oriented:
//!
//! - Load and validate a [`BackgroundDef`] into a [`Background`]
//! - Create a [`BackgroundLoop`]
//! - Feed it [`InputEvent`]s and step it, or stream frames into a
//!   [`FrameSink`]
//!
//! For declarative replay (and the CLI), a [`Scenario`] bundles a background
//! with frame-stamped events.
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod eval;
pub mod input;
pub mod render;
pub mod scene;
pub mod session;

pub use crate::foundation::core::{Fps, FrameIndex, Point, Rgba8Premul, Vec2, Viewport};
pub use crate::foundation::error::{RingdriftError, RingdriftResult};

pub use crate::animation::drift::DriftController;
pub use crate::eval::frame::{EvaluatedFrame, EvaluatedRing, evaluate_frame, parallax_vector};
pub use crate::input::pointer::PointerTracker;
pub use crate::render::backend::{FrameRGBA, Surface, draw_frame};
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::render::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::scene::background::{Background, Ring};
pub use crate::scene::color::ColorDef;
pub use crate::scene::model::{BackgroundDef, TargetUnits, TransitionDef, Vec2Def};
pub use crate::session::run_loop::{BackgroundLoop, InputEvent, LoopState, LoopStats};
pub use crate::session::scenario::{EventDef, Scenario, ScenarioDef, TimedEventDef};
