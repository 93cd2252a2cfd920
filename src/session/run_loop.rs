use std::time::{Duration, Instant};

use crate::animation::drift::DriftController;
use crate::eval::frame::evaluate_frame;
use crate::foundation::core::{FrameIndex, Vec2, Viewport};
use crate::foundation::error::{RingdriftError, RingdriftResult};
use crate::input::pointer::PointerTracker;
use crate::render::backend::{FrameRGBA, Surface, draw_frame};
use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
use crate::render::sink::{FrameSink, SinkConfig};
use crate::scene::background::Background;

/// Loop lifecycle. Transitions are one-way: Idle → Running → Stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Created but not yet started.
    Idle,
    /// One frame per tick until stopped.
    Running,
    /// Unmounted. No further frame executes; the state is terminal.
    Stopped,
}

/// Host notifications, delivered between frames on the loop's own thread so
/// no frame ever observes a half-applied event.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Raw pointer-move in viewport pixel coordinates.
    PointerMoved { x: f64, y: f64 },
    /// The viewport changed size.
    Resized { width: u32, height: u32 },
    /// The logical route changed.
    Navigated { route: String },
}

/// Counters accumulated over the loop's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Frames fully rendered.
    pub frames_rendered: u64,
    /// Input events applied (events after `stop` are dropped, not counted).
    pub events_handled: u64,
}

/// Drives one redraw per display frame until stopped.
///
/// Owns all mutable runtime state explicitly: the pointer tracker, the drift
/// controller, the live viewport, and the current route. Everything happens
/// on the caller's thread; interleave [`handle`](Self::handle) and
/// [`step`](Self::step) to simulate a session.
pub struct BackgroundLoop {
    background: Background,
    surface: Box<dyn Surface>,
    pointer: PointerTracker,
    drift: DriftController,
    viewport: Viewport,
    route: Option<String>,
    state: LoopState,
    next_frame: FrameIndex,
    stats: LoopStats,
}

impl BackgroundLoop {
    /// Create a loop drawing to a CPU surface sized to the definition's
    /// viewport.
    pub fn new(background: Background, opts: CpuSurfaceOpts) -> RingdriftResult<Self> {
        let viewport = background.def().viewport;
        Self::with_surface(background, Box::new(CpuSurface::new(viewport, opts)))
    }

    /// Create a loop over a caller-supplied surface.
    pub fn with_surface(
        background: Background,
        mut surface: Box<dyn Surface>,
    ) -> RingdriftResult<Self> {
        let viewport = background.def().viewport;
        surface.resize(viewport);
        let drift = DriftController::new(background.def().smoothing)?;
        Ok(Self {
            background,
            surface,
            pointer: PointerTracker::new(),
            drift,
            viewport,
            route: None,
            state: LoopState::Idle,
            next_frame: FrameIndex(0),
            stats: LoopStats::default(),
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn drift(&self) -> &DriftController {
        &self.drift
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Apply one host notification.
    ///
    /// Dropped silently once the loop is stopped (listeners are detached on
    /// unmount). Navigation resolves the route's drift target exactly once
    /// per change, never per frame; a resize re-resolves the active route so
    /// viewport-fraction targets track the live viewport.
    pub fn handle(&mut self, event: InputEvent) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.stats.events_handled += 1;
        match event {
            InputEvent::PointerMoved { x, y } => self.pointer.on_move(x, y),
            InputEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.surface.resize(self.viewport);
                self.retarget();
            }
            InputEvent::Navigated { route } => {
                self.route = Some(route);
                self.retarget();
            }
        }
    }

    fn retarget(&mut self) {
        let target = match &self.route {
            Some(route) => self.background.resolve_target(route, self.viewport),
            None => Vec2::ZERO,
        };
        self.drift.set_target(target);
    }

    /// Transition Idle → Running. A no-op when already running; stopped loops
    /// cannot be restarted (a fresh mount resets all drift state).
    pub fn start(&mut self) -> RingdriftResult<()> {
        match self.state {
            LoopState::Idle => {
                self.state = LoopState::Running;
                Ok(())
            }
            LoopState::Running => Ok(()),
            LoopState::Stopped => Err(RingdriftError::animation(
                "cannot restart a stopped loop",
            )),
        }
    }

    /// Render exactly one frame: drift easing, then layout, then drawing.
    pub fn step(&mut self) -> RingdriftResult<FrameRGBA> {
        if self.state != LoopState::Running {
            return Err(RingdriftError::animation("step requires a running loop"));
        }

        self.drift.tick();
        let angle = match &self.route {
            Some(route) => self.background.resolve_angle(route),
            None => 0.0,
        };
        let eval = evaluate_frame(
            &self.background,
            self.viewport,
            self.pointer.read(),
            self.drift.current(),
            angle,
        );
        let frame = draw_frame(self.surface.as_mut(), &eval)?;

        self.next_frame = FrameIndex(self.next_frame.0 + 1);
        self.stats.frames_rendered += 1;
        Ok(frame)
    }

    /// Render `frames` frames into `sink` as fast as possible, starting the
    /// loop if it is idle.
    pub fn run(&mut self, frames: u64, sink: &mut dyn FrameSink) -> RingdriftResult<LoopStats> {
        self.run_inner(frames, sink, false)
    }

    /// Like [`run`](Self::run), but sleeps between frames to match the
    /// configured display refresh rate.
    pub fn run_paced(
        &mut self,
        frames: u64,
        sink: &mut dyn FrameSink,
    ) -> RingdriftResult<LoopStats> {
        self.run_inner(frames, sink, true)
    }

    fn run_inner(
        &mut self,
        frames: u64,
        sink: &mut dyn FrameSink,
        paced: bool,
    ) -> RingdriftResult<LoopStats> {
        self.start()?;
        sink.begin(SinkConfig {
            width: self.viewport.width,
            height: self.viewport.height,
            fps: self.background.def().fps,
        })?;

        let frame_dur = Duration::from_secs_f64(self.background.def().fps.frame_duration_secs());
        let mut deadline = Instant::now();
        for _ in 0..frames {
            if paced {
                let now = Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                }
                deadline += frame_dur;
            }
            let idx = self.next_frame;
            let frame = self.step()?;
            sink.push_frame(idx, &frame)?;
        }

        sink.end()?;
        Ok(self.stats)
    }

    /// Cancel the loop. No frame executes afterwards; idempotent.
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sink::InMemorySink;
    use crate::scene::model::BackgroundDef;

    fn background() -> Background {
        let def: BackgroundDef = serde_json::from_value(serde_json::json!({
            "viewport": {"width": 64, "height": 48},
            "palette": ["#D7CCC8", "#BCAAA4", "#A1887F"],
            "transition": {
                "mode": "translate",
                "units": "viewport-fraction",
                "targets": {"about": [-0.25, -0.25]}
            }
        }))
        .unwrap();
        Background::from_def(def).unwrap()
    }

    #[test]
    fn lifecycle_is_one_way() {
        let mut lp = BackgroundLoop::new(background(), CpuSurfaceOpts::default()).unwrap();
        assert_eq!(lp.state(), LoopState::Idle);
        assert!(lp.step().is_err());

        lp.start().unwrap();
        lp.start().unwrap();
        assert_eq!(lp.state(), LoopState::Running);
        lp.step().unwrap();

        lp.stop();
        lp.stop();
        assert_eq!(lp.state(), LoopState::Stopped);
        assert!(lp.step().is_err());
        assert!(lp.start().is_err());
    }

    #[test]
    fn events_after_stop_are_dropped() {
        let mut lp = BackgroundLoop::new(background(), CpuSurfaceOpts::default()).unwrap();
        lp.handle(InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        assert_eq!(lp.stats().events_handled, 1);

        lp.stop();
        lp.handle(InputEvent::PointerMoved { x: 9.0, y: 9.0 });
        lp.handle(InputEvent::Navigated {
            route: "about".to_owned(),
        });
        assert_eq!(lp.stats().events_handled, 1);
    }

    #[test]
    fn navigation_retargets_once_and_resize_reresolves() {
        let mut lp = BackgroundLoop::new(background(), CpuSurfaceOpts::default()).unwrap();
        lp.handle(InputEvent::Navigated {
            route: "about".to_owned(),
        });
        assert_eq!(lp.drift().target(), Vec2::new(-16.0, -12.0));

        // Fraction targets follow the live viewport.
        lp.handle(InputEvent::Resized {
            width: 128,
            height: 96,
        });
        assert_eq!(lp.drift().target(), Vec2::new(-32.0, -24.0));
        assert_eq!(lp.viewport(), Viewport::new(128, 96));

        // Unknown routes fall back to the zero target.
        lp.handle(InputEvent::Navigated {
            route: "missing".to_owned(),
        });
        assert_eq!(lp.drift().target(), Vec2::ZERO);
    }

    #[test]
    fn run_pushes_frames_in_order() {
        let mut lp = BackgroundLoop::new(background(), CpuSurfaceOpts::default()).unwrap();
        let mut sink = InMemorySink::new();
        let stats = lp.run(5, &mut sink).unwrap();

        assert_eq!(stats.frames_rendered, 5);
        assert_eq!(sink.frames().len(), 5);
        for (i, (idx, frame)) in sink.frames().iter().enumerate() {
            assert_eq!(idx.0, i as u64);
            assert_eq!(frame.data.len(), 64 * 48 * 4);
        }
        assert_eq!(sink.config().unwrap().width, 64);
    }
}
