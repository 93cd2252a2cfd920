use serde::{Deserialize, Serialize};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RingdriftError, RingdriftResult};
use crate::render::cpu::CpuSurfaceOpts;
use crate::render::sink::{FrameSink, SinkConfig};
use crate::scene::background::Background;
use crate::scene::model::BackgroundDef;
use crate::session::run_loop::{BackgroundLoop, InputEvent, LoopStats};

/// One frame-stamped input event. The event applies before frame `frame`
/// renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedEventDef {
    pub frame: u64,
    #[serde(flatten)]
    pub event: EventDef,
}

/// Serde-facing input event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EventDef {
    PointerMove { x: f64, y: f64 },
    Resize { width: u32, height: u32 },
    Navigate { route: String },
}

impl From<EventDef> for InputEvent {
    fn from(e: EventDef) -> Self {
        match e {
            EventDef::PointerMove { x, y } => Self::PointerMoved { x, y },
            EventDef::Resize { width, height } => Self::Resized { width, height },
            EventDef::Navigate { route } => Self::Navigated { route },
        }
    }
}

/// A declarative session: a background plus the input events driving it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDef {
    pub background: BackgroundDef,
    #[serde(default)]
    pub events: Vec<TimedEventDef>,
}

impl ScenarioDef {
    pub fn validate(&self) -> RingdriftResult<()> {
        self.background.validate()?;
        if !self.events.windows(2).all(|w| w[0].frame <= w[1].frame) {
            return Err(RingdriftError::validation(
                "scenario events must be sorted by frame",
            ));
        }
        Ok(())
    }
}

/// A validated scenario, ready to replay.
///
/// Replay is deterministic: a fixed event sequence produces the same frames
/// every time, independent of wall-clock timing.
#[derive(Debug, Clone)]
pub struct Scenario {
    background: Background,
    events: Vec<TimedEventDef>,
}

impl Scenario {
    pub fn from_def(def: ScenarioDef) -> RingdriftResult<Self> {
        def.validate()?;
        let background = Background::from_def(def.background)?;
        Ok(Self {
            background,
            events: def.events,
        })
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn events(&self) -> &[TimedEventDef] {
        &self.events
    }

    /// Replay `frames` frames into `sink` as fast as possible.
    pub fn play(
        &self,
        frames: u64,
        opts: CpuSurfaceOpts,
        sink: &mut dyn FrameSink,
    ) -> RingdriftResult<LoopStats> {
        self.play_inner(frames, opts, sink, false)
    }

    /// Replay at the configured display refresh rate.
    pub fn play_paced(
        &self,
        frames: u64,
        opts: CpuSurfaceOpts,
        sink: &mut dyn FrameSink,
    ) -> RingdriftResult<LoopStats> {
        self.play_inner(frames, opts, sink, true)
    }

    fn play_inner(
        &self,
        frames: u64,
        opts: CpuSurfaceOpts,
        sink: &mut dyn FrameSink,
        paced: bool,
    ) -> RingdriftResult<LoopStats> {
        let mut lp = BackgroundLoop::new(self.background.clone(), opts)?;
        lp.start()?;
        sink.begin(SinkConfig {
            width: lp.viewport().width,
            height: lp.viewport().height,
            fps: self.background.def().fps,
        })?;

        let frame_dur = std::time::Duration::from_secs_f64(
            self.background.def().fps.frame_duration_secs(),
        );
        let mut deadline = std::time::Instant::now();
        let mut next_event = 0usize;
        for f in 0..frames {
            if paced {
                let now = std::time::Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                }
                deadline += frame_dur;
            }

            while next_event < self.events.len() && self.events[next_event].frame <= f {
                lp.handle(self.events[next_event].event.clone().into());
                next_event += 1;
            }

            let frame = lp.step()?;
            sink.push_frame(FrameIndex(f), &frame)?;
        }

        sink.end()?;
        let stats = lp.stats();
        lp.stop();
        Ok(stats)
    }
}
