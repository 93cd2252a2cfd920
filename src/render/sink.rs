use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::RingdriftResult;
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before any frames are pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Initial frame width in pixels; resize events may change later frames.
    pub width: u32,
    /// Initial frame height in pixels.
    pub height: u32,
    /// The loop's display refresh clock.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order, once per
/// animation frame, until the loop stops.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RingdriftResult<()>;
    /// Push one frame in strictly increasing frame order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RingdriftResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> RingdriftResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RingdriftResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RingdriftResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RingdriftResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inmemory_sink_captures_config_and_frames() {
        let mut sink = InMemorySink::new();
        sink.begin(SinkConfig {
            width: 8,
            height: 8,
            fps: Fps { num: 60, den: 1 },
        })
        .unwrap();
        let frame = FrameRGBA {
            width: 8,
            height: 8,
            data: vec![0; 8 * 8 * 4],
        };
        sink.push_frame(FrameIndex(0), &frame).unwrap();
        sink.push_frame(FrameIndex(1), &frame).unwrap();
        sink.end().unwrap();

        assert_eq!(sink.config().unwrap().width, 8);
        assert_eq!(sink.frames().len(), 2);
        assert_eq!(sink.frames()[1].0, FrameIndex(1));
    }
}
