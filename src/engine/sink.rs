use std::sync::{Arc, Mutex, MutexGuard};

use crate::foundation::core::{Fps, FrameIndex, Viewport};
use crate::foundation::error::{GridmorphError, GridmorphResult};
use crate::render::geometry::FrameGeometry;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Stream parameters handed to a sink before the first frame.
pub struct SinkConfig {
    pub fps: Fps,
    pub viewport: Viewport,
}

/// Receives produced frames in strictly increasing frame-index order.
///
/// `begin` is called once before the first frame, `end` once after the last.
/// An error from any method stops the producing loop.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> GridmorphResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameGeometry) -> GridmorphResult<()>;
    fn end(&mut self) -> GridmorphResult<()>;
}

#[derive(Debug, Default)]
struct SinkInner {
    config: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameGeometry)>,
    ended: bool,
}

/// Sink that buffers frames in memory behind a shared handle.
///
/// Clones share the same buffer, so a caller can keep one handle while the
/// engine thread consumes the other and inspect the output afterwards.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    inner: Arc<Mutex<SinkInner>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> GridmorphResult<MutexGuard<'_, SinkInner>> {
        self.inner
            .lock()
            .map_err(|_| GridmorphError::engine("in-memory sink mutex poisoned"))
    }

    /// The config received from `begin`, if any.
    pub fn config(&self) -> GridmorphResult<Option<SinkConfig>> {
        Ok(self.lock()?.config)
    }

    /// Snapshot of all frames received so far.
    pub fn frames(&self) -> GridmorphResult<Vec<(FrameIndex, FrameGeometry)>> {
        Ok(self.lock()?.frames.clone())
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> GridmorphResult<bool> {
        Ok(self.lock()?.ended)
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> GridmorphResult<()> {
        self.lock()?.config = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameGeometry) -> GridmorphResult<()> {
        self.lock()?.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> GridmorphResult<()> {
        self.lock()?.ended = true;
        Ok(())
    }
}
