use crate::animation::state::{Command, TransformationState};
use crate::foundation::core::{Fps, FrameIndex, Viewport};
use crate::foundation::error::{GridmorphError, GridmorphResult};
use crate::render::geometry::FrameGeometry;
use crate::render::producer::render_frame;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Timing and viewport configuration for an animation run.
pub struct AnimConfig {
    /// Consumer tick rate; state advances by a fixed `1/fps` per step.
    pub fps: Fps,
    /// Duration of one full interpolation, in seconds.
    pub anim_time_secs: f64,
    /// World-to-screen mapping used by the frame producer.
    pub viewport: Viewport,
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            fps: Fps { num: 60, den: 1 },
            anim_time_secs: 1.5,
            viewport: Viewport::default(),
        }
    }
}

impl AnimConfig {
    pub fn validate(self) -> GridmorphResult<()> {
        self.fps.validate()?;
        self.viewport.validate()?;
        if !self.anim_time_secs.is_finite() || self.anim_time_secs <= 0.0 {
            return Err(GridmorphError::animation(
                "anim_time_secs must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Synchronous animation driver.
///
/// A session front-loads config validation, then steps deterministically:
/// each `step` advances exactly one tick and produces that tick's frame.
/// Both the threaded engine and script replay drive this same path, so a
/// given command timeline always yields the same frames.
#[derive(Debug)]
pub struct AnimSession {
    cfg: AnimConfig,
    state: TransformationState,
    next_frame: FrameIndex,
}

impl AnimSession {
    pub fn new(cfg: AnimConfig) -> GridmorphResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            state: TransformationState::new(),
            next_frame: FrameIndex(0),
        })
    }

    pub fn config(&self) -> AnimConfig {
        self.cfg
    }

    pub fn state(&self) -> &TransformationState {
        &self.state
    }

    /// Apply one command to the state machine.
    pub fn apply(&mut self, command: Command) {
        tracing::debug!(?command, "apply command");
        self.state.apply(command);
    }

    /// Advance one tick and produce its frame. Commands must be applied
    /// before the tick they should take effect in.
    pub fn step(&mut self) -> (FrameIndex, FrameGeometry) {
        self.state
            .tick(self.cfg.fps.frame_duration_secs(), self.cfg.anim_time_secs);
        let frame = render_frame(&self.state, &self.cfg.viewport);
        let idx = self.next_frame;
        self.next_frame = FrameIndex(idx.0 + 1);
        (idx, frame)
    }
}
