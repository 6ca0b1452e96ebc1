use crate::animation::state::Command;
use crate::engine::session::{AnimConfig, AnimSession};
use crate::engine::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, Viewport};
use crate::foundation::error::{GridmorphError, GridmorphResult};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A headless command timeline: which commands arrive at which frames.
///
/// Scripts are a pure data model (JSON) replayed deterministically through
/// an [`AnimSession`]; they stand in for an interactive input source.
pub struct Script {
    /// Consumer tick rate.
    pub fps: Fps,
    /// Duration of one full interpolation, in seconds.
    #[serde(default = "default_anim_time_secs")]
    pub anim_time_secs: f64,
    /// World-to-screen mapping.
    #[serde(default)]
    pub viewport: Viewport,
    /// Total frames to produce.
    pub duration_frames: u64,
    /// Scheduled commands, sorted by frame.
    pub steps: Vec<ScriptStep>,
}

fn default_anim_time_secs() -> f64 {
    1.5
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A command scheduled at a frame.
pub struct ScriptStep {
    /// Frame at which the command is applied, before that frame's tick.
    pub at: FrameIndex,
    /// The command to apply.
    pub command: Command,
}

impl Script {
    pub fn config(&self) -> AnimConfig {
        AnimConfig {
            fps: self.fps,
            anim_time_secs: self.anim_time_secs,
            viewport: self.viewport,
        }
    }

    pub fn validate(&self) -> GridmorphResult<()> {
        self.config().validate()?;
        if self.duration_frames == 0 {
            return Err(GridmorphError::validation(
                "Script duration_frames must be > 0",
            ));
        }
        if !self.steps.windows(2).all(|w| w[0].at.0 <= w[1].at.0) {
            return Err(GridmorphError::animation(
                "Script steps must be sorted by frame",
            ));
        }
        if let Some(last) = self.steps.last()
            && last.at.0 >= self.duration_frames
        {
            return Err(GridmorphError::animation(
                "Script steps must be within duration_frames",
            ));
        }
        Ok(())
    }
}

/// Replay a script through a fresh session, pushing every produced frame to
/// the sink in order.
#[tracing::instrument(skip(script, sink), fields(frames = script.duration_frames, steps = script.steps.len()))]
pub fn replay(script: &Script, sink: &mut dyn FrameSink) -> GridmorphResult<()> {
    script.validate()?;
    let mut session = AnimSession::new(script.config())?;
    sink.begin(SinkConfig {
        fps: script.fps,
        viewport: script.viewport,
    })?;

    let mut next_step = 0usize;
    for f in 0..script.duration_frames {
        while next_step < script.steps.len() && script.steps[next_step].at.0 == f {
            session.apply(script.steps[next_step].command.clone());
            next_step += 1;
        }
        let (idx, frame) = session.step();
        sink.push_frame(idx, &frame)?;
    }

    sink.end()
}
