use crate::animation::lerp::Lerp;
use crate::foundation::core::{Mat2, Vec2};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A transformation request, produced by an input source and consumed
/// exactly once by the state machine.
pub enum Command {
    /// Compose a new matrix step onto the running transformation and
    /// animate toward the result.
    Transform {
        /// The step to apply, in application order (most-recent-last).
        matrix: Mat2,
        /// The input vector paired with this step.
        vector: Vec2,
    },
    /// Snap back to the identity transformation. Instantaneous, no
    /// animation.
    Reset {
        /// The input vector to show after the reset.
        vector: Vec2,
    },
}

/// The evolving total transformation and its animation progress.
///
/// `current` is always the entrywise interpolation of `start` toward
/// `target` at progress `t`; it is recomputed on every tick and never
/// mutated directly. `t = 1` means settled: no interpolation pending.
#[derive(Clone, Copy, Debug)]
pub struct TransformationState {
    start: Mat2,
    target: Mat2,
    current: Mat2,
    vector: Vec2,
    t: f64,
}

impl Default for TransformationState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformationState {
    /// A settled identity state with the vector `(1, 1)`.
    pub fn new() -> Self {
        Self {
            start: Mat2::IDENTITY,
            target: Mat2::IDENTITY,
            current: Mat2::IDENTITY,
            vector: Vec2::new(1.0, 1.0),
            t: 1.0,
        }
    }

    /// Apply one command.
    ///
    /// A `Transform` snapshots the running target as the new interpolation
    /// start, composes the step on the left (`target = m * target`) and
    /// restarts progress at `t = 0`. Applying several transforms between
    /// ticks composes them in order: only the latest target survives as the
    /// interpolation endpoint.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Transform { matrix, vector } => {
                self.vector = vector;
                self.start = self.target;
                self.target = matrix * self.target;
                self.t = 0.0;
            }
            Command::Reset { vector } => {
                self.start = Mat2::IDENTITY;
                self.target = Mat2::IDENTITY;
                self.current = Mat2::IDENTITY;
                self.vector = vector;
                self.t = 1.0;
            }
        }
    }

    /// Advance animation progress by `dt_secs` against a full interpolation
    /// duration of `anim_time_secs`, clamping at settled. Once settled,
    /// further ticks leave the matrix untouched.
    pub fn tick(&mut self, dt_secs: f64, anim_time_secs: f64) {
        if self.t >= 1.0 {
            return;
        }
        let dt = dt_secs.max(0.0);
        self.t = (self.t + dt / anim_time_secs).min(1.0);
        self.current = Mat2::lerp(&self.start, &self.target, self.t);
    }

    pub fn start_matrix(&self) -> Mat2 {
        self.start
    }

    pub fn target_matrix(&self) -> Mat2 {
        self.target
    }

    pub fn current_matrix(&self) -> Mat2 {
        self.current
    }

    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    /// Animation progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.t
    }

    pub fn is_settled(&self) -> bool {
        self.t >= 1.0
    }

    /// The cumulative composition of all steps applied since the last
    /// reset, in application order. This readout updates immediately on
    /// every applied `Transform`, independent of the animated matrix: the
    /// settled endpoint of the animation is the net transformation.
    pub fn net_matrix(&self) -> Mat2 {
        self.target
    }

    /// The image of the input vector under the interpolated matrix.
    pub fn current_vector(&self) -> Vec2 {
        self.current * self.vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANIM_TIME: f64 = 1.5;

    fn settled(state: &mut TransformationState) {
        state.tick(10.0 * ANIM_TIME, ANIM_TIME);
    }

    #[test]
    fn transform_when_settled_snapshots_the_target() {
        let mut state = TransformationState::new();
        let a = Mat2::from_rows([[2.0, 0.0], [0.0, 1.0]]);
        state.apply(Command::Transform {
            matrix: a,
            vector: Vec2::new(1.0, 1.0),
        });
        settled(&mut state);

        let b = Mat2::from_rows([[0.0, -1.0], [1.0, 0.0]]);
        state.apply(Command::Transform {
            matrix: b,
            vector: Vec2::new(2.0, 0.0),
        });
        assert_eq!(state.start_matrix(), a);
        assert_eq!(state.target_matrix(), b * a);
        assert_eq!(state.progress(), 0.0);
        assert_eq!(state.vector(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn reset_restores_identity_from_any_state() {
        let mut state = TransformationState::new();
        state.apply(Command::Transform {
            matrix: Mat2::from_rows([[3.0, 1.0], [0.0, 2.0]]),
            vector: Vec2::new(1.0, 1.0),
        });
        state.tick(0.1, ANIM_TIME); // mid-animation

        state.apply(Command::Reset {
            vector: Vec2::new(3.0, 4.0),
        });
        assert_eq!(state.current_matrix(), Mat2::IDENTITY);
        assert_eq!(state.target_matrix(), Mat2::IDENTITY);
        assert_eq!(state.start_matrix(), Mat2::IDENTITY);
        assert!(state.is_settled());
        assert_eq!(state.current_vector(), Vec2::new(3.0, 4.0));
        assert_eq!(state.net_matrix(), Mat2::IDENTITY);
    }

    #[test]
    fn progress_and_entries_stay_bounded() {
        let mut state = TransformationState::new();
        let m = Mat2::from_rows([[2.0, -3.0], [0.5, 1.0]]);
        state.apply(Command::Transform {
            matrix: m,
            vector: Vec2::new(1.0, 1.0),
        });
        let start = state.start_matrix();
        let target = state.target_matrix();

        for dt in [0.0, 0.3, 0.3, 5.0, 0.1] {
            state.tick(dt, ANIM_TIME);
            let t = state.progress();
            assert!((0.0..=1.0).contains(&t));
            let current = state.current_matrix();
            for i in 0..2 {
                for j in 0..2 {
                    let (a, b) = (start.entry(i, j), target.entry(i, j));
                    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                    let c = current.entry(i, j);
                    assert!(c >= lo && c <= hi, "entry ({i},{j}) = {c} not in [{lo}, {hi}]");
                }
            }
        }
        assert!(state.is_settled());
    }

    #[test]
    fn batched_transforms_compose_in_fifo_order() {
        let mut state = TransformationState::new();
        let a = Mat2::from_rows([[2.0, 0.0], [0.0, 1.0]]);
        let b = Mat2::from_rows([[1.0, 1.0], [0.0, 1.0]]);
        state.apply(Command::Transform {
            matrix: a,
            vector: Vec2::new(1.0, 1.0),
        });
        state.apply(Command::Transform {
            matrix: b,
            vector: Vec2::new(0.0, 2.0),
        });

        assert_eq!(state.target_matrix(), b * a);
        assert_eq!(state.start_matrix(), a);
        assert_eq!(state.vector(), Vec2::new(0.0, 2.0));
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn settled_ticks_leave_the_matrix_unchanged() {
        let mut state = TransformationState::new();
        state.apply(Command::Transform {
            matrix: Mat2::from_rows([[0.0, 1.0], [1.0, 0.0]]),
            vector: Vec2::new(1.0, 1.0),
        });
        settled(&mut state);
        let before = state.current_matrix();
        for _ in 0..10 {
            state.tick(0.25, ANIM_TIME);
        }
        assert_eq!(state.current_matrix(), before);
        assert!(state.is_settled());
    }

    #[test]
    fn scale_example_settles_on_the_step() {
        let mut state = TransformationState::new();
        let m = Mat2::from_rows([[2.0, 0.0], [0.0, 1.0]]);
        state.apply(Command::Transform {
            matrix: m,
            vector: Vec2::new(1.0, 1.0),
        });
        assert_eq!(state.target_matrix(), m);
        assert_eq!(state.start_matrix(), Mat2::IDENTITY);
        assert_eq!(state.progress(), 0.0);

        let dt = 1.0 / 60.0;
        for _ in 0..200 {
            state.tick(dt, ANIM_TIME);
        }
        assert_eq!(state.current_matrix(), m);
        assert_eq!(state.current_vector(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn net_readout_tracks_applied_steps() {
        let mut state = TransformationState::new();
        let a = Mat2::from_rows([[2.0, 0.0], [0.0, 1.0]]);
        let b = Mat2::from_rows([[0.0, 1.0], [1.0, 0.0]]);
        state.apply(Command::Transform {
            matrix: a,
            vector: Vec2::new(1.0, 1.0),
        });
        assert_eq!(state.net_matrix(), a);
        state.apply(Command::Transform {
            matrix: b,
            vector: Vec2::new(1.0, 1.0),
        });
        assert_eq!(state.net_matrix(), b * a);
    }
}
