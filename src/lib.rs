//! Gridmorph is an animation engine for 2-D linear transformations.
//!
//! It maintains an evolving "current total transformation" of the plane,
//! accepts asynchronous requests to compose a new 2x2 matrix step (or reset),
//! and produces a deterministic, declarative geometry frame per tick:
//! transformed grid lines, basis vectors, and the input vector with its
//! image, ready for any renderer that can stroke segments and fill
//! triangles.
//!
//! # Pipeline overview
//!
//! 1. **Enqueue**: an input source submits [`Command`]s through a
//!    [`QueueSender`]
//! 2. **Apply**: at the start of each tick, the consumer drains the queue
//!    and applies every pending command, in FIFO order
//! 3. **Tick**: [`TransformationState`] advances animation progress and
//!    recomputes the interpolated matrix
//! 4. **Produce**: [`render_frame`] derives the frame's [`FrameGeometry`]
//! 5. **Sink**: frames stream into a [`FrameSink`] in frame order
//!
//! The threaded [`Engine`] runs steps 2-5 at a fixed tick rate on a
//! dedicated consumer thread; [`AnimSession`] is the same loop driven
//! synchronously, and [`replay`] drives it from a JSON [`Script`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: state evolution and frame production are pure and
//!   stable for a given command timeline; ticks advance by a fixed `1/fps`,
//!   so wall-clock jitter never enters the interpolation.
//! - **No IO in the core**: rendering and input parsing live behind the
//!   [`FrameSink`] and [`Command`] boundaries.
#![forbid(unsafe_code)]

mod animation;
mod engine;
mod foundation;
mod render;

pub use animation::lerp::Lerp;
pub use animation::state::{Command, TransformationState};
pub use engine::queue::{CommandQueue, QueueSender, queue};
pub use engine::runtime::{Engine, EngineOpts};
pub use engine::script::{Script, ScriptStep, replay};
pub use engine::session::{AnimConfig, AnimSession};
pub use engine::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Fps, FrameIndex, Mat2, Point, Rgba8, Vec2, Viewport};
pub use foundation::error::{GridmorphError, GridmorphResult};
pub use render::geometry::{FrameGeometry, LineSegment, Triangle};
pub use render::producer::{GRID_EXTENT, palette, render_frame};
