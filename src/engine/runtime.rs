use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::animation::state::Command;
use crate::engine::queue::{CommandQueue, QueueSender, queue};
use crate::engine::session::{AnimConfig, AnimSession};
use crate::engine::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Mat2, Vec2};
use crate::foundation::error::{GridmorphError, GridmorphResult};

#[derive(Clone, Copy, Debug)]
/// Options controlling the threaded engine.
pub struct EngineOpts {
    /// Timing and viewport configuration shared with the session.
    pub config: AnimConfig,
    /// Sleep out the remainder of each tick to hold the configured rate.
    /// Disable for as-fast-as-possible stepping in tests and offline runs.
    pub realtime: bool,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            config: AnimConfig::default(),
            realtime: true,
        }
    }
}

#[derive(Debug)]
enum EngineMsg {
    Apply(Command),
    Shutdown,
}

/// The animation consumer: a dedicated thread running the fixed-rate loop
/// drain-commands / tick / produce / sink.
///
/// Lifecycle: `start` is idempotent while the engine runs; `stop` sends a
/// terminal shutdown message and joins. A stopped engine cannot be
/// restarted; create a fresh one. Every command enqueued before `stop` is
/// applied and reflected in at least one pushed frame.
pub struct Engine {
    opts: EngineOpts,
    tx: QueueSender<EngineMsg>,
    rx: Option<CommandQueue<EngineMsg>>,
    sink: Option<Box<dyn FrameSink + Send>>,
    handle: Option<JoinHandle<GridmorphResult<()>>>,
    running: Arc<AtomicBool>,
}

impl Engine {
    pub fn new(opts: EngineOpts, sink: Box<dyn FrameSink + Send>) -> GridmorphResult<Self> {
        opts.config.validate()?;
        let (tx, rx) = queue();
        Ok(Self {
            opts,
            tx,
            rx: Some(rx),
            sink: Some(sink),
            handle: None,
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Spawn the consumer thread. Calling `start` on a running engine is a
    /// no-op; commands keep flowing to the existing thread.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> GridmorphResult<()> {
        if self.handle.is_some() {
            return Ok(());
        }
        let rx = self.rx.take().ok_or_else(|| {
            GridmorphError::engine("engine already stopped; create a fresh engine")
        })?;
        let mut sink = self.sink.take().ok_or_else(|| {
            GridmorphError::engine("engine already stopped; create a fresh engine")
        })?;
        let session = AnimSession::new(self.opts.config)?;
        let realtime = self.opts.realtime;
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);

        let spawned = thread::Builder::new()
            .name("gridmorph-anim".into())
            .spawn(move || {
                let res = run_loop(session, &rx, sink.as_mut(), realtime);
                running.store(false, Ordering::SeqCst);
                res
            });
        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                Err(GridmorphError::engine(format!(
                    "failed to spawn animation thread: {e}"
                )))
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Enqueue a transform step; it is applied at the start of the
    /// consumer's next tick.
    pub fn transform(&self, matrix: Mat2, vector: Vec2) -> GridmorphResult<()> {
        self.submit(Command::Transform { matrix, vector })
    }

    /// Enqueue a reset; applied at the start of the consumer's next tick.
    pub fn reset(&self, vector: Vec2) -> GridmorphResult<()> {
        self.submit(Command::Reset { vector })
    }

    pub fn submit(&self, command: Command) -> GridmorphResult<()> {
        if !self.is_running() {
            return Err(GridmorphError::engine("engine is not running"));
        }
        self.tx.enqueue(EngineMsg::Apply(command))
    }

    /// Send the terminal shutdown signal and join the consumer thread,
    /// surfacing any error the loop ended with.
    pub fn stop(&mut self) -> GridmorphResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        let _ = self.tx.enqueue(EngineMsg::Shutdown);
        handle
            .join()
            .map_err(|_| GridmorphError::engine("animation thread panicked"))?
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.tx.enqueue(EngineMsg::Shutdown);
            let _ = handle.join();
        }
    }
}

fn run_loop(
    mut session: AnimSession,
    rx: &CommandQueue<EngineMsg>,
    sink: &mut dyn FrameSink,
    realtime: bool,
) -> GridmorphResult<()> {
    let cfg = session.config();
    sink.begin(SinkConfig {
        fps: cfg.fps,
        viewport: cfg.viewport,
    })?;

    let tick = Duration::from_secs_f64(cfg.fps.frame_duration_secs());
    let mut deadline = Instant::now() + tick;
    loop {
        // All pending commands are applied, in FIFO order, before the tick
        // advances. Commands queued behind a shutdown message are dropped.
        let mut shutdown = false;
        for msg in rx.drain_all() {
            match msg {
                EngineMsg::Apply(command) => session.apply(command),
                EngineMsg::Shutdown => {
                    shutdown = true;
                    break;
                }
            }
        }

        let (idx, frame) = session.step();
        sink.push_frame(idx, &frame)?;

        if shutdown {
            break;
        }
        if realtime {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
            deadline += tick;
        }
    }

    sink.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sink::InMemorySink;

    fn headless_opts() -> EngineOpts {
        EngineOpts {
            config: AnimConfig::default(),
            realtime: false,
        }
    }

    #[test]
    fn lifecycle_is_explicit_and_terminal() {
        let sink = InMemorySink::new();
        let mut engine = Engine::new(headless_opts(), Box::new(sink.clone())).unwrap();
        assert!(!engine.is_running());
        assert!(engine.transform(Mat2::IDENTITY, Vec2::new(1.0, 1.0)).is_err());

        engine.start().unwrap();
        engine.start().unwrap(); // idempotent while running
        assert!(engine.is_running());

        engine.stop().unwrap();
        assert!(!engine.is_running());
        assert!(engine.transform(Mat2::IDENTITY, Vec2::new(1.0, 1.0)).is_err());
        assert!(engine.start().is_err());
        engine.stop().unwrap(); // stop is also idempotent

        assert!(sink.is_ended().unwrap());
    }

    #[test]
    fn commands_before_stop_reach_the_final_frame() {
        let sink = InMemorySink::new();
        let mut engine = Engine::new(headless_opts(), Box::new(sink.clone())).unwrap();
        engine.start().unwrap();

        let scale = Mat2::from_rows([[2.0, 0.0], [0.0, 1.0]]);
        let swap = Mat2::from_rows([[0.0, 1.0], [1.0, 0.0]]);
        engine.transform(scale, Vec2::new(1.0, 1.0)).unwrap();
        engine.transform(swap, Vec2::new(1.0, 1.0)).unwrap();
        engine.stop().unwrap();

        let frames = sink.frames().unwrap();
        assert!(!frames.is_empty());
        for (i, (idx, _)) in frames.iter().enumerate() {
            assert_eq!(idx.0, i as u64);
        }
        assert_eq!(frames.last().unwrap().1.net, swap * scale);
    }
}
