use std::time::Duration;

use gridmorph::{AnimConfig, Engine, EngineOpts, Fps, InMemorySink, Mat2, Vec2};

#[test]
fn headless_engine_reflects_commands_in_order() {
    let _ = tracing_subscriber::fmt::try_init();

    let sink = InMemorySink::new();
    let opts = EngineOpts {
        config: AnimConfig::default(),
        realtime: false,
    };
    let mut engine = Engine::new(opts, Box::new(sink.clone())).unwrap();
    engine.start().unwrap();

    let scale = Mat2::from_rows([[2.0, 0.0], [0.0, 1.0]]);
    let shear = Mat2::from_rows([[1.0, 1.0], [0.0, 1.0]]);
    engine.transform(scale, Vec2::new(1.0, 1.0)).unwrap();
    engine.reset(Vec2::new(3.0, 4.0)).unwrap();
    engine.transform(shear, Vec2::new(1.0, 2.0)).unwrap();
    engine.stop().unwrap();
    assert!(!engine.is_running());

    let frames = sink.frames().unwrap();
    assert!(!frames.is_empty());
    for (i, (idx, _)) in frames.iter().enumerate() {
        assert_eq!(idx.0, i as u64);
    }
    // Everything enqueued before stop lands before the final frame: the
    // reset wiped the scale step, leaving only the shear in the net readout.
    assert_eq!(frames.last().unwrap().1.net, shear);
    assert!(sink.is_ended().unwrap());
}

#[test]
fn realtime_engine_paces_the_loop() {
    let sink = InMemorySink::new();
    let opts = EngineOpts {
        config: AnimConfig {
            fps: Fps { num: 120, den: 1 },
            ..AnimConfig::default()
        },
        realtime: true,
    };
    let mut engine = Engine::new(opts, Box::new(sink.clone())).unwrap();
    engine.start().unwrap();
    std::thread::sleep(Duration::from_millis(50));
    engine.stop().unwrap();

    let frames = sink.frames().unwrap();
    assert!(!frames.is_empty());
    // 50 ms at 120 fps is ~6 ticks; a paced loop stays far below the
    // hundreds a free-running loop would produce.
    assert!(frames.len() < 60, "produced {} frames", frames.len());
}
