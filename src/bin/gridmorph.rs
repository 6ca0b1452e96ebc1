use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use gridmorph::{FrameGeometry, FrameIndex, InMemorySink, Script, replay};

#[derive(Parser, Debug)]
#[command(name = "gridmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Replay a script and dump one frame's geometry as JSON.
    Frame(FrameArgs),
    /// Replay a script and print the net-matrix readout per applied step.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write all produced frames as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Frame(args) => cmd_frame(args),
        Cmd::Replay(args) => cmd_replay(args),
    }
}

fn read_script(path: &Path) -> anyhow::Result<Script> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let script: Script =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse script JSON")?;
    Ok(script)
}

fn run_to_frames(script: &Script) -> anyhow::Result<Vec<(FrameIndex, FrameGeometry)>> {
    let mut sink = InMemorySink::new();
    replay(script, &mut sink)?;
    Ok(sink.frames()?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let script = read_script(&args.in_path)?;
    let frames = run_to_frames(&script)?;
    let (_, geom) = frames.get(args.frame as usize).with_context(|| {
        format!(
            "frame {} out of range ({} frames produced)",
            args.frame,
            frames.len()
        )
    })?;
    write_json(args.out.as_deref(), geom)
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let script = read_script(&args.in_path)?;
    let frames = run_to_frames(&script)?;

    for step in &script.steps {
        let (_, geom) = &frames[step.at.0 as usize];
        println!(
            "frame {:>5}: net = {:.2} (det {:.2})",
            step.at.0,
            geom.net,
            geom.net.determinant()
        );
    }
    if let Some((_, last)) = frames.last() {
        println!("{} frames, final net = {:.2}", frames.len(), last.net);
    }

    if let Some(out) = &args.out {
        let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
        serde_json::to_writer(BufWriter::new(f), &frames)
            .with_context(|| "serialize frames JSON")?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn write_json(out: Option<&Path>, geom: &FrameGeometry) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(f), geom)
                .with_context(|| "serialize frame geometry")?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let s = serde_json::to_string_pretty(geom).with_context(|| "serialize frame geometry")?;
            println!("{s}");
        }
    }
    Ok(())
}
