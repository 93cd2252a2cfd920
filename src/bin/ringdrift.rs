use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use ringdrift::{
    CpuSurfaceOpts, FrameIndex, FrameRGBA, FrameSink, InMemorySink, RingdriftResult, Scenario,
    ScenarioDef, SinkConfig,
};

#[derive(Parser, Debug)]
#[command(name = "ringdrift", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario and write a single frame as a PNG.
    Frame(FrameArgs),
    /// Replay a scenario and write a numbered PNG sequence.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of frames to replay.
    #[arg(long)]
    frames: u64,

    /// Output directory for the PNG sequence.
    #[arg(long)]
    out_dir: PathBuf,

    /// Sleep between frames to match the scenario's refresh rate.
    #[arg(long)]
    paced: bool,
}

// Opaque page white, matching a canvas composited behind light content.
const CLEAR_RGBA: [u8; 4] = [255, 255, 255, 255];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn read_scenario_json(path: &Path) -> anyhow::Result<Scenario> {
    let f = File::open(path).with_context(|| format!("open scenario '{}'", path.display()))?;
    let r = BufReader::new(f);
    let def: ScenarioDef = serde_json::from_reader(r).with_context(|| "parse scenario JSON")?;
    Ok(Scenario::from_def(def)?)
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if frame.data.is_empty() {
        anyhow::bail!("frame has zero area, nothing to write");
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scenario = read_scenario_json(&args.in_path)?;

    let opts = CpuSurfaceOpts::default().with_clear_rgba(Some(CLEAR_RGBA));
    let mut sink = InMemorySink::new();
    scenario.play(args.frame + 1, opts, &mut sink)?;

    let (_, frame) = sink
        .frames()
        .last()
        .context("scenario produced no frames")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&args.out, frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let scenario = read_scenario_json(&args.in_path)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let opts = CpuSurfaceOpts::default().with_clear_rgba(Some(CLEAR_RGBA));
    let mut sink = PngDirSink {
        dir: args.out_dir.clone(),
    };
    let stats = if args.paced {
        scenario.play_paced(args.frames, opts, &mut sink)?
    } else {
        scenario.play(args.frames, opts, &mut sink)?
    };

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        args.out_dir.display()
    );
    Ok(())
}

struct PngDirSink {
    dir: PathBuf,
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RingdriftResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RingdriftResult<()> {
        if frame.data.is_empty() {
            // Degenerate viewport: nothing to encode for this frame.
            return Ok(());
        }
        let path = self.dir.join(format!("frame_{:05}.png", idx.0));
        write_png(&path, frame).map_err(Into::into)
    }

    fn end(&mut self) -> RingdriftResult<()> {
        Ok(())
    }
}
