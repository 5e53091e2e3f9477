//! Headless camera-rig simulator.
//!
//! Loads a rig from TOML (or the built-in demo), moves every target on the
//! fixed clock, feeds scripted input into the axes and logs what the brain
//! outputs.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cinemachine::axis::InputAxisMap;
use cinemachine::brain::{BrainEvent, CinemachineBrain};
use cinemachine::options::Options;
use cinemachine::tracking::{Pose, TransformId, TransformStore, UpdateClock};
use cinemachine::util::frame_timing::FrameClock;
use clap::Parser;
use glam::{Quat, Vec3};

const DEMO_RIG: &str = include_str!("../presets/demo.toml");

#[derive(Parser, Debug)]
#[command(name = "cinemachine-sim", about = "Run a virtual-camera rig without a renderer")]
struct Args {
    /// Rig preset to load (TOML). Uses the built-in demo when omitted.
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 300)]
    frames: u64,

    /// Render frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Fixed (physics) update rate.
    #[arg(long, default_value_t = 50.0)]
    fixed_hz: f32,

    /// Log the output every N frames.
    #[arg(long, default_value_t = 30)]
    log_every: u64,

    /// Camera to raise above all others partway through.
    #[arg(long)]
    activate: Option<String>,

    /// Frame at which `--activate` takes effect (defaults to halfway).
    #[arg(long)]
    activate_at: Option<u64>,

    /// List presets in this directory and exit.
    #[arg(long)]
    list_presets: Option<PathBuf>,

    /// Print the options JSON schema and exit.
    #[arg(long)]
    schema: bool,
}

/// Moving targets, one per name the rig refers to.
struct Targets {
    ids: Vec<(String, TransformId)>,
}

impl Targets {
    fn spawn(names: Vec<String>, store: &mut TransformStore) -> Self {
        let ids = names
            .into_iter()
            .map(|name| {
                let id = store.create(Pose::IDENTITY);
                (name, id)
            })
            .collect();
        Self { ids }
    }

    fn resolve(&self, name: &str) -> Option<TransformId> {
        self.ids.iter().find(|(n, _)| n == name).map(|(_, id)| *id)
    }

    /// Each target circles the origin at its own radius and speed.
    fn step(&self, time: f64, store: &mut TransformStore) {
        for (i, (_, id)) in self.ids.iter().enumerate() {
            let radius = 6.0 + 2.0 * i as f32;
            let phase = time as f32 * (0.5 + 0.1 * i as f32);
            let position = Vec3::new(radius * phase.cos(), 0.0, radius * phase.sin());
            let heading = Quat::from_rotation_y(-phase);
            let _ = store.set(*id, Pose::new(position, heading));
        }
    }
}

fn load_options(args: &Args) -> Result<Options> {
    match &args.preset {
        Some(path) => Options::load(path).with_context(|| format!("loading {}", path.display())),
        None => Options::from_toml(DEMO_RIG).context("parsing built-in demo rig"),
    }
}

fn log_events(brain: &mut CinemachineBrain, frame: u64) {
    for event in brain.drain_events() {
        match event {
            BrainEvent::CameraActivated { incoming, outgoing } => {
                log::info!("[frame {frame}] {outgoing:?} -> {incoming:?}");
            }
            BrainEvent::CameraCut { camera } => {
                log::info!("[frame {frame}] cut to {camera:?}");
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())?;
        writeln!(std::io::stdout().lock(), "{schema}")?;
        return Ok(());
    }
    if let Some(dir) = &args.list_presets {
        let mut out = std::io::stdout().lock();
        for name in Options::list_presets(dir) {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }
    if args.fps <= 0.0 || args.fixed_hz <= 0.0 {
        bail!("--fps and --fixed-hz must be positive");
    }

    let options = load_options(&args)?;
    let mut store = TransformStore::new();
    let targets = Targets::spawn(options.target_names(), &mut store);
    let mut brain = CinemachineBrain::from_options(options, &|name: &str| targets.resolve(name))?;
    log::info!(
        "simulating {} frame(s) at {} fps, fixed step {} Hz, cameras: {}",
        args.frames,
        args.fps,
        args.fixed_hz,
        brain.cameras().map(|c| c.name()).collect::<Vec<_>>().join(", ")
    );

    let activate_at = args.activate_at.unwrap_or(args.frames / 2);
    if let Some(name) = &args.activate {
        if brain.camera(name).is_none() {
            bail!("no camera named {name:?}");
        }
    }

    let mut clock = FrameClock::new(1.0 / args.fixed_hz);
    let mut input = InputAxisMap::new();
    for frame in 0..args.frames {
        if frame == activate_at {
            if let Some(name) = &args.activate {
                let top = brain.cameras().map(|c| c.priority).max().unwrap_or(0);
                let _ = brain.set_priority(name, top + 1);
                log::info!("[frame {frame}] raising {name:?} to priority {}", top + 1);
            }
        }

        let seconds = clock.time() as f32;
        input.set("Mouse X", (seconds * 0.7).sin());
        input.set("Mouse Y", 0.3 * (seconds * 0.4).cos());

        for tick in clock.advance(1.0 / args.fps) {
            if tick.clock == UpdateClock::Fixed {
                targets.step(tick.time, &mut store);
            }
            brain.tick(tick, &store, &input);
        }
        log_events(&mut brain, frame);

        if args.log_every > 0 && frame % args.log_every == 0 {
            let out = brain.output();
            let position = out.final_position();
            let forward = out.forward();
            log::info!(
                "[frame {frame}] live {:?}{} pos ({:.2}, {:.2}, {:.2}) \
                 fwd ({:.2}, {:.2}, {:.2}) fov {:.1}",
                brain.active_camera().unwrap_or("-"),
                if brain.is_blending() { " (blending)" } else { "" },
                position.x,
                position.y,
                position.z,
                forward.x,
                forward.y,
                forward.z,
                out.lens.field_of_view
            );
        }
    }

    for (name, id) in &targets.ids {
        log::info!("target {name:?} updates on {:?}", brain.tracker().preferred_update_of(*id));
    }
    Ok(())
}
