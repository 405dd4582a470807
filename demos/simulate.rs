use std::{
    collections::BTreeMap,
    fs,
    io::{self, StdoutLock, Write},
    path::PathBuf,
};

use anyhow::{bail, Context};
use clap::Parser;
use glam::DVec3;
use kepler_orrery::{
    body_presets::solar_system, AnimationState, SimulationConfig, Trajectories, Universe,
};
use tracing_subscriber::EnvFilter;

/// Generates the trajectories of a planetary system and prints them frame by frame.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON system description. Defaults to the bundled Solar System.
    config: Option<PathBuf>,

    /// Print every n-th frame.
    #[arg(short, long, default_value_t = 30)]
    every: usize,

    /// Print positions relative to this body instead of the origin.
    #[arg(short, long)]
    focus: Option<String>,

    /// Write all trajectories to this file as JSON.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print the system description as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => solar_system(),
    };

    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let (universe, params) = config.load_system()?;
    describe_universe(&universe);

    eprintln!("Generating {} frames...", params.frame_count);
    let trajectories = Trajectories::generate_all(&universe, params)?;

    let mut state = AnimationState::new(params.frame_count);
    if let Some(name) = &args.focus {
        let Some(id) = universe.get_body_index_with_name(name) else {
            bail!("no body named {name:?}");
        };
        state.set_focus(Some(id));
    }

    let mut lock = io::stdout().lock();
    let every = args.every.max(1);
    for frame in (0..params.frame_count).step_by(every) {
        state.seek(frame);
        let date = state
            .current_date(config.epoch, params.time_per_frame())
            .map_or_else(
                || "date out of range".to_string(),
                |d| d.format("%Y-%m-%d").to_string(),
            );
        writeln!(&mut lock, "=== Frame {frame} ({date}) ===")?;
        let origin = state.focus_position(&trajectories).unwrap_or(DVec3::ZERO);
        print_all_body_positions(&mut lock, &universe, &trajectories, frame, origin)?;
    }

    if let Some(path) = &args.export {
        let export: BTreeMap<_, _> = trajectories
            .iter(&universe)
            .map(|(_, body, trajectory)| (body.name.as_str(), trajectory))
            .collect();
        fs::write(path, serde_json::to_string(&export)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Wrote trajectories to {}", path.display());
    }

    Ok(())
}

fn describe_universe(universe: &Universe) {
    println!("Simulation universe with {} bodies", universe.len());
    for id in universe.evaluation_order() {
        let (Some(body), Some(orbit)) = (universe.get_body(id), universe.get_orbit(id)) else {
            continue;
        };
        let parent = universe
            .get_parent(id)
            .and_then(|p| universe.get_body(p))
            .map_or("-", |p| p.name.as_str());

        println!("    {}: {:?} ({:?})", id, body.name, body.kind);
        println!("      Parent: {parent}");
        if orbit.is_stationary() {
            println!("      Stationary");
            continue;
        }
        println!("      Semi-major axis: {}", orbit.get_semi_major_axis());
        println!("      Eccentricity: {}", orbit.get_eccentricity());
        println!("      Inclination: {}", orbit.get_inclination());
        println!("      Argument of periapsis: {}", orbit.get_arg_pe());
        println!(
            "      Longitude of ascending node: {}",
            orbit.get_long_asc_node()
        );
        println!(
            "      Mean anomaly at epoch: {}",
            orbit.get_mean_anomaly_at_epoch()
        );
    }
}

fn print_all_body_positions(
    lock: &mut StdoutLock,
    universe: &Universe,
    trajectories: &Trajectories,
    frame: usize,
    origin: DVec3,
) -> io::Result<()> {
    for (_, body, trajectory) in trajectories.iter(universe) {
        if let Some(pos) = trajectory.get(frame) {
            writeln!(lock, "{}: {:?}", body.name, pos - origin)?;
        }
    }
    Ok(())
}
