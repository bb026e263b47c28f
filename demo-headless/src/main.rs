//! Headless demo driver for the chemistry lab engine.
//!
//! Stands in for the interactive host: builds a simulation, paints a
//! neutralization scenario, steps the fixed pipeline on a logical clock and
//! reports statistics. The display-mode color mapping mirrors what a real
//! renderer would do with the read-only cell state.

use chem_lab_core::{Cell, Config, DisplayMode, Material, SimulationManager};
use clap::Parser;

/// Virtual chemistry lab demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "chem-lab-demo")]
#[command(about = "Headless 2-D chemistry lab simulation demo", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 100)]
    height: usize,

    /// Simulated duration in seconds
    #[arg(short, long, default_value_t = 30.0)]
    duration: f32,

    /// Fixed timestep per tick in seconds
    #[arg(long, default_value_t = 0.016)]
    dt: f32,

    /// Simulation speed multiplier
    #[arg(short, long, default_value_t = 1.0)]
    speed: f32,

    /// Use the simple flat-probability reaction model instead of Arrhenius
    #[arg(long)]
    simple: bool,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Report interval in simulated seconds
    #[arg(short, long, default_value_t = 5.0)]
    report_interval: f32,

    /// Display mode for the final ASCII preview (material, temperature, pressure)
    #[arg(long, default_value = "material")]
    display: String,

    /// Print an ASCII preview of the grid at the end
    #[arg(long)]
    preview: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Chemistry Lab Demo ===\n");

    let display_mode = match args.display.to_lowercase().as_str() {
        "temperature" | "temp" => DisplayMode::Temperature,
        "pressure" => DisplayMode::Pressure,
        _ => DisplayMode::Material,
    };

    let config = Config {
        expert_mode: !args.simple,
        grid_width: args.width,
        grid_height: args.height,
        simulation_speed: args.speed,
        display_mode,
        ..Config::default()
    };

    let mut sim = match args.seed {
        Some(seed) => SimulationManager::with_seed(config, seed),
        None => SimulationManager::new(config),
    }
    .unwrap_or_else(|err| {
        eprintln!("failed to start simulation: {err}");
        std::process::exit(1);
    });

    sim.initialize();
    println!(
        "Created {}x{} grid, {} materials, {} reactions, {} tools",
        sim.grid().width(),
        sim.grid().height(),
        sim.materials().len(),
        sim.reactions().len(),
        sim.tools().len()
    );
    println!(
        "Kinetics: {}\n",
        if sim.config().expert_mode {
            "Arrhenius (expert)"
        } else {
            "flat probability (simple)"
        }
    );

    // Neutralization scenario: two reactant pools side by side near the
    // heater so expert-mode kinetics have some temperature to work with.
    let naoh = sim.materials().id_of("NaOH").expect("built-in catalog");
    let h2so4 = sim.materials().id_of("H2SO4").expect("built-in catalog");
    let blob = (args.width.min(args.height) / 12).max(1) as i32;
    let (cx, cy) = (args.width as i32 / 2, args.height as i32 / 2);
    sim.paint(cx - blob, cy, naoh, blob);
    sim.paint(cx + blob, cy, h2so4, blob);

    let mut next_report = args.report_interval;
    while sim.simulation_time() < args.duration {
        sim.update(args.dt);
        if sim.simulation_time() >= next_report {
            report(&sim);
            next_report += args.report_interval;
        }
    }

    println!("\n=== Final state ===");
    report(&sim);
    if args.preview {
        print_preview(&sim);
    }
}

fn report(sim: &SimulationManager) {
    let stats = sim.stats();
    let mut dominant: Vec<(usize, usize)> = stats
        .material_counts
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, count)| count > 0)
        .collect();
    dominant.sort_by(|a, b| b.1.cmp(&a.1));

    print!(
        "t={:6.1}s tick {:5}  mean T {:7.2} C  ",
        stats.simulation_time, stats.ticks, stats.mean_temperature
    );
    for (id, count) in dominant.iter().take(4) {
        let material = sim.materials().get(*id as u16);
        print!("{}:{} ", material.name, count);
    }
    println!();
}

/// Map one cell to a normalized RGB color the way a grid renderer would.
fn cell_color(cell: &Cell, material: &Material, mode: DisplayMode) -> [f32; 3] {
    match mode {
        DisplayMode::Material => material.color,
        DisplayMode::Temperature => {
            let t = ((cell.temperature + 200.0) / 1200.0).clamp(0.0, 1.0);
            [t, 0.0, 1.0 - t]
        }
        DisplayMode::Pressure => {
            let p = ((cell.pressure - 100_000.0) / 200_000.0).clamp(0.0, 1.0);
            [p, p, p]
        }
    }
}

/// Crude luminance-to-ASCII rendering of the configured display mode,
/// downsampled to at most 64 columns.
fn print_preview(sim: &SimulationManager) {
    const RAMP: &[u8] = b" .:-=+*#%@";
    let (w, h) = (sim.grid().width(), sim.grid().height());
    let step = (w / 64).max(1);
    let mode = sim.config().display_mode;

    println!("\n[{mode:?} view, 1 char = {step}x{step} cells]");
    for y in (0..h).step_by(step) {
        let mut line = String::with_capacity(w / step + 1);
        for x in (0..w).step_by(step) {
            let cell = sim.cell(x, y);
            let [r, g, b] = cell_color(cell, sim.materials().get(cell.material), mode);
            let luminance = (0.2126 * r + 0.7152 * g + 0.0722 * b).clamp(0.0, 1.0);
            let index = (luminance * (RAMP.len() - 1) as f32).round() as usize;
            line.push(RAMP[index] as char);
        }
        println!("{line}");
    }
}
