use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

use reactdiff::config::Config;
use reactdiff::presets;
use reactdiff::seed::SeedPolicy;
use reactdiff::{Simulation, render};

const REPORT_EVERY: usize = 100;

fn save(out_dir: &Path, name: &str, rgba: &[u8], rows: usize, cols: usize) -> Result<()> {
    let path = out_dir.join(name);
    image::save_buffer(&path, rgba, cols as u32, rows as u32, image::ColorType::Rgba8)
        .with_context(|| format!("failed to save {}", path.display()))?;
    info!("Saved {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // reactdiff [preset|config.json] [steps] [rows] [cols] [out_dir] [seed]
    let args: Vec<String> = std::env::args().collect();
    debug!("available presets: {}", presets::names().collect::<Vec<_>>().join(", "));

    let mut config = match args.get(1) {
        Some(arg) if arg.ends_with(".json") => Config::from_json_file(arg)?,
        Some(preset) => Config {
            preset: preset.clone(),
            ..Config::default()
        },
        None => Config::default(),
    };
    let steps: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5000);
    if let Some(rows) = args.get(3).and_then(|s| s.parse().ok()) {
        config.rows = rows;
    }
    if let Some(cols) = args.get(4).and_then(|s| s.parse().ok()) {
        config.cols = cols;
    }
    let out_dir: PathBuf = args
        .get(5)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    if let Some(seed) = args.get(6).and_then(|s| s.parse().ok()) {
        config.seed = SeedPolicy::RandomInterior { seed };
    }

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut sim = Simulation::new(&config).context("invalid configuration")?;
    let (rows, cols) = (sim.rows(), sim.cols());
    info!(
        "Simulating {}x{} grid, preset={}, params={:?}, steps={}",
        rows,
        cols,
        config.preset,
        sim.params(),
        steps
    );

    save(&out_dir, "frame_00000.png", &render::render_texture(sim.active()), rows, cols)?;

    let start = Instant::now();
    let mut window = Instant::now();
    for n in 1..=steps {
        sim.step();

        if n % REPORT_EVERY == 0 {
            let sps = REPORT_EVERY as f64 / window.elapsed().as_secs_f64();
            window = Instant::now();
            info!("generation {:6}  {:8.2} steps/s", sim.generation(), sps);
        }
        if n % config.snapshot_every == 0 {
            let name = format!("frame_{:05}.png", n);
            save(&out_dir, &name, &render::render_texture(sim.active()), rows, cols)?;
        }
    }
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;

    save(&out_dir, "final.png", &render::render_texture(sim.active()), rows, cols)?;
    save(&out_dir, "final_palette.png", &render::render_activator(sim.active()), rows, cols)?;

    info!("{} steps in {:.1} ms", steps, elapsed);
    info!("Done.");
    Ok(())
}
