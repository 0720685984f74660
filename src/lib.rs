pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod laplacian;
pub mod presets;
pub mod render;
pub mod rng;
pub mod seed;
pub mod stepper;
pub mod store;

use std::time::Instant;

pub use config::{Config, Params};
pub use engine::Simulation;
pub use error::ConfigError;
pub use grid::{Cell, Grid};

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// One captured frame: generation number plus RGBA8 texture bytes.
pub struct Frame {
    pub generation: u64,
    pub rgba: Vec<u8>,
}

/// Initialize from `config`, run `steps` generations, and capture a texture
/// every `config.snapshot_every` steps plus the final state.
pub fn run(config: &Config, steps: usize) -> Result<(Simulation, Vec<Frame>, Vec<Timing>), ConfigError> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Allocate and seed both buffers
    let t = Instant::now();
    let mut sim = Simulation::new(config)?;
    timings.push(Timing {
        name: "init",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Step, capturing frames along the way
    let mut step_ms = 0.0;
    let mut render_ms = 0.0;
    let mut frames = Vec::new();
    let mut done = 0;
    while done < steps {
        let chunk = config.snapshot_every.min(steps - done);
        let t = Instant::now();
        sim.step_n(chunk);
        step_ms += t.elapsed().as_secs_f64() * 1000.0;
        done += chunk;

        let t = Instant::now();
        frames.push(Frame {
            generation: sim.generation(),
            rgba: render::render_texture(sim.active()),
        });
        render_ms += t.elapsed().as_secs_f64() * 1000.0;
    }
    if frames.is_empty() {
        frames.push(Frame {
            generation: 0,
            rgba: render::render_texture(sim.active()),
        });
    }
    timings.push(Timing { name: "step", ms: step_ms });
    timings.push(Timing { name: "render", ms: render_ms });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    Ok((sim, frames, timings))
}
