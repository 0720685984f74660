use log::debug;

use crate::config::{Config, Params};
use crate::error::ConfigError;
use crate::grid::{Cell, Grid};
use crate::stepper;
use crate::store::GridStore;

/// A running reaction-diffusion simulation: the double-buffered grid plus
/// the parameter set it is advanced with.
#[derive(Clone, Debug)]
pub struct Simulation {
    store: GridStore,
    params: Params,
    generation: u64,
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let params = config.params()?;
        let store = GridStore::initialize(config.rows, config.cols, &config.seed)?;
        debug!(
            "simulation {}x{} preset={:?} params={:?}",
            config.rows, config.cols, config.preset, params
        );
        Ok(Self::from_parts(store, params))
    }

    pub fn from_parts(store: GridStore, params: Params) -> Self {
        Self {
            store,
            params,
            generation: 0,
        }
    }

    pub fn step(&mut self) {
        stepper::step(&mut self.store, &self.params);
        self.generation += 1;
    }

    pub fn step_n(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Replace the parameter set. Takes effect from the next step.
    pub fn reconfigure(&mut self, params: Params) -> Result<(), ConfigError> {
        params.validate()?;
        debug!("reconfigured at generation {}: {:?}", self.generation, params);
        self.params = params;
        Ok(())
    }

    pub fn active(&self) -> &Grid<Cell> {
        self.store.active()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rows(&self) -> usize {
        self.store.rows()
    }

    pub fn cols(&self) -> usize {
        self.store.cols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedPolicy;

    fn small() -> Config {
        Config {
            rows: 16,
            cols: 12,
            ..Config::default()
        }
    }

    #[test]
    fn generation_counts_steps() {
        let mut sim = Simulation::new(&small()).unwrap();
        assert_eq!(sim.generation(), 0);
        sim.step();
        sim.step_n(4);
        assert_eq!(sim.generation(), 5);
        assert_eq!((sim.rows(), sim.cols()), (16, 12));
    }

    #[test]
    fn invalid_config_never_builds() {
        let cfg = Config {
            preset: "unheard of".into(),
            ..small()
        };
        assert!(Simulation::new(&cfg).is_err());
    }

    #[test]
    fn reconfigure_validates_and_applies() {
        let mut sim = Simulation::new(&small()).unwrap();
        let bad = Params { feed: f32::INFINITY, ..*sim.params() };
        assert!(sim.reconfigure(bad).is_err());
        assert_eq!(sim.params().feed, 0.055);

        let worms = Params::from_preset(crate::presets::by_name("worms and dots").unwrap());
        sim.reconfigure(worms).unwrap();
        assert_eq!(sim.params(), &worms);
    }

    #[test]
    fn uniform_start_stays_uniform() {
        let cfg = Config {
            seed: SeedPolicy::Uniform,
            ..small()
        };
        let mut sim = Simulation::new(&cfg).unwrap();
        sim.step_n(10);
        assert!(sim.active().data.iter().all(|&c| c == Cell::SUBSTRATE));
    }
}
