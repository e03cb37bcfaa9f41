//! Single-particle wavefunction models.

use std::sync::Arc;

use crate::{config::Config, state::SingleParticleState};

pub use harmonic::{HarmonicOscillator1d, HarmonicOscillator2d};

mod harmonic;

/// A model for the spatial part of single-particle orbitals.
pub trait WaveFunction: Send + Sync {
    /// Number of spatial dimensions the model lives in.
    fn dim(&self) -> usize;

    /// Single-particle energy of the given state.
    fn energy(&self, state: &SingleParticleState) -> f64;

    /// Evaluate the spatial part of an orbital.
    ///
    /// For Cartesian states `coordinates` holds one value per dimension. For polar
    /// states it holds the radius only, and the result is the radial function
    /// R(r); the angular factor `exp(i m theta) / sqrt(2 pi)` is left to the caller.
    fn evaluate(&self, state: &SingleParticleState, coordinates: &[f64]) -> f64;
}

/// Build the wavefunction model matching the dimension of the configuration.
pub fn create(config: &Config) -> Arc<dyn WaveFunction> {
    match config.dim {
        1 => Arc::new(HarmonicOscillator1d::new(config.w)),
        _ => Arc::new(HarmonicOscillator2d::new(config.w, config.coordinate_type)),
    }
}
