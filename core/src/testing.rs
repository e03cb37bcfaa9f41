//! Deterministic stand-ins for the wavefunction and integrator seams, used by the
//! engine tests and the benchmarks.

use crate::{
    error::IntegrationError, integrals::SpatialIntegrator, state::SingleParticleState,
    wavefunction::WaveFunction,
};

type Quadruple<'a> = (
    &'a SingleParticleState,
    &'a SingleParticleState,
    &'a SingleParticleState,
    &'a SingleParticleState,
);

/// Returns the same value for every quadruple.
#[derive(Copy, Clone, Debug)]
pub struct ConstantIntegrator(pub f64);

impl SpatialIntegrator for ConstantIntegrator {
    fn integrate(&mut self, _: Quadruple<'_>) -> Result<f64, IntegrationError> {
        Ok(self.0)
    }
}

/// Encodes the ordered indices into the value, `1 + 1000 p + 100 q + 10 r + s`,
/// so that callers can tell which quadruple (and which ordering) was requested.
#[derive(Copy, Clone, Debug, Default)]
pub struct IndexIntegrator;

impl IndexIntegrator {
    pub fn value(p: usize, q: usize, r: usize, s: usize) -> f64 {
        (1 + 1000 * p + 100 * q + 10 * r + s) as f64
    }
}

impl SpatialIntegrator for IndexIntegrator {
    fn integrate(&mut self, states: Quadruple<'_>) -> Result<f64, IntegrationError> {
        let (p, q, r, s) = states;
        Ok(Self::value(p.index, q.index, r.index, s.index))
    }
}

/// Fails once the first index of a quadruple reaches `from_row`.
#[derive(Copy, Clone, Debug)]
pub struct FailingIntegrator {
    pub from_row: usize,
}

impl SpatialIntegrator for FailingIntegrator {
    fn integrate(&mut self, states: Quadruple<'_>) -> Result<f64, IntegrationError> {
        if states.0.index >= self.from_row {
            Err(IntegrationError::NonFinite { value: f64::NAN })
        } else {
            Ok(1.0)
        }
    }
}

/// Energy `first + second + 1/2`, independent of frequency. Evaluates to zero.
#[derive(Copy, Clone, Debug)]
pub struct QuantumNumberWaveFunction {
    pub dim: usize,
}

impl WaveFunction for QuantumNumberWaveFunction {
    fn dim(&self) -> usize {
        self.dim
    }

    fn energy(&self, state: &SingleParticleState) -> f64 {
        (state.first + state.second) as f64 + 0.5
    }

    fn evaluate(&self, _: &SingleParticleState, _: &[f64]) -> f64 {
        0.0
    }
}
