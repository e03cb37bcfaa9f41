//! Two-body spatial integrals between four orbitals.

use std::sync::Arc;

use crate::{
    config::{Config, IntegratorKind},
    error::IntegrationError,
    state::SingleParticleState,
    wavefunction::WaveFunction,
};

pub use coulomb::InteractionIntegrator;
pub use gauss_hermite::GaussHermite;
pub use gauss_laguerre::GaussLaguerre;
pub use monte_carlo::MonteCarlo;

mod coulomb;
mod gauss_hermite;
mod gauss_laguerre;
mod monte_carlo;
pub(crate) mod quadrature;

pub trait SpatialIntegrator {
    /// Calculate the two-body integral <pq|V|rs> between four orbitals, with
    /// particle one occupying p and r and particle two occupying q and s.
    ///
    /// Spin is not looked at; spin selection is the caller's business.
    fn integrate(
        &mut self,
        states: (
            &SingleParticleState,
            &SingleParticleState,
            &SingleParticleState,
            &SingleParticleState,
        ),
    ) -> Result<f64, IntegrationError>;
}

impl<T: SpatialIntegrator + ?Sized> SpatialIntegrator for Box<T> {
    fn integrate(
        &mut self,
        states: (
            &SingleParticleState,
            &SingleParticleState,
            &SingleParticleState,
            &SingleParticleState,
        ),
    ) -> Result<f64, IntegrationError> {
        (**self).integrate(states)
    }
}

/// The shielded two-body interaction strength / sqrt(r^2 + a^2).
#[derive(Copy, Clone, Debug)]
pub(crate) struct Potential {
    strength: f64,
    shielding_squared: f64,
}

impl Potential {
    pub fn from_config(config: &Config) -> Self {
        Self {
            strength: config.potential.strength,
            shielding_squared: config.potential.shielding.powi(2),
        }
    }

    pub fn is_shielded(&self) -> bool {
        self.shielding_squared > 0.0
    }

    /// The interaction at squared particle separation `distance_squared`.
    #[inline(always)]
    pub fn at(&self, distance_squared: f64) -> f64 {
        self.strength / (distance_squared + self.shielding_squared).sqrt()
    }
}

/// Reject non-finite integrals instead of letting them reach the element list.
pub(crate) fn finite(value: f64) -> Result<f64, IntegrationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IntegrationError::NonFinite { value })
    }
}

/// Build the integrator selected in the configuration.
///
/// `stream` tells independent instances apart; stochastic integrators mix it into
/// their seed so that separately constructed instances draw different samples.
pub fn create(
    config: &Config,
    wave_function: Arc<dyn WaveFunction>,
    stream: u64,
) -> Result<Box<dyn SpatialIntegrator>, IntegrationError> {
    Ok(match config.integration.integrator {
        IntegratorKind::MonteCarlo => Box::new(MonteCarlo::new(config, wave_function, stream)?),
        IntegratorKind::GaussLaguerre => Box::new(GaussLaguerre::new(config, wave_function)?),
        IntegratorKind::GaussHermite => Box::new(GaussHermite::new(config, wave_function)?),
        IntegratorKind::InteractionIntegrator => Box::new(InteractionIntegrator::new(config)?),
    })
}
