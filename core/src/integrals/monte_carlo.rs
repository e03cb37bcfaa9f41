use std::{f64::consts::PI, sync::Arc};

use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{
    config::{Config, CoordinateType},
    error::IntegrationError,
    state::SingleParticleState,
    wavefunction::WaveFunction,
};

use super::{finite, Potential, SpatialIntegrator};

/// Importance-sampled Monte Carlo integration.
///
/// Both particles are drawn from the oscillator density (w / pi)^(d/2) exp(-w r^2),
/// which carries the Gaussian tails of every orbital product. Works for Cartesian
/// and polar states.
pub struct MonteCarlo {
    wave_function: Arc<dyn WaveFunction>,
    potential: Potential,
    coordinates: CoordinateType,
    dim: usize,
    w: f64,
    samples: usize,
    sampler: Normal<f64>,
    rng: StdRng,
}

impl MonteCarlo {
    const NAME: &'static str = "Monte Carlo";

    pub fn new(
        config: &Config,
        wave_function: Arc<dyn WaveFunction>,
        stream: u64,
    ) -> Result<Self, IntegrationError> {
        let potential = Potential::from_config(config);

        if !potential.is_shielded() {
            if config.dim == 1 {
                return Err(IntegrationError::Unsupported {
                    integrator: Self::NAME,
                    reason: "the unshielded interaction is not integrable in one dimension"
                        .to_owned(),
                });
            }
            log::warn!("sampling the unshielded interaction has unbounded variance");
        }

        let sampler = Normal::new(0.0, (2.0 * config.w).sqrt().recip()).map_err(|err| {
            IntegrationError::Unsupported {
                integrator: Self::NAME,
                reason: err.to_string(),
            }
        })?;

        let seed = config
            .integration
            .seed
            .wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));

        Ok(Self {
            wave_function,
            potential,
            coordinates: config.coordinate_type,
            dim: config.dim,
            w: config.w,
            samples: config.integration.monte_carlo_samples,
            sampler,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn draw(&mut self) -> [f64; 2] {
        let mut position = [0.0; 2];
        for x in position.iter_mut().take(self.dim) {
            *x = self.sampler.sample(&mut self.rng);
        }
        position
    }

    /// Product of the two orbitals of one particle, divided by the sampling density.
    /// For polar states the angular phase is returned separately.
    fn pair_ratio(
        &self,
        a: &SingleParticleState,
        b: &SingleParticleState,
        position: &[f64; 2],
    ) -> (f64, f64) {
        let radius_squared = position.iter().map(|x| x * x).sum::<f64>();
        let density =
            (self.w / PI).powf(self.dim as f64 / 2.0) * (-self.w * radius_squared).exp();

        match self.coordinates {
            CoordinateType::Cartesian => {
                let coordinates = &position[..self.dim];
                let product = self.wave_function.evaluate(a, coordinates)
                    * self.wave_function.evaluate(b, coordinates);
                (product / density, 0.0)
            }
            CoordinateType::Polar => {
                let radius = radius_squared.sqrt();
                let angle = position[1].atan2(position[0]);
                let product = self.wave_function.evaluate(a, &[radius])
                    * self.wave_function.evaluate(b, &[radius]);
                // 1 / (2 pi) from the two angular normalizations
                let phase = (b.second - a.second) as f64 * angle;
                (product / (2.0 * PI * density), phase)
            }
        }
    }
}

impl SpatialIntegrator for MonteCarlo {
    fn integrate(
        &mut self,
        states: (
            &SingleParticleState,
            &SingleParticleState,
            &SingleParticleState,
            &SingleParticleState,
        ),
    ) -> Result<f64, IntegrationError> {
        let (p, q, r, s) = states;

        if self.coordinates == CoordinateType::Polar && p.second + q.second != r.second + s.second
        {
            return Ok(0.0);
        }

        let mut sum = 0.0;
        for _ in 0..self.samples {
            let first = self.draw();
            let second = self.draw();

            let (ratio_1, phase_1) = self.pair_ratio(p, r, &first);
            let (ratio_2, phase_2) = self.pair_ratio(q, s, &second);

            let distance_squared = first
                .iter()
                .zip(&second)
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f64>();

            sum += ratio_1
                * ratio_2
                * (phase_1 + phase_2).cos()
                * self.potential.at(distance_squared);
        }

        let value = sum / self.samples as f64;
        log::trace!(
            "({} {}|{} {}) = {value:<1.8}",
            p.index,
            q.index,
            r.index,
            s.index
        );
        finite(value)
    }
}
