use std::{collections::HashMap, f64::consts::TAU, sync::Arc};

use crate::{
    config::{Config, CoordinateType},
    error::IntegrationError,
    state::SingleParticleState,
    wavefunction::WaveFunction,
};

use super::{finite, quadrature, Potential, SpatialIntegrator};

/// Quadrature for polar oscillator states in two dimensions.
///
/// With orbitals R(r) exp(i m theta) / sqrt(2 pi) the integral over the mean
/// angle is done exactly, which gives angular momentum conservation
/// `m_p + m_q = m_r + m_s`. What is left is a radial Gauss-Laguerre rule in
/// u = w r^2 for each particle and a midpoint rule over the relative angle.
pub struct GaussLaguerre {
    wave_function: Arc<dyn WaveFunction>,
    potential: Potential,
    radii: Vec<f64>,
    /// radial weights including the jacobian r dr = du / 2w
    weights: Vec<f64>,
    angular_points: usize,
    /// relative-angle kernels by |m_r - m_p|, indexed by radial point pairs
    kernels: HashMap<u32, Vec<f64>>,
    /// weighted radial pair densities by (n, m, n, m)
    densities: HashMap<(i32, i32, i32, i32), Vec<f64>>,
}

impl GaussLaguerre {
    const NAME: &'static str = "Gauss-Laguerre";

    pub fn new(
        config: &Config,
        wave_function: Arc<dyn WaveFunction>,
    ) -> Result<Self, IntegrationError> {
        if config.dim != 2 || config.coordinate_type != CoordinateType::Polar {
            return Err(IntegrationError::Unsupported {
                integrator: Self::NAME,
                reason: "only polar states in two dimensions can be integrated".to_owned(),
            });
        }

        let potential = Potential::from_config(config);
        if !potential.is_shielded() {
            // both particles share the radial grid, so r1 = r2 hits the singularity
            return Err(IntegrationError::Unsupported {
                integrator: Self::NAME,
                reason: "the unshielded interaction diverges on the quadrature grid; \
                         set potential.shielding or use the closed-form integrator"
                    .to_owned(),
            });
        }

        let rule = quadrature::gauss_laguerre(config.integration.gauss_laguerre_points);
        let jacobian = (2.0 * config.w).recip();
        let weights = rule
            .unweighted(f64::exp)
            .into_iter()
            .map(|weight| weight * jacobian)
            .collect();
        let radii = rule.nodes.iter().map(|u| (u / config.w).sqrt()).collect();

        Ok(Self {
            wave_function,
            potential,
            radii,
            weights,
            angular_points: config.integration.angular_points,
            kernels: HashMap::new(),
            densities: HashMap::new(),
        })
    }

    /// (1 / 2 pi) * integral over phi of cos(dm phi) V(r1, r2, phi), for every pair
    /// of radial points.
    fn tabulate_kernel(&mut self, dm: u32) {
        let Self {
            potential,
            radii,
            angular_points,
            kernels,
            ..
        } = self;

        kernels.entry(dm).or_insert_with(|| {
            let n_angles = *angular_points;
            // midpoint rule, phi = 0 stays off the grid
            let angles = (0..n_angles)
                .map(|k| TAU * (k as f64 + 0.5) / n_angles as f64)
                .map(|phi| (phi.cos(), (dm as f64 * phi).cos()))
                .collect::<Vec<_>>();

            let mut kernel = Vec::with_capacity(radii.len().pow(2));
            for &r1 in radii.iter() {
                for &r2 in radii.iter() {
                    let sum = angles
                        .iter()
                        .map(|&(cos_phi, harmonic)| {
                            harmonic * potential.at(r1 * r1 + r2 * r2 - 2.0 * r1 * r2 * cos_phi)
                        })
                        .sum::<f64>();
                    kernel.push(sum / n_angles as f64);
                }
            }
            kernel
        });
    }

    fn density_key(a: &SingleParticleState, b: &SingleParticleState) -> (i32, i32, i32, i32) {
        (a.first, a.second, b.first, b.second)
    }

    fn tabulate_density(&mut self, a: &SingleParticleState, b: &SingleParticleState) {
        let Self {
            wave_function,
            radii,
            weights,
            densities,
            ..
        } = self;

        densities.entry(Self::density_key(a, b)).or_insert_with(|| {
            radii
                .iter()
                .zip(weights.iter())
                .map(|(&r, &weight)| {
                    weight * wave_function.evaluate(a, &[r]) * wave_function.evaluate(b, &[r])
                })
                .collect()
        });
    }
}

impl SpatialIntegrator for GaussLaguerre {
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

        if p.second + q.second != r.second + s.second {
            return Ok(0.0);
        }

        let dm = (r.second - p.second).unsigned_abs();
        self.tabulate_kernel(dm);
        self.tabulate_density(p, r);
        self.tabulate_density(q, s);

        let kernel = &self.kernels[&dm];
        let first = &self.densities[&Self::density_key(p, r)];
        let second = &self.densities[&Self::density_key(q, s)];
        let n_radii = self.radii.len();

        let mut sum = 0.0;
        for (i, &rho_1) in first.iter().enumerate() {
            let row = &kernel[i * n_radii..(i + 1) * n_radii];
            sum += rho_1
                * row
                    .iter()
                    .zip(second)
                    .map(|(k, rho_2)| k * rho_2)
                    .sum::<f64>();
        }

        // the (2 pi)^2 from both angular integrals cancels the orbital normalization
        log::trace!(
            "({} {}|{} {}) = {sum:<1.8}",
            p.index,
            q.index,
            r.index,
            s.index
        );
        finite(sum)
    }
}
