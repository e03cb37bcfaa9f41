use std::{collections::HashMap, sync::Arc};

use crate::{
    config::{Config, CoordinateType},
    error::IntegrationError,
    state::SingleParticleState,
    wavefunction::WaveFunction,
};

use super::{finite, quadrature, Potential, SpatialIntegrator};

/// Tensor-product Gauss-Hermite quadrature over the Cartesian coordinates of
/// both particles.
///
/// Every orbital carries a factor exp(-w x^2 / 2), so the product of the two
/// orbitals of one particle is integrated against the Hermite weight after the
/// substitution t = sqrt(w) x.
pub struct GaussHermite {
    wave_function: Arc<dyn WaveFunction>,
    /// one particle's grid points, `dim` coordinates each
    points: Vec<Vec<f64>>,
    /// weight of each grid point, including the jacobian
    weights: Vec<f64>,
    /// interaction between every pair of grid points, row major
    interaction: Vec<f64>,
    /// weighted pair densities on the grid, by (first, second, first, second)
    densities: HashMap<(i32, i32, i32, i32), Vec<f64>>,
}

impl GaussHermite {
    const NAME: &'static str = "Gauss-Hermite";

    pub fn new(
        config: &Config,
        wave_function: Arc<dyn WaveFunction>,
    ) -> Result<Self, IntegrationError> {
        if config.coordinate_type != CoordinateType::Cartesian {
            return Err(IntegrationError::Unsupported {
                integrator: Self::NAME,
                reason: "only Cartesian states can be integrated".to_owned(),
            });
        }

        let potential = Potential::from_config(config);
        if !potential.is_shielded() {
            // both particles share the grid, so the diagonal is always singular
            return Err(IntegrationError::Unsupported {
                integrator: Self::NAME,
                reason: "the unshielded interaction diverges on the quadrature grid; \
                         set potential.shielding"
                    .to_owned(),
            });
        }

        let scale = config.w.sqrt().recip();
        let rule = quadrature::gauss_hermite(config.integration.gauss_hermite_points);
        let line_weights = rule.unweighted(|t| (t * t).exp());

        let mut points = Vec::new();
        let mut weights = Vec::new();
        match config.dim {
            1 => {
                for (&t, &weight) in rule.nodes.iter().zip(&line_weights) {
                    points.push(vec![t * scale]);
                    weights.push(weight * scale);
                }
            }
            _ => {
                for (i, j) in itertools::iproduct!(0..rule.nodes.len(), 0..rule.nodes.len()) {
                    points.push(vec![rule.nodes[i] * scale, rule.nodes[j] * scale]);
                    weights.push(line_weights[i] * line_weights[j] * scale * scale);
                }
            }
        }

        let mut interaction = Vec::with_capacity(points.len().pow(2));
        for a in &points {
            for b in &points {
                let distance_squared = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
                interaction.push(potential.at(distance_squared));
            }
        }

        log::debug!(
            "{} integrator with {} points per particle",
            Self::NAME,
            points.len()
        );

        Ok(Self {
            wave_function,
            points,
            weights,
            interaction,
            densities: HashMap::new(),
        })
    }

    fn density_key(a: &SingleParticleState, b: &SingleParticleState) -> (i32, i32, i32, i32) {
        (a.first, a.second, b.first, b.second)
    }

    /// Make sure the weighted pair density of `a` and `b` is tabulated.
    fn tabulate_density(&mut self, a: &SingleParticleState, b: &SingleParticleState) {
        let Self {
            wave_function,
            points,
            weights,
            densities,
            ..
        } = self;

        densities.entry(Self::density_key(a, b)).or_insert_with(|| {
            points
                .iter()
                .zip(weights.iter())
                .map(|(point, &weight)| {
                    weight * wave_function.evaluate(a, point) * wave_function.evaluate(b, point)
                })
                .collect()
        });
    }
}

impl SpatialIntegrator for GaussHermite {
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

        // the interaction is even under reflecting both particles along an axis
        if (p.first + q.first + r.first + s.first) % 2 != 0
            || (p.second + q.second + r.second + s.second) % 2 != 0
        {
            return Ok(0.0);
        }

        self.tabulate_density(p, r);
        self.tabulate_density(q, s);
        let first = &self.densities[&Self::density_key(p, r)];
        let second = &self.densities[&Self::density_key(q, s)];
        let n_points = first.len();

        let mut sum = 0.0;
        for (i, &rho_1) in first.iter().enumerate() {
            if rho_1 == 0.0 {
                continue;
            }
            let row = &self.interaction[i * n_points..(i + 1) * n_points];
            sum += rho_1
                * row
                    .iter()
                    .zip(second)
                    .map(|(v, rho_2)| v * rho_2)
                    .sum::<f64>();
        }

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

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{config::IntegratorKind, state::Spin, wavefunction};

    fn config(dim: usize, shielding: f64) -> Config {
        let mut config = Config::new(
            1.0,
            dim,
            CoordinateType::Cartesian,
            2,
            IntegratorKind::GaussHermite,
        );
        config.potential.shielding = shielding;
        config
    }

    fn state(first: i32, second: i32) -> SingleParticleState {
        SingleParticleState::new(0, first, second, Spin::Up)
    }

    #[test]
    fn rejects_unshielded_interaction() {
        let config = config(1, 0.0);
        let wf = wavefunction::create(&config);
        assert!(matches!(
            GaussHermite::new(&config, wf),
            Err(IntegrationError::Unsupported { .. })
        ));
    }

    #[test]
    fn rejects_polar_states() {
        let mut config = config(2, 0.5);
        config.coordinate_type = CoordinateType::Polar;
        let wf = wavefunction::create(&config);
        assert!(GaussHermite::new(&config, wf).is_err());
    }

    #[test]
    fn constant_potential_gives_overlaps() {
        // a huge shielding turns the interaction into a constant 1/a
        let config = config(1, 1e6);
        let wf = wavefunction::create(&config);
        let mut integrator = GaussHermite::new(&config, wf).unwrap();

        let value = integrator
            .integrate((&state(1, 0), &state(2, 0), &state(1, 0), &state(2, 0)))
            .unwrap();
        assert_relative_eq!(value * 1e6, 1.0, epsilon = 1e-9);

        let value = integrator
            .integrate((&state(1, 0), &state(2, 0), &state(2, 0), &state(1, 0)))
            .unwrap();
        assert!(value.abs() < 1e-12);
    }

    #[test]
    fn symmetric_under_particle_exchange() {
        let config = config(2, 0.3);
        let wf = wavefunction::create(&config);
        let mut integrator = GaussHermite::new(&config, wf).unwrap();

        let (a, b, c, d) = (state(0, 1), state(1, 0), state(1, 1), state(0, 0));
        let direct = integrator.integrate((&a, &b, &c, &d)).unwrap();
        let swapped = integrator.integrate((&b, &a, &d, &c)).unwrap();
        assert_relative_eq!(direct, swapped, epsilon = 1e-12);
    }

    #[test]
    fn odd_parity_vanishes_in_1d() {
        let config = config(1, 0.5);
        let wf = wavefunction::create(&config);
        let mut integrator = GaussHermite::new(&config, wf).unwrap();

        let value = integrator
            .integrate((&state(0, 0), &state(0, 0), &state(1, 0), &state(0, 0)))
            .unwrap();
        assert_eq!(value, 0.0);
    }
}
