//! Closed-form Coulomb matrix elements of the two-dimensional oscillator.
//!
//! Reference:
//!
//! [1] Anisimovas, E. and Matulis, A. Energy spectra of few-electron quantum dots.
//!     J. Phys.: Condens. Matter 10, 601 (1998).

use crate::{
    config::{Config, CoordinateType},
    error::IntegrationError,
    special::{binomial, factorial, gamma_half},
    state::SingleParticleState,
};

use super::{finite, SpatialIntegrator};

/// Exact Coulomb elements for polar states, `strength * sqrt(w) * V(n, m)`.
/// The shielding of the potential is ignored.
pub struct InteractionIntegrator {
    scale: f64,
}

impl InteractionIntegrator {
    const NAME: &'static str = "interaction";

    pub fn new(config: &Config) -> Result<Self, IntegrationError> {
        if config.dim != 2 || config.coordinate_type != CoordinateType::Polar {
            return Err(IntegrationError::Unsupported {
                integrator: Self::NAME,
                reason: "closed-form elements exist for polar states in two dimensions only"
                    .to_owned(),
            });
        }

        if config.potential.shielding > 0.0 {
            log::warn!(
                "the {} integrator ignores potential.shielding = {}",
                Self::NAME,
                config.potential.shielding
            );
        }

        Ok(Self {
            scale: config.potential.strength * config.w.sqrt(),
        })
    }
}

impl SpatialIntegrator for InteractionIntegrator {
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
        let orbital = |state: &SingleParticleState| (state.first as usize, state.second);

        // the closed form pairs the first bra orbital with the last ket orbital
        let value =
            self.scale * coulomb_element([orbital(p), orbital(q), orbital(s), orbital(r)]);

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

#[inline(always)]
fn sign(exponent: usize) -> f64 {
    if exponent % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Dimensionless Coulomb element for w = 1 between orbitals `[1, 2, 3, 4]`, where
/// orbital 1 pairs with 4 and orbital 2 with 3 in the integrand.
fn coulomb_element(orbitals: [(usize, i32); 4]) -> f64 {
    let [(n1, m1), (n2, m2), (n3, m3), (n4, m4)] = orbitals;
    if m1 + m2 != m3 + m4 {
        return 0.0;
    }

    let abs_m = [m1, m2, m3, m4].map(|m| m.unsigned_abs() as usize);
    let n = [n1, n2, n3, n4];
    // (|m| + m) / 2 and (|m| - m) / 2
    let positive = [m1, m2, m3, m4].map(|m| m.max(0) as usize);
    let negative = [m1, m2, m3, m4].map(|m| (-m).max(0) as usize);

    let normalization = (0..4)
        .map(|i| factorial(n[i]) / factorial(n[i] + abs_m[i]))
        .product::<f64>()
        .sqrt();

    let mut sum = 0.0;
    for (j1, j2, j3, j4) in itertools::iproduct!(0..=n1, 0..=n2, 0..=n3, 0..=n4) {
        let j = [j1, j2, j3, j4];

        let radial = (0..4)
            .map(|i| binomial(n[i] + abs_m[i], n[i] - j[i]) / factorial(j[i]))
            .product::<f64>()
            * sign(j1 + j2 + j3 + j4);

        let gamma = [
            j1 + j4 + positive[0] + negative[3],
            j2 + j3 + positive[1] + negative[2],
            j3 + j2 + positive[2] + negative[1],
            j4 + j1 + positive[3] + negative[0],
        ];
        let total = gamma.iter().sum::<usize>();

        let mut angular = 0.0;
        for (l1, l2, l3, l4) in
            itertools::iproduct!(0..=gamma[0], 0..=gamma[1], 0..=gamma[2], 0..=gamma[3])
        {
            if l1 + l2 != l3 + l4 {
                continue;
            }
            let lambda = l1 + l2 + l3 + l4;

            angular += sign(gamma[1] + gamma[2] - l2 - l3)
                * binomial(gamma[0], l1)
                * binomial(gamma[1], l2)
                * binomial(gamma[2], l3)
                * binomial(gamma[3], l4)
                * factorial(lambda / 2)
                * gamma_half(total - lambda + 1);
        }

        sum += radial * 2f64.powf(-(total as f64 + 1.0) / 2.0) * angular;
    }

    normalization * sum
}
