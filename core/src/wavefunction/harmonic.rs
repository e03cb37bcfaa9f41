use std::f64::consts::PI;

use crate::{
    config::CoordinateType,
    special::{factorial, hermite, laguerre},
    state::SingleParticleState,
};

use super::WaveFunction;

/// Normalized 1D oscillator eigenfunction
/// phi_n(x) = (w/pi)^(1/4) / sqrt(2^n n!) H_n(sqrt(w) x) exp(-w x^2 / 2)
fn hermite_function(n: usize, x: f64, w: f64, sqrt_w: f64) -> f64 {
    let xi = sqrt_w * x;
    let norm = (w / PI).sqrt().sqrt() / (2f64.powi(n as i32) * factorial(n)).sqrt();
    norm * hermite(n, xi) * (-0.5 * xi * xi).exp()
}

#[inline(always)]
fn quantum_number(value: i32) -> usize {
    debug_assert!(value >= 0, "negative oscillator quantum number {value}");
    value as usize
}

/// Harmonic oscillator in one dimension. States are labelled `(n, 0)`.
#[derive(Clone, Debug)]
pub struct HarmonicOscillator1d {
    w: f64,
    sqrt_w: f64,
}

impl HarmonicOscillator1d {
    pub fn new(w: f64) -> Self {
        Self { w, sqrt_w: w.sqrt() }
    }
}

impl WaveFunction for HarmonicOscillator1d {
    fn dim(&self) -> usize {
        1
    }

    fn energy(&self, state: &SingleParticleState) -> f64 {
        self.w * (state.first as f64 + 0.5)
    }

    fn evaluate(&self, state: &SingleParticleState, coordinates: &[f64]) -> f64 {
        hermite_function(quantum_number(state.first), coordinates[0], self.w, self.sqrt_w)
    }
}

/// Isotropic harmonic oscillator in two dimensions, labelled either by
/// Cartesian `(nx, ny)` or polar `(n, m)` quantum numbers.
#[derive(Clone, Debug)]
pub struct HarmonicOscillator2d {
    w: f64,
    sqrt_w: f64,
    coordinates: CoordinateType,
}

impl HarmonicOscillator2d {
    pub fn new(w: f64, coordinates: CoordinateType) -> Self {
        Self {
            w,
            sqrt_w: w.sqrt(),
            coordinates,
        }
    }

    /// Radial function normalized as integral R(r)^2 r dr = 1:
    ///
    /// R_{n,m}(r) = sqrt(2 n! / (n + |m|)!) w^((|m| + 1) / 2) r^|m| exp(-w r^2 / 2) L_n^|m|(w r^2)
    pub fn radial(&self, n: usize, m: i32, r: f64) -> f64 {
        let abs_m = m.unsigned_abs() as usize;
        let u = self.w * r * r;
        let norm = (2.0 * factorial(n) / factorial(n + abs_m)).sqrt()
            * self.sqrt_w.powi(abs_m as i32 + 1);

        norm * r.powi(abs_m as i32) * (-0.5 * u).exp() * laguerre(n, abs_m as f64, u)
    }
}

impl WaveFunction for HarmonicOscillator2d {
    fn dim(&self) -> usize {
        2
    }

    fn energy(&self, state: &SingleParticleState) -> f64 {
        match self.coordinates {
            CoordinateType::Cartesian => self.w * (state.first + state.second + 1) as f64,
            CoordinateType::Polar => {
                self.w * (2 * state.first + state.second.abs() + 1) as f64
            }
        }
    }

    fn evaluate(&self, state: &SingleParticleState, coordinates: &[f64]) -> f64 {
        match self.coordinates {
            CoordinateType::Cartesian => {
                hermite_function(quantum_number(state.first), coordinates[0], self.w, self.sqrt_w)
                    * hermite_function(
                        quantum_number(state.second),
                        coordinates[1],
                        self.w,
                        self.sqrt_w,
                    )
            }
            CoordinateType::Polar => {
                self.radial(quantum_number(state.first), state.second, coordinates[0])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::state::Spin;

    fn state(first: i32, second: i32) -> SingleParticleState {
        SingleParticleState::new(0, first, second, Spin::Up)
    }

    /// Riemann sum of f over [-limit, limit] with the given step.
    fn integrate_line(f: impl Fn(f64) -> f64, limit: f64, step: f64) -> f64 {
        let n = (2.0 * limit / step) as usize;
        (0..=n).map(|i| f(-limit + i as f64 * step)).sum::<f64>() * step
    }

    #[test]
    fn energies_1d() {
        let wf = HarmonicOscillator1d::new(2.0);
        assert_eq!(wf.energy(&state(0, 0)), 1.0);
        assert_eq!(wf.energy(&state(3, 0)), 7.0);
    }

    #[test]
    fn energies_2d() {
        let cartesian = HarmonicOscillator2d::new(0.5, CoordinateType::Cartesian);
        assert_eq!(cartesian.energy(&state(1, 2)), 2.0);

        let polar = HarmonicOscillator2d::new(0.5, CoordinateType::Polar);
        assert_eq!(polar.energy(&state(0, 0)), 0.5);
        assert_eq!(polar.energy(&state(1, -2)), 2.5);
    }

    #[test]
    fn hermite_functions_are_orthonormal() {
        let wf = HarmonicOscillator1d::new(1.5);
        for (a, b) in itertools::iproduct!(0..4, 0..4) {
            let overlap = integrate_line(
                |x| wf.evaluate(&state(a, 0), &[x]) * wf.evaluate(&state(b, 0), &[x]),
                10.0,
                1e-3,
            );
            let expected = if a == b { 1.0 } else { 0.0 };
            assert!(
                (overlap - expected).abs() < 1e-6,
                "<{a}|{b}> = {overlap}, expected {expected}"
            );
        }
    }

    #[test]
    fn radial_functions_are_normalized() {
        let wf = HarmonicOscillator2d::new(0.8, CoordinateType::Polar);
        for (n, m) in [(0, 0), (0, 1), (1, -1), (2, 3)] {
            let step = 1e-3;
            let norm = (1..20_000)
                .map(|i| {
                    let r = i as f64 * step;
                    wf.radial(n, m, r).powi(2) * r
                })
                .sum::<f64>()
                * step;
            assert_relative_eq!(norm, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn cartesian_2d_is_a_product() {
        let one = HarmonicOscillator1d::new(1.0);
        let two = HarmonicOscillator2d::new(1.0, CoordinateType::Cartesian);
        let value = two.evaluate(&state(1, 2), &[0.3, -0.7]);
        let expected =
            one.evaluate(&state(1, 0), &[0.3]) * one.evaluate(&state(2, 0), &[-0.7]);
        assert_relative_eq!(value, expected);
    }
}
