//! Gaussian quadrature rules from the Golub-Welsch eigenvalue problem.

use nalgebra::{DMatrix, SymmetricEigen};

/// Nodes and weights of a quadrature rule, sorted by node.
#[derive(Clone, Debug)]
pub(crate) struct QuadratureRule {
    pub nodes: Vec<f64>,
    pub weights: Vec<f64>,
}

impl QuadratureRule {
    /// Weights multiplied by the inverse of the weight function at each node,
    /// for integrands that already contain the weight function.
    pub fn unweighted(&self, inverse_weight: impl Fn(f64) -> f64) -> Vec<f64> {
        self.nodes
            .iter()
            .zip(&self.weights)
            .map(|(&node, &weight)| weight * inverse_weight(node))
            .collect()
    }
}

/// Diagonalize the symmetric tridiagonal Jacobi matrix of a family of orthogonal
/// polynomials. `mu0` is the integral of the weight function.
fn golub_welsch(diagonal: &[f64], off_diagonal: &[f64], mu0: f64) -> QuadratureRule {
    let n = diagonal.len();
    let jacobi = DMatrix::from_fn(n, n, |i, j| match i.abs_diff(j) {
        0 => diagonal[i],
        1 => off_diagonal[i.min(j)],
        _ => 0.0,
    });

    let eigs = SymmetricEigen::new(jacobi);

    let mut pairs = eigs
        .eigenvalues
        .iter()
        .zip(eigs.eigenvectors.column_iter())
        .map(|(&node, vector)| (node, mu0 * vector[0].powi(2)))
        .collect::<Vec<_>>();

    pairs.sort_unstable_by(|(a, _), (b, _)| a.total_cmp(b));

    let (nodes, weights) = pairs.into_iter().unzip();
    QuadratureRule { nodes, weights }
}

/// Gauss-Hermite rule for the weight exp(-x^2) on the real line.
pub(crate) fn gauss_hermite(n: usize) -> QuadratureRule {
    let diagonal = vec![0.0; n];
    let off_diagonal = (1..n).map(|k| (k as f64 / 2.0).sqrt()).collect::<Vec<_>>();
    golub_welsch(&diagonal, &off_diagonal, std::f64::consts::PI.sqrt())
}

/// Gauss-Laguerre rule for the weight exp(-x) on [0, inf).
pub(crate) fn gauss_laguerre(n: usize) -> QuadratureRule {
    let diagonal = (0..n).map(|k| (2 * k + 1) as f64).collect::<Vec<_>>();
    let off_diagonal = (1..n).map(|k| k as f64).collect::<Vec<_>>();
    golub_welsch(&diagonal, &off_diagonal, 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn apply(rule: &QuadratureRule, f: impl Fn(f64) -> f64) -> f64 {
        rule.nodes
            .iter()
            .zip(&rule.weights)
            .map(|(&x, &w)| w * f(x))
            .sum()
    }

    #[test]
    fn hermite_moments() {
        let rule = gauss_hermite(8);
        let sqrt_pi = std::f64::consts::PI.sqrt();

        assert_relative_eq!(apply(&rule, |_| 1.0), sqrt_pi, epsilon = 1e-12);
        assert_relative_eq!(apply(&rule, |x| x * x), sqrt_pi / 2.0, epsilon = 1e-12);
        assert_relative_eq!(apply(&rule, |x| x.powi(4)), 0.75 * sqrt_pi, epsilon = 1e-12);
        assert!(apply(&rule, |x| x.powi(3)).abs() < 1e-12);
    }

    #[test]
    fn hermite_nodes_are_symmetric_and_sorted() {
        let rule = gauss_hermite(7);
        assert!(rule.nodes.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(rule.nodes[3].abs() < 1e-12);
        assert_relative_eq!(rule.nodes[0], -rule.nodes[6], epsilon = 1e-12);
        assert_relative_eq!(rule.weights[0], rule.weights[6], epsilon = 1e-12);
    }

    #[test]
    fn laguerre_moments() {
        let rule = gauss_laguerre(10);

        assert_relative_eq!(apply(&rule, |_| 1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(apply(&rule, |x| x), 1.0, epsilon = 1e-10);
        assert_relative_eq!(apply(&rule, |x| x.powi(5)), 120.0, epsilon = 1e-8);
        assert!(rule.nodes.iter().all(|&x| x > 0.0));
    }

    #[test]
    fn unweighted_rule_integrates_plain_functions() {
        let rule = gauss_hermite(12);
        let weights = rule.unweighted(|x| (x * x).exp());
        let integral = rule
            .nodes
            .iter()
            .zip(&weights)
            .map(|(&x, &w)| w * (1.0 + x * x) * (-(x * x)).exp())
            .sum::<f64>();

        assert_relative_eq!(
            integral,
            1.5 * std::f64::consts::PI.sqrt(),
            epsilon = 1e-10
        );
    }
}
