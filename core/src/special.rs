//! Special functions needed by the oscillator wavefunctions and the closed-form
//! interaction elements.

/// n! as a float.
pub fn factorial(n: usize) -> f64 {
    (2..=n).map(|i| i as f64).product()
}

/// Binomial coefficient C(n, k), zero when k > n.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Γ(k/2) for a positive integer k, i.e. the gamma function at integers and
/// half-integers.
pub fn gamma_half(k: usize) -> f64 {
    debug_assert!(k > 0, "gamma function has a pole at zero");
    let (mut value, mut x) = if k % 2 == 0 {
        (1.0, 1.0)
    } else {
        (std::f64::consts::PI.sqrt(), 0.5)
    };
    // Γ(x + 1) = x Γ(x)
    while 2.0 * x < k as f64 {
        value *= x;
        x += 1.0;
    }
    value
}

/// Physicists' Hermite polynomial H_n(x) by the three-term recurrence.
pub fn hermite(n: usize, x: f64) -> f64 {
    let mut previous = 1.0;
    if n == 0 {
        return previous;
    }
    let mut current = 2.0 * x;
    for k in 1..n {
        let next = 2.0 * x * current - 2.0 * k as f64 * previous;
        previous = current;
        current = next;
    }
    current
}

/// Generalized Laguerre polynomial L_n^alpha(x) by the three-term recurrence.
pub fn laguerre(n: usize, alpha: f64, x: f64) -> f64 {
    let mut previous = 1.0;
    if n == 0 {
        return previous;
    }
    let mut current = 1.0 + alpha - x;
    for k in 1..n {
        let k = k as f64;
        let next = ((2.0 * k + 1.0 + alpha - x) * current - (k + alpha) * previous) / (k + 1.0);
        previous = current;
        current = next;
    }
    current
}
