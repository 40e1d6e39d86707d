//! Poisson goal sampling

use rand::Rng;
use std::f64::consts::PI;

/// Expectations at or above this use the normal approximation.
pub const NORMAL_APPROX_THRESHOLD: f64 = 30.0;

/// Draw a Poisson-distributed count with mean `lambda`.
///
/// Non-finite or non-positive expectations yield 0.
pub fn sample_poisson<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
    if !lambda.is_finite() || lambda <= 0.0 {
        return 0;
    }
    if lambda < NORMAL_APPROX_THRESHOLD {
        knuth(lambda, rng)
    } else {
        normal_approx(lambda, rng)
    }
}

/// Knuth: multiply uniforms until the product drops below e^-λ.
fn knuth<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
    let limit = (-lambda).exp();
    let mut product = 1.0;
    let mut k = 0u32;
    loop {
        product *= rng.gen::<f64>();
        if product <= limit {
            return k;
        }
        k += 1;
    }
}

/// Box-Muller normal draw N(λ, λ), rounded and floored at 0.
fn normal_approx<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
    // u1 in (0, 1] keeps ln() finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    (lambda + lambda.sqrt() * z).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mean_of(lambda: f64, n: u32) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let total: u64 = (0..n).map(|_| u64::from(sample_poisson(lambda, &mut rng))).sum();
        total as f64 / f64::from(n)
    }

    #[test]
    fn test_knuth_mean_close_to_lambda() {
        let mean = mean_of(1.4, 20_000);
        assert!((mean - 1.4).abs() < 0.05, "mean was {mean}");
    }

    #[test]
    fn test_normal_branch_mean_close_to_lambda() {
        let mean = mean_of(45.0, 5_000);
        assert!((mean - 45.0).abs() < 0.5, "mean was {mean}");
    }

    #[test]
    fn test_degenerate_lambda_is_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample_poisson(0.0, &mut rng), 0);
        assert_eq!(sample_poisson(-3.0, &mut rng), 0);
        assert_eq!(sample_poisson(f64::NAN, &mut rng), 0);
        assert_eq!(sample_poisson(f64::INFINITY, &mut rng), 0);
    }

    proptest! {
        /// Property: sampling never panics and stays near the mean for any expectation
        #[test]
        fn prop_sample_bounded(lambda in 0.0f64..1000.0, seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let k = sample_poisson(lambda, &mut rng);
            prop_assert!(f64::from(k) <= lambda + 12.0 * lambda.sqrt() + 60.0);
        }
    }
}
