//! Elo rating model
//!
//! All functions are pure - two ratings in, a probability or delta out.

use serde::{Deserialize, Serialize};

/// Fixed K-factor of the tournament rating model.
pub const K_FACTOR: f64 = 20.0;

/// Elo logistic win expectation of A against B, in (0, 1).
#[inline]
pub fn win_probability(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(-(rating_a - rating_b) / 400.0))
}

/// Rating change for A given A's actual result (0, 0.5, 1 or a shootout edge).
/// B changes by the negation.
#[inline]
pub fn rating_delta(rating_a: f64, rating_b: f64, actual_a: f64, k_factor: f64) -> f64 {
    k_factor * (actual_a - win_probability(rating_a, rating_b))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingModel {
    pub k_factor: f64,
}

impl Default for RatingModel {
    fn default() -> Self {
        Self { k_factor: K_FACTOR }
    }
}

impl RatingModel {
    pub fn new(k_factor: f64) -> Self {
        Self { k_factor }
    }

    pub fn win_probability(&self, rating_a: i32, rating_b: i32) -> f64 {
        win_probability(f64::from(rating_a), f64::from(rating_b))
    }

    pub fn delta(&self, rating_a: i32, rating_b: i32, actual_a: f64) -> f64 {
        rating_delta(f64::from(rating_a), f64::from(rating_b), actual_a, self.k_factor)
    }

    /// New integer ratings for both teams, each rounded to the nearest point.
    pub fn updated_ratings(&self, rating_a: i32, rating_b: i32, actual_a: f64) -> (i32, i32) {
        let delta = self.delta(rating_a, rating_b, actual_a);
        let new_a = (f64::from(rating_a) + delta).round() as i32;
        let new_b = (f64::from(rating_b) - delta).round() as i32;
        (new_a, new_b)
    }
}
