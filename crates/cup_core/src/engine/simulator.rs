//! Match score generation
//!
//! Four interchangeable scoring models, all driven by the two teams' ratings
//! (uniform mode ignores them). The simulator never mutates anything; rating
//! updates are applied by the session once a result exists.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::penalties::{penalty_shootout, ShootoutDraw, SHOOTOUT_MAX_ATTEMPTS};
use super::poisson::sample_poisson;
use super::rating::win_probability;
use crate::models::{KnockoutOutcome, Round, Side};

// ============================================================================
// Tuning constants
// ============================================================================

/// Uniform / weighted base draw is 0..=4
const BASE_MAX_GOALS: u8 = 4;
const WEIGHTED_MAX_GOALS: u8 = 6;
const WEIGHTED_SCALE: f64 = 300.0;
const WEIGHTED_SWING: f64 = 0.6;

const BASE_EXPECTATION: f64 = 1.4;
const EXPECTATION_SPREAD: f64 = 0.8;
const EXPECTATION_FLOOR: f64 = 0.1;
const REALISTIC_MAX_GOALS: u32 = 8;
const ADVANCED_MAX_GOALS: u32 = 7;

/// Advanced mode keeps 85% of the model expectation, 15% is noise.
const UPSET_BLEND: f64 = 0.15;
const UPSET_RANGE: f64 = 2.8;

pub const FORM_MIN: f64 = 0.8;
pub const FORM_MAX: f64 = 1.2;

// ============================================================================
// Mode / inputs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// Each side 0..=4 uniformly, ratings ignored
    Uniform,
    /// Uniform base scaled by a tanh strength factor
    Weighted,
    /// Elo expectation + Poisson goals
    #[default]
    Realistic,
    /// Realistic + form, round importance and an upset term
    Advanced,
}

impl SimulationMode {
    pub const ALL: [SimulationMode; 4] = [
        SimulationMode::Uniform,
        SimulationMode::Weighted,
        SimulationMode::Realistic,
        SimulationMode::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SimulationMode::Uniform => "uniform",
            SimulationMode::Weighted => "weighted",
            SimulationMode::Realistic => "realistic",
            SimulationMode::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "random" | "uniform-random" => Ok(SimulationMode::Uniform),
            "weighted" | "rating-weighted" => Ok(SimulationMode::Weighted),
            "realistic" => Ok(SimulationMode::Realistic),
            "advanced" => Ok(SimulationMode::Advanced),
            other => Err(format!("unknown simulation mode: {other}")),
        }
    }
}

/// Per-match situational input. Forms are clamped to 0.8..=1.2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SituationalFactors {
    #[serde(default)]
    pub form_a: Option<f64>,
    #[serde(default)]
    pub form_b: Option<f64>,
    /// Overrides the round's own importance multiplier
    #[serde(default)]
    pub importance: Option<f64>,
}

impl SituationalFactors {
    pub fn with_form(form_a: f64, form_b: f64) -> Self {
        Self { form_a: Some(form_a), form_b: Some(form_b), importance: None }
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }
}

fn clamp_form(form: f64) -> f64 {
    if form.is_finite() {
        form.clamp(FORM_MIN, FORM_MAX)
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchInput {
    pub rating_a: i32,
    pub rating_b: i32,
    pub round: Round,
    pub factors: SituationalFactors,
}

impl MatchInput {
    pub fn new(rating_a: i32, rating_b: i32, round: Round) -> Self {
        Self { rating_a, rating_b, round, factors: SituationalFactors::default() }
    }

    pub fn with_factors(mut self, factors: SituationalFactors) -> Self {
        self.factors = factors;
        self
    }
}

// ============================================================================
// Simulator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSimulator {
    pub mode: SimulationMode,
    pub shootout_max_attempts: u32,
}

impl Default for MatchSimulator {
    fn default() -> Self {
        Self::new(SimulationMode::default(), SHOOTOUT_MAX_ATTEMPTS)
    }
}

impl MatchSimulator {
    pub fn new(mode: SimulationMode, shootout_max_attempts: u32) -> Self {
        Self { mode, shootout_max_attempts }
    }

    /// Regulation score `(goals_a, goals_b)`.
    pub fn simulate_score<R: Rng + ?Sized>(&self, input: &MatchInput, rng: &mut R) -> (u8, u8) {
        let scored = match self.mode {
            SimulationMode::Uniform => Some(uniform_score(rng)),
            SimulationMode::Weighted => Some(weighted_score(input, rng)),
            SimulationMode::Realistic => realistic_score(input, rng),
            SimulationMode::Advanced => advanced_score(input, rng),
        };

        scored.unwrap_or_else(|| {
            warn!(
                mode = %self.mode,
                rating_a = input.rating_a,
                rating_b = input.rating_b,
                "goal expectation not finite, falling back to uniform scoring"
            );
            uniform_score(rng)
        })
    }

    /// Knockout result: regulation score, then a shootout if level.
    ///
    /// `favoured` wins a shootout that never separates within the attempt cap.
    pub fn simulate_knockout<R: Rng + ?Sized>(
        &self,
        input: &MatchInput,
        favoured: Side,
        rng: &mut R,
    ) -> (KnockoutOutcome, Option<ShootoutDraw>) {
        let (a, b) = self.simulate_score(input, rng);
        match KnockoutOutcome::regulation(a, b) {
            Some(outcome) => (outcome, None),
            None => {
                let draw = penalty_shootout(favoured, self.shootout_max_attempts, rng);
                (KnockoutOutcome::after_shootout(a, draw.shootout), Some(draw))
            }
        }
    }
}

fn uniform_score<R: Rng + ?Sized>(rng: &mut R) -> (u8, u8) {
    (rng.gen_range(0..=BASE_MAX_GOALS), rng.gen_range(0..=BASE_MAX_GOALS))
}

fn weighted_score<R: Rng + ?Sized>(input: &MatchInput, rng: &mut R) -> (u8, u8) {
    let (base_a, base_b) = uniform_score(rng);
    let diff = f64::from(input.rating_a - input.rating_b);
    let swing = (diff.abs() / WEIGHTED_SCALE).tanh() * WEIGHTED_SWING;

    let (factor_a, factor_b) = if diff >= 0.0 {
        (1.0 + swing, 1.0 - swing)
    } else {
        (1.0 - swing, 1.0 + swing)
    };

    let scale = |base: u8, factor: f64| {
        (f64::from(base) * factor).floor().clamp(0.0, f64::from(WEIGHTED_MAX_GOALS)) as u8
    };
    (scale(base_a, factor_a), scale(base_b, factor_b))
}

/// 1.4 ± 0.4 goals depending on the win expectation, floored at 0.1
fn goal_expectation(win_probability: f64) -> f64 {
    (BASE_EXPECTATION + (win_probability - 0.5) * EXPECTATION_SPREAD).max(EXPECTATION_FLOOR)
}

fn realistic_score<R: Rng + ?Sized>(input: &MatchInput, rng: &mut R) -> Option<(u8, u8)> {
    let p_a = win_probability(f64::from(input.rating_a), f64::from(input.rating_b));
    let lambda_a = goal_expectation(p_a);
    let lambda_b = goal_expectation(1.0 - p_a);
    if !(lambda_a.is_finite() && lambda_b.is_finite()) {
        return None;
    }

    let a = sample_poisson(lambda_a, rng).min(REALISTIC_MAX_GOALS);
    let b = sample_poisson(lambda_b, rng).min(REALISTIC_MAX_GOALS);
    Some((a as u8, b as u8))
}

fn advanced_score<R: Rng + ?Sized>(input: &MatchInput, rng: &mut R) -> Option<(u8, u8)> {
    let factors = &input.factors;
    let form_a = clamp_form(factors.form_a.unwrap_or_else(|| rng.gen_range(FORM_MIN..=FORM_MAX)));
    let form_b = clamp_form(factors.form_b.unwrap_or_else(|| rng.gen_range(FORM_MIN..=FORM_MAX)));
    let importance = factors.importance.unwrap_or_else(|| input.round.importance());

    let effective_a = f64::from(input.rating_a) * form_a;
    let effective_b = f64::from(input.rating_b) * form_b;
    let p_a = win_probability(effective_a, effective_b);

    let lambda_a = goal_expectation(p_a) * importance;
    let lambda_b = goal_expectation(1.0 - p_a) * importance;
    if !(lambda_a.is_finite() && lambda_b.is_finite()) {
        return None;
    }

    let blend = |lambda: f64, rng: &mut R| {
        (lambda * (1.0 - UPSET_BLEND) + rng.gen_range(0.0..UPSET_RANGE) * UPSET_BLEND)
            .max(EXPECTATION_FLOOR)
    };
    let lambda_a = blend(lambda_a, &mut *rng);
    let lambda_b = blend(lambda_b, &mut *rng);

    let a = sample_poisson(lambda_a, rng).min(ADVANCED_MAX_GOALS);
    let b = sample_poisson(lambda_b, rng).min(ADVANCED_MAX_GOALS);
    Some((a as u8, b as u8))
}
