//! Match-level engine: rating model, score generation, shootouts.

pub mod penalties;
pub mod poisson;
pub mod rating;
pub mod simulator;

pub use penalties::{penalty_shootout, ShootoutDraw, SHOOTOUT_MAX_ATTEMPTS};
pub use poisson::sample_poisson;
pub use rating::{rating_delta, win_probability, RatingModel, K_FACTOR};
pub use simulator::{MatchInput, MatchSimulator, SimulationMode, SituationalFactors, FORM_MAX, FORM_MIN};
