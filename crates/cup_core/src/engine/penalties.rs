//! Penalty shootouts for drawn knockout matches

use rand::Rng;
use tracing::warn;

use crate::models::{Shootout, Side};

/// Redraws allowed before the shootout is forced.
pub const SHOOTOUT_MAX_ATTEMPTS: u32 = 50;

const MIN_CONVERTED: u8 = 3;
const MAX_CONVERTED: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShootoutDraw {
    pub shootout: Shootout,
    /// Number of draws taken, 1 when the first draw separated the teams
    pub attempts: u32,
    /// The cap was hit and the favoured side was awarded the shootout
    pub forced: bool,
}

/// Each side converts 3..=5 penalties; level draws are redrawn.
///
/// After `max_attempts` level draws the `favoured` side wins 5-4.
pub fn penalty_shootout<R: Rng + ?Sized>(favoured: Side, max_attempts: u32, rng: &mut R) -> ShootoutDraw {
    for attempt in 1..=max_attempts {
        let a = rng.gen_range(MIN_CONVERTED..=MAX_CONVERTED);
        let b = rng.gen_range(MIN_CONVERTED..=MAX_CONVERTED);
        if let Some(shootout) = Shootout::new(a, b) {
            return ShootoutDraw { shootout, attempts: attempt, forced: false };
        }
    }

    warn!(?favoured, max_attempts, "shootout never separated, awarding it to the favoured side");
    let shootout = match favoured {
        Side::A => Shootout { score_a: MAX_CONVERTED, score_b: MAX_CONVERTED - 1 },
        Side::B => Shootout { score_a: MAX_CONVERTED - 1, score_b: MAX_CONVERTED },
    };
    ShootoutDraw { shootout, attempts: max_attempts, forced: true }
}
