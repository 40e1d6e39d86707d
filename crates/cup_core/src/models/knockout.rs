use serde::{Deserialize, Serialize};

use super::round::{Round, Side};

/// Penalty shootout score. Always strictly separating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shootout {
    pub score_a: u8,
    pub score_b: u8,
}

impl Shootout {
    /// `None` when the two scores are level.
    pub fn new(score_a: u8, score_b: u8) -> Option<Self> {
        (score_a != score_b).then_some(Self { score_a, score_b })
    }

    pub fn winner(&self) -> Side {
        if self.score_a > self.score_b {
            Side::A
        } else {
            Side::B
        }
    }
}

/// Decided knockout result.
///
/// Built only through [`KnockoutOutcome::regulation`] or
/// [`KnockoutOutcome::after_shootout`], so the winner always agrees with the
/// scores and a shootout only follows a level regulation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutOutcome {
    pub score_a: u8,
    pub score_b: u8,
    pub shootout: Option<Shootout>,
    pub winner: Side,
}

impl KnockoutOutcome {
    /// Decided in regulation; `None` for a draw.
    pub fn regulation(score_a: u8, score_b: u8) -> Option<Self> {
        let winner = match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => Side::A,
            std::cmp::Ordering::Less => Side::B,
            std::cmp::Ordering::Equal => return None,
        };
        Some(Self { score_a, score_b, shootout: None, winner })
    }

    /// Level after regulation (`score` goals each), decided on penalties.
    pub fn after_shootout(score: u8, shootout: Shootout) -> Self {
        Self { score_a: score, score_b: score, shootout: Some(shootout), winner: shootout.winner() }
    }

    pub fn went_to_penalties(&self) -> bool {
        self.shootout.is_some()
    }

    /// Rating-model result for side A: 1 for a win, 0 for a loss.
    ///
    /// A shootout counts as a 0.1-goal edge to its winner, which decides the
    /// comparison exactly like a regulation win.
    pub fn actual_result_a(&self) -> f64 {
        match self.winner {
            Side::A => 1.0,
            Side::B => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KnockoutResult {
    Unplayed,
    Played(KnockoutOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutMatch {
    pub round: Round,
    pub team_a: String,
    pub team_b: String,
    pub result: KnockoutResult,
}

impl KnockoutMatch {
    pub fn new(round: Round, team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self { round, team_a: team_a.into(), team_b: team_b.into(), result: KnockoutResult::Unplayed }
    }

    pub fn is_played(&self) -> bool {
        matches!(self.result, KnockoutResult::Played(_))
    }

    pub fn outcome(&self) -> Option<&KnockoutOutcome> {
        match &self.result {
            KnockoutResult::Played(outcome) => Some(outcome),
            KnockoutResult::Unplayed => None,
        }
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    pub fn winner(&self) -> Option<&str> {
        self.outcome().map(|o| self.team(o.winner))
    }

    pub fn loser(&self) -> Option<&str> {
        self.outcome().map(|o| self.team(o.winner.other()))
    }

    pub fn went_to_penalties(&self) -> bool {
        self.outcome().is_some_and(KnockoutOutcome::went_to_penalties)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team_a == team || self.team_b == team
    }

    /// Side `team` plays on, if it takes part in this match.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.team_a == team {
            Some(Side::A)
        } else if self.team_b == team {
            Some(Side::B)
        } else {
            None
        }
    }
}
