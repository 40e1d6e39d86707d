use serde::{Deserialize, Serialize};

/// Result slot of a group fixture. Scores only exist once the fixture is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FixtureResult {
    Unplayed,
    Played { score_a: u8, score_b: u8 },
}

/// A group-stage match between two group members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFixture {
    /// 1..=6 within the group
    pub id: u8,
    pub team_a: String,
    pub team_b: String,
    pub result: FixtureResult,
}

impl GroupFixture {
    pub fn new(id: u8, team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self { id, team_a: team_a.into(), team_b: team_b.into(), result: FixtureResult::Unplayed }
    }

    pub fn is_played(&self) -> bool {
        matches!(self.result, FixtureResult::Played { .. })
    }

    pub fn score(&self) -> Option<(u8, u8)> {
        match self.result {
            FixtureResult::Played { score_a, score_b } => Some((score_a, score_b)),
            FixtureResult::Unplayed => None,
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team_a == team || self.team_b == team
    }
}
