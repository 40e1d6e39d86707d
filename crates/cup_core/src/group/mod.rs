//! Group stage: seeding, round-robin fixtures, standings and qualification.

pub mod seeding;
pub mod standings;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TournamentError};
use crate::models::{FixtureResult, GroupFixture, GroupId, TeamStanding};

pub use seeding::{seed_groups, GROUP_SIZE, POT_COUNT, TEAM_COUNT};
pub use standings::{qualify, sort_standings, Qualifier, QUALIFIERS_PER_GROUP};

/// Matchday order of the six pairings among four teams.
const PAIRINGS: [(usize, usize); 6] = [(0, 1), (2, 3), (0, 2), (1, 3), (0, 3), (1, 2)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Team names in seeding order (pot 1 first)
    pub teams: Vec<String>,
    pub fixtures: Vec<GroupFixture>,
    /// One row per team, kept in seeding order; see [`Group::ranked`]
    pub standings: Vec<TeamStanding>,
}

impl Group {
    pub fn new(id: GroupId, teams: Vec<String>) -> Self {
        let fixtures = round_robin(&teams);
        let standings = teams.iter().map(TeamStanding::new).collect();
        Self { id, teams, fixtures, standings }
    }

    pub fn fixture(&self, fixture_id: u8) -> Option<&GroupFixture> {
        self.fixtures.iter().find(|f| f.id == fixture_id)
    }

    pub fn is_complete(&self) -> bool {
        self.fixtures.iter().all(GroupFixture::is_played)
    }

    pub fn unplayed_fixture_ids(&self) -> Vec<u8> {
        self.fixtures.iter().filter(|f| !f.is_played()).map(|f| f.id).collect()
    }

    pub fn standing(&self, team: &str) -> Option<&TeamStanding> {
        self.standings.iter().find(|s| s.team == team)
    }

    /// Write a fixture's score and update both participants' rows.
    ///
    /// Already-played fixtures are left untouched.
    pub fn record_result(&mut self, fixture_id: u8, score_a: u8, score_b: u8) -> Result<&GroupFixture> {
        let group = self.id;
        let idx = self
            .fixtures
            .iter()
            .position(|f| f.id == fixture_id)
            .ok_or(TournamentError::UnknownFixture { group, fixture_id })?;

        if self.fixtures[idx].is_played() {
            warn!(%group, fixture_id, "fixture already played, ignoring");
            return Err(TournamentError::AlreadyPlayed(format!("group {group} fixture {fixture_id}")));
        }

        self.fixtures[idx].result = FixtureResult::Played { score_a, score_b };
        let (team_a, team_b) = (self.fixtures[idx].team_a.clone(), self.fixtures[idx].team_b.clone());
        self.update_standings(&team_a, score_a, score_b);
        self.update_standings(&team_b, score_b, score_a);
        Ok(&self.fixtures[idx])
    }

    fn update_standings(&mut self, team: &str, goals_for: u8, goals_against: u8) {
        if let Some(row) = self.standings.iter_mut().find(|s| s.team == team) {
            row.record(goals_for, goals_against);
        }
    }

    /// Standings sorted by points, goal difference, goals for.
    pub fn ranked(&self) -> Vec<TeamStanding> {
        let mut rows = self.standings.clone();
        sort_standings(&mut rows);
        rows
    }
}

/// All six unordered pairs of a four-team group, ids 1..=6, unplayed.
pub fn round_robin(teams: &[String]) -> Vec<GroupFixture> {
    PAIRINGS
        .iter()
        .filter(|(a, b)| *a < teams.len() && *b < teams.len())
        .enumerate()
        .map(|(i, &(a, b))| GroupFixture::new(i as u8 + 1, teams[a].clone(), teams[b].clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn group() -> Group {
        let teams = ["Spain", "Japan", "Costa Rica", "Canada"].map(String::from).to_vec();
        Group::new(GroupId::new(4).unwrap(), teams)
    }

    #[test]
    fn test_six_fixtures_cover_all_pairs_once() {
        let g = group();
        assert_eq!(g.fixtures.len(), 6);
        let ids: Vec<u8> = g.fixtures.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let pairs: HashSet<(String, String)> = g
            .fixtures
            .iter()
            .map(|f| {
                let mut pair = [f.team_a.clone(), f.team_b.clone()];
                pair.sort();
                (pair[0].clone(), pair[1].clone())
            })
            .collect();
        assert_eq!(pairs.len(), 6);
        assert!(g.fixtures.iter().all(|f| !f.is_played()));
    }

    #[test]
    fn test_record_result_updates_both_rows() {
        let mut g = group();
        let fixture = g.record_result(1, 2, 1).unwrap();
        assert_eq!(fixture.score(), Some((2, 1)));

        let spain = g.standing("Spain").unwrap();
        let japan = g.standing("Japan").unwrap();
        assert_eq!((spain.points, spain.goal_difference), (3, 1));
        assert_eq!((japan.points, japan.losses), (0, 1));
        assert_eq!(g.standing("Canada").unwrap().matches_played, 0);
    }

    #[test]
    fn test_played_fixture_is_not_replayed() {
        let mut g = group();
        g.record_result(2, 0, 0).unwrap();
        let before = g.clone();

        let err = g.record_result(2, 5, 0).unwrap_err();
        assert!(matches!(err, TournamentError::AlreadyPlayed(_)));
        assert_eq!(g, before);
    }

    #[test]
    fn test_unknown_fixture() {
        let mut g = group();
        assert!(matches!(g.record_result(7, 1, 0), Err(TournamentError::UnknownFixture { .. })));
    }

    #[test]
    fn test_full_group_totals_are_consistent() {
        let mut g = group();
        let scores = [(1, 0), (2, 2), (0, 3), (1, 1), (4, 2), (0, 1)];
        for (id, (a, b)) in (1..=6).zip(scores) {
            g.record_result(id, a, b).unwrap();
        }
        assert!(g.is_complete());

        let played: u32 = g.standings.iter().map(|s| s.wins + s.draws + s.losses).sum();
        let gf: u32 = g.standings.iter().map(|s| s.goals_for).sum();
        let ga: u32 = g.standings.iter().map(|s| s.goals_against).sum();
        assert_eq!(played, 12);
        assert_eq!(gf, ga);
        assert!(g.standings.iter().all(TeamStanding::is_consistent));
    }
}
