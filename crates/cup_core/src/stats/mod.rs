//! Post-tournament statistics
//!
//! Everything here is read-only over the group and bracket data and is
//! recomputed on every call.

pub mod journey;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::bracket::Bracket;
use crate::group::Group;
use crate::models::{MatchKind, MatchSummary, RatingChange, Round, Shootout, Team};

pub use journey::{champion_journey, ChampionJourney, JourneyStep};

/// Goal totals for a set of played matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageStats {
    pub total_goals: u32,
    pub total_matches: u32,
    /// Rounded to two decimals, 0 when nothing was played
    pub average_goals_per_match: f64,
}

impl StageStats {
    pub fn from_matches<'a>(matches: impl IntoIterator<Item = MatchKind<'a>>) -> Self {
        let (goals, played) = matches
            .into_iter()
            .filter_map(|m| m.total_goals())
            .fold((0u32, 0u32), |(goals, played), g| (goals + g, played + 1));
        Self { total_goals: goals, total_matches: played, average_goals_per_match: average(goals, played) }
    }
}

fn average(goals: u32, matches: u32) -> f64 {
    if matches == 0 {
        return 0.0;
    }
    (f64::from(goals) / f64::from(matches) * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHighlight {
    pub round: Round,
    pub team_a: String,
    pub team_b: String,
    pub score_a: u8,
    pub score_b: u8,
    pub shootout: Option<Shootout>,
    pub summary: String,
}

impl MatchHighlight {
    fn from_match(m: &MatchKind<'_>) -> Option<Self> {
        let (score_a, score_b) = m.goals()?;
        let (team_a, team_b) = m.teams();
        let shootout = match m {
            MatchKind::Knockout(k) => k.outcome().and_then(|o| o.shootout),
            MatchKind::Group(_) => None,
        };
        Some(Self {
            round: m.round(),
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            score_a,
            score_b,
            shootout,
            summary: m.score_summary(),
        })
    }

    pub fn margin(&self) -> u32 {
        u32::from(self.score_a.abs_diff(self.score_b))
    }

    pub fn total_goals(&self) -> u32 {
        u32::from(self.score_a) + u32::from(self.score_b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingMove {
    pub team: String,
    pub initial: i32,
    pub current: i32,
}

impl RatingMove {
    pub fn gain(&self) -> i32 {
        self.current - self.initial
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentStats {
    pub group_stage: StageStats,
    pub knockout: StageStats,
    pub overall: StageStats,
    /// Largest winning margin over both stages
    pub biggest_win: Option<MatchHighlight>,
    /// Largest winning margin over knockout matches only
    pub knockout_biggest_win: Option<MatchHighlight>,
    pub most_goals_in_match: Option<MatchHighlight>,
    pub penalty_shootouts: u32,
    pub champion: Option<String>,
    pub runner_up: Option<String>,
    pub third_place: Option<String>,
    pub fourth_place: Option<String>,
    pub highest_rated_team: Option<RatingMove>,
    pub biggest_rating_gain: Option<RatingMove>,
}

impl TournamentStats {
    pub fn compute(groups: &[Group], bracket: Option<&Bracket>, teams: &[Team], history: &[RatingChange]) -> Self {
        let group_matches: Vec<MatchKind<'_>> =
            groups.iter().flat_map(|g| g.fixtures.iter().map(MatchKind::Group)).collect();
        let knockout_matches: Vec<MatchKind<'_>> = bracket
            .map(|b| b.all_matches().into_iter().map(MatchKind::Knockout).collect())
            .unwrap_or_default();

        let group_stage = StageStats::from_matches(group_matches.iter().copied());
        let knockout = StageStats::from_matches(knockout_matches.iter().copied());
        let overall = StageStats::from_matches(group_matches.iter().chain(&knockout_matches).copied());

        let all: Vec<MatchHighlight> = group_matches
            .iter()
            .chain(&knockout_matches)
            .filter_map(MatchHighlight::from_match)
            .collect();
        let knockout_played: Vec<MatchHighlight> =
            knockout_matches.iter().filter_map(MatchHighlight::from_match).collect();

        let penalty_shootouts = knockout_matches.iter().filter(|m| m.went_to_penalties()).count() as u32;

        let initial = initial_ratings(teams, history);
        let moves: Vec<RatingMove> = teams
            .iter()
            .map(|t| RatingMove {
                team: t.name.clone(),
                initial: initial.get(t.name.as_str()).copied().unwrap_or(t.rating),
                current: t.rating,
            })
            .collect();

        Self {
            group_stage,
            knockout,
            overall,
            biggest_win: biggest_win(&all),
            knockout_biggest_win: biggest_win(&knockout_played),
            most_goals_in_match: first_max_by(&all, MatchHighlight::total_goals).cloned(),
            penalty_shootouts,
            champion: bracket.and_then(Bracket::champion).map(str::to_string),
            runner_up: bracket.and_then(Bracket::runner_up).map(str::to_string),
            third_place: bracket.and_then(Bracket::third_place_winner).map(str::to_string),
            fourth_place: bracket.and_then(Bracket::fourth_place).map(str::to_string),
            highest_rated_team: first_max_by(&moves, |m| m.current).cloned(),
            biggest_rating_gain: first_max_by(&moves, RatingMove::gain).cloned(),
        }
    }
}

/// Rating each team held before its first recorded change.
fn initial_ratings<'a>(teams: &'a [Team], history: &'a [RatingChange]) -> HashMap<&'a str, i32> {
    let mut initial: HashMap<&str, i32> = HashMap::with_capacity(teams.len());
    for change in history {
        initial.entry(change.team.as_str()).or_insert(change.before);
    }
    initial
}

fn biggest_win(matches: &[MatchHighlight]) -> Option<MatchHighlight> {
    first_max_by(matches, MatchHighlight::margin).filter(|m| m.margin() > 0).cloned()
}

/// Like `Iterator::max_by_key` but keeps the earliest of equal maxima.
fn first_max_by<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    items.iter().fold(None, |best: Option<&T>, item| match best {
        Some(b) if key(item) <= key(b) => Some(b),
        _ => Some(item),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixtureResult, GroupId, KnockoutMatch, KnockoutOutcome, KnockoutResult};

    fn played_group() -> Group {
        let teams = ["Qatar", "Ecuador", "Senegal", "Netherlands"].map(String::from).to_vec();
        let mut group = Group::new(GroupId::new(0).unwrap(), teams);
        for (id, (a, b)) in (1..=6).zip([(0, 2), (0, 2), (1, 3), (1, 1), (2, 0), (1, 2)]) {
            group.record_result(id, a, b).unwrap();
        }
        group
    }

    #[test]
    fn test_empty_tournament_is_zero_safe() {
        let stats = TournamentStats::compute(&[], None, &[], &[]);
        assert_eq!(stats.overall.total_matches, 0);
        assert_eq!(stats.overall.average_goals_per_match, 0.0);
        assert!(stats.biggest_win.is_none());
        assert!(stats.champion.is_none());
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        assert_eq!(average(10, 3), 3.33);
        assert_eq!(average(2, 3), 0.67);
        assert_eq!(average(0, 0), 0.0);
    }

    #[test]
    fn test_group_stage_counts_and_biggest_win() {
        let group = played_group();
        let stats = TournamentStats::compute(std::slice::from_ref(&group), None, &[], &[]);
        assert_eq!(stats.group_stage.total_matches, 6);
        assert_eq!(stats.group_stage.total_goals, 15);
        assert_eq!(stats.group_stage.average_goals_per_match, 2.5);
        assert_eq!(stats.knockout, StageStats::default());

        // four results share the two-goal margin, the earliest is kept
        let biggest = stats.biggest_win.unwrap();
        assert_eq!((biggest.team_a.as_str(), biggest.score_a, biggest.score_b), ("Qatar", 0, 2));
        let most = stats.most_goals_in_match.unwrap();
        assert_eq!((most.score_a, most.score_b), (1, 3));
        assert!(stats.knockout_biggest_win.is_none());
    }

    #[test]
    fn test_knockout_only_biggest_win_and_shootouts() {
        let group = played_group();
        let mut bracket = Bracket::default();
        let mut thrashing = KnockoutMatch::new(Round::RoundOf16, "France", "Poland");
        thrashing.result = KnockoutResult::Played(KnockoutOutcome::regulation(3, 1).unwrap());
        let mut shootout = KnockoutMatch::new(Round::RoundOf16, "Japan", "Croatia");
        shootout.result = KnockoutResult::Played(KnockoutOutcome::after_shootout(
            1,
            crate::models::Shootout::new(1, 3).unwrap(),
        ));
        bracket.left.round_of_16 = vec![thrashing, shootout];

        let stats = TournamentStats::compute(std::slice::from_ref(&group), Some(&bracket), &[], &[]);
        assert_eq!(stats.penalty_shootouts, 1);
        assert_eq!(stats.knockout.total_matches, 2);
        assert_eq!(stats.knockout.total_goals, 6);
        assert_eq!(stats.overall.total_matches, 8);
        assert_eq!(stats.overall.total_goals, 21);
        assert_eq!(stats.knockout_biggest_win.unwrap().team_a, "France");
        // group match came first among the margin-2 results
        assert_eq!(stats.biggest_win.unwrap().round, Round::Group);
    }

    #[test]
    fn test_rating_moves_use_first_recorded_rating() {
        let teams = vec![Team::new("Morocco", 1790), Team::new("Spain", 2020)];
        let history = vec![
            RatingChange { team: "Morocco".into(), round: Round::Group, before: 1750, after: 1770 },
            RatingChange { team: "Morocco".into(), round: Round::RoundOf16, before: 1770, after: 1790 },
            RatingChange { team: "Spain".into(), round: Round::RoundOf16, before: 2040, after: 2020 },
        ];
        let stats = TournamentStats::compute(&[], None, &teams, &history);
        let gain = stats.biggest_rating_gain.unwrap();
        assert_eq!((gain.team.as_str(), gain.gain()), ("Morocco", 40));
        assert_eq!(stats.highest_rated_team.unwrap().team, "Spain");
    }

    #[test]
    fn test_unplayed_fixtures_are_ignored() {
        let group = Group::new(GroupId::new(1).unwrap(), vec!["a".into(), "b".into()]);
        assert!(matches!(group.fixtures[0].result, FixtureResult::Unplayed));
        let stats = TournamentStats::compute(std::slice::from_ref(&group), None, &[], &[]);
        assert_eq!(stats.group_stage.total_matches, 0);
    }
}
