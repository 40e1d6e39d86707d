//! Knockout bracket state machine
//!
//! Two symmetric halves feed a shared final and third-place match. A round's
//! matches are only created once every match of the previous round has been
//! played; completion predicates are always recomputed from the matches.

pub mod draw;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Half, KnockoutMatch, MatchSlot, Round};

pub use draw::draw_round_of_16;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BracketHalf {
    pub round_of_16: Vec<KnockoutMatch>,
    pub quarter_finals: Vec<KnockoutMatch>,
    pub semi_final: Option<KnockoutMatch>,
}

impl BracketHalf {
    fn matches(&self) -> impl Iterator<Item = &KnockoutMatch> {
        self.round_of_16.iter().chain(&self.quarter_finals).chain(&self.semi_final)
    }
}

/// Round-completion state reported per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// Matches not created yet
    Pending,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub left: BracketHalf,
    pub right: BracketHalf,
    pub third_place: Option<KnockoutMatch>,
    #[serde(rename = "final")]
    pub final_match: Option<KnockoutMatch>,
}

impl Bracket {
    pub fn half(&self, half: Half) -> &BracketHalf {
        match half {
            Half::Left => &self.left,
            Half::Right => &self.right,
        }
    }

    pub fn half_mut(&mut self, half: Half) -> &mut BracketHalf {
        match half {
            Half::Left => &mut self.left,
            Half::Right => &mut self.right,
        }
    }

    pub fn get(&self, slot: MatchSlot) -> Option<&KnockoutMatch> {
        match slot {
            MatchSlot::RoundOf16 { half, index } => self.half(half).round_of_16.get(index),
            MatchSlot::QuarterFinal { half, index } => self.half(half).quarter_finals.get(index),
            MatchSlot::SemiFinal { half } => self.half(half).semi_final.as_ref(),
            MatchSlot::ThirdPlace => self.third_place.as_ref(),
            MatchSlot::Final => self.final_match.as_ref(),
        }
    }

    pub fn get_mut(&mut self, slot: MatchSlot) -> Option<&mut KnockoutMatch> {
        match slot {
            MatchSlot::RoundOf16 { half, index } => self.half_mut(half).round_of_16.get_mut(index),
            MatchSlot::QuarterFinal { half, index } => {
                self.half_mut(half).quarter_finals.get_mut(index)
            }
            MatchSlot::SemiFinal { half } => self.half_mut(half).semi_final.as_mut(),
            MatchSlot::ThirdPlace => self.third_place.as_mut(),
            MatchSlot::Final => self.final_match.as_mut(),
        }
    }

    /// Existing matches of `round`, left half first.
    pub fn round_matches(&self, round: Round) -> Vec<&KnockoutMatch> {
        MatchSlot::for_round(round).into_iter().filter_map(|slot| self.get(slot)).collect()
    }

    /// Every created knockout match, in round order.
    pub fn all_matches(&self) -> Vec<&KnockoutMatch> {
        Round::KNOCKOUT.iter().flat_map(|&round| self.round_matches(round)).collect()
    }

    fn all_played(matches: &[&KnockoutMatch], expected: usize) -> bool {
        matches.len() == expected && matches.iter().all(|m| m.is_played())
    }

    pub fn are_all_round_of_16_played(&self) -> bool {
        Self::all_played(&self.round_matches(Round::RoundOf16), 8)
    }

    pub fn are_all_quarter_finals_played(&self) -> bool {
        Self::all_played(&self.round_matches(Round::QuarterFinals), 4)
    }

    pub fn are_all_semi_finals_played(&self) -> bool {
        Self::all_played(&self.round_matches(Round::SemiFinals), 2)
    }

    pub fn is_third_place_played(&self) -> bool {
        self.third_place.as_ref().is_some_and(KnockoutMatch::is_played)
    }

    pub fn is_final_played(&self) -> bool {
        self.final_match.as_ref().is_some_and(KnockoutMatch::is_played)
    }

    pub fn round_status(&self, round: Round) -> RoundStatus {
        let matches = self.round_matches(round);
        if matches.is_empty() {
            RoundStatus::Pending
        } else if matches.len() == MatchSlot::for_round(round).len() && matches.iter().all(|m| m.is_played()) {
            RoundStatus::Complete
        } else {
            RoundStatus::InProgress
        }
    }

    // ========================================================================
    // Advancement
    // ========================================================================

    /// Create the quarter-finals once all eight round-of-16 matches are played.
    ///
    /// Each half's winners pair as (w0, w1) and (w2, w3). Returns whether the
    /// round was created by this call.
    pub fn check_and_advance_quarter_finals(&mut self) -> bool {
        if !self.are_all_round_of_16_played() || self.round_status(Round::QuarterFinals) != RoundStatus::Pending {
            return false;
        }
        for half in Half::BOTH {
            let winners = winners_of(&self.half(half).round_of_16);
            self.half_mut(half).quarter_finals = pair_up(&winners, Round::QuarterFinals);
        }
        info!("quarter-finals drawn");
        true
    }

    /// Create one semi-final per half once all four quarter-finals are played.
    pub fn check_and_advance_semi_finals(&mut self) -> bool {
        if !self.are_all_quarter_finals_played() || self.round_status(Round::SemiFinals) != RoundStatus::Pending {
            return false;
        }
        for half in Half::BOTH {
            let winners = winners_of(&self.half(half).quarter_finals);
            self.half_mut(half).semi_final = pair_up(&winners, Round::SemiFinals).into_iter().next();
        }
        info!("semi-finals drawn");
        true
    }

    /// Create the final (semi winners) and third-place match (semi losers)
    /// together once both semi-finals are played.
    pub fn check_and_advance_finals(&mut self) -> bool {
        if !self.are_all_semi_finals_played() || self.final_match.is_some() || self.third_place.is_some() {
            return false;
        }
        let (Some(left), Some(right)) = (&self.left.semi_final, &self.right.semi_final) else {
            return false;
        };
        let (Some(left_winner), Some(right_winner)) = (left.winner(), right.winner()) else {
            return false;
        };
        let (Some(left_loser), Some(right_loser)) = (left.loser(), right.loser()) else {
            return false;
        };

        let final_match = KnockoutMatch::new(Round::Final, left_winner, right_winner);
        let third_place = KnockoutMatch::new(Round::ThirdPlace, left_loser, right_loser);
        self.final_match = Some(final_match);
        self.third_place = Some(third_place);
        info!("final and third-place match set");
        true
    }

    /// Run every transition whose prerequisite holds. Returns the rounds created.
    pub fn check_and_advance(&mut self) -> Vec<Round> {
        let mut created = Vec::new();
        if self.check_and_advance_quarter_finals() {
            created.push(Round::QuarterFinals);
        }
        if self.check_and_advance_semi_finals() {
            created.push(Round::SemiFinals);
        }
        if self.check_and_advance_finals() {
            created.push(Round::ThirdPlace);
            created.push(Round::Final);
        }
        created
    }

    // ========================================================================
    // Results
    // ========================================================================

    pub fn is_complete(&self) -> bool {
        self.is_final_played() && self.is_third_place_played()
    }

    pub fn champion(&self) -> Option<&str> {
        self.final_match.as_ref().and_then(KnockoutMatch::winner)
    }

    pub fn runner_up(&self) -> Option<&str> {
        self.final_match.as_ref().and_then(KnockoutMatch::loser)
    }

    pub fn third_place_winner(&self) -> Option<&str> {
        self.third_place.as_ref().and_then(KnockoutMatch::winner)
    }

    pub fn fourth_place(&self) -> Option<&str> {
        self.third_place.as_ref().and_then(KnockoutMatch::loser)
    }

    /// The four semi-finalists, left half first.
    pub fn semifinalists(&self) -> Vec<&str> {
        [&self.left, &self.right]
            .into_iter()
            .filter_map(|half| half.semi_final.as_ref())
            .flat_map(|m| [m.team_a.as_str(), m.team_b.as_str()])
            .collect()
    }

    pub fn match_count(&self) -> usize {
        self.left.matches().count()
            + self.right.matches().count()
            + usize::from(self.third_place.is_some())
            + usize::from(self.final_match.is_some())
    }
}

fn winners_of(matches: &[KnockoutMatch]) -> Vec<String> {
    matches.iter().filter_map(|m| m.winner().map(str::to_string)).collect()
}

fn pair_up(teams: &[String], round: Round) -> Vec<KnockoutMatch> {
    teams.chunks_exact(2).map(|pair| KnockoutMatch::new(round, pair[0].clone(), pair[1].clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Qualifier;
    use crate::models::{GroupId, KnockoutOutcome, KnockoutResult, Shootout};

    fn qualifiers() -> Vec<Qualifier> {
        GroupId::all()
            .flat_map(|g| {
                (1..=2).map(move |p| Qualifier { team: format!("{g}{p}"), group: g, position: p })
            })
            .collect()
    }

    /// Team A wins every match 1-0.
    fn play(bracket: &mut Bracket, slot: MatchSlot) {
        let m = bracket.get_mut(slot).unwrap();
        m.result = KnockoutResult::Played(KnockoutOutcome::regulation(1, 0).unwrap());
    }

    fn play_round(bracket: &mut Bracket, round: Round) {
        for slot in MatchSlot::for_round(round) {
            play(bracket, slot);
        }
    }

    #[test]
    fn test_quarter_finals_wait_for_every_round_of_16_match() {
        let mut bracket = draw_round_of_16(&qualifiers()).unwrap();
        for index in 0..3 {
            play(&mut bracket, MatchSlot::RoundOf16 { half: Half::Left, index });
        }
        assert!(bracket.check_and_advance().is_empty());
        assert!(bracket.left.quarter_finals.is_empty());
        assert!(bracket.right.quarter_finals.is_empty());
        assert_eq!(bracket.round_status(Round::RoundOf16), RoundStatus::InProgress);
        assert_eq!(bracket.round_status(Round::QuarterFinals), RoundStatus::Pending);

        play(&mut bracket, MatchSlot::RoundOf16 { half: Half::Left, index: 3 });
        assert!(!bracket.check_and_advance_quarter_finals());

        for index in 0..4 {
            play(&mut bracket, MatchSlot::RoundOf16 { half: Half::Right, index });
        }
        assert_eq!(bracket.check_and_advance(), vec![Round::QuarterFinals]);
        assert_eq!(bracket.left.quarter_finals.len(), 2);
        assert_eq!(bracket.right.quarter_finals.len(), 2);

        // winners pair (w0, w1), (w2, w3) in match order
        let qf = &bracket.left.quarter_finals[0];
        assert_eq!((qf.team_a.as_str(), qf.team_b.as_str()), ("A1", "C1"));
        let qf = &bracket.left.quarter_finals[1];
        assert_eq!((qf.team_a.as_str(), qf.team_b.as_str()), ("E1", "G1"));

        // advancing twice changes nothing
        let snapshot = bracket.clone();
        assert!(bracket.check_and_advance().is_empty());
        assert_eq!(bracket, snapshot);
    }

    #[test]
    fn test_full_progression_to_final() {
        let mut bracket = draw_round_of_16(&qualifiers()).unwrap();
        play_round(&mut bracket, Round::RoundOf16);
        bracket.check_and_advance();
        play_round(&mut bracket, Round::QuarterFinals);
        assert_eq!(bracket.check_and_advance(), vec![Round::SemiFinals]);

        let semi = bracket.left.semi_final.as_ref().unwrap();
        assert_eq!((semi.team_a.as_str(), semi.team_b.as_str()), ("A1", "E1"));

        play_round(&mut bracket, Round::SemiFinals);
        assert_eq!(bracket.check_and_advance(), vec![Round::ThirdPlace, Round::Final]);

        let final_match = bracket.final_match.as_ref().unwrap();
        assert_eq!((final_match.team_a.as_str(), final_match.team_b.as_str()), ("A1", "B1"));
        let third = bracket.third_place.as_ref().unwrap();
        assert_eq!((third.team_a.as_str(), third.team_b.as_str()), ("E1", "F1"));
        assert_eq!(bracket.semifinalists(), vec!["A1", "E1", "B1", "F1"]);

        play(&mut bracket, MatchSlot::ThirdPlace);
        let outcome = KnockoutOutcome::after_shootout(2, Shootout::new(3, 5).unwrap());
        bracket.final_match.as_mut().unwrap().result = KnockoutResult::Played(outcome);

        assert!(bracket.is_complete());
        assert_eq!(bracket.champion(), Some("B1"));
        assert_eq!(bracket.runner_up(), Some("A1"));
        assert_eq!(bracket.third_place_winner(), Some("E1"));
        assert_eq!(bracket.fourth_place(), Some("F1"));
        assert_eq!(bracket.match_count(), 16);
        assert_eq!(bracket.all_matches().len(), 16);
    }
}
