use serde::{Deserialize, Serialize};

use crate::bracket::Bracket;
use crate::group::Group;
use crate::models::{GroupId, Round, Side, TeamStanding};

/// One of the champion's knockout matches, from the champion's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyStep {
    pub round: Round,
    pub opponent: String,
    pub goals_for: u8,
    pub goals_against: u8,
    /// `(for, against)` when decided on penalties
    pub shootout: Option<(u8, u8)>,
}

impl JourneyStep {
    pub fn won_on_penalties(&self) -> bool {
        self.shootout.is_some()
    }

    /// e.g. `2-1` or `1-1 (4-3 pens)`
    pub fn score(&self) -> String {
        match self.shootout {
            Some((f, a)) => format!("{}-{} ({f}-{a} pens)", self.goals_for, self.goals_against),
            None => format!("{}-{}", self.goals_for, self.goals_against),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionJourney {
    pub champion: String,
    pub group: Option<GroupId>,
    pub group_record: Option<TeamStanding>,
    /// Round of 16 through the final
    pub steps: Vec<JourneyStep>,
    pub goals_for: u32,
    pub goals_against: u32,
    pub penalty_wins: u32,
}

/// The champion's path, once the final has been played.
pub fn champion_journey(groups: &[Group], bracket: &Bracket) -> Option<ChampionJourney> {
    let champion = bracket.champion()?.to_string();

    let mut steps: Vec<JourneyStep> = bracket
        .all_matches()
        .into_iter()
        .filter_map(|m| {
            let side = m.side_of(&champion)?;
            let outcome = m.outcome()?;
            let (goals_for, goals_against, shootout) = match side {
                Side::A => (outcome.score_a, outcome.score_b, outcome.shootout.map(|s| (s.score_a, s.score_b))),
                Side::B => (outcome.score_b, outcome.score_a, outcome.shootout.map(|s| (s.score_b, s.score_a))),
            };
            Some(JourneyStep {
                round: m.round,
                opponent: m.team(side.other()).to_string(),
                goals_for,
                goals_against,
                shootout,
            })
        })
        .collect();
    steps.sort_by_key(|s| s.round);

    let group = groups.iter().find(|g| g.teams.iter().any(|t| *t == champion));

    Some(ChampionJourney {
        group: group.map(|g| g.id),
        group_record: group.and_then(|g| g.standing(&champion)).cloned(),
        goals_for: steps.iter().map(|s| u32::from(s.goals_for)).sum(),
        goals_against: steps.iter().map(|s| u32::from(s.goals_against)).sum(),
        penalty_wins: steps.iter().filter(|s| s.won_on_penalties()).count() as u32,
        steps,
        champion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KnockoutMatch, KnockoutOutcome, KnockoutResult, Shootout};

    fn played(round: Round, a: &str, b: &str, outcome: KnockoutOutcome) -> KnockoutMatch {
        let mut m = KnockoutMatch::new(round, a, b);
        m.result = KnockoutResult::Played(outcome);
        m
    }

    #[test]
    fn test_no_journey_before_final() {
        assert!(champion_journey(&[], &Bracket::default()).is_none());
    }

    #[test]
    fn test_journey_from_champion_side() {
        let mut bracket = Bracket::default();
        bracket.right.round_of_16 =
            vec![played(Round::RoundOf16, "Argentina", "Australia", KnockoutOutcome::regulation(2, 1).unwrap())];
        bracket.right.quarter_finals = vec![played(
            Round::QuarterFinals,
            "Netherlands",
            "Argentina",
            KnockoutOutcome::after_shootout(2, Shootout::new(3, 4).unwrap()),
        )];
        bracket.right.semi_final =
            Some(played(Round::SemiFinals, "Argentina", "Croatia", KnockoutOutcome::regulation(3, 0).unwrap()));
        bracket.final_match = Some(played(
            Round::Final,
            "France",
            "Argentina",
            KnockoutOutcome::after_shootout(3, Shootout::new(2, 4).unwrap()),
        ));

        let journey = champion_journey(&[], &bracket).unwrap();
        assert_eq!(journey.champion, "Argentina");
        let rounds: Vec<Round> = journey.steps.iter().map(|s| s.round).collect();
        assert_eq!(rounds, vec![Round::RoundOf16, Round::QuarterFinals, Round::SemiFinals, Round::Final]);

        let qf = &journey.steps[1];
        assert_eq!(qf.opponent, "Netherlands");
        assert_eq!(qf.shootout, Some((4, 3)));
        assert_eq!(qf.score(), "2-2 (4-3 pens)");

        assert_eq!(journey.goals_for, 2 + 2 + 3 + 3);
        assert_eq!(journey.goals_against, 1 + 2 + 0 + 3);
        assert_eq!(journey.penalty_wins, 2);
        assert!(journey.group.is_none());
    }
}
