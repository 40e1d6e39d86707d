use super::fixture::GroupFixture;
use super::knockout::KnockoutMatch;
use super::round::Round;

/// Read-only view shared by group fixtures and knockout matches.
pub trait MatchSummary {
    fn teams(&self) -> (&str, &str);

    /// Regulation score, once played.
    fn goals(&self) -> Option<(u8, u8)>;

    fn round(&self) -> Round;

    fn is_decided(&self) -> bool {
        self.goals().is_some()
    }

    fn total_goals(&self) -> Option<u32> {
        self.goals().map(|(a, b)| u32::from(a) + u32::from(b))
    }

    fn goal_margin(&self) -> Option<u32> {
        self.goals().map(|(a, b)| u32::from(a.abs_diff(b)))
    }

    fn score_summary(&self) -> String {
        let (team_a, team_b) = self.teams();
        match self.goals() {
            Some((a, b)) => format!("{team_a} {a}-{b} {team_b}"),
            None => format!("{team_a} vs {team_b}"),
        }
    }
}

impl MatchSummary for GroupFixture {
    fn teams(&self) -> (&str, &str) {
        (&self.team_a, &self.team_b)
    }

    fn goals(&self) -> Option<(u8, u8)> {
        self.score()
    }

    fn round(&self) -> Round {
        Round::Group
    }
}

impl MatchSummary for KnockoutMatch {
    fn teams(&self) -> (&str, &str) {
        (&self.team_a, &self.team_b)
    }

    fn goals(&self) -> Option<(u8, u8)> {
        self.outcome().map(|o| (o.score_a, o.score_b))
    }

    fn round(&self) -> Round {
        self.round
    }

    fn score_summary(&self) -> String {
        let (a, b) = (&self.team_a, &self.team_b);
        match self.outcome() {
            Some(o) => match o.shootout {
                Some(p) => format!("{a} {}-{} {b} ({}-{} pens)", o.score_a, o.score_b, p.score_a, p.score_b),
                None => format!("{a} {}-{} {b}", o.score_a, o.score_b),
            },
            None => format!("{a} vs {b}"),
        }
    }
}

/// Any match of the tournament, borrowed from where it lives.
#[derive(Debug, Clone, Copy)]
pub enum MatchKind<'a> {
    Group(&'a GroupFixture),
    Knockout(&'a KnockoutMatch),
}

impl MatchKind<'_> {
    pub fn went_to_penalties(&self) -> bool {
        match self {
            MatchKind::Group(_) => false,
            MatchKind::Knockout(m) => m.went_to_penalties(),
        }
    }
}

impl MatchSummary for MatchKind<'_> {
    fn teams(&self) -> (&str, &str) {
        match self {
            MatchKind::Group(f) => f.teams(),
            MatchKind::Knockout(m) => m.teams(),
        }
    }

    fn goals(&self) -> Option<(u8, u8)> {
        match self {
            MatchKind::Group(f) => f.goals(),
            MatchKind::Knockout(m) => m.goals(),
        }
    }

    fn round(&self) -> Round {
        match self {
            MatchKind::Group(f) => f.round(),
            MatchKind::Knockout(m) => m.round(),
        }
    }

    fn score_summary(&self) -> String {
        match self {
            MatchKind::Group(f) => f.score_summary(),
            MatchKind::Knockout(m) => m.score_summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixtureResult, KnockoutOutcome, KnockoutResult, Shootout};

    #[test]
    fn test_summary_for_both_kinds() {
        let mut fixture = GroupFixture::new(1, "Japan", "Ghana");
        assert!(!MatchKind::Group(&fixture).is_decided());
        assert_eq!(MatchKind::Group(&fixture).score_summary(), "Japan vs Ghana");

        fixture.result = FixtureResult::Played { score_a: 4, score_b: 1 };
        let kind = MatchKind::Group(&fixture);
        assert_eq!(kind.score_summary(), "Japan 4-1 Ghana");
        assert_eq!(kind.goal_margin(), Some(3));
        assert_eq!(kind.total_goals(), Some(5));

        let mut knockout = KnockoutMatch::new(Round::SemiFinals, "Croatia", "Morocco");
        knockout.result =
            KnockoutResult::Played(KnockoutOutcome::after_shootout(1, Shootout::new(3, 4).unwrap()));
        let kind = MatchKind::Knockout(&knockout);
        assert_eq!(kind.score_summary(), "Croatia 1-1 Morocco (3-4 pens)");
        assert!(kind.went_to_penalties());
        assert_eq!(kind.round(), Round::SemiFinals);
    }
}
