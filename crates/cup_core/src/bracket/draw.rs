//! Fixed cross-group round-of-16 draw

use tracing::info;

use super::{Bracket, BracketHalf};
use crate::error::{Result, TournamentError};
use crate::group::Qualifier;
use crate::models::{KnockoutMatch, Round, GROUP_COUNT};

/// Build the round of 16 from qualifiers ordered `[A1, A2, B1, B2, ..., H1, H2]`.
///
/// Left half: A1-B2, C1-D2, E1-F2, G1-H2. Right half mirrors it: B1-A2,
/// D1-C2, F1-E2, H1-G2. Group-mates can only meet in the final.
pub fn draw_round_of_16(qualifiers: &[Qualifier]) -> Result<Bracket> {
    let expected = GROUP_COUNT * 2;
    if qualifiers.len() != expected {
        return Err(TournamentError::InvalidQualifiers(format!(
            "expected {expected} qualifiers, found {}",
            qualifiers.len()
        )));
    }

    let mut winners = Vec::with_capacity(GROUP_COUNT);
    let mut runners_up = Vec::with_capacity(GROUP_COUNT);
    for (i, pair) in qualifiers.chunks_exact(2).enumerate() {
        let (first, second) = (&pair[0], &pair[1]);
        if first.group != second.group || first.group.index() != i {
            return Err(TournamentError::InvalidQualifiers(format!(
                "qualifiers {} and {} are out of group order",
                first.team, second.team
            )));
        }
        if !first.is_group_winner() || second.position != 2 {
            return Err(TournamentError::InvalidQualifiers(format!(
                "group {} must list its winner before its runner-up",
                first.group
            )));
        }
        winners.push(first.team.as_str());
        runners_up.push(second.team.as_str());
    }

    let half = |offset: usize| BracketHalf {
        round_of_16: (0..GROUP_COUNT / 2)
            .map(|k| {
                let w = 2 * k + offset;
                let r = 2 * k + (1 - offset);
                KnockoutMatch::new(Round::RoundOf16, winners[w], runners_up[r])
            })
            .collect(),
        ..BracketHalf::default()
    };

    let bracket = Bracket { left: half(0), right: half(1), ..Bracket::default() };
    info!("round of 16 drawn");
    Ok(bracket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupId, Half, MatchSlot};

    fn qualifiers() -> Vec<Qualifier> {
        GroupId::all()
            .flat_map(|g| {
                (1..=2).map(move |p| Qualifier { team: format!("{g}{p}"), group: g, position: p })
            })
            .collect()
    }

    fn pairs(bracket: &Bracket, half: Half) -> Vec<(String, String)> {
        bracket.half(half).round_of_16.iter().map(|m| (m.team_a.clone(), m.team_b.clone())).collect()
    }

    #[test]
    fn test_cross_pairing() {
        let bracket = draw_round_of_16(&qualifiers()).unwrap();
        let expect = |v: [(&str, &str); 4]| {
            v.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect::<Vec<_>>()
        };
        assert_eq!(pairs(&bracket, Half::Left), expect([("A1", "B2"), ("C1", "D2"), ("E1", "F2"), ("G1", "H2")]));
        assert_eq!(pairs(&bracket, Half::Right), expect([("B1", "A2"), ("D1", "C2"), ("F1", "E2"), ("H1", "G2")]));
        assert!(bracket.get(MatchSlot::QuarterFinal { half: Half::Left, index: 0 }).is_none());
        assert!(bracket.final_match.is_none());
    }

    #[test]
    fn test_group_mates_in_opposite_halves() {
        let q = qualifiers();
        let bracket = draw_round_of_16(&q).unwrap();
        let group_of = |team: &str| q.iter().find(|x| x.team == team).unwrap().group;
        for half in Half::BOTH {
            let mut groups: Vec<_> = bracket
                .half(half)
                .round_of_16
                .iter()
                .flat_map(|m| [group_of(&m.team_a), group_of(&m.team_b)])
                .collect();
            groups.sort();
            groups.dedup();
            assert_eq!(groups.len(), 8, "each half holds one team from every group");
        }
        for m in bracket.all_matches() {
            assert_ne!(group_of(&m.team_a), group_of(&m.team_b));
        }
    }

    #[test]
    fn test_rejects_wrong_count_and_order() {
        let q = qualifiers();
        assert!(matches!(draw_round_of_16(&q[..14]), Err(TournamentError::InvalidQualifiers(_))));

        let mut swapped = q.clone();
        swapped.swap(0, 1);
        assert!(draw_round_of_16(&swapped).is_err());
    }
}
