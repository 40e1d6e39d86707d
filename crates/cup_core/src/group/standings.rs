//! Standings order and qualification

use serde::{Deserialize, Serialize};

use super::Group;
use crate::error::{Result, TournamentError};
use crate::models::{GroupId, TeamStanding};

pub const QUALIFIERS_PER_GROUP: usize = 2;

/// Sort by points, then goal difference, then goals for (all descending).
///
/// The sort is stable: teams level on all three keys keep their current order.
pub fn sort_standings(rows: &mut [TeamStanding]) {
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
}

/// A team that reached the knockout stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub team: String,
    pub group: GroupId,
    /// 1 = group winner, 2 = runner-up
    pub position: u8,
}

impl Qualifier {
    pub fn is_group_winner(&self) -> bool {
        self.position == 1
    }
}

/// Top two of every group, in group order: `[A1, A2, B1, B2, ..., H1, H2]`.
pub fn qualify(groups: &[Group]) -> Result<Vec<Qualifier>> {
    let mut qualifiers = Vec::with_capacity(groups.len() * QUALIFIERS_PER_GROUP);
    for group in groups {
        let ranked = group.ranked();
        if ranked.len() < QUALIFIERS_PER_GROUP {
            return Err(TournamentError::InsufficientQualifiers { group: group.id, found: ranked.len() });
        }
        qualifiers.extend(ranked.into_iter().take(QUALIFIERS_PER_GROUP).enumerate().map(|(i, row)| {
            Qualifier { team: row.team, group: group.id, position: i as u8 + 1 }
        }));
    }
    Ok(qualifiers)
}
