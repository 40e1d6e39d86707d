//! Pot-based group draw

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::info;

use super::Group;
use crate::error::{Result, TournamentError};
use crate::models::{GroupId, Team, GROUP_COUNT};

pub const TEAM_COUNT: usize = 32;
pub const GROUP_SIZE: usize = 4;
pub const POT_COUNT: usize = 4;

/// Draw 8 groups of 4 from 32 teams.
///
/// Teams are ranked by rating (descending, input order on ties) and cut into
/// four pots of eight. Each pot is shuffled independently and group `i` takes
/// position `i` of every pot, so each group holds one team per strength tier.
/// Nothing is built unless the input is valid.
pub fn seed_groups<R: Rng + ?Sized>(teams: &[Team], rng: &mut R) -> Result<Vec<Group>> {
    if teams.len() != TEAM_COUNT {
        return Err(TournamentError::InvalidTeamCount { expected: TEAM_COUNT, found: teams.len() });
    }

    let mut seen = HashSet::with_capacity(TEAM_COUNT);
    for team in teams {
        if !seen.insert(team.name.as_str()) {
            return Err(TournamentError::DuplicateTeam(team.name.clone()));
        }
    }

    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by(|a, b| b.rating.cmp(&a.rating));

    let pots: Vec<Vec<&Team>> = ranked
        .chunks(GROUP_COUNT)
        .map(|chunk| {
            let mut pot = chunk.to_vec();
            pot.shuffle(&mut *rng);
            pot
        })
        .collect();

    let groups: Vec<Group> = GroupId::all()
        .map(|id| {
            let members = pots.iter().map(|pot| pot[id.index()].name.clone()).collect();
            Group::new(id, members)
        })
        .collect();

    info!(groups = groups.len(), "group draw complete");
    Ok(groups)
}
