use serde::{Deserialize, Serialize};

/// One row of a group table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: String,
    pub points: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
}

impl TeamStanding {
    pub fn new(team: impl Into<String>) -> Self {
        Self { team: team.into(), ..Self::default() }
    }

    /// Apply one played fixture from this team's point of view.
    pub fn record(&mut self, goals_for: u8, goals_against: u8) {
        self.matches_played += 1;
        self.goals_for += u32::from(goals_for);
        self.goals_against += u32::from(goals_against);
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;

        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => {
                self.wins += 1;
                self.points += 3;
            }
            std::cmp::Ordering::Equal => {
                self.draws += 1;
                self.points += 1;
            }
            std::cmp::Ordering::Less => self.losses += 1,
        }
    }

    /// points = 3W + D, played = W + D + L, GD = GF - GA
    pub fn is_consistent(&self) -> bool {
        self.points == 3 * self.wins + self.draws
            && self.matches_played == self.wins + self.draws + self.losses
            && self.goal_difference == self.goals_for as i32 - self.goals_against as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_win_draw_loss() {
        let mut row = TeamStanding::new("Spain");
        row.record(3, 1);
        row.record(0, 0);
        row.record(1, 2);

        assert_eq!(row.points, 4);
        assert_eq!((row.wins, row.draws, row.losses), (1, 1, 1));
        assert_eq!(row.matches_played, 3);
        assert_eq!(row.goals_for, 4);
        assert_eq!(row.goals_against, 3);
        assert_eq!(row.goal_difference, 1);
        assert!(row.is_consistent());
    }
}
