use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of groups in the group stage (A..H).
pub const GROUP_COUNT: usize = 8;

// ============================================================================
// GroupId
// ============================================================================

/// Group index 0..8, displayed and serialized as its letter `A`..`H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub struct GroupId(u8);

impl GroupId {
    pub fn new(index: usize) -> Option<Self> {
        (index < GROUP_COUNT).then_some(Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    pub fn all() -> impl Iterator<Item = GroupId> {
        (0..GROUP_COUNT as u8).map(GroupId)
    }
}

impl From<GroupId> for char {
    fn from(id: GroupId) -> Self {
        id.letter()
    }
}

impl TryFrom<char> for GroupId {
    type Error = String;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            GroupId::new((upper as u8 - b'A') as usize)
                .ok_or_else(|| format!("group letter out of range: {letter}"))
        } else {
            Err(format!("not a group letter: {letter}"))
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// ============================================================================
// Round
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "group")]
    Group,
    #[serde(rename = "round-of-16")]
    RoundOf16,
    #[serde(rename = "quarter-finals")]
    QuarterFinals,
    #[serde(rename = "semi-finals")]
    SemiFinals,
    #[serde(rename = "third-place")]
    ThirdPlace,
    #[serde(rename = "final")]
    Final,
}

impl Round {
    pub const KNOCKOUT: [Round; 5] =
        [Round::RoundOf16, Round::QuarterFinals, Round::SemiFinals, Round::ThirdPlace, Round::Final];

    /// Goal-expectation multiplier used by the advanced simulation mode.
    pub fn importance(self) -> f64 {
        match self {
            Round::Final => 1.2,
            Round::SemiFinals => 1.15,
            Round::QuarterFinals => 1.1,
            Round::RoundOf16 => 1.05,
            Round::Group | Round::ThirdPlace => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Round::Group => "Group Stage",
            Round::RoundOf16 => "Round of 16",
            Round::QuarterFinals => "Quarter-Finals",
            Round::SemiFinals => "Semi-Finals",
            Round::ThirdPlace => "Third Place",
            Round::Final => "Final",
        }
    }

    pub fn is_knockout(self) -> bool {
        self != Round::Group
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Side / Half / MatchSlot
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// One of the two bracket halves that only meet in the final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Left,
    Right,
}

impl Half {
    pub const BOTH: [Half; 2] = [Half::Left, Half::Right];
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Half::Left => f.write_str("left"),
            Half::Right => f.write_str("right"),
        }
    }
}

/// Address of a single knockout match inside the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum MatchSlot {
    RoundOf16 { half: Half, index: usize },
    QuarterFinal { half: Half, index: usize },
    SemiFinal { half: Half },
    ThirdPlace,
    Final,
}

impl MatchSlot {
    pub fn round(self) -> Round {
        match self {
            MatchSlot::RoundOf16 { .. } => Round::RoundOf16,
            MatchSlot::QuarterFinal { .. } => Round::QuarterFinals,
            MatchSlot::SemiFinal { .. } => Round::SemiFinals,
            MatchSlot::ThirdPlace => Round::ThirdPlace,
            MatchSlot::Final => Round::Final,
        }
    }

    /// Every slot belonging to `round`, left half first.
    pub fn for_round(round: Round) -> Vec<MatchSlot> {
        match round {
            Round::Group => Vec::new(),
            Round::RoundOf16 => Half::BOTH
                .iter()
                .flat_map(|&half| (0..4).map(move |index| MatchSlot::RoundOf16 { half, index }))
                .collect(),
            Round::QuarterFinals => Half::BOTH
                .iter()
                .flat_map(|&half| (0..2).map(move |index| MatchSlot::QuarterFinal { half, index }))
                .collect(),
            Round::SemiFinals => Half::BOTH.iter().map(|&half| MatchSlot::SemiFinal { half }).collect(),
            Round::ThirdPlace => vec![MatchSlot::ThirdPlace],
            Round::Final => vec![MatchSlot::Final],
        }
    }
}

impl fmt::Display for MatchSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchSlot::RoundOf16 { half, index } => write!(f, "round-of-16 {half} #{}", index + 1),
            MatchSlot::QuarterFinal { half, index } => {
                write!(f, "quarter-final {half} #{}", index + 1)
            }
            MatchSlot::SemiFinal { half } => write!(f, "semi-final {half}"),
            MatchSlot::ThirdPlace => f.write_str("third-place"),
            MatchSlot::Final => f.write_str("final"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_id_letters() {
        let letters: String = GroupId::all().map(GroupId::letter).collect();
        assert_eq!(letters, "ABCDEFGH");
        assert_eq!(GroupId::try_from('c').unwrap().index(), 2);
        assert!(GroupId::try_from('I').is_err());
        assert!(GroupId::new(8).is_none());
    }

    #[test]
    fn test_group_id_serializes_as_letter() {
        let id = GroupId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"H\"");
        let back: GroupId = serde_json::from_str("\"H\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_round_importance_and_names() {
        assert_eq!(Round::Final.importance(), 1.2);
        assert_eq!(Round::ThirdPlace.importance(), 1.0);
        assert_eq!(serde_json::to_string(&Round::RoundOf16).unwrap(), "\"round-of-16\"");
        assert!(Round::RoundOf16 < Round::Final);
    }

    #[test]
    fn test_slots_per_round() {
        assert_eq!(MatchSlot::for_round(Round::RoundOf16).len(), 8);
        assert_eq!(MatchSlot::for_round(Round::QuarterFinals).len(), 4);
        assert_eq!(MatchSlot::for_round(Round::SemiFinals).len(), 2);
        assert_eq!(MatchSlot::for_round(Round::Final), vec![MatchSlot::Final]);
        assert!(MatchSlot::for_round(Round::Group).is_empty());
    }
}
