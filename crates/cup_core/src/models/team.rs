use serde::{Deserialize, Serialize};

use super::round::Round;

/// Rating used whenever a team's rating cannot be looked up.
pub const DEFAULT_RATING: i32 = 1600;

pub fn default_rating() -> i32 {
    DEFAULT_RATING
}

/// A national team taking part in one tournament run.
///
/// Identity is the `name`, which must be unique within a session. The rating
/// is mutated in place after every simulated match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default)]
    pub country_code: String,
}

impl Team {
    pub fn new(name: impl Into<String>, rating: i32) -> Self {
        let name = name.into();
        Self { country: name.clone(), name, rating, country_code: String::new() }
    }

    pub fn with_country(mut self, country: impl Into<String>, country_code: impl Into<String>) -> Self {
        self.country = country.into();
        self.country_code = country_code.into();
        self
    }
}

/// One applied rating update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub team: String,
    pub round: Round,
    pub before: i32,
    pub after: i32,
}

impl RatingChange {
    pub fn delta(&self) -> i32 {
        self.after - self.before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rating_defaults_to_1600() {
        let team: Team = serde_json::from_str(r#"{"name": "Atlantis"}"#).unwrap();
        assert_eq!(team.rating, DEFAULT_RATING);
        assert_eq!(team.country, "");
    }

    #[test]
    fn test_builder() {
        let team = Team::new("Brazil", 2131).with_country("Brazil", "BR");
        assert_eq!(team.country_code, "BR");
        assert_eq!(team.rating, 2131);
    }
}
