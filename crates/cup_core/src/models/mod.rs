pub mod fixture;
pub mod knockout;
pub mod match_kind;
pub mod round;
pub mod standing;
pub mod team;

pub use fixture::{FixtureResult, GroupFixture};
pub use knockout::{KnockoutMatch, KnockoutOutcome, KnockoutResult, Shootout};
pub use match_kind::{MatchKind, MatchSummary};
pub use round::{GroupId, Half, MatchSlot, Round, Side, GROUP_COUNT};
pub use standing::TeamStanding;
pub use team::{default_rating, RatingChange, Team, DEFAULT_RATING};
