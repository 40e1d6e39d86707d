//! Tournament session
//!
//! One `TournamentSession` owns a whole run: the teams and their ratings, the
//! groups, the qualifiers and the bracket. Every operation is a synchronous
//! method returning the updated state or a [`TournamentError`]; there is no
//! global state. All randomness flows from one `ChaCha8Rng` seeded by the
//! config, so a seed reproduces a run exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::bracket::{draw_round_of_16, Bracket};
use crate::config::TournamentConfig;
use crate::engine::{MatchInput, MatchSimulator, RatingModel, ShootoutDraw, SituationalFactors};
use crate::error::{Result, TournamentError};
use crate::group::{qualify, seed_groups, Group, Qualifier};
use crate::models::{
    GroupFixture, GroupId, KnockoutMatch, KnockoutOutcome, KnockoutResult, MatchSlot, MatchSummary, RatingChange, Round,
    Side, Team,
};
use crate::state::{TournamentPhase, TournamentState};
use crate::stats::{champion_journey, ChampionJourney, TournamentStats};

/// A knockout match with its inputs fixed, ready to be resolved.
#[derive(Debug, Clone, Copy)]
struct PendingMatch {
    slot: MatchSlot,
    input: MatchInput,
    favoured: Side,
    seed: u64,
}

impl PendingMatch {
    fn resolve(&self, simulator: &MatchSimulator) -> (KnockoutOutcome, Option<ShootoutDraw>) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        simulator.simulate_knockout(&self.input, self.favoured, &mut rng)
    }
}

/// Result of a batch round simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: Round,
    pub played: Vec<MatchSlot>,
    /// Matches that could not be simulated; siblings are unaffected
    #[serde(skip)]
    pub failures: Vec<(MatchSlot, TournamentError)>,
    /// Rounds created by the advancement check after the batch
    pub advanced: Vec<Round>,
}

impl RoundReport {
    fn new(round: Round) -> Self {
        Self { round, played: Vec::new(), failures: Vec::new(), advanced: Vec::new() }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct TournamentSession {
    config: TournamentConfig,
    simulator: MatchSimulator,
    rating_model: RatingModel,
    rng: ChaCha8Rng,
    teams: Vec<Team>,
    team_index: HashMap<String, usize>,
    groups: Vec<Group>,
    qualifiers: Vec<Qualifier>,
    bracket: Option<Bracket>,
    rating_history: Vec<RatingChange>,
}

impl TournamentSession {
    pub fn new(config: TournamentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            simulator: MatchSimulator::new(config.mode, config.shootout_max_attempts),
            rating_model: config.rating_model(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            teams: Vec::new(),
            team_index: HashMap::new(),
            groups: Vec::new(),
            qualifiers: Vec::new(),
            bracket: None,
            rating_history: Vec::new(),
        })
    }

    /// Drop all tournament data and reseed; the config is kept.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.teams.clear();
        self.team_index.clear();
        self.groups.clear();
        self.qualifiers.clear();
        self.bracket = None;
        self.rating_history.clear();
        info!(seed = self.config.seed, "session reset");
    }

    // ========================
    // Accessors
    // ========================

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.team_index.get(name).map(|&i| &self.teams[i])
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        self.bracket.as_ref()
    }

    pub fn rating_history(&self) -> &[RatingChange] {
        &self.rating_history
    }

    /// Current rating, or the configured default when the team is unknown.
    pub fn rating_of(&self, name: &str) -> i32 {
        match self.team(name) {
            Some(team) => team.rating,
            None => {
                debug!(team = name, default = self.config.default_rating, "rating lookup missed, using default");
                self.config.default_rating
            }
        }
    }

    pub fn phase(&self) -> TournamentPhase {
        match &self.bracket {
            _ if self.groups.is_empty() => TournamentPhase::Setup,
            None => TournamentPhase::GroupStage,
            Some(bracket) if bracket.is_complete() => TournamentPhase::Complete,
            Some(_) => TournamentPhase::Knockout,
        }
    }

    pub fn is_group_stage_complete(&self) -> bool {
        !self.groups.is_empty() && self.groups.iter().all(Group::is_complete)
    }

    // ========================
    // Group stage
    // ========================

    /// Validate the 32 teams and draw the groups. Nothing changes on error.
    pub fn seed_groups(&mut self, teams: Vec<Team>) -> Result<&[Group]> {
        if !self.groups.is_empty() {
            return Err(TournamentError::AlreadyStarted);
        }
        let (min, max) = (self.config.min_rating, self.config.max_rating);
        if let Some(team) = teams.iter().find(|t| !(min..=max).contains(&t.rating)) {
            return Err(TournamentError::RatingOutOfRange { name: team.name.clone(), rating: team.rating, min, max });
        }

        let groups = seed_groups(&teams, &mut self.rng)?;

        self.team_index = teams.iter().enumerate().map(|(i, t)| (t.name.clone(), i)).collect();
        self.teams = teams;
        self.groups = groups;
        Ok(&self.groups)
    }

    pub fn simulate_fixture(&mut self, group: GroupId, fixture_id: u8) -> Result<&GroupFixture> {
        self.simulate_fixture_with(group, fixture_id, SituationalFactors::default())
    }

    /// Simulate one group fixture, update the table and both ratings.
    pub fn simulate_fixture_with(
        &mut self,
        group: GroupId,
        fixture_id: u8,
        factors: SituationalFactors,
    ) -> Result<&GroupFixture> {
        let group_idx = self.group_index(group)?;
        let fixture = self.groups[group_idx]
            .fixture(fixture_id)
            .ok_or(TournamentError::UnknownFixture { group, fixture_id })?;
        if fixture.is_played() {
            warn!(%group, fixture_id, "fixture already played, ignoring");
            return Err(TournamentError::AlreadyPlayed(format!("group {group} fixture {fixture_id}")));
        }
        let (team_a, team_b) = (fixture.team_a.clone(), fixture.team_b.clone());

        let input =
            MatchInput::new(self.rating_of(&team_a), self.rating_of(&team_b), Round::Group).with_factors(factors);
        let mut rng = ChaCha8Rng::seed_from_u64(self.rng.gen());
        let (score_a, score_b) = self.simulator.simulate_score(&input, &mut rng);

        self.groups[group_idx].record_result(fixture_id, score_a, score_b)?;
        let actual_a = match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.5,
            std::cmp::Ordering::Less => 0.0,
        };
        self.apply_ratings(&team_a, &team_b, actual_a, Round::Group);

        if self.is_group_stage_complete() {
            info!("group stage complete");
        }
        let fixture =
            self.groups[group_idx].fixture(fixture_id).ok_or(TournamentError::UnknownFixture { group, fixture_id })?;
        debug!(%group, fixture_id, result = %fixture.score_summary(), "group fixture played");
        Ok(fixture)
    }

    /// Play every remaining fixture of one group. Returns the fixture ids played.
    pub fn simulate_group(&mut self, group: GroupId) -> Result<Vec<u8>> {
        let ids = self.groups[self.group_index(group)?].unplayed_fixture_ids();
        for &id in &ids {
            self.simulate_fixture(group, id)?;
        }
        Ok(ids)
    }

    /// Play every remaining group fixture, group by group.
    pub fn simulate_group_stage(&mut self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(TournamentError::MissingPrerequisite("groups have not been seeded"));
        }
        let ids: Vec<GroupId> = self.groups.iter().map(|g| g.id).collect();
        for id in ids {
            self.simulate_group(id)?;
        }
        Ok(())
    }

    /// Top two of every group once all fixtures are played.
    pub fn qualify(&mut self) -> Result<&[Qualifier]> {
        if !self.is_group_stage_complete() {
            return Err(TournamentError::MissingPrerequisite("group stage is not complete"));
        }
        self.qualifiers = qualify(&self.groups)?;
        info!(qualifiers = self.qualifiers.len(), "knockout qualifiers decided");
        Ok(&self.qualifiers)
    }

    // ========================
    // Knockout stage
    // ========================

    pub fn draw_round_of_16(&mut self) -> Result<&Bracket> {
        if self.bracket.is_some() {
            return Err(TournamentError::AlreadyDrawn);
        }
        if self.qualifiers.is_empty() {
            self.qualify()?;
        }
        let bracket = draw_round_of_16(&self.qualifiers)?;
        Ok(&*self.bracket.insert(bracket))
    }

    pub fn simulate_knockout_match(&mut self, slot: MatchSlot) -> Result<&KnockoutMatch> {
        self.simulate_knockout_match_with(slot, SituationalFactors::default())
    }

    /// Simulate one knockout match, apply ratings and advance the bracket.
    pub fn simulate_knockout_match_with(
        &mut self,
        slot: MatchSlot,
        factors: SituationalFactors,
    ) -> Result<&KnockoutMatch> {
        let pending = self.prepare_knockout(slot, factors)?;
        let (outcome, draw) = pending.resolve(&self.simulator);
        self.apply_knockout(slot, outcome, draw);
        self.advance_bracket();
        self.bracket.as_ref().and_then(|b| b.get(slot)).ok_or(TournamentError::UnknownMatch(slot))
    }

    /// Simulate every unplayed match of `round`.
    ///
    /// Inputs and seeds are fixed in slot order, the matches are resolved
    /// (in parallel when `parallel_rounds` is set) and results are applied in
    /// slot order after all of them finished. A match that cannot be played is
    /// reported in `failures` without stopping the others.
    pub fn simulate_round(&mut self, round: Round) -> Result<RoundReport> {
        let bracket = self.bracket.as_ref().ok_or(TournamentError::MissingPrerequisite("round of 16 not drawn"))?;
        if round == Round::Group {
            return Err(TournamentError::MissingPrerequisite("group fixtures are played with simulate_group"));
        }
        let slots: Vec<MatchSlot> = MatchSlot::for_round(round)
            .into_iter()
            .filter(|&slot| bracket.get(slot).is_some_and(|m| !m.is_played()))
            .collect();
        if bracket.round_matches(round).is_empty() {
            return Err(TournamentError::MissingPrerequisite("previous round is not complete"));
        }

        let mut report = RoundReport::new(round);
        let mut pending = Vec::with_capacity(slots.len());
        for slot in slots {
            match self.prepare_knockout(slot, SituationalFactors::default()) {
                Ok(p) => pending.push(p),
                Err(err) => report.failures.push((slot, err)),
            }
        }

        let simulator = self.simulator;
        let resolved: Vec<_> = if self.config.parallel_rounds {
            pending.par_iter().map(|p| (p.slot, p.resolve(&simulator))).collect()
        } else {
            pending.iter().map(|p| (p.slot, p.resolve(&simulator))).collect()
        };

        for (slot, (outcome, draw)) in resolved {
            self.apply_knockout(slot, outcome, draw);
            report.played.push(slot);
        }
        report.advanced = self.advance_bracket();
        Ok(report)
    }

    /// Third-place match, then the final.
    pub fn simulate_finals(&mut self) -> Result<()> {
        for slot in [MatchSlot::ThirdPlace, MatchSlot::Final] {
            let played = self.bracket.as_ref().and_then(|b| b.get(slot)).is_some_and(KnockoutMatch::is_played);
            if !played {
                self.simulate_knockout_match(slot)?;
            }
        }
        Ok(())
    }

    pub fn check_and_advance_quarter_finals(&mut self) -> Result<bool> {
        Ok(self.bracket_mut()?.check_and_advance_quarter_finals())
    }

    pub fn check_and_advance_semi_finals(&mut self) -> Result<bool> {
        Ok(self.bracket_mut()?.check_and_advance_semi_finals())
    }

    pub fn check_and_advance_finals(&mut self) -> Result<bool> {
        Ok(self.bracket_mut()?.check_and_advance_finals())
    }

    /// Play whatever is left, from the group stage to the final.
    pub fn run_to_completion(&mut self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(TournamentError::MissingPrerequisite("groups have not been seeded"));
        }
        self.simulate_group_stage()?;
        if self.bracket.is_none() {
            self.qualify()?;
            self.draw_round_of_16()?;
        }
        for round in [Round::RoundOf16, Round::QuarterFinals, Round::SemiFinals] {
            let report = self.simulate_round(round)?;
            if let Some((slot, err)) = report.failures.into_iter().next() {
                warn!(%slot, %err, "round left incomplete");
                return Err(err);
            }
        }
        self.simulate_finals()
    }

    // ========================
    // Results
    // ========================

    pub fn stats(&self) -> TournamentStats {
        TournamentStats::compute(&self.groups, self.bracket.as_ref(), &self.teams, &self.rating_history)
    }

    pub fn champion_journey(&self) -> Option<ChampionJourney> {
        self.bracket.as_ref().and_then(|b| champion_journey(&self.groups, b))
    }

    pub fn snapshot(&self) -> TournamentState {
        let bracket = self.bracket.as_ref();
        TournamentState {
            phase: self.phase(),
            seed: self.config.seed,
            mode: self.config.mode,
            teams: self.teams.clone(),
            groups: self.groups.clone(),
            qualifiers: self.qualifiers.clone(),
            bracket: self.bracket.clone(),
            group_stage_complete: self.is_group_stage_complete(),
            knockout_complete: bracket.is_some_and(Bracket::is_complete),
            champion: bracket.and_then(Bracket::champion).map(str::to_string),
            runner_up: bracket.and_then(Bracket::runner_up).map(str::to_string),
            semifinalists: bracket.map(|b| b.semifinalists().into_iter().map(str::to_string).collect()).unwrap_or_default(),
            rating_history: self.rating_history.clone(),
            stats: self.stats(),
            champion_journey: self.champion_journey(),
        }
    }

    // ========================
    // Internals
    // ========================

    fn group_index(&self, group: GroupId) -> Result<usize> {
        self.groups.iter().position(|g| g.id == group).ok_or(TournamentError::UnknownGroup(group))
    }

    fn bracket_mut(&mut self) -> Result<&mut Bracket> {
        self.bracket.as_mut().ok_or(TournamentError::MissingPrerequisite("round of 16 not drawn"))
    }

    /// Check the match can be played and fix its inputs. Draws the match seed.
    fn prepare_knockout(&mut self, slot: MatchSlot, factors: SituationalFactors) -> Result<PendingMatch> {
        let bracket = self.bracket.as_ref().ok_or(TournamentError::MissingPrerequisite("round of 16 not drawn"))?;
        let m = bracket.get(slot).ok_or(TournamentError::UnknownMatch(slot))?;
        if m.is_played() {
            warn!(%slot, "knockout match already played, ignoring");
            return Err(TournamentError::AlreadyPlayed(slot.to_string()));
        }
        if slot == MatchSlot::Final && !bracket.is_third_place_played() {
            return Err(TournamentError::FinalBeforeThirdPlace);
        }

        let (rating_a, rating_b) = (self.rating_of(&m.team_a), self.rating_of(&m.team_b));
        let favoured = match rating_a.cmp(&rating_b) {
            std::cmp::Ordering::Greater => Side::A,
            std::cmp::Ordering::Less => Side::B,
            std::cmp::Ordering::Equal if m.team_a <= m.team_b => Side::A,
            std::cmp::Ordering::Equal => Side::B,
        };
        let input = MatchInput::new(rating_a, rating_b, slot.round()).with_factors(factors);
        Ok(PendingMatch { slot, input, favoured, seed: self.rng.gen() })
    }

    fn apply_knockout(&mut self, slot: MatchSlot, outcome: KnockoutOutcome, draw: Option<ShootoutDraw>) {
        let Some(m) = self.bracket.as_mut().and_then(|b| b.get_mut(slot)) else {
            return;
        };
        m.result = KnockoutResult::Played(outcome);
        let (team_a, team_b) = (m.team_a.clone(), m.team_b.clone());
        debug!(
            %slot,
            result = %m.score_summary(),
            shootout_attempts = draw.map(|d| d.attempts),
            "knockout match played"
        );

        self.apply_ratings(&team_a, &team_b, outcome.actual_result_a(), slot.round());
        if slot == MatchSlot::Final {
            info!(champion = %self.bracket.as_ref().and_then(Bracket::champion).unwrap_or_default(), "champion crowned");
        }
    }

    fn advance_bracket(&mut self) -> Vec<Round> {
        self.bracket.as_mut().map(Bracket::check_and_advance).unwrap_or_default()
    }

    fn apply_ratings(&mut self, team_a: &str, team_b: &str, actual_a: f64, round: Round) {
        let (before_a, before_b) = (self.rating_of(team_a), self.rating_of(team_b));
        let (after_a, after_b) = self.rating_model.updated_ratings(before_a, before_b, actual_a);

        for (name, before, after) in [(team_a, before_a, after_a), (team_b, before_b, after_b)] {
            let Some(&idx) = self.team_index.get(name) else {
                continue;
            };
            self.teams[idx].rating = after;
            self.rating_history.push(RatingChange { team: name.to_string(), round, before, after });
        }
    }
}
