//! 임베딩된 팀 데이터
//!
//! `include_str!`로 기본 32개 팀 풀을 바이너리에 포함합니다.
//! 첫 호출 시 YAML 파싱, 이후 캐시된 데이터를 반환합니다.

use std::sync::OnceLock;

use crate::models::Team;

/// Default team pool YAML (32 teams, strongest first)
pub const TEAM_POOL_YAML: &str = include_str!("../../data/teams.yaml");

static TEAM_POOL: OnceLock<Vec<Team>> = OnceLock::new();

pub fn team_pool() -> &'static [Team] {
    TEAM_POOL.get_or_init(|| serde_yaml::from_str(TEAM_POOL_YAML).expect("Embedded team pool YAML is corrupted"))
}

/// Owned copy of the pool, ready to start a session with.
pub fn default_teams() -> Vec<Team> {
    team_pool().to_vec()
}

/// Case-insensitive lookup by team name or country code.
pub fn find_team(name: &str) -> Option<&'static Team> {
    team_pool()
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name) || t.country_code.eq_ignore_ascii_case(name))
}
