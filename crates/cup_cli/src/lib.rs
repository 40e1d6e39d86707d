//! Tournament CLI Library
//!
//! 팀/설정 파일 로딩 → 토너먼트 실행 → 리포트 출력
//! YAML (기본) 또는 JSON (.json 확장자)

use anyhow::{Context, Result};
use cup_core::{
    ChampionJourney, MatchSummary, Round, TournamentConfig, TournamentSession, TournamentState, Team,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Team file layout: either a bare list or `{ teams: [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamsFile {
    List(Vec<Team>),
    Wrapped { teams: Vec<Team> },
}

impl TeamsFile {
    pub fn into_teams(self) -> Vec<Team> {
        match self {
            TeamsFile::List(teams) | TeamsFile::Wrapped { teams } => teams,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

/// 팀 목록 파일 로드
pub fn load_teams(path: &Path) -> Result<Vec<Team>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read teams file: {}", path.display()))?;

    let file: TeamsFile = if is_json(path) {
        serde_json::from_str(&content).context("Failed to parse teams JSON")?
    } else {
        serde_yaml::from_str(&content).context("Failed to parse teams YAML")?
    };
    Ok(file.into_teams())
}

/// 설정 로드 순서: `--config` 파일 → `CUP_CONFIG_PATH` → 기본값
pub fn load_config(path: Option<&Path>) -> Result<TournamentConfig> {
    if let Some(path) = path {
        return TournamentConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display()));
    }
    let from_env = TournamentConfig::from_env().context("Failed to load config from CUP_CONFIG_PATH")?;
    Ok(from_env.unwrap_or_default())
}

/// 토너먼트 전체 실행 후 스냅샷 반환
pub fn run_tournament(config: TournamentConfig, teams: Vec<Team>) -> Result<TournamentState> {
    let mut session = TournamentSession::new(config).context("Invalid configuration")?;
    session.seed_groups(teams).context("Failed to seed groups")?;
    session.run_to_completion().context("Tournament simulation failed")?;
    Ok(session.snapshot())
}

pub fn save_report(path: &Path, state: &TournamentState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let json = state.to_json_pretty().context("Failed to serialize tournament state")?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

/// Human-readable summary: group tables, knockout results, placings, stats.
pub fn format_report(state: &TournamentState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Mode: {}  Seed: {}", state.mode, state.seed);
    for group in &state.groups {
        let _ = writeln!(out, "\nGroup {}", group.id);
        for (pos, row) in group.ranked().iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {:<16} P{} W{} D{} L{} {:>2}:{:<2} {:>+3}  {} pts",
                pos + 1,
                row.team,
                row.matches_played,
                row.wins,
                row.draws,
                row.losses,
                row.goals_for,
                row.goals_against,
                row.goal_difference,
                row.points
            );
        }
    }

    if let Some(bracket) = &state.bracket {
        for round in Round::KNOCKOUT {
            let matches = bracket.round_matches(round);
            if matches.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{}", round.label());
            for m in matches {
                let _ = writeln!(out, "  {}", m.score_summary());
            }
        }
    }

    let stats = &state.stats;
    let _ = writeln!(out);
    for (label, team) in [
        ("Champion", &stats.champion),
        ("Runner-up", &stats.runner_up),
        ("Third", &stats.third_place),
        ("Fourth", &stats.fourth_place),
    ] {
        if let Some(team) = team {
            let _ = writeln!(out, "{label:<10} {team}");
        }
    }

    let _ = writeln!(
        out,
        "\nGoals: {} in {} matches ({:.2} per match), {} shootouts",
        stats.overall.total_goals,
        stats.overall.total_matches,
        stats.overall.average_goals_per_match,
        stats.penalty_shootouts
    );
    if let Some(win) = &stats.biggest_win {
        let _ = writeln!(out, "Biggest win: {} ({})", win.summary, win.round.label());
    }
    if let Some(gain) = &stats.biggest_rating_gain {
        let _ = writeln!(out, "Biggest rating gain: {} {:+}", gain.team, gain.gain());
    }
    if let Some(journey) = &state.champion_journey {
        out.push_str(&format_journey(journey));
    }
    out
}

fn format_journey(journey: &ChampionJourney) -> String {
    let mut out = format!("\nRoad to the title ({})\n", journey.champion);
    if let (Some(group), Some(row)) = (journey.group, &journey.group_record) {
        out.push_str(&format!("  Group {group}: {} pts, {}:{}\n", row.points, row.goals_for, row.goals_against));
    }
    for step in &journey.steps {
        out.push_str(&format!("  {:<15} vs {:<16} {}\n", step.round.label(), step.opponent, step.score()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cup_core::{default_teams, SimulationMode, TournamentPhase};
    use std::io::Write;
    use tempfile::{tempdir, Builder};

    #[test]
    fn test_load_teams_yaml_list() -> Result<()> {
        let mut file = Builder::new().suffix(".yaml").tempfile()?;
        writeln!(file, "- name: Brazil\n  rating: 2100\n- name: Qatar")?;

        let teams = load_teams(file.path())?;
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].rating, 2100);
        assert_eq!(teams[1].rating, 1600);
        Ok(())
    }

    #[test]
    fn test_load_teams_wrapped_json() -> Result<()> {
        let mut file = Builder::new().suffix(".json").tempfile()?;
        let body = serde_json::json!({ "teams": default_teams() });
        file.write_all(body.to_string().as_bytes())?;

        assert_eq!(load_teams(file.path())?, default_teams());
        Ok(())
    }

    #[test]
    fn test_missing_teams_file_has_context() {
        let err = load_teams(Path::new("/nope/teams.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read teams file"));
    }

    #[test]
    fn test_config_file_overrides_default() -> Result<()> {
        let mut file = Builder::new().suffix(".yaml").tempfile()?;
        writeln!(file, "mode: uniform\nseed: 5")?;

        let config = load_config(Some(file.path()))?;
        assert_eq!(config.mode, SimulationMode::Uniform);
        assert_eq!(config.seed, 5);
        Ok(())
    }

    #[test]
    fn test_run_and_save_report() -> Result<()> {
        let state = run_tournament(TournamentConfig::for_tests(11), default_teams())?;
        assert_eq!(state.phase, TournamentPhase::Complete);

        let report = format_report(&state);
        assert!(report.contains("Group A"));
        assert!(report.contains("Final"));
        assert!(report.contains(state.champion.as_deref().unwrap_or_default()));

        let dir = tempdir()?;
        let path = dir.path().join("out/report.json");
        save_report(&path, &state)?;
        let loaded: TournamentState = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(loaded.champion, state.champion);
        Ok(())
    }

    #[test]
    fn test_wrong_team_count_fails_with_context() {
        let mut teams = default_teams();
        teams.truncate(30);
        let err = run_tournament(TournamentConfig::for_tests(1), teams).unwrap_err();
        assert_eq!(err.to_string(), "Failed to seed groups");
    }
}
