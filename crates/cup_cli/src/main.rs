//! Tournament CLI
//!
//! 32팀 토너먼트 시뮬레이션 실행 / 내장 팀 목록 출력

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use cup_core::{default_teams, team_pool, SimulationMode};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cup_cli")]
#[command(about = "Simulate a 32-team football tournament", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run a full tournament and print the report
    Simulate {
        /// RNG seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// uniform | weighted | realistic | advanced
        #[arg(long)]
        mode: Option<SimulationMode>,

        /// YAML or JSON config file (falls back to CUP_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// YAML or JSON file with 32 teams (embedded pool when omitted)
        #[arg(long)]
        teams: Option<PathBuf>,

        /// Write the final tournament state as JSON
        #[arg(long)]
        out: Option<PathBuf>,

        /// Simulate knockout rounds on one thread
        #[arg(long, default_value = "false")]
        sequential: bool,
    },

    /// List the embedded team pool
    Teams,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, mode, config, teams, out, sequential } => {
            let mut config = cup_cli::load_config(config.as_deref())?;
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(mode) = mode {
                config = config.with_mode(mode);
            }
            if sequential {
                config.parallel_rounds = false;
            }

            let teams = match &teams {
                Some(path) => cup_cli::load_teams(path)?,
                None => default_teams(),
            };

            println!("⚽ Simulating tournament...");
            println!("   Mode:  {}", config.mode);
            println!("   Seed:  {}", config.seed);
            println!("   Teams: {}", teams.len());

            let state = cup_cli::run_tournament(config, teams)?;
            println!("{}", cup_cli::format_report(&state));

            if let Some(path) = out {
                cup_cli::save_report(&path, &state)?;
                println!("\n📄 Tournament state saved to: {}", path.display());
            }
        }

        Commands::Teams => {
            for (i, team) in team_pool().iter().enumerate() {
                println!("{:>2}. {:<16} {:<4} {}", i + 1, team.name, team.country_code, team.rating);
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("cup_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
