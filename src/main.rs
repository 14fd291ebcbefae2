use scorebook::mcp_interface::{display_box_score, display_scorecard};
use scorebook::{MemoryStore, Scorebook, ScorebookConfig, Store, TeamSide};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "usage: scorebook <team.json> [config.ron]";

fn run(team_path: &Path, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => ScorebookConfig::load(path)?,
        None => ScorebookConfig::default(),
    };

    let content = std::fs::read_to_string(team_path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    // Route the file through the store so it is normalized like any saved team.
    let mut store = MemoryStore::new();
    store.save(TeamSide::Away.store_key(), &value)?;
    let book = Scorebook::open(store, config, TeamSide::Away)?;

    println!("{}", display_scorecard(&book));
    println!("{}", display_box_score(&book));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(team_path) = args.first().map(PathBuf::from) else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };
    let config_path = args.get(1).map(PathBuf::from);

    match run(&team_path, config_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error reading {}: {}", team_path.display(), e);
            ExitCode::FAILURE
        }
    }
}
