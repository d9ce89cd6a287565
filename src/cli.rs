use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bots::BotKind;
use crate::combat::{play_match, MatchConfig, Rng, DEFAULT_SEED};
use crate::data::store::read_json;
use crate::data::{build_team, validate_assignment, Assignment, DirectoryStore, TeamData};
use crate::parallel::WorkerPool;
use crate::ranked::{play_ranked, write_reports_csv, RankedConfig, RankingContext, UnchangedRating};

const USAGE: &str = "usage: arcana <match|ranked|validate|bots>";

/// Flags that consume the following argument.
const VALUE_FLAGS: [&str; 6] = ["--seed", "--out", "--matches", "--samples", "--workers", "--csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Match,
    Ranked,
    Validate,
    Bots,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("match") => Some(Command::Match),
        Some("ranked") => Some(Command::Ranked),
        Some("validate") => Some(Command::Validate),
        Some("bots") => Some(Command::Bots),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Match) => handle_match(args),
        Some(Command::Ranked) => handle_ranked(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Bots) => handle_bots(),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_match(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let (Some(your_dir), Some(opponent_dir)) = (positional.first(), positional.get(1)) else {
        eprintln!("usage: arcana match <your_dir> <opponent_dir> [--seed N] [--out FILE]");
        return 2;
    };

    let seed = parse_u64_arg(flag_value(args, "--seed"), "seed", env_seed());
    let mut rng = Rng::new(seed);
    let your_store = DirectoryStore::new(your_dir.as_str());
    let opponent_store = DirectoryStore::new(opponent_dir.as_str());

    let outcome = match play_match(&your_store, &opponent_store, MatchConfig::default(), &mut rng) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("match failed: {err}");
            return 1;
        }
    };

    let mut text = outcome.narration.join("\n");
    text.push('\n');
    match flag_value(args, "--out") {
        Some(path) => {
            if let Err(err) = fs::write(path, &text) {
                eprintln!("failed to write narration to '{path}': {err}");
                return 1;
            }
        }
        None => print!("{text}"),
    }
    println!(
        "{} {}-{} after {} round(s)",
        if outcome.won { "won" } else { "lost" },
        outcome.your_wins,
        outcome.opponent_wins,
        outcome.rounds_played
    );
    0
}

fn handle_ranked(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let Some(bot_name) = positional.first() else {
        eprintln!(
            "usage: arcana ranked <bot> [opponent...] [--matches N] [--samples DIR] [--seed N] [--workers N] [--csv FILE]"
        );
        return 2;
    };
    let Some(your_bot) = BotKind::from_name(bot_name) else {
        eprintln!("unknown bot '{bot_name}' (see `arcana bots`)");
        return 2;
    };

    let mut opponents = Vec::new();
    for name in &positional[1..] {
        match BotKind::from_name(name) {
            Some(kind) => opponents.push(kind),
            None => {
                eprintln!("unknown bot '{name}' (see `arcana bots`)");
                return 2;
            }
        }
    }
    if opponents.is_empty() {
        opponents = BotKind::ALL
            .into_iter()
            .filter(|kind| *kind != your_bot)
            .collect();
    }

    let defaults = RankedConfig::default();
    let config = RankedConfig {
        matches: parse_u64_arg(flag_value(args, "--matches"), "matches", defaults.matches as u64)
            as usize,
        seed: parse_u64_arg(flag_value(args, "--seed"), "seed", env_seed()),
        sample_dir: flag_value(args, "--samples")
            .map(PathBuf::from)
            .unwrap_or(defaults.sample_dir),
        match_config: defaults.match_config,
        pool: WorkerPool::with_workers(
            parse_u64_arg(flag_value(args, "--workers"), "workers", env_workers()) as usize,
        ),
    };

    let mut context = RankingContext::default();
    let reports = match play_ranked(your_bot, &opponents, &config, &mut context, &UnchangedRating) {
        Ok(reports) => reports,
        Err(err) => {
            eprintln!("ranked run failed: {err}");
            return 1;
        }
    };
    for report in &reports {
        println!("{report}");
    }

    if let Some(path) = flag_value(args, "--csv") {
        if let Err(err) = write_reports_csv(Path::new(path), &reports) {
            eprintln!("failed to write csv '{path}': {err}");
            return 1;
        }
    }
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let (Some(assignment_path), Some(team_data_path)) = (positional.first(), positional.get(1))
    else {
        eprintln!("usage: arcana validate <assignment.json> <team_data.json>");
        return 2;
    };

    let assignment: Assignment = match read_json(Path::new(assignment_path)) {
        Ok(assignment) => assignment,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };
    let team_data: TeamData = match read_json(Path::new(team_data_path)) {
        Ok(team_data) => team_data,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };

    let report = validate_assignment(&assignment, &team_data);
    if report.has_errors() {
        eprintln!("validation failed: {} issue(s)", report.errors().count());
        for diagnostic in &report.diagnostics {
            eprintln!("- {diagnostic}");
        }
        return 1;
    }
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    println!("validation passed: {assignment_path}");
    match build_team(&assignment) {
        Ok(team) => {
            for (slot, character) in team.iter().enumerate() {
                println!("{}. {character}", slot + 1);
            }
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn handle_bots() -> i32 {
    for kind in BotKind::ALL {
        println!("{}", kind.name());
    }
    0
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
}

/// Arguments after the subcommand that are neither flags nor flag values.
fn positional_args(args: &[String]) -> Vec<&String> {
    let mut positional = Vec::new();
    let mut skip_next = false;
    for arg in args.iter().skip(2) {
        if skip_next {
            skip_next = false;
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            positional.push(arg);
        }
    }
    positional
}

fn env_seed() -> u64 {
    let raw = env::var("ARCANA_SEED").ok();
    parse_u64_arg(raw.as_ref(), "ARCANA_SEED", DEFAULT_SEED)
}

fn env_workers() -> u64 {
    let raw = env::var("ARCANA_WORKERS").ok();
    parse_u64_arg(raw.as_ref(), "ARCANA_WORKERS", 0)
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
