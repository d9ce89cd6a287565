//! Ranked benchmarking: one bot plays a batch of matches against each opponent bot,
//! with both sides deciding their assignments round by round.

pub mod export_csv;
pub mod rating;

use std::fmt;
use std::path::PathBuf;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::bots::{BotError, BotKind, Player};
use crate::combat::narration::round_banner;
use crate::combat::round::play_round;
use crate::combat::series::score_lines;
use crate::combat::{CombatError, MatchConfig, MatchPhase, MatchState, Rng, RngSource, DEFAULT_SEED};
use crate::data::{build_team, AssignmentStore, DirectoryStore, StoreError};
use crate::parallel::WorkerPool;

pub use export_csv::write_reports_csv;
pub use rating::{RankingContext, RatingRule, UnchangedRating, DEFAULT_STARTING_RATING};

/// Prefix given to the opponent in a mirror pairing so both sides keep their own rating.
pub const MIRROR_PREFIX: &str = "opponent__";

#[derive(Debug, Error)]
pub enum RankedError {
    #[error(transparent)]
    Bot(#[from] BotError),
    #[error(transparent)]
    Combat(#[from] CombatError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("match {index} against {opponent} failed: {source}")]
    Match {
        index: usize,
        opponent: String,
        #[source]
        source: Box<RankedError>,
    },
}

#[derive(Debug, Clone)]
pub struct RankedConfig {
    /// Matches per opponent.
    pub matches: usize,
    /// Base seed; match `i` (1-based) uses `seed + i`.
    pub seed: u64,
    /// Holds `match_<i>/your_assignments` and `match_<i>/opponent_assignments`.
    pub sample_dir: PathBuf,
    pub match_config: MatchConfig,
    pub pool: WorkerPool,
}

impl Default for RankedConfig {
    fn default() -> Self {
        Self {
            matches: 25,
            seed: DEFAULT_SEED,
            sample_dir: PathBuf::from("./samples"),
            match_config: MatchConfig::default(),
            pool: WorkerPool::default(),
        }
    }
}

impl RankedConfig {
    pub fn match_dirs(&self, index: usize) -> (PathBuf, PathBuf) {
        let root = self.sample_dir.join(format!("match_{index}"));
        (root.join("your_assignments"), root.join("opponent_assignments"))
    }
}

/// Result of one bot-vs-bot match.
#[derive(Debug, Clone)]
pub struct BotMatchOutcome {
    pub won: bool,
    pub your_wins: u32,
    pub opponent_wins: u32,
    pub rounds_played: u32,
    pub narration: Vec<String>,
}

/// Plays one match where both players choose assignments as the match unfolds.
///
/// Each round both players build and persist an assignment, the round is resolved from the
/// persisted copies, and each player then sees both teams' post-round snapshots.
pub fn play_bot_match<A, B, R>(
    you: &mut Player<A>,
    opponent: &mut Player<B>,
    config: MatchConfig,
    rng: &mut R,
) -> Result<BotMatchOutcome, RankedError>
where
    A: AssignmentStore,
    B: AssignmentStore,
    R: RngSource + ?Sized,
{
    you.initialize()?;
    opponent.initialize()?;

    let mut state = MatchState::new(config, rng.bernoulli(50.0));
    let mut narration = Vec::new();

    while let MatchPhase::Round {
        round,
        your_turn_first,
    } = state.phase()
    {
        let your_assignment = you.make_assignment()?;
        let your_round = you.write_assignment(&your_assignment)?;
        let opponent_assignment = opponent.make_assignment()?;
        let opponent_round = opponent.write_assignment(&opponent_assignment)?;

        let your_team = build_team(&you.store().read_round(your_round)?)?;
        let opponent_team = build_team(&opponent.store().read_round(opponent_round)?)?;

        narration.push(round_banner(round));
        let outcome = play_round(your_team, opponent_team, your_turn_first, rng)?;
        narration.extend(outcome.narration.iter().map(|line| format!("\t{line}")));

        you.process_previous_round_stats(outcome.won, &outcome.your_team, &outcome.opponent_team);
        opponent.process_previous_round_stats(
            !outcome.won,
            &outcome.opponent_team,
            &outcome.your_team,
        );

        state.record_round(outcome.won);
        narration.extend(score_lines(&state, outcome.won));
        debug!(
            you = you.name(),
            opponent = opponent.name(),
            round,
            won = outcome.won,
            "round resolved"
        );
    }

    let (your_wins, opponent_wins) = state.score();
    Ok(BotMatchOutcome {
        won: your_wins > opponent_wins,
        your_wins,
        opponent_wins,
        rounds_played: state.rounds_played(),
        narration,
    })
}

/// Per-opponent summary of a ranked run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PairingReport {
    pub bot: String,
    pub opponent: String,
    pub matches: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub starting_rating: i32,
    pub final_rating: i32,
}

impl fmt::Display for PairingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delta = self.final_rating - self.starting_rating;
        let sign = if delta >= 0 { '+' } else { '-' };
        write!(
            f,
            "{} won {:.1}% ({}/{}) of the matches against {}, ending with {}({}{}) rating.",
            self.bot,
            self.win_rate * 100.0,
            self.wins,
            self.matches,
            self.opponent,
            self.final_rating,
            sign,
            delta.abs()
        )
    }
}

fn play_sample_match(
    your_bot: BotKind,
    opponent_bot: BotKind,
    index: usize,
    config: &RankedConfig,
) -> Result<bool, RankedError> {
    let (your_dir, opponent_dir) = config.match_dirs(index);
    let mut you = Player::new(your_bot.build(), DirectoryStore::new(your_dir))
        .with_round_limit(config.match_config.rounds);
    let mut opponent = Player::new(opponent_bot.build(), DirectoryStore::new(opponent_dir))
        .with_round_limit(config.match_config.rounds);
    let mut rng = Rng::new(config.seed.wrapping_add(index as u64));
    let outcome = play_bot_match(&mut you, &mut opponent, config.match_config, &mut rng)?;
    Ok(outcome.won)
}

/// Benchmarks `your_bot` against every bot in `opponents`.
///
/// Matches of one pairing run on `config.pool`; ratings are then updated through `rule`
/// in match order, so the result does not depend on the worker count.
pub fn play_ranked(
    your_bot: BotKind,
    opponents: &[BotKind],
    config: &RankedConfig,
    context: &mut RankingContext,
    rule: &dyn RatingRule,
) -> Result<Vec<PairingReport>, RankedError> {
    let your_name = your_bot.name();
    let mut reports = Vec::with_capacity(opponents.len());

    for &opponent_bot in opponents {
        let opponent_key = if opponent_bot == your_bot {
            let key = format!("{MIRROR_PREFIX}{}", opponent_bot.name());
            let mirrored = context.rating(your_name);
            context.set_rating(&key, mirrored);
            key
        } else {
            opponent_bot.name().to_string()
        };
        let starting_rating = context.rating(your_name);

        let results: Vec<Result<bool, RankedError>> = config.pool.install(|| {
            (1..config.matches + 1)
                .into_par_iter()
                .map(|index| play_sample_match(your_bot, opponent_bot, index, config))
                .collect()
        });

        let mut wins = 0;
        for (offset, result) in results.into_iter().enumerate() {
            let won = result.map_err(|source| RankedError::Match {
                index: offset + 1,
                opponent: opponent_bot.name().to_string(),
                source: Box::new(source),
            })?;
            if won {
                wins += 1;
            }
            context.record_match(rule, your_name, &opponent_key, won);
        }

        let report = PairingReport {
            bot: your_name.to_string(),
            opponent: opponent_bot.name().to_string(),
            matches: config.matches,
            wins,
            win_rate: if config.matches == 0 {
                0.0
            } else {
                wins as f64 / config.matches as f64
            },
            starting_rating,
            final_rating: context.rating(your_name),
        };
        info!(
            bot = %report.bot,
            opponent = %report.opponent,
            wins = report.wins,
            matches = report.matches,
            "pairing finished"
        );
        reports.push(report);
    }

    Ok(reports)
}
