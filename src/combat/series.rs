//! Best-of-N match: rounds are played until one side reaches the win threshold.

use thiserror::Error;
use tracing::info;

use crate::combat::error::CombatError;
use crate::combat::narration::{outcome_label, round_banner, DASHES};
use crate::combat::rng::RngSource;
use crate::combat::round::play_round;
use crate::data::{build_team, AssignmentStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub rounds: u32,
    pub wins_needed: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: 5,
            wins_needed: 3,
        }
    }
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Combat(#[from] CombatError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// The given 1-based round is next; `your_turn_first` says who opens it.
    Round { round: u32, your_turn_first: bool },
    Decided { your_win: bool },
}

/// Score-keeping state machine shared by the file-driven match runner and the ranked
/// orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    config: MatchConfig,
    next_round: u32,
    your_wins: u32,
    opponent_wins: u32,
    your_turn_first: bool,
}

impl MatchState {
    pub fn new(config: MatchConfig, your_turn_first: bool) -> Self {
        Self {
            config,
            next_round: 1,
            your_wins: 0,
            opponent_wins: 0,
            your_turn_first,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        let threshold_reached = self.your_wins >= self.config.wins_needed
            || self.opponent_wins >= self.config.wins_needed;
        if threshold_reached || self.next_round > self.config.rounds {
            MatchPhase::Decided {
                your_win: self.your_wins > self.opponent_wins,
            }
        } else {
            MatchPhase::Round {
                round: self.next_round,
                your_turn_first: self.your_turn_first,
            }
        }
    }

    /// Tallies a finished round and flips the first mover. Ignored once decided.
    pub fn record_round(&mut self, your_win: bool) -> MatchPhase {
        if let decided @ MatchPhase::Decided { .. } = self.phase() {
            return decided;
        }
        if your_win {
            self.your_wins += 1;
        } else {
            self.opponent_wins += 1;
        }
        self.next_round += 1;
        self.your_turn_first = !self.your_turn_first;
        self.phase()
    }

    pub fn score(&self) -> (u32, u32) {
        (self.your_wins, self.opponent_wins)
    }

    pub fn rounds_played(&self) -> u32 {
        self.next_round - 1
    }
}

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub won: bool,
    pub narration: Vec<String>,
    pub your_wins: u32,
    pub opponent_wins: u32,
    pub rounds_played: u32,
}

/// Narration lines appended after a round is tallied.
pub(crate) fn score_lines(state: &MatchState, round_won: bool) -> Vec<String> {
    let (yours, theirs) = state.score();
    let label = outcome_label(round_won);
    let mut lines = vec![format!("\nOutcome: {label}. Series Score: {yours}-{theirs}.")];
    if matches!(state.phase(), MatchPhase::Decided { .. })
        && (yours >= state.config.wins_needed || theirs >= state.config.wins_needed)
    {
        lines.push(format!("\n{DASHES} {label} {yours}-{theirs}. {DASHES}"));
    }
    lines
}

/// Plays a match from assignments already written for every round.
pub fn play_match<R: RngSource + ?Sized>(
    your_assignments: &impl AssignmentStore,
    opponent_assignments: &impl AssignmentStore,
    config: MatchConfig,
    rng: &mut R,
) -> Result<MatchOutcome, MatchError> {
    let mut state = MatchState::new(config, rng.bernoulli(50.0));
    let mut narration = Vec::new();

    while let MatchPhase::Round {
        round,
        your_turn_first,
    } = state.phase()
    {
        narration.push(round_banner(round));
        let your_team = build_team(&your_assignments.read_round(round)?)?;
        let opponent_team = build_team(&opponent_assignments.read_round(round)?)?;

        let outcome = play_round(your_team, opponent_team, your_turn_first, rng)?;
        narration.extend(outcome.narration.iter().map(|line| format!("\t{line}")));

        state.record_round(outcome.won);
        narration.extend(score_lines(&state, outcome.won));
    }

    let (your_wins, opponent_wins) = state.score();
    let won = your_wins > opponent_wins;
    info!(won, your_wins, opponent_wins, "match decided");
    Ok(MatchOutcome {
        won,
        narration,
        your_wins,
        opponent_wins,
        rounds_played: state.rounds_played(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_stops_at_three_wins() {
        let mut state = MatchState::new(MatchConfig::default(), true);
        assert_eq!(
            state.phase(),
            MatchPhase::Round {
                round: 1,
                your_turn_first: true
            }
        );
        assert_eq!(
            state.record_round(true),
            MatchPhase::Round {
                round: 2,
                your_turn_first: false
            }
        );
        state.record_round(true);
        assert_eq!(
            state.record_round(true),
            MatchPhase::Decided { your_win: true }
        );
        assert_eq!(state.rounds_played(), 3);
        assert_eq!(
            state.record_round(false),
            MatchPhase::Decided { your_win: true }
        );
        assert_eq!(state.score(), (3, 0));
    }

    #[test]
    fn five_round_split_goes_to_the_three_win_side() {
        let mut state = MatchState::new(MatchConfig::default(), false);
        for won in [true, false, true, false] {
            assert!(matches!(state.record_round(won), MatchPhase::Round { .. }));
        }
        assert_eq!(
            state.record_round(false),
            MatchPhase::Decided { your_win: false }
        );
        assert_eq!(state.score(), (2, 3));
    }

    #[test]
    fn custom_config_shortens_series() {
        let mut state = MatchState::new(
            MatchConfig {
                rounds: 1,
                wins_needed: 1,
            },
            true,
        );
        assert_eq!(
            state.record_round(false),
            MatchPhase::Decided { your_win: false }
        );
    }
}
