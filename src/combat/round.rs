//! One round: the two fronts trade turns until a team runs out of characters.

use tracing::debug;

use crate::combat::character::Character;
use crate::combat::engine::{execute_turn, Side};
use crate::combat::error::CombatError;
use crate::combat::narration::{format_matchup, format_teams};
use crate::combat::rng::RngSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    InProgress,
    Finished { your_win: bool },
}

#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub won: bool,
    pub narration: Vec<String>,
    pub your_team: Vec<Character>,
    pub opponent_team: Vec<Character>,
    pub turns: usize,
}

/// Working state of a round. Owns both teams until it finishes.
#[derive(Debug, Clone)]
pub struct Round {
    your_team: Vec<Character>,
    opponent_team: Vec<Character>,
    your_index: usize,
    opponent_index: usize,
    next_side: Side,
    narration: Vec<String>,
    turns: usize,
}

impl Round {
    pub fn new(
        your_team: Vec<Character>,
        opponent_team: Vec<Character>,
        your_turn_first: bool,
    ) -> Self {
        let narration = vec![format_teams(&your_team, &opponent_team)];
        Self {
            your_team,
            opponent_team,
            your_index: 0,
            opponent_index: 0,
            next_side: if your_turn_first {
                Side::Yours
            } else {
                Side::Opponents
            },
            narration,
            turns: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        if self.your_index < self.your_team.len() && self.opponent_index < self.opponent_team.len()
        {
            RoundPhase::InProgress
        } else {
            // Whoever exhausted fewer slots wins, including when both run out together.
            RoundPhase::Finished {
                your_win: self.your_index < self.opponent_index,
            }
        }
    }

    /// Plays one turn between the current fronts. A finished round is left unchanged.
    pub fn step<R: RngSource + ?Sized>(&mut self, rng: &mut R) -> Result<RoundPhase, CombatError> {
        if let finished @ RoundPhase::Finished { .. } = self.phase() {
            return Ok(finished);
        }

        let yours = &mut self.your_team[self.your_index];
        let theirs = &mut self.opponent_team[self.opponent_index];
        self.narration.push(format_matchup(yours, theirs));

        let outcome = match self.next_side {
            Side::Yours => execute_turn(yours, Side::Yours, theirs, rng)?,
            Side::Opponents => execute_turn(theirs, Side::Opponents, yours, rng)?,
        };
        self.narration.push(format!("\t\t{outcome}"));
        self.turns += 1;

        let mut someone_fell = false;
        if yours.is_defeated() {
            debug!(character = yours.name(), side = "yours", "character defeated");
            self.your_index += 1;
            someone_fell = true;
        }
        if theirs.is_defeated() {
            debug!(character = theirs.name(), side = "opponent", "character defeated");
            self.opponent_index += 1;
            someone_fell = true;
        }

        let phase = self.phase();
        if someone_fell && phase == RoundPhase::InProgress {
            self.narration.push(format_teams(
                &self.your_team[self.your_index..],
                &self.opponent_team[self.opponent_index..],
            ));
        }

        self.next_side = self.next_side.opposite();
        Ok(phase)
    }

    pub fn finish(self) -> RoundOutcome {
        let won = matches!(self.phase(), RoundPhase::Finished { your_win: true });
        RoundOutcome {
            won,
            narration: self.narration,
            your_team: self.your_team,
            opponent_team: self.opponent_team,
            turns: self.turns,
        }
    }
}

/// Runs a round to completion. The exhausted-slot counters never move backwards.
pub fn play_round<R: RngSource + ?Sized>(
    your_team: Vec<Character>,
    opponent_team: Vec<Character>,
    your_turn_first: bool,
    rng: &mut R,
) -> Result<RoundOutcome, CombatError> {
    let mut round = Round::new(your_team, opponent_team, your_turn_first);
    while round.step(rng)? == RoundPhase::InProgress {}
    let outcome = round.finish();
    debug!(won = outcome.won, turns = outcome.turns, "round finished");
    Ok(outcome)
}
