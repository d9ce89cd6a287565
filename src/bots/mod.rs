//! Bot strategy contract. A `Strategy` decides ordering and item placement; a `Player`
//! wraps it with the per-match lifecycle (roster loading, round counter, persistence).

pub mod head_on;
pub mod maxxer;
pub mod random;
pub mod survivor;

use thiserror::Error;
use tracing::warn;

use crate::combat::{Character, CharacterKind, MAX_ITEMS};
use crate::data::{
    strip_items, validate_assignment, Assignment, AssignmentEntry, AssignmentStore, ItemRecord,
    StoreError, TeamData, ValidationDiagnostic,
};

pub use head_on::HeadOn;
pub use maxxer::Maxxer;
pub use random::{RandomBot, DEFAULT_RANDOM_BOT_SEED};
pub use survivor::Survivor;

/// Rounds a player may write assignments for in one match.
pub const DEFAULT_ROUND_LIMIT: u32 = 5;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("bot used before initialize()")]
    NotInitialized,
    #[error("cannot write round {round}: only {limit} rounds per match")]
    RoundLimit { round: u32, limit: u32 },
    #[error("round {round} assignment rejected: {}", format_diagnostics(.diagnostics))]
    InvalidAssignment {
        round: u32,
        diagnostics: Vec<ValidationDiagnostic>,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn format_diagnostics(diagnostics: &[ValidationDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// What a strategy gets to look at when building an assignment.
#[derive(Debug, Clone)]
pub struct Roster {
    team_data: TeamData,
    previous_ordering: Assignment,
    current_round: u32,
}

impl Roster {
    fn new(team_data: TeamData) -> Self {
        let previous_ordering = strip_items(&team_data.characters);
        Self {
            team_data,
            previous_ordering,
            current_round: 1,
        }
    }

    /// Owned copy of last round's order without items; the usual starting point.
    pub fn previous_character_ordering(&self) -> Assignment {
        self.previous_ordering.clone()
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.team_data.items
    }

    pub fn team_data(&self) -> &TeamData {
        &self.team_data
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }
}

pub trait Strategy {
    fn name(&self) -> &str;

    /// Full reordering of the roster plus item placement for the upcoming round.
    fn make_assignment(&mut self, roster: &Roster) -> Assignment;

    /// Post-round snapshots of both teams, in the order they fought.
    fn process_previous_round_stats(
        &mut self,
        won: bool,
        your_team: &[Character],
        opponent_team: &[Character],
    );
}

/// Gives `entry` as many of `items` as it can hold.
pub(crate) fn give_items(entry: &mut AssignmentEntry, items: &[ItemRecord]) {
    entry.items = items.iter().take(MAX_ITEMS).cloned().collect();
}

/// A strategy bound to one side's assignment store for one match.
pub struct Player<S> {
    strategy: Box<dyn Strategy>,
    store: S,
    roster: Option<Roster>,
    round_limit: u32,
}

impl<S: AssignmentStore> Player<S> {
    pub fn new(strategy: Box<dyn Strategy>, store: S) -> Self {
        Self {
            strategy,
            store,
            roster: None,
            round_limit: DEFAULT_ROUND_LIMIT,
        }
    }

    pub fn with_round_limit(mut self, round_limit: u32) -> Self {
        self.round_limit = round_limit;
        self
    }

    pub fn name(&self) -> &str {
        self.strategy.name()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the blank roster and rewinds to round 1.
    pub fn initialize(&mut self) -> Result<(), BotError> {
        let team_data = self.store.load_team_data()?;
        self.roster = Some(Roster::new(team_data));
        Ok(())
    }

    pub fn current_round(&self) -> Option<u32> {
        self.roster.as_ref().map(Roster::current_round)
    }

    pub fn make_assignment(&mut self) -> Result<Assignment, BotError> {
        let roster = self.roster.as_ref().ok_or(BotError::NotInitialized)?;
        Ok(self.strategy.make_assignment(roster))
    }

    /// Persists `assignment` for the current round and advances the round counter.
    pub fn write_assignment(&mut self, assignment: &Assignment) -> Result<u32, BotError> {
        let roster = self.roster.as_mut().ok_or(BotError::NotInitialized)?;
        let round = roster.current_round;
        if round > self.round_limit {
            return Err(BotError::RoundLimit {
                round,
                limit: self.round_limit,
            });
        }

        let report = validate_assignment(assignment, &roster.team_data);
        if report.has_errors() {
            let diagnostics: Vec<ValidationDiagnostic> = report.errors().cloned().collect();
            warn!(
                bot = self.strategy.name(),
                round,
                errors = diagnostics.len(),
                "assignment rejected"
            );
            return Err(BotError::InvalidAssignment { round, diagnostics });
        }

        self.store.write_round(round, assignment)?;
        roster.previous_ordering = strip_items(assignment);
        roster.current_round += 1;
        Ok(round)
    }

    pub fn process_previous_round_stats(
        &mut self,
        won: bool,
        your_team: &[Character],
        opponent_team: &[Character],
    ) {
        self.strategy
            .process_previous_round_stats(won, your_team, opponent_team);
    }
}

/// Registry of built-in strategies, addressable by name from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotKind {
    Random,
    Maxxer(CharacterKind),
    HeadOn,
    Survivor,
}

impl BotKind {
    pub const ALL: [BotKind; 6] = [
        Self::Random,
        Self::Maxxer(CharacterKind::Warrior),
        Self::Maxxer(CharacterKind::Mage),
        Self::Maxxer(CharacterKind::Ninja),
        Self::HeadOn,
        Self::Survivor,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Maxxer(CharacterKind::Warrior) => "warrior_maxxer",
            Self::Maxxer(CharacterKind::Mage) => "mage_maxxer",
            Self::Maxxer(CharacterKind::Ninja) => "ninja_maxxer",
            Self::HeadOn => "head_on",
            Self::Survivor => "survivor",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Fresh strategy instance; nothing is shared between instances.
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            Self::Random => Box::new(RandomBot::new(DEFAULT_RANDOM_BOT_SEED)),
            Self::Maxxer(target) => Box::new(Maxxer::new(target)),
            Self::HeadOn => Box::new(HeadOn::default()),
            Self::Survivor => Box::new(Survivor::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Stats;
    use crate::data::{CharacterRecord, MemoryStore};

    struct Fixed;

    impl Strategy for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn make_assignment(&mut self, roster: &Roster) -> Assignment {
            roster.previous_character_ordering()
        }

        fn process_previous_round_stats(&mut self, _: bool, _: &[Character], _: &[Character]) {}
    }

    fn team() -> TeamData {
        TeamData {
            characters: vec![AssignmentEntry::bare(CharacterRecord::new(
                CharacterKind::Ninja,
                Stats::ZERO,
            ))],
            items: Vec::new(),
        }
    }

    #[test]
    fn registry_names_round_trip() {
        for kind in BotKind::ALL {
            assert_eq!(BotKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(BotKind::from_name("your_bot"), None);
    }

    #[test]
    fn calls_before_initialize_fail() {
        let mut player = Player::new(Box::new(Fixed), MemoryStore::new(team()));
        assert!(matches!(
            player.make_assignment(),
            Err(BotError::NotInitialized)
        ));
        assert!(matches!(
            player.write_assignment(&Vec::new()),
            Err(BotError::NotInitialized)
        ));
    }

    #[test]
    fn writes_advance_until_round_limit() {
        let mut player =
            Player::new(Box::new(Fixed), MemoryStore::new(team())).with_round_limit(2);
        player.initialize().expect("team data present");
        for expected in 1..=2 {
            let assignment = player.make_assignment().expect("initialized");
            assert_eq!(player.write_assignment(&assignment).expect("in range"), expected);
        }
        let assignment = player.make_assignment().expect("initialized");
        assert!(matches!(
            player.write_assignment(&assignment),
            Err(BotError::RoundLimit { round: 3, limit: 2 })
        ));
        assert_eq!(player.store().rounds().len(), 2);

        player.initialize().expect("re-initialize");
        assert_eq!(player.current_round(), Some(1));
    }
}
