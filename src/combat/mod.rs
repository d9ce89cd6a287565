pub mod action;
pub mod character;
pub mod engine;
pub mod error;
pub mod item;
pub mod narration;
pub mod rng;
pub mod round;
pub mod series;
pub mod stats;

pub use action::{Action, Effect};
pub use character::{Character, CharacterKind, MAX_ITEMS};
pub use engine::{compute_damage_taken, compute_miss_chance, execute_turn, Side};
pub use error::CombatError;
pub use item::{Item, ItemKind};
pub use rng::{Rng, RngSource, ScriptedRng, DEFAULT_SEED};
pub use round::{play_round, Round, RoundOutcome, RoundPhase};
pub use series::{play_match, MatchConfig, MatchError, MatchOutcome, MatchPhase, MatchState};
pub use stats::{Damage, DamageStats, Stats, MAX_TRIGGER_CHANCE};

/// Normalize a name for lookup: lowercase, collapse spaces/underscores/hyphens.
pub(crate) fn normalize_lookup(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' || c == '-' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
