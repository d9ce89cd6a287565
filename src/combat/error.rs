use thiserror::Error;

/// Contract violations raised while building or resolving combat. None of these are
/// retryable; they indicate a broken caller or malformed assignment data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CombatError {
    #[error("turn requested with a defeated combatant: {name} has {current_hp} HP")]
    CombatantDefeated { name: String, current_hp: f64 },
    #[error("cannot equip {item} on {character}: already holding {max} items")]
    ItemCapacity {
        character: String,
        item: String,
        max: usize,
    },
    #[error("unknown character archetype '{0}'")]
    UnknownCharacter(String),
    #[error("unknown item '{0}'")]
    UnknownItem(String),
}
