use crate::combat::stats::{Damage, Stats};

/// What an action does when it resolves. An action either hits the opponent or changes
/// the actor's own stats, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Damage(Damage),
    SelfStats(Stats),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub effect: Effect,
    pub description: String,
}

impl Action {
    pub fn attack(damage: Damage, description: impl Into<String>) -> Self {
        Self {
            effect: Effect::Damage(damage),
            description: description.into(),
        }
    }

    pub fn self_effect(delta: Stats, description: impl Into<String>) -> Self {
        Self {
            effect: Effect::SelfStats(delta),
            description: description.into(),
        }
    }

    pub fn damage(&self) -> Option<Damage> {
        match self.effect {
            Effect::Damage(damage) => Some(damage),
            Effect::SelfStats(_) => None,
        }
    }
}
