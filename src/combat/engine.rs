//! Turn resolution: mitigation, miss chance, and the single-turn executor.
//!
//! Neither formula is clamped. Armor or resistance above 100 turns mitigation into
//! amplification, and a zero-damage action still rolls against armor.

use crate::combat::action::Effect;
use crate::combat::character::Character;
use crate::combat::error::CombatError;
use crate::combat::rng::RngSource;
use crate::combat::stats::{Damage, Stats};

/// Which team an actor belongs to, from the perspective of the first team passed to a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Yours,
    Opponents,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Yours => Self::Opponents,
            Self::Opponents => Self::Yours,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yours => "Your",
            Self::Opponents => "Opponent's",
        }
    }
}

/// Stat delta applied to a defender hit by `damage`; only `current_hp` is set.
pub fn compute_damage_taken(damage: &Damage, defender: &Stats) -> Stats {
    let physical = damage.physical - damage.physical * defender.armor / 100.0;
    let magic = damage.magic - damage.magic * defender.magic_resistance / 100.0;
    Stats::hp_delta(-(physical + magic))
}

/// Percent chance that `damage` misses a defender with `defender` stats.
pub fn compute_miss_chance(damage: &Damage, defender: &Stats) -> f64 {
    if damage.magic > damage.physical {
        defender.magic_resistance / 10.0
    } else {
        defender.armor / 10.0
    }
}

/// Resolves one action by `attacker` against `defender` and returns its narration.
///
/// Both combatants must be alive on entry.
pub fn execute_turn<R: RngSource + ?Sized>(
    attacker: &mut Character,
    attacker_side: Side,
    defender: &mut Character,
    rng: &mut R,
) -> Result<String, CombatError> {
    for combatant in [&*attacker, &*defender] {
        if combatant.is_defeated() {
            return Err(CombatError::CombatantDefeated {
                name: combatant.name().to_string(),
                current_hp: combatant.effective_stats.current_hp,
            });
        }
    }

    let defender_label = attacker_side.opposite().label();
    let is_special = rng.bernoulli(attacker.effective_stats.special_trigger_chance);
    let action = if is_special {
        attacker.special_attack()
    } else {
        attacker.basic_attack()
    };

    let outcome = match action.effect {
        Effect::SelfStats(delta) => {
            attacker.effective_stats = attacker.effective_stats.add_stat_changes(&delta);
            String::new()
        }
        Effect::Damage(damage) => {
            let miss_chance = compute_miss_chance(&damage, &defender.effective_stats);
            if rng.bernoulli(miss_chance) {
                format!("It missed {defender_label} {}.", defender.name())
            } else {
                apply_hit(attacker, defender, &damage, defender_label)
            }
        }
    };

    Ok(format!(
        "{} {} {outcome}",
        attacker_side.label(),
        action.description
    ))
}

fn apply_hit(
    attacker: &mut Character,
    defender: &mut Character,
    damage: &Damage,
    defender_label: &str,
) -> String {
    let hp_update = compute_damage_taken(damage, &defender.effective_stats);
    defender.effective_stats = defender.effective_stats.add_stat_changes(&hp_update);

    let hp_lost = -hp_update.current_hp;
    let mut outcome = format!("{defender_label} {} lost {hp_lost:.3} HP. ", defender.name());

    let raw = damage.total();
    attacker.damage_stats.damage_dealt += raw;
    defender.damage_stats.damage_taken += raw;
    // An over-armored heal counts as a loss of its size; floored so the total never drops.
    defender.damage_stats.damage_mitigated += (raw - hp_update.current_hp.abs()).max(0.0);

    if defender.effective_stats.current_hp == 0.0 {
        outcome.push_str("It fainted.");
        attacker.damage_stats.kills += 1;
    }
    outcome
}
