use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound for `special_trigger_chance`, in percent.
pub const MAX_TRIGGER_CHANCE: f64 = 100.0;

/// Immutable snapshot of a character's numeric attributes. Also used as a delta when
/// merged into another snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub current_hp: f64,
    pub total_hp: f64,
    pub armor: f64,
    pub magic_resistance: f64,
    pub physical_power: f64,
    pub magic_power: f64,
    pub special_trigger_chance: f64,
}

impl Stats {
    pub const ZERO: Stats = Stats {
        current_hp: 0.0,
        total_hp: 0.0,
        armor: 0.0,
        magic_resistance: 0.0,
        physical_power: 0.0,
        magic_power: 0.0,
        special_trigger_chance: 0.0,
    };

    /// Delta that only touches `current_hp`.
    pub fn hp_delta(amount: f64) -> Self {
        Self {
            current_hp: amount,
            ..Self::ZERO
        }
    }

    /// Applies `changes` and clamps every field into range.
    ///
    /// All fields are computed from `self` in one pass. `current_hp` is capped by the
    /// *new* `total_hp`, never the old one.
    #[must_use]
    pub fn add_stat_changes(&self, changes: &Stats) -> Stats {
        let total_hp = non_negative(self.total_hp + changes.total_hp);
        Stats {
            current_hp: (self.current_hp + changes.current_hp).max(0.0).min(total_hp),
            total_hp,
            armor: non_negative(self.armor + changes.armor),
            magic_resistance: non_negative(self.magic_resistance + changes.magic_resistance),
            physical_power: non_negative(self.physical_power + changes.physical_power),
            magic_power: non_negative(self.magic_power + changes.magic_power),
            special_trigger_chance: (self.special_trigger_chance + changes.special_trigger_chance)
                .clamp(0.0, MAX_TRIGGER_CHANCE),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0.0
    }
}

fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Current HP", self.current_hp),
            ("Total HP", self.total_hp),
            ("Armor", self.armor),
            ("Magic Resistance", self.magic_resistance),
            ("Physical Power", self.physical_power),
            ("Magic Power", self.magic_power),
            ("Special Trigger Chance", self.special_trigger_chance),
        ];
        for (index, (label, value)) in rows.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{label}: {value:.1}")?;
        }
        Ok(())
    }
}

/// Incoming damage split by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    pub physical: f64,
    pub magic: f64,
}

impl Damage {
    pub fn physical(amount: f64) -> Self {
        Self {
            physical: amount,
            magic: 0.0,
        }
    }

    pub fn magic(amount: f64) -> Self {
        Self {
            physical: 0.0,
            magic: amount,
        }
    }

    /// Raw damage before any mitigation.
    pub fn total(&self) -> f64 {
        self.physical + self.magic
    }
}

/// Per-character battle accumulator, read by bots after each round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageStats {
    /// Raw damage output, regardless of what the target actually lost.
    pub damage_dealt: f64,
    /// Raw damage received, regardless of HP actually lost.
    pub damage_taken: f64,
    pub damage_mitigated: f64,
    pub kills: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stats {
        Stats {
            current_hp: 80.0,
            total_hp: 100.0,
            armor: 20.0,
            magic_resistance: 10.0,
            physical_power: 30.0,
            magic_power: 5.0,
            special_trigger_chance: 15.0,
        }
    }

    #[test]
    fn zero_delta_is_identity() {
        let stats = sample();
        assert_eq!(stats.add_stat_changes(&Stats::ZERO), stats);
    }

    #[test]
    fn current_hp_is_capped_by_new_total() {
        let stats = sample();
        let shrunk = stats.add_stat_changes(&Stats {
            total_hp: -50.0,
            ..Stats::ZERO
        });
        assert_eq!(shrunk.total_hp, 50.0);
        assert_eq!(shrunk.current_hp, 50.0);

        let grown = stats.add_stat_changes(&Stats {
            current_hp: 40.0,
            total_hp: 30.0,
            ..Stats::ZERO
        });
        assert_eq!(grown.total_hp, 130.0);
        assert_eq!(grown.current_hp, 120.0);
    }

    #[test]
    fn fields_floor_at_zero_and_trigger_chance_caps() {
        let merged = sample().add_stat_changes(&Stats {
            current_hp: -500.0,
            total_hp: 0.0,
            armor: -100.0,
            magic_resistance: -100.0,
            physical_power: -100.0,
            magic_power: -100.0,
            special_trigger_chance: 500.0,
        });
        assert_eq!(merged.current_hp, 0.0);
        assert_eq!(merged.armor, 0.0);
        assert_eq!(merged.magic_resistance, 0.0);
        assert_eq!(merged.physical_power, 0.0);
        assert_eq!(merged.magic_power, 0.0);
        assert_eq!(merged.special_trigger_chance, MAX_TRIGGER_CHANCE);
        assert!(merged.is_defeated());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let stats: Stats = serde_json::from_str(r#"{"total_hp": 120, "armor": 5}"#)
            .expect("partial stats should parse");
        assert_eq!(stats.total_hp, 120.0);
        assert_eq!(stats.armor, 5.0);
        assert_eq!(stats.current_hp, 0.0);
    }
}
