use std::fmt;

use crate::combat::error::CombatError;
use crate::combat::normalize_lookup;
use crate::combat::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    EnchantedSword,
    ShinyStaff,
    MagicCauldron,
    Pole,
    SolidRock,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        Self::EnchantedSword,
        Self::ShinyStaff,
        Self::MagicCauldron,
        Self::Pole,
        Self::SolidRock,
    ];

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::EnchantedSword => "Enchanted Sword",
            Self::ShinyStaff => "Shiny Staff",
            Self::MagicCauldron => "A magic cauldron",
            Self::Pole => "A Pole",
            Self::SolidRock => "A solid rock",
        }
    }

    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::EnchantedSword => &["enchanted_sword", "enchantedsword"],
            Self::ShinyStaff => &["shiny_staff", "shinystaff"],
            Self::MagicCauldron => &["a_magic_cauldron", "magic_cauldron", "magiccauldron"],
            Self::Pole => &["a_pole", "pole"],
            Self::SolidRock => &["a_solid_rock", "solid_rock", "solidrock"],
        }
    }

    pub const fn passive_name(self) -> &'static str {
        match self {
            Self::EnchantedSword => {
                "Unique Passive: Lucky strike. Adds 5%(+25% of base Special Trigger Chance) to Special Trigger chance."
            }
            Self::ShinyStaff => {
                "Passive: Blessings of Echo. Adds 1(+50% of base Magic Power) to Magic Power."
            }
            Self::MagicCauldron => "Unique Passive: Potion of life. Adds 10(+30% of base HP) to HP",
            Self::Pole | Self::SolidRock => "",
        }
    }

    /// At most one copy of a unique passive applies per character.
    pub const fn has_unique_passive(self) -> bool {
        matches!(self, Self::EnchantedSword | Self::MagicCauldron)
    }

    pub fn from_name(name: &str) -> Result<Self, CombatError> {
        let key = normalize_lookup(name);
        Self::ALL
            .into_iter()
            .find(|kind| kind.aliases().contains(&key.as_str()))
            .ok_or_else(|| CombatError::UnknownItem(name.to_string()))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An equippable item: flat base stats plus a passive derived from the holder's base stats.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub base_item_stats: Stats,
    pub is_passive_active: bool,
}

impl Item {
    pub fn new(kind: ItemKind, base_item_stats: Stats) -> Self {
        Self {
            kind,
            base_item_stats,
            is_passive_active: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// Stat contribution of this item for a holder with `character_stats` as base stats.
    pub fn calculate_effective_stats(&self, character_stats: &Stats) -> Stats {
        let passive = match self.kind {
            ItemKind::EnchantedSword if self.is_passive_active => Stats {
                special_trigger_chance: 5.0 + 0.25 * character_stats.special_trigger_chance,
                ..Stats::ZERO
            },
            ItemKind::MagicCauldron if self.is_passive_active => {
                let hp = 10.0 + 0.3 * character_stats.total_hp;
                Stats {
                    current_hp: hp,
                    total_hp: hp,
                    ..Stats::ZERO
                }
            }
            // Not unique, so it never gets silenced.
            ItemKind::ShinyStaff => Stats {
                magic_power: 1.0 + 0.5 * character_stats.magic_power,
                ..Stats::ZERO
            },
            _ => return self.base_item_stats,
        };
        self.base_item_stats.add_stat_changes(&passive)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name())?;
        let base = self.base_item_stats.to_string();
        for row in base.lines() {
            let positive = row
                .rsplit(':')
                .next()
                .and_then(|value| value.trim().parse::<f64>().ok())
                .is_some_and(|value| value > 0.0);
            if positive {
                write!(f, "\n{row}")?;
            }
        }
        if self.is_passive_active && !self.kind.passive_name().is_empty() {
            write!(f, "\n{}", self.kind.passive_name())?;
        }
        Ok(())
    }
}
