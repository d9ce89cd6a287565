use std::fmt;

use crate::combat::action::Action;
use crate::combat::error::CombatError;
use crate::combat::item::Item;
use crate::combat::normalize_lookup;
use crate::combat::stats::{Damage, DamageStats, Stats};

/// Maximum number of items a character can hold.
pub const MAX_ITEMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterKind {
    Ninja,
    Mage,
    Warrior,
}

impl CharacterKind {
    pub const ALL: [CharacterKind; 3] = [Self::Ninja, Self::Mage, Self::Warrior];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ninja => "Ninja",
            Self::Mage => "Mage",
            Self::Warrior => "Warrior",
        }
    }

    pub const fn special_attack_name(self) -> &'static str {
        match self {
            Self::Ninja => {
                "Special Attack: A precise poisoned dagger shot designed to incapacitate most opponents"
            }
            Self::Mage => "Special Attack: A lullaby to deep sleep",
            Self::Warrior => "Special Attack: A call to the shield hero",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CombatError> {
        let key = normalize_lookup(name);
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| CombatError::UnknownCharacter(name.to_string()))
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    kind: CharacterKind,
    base_stats: Stats,
    added_item_stats: Stats,
    items: Vec<Item>,
    pub effective_stats: Stats,
    pub damage_stats: DamageStats,
}

impl Character {
    pub fn new(kind: CharacterKind, base_stats: Stats) -> Self {
        Self {
            kind,
            base_stats,
            added_item_stats: Stats::ZERO,
            items: Vec::new(),
            effective_stats: base_stats,
            damage_stats: DamageStats::default(),
        }
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn base_stats(&self) -> &Stats {
        &self.base_stats
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Equips `item`, folding its contribution into the effective stats immediately.
    ///
    /// A second copy of a unique-passive item is still held, but its passive is switched off.
    pub fn add_item(&mut self, mut item: Item) -> Result<(), CombatError> {
        if self.items.len() >= MAX_ITEMS {
            return Err(CombatError::ItemCapacity {
                character: self.name().to_string(),
                item: item.name().to_string(),
                max: MAX_ITEMS,
            });
        }

        if item.kind.has_unique_passive() && self.items.iter().any(|held| held.kind == item.kind) {
            item.is_passive_active = false;
        }

        let contribution = item.calculate_effective_stats(&self.base_stats);
        self.added_item_stats = self.added_item_stats.add_stat_changes(&contribution);
        self.effective_stats = self.base_stats.add_stat_changes(&self.added_item_stats);
        self.items.push(item);
        Ok(())
    }

    pub fn is_defeated(&self) -> bool {
        self.effective_stats.is_defeated()
    }

    /// Pure physical hit for `physical_power`.
    pub fn basic_attack(&self) -> Action {
        let damage = Damage::physical(self.effective_stats.physical_power);
        Action::attack(
            damage,
            format!(
                "{} performed a Basic Attack, dealing {:.1} Physical Damage.",
                self.name(),
                damage.physical
            ),
        )
    }

    pub fn special_attack(&self) -> Action {
        let stats = &self.effective_stats;
        let name = self.name();
        let special = self.kind.special_attack_name();
        match self.kind {
            CharacterKind::Ninja => {
                let damage =
                    Damage::physical(40.0 + 0.5 * stats.physical_power + 0.5 * stats.magic_power);
                Action::attack(
                    damage,
                    format!(
                        "{name} performed {special}, dealing {:.1} Physical Damage.",
                        damage.physical
                    ),
                )
            }
            CharacterKind::Mage => {
                let damage = Damage::magic(1.0 + 1.25 * stats.magic_power);
                Action::attack(
                    damage,
                    format!(
                        "{name} performed {special}, dealing {:.1} Magic Damage.",
                        damage.magic
                    ),
                )
            }
            CharacterKind::Warrior => {
                let healing = 50.0 + 0.75 * stats.physical_power + 3.0 * stats.magic_power;
                Action::self_effect(
                    Stats::hp_delta(healing),
                    format!("{name} performed {special}, healing {healing:.1} HP."),
                )
            }
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.effective_stats.to_string().replace('\n', "\n\t");
        write!(f, "{}: \n\t{stats}", self.name())?;
        if !self.items.is_empty() {
            write!(f, "\n\t  with items ")?;
            for (index, item) in self.items.iter().enumerate() {
                let formatted = item.to_string().replace('\n', "\n\t\t\t");
                write!(f, "\n\t\t{}: {formatted}", index + 1)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::action::Effect;
    use crate::combat::item::ItemKind;

    fn warrior() -> Character {
        Character::new(
            CharacterKind::Warrior,
            Stats {
                current_hp: 300.0,
                total_hp: 300.0,
                armor: 30.0,
                physical_power: 20.0,
                magic_power: 2.0,
                special_trigger_chance: 10.0,
                ..Stats::ZERO
            },
        )
    }

    #[test]
    fn character_lookup_is_case_insensitive() {
        assert_eq!(CharacterKind::from_name("ninja"), Ok(CharacterKind::Ninja));
        assert_eq!(CharacterKind::from_name("MAGE"), Ok(CharacterKind::Mage));
        assert!(CharacterKind::from_name("paladin").is_err());
    }

    #[test]
    fn equipping_updates_effective_stats_incrementally() {
        let mut hero = warrior();
        hero.add_item(Item::new(ItemKind::MagicCauldron, Stats::ZERO))
            .expect("first item fits");
        assert_eq!(hero.effective_stats.total_hp, 400.0);
        assert_eq!(hero.effective_stats.current_hp, 400.0);

        hero.add_item(Item::new(
            ItemKind::Pole,
            Stats {
                armor: 5.0,
                ..Stats::ZERO
            },
        ))
        .expect("second item fits");
        assert_eq!(hero.effective_stats.armor, 35.0);
        assert_eq!(hero.base_stats().armor, 30.0);
    }

    #[test]
    fn fourth_item_is_rejected() {
        let mut hero = warrior();
        for _ in 0..MAX_ITEMS {
            hero.add_item(Item::new(ItemKind::SolidRock, Stats::ZERO))
                .expect("within capacity");
        }
        let err = hero
            .add_item(Item::new(ItemKind::ShinyStaff, Stats::ZERO))
            .expect_err("fourth item must fail");
        assert!(matches!(err, CombatError::ItemCapacity { max: 3, .. }));
        assert_eq!(hero.items().len(), MAX_ITEMS);
    }

    #[test]
    fn duplicate_unique_passive_is_silenced() {
        let mut hero = warrior();
        hero.add_item(Item::new(ItemKind::EnchantedSword, Stats::ZERO))
            .expect("fits");
        hero.add_item(Item::new(ItemKind::EnchantedSword, Stats::ZERO))
            .expect("fits");
        assert_eq!(hero.items().len(), 2);
        assert!(hero.items()[0].is_passive_active);
        assert!(!hero.items()[1].is_passive_active);
        assert_eq!(hero.effective_stats.special_trigger_chance, 17.5);
    }

    #[test]
    fn display_lists_stats_then_items() {
        let mut hero = warrior();
        assert!(hero
            .to_string()
            .starts_with("Warrior: \n\tCurrent HP: 300.0\n\tTotal HP: 300.0\n\tArmor: 30.0"));
        assert!(!hero.to_string().contains("with items"));

        hero.add_item(Item::new(
            ItemKind::Pole,
            Stats {
                armor: 5.0,
                ..Stats::ZERO
            },
        ))
        .expect("fits");
        let shown = hero.to_string();
        assert!(
            shown.contains("\n\t  with items \n\t\t1: A Pole: \n\t\t\tArmor: 5.0"),
            "{shown}"
        );
    }

    #[test]
    fn warrior_special_heals_self() {
        let hero = warrior();
        let action = hero.special_attack();
        assert_eq!(action.effect, Effect::SelfStats(Stats::hp_delta(71.0)));
        assert!(action.damage().is_none());
    }

    #[test]
    fn ninja_and_mage_specials_deal_typed_damage() {
        let stats = Stats {
            current_hp: 100.0,
            total_hp: 100.0,
            physical_power: 20.0,
            magic_power: 10.0,
            ..Stats::ZERO
        };
        let ninja = Character::new(CharacterKind::Ninja, stats);
        let mage = Character::new(CharacterKind::Mage, stats);
        assert_eq!(ninja.special_attack().damage(), Some(Damage::physical(55.0)));
        assert_eq!(mage.special_attack().damage(), Some(Damage::magic(13.5)));
        assert_eq!(ninja.basic_attack().damage(), Some(Damage::physical(20.0)));
    }
}
