//! Serialized team assignments: what bots write and rounds read.

use serde::{Deserialize, Serialize};

use crate::combat::{Character, CharacterKind, CombatError, Item, ItemKind, Stats};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    #[serde(default)]
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    #[serde(default)]
    pub stats: Stats,
}

/// One slot of a team assignment. Position in the list is fighting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentEntry {
    pub character: CharacterRecord,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemRecord>,
}

pub type Assignment = Vec<AssignmentEntry>;

/// Blank roster a bot starts each match from (`team_data.json`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamData {
    pub characters: Vec<AssignmentEntry>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl CharacterRecord {
    pub fn new(kind: CharacterKind, stats: Stats) -> Self {
        Self {
            name: kind.name().to_lowercase(),
            stats,
        }
    }

    pub fn kind(&self) -> Result<CharacterKind, CombatError> {
        CharacterKind::from_name(&self.name)
    }
}

impl ItemRecord {
    pub fn new(kind: ItemKind, stats: Stats) -> Self {
        Self {
            name: kind.display_name().to_string(),
            stats,
        }
    }

    pub fn to_item(&self) -> Result<Item, CombatError> {
        Ok(Item::new(ItemKind::from_name(&self.name)?, self.stats))
    }
}

impl AssignmentEntry {
    pub fn bare(character: CharacterRecord) -> Self {
        Self {
            character,
            items: Vec::new(),
        }
    }

    /// Fresh character with this entry's items equipped in listed order.
    pub fn build_character(&self) -> Result<Character, CombatError> {
        let mut character = Character::new(self.character.kind()?, self.character.stats);
        for record in &self.items {
            character.add_item(record.to_item()?)?;
        }
        Ok(character)
    }
}

/// Builds a fresh team for one round. Characters are never reused across rounds.
pub fn build_team(assignment: &[AssignmentEntry]) -> Result<Vec<Character>, CombatError> {
    assignment.iter().map(AssignmentEntry::build_character).collect()
}

/// Copy of `assignment` with every item removed, used as the next round's starting order.
pub fn strip_items(assignment: &[AssignmentEntry]) -> Assignment {
    assignment
        .iter()
        .map(|entry| AssignmentEntry::bare(entry.character.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignment_json() {
        let raw = r#"[
            {"character": {"name": "ninja", "stats": {"current_hp": 100, "total_hp": 100, "physical_power": 30}},
             "items": [{"name": "Enchanted Sword", "stats": {"physical_power": 5}}]},
            {"character": {"name": "warrior", "stats": {"current_hp": 250, "total_hp": 250}}}
        ]"#;
        let assignment: Assignment = serde_json::from_str(raw).expect("valid assignment");
        assert_eq!(assignment.len(), 2);
        assert!(assignment[1].items.is_empty());

        let team = build_team(&assignment).expect("team builds");
        assert_eq!(team[0].name(), "Ninja");
        assert_eq!(team[0].effective_stats.physical_power, 35.0);
        assert_eq!(team[1].items().len(), 0);
    }

    #[test]
    fn overfull_entry_fails_capacity_check() {
        let entry = AssignmentEntry {
            character: CharacterRecord::new(CharacterKind::Mage, Stats::ZERO),
            items: vec![ItemRecord::new(ItemKind::Pole, Stats::ZERO); 4],
        };
        assert!(matches!(
            entry.build_character(),
            Err(CombatError::ItemCapacity { .. })
        ));
    }

    #[test]
    fn strip_items_keeps_order() {
        let assignment = vec![
            AssignmentEntry {
                character: CharacterRecord::new(CharacterKind::Mage, Stats::ZERO),
                items: vec![ItemRecord::new(ItemKind::Pole, Stats::ZERO)],
            },
            AssignmentEntry::bare(CharacterRecord::new(CharacterKind::Ninja, Stats::ZERO)),
        ];
        let stripped = strip_items(&assignment);
        assert_eq!(stripped[0].character.name, "mage");
        assert!(stripped.iter().all(|entry| entry.items.is_empty()));
    }
}
