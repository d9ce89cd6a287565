use crate::bots::{give_items, Roster, Strategy};
use crate::combat::{Character, CharacterKind, Stats};
use crate::data::Assignment;

/// Stacks every item on the strongest character of one archetype and sends it in last.
///
/// The chosen character always occupies the final slot, so the item holder and the
/// last fighter are the same character.
#[derive(Debug, Clone)]
pub struct Maxxer {
    target: CharacterKind,
    name: String,
}

impl Maxxer {
    pub fn new(target: CharacterKind) -> Self {
        Self {
            target,
            name: format!("{}_maxxer", target.name().to_lowercase()),
        }
    }
}

fn priority_stat(kind: CharacterKind, stats: &Stats) -> f64 {
    match kind {
        CharacterKind::Ninja => stats.physical_power,
        CharacterKind::Mage => stats.magic_power,
        CharacterKind::Warrior => stats.total_hp,
    }
}

impl Strategy for Maxxer {
    fn name(&self) -> &str {
        &self.name
    }

    fn make_assignment(&mut self, roster: &Roster) -> Assignment {
        let mut assignment = roster.previous_character_ordering();
        if assignment.is_empty() {
            return assignment;
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, entry) in assignment.iter().enumerate() {
            if entry.character.kind().ok() != Some(self.target) {
                continue;
            }
            let value = priority_stat(self.target, &entry.character.stats);
            // Strictly greater keeps the first candidate on ties.
            if best.map_or(true, |(_, current)| value > current) {
                best = Some((index, value));
            }
        }

        let chosen = assignment.remove(best.map_or(0, |(index, _)| index));
        assignment.push(chosen);
        if let Some(last) = assignment.last_mut() {
            give_items(last, roster.items());
        }
        assignment
    }

    fn process_previous_round_stats(
        &mut self,
        _won: bool,
        _yours: &[Character],
        _theirs: &[Character],
    ) {
    }
}
