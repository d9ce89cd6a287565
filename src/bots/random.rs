use crate::bots::{Roster, Strategy};
use crate::combat::{Character, Rng, MAX_ITEMS};
use crate::data::Assignment;

pub const DEFAULT_RANDOM_BOT_SEED: u64 = 16;

/// Shuffles the order and scatters items over characters that still have room.
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: Rng,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self { rng: Rng::new(seed) }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOM_BOT_SEED)
    }
}

impl Strategy for RandomBot {
    fn name(&self) -> &str {
        "random"
    }

    fn make_assignment(&mut self, roster: &Roster) -> Assignment {
        let mut assignment = roster.previous_character_ordering();
        self.rng.shuffle(&mut assignment);

        for item in roster.items() {
            let open: Vec<usize> = assignment
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.items.len() < MAX_ITEMS)
                .map(|(index, _)| index)
                .collect();
            if open.is_empty() {
                break;
            }
            let slot = open[self.rng.index(open.len())];
            assignment[slot].items.push(item.clone());
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
