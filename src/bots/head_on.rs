use crate::bots::{give_items, Roster, Strategy};
use crate::combat::Character;
use crate::data::Assignment;

/// Mirrors damage output: the team's i-th weakest damage dealer faces the opponent's
/// i-th weakest, and the items go to whoever faces their top damage dealer.
#[derive(Debug, Clone, Default)]
pub struct HeadOn {
    team_damage_dealers: Vec<(usize, f64)>,
    opponent_damage_dealers: Vec<(usize, f64)>,
}

pub(crate) fn damage_ranking(team: &[Character]) -> Vec<(usize, f64)> {
    let mut ranking: Vec<(usize, f64)> = team
        .iter()
        .enumerate()
        .map(|(index, character)| (index, character.damage_stats.damage_dealt))
        .collect();
    ranking.sort_by(|left, right| left.1.total_cmp(&right.1));
    ranking
}

impl Strategy for HeadOn {
    fn name(&self) -> &str {
        "head_on"
    }

    fn make_assignment(&mut self, roster: &Roster) -> Assignment {
        let previous = roster.previous_character_ordering();
        let mut assignment = previous.clone();
        if assignment.is_empty() {
            return assignment;
        }

        let mut item_slot = 0;
        let sizes_match = self.team_damage_dealers.len() == previous.len()
            && self.opponent_damage_dealers.len() == previous.len();
        if sizes_match {
            for (&(team_index, _), &(placement, _)) in self
                .team_damage_dealers
                .iter()
                .zip(&self.opponent_damage_dealers)
            {
                assignment[placement] = previous[team_index].clone();
            }
            if let Some(&(top_opponent, _)) = self.opponent_damage_dealers.last() {
                item_slot = top_opponent;
            }
        }

        give_items(&mut assignment[item_slot], roster.items());
        assignment
    }

    fn process_previous_round_stats(
        &mut self,
        _won: bool,
        your_team: &[Character],
        opponent_team: &[Character],
    ) {
        self.team_damage_dealers = damage_ranking(your_team);
        self.opponent_damage_dealers = damage_ranking(opponent_team);
    }
}
