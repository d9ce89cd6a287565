use crate::bots::head_on::damage_ranking;
use crate::bots::{give_items, Roster, Strategy};
use crate::combat::Character;
use crate::data::Assignment;

/// Puts the team's most survivable character (HP left plus armor) against the opponent's
/// top damage dealer and equips it with every item. Until a round has been seen it keeps
/// the roster order and places nothing.
#[derive(Debug, Clone, Default)]
pub struct Survivor {
    team_survivability: Vec<(usize, f64)>,
    opponent_damage_dealers: Vec<(usize, f64)>,
}

fn survivability_ranking(team: &[Character]) -> Vec<(usize, f64)> {
    let mut ranking: Vec<(usize, f64)> = team
        .iter()
        .enumerate()
        .map(|(index, character)| {
            let stats = &character.effective_stats;
            (index, stats.current_hp + stats.armor)
        })
        .collect();
    ranking.sort_by(|left, right| right.1.total_cmp(&left.1));
    ranking
}

impl Strategy for Survivor {
    fn name(&self) -> &str {
        "survivor"
    }

    fn make_assignment(&mut self, roster: &Roster) -> Assignment {
        let previous = roster.previous_character_ordering();
        let mut assignment = previous.clone();

        let team_size = previous.len();
        if team_size == 0
            || self.team_survivability.len() != team_size
            || self.opponent_damage_dealers.len() != team_size
        {
            return assignment;
        }

        let (tank, _) = self.team_survivability[0];
        let (threat, _) = self.opponent_damage_dealers[team_size - 1];
        assignment[threat] = previous[tank].clone();

        for (&(team_index, _), &(placement, _)) in self.team_survivability[1..]
            .iter()
            .zip(&self.opponent_damage_dealers)
        {
            assignment[placement] = previous[team_index].clone();
        }

        give_items(&mut assignment[threat], roster.items());
        assignment
    }

    fn process_previous_round_stats(
        &mut self,
        _won: bool,
        your_team: &[Character],
        opponent_team: &[Character],
    ) {
        self.team_survivability = survivability_ranking(your_team);
        self.opponent_damage_dealers = damage_ranking(opponent_team);
    }
}
