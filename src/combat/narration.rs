//! Play-by-play text. The engine only produces these lines; presentation is up to the caller.

use crate::combat::character::Character;

pub const DASHES: &str = "--------------------";

/// Standing teams, yours listed back-to-front so both fronts meet in the middle.
pub fn format_teams(your_team: &[Character], opponent_team: &[Character]) -> String {
    format!(
        "\n\t{} -----VS----- {}",
        name_list(your_team.iter().rev()),
        name_list(opponent_team.iter())
    )
}

/// `['Mage', 'Ninja']`
fn name_list<'a>(team: impl Iterator<Item = &'a Character>) -> String {
    let quoted: Vec<String> = team.map(|character| format!("'{}'", character.name())).collect();
    format!("[{}]", quoted.join(", "))
}

pub fn format_hp(character: &Character) -> String {
    format!(
        "[{:.1}/{:.1}]",
        character.effective_stats.current_hp, character.effective_stats.total_hp
    )
}

pub fn format_matchup(yours: &Character, theirs: &Character) -> String {
    format!(
        "\t{} {} VS {} {}",
        yours.name(),
        format_hp(yours),
        theirs.name(),
        format_hp(theirs)
    )
}

pub fn round_banner(round: u32) -> String {
    format!("\n{DASHES} Round {round}. {DASHES}")
}

pub fn outcome_label(won: bool) -> &'static str {
    if won {
        "WIN"
    } else {
        "LOSS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::character::CharacterKind;
    use crate::combat::stats::Stats;

    #[test]
    fn teams_header_mirrors_your_side() {
        let stats = Stats {
            current_hp: 10.0,
            total_hp: 10.0,
            ..Stats::ZERO
        };
        let yours = vec![
            Character::new(CharacterKind::Ninja, stats),
            Character::new(CharacterKind::Mage, stats),
        ];
        let theirs = vec![Character::new(CharacterKind::Warrior, stats)];
        assert_eq!(
            format_teams(&yours, &theirs),
            "\n\t['Mage', 'Ninja'] -----VS----- ['Warrior']"
        );
        assert_eq!(
            format_matchup(&yours[0], &theirs[0]),
            "\tNinja [10.0/10.0] VS Warrior [10.0/10.0]"
        );
    }

    #[test]
    fn exhausted_team_prints_empty_list() {
        let stats = Stats {
            current_hp: 10.0,
            total_hp: 10.0,
            ..Stats::ZERO
        };
        let theirs = vec![Character::new(CharacterKind::Mage, stats)];
        assert_eq!(format_teams(&[], &theirs), "\n\t[] -----VS----- ['Mage']");
    }
}
