//! # User Interface Elements
//!
//! Text panels around the map: hero status and the game-over summary.

use crate::game::{Creature, GamePlay, SessionState};
use crate::utils::Roller;

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Quit,
    Saved,
    Died,
    Escaped,
}

impl GameOverReason {
    /// Reason implied by a terminal session state.
    pub fn from_state(state: SessionState) -> Option<Self> {
        match state {
            SessionState::Active => None,
            SessionState::HeroDead => Some(GameOverReason::Died),
            SessionState::Escaped => Some(GameOverReason::Escaped),
        }
    }
}

/// Hero status, one line per attribute.
pub fn status_panel<R: Roller>(game: &GamePlay<R>) -> String {
    let hero = game.hero();
    let weapon = hero.weapon().map_or("hands and feet", |weapon| weapon.name());
    let armor = hero.armor().map_or("none", |armor| armor.name());

    [
        format!("Name: {}", hero.name()),
        format!("Hit Points: {} out of {}", hero.health(), hero.max_health()),
        format!("Accuracy rating: {}", hero.accuracy()),
        format!("Damage rating: {}", hero.damage()),
        format!("Armor class: {}", hero.armor_class()),
        format!("Equipped weapon: {}", weapon),
        format!("Equipped armor: {}", armor),
        format!("Gold pieces carried: {}", hero.gold()),
        format!("On dungeon level: {}", game.depth()),
        String::new(),
        hero.inventory().listing(),
    ]
    .join("\n")
}

/// End-of-game text.
///
/// Final gold and statistics are left out for a saved game, which is not
/// really over.
pub fn game_over_summary<R: Roller>(game: &GamePlay<R>, reason: GameOverReason) -> String {
    let mut text = String::from("The game session is over.\n\n");
    match reason {
        GameOverReason::Quit => text.push_str("You quit the game prematurely.\n\n"),
        GameOverReason::Saved => {
            text.push_str("You saved the game and can reload later.");
            return text;
        }
        GameOverReason::Died => text.push_str(&format!(
            "You were killed by a vicious {}.\n\n",
            game.killer().unwrap_or("monster")
        )),
        GameOverReason::Escaped => text.push_str("You survived the dungeon!\n\n"),
    }

    let stats = game.statistics();
    text.push_str(&format!(
        "You finished with {} gold pieces.\n\n",
        game.hero().gold()
    ));
    text.push_str(&format!(
        "Deepest level reached: {}\nMonsters slain: {}\nDamage dealt: {}\nDamage taken: {}\nTurns taken: {}\n",
        stats.deepest_level, stats.monsters_killed, stats.damage_dealt, stats.damage_taken, stats.turns
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Catalog, GenerationConfig};

    fn game() -> GamePlay {
        GamePlay::new("Ada", Catalog::builtin().unwrap(), GenerationConfig::for_testing(4)).unwrap()
    }

    #[test]
    fn test_status_panel_for_fresh_hero() {
        let panel = status_panel(&game());
        assert!(panel.contains("Name: Ada"));
        assert!(panel.contains("Hit Points: 300 out of 300"));
        assert!(panel.contains("Equipped weapon: hands and feet"));
        assert!(panel.contains("Equipped armor: none"));
        assert!(panel.contains("On dungeon level: 1"));
        assert!(panel.ends_with("Your backpack is currently empty."));
    }

    #[test]
    fn test_saved_summary_omits_gold() {
        let summary = game_over_summary(&game(), GameOverReason::Saved);
        assert!(summary.ends_with("You saved the game and can reload later."));
        assert!(!summary.contains("gold pieces"));
    }

    #[test]
    fn test_quit_summary_reports_gold() {
        let summary = game_over_summary(&game(), GameOverReason::Quit);
        assert!(summary.contains("You quit the game prematurely."));
        assert!(summary.contains("You finished with 0 gold pieces."));
    }

    #[test]
    fn test_reason_from_state() {
        assert_eq!(GameOverReason::from_state(SessionState::Active), None);
        assert_eq!(
            GameOverReason::from_state(SessionState::HeroDead),
            Some(GameOverReason::Died)
        );
        assert_eq!(
            GameOverReason::from_state(SessionState::Escaped),
            Some(GameOverReason::Escaped)
        );
    }
}
