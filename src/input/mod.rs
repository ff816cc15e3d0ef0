//! # Input Module
//!
//! Turns single key presses into engine commands for the text driver.
//!
//! Some commands take two keys: `d` and `E` wait for an inventory letter, and
//! `Q` and `S` wait for `@` to confirm. Any other key cancels a pending prompt.

pub mod commands;

pub use commands::*;

use crate::config;
use crate::game::{Command, Inventory};

/// A command waiting for its second key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Drop,
    Equip,
    Quit,
    Save,
}

const CONTINUING: &str = "OK, continuing game.";
const NOT_AN_ITEM: &str = "That doesn't refer to an item.";
const UNRECOGNIZED: &str = "Unrecognized command.";

/// Stateful key interpreter.
///
/// # Examples
///
/// ```
/// use burrow::{Command, InputHandler, PlayerInput};
///
/// let mut input = InputHandler::new();
/// assert_eq!(input.handle_key(','), PlayerInput::Act(Command::PickUp));
///
/// input.handle_key('d');
/// assert_eq!(input.handle_key('c'), PlayerInput::Act(Command::Drop(2)));
/// ```
#[derive(Debug, Clone)]
pub struct InputHandler {
    pending: Option<Pending>,
    inventory_slots: usize,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pending: None,
            inventory_slots: config::INVENTORY_SLOTS,
        }
    }

    /// The prompt currently waiting for a second key.
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Interprets one key press.
    pub fn handle_key(&mut self, key: char) -> PlayerInput {
        match self.pending.take() {
            Some(pending) => self.complete(pending, key),
            None => self.start(key),
        }
    }

    fn start(&mut self, key: char) -> PlayerInput {
        if let Some(direction) = key_direction(key) {
            return PlayerInput::Act(Command::Move(direction));
        }
        match key {
            '.' => PlayerInput::Act(Command::Pass),
            ',' => PlayerInput::Act(Command::PickUp),
            '>' => PlayerInput::Act(Command::Descend),
            'i' => PlayerInput::ShowInventory,
            '?' => PlayerInput::Help,
            'd' => self.prompt(Pending::Drop, &["Select an item to drop."]),
            'E' => self.prompt(
                Pending::Equip,
                &["Select an item to equip from your inventory."],
            ),
            'Q' => self.prompt(
                Pending::Quit,
                &["Do you really want to quit?  Type '@' to confirm."],
            ),
            'S' => self.prompt(
                Pending::Save,
                &[
                    "Do you really want to save your game and leave?",
                    "Type '@' to confirm.",
                ],
            ),
            _ => PlayerInput::notice(UNRECOGNIZED),
        }
    }

    fn prompt(&mut self, pending: Pending, lines: &[&str]) -> PlayerInput {
        self.pending = Some(pending);
        PlayerInput::Notice(lines.iter().map(|line| line.to_string()).collect())
    }

    fn complete(&mut self, pending: Pending, key: char) -> PlayerInput {
        // Pick-up and descend act immediately whatever was pending.
        if key == ',' || key == '>' {
            return self.start(key);
        }

        match pending {
            Pending::Quit | Pending::Save if key == '@' => {
                if pending == Pending::Quit {
                    PlayerInput::Quit
                } else {
                    PlayerInput::Save
                }
            }
            Pending::Quit | Pending::Save => PlayerInput::notice(CONTINUING),
            Pending::Drop | Pending::Equip => match self.slot_for_letter(key) {
                Some(slot) if pending == Pending::Drop => PlayerInput::Act(Command::Drop(slot)),
                Some(slot) => PlayerInput::Act(Command::Equip(slot)),
                None => PlayerInput::notice(NOT_AN_ITEM),
            },
        }
    }

    fn slot_for_letter(&self, letter: char) -> Option<usize> {
        (0..self.inventory_slots).find(|slot| Inventory::slot_letter(*slot) == letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    #[test]
    fn test_movement_and_simple_commands() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_key('k'),
            PlayerInput::Act(Command::Move(Direction::North))
        );
        assert_eq!(input.handle_key('.'), PlayerInput::Act(Command::Pass));
        assert_eq!(input.handle_key('>'), PlayerInput::Act(Command::Descend));
        assert_eq!(input.handle_key('i'), PlayerInput::ShowInventory);
        assert_eq!(input.handle_key('?'), PlayerInput::Help);
        assert_eq!(input.pending(), None);
    }

    #[test]
    fn test_unknown_key() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_key('z'), PlayerInput::notice(UNRECOGNIZED));
    }

    #[test]
    fn test_drop_takes_a_slot_letter() {
        let mut input = InputHandler::new();
        input.handle_key('d');
        assert_eq!(input.pending(), Some(Pending::Drop));
        // 'b' is a slot letter here, not a diagonal move.
        assert_eq!(input.handle_key('b'), PlayerInput::Act(Command::Drop(1)));
        assert_eq!(input.pending(), None);
    }

    #[test]
    fn test_equip_rejects_non_items() {
        let mut input = InputHandler::new();
        input.handle_key('E');
        assert_eq!(input.handle_key('z'), PlayerInput::notice(NOT_AN_ITEM));
        input.handle_key('E');
        assert_eq!(input.handle_key('.'), PlayerInput::notice(NOT_AN_ITEM));
        input.handle_key('E');
        assert_eq!(input.handle_key('a'), PlayerInput::Act(Command::Equip(0)));
    }

    #[test]
    fn test_quit_and_save_need_confirmation() {
        let mut input = InputHandler::new();
        input.handle_key('Q');
        assert_eq!(input.handle_key('x'), PlayerInput::notice(CONTINUING));
        input.handle_key('Q');
        assert_eq!(input.handle_key('@'), PlayerInput::Quit);

        match input.handle_key('S') {
            PlayerInput::Notice(lines) => assert_eq!(lines.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(input.handle_key('@'), PlayerInput::Save);
    }

    #[test]
    fn test_confirm_without_prompt_is_unrecognized() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_key('@'), PlayerInput::notice(UNRECOGNIZED));
    }

    #[test]
    fn test_pick_up_overrides_pending_prompt() {
        let mut input = InputHandler::new();
        input.handle_key('Q');
        assert_eq!(input.handle_key(','), PlayerInput::Act(Command::PickUp));
        assert_eq!(input.pending(), None);
    }
}
