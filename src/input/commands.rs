//! # Command Definitions
//!
//! What a single key press means to the driver, before any pending prompt is
//! taken into account.

use crate::game::{Command, Direction};

/// Outcome of interpreting one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Forward a command to the turn engine.
    Act(Command),
    /// Quit confirmed
    Quit,
    /// Save confirmed
    Save,
    ShowInventory,
    Help,
    /// Nothing for the engine; show these lines to the player.
    Notice(Vec<String>),
}

impl PlayerInput {
    pub(crate) fn notice(text: &str) -> Self {
        PlayerInput::Notice(vec![text.to_string()])
    }
}

/// Movement direction bound to a vi-style key, if any.
///
/// # Examples
///
/// ```
/// use burrow::{key_direction, Direction};
///
/// assert_eq!(key_direction('h'), Some(Direction::West));
/// assert_eq!(key_direction('n'), Some(Direction::Southeast));
/// assert_eq!(key_direction('x'), None);
/// ```
pub fn key_direction(key: char) -> Option<Direction> {
    match key {
        'k' => Some(Direction::North),
        'j' => Some(Direction::South),
        'h' => Some(Direction::West),
        'l' => Some(Direction::East),
        'y' => Some(Direction::Northwest),
        'u' => Some(Direction::Northeast),
        'b' => Some(Direction::Southwest),
        'n' => Some(Direction::Southeast),
        _ => None,
    }
}

/// Key reference shown by the help command.
pub const HELP_TEXT: &str = "\
EXPLANATION OF SYMBOLS ON THE MAIN MAP:
@ -- you, the hero!
letters -- monsters
. -- empty floor
# -- a wall
> -- stairs to the next level
) -- a weapon
[ -- an armor
$ -- a pile of gold pieces

KEY COMMANDS:
h j k l -- lateral moves
y u b n -- diagonal moves
(moving directly into a monster will perform an attack upon it)
. (period) -- pass a turn
> -- go down a staircase leading down
, (comma) -- pick up gold and items
d -- drop an item from your backpack
E -- equip a weapon or armor
i -- list your backpack
? -- show this help
Q -- quit the game (confirm with '@')
S -- save the game (confirm with '@')";
