//! # Actions and Events
//!
//! [`Command`]s flow into the turn engine, one per user input; [`GameEvent`]s
//! flow out of it as the narrative of what happened.

use crate::game::{AttackResult, Direction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A turn-consuming request to the turn engine.
///
/// Save and quit are not commands; they are handled by whoever drives the
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Pass,
    PickUp,
    /// Drop the item in the given inventory slot.
    Drop(usize),
    /// Equip the item in the given inventory slot.
    Equip(usize),
    Descend,
}

/// How prominently a message should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageImportance {
    /// Roll details and other bookkeeping
    Debug,
    Normal,
    Important,
    /// Deaths and the end of the game
    Critical,
}

/// Something the player should be told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallInTheWay,
    Rested,
    GoldSighted { amount: u32 },
    ItemSighted { name: String },
    AlreadyOwned,
    StairsSighted,
    AttackStarted { attacker: String, defender: String },
    AttackHit { attacker: String, defender: String },
    AttackMissed { attacker: String, defender: String },
    AttackRolls {
        accuracy_roll: i32,
        accuracy_rating: i32,
        evasion_roll: i32,
        evasion_rating: i32,
    },
    /// Armor soaked `amount` damage; zero means it failed to absorb anything.
    ArmorAbsorbed { defender: String, amount: i32 },
    DamageTaken { defender: String, amount: i32, maximum: i32 },
    HealthRemaining { defender: String, health: i32 },
    Killed { name: String },
    NothingToPickUp,
    GoldPickedUp { amount: u32 },
    ItemPickedUp { name: String },
    BackpackFull { name: String },
    FloorOccupied,
    DropSlotEmpty,
    ItemDropped { name: String },
    EquipSlotEmpty,
    Wielded { name: String },
    PutOn { name: String },
    Descended,
    NoStairsHere,
    LeavingBottomLevel,
    Escaped,
}

impl GameEvent {
    pub fn importance(&self) -> MessageImportance {
        match self {
            GameEvent::AttackRolls { .. } => MessageImportance::Debug,
            GameEvent::AttackHit { .. }
            | GameEvent::DamageTaken { .. }
            | GameEvent::Descended
            | GameEvent::LeavingBottomLevel => MessageImportance::Important,
            GameEvent::Killed { .. } | GameEvent::Escaped => MessageImportance::Critical,
            _ => MessageImportance::Normal,
        }
    }

    /// The narration of one attack, in display order.
    ///
    /// `defender_armor` and `defender_health` are read after the attack
    /// was applied.
    pub fn describe_attack(
        attacker: &str,
        defender: &str,
        result: &AttackResult,
        defender_armor: i32,
        defender_health: i32,
    ) -> Vec<GameEvent> {
        let attacker = attacker.to_string();
        let defender = defender.to_string();
        let rolls = GameEvent::AttackRolls {
            accuracy_roll: result.accuracy_roll,
            accuracy_rating: result.accuracy_rating,
            evasion_roll: result.evasion_roll,
            evasion_rating: result.evasion_rating,
        };

        if !result.is_hit() {
            return vec![GameEvent::AttackMissed { attacker, defender }, rolls];
        }

        let mut events = vec![
            GameEvent::AttackHit {
                attacker,
                defender: defender.clone(),
            },
            rolls,
        ];
        if defender_armor > 0 {
            events.push(GameEvent::ArmorAbsorbed {
                defender: defender.clone(),
                amount: result.absorbed,
            });
        }
        events.push(GameEvent::DamageTaken {
            defender: defender.clone(),
            amount: result.damage_dealt(),
            maximum: result.damage_rating,
        });
        if result.damage_dealt() > 0 {
            events.push(GameEvent::HealthRemaining {
                defender,
                health: defender_health,
            });
        }
        events
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::WallInTheWay => {
                write!(f, "You cannot walk there; there is a wall in your way.")
            }
            GameEvent::Rested => write!(f, "You rest for a moment."),
            GameEvent::GoldSighted { amount } => write!(f, "You see {} gold pieces here.", amount),
            GameEvent::ItemSighted { name } => write!(f, "There is a {} here.", name),
            GameEvent::AlreadyOwned => write!(f, "You already have one of those, however."),
            GameEvent::StairsSighted => write!(f, "You see a staircase leading down here."),
            GameEvent::AttackStarted { attacker, defender } => {
                write!(f, "{} is attacking {}", attacker, defender)
            }
            GameEvent::AttackHit { attacker, defender } => write!(f, "{} hits {}.", attacker, defender),
            GameEvent::AttackMissed { attacker, defender } => {
                write!(f, "{} misses {}.", attacker, defender)
            }
            GameEvent::AttackRolls {
                accuracy_roll,
                accuracy_rating,
                evasion_roll,
                evasion_rating,
            } => write!(
                f,
                "(Accuracy roll {}/{} versus evasion roll {}/{})",
                accuracy_roll, accuracy_rating, evasion_roll, evasion_rating
            ),
            GameEvent::ArmorAbsorbed { defender, amount: 0 } => {
                write!(f, "The armor of {} fails to absorb any damage.", defender)
            }
            GameEvent::ArmorAbsorbed { defender, amount } => {
                write!(f, "The armor of {} absorbs {} damage.", defender, amount)
            }
            GameEvent::DamageTaken {
                defender,
                amount,
                maximum,
            } => write!(
                f,
                "{} takes {} damage (out of a maximum of {}).",
                defender, amount, maximum
            ),
            GameEvent::HealthRemaining { defender, health } => {
                write!(f, "{} has {} hit points remaining.", defender, health)
            }
            GameEvent::Killed { name } => write!(f, "{} has been killed!", name),
            GameEvent::NothingToPickUp => write!(f, "There is nothing to pick up here."),
            GameEvent::GoldPickedUp { amount } => write!(f, "You pick up {} gold pieces.", amount),
            GameEvent::ItemPickedUp { name } => write!(f, "You pick up the {}.", name),
            GameEvent::BackpackFull { name } => {
                write!(f, "You have no space in your backpack for the {}.", name)
            }
            GameEvent::FloorOccupied => write!(f, "There is already an item on the floor here."),
            GameEvent::DropSlotEmpty => write!(f, "You aren't holding anything in that slot."),
            GameEvent::ItemDropped { name } => write!(f, "You drop the {} on the floor.", name),
            GameEvent::EquipSlotEmpty => {
                write!(f, "You aren't holding anything in that inventory slot.")
            }
            GameEvent::Wielded { name } => write!(f, "You wield the {}.", name),
            GameEvent::PutOn { name } => write!(f, "You put on the {}.", name),
            GameEvent::Descended => write!(
                f,
                "You go down the staircase and emerge upon a new dungeon level."
            ),
            GameEvent::NoStairsHere => write!(f, "There is no down staircase here."),
            GameEvent::LeavingBottomLevel => {
                write!(f, "You are exiting the bottom level of the dungeon.")
            }
            GameEvent::Escaped => write!(f, "You have escaped!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(damage_roll: i32, absorbed: i32) -> AttackResult {
        AttackResult {
            accuracy_roll: 40,
            accuracy_rating: 80,
            evasion_roll: 10,
            evasion_rating: 50,
            damage_roll,
            damage_rating: 10,
            absorbed,
        }
    }

    #[test]
    fn test_event_text() {
        assert_eq!(
            GameEvent::GoldSighted { amount: 12 }.to_string(),
            "You see 12 gold pieces here."
        );
        assert_eq!(
            GameEvent::ArmorAbsorbed {
                defender: "the orc".into(),
                amount: 0
            }
            .to_string(),
            "The armor of the orc fails to absorb any damage."
        );
        assert_eq!(
            GameEvent::AttackRolls {
                accuracy_roll: 3,
                accuracy_rating: 80,
                evasion_roll: 7,
                evasion_rating: 50
            }
            .to_string(),
            "(Accuracy roll 3/80 versus evasion roll 7/50)"
        );
    }

    #[test]
    fn test_describe_miss() {
        let result = AttackResult {
            accuracy_roll: 5,
            evasion_roll: 5,
            ..hit(0, 0)
        };
        let events = GameEvent::describe_attack("Hero", "the orc", &result, 4, 20);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].to_string(), "Hero misses the orc.");
    }

    #[test]
    fn test_describe_hit_with_armor() {
        let events = GameEvent::describe_attack("the orc", "Hero", &hit(7, 3), 5, 296);
        let lines: Vec<String> = events.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "the orc hits Hero.",
                "(Accuracy roll 40/80 versus evasion roll 10/50)",
                "The armor of Hero absorbs 3 damage.",
                "Hero takes 4 damage (out of a maximum of 10).",
                "Hero has 296 hit points remaining.",
            ]
        );
    }

    #[test]
    fn test_describe_fully_absorbed_hit_skips_health_line() {
        let events = GameEvent::describe_attack("Hero", "the orc", &hit(2, 2), 0, 20);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ArmorAbsorbed { .. })));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::HealthRemaining { .. })));
    }

    #[test]
    fn test_importance() {
        assert_eq!(
            GameEvent::Killed { name: "Hero".into() }.importance(),
            MessageImportance::Critical
        );
        assert!(GameEvent::Rested.importance() < GameEvent::Escaped.importance());
        assert_eq!(GameEvent::FloorOccupied.importance(), MessageImportance::Normal);
    }
}
