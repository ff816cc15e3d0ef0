//! # Encounter Generation
//!
//! Monster templates, the monster factory and depth-scaled gold.

use crate::config;
use crate::game::{CreatureStats, Monster};
use crate::generation::items::{expect_fields, parse_name, parse_number, parse_symbol};
use crate::utils::Roller;
use crate::BurrowResult;
use serde::{Deserialize, Serialize};

/// Definition of a monster that may appear in the dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub name: String,
    pub accuracy: i32,
    pub damage: i32,
    pub armor_class: i32,
    pub health: i32,
    pub symbol: char,
}

impl MonsterTemplate {
    /// Parses `name,accuracy,damage,armor_class,health,symbol`.
    pub fn parse(line: &str, line_number: usize) -> BurrowResult<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        expect_fields(&fields, 6, line_number)?;
        Ok(Self {
            name: parse_name(fields[0], line_number)?,
            accuracy: parse_number(fields[1], "accuracy", line_number)?,
            damage: parse_number(fields[2], "damage", line_number)?,
            armor_class: parse_number(fields[3], "armor class", line_number)?,
            health: parse_number(fields[4], "health", line_number)?,
            symbol: parse_symbol(fields[5], line_number)?,
        })
    }
}

/// Builds a monster at full health from a template.
///
/// Evasion is the same fixed value for every monster.
pub fn create_monster(template: &MonsterTemplate) -> Monster {
    Monster::new(
        CreatureStats {
            name: template.name.clone(),
            health: template.health,
            max_health: template.health,
            accuracy: template.accuracy,
            damage: template.damage,
            evasion: config::FIXED_EVASION,
            armor_class: template.armor_class,
        },
        template.symbol,
    )
}

/// Size of a gold pile at `depth`: `2 * depth + 2` ten-sided dice.
pub fn generate_gold(depth: u32, rng: &mut dyn Roller) -> u32 {
    rng.roll(depth * 2 + 2, 10)
}
