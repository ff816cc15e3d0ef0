//! # Item Generation
//!
//! Weapon and armor templates and the factories that build items from them.

use crate::game::{Armor, Weapon};
use crate::{BurrowError, BurrowResult};
use serde::{Deserialize, Serialize};

/// Definition of a weapon that may appear in the dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponTemplate {
    pub name: String,
    pub accuracy: i32,
    pub damage: i32,
    pub symbol: char,
}

/// Definition of an armor that may appear in the dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorTemplate {
    pub name: String,
    pub armor_class: i32,
    pub symbol: char,
}

/// One parsed line of an item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemTemplate {
    Weapon(WeaponTemplate),
    Armor(ArmorTemplate),
}

impl ItemTemplate {
    /// Parses `weapon,name,accuracy,damage,symbol` or `armor,name,armor_class,symbol`.
    pub fn parse(line: &str, line_number: usize) -> BurrowResult<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields.first().copied() {
            Some("weapon") => {
                expect_fields(&fields, 5, line_number)?;
                Ok(ItemTemplate::Weapon(WeaponTemplate {
                    name: parse_name(fields[1], line_number)?,
                    accuracy: parse_number(fields[2], "accuracy", line_number)?,
                    damage: parse_number(fields[3], "damage", line_number)?,
                    symbol: parse_symbol(fields[4], line_number)?,
                }))
            }
            Some("armor") => {
                expect_fields(&fields, 4, line_number)?;
                Ok(ItemTemplate::Armor(ArmorTemplate {
                    name: parse_name(fields[1], line_number)?,
                    armor_class: parse_number(fields[2], "armor class", line_number)?,
                    symbol: parse_symbol(fields[3], line_number)?,
                }))
            }
            other => Err(BurrowError::CatalogFormat {
                line: line_number,
                reason: format!("unknown item kind {:?}", other.unwrap_or_default()),
            }),
        }
    }
}

/// Builds a weapon with the template's stats.
pub fn create_weapon(template: &WeaponTemplate) -> Weapon {
    Weapon {
        name: template.name.clone(),
        symbol: template.symbol,
        accuracy: template.accuracy,
        damage: template.damage,
    }
}

/// Builds an armor with the template's stats.
pub fn create_armor(template: &ArmorTemplate) -> Armor {
    Armor {
        name: template.name.clone(),
        symbol: template.symbol,
        armor_class: template.armor_class,
    }
}

pub(crate) fn expect_fields(fields: &[&str], count: usize, line: usize) -> BurrowResult<()> {
    if fields.len() != count {
        return Err(BurrowError::CatalogFormat {
            line,
            reason: format!("expected {} fields, found {}", count, fields.len()),
        });
    }
    Ok(())
}

pub(crate) fn parse_name(field: &str, line: usize) -> BurrowResult<String> {
    if field.is_empty() {
        return Err(BurrowError::CatalogFormat {
            line,
            reason: "empty name".to_string(),
        });
    }
    Ok(field.to_string())
}

pub(crate) fn parse_number(field: &str, what: &str, line: usize) -> BurrowResult<i32> {
    field.parse().map_err(|_| BurrowError::CatalogFormat {
        line,
        reason: format!("{} {:?} is not a number", what, field),
    })
}

pub(crate) fn parse_symbol(field: &str, line: usize) -> BurrowResult<char> {
    field.chars().next().ok_or_else(|| BurrowError::CatalogFormat {
        line,
        reason: "missing symbol".to_string(),
    })
}
