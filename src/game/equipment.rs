//! # Equipment
//!
//! Weapons and armor the hero can carry, wield and wear.
//!
//! Items are value-like: once built by their factory they never change, and two
//! items are "the same" when their variant, name and symbol match.

use serde::{Deserialize, Serialize};

/// A wieldable weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub(crate) name: String,
    pub(crate) symbol: char,
    pub(crate) accuracy: i32,
    pub(crate) damage: i32,
}

impl Weapon {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Bonus added to the wielder's base accuracy.
    pub fn accuracy(&self) -> i32 {
        self.accuracy
    }

    /// Maximum of the damage roll; replaces the bare-handed rating.
    pub fn damage(&self) -> i32 {
        self.damage
    }
}

/// Wearable armor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Armor {
    pub(crate) name: String,
    pub(crate) symbol: char,
    pub(crate) armor_class: i32,
}

impl Armor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Maximum damage absorbed per hit; replaces the unarmored rating.
    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }
}

/// Which equipment slot an item goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// Anything that can lie on the floor or sit in the hero's backpack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Item {
    Weapon(Weapon),
    Armor(Armor),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Weapon(weapon) => weapon.name(),
            Item::Armor(armor) => armor.name(),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Item::Weapon(weapon) => weapon.symbol(),
            Item::Armor(armor) => armor.symbol(),
        }
    }

    /// The slot this item is equipped into.
    pub fn equip_slot(&self) -> EquipSlot {
        match self {
            Item::Weapon(_) => EquipSlot::Weapon,
            Item::Armor(_) => EquipSlot::Armor,
        }
    }

    pub fn as_weapon(&self) -> Option<&Weapon> {
        match self {
            Item::Weapon(weapon) => Some(weapon),
            Item::Armor(_) => None,
        }
    }

    pub fn as_armor(&self) -> Option<&Armor> {
        match self {
            Item::Armor(armor) => Some(armor),
            Item::Weapon(_) => None,
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.equip_slot() == other.equip_slot()
            && self.name() == other.name()
            && self.symbol() == other.symbol()
    }
}

impl Eq for Item {}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl From<Weapon> for Item {
    fn from(weapon: Weapon) -> Self {
        Item::Weapon(weapon)
    }
}

impl From<Armor> for Item {
    fn from(armor: Armor) -> Self {
        Item::Armor(armor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(name: &str, symbol: char, accuracy: i32, damage: i32) -> Item {
        Item::Weapon(Weapon {
            name: name.to_string(),
            symbol,
            accuracy,
            damage,
        })
    }

    fn armor(name: &str, symbol: char, armor_class: i32) -> Item {
        Item::Armor(Armor {
            name: name.to_string(),
            symbol,
            armor_class,
        })
    }

    #[test]
    fn test_equality_ignores_stats() {
        assert_eq!(weapon("dagger", ')', 5, 8), weapon("dagger", ')', 9, 12));
        assert_eq!(armor("leather", '[', 3), armor("leather", '[', 7));
    }

    #[test]
    fn test_equality_requires_variant_name_and_symbol() {
        assert_ne!(weapon("dagger", ')', 5, 8), weapon("sword", ')', 5, 8));
        assert_ne!(weapon("dagger", ')', 5, 8), weapon("dagger", '/', 5, 8));
        assert_ne!(weapon("mail", '[', 0, 0), armor("mail", '[', 0));
    }

    #[test]
    fn test_equip_slot_and_accessors() {
        let sword = weapon("sword", ')', 10, 20);
        assert_eq!(sword.equip_slot(), EquipSlot::Weapon);
        assert_eq!(sword.as_weapon().map(Weapon::damage), Some(20));
        assert!(sword.as_armor().is_none());

        let plate = armor("plate mail", '[', 12);
        assert_eq!(plate.equip_slot(), EquipSlot::Armor);
        assert_eq!(plate.as_armor().map(Armor::armor_class), Some(12));
        assert_eq!(plate.name(), "plate mail");
        assert_eq!(plate.symbol(), '[');
    }
}
