//! # Entities
//!
//! Creatures that occupy the level: the single player-controlled [`Hero`] and the
//! [`Monster`]s hunting it.
//!
//! Both share the [`Creature`] trait, which is all that combat resolution needs.
//! Per-kind behaviour (derived hero stats, monster symbols) lives on the
//! concrete types.

use crate::config;
use crate::game::{EquipSlot, Item, Position};
use serde::{Deserialize, Serialize};

/// Common interface for anything that can fight.
pub trait Creature {
    /// Raw name, e.g. `"goblin"` or the hero's chosen name.
    fn name(&self) -> &str;

    /// Name as used in narration: monsters take the article `"the"`.
    fn display_name(&self) -> String;

    /// Map symbol.
    fn symbol(&self) -> char;

    fn health(&self) -> i32;

    fn max_health(&self) -> i32;

    /// Effective accuracy (upper bound of the accuracy roll).
    fn accuracy(&self) -> i32;

    /// Effective damage (upper bound of the damage roll).
    fn damage(&self) -> i32;

    /// Upper bound of the evasion roll.
    fn evasion(&self) -> i32;

    /// Upper bound of the armor absorption roll.
    fn armor_class(&self) -> i32;

    /// Current cell, or `None` while the creature is not placed on a level.
    fn position(&self) -> Option<Position>;

    /// Reduces health by `amount`, never below zero.
    fn take_damage(&mut self, amount: i32);

    /// A creature is dead exactly when its health is zero.
    fn is_dead(&self) -> bool {
        self.health() == 0
    }
}

/// Base combat statistics shared by every creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureStats {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub accuracy: i32,
    pub damage: i32,
    pub evasion: i32,
    pub armor_class: i32,
}

impl CreatureStats {
    /// Applies damage, flooring health at zero.
    pub fn apply_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
    }
}

/// Fixed-capacity, ordered backpack. Slots may contain holes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<Item>>,
}

impl Inventory {
    /// Creates an empty inventory with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Item in `slot`, if any. Out-of-range slots are simply empty.
    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Number of occupied slots.
    pub fn item_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Whether an equal item (by variant, name and symbol) is carried.
    pub fn contains(&self, item: &Item) -> bool {
        self.iter().any(|(_, carried)| carried == item)
    }

    /// Occupied slots with their indices, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| item.as_ref().map(|item| (slot, item)))
    }

    /// Places `item` in the first free slot, handing it back when full.
    pub(crate) fn add(&mut self, item: Item) -> Result<usize, Item> {
        match self.slots.iter().position(Option::is_none) {
            Some(slot) => {
                self.slots[slot] = Some(item);
                Ok(slot)
            }
            None => Err(item),
        }
    }

    /// Removes and returns the item in `slot`.
    pub(crate) fn take(&mut self, slot: usize) -> Option<Item> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Stores `item` in `slot`, returning whatever was there before.
    pub(crate) fn put(&mut self, slot: usize, item: Item) -> Option<Item> {
        self.slots.get_mut(slot).and_then(|cell| cell.replace(item))
    }

    /// Letter shown for a slot: `a` for slot 0, `b` for slot 1, ...
    pub fn slot_letter(slot: usize) -> char {
        (b'a' + (slot % 26) as u8) as char
    }

    /// Slot index for a lowercase letter, if it names a slot of this inventory.
    pub fn slot_for_letter(&self, letter: char) -> Option<usize> {
        if !letter.is_ascii_lowercase() {
            return None;
        }
        let slot = (letter as u8 - b'a') as usize;
        (slot < self.capacity()).then_some(slot)
    }

    /// Human-readable listing, one `"a - dagger"` line per occupied slot.
    pub fn listing(&self) -> String {
        let lines: Vec<String> = self
            .iter()
            .map(|(slot, item)| format!("{} - {}", Self::slot_letter(slot), item.name()))
            .collect();

        if lines.is_empty() {
            "Your backpack is currently empty.".to_string()
        } else {
            format!(
                "You are carrying the following items:\n{}\n",
                lines.join("\n")
            )
        }
    }
}

/// The player-controlled creature.
///
/// Exactly one hero exists per session; it is created by the session
/// constructors and owned by [`GamePlay`](crate::GamePlay) for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    stats: CreatureStats,
    position: Option<Position>,
    weapon: Option<crate::game::Weapon>,
    armor: Option<crate::game::Armor>,
    inventory: Inventory,
    gold: u32,
}

impl Hero {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            stats: CreatureStats {
                name: name.into(),
                health: config::HERO_STARTING_HEALTH,
                max_health: config::HERO_STARTING_HEALTH,
                accuracy: config::HERO_STARTING_ACCURACY,
                damage: config::BARE_HANDED_DAMAGE,
                evasion: config::FIXED_EVASION,
                armor_class: config::UNARMORED_CLASS,
            },
            position: None,
            weapon: None,
            armor: None,
            inventory: Inventory::new(config::INVENTORY_SLOTS),
            gold: 0,
        }
    }

    /// Base accuracy, before the weapon bonus.
    pub fn base_accuracy(&self) -> i32 {
        self.stats.accuracy
    }

    pub fn weapon(&self) -> Option<&crate::game::Weapon> {
        self.weapon.as_ref()
    }

    pub fn armor(&self) -> Option<&crate::game::Armor> {
        self.armor.as_ref()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// Whether the hero carries or wears an item equal to `item`.
    pub fn has_item(&self, item: &Item) -> bool {
        if self.inventory.contains(item) {
            return true;
        }
        match item {
            Item::Weapon(weapon) => self
                .weapon
                .as_ref()
                .is_some_and(|wielded| wielded.name() == weapon.name() && wielded.symbol() == weapon.symbol()),
            Item::Armor(armor) => self
                .armor
                .as_ref()
                .is_some_and(|worn| worn.name() == armor.name() && worn.symbol() == armor.symbol()),
        }
    }

    pub(crate) fn add_gold(&mut self, amount: u32) {
        self.gold += amount;
    }

    pub(crate) fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub(crate) fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    /// Equips the item in `slot`, moving any previously equipped item of the
    /// same kind into the vacated slot.
    ///
    /// Returns the slot kind that changed, or `None` if `slot` was empty.
    pub(crate) fn equip(&mut self, slot: usize) -> Option<EquipSlot> {
        let item = self.inventory.take(slot)?;
        let kind = item.equip_slot();
        let previous = match item {
            Item::Weapon(weapon) => self.weapon.replace(weapon).map(Item::Weapon),
            Item::Armor(armor) => self.armor.replace(armor).map(Item::Armor),
        };
        if let Some(previous) = previous {
            self.inventory.put(slot, previous);
        }
        Some(kind)
    }
}

impl Creature for Hero {
    fn name(&self) -> &str {
        &self.stats.name
    }

    fn display_name(&self) -> String {
        self.stats.name.clone()
    }

    fn symbol(&self) -> char {
        config::HERO_SYMBOL
    }

    fn health(&self) -> i32 {
        self.stats.health
    }

    fn max_health(&self) -> i32 {
        self.stats.max_health
    }

    fn accuracy(&self) -> i32 {
        self.stats.accuracy + self.weapon.as_ref().map_or(0, |weapon| weapon.accuracy())
    }

    fn damage(&self) -> i32 {
        self.weapon
            .as_ref()
            .map_or(config::BARE_HANDED_DAMAGE, |weapon| weapon.damage())
    }

    fn evasion(&self) -> i32 {
        self.stats.evasion
    }

    fn armor_class(&self) -> i32 {
        self.armor
            .as_ref()
            .map_or(config::UNARMORED_CLASS, |armor| armor.armor_class())
    }

    fn position(&self) -> Option<Position> {
        self.position
    }

    fn take_damage(&mut self, amount: i32) {
        self.stats.apply_damage(amount);
    }
}

/// A hostile creature built from a monster template.
///
/// Only health and position change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    stats: CreatureStats,
    symbol: char,
    position: Option<Position>,
}

impl Monster {
    pub(crate) fn new(stats: CreatureStats, symbol: char) -> Self {
        Self {
            stats,
            symbol,
            position: None,
        }
    }

    pub fn stats(&self) -> &CreatureStats {
        &self.stats
    }

    pub(crate) fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Creature for Monster {
    fn name(&self) -> &str {
        &self.stats.name
    }

    fn display_name(&self) -> String {
        format!("the {}", self.stats.name)
    }

    fn symbol(&self) -> char {
        self.symbol
    }

    fn health(&self) -> i32 {
        self.stats.health
    }

    fn max_health(&self) -> i32 {
        self.stats.max_health
    }

    fn accuracy(&self) -> i32 {
        self.stats.accuracy
    }

    fn damage(&self) -> i32 {
        self.stats.damage
    }

    fn evasion(&self) -> i32 {
        self.stats.evasion
    }

    fn armor_class(&self) -> i32 {
        self.stats.armor_class
    }

    fn position(&self) -> Option<Position> {
        self.position
    }

    fn take_damage(&mut self, amount: i32) {
        self.stats.apply_damage(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Armor, Weapon};

    fn dagger() -> Item {
        Item::Weapon(Weapon {
            name: "dagger".to_string(),
            symbol: ')',
            accuracy: 5,
            damage: 15,
        })
    }

    fn long_sword() -> Item {
        Item::Weapon(Weapon {
            name: "long sword".to_string(),
            symbol: ')',
            accuracy: 10,
            damage: 30,
        })
    }

    fn chain_mail() -> Item {
        Item::Armor(Armor {
            name: "chain mail".to_string(),
            symbol: '[',
            armor_class: 8,
        })
    }

    #[test]
    fn test_hero_starting_stats() {
        let hero = Hero::new("PowerMan");
        assert_eq!(hero.name(), "PowerMan");
        assert_eq!(hero.health(), config::HERO_STARTING_HEALTH);
        assert_eq!(hero.max_health(), config::HERO_STARTING_HEALTH);
        assert_eq!(hero.accuracy(), config::HERO_STARTING_ACCURACY);
        assert_eq!(hero.damage(), config::BARE_HANDED_DAMAGE);
        assert_eq!(hero.armor_class(), config::UNARMORED_CLASS);
        assert_eq!(hero.evasion(), config::FIXED_EVASION);
        assert_eq!(hero.position(), None);
        assert_eq!(hero.gold(), 0);
        assert!(!hero.is_dead());
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut hero = Hero::new("Hero");
        hero.take_damage(50);
        assert_eq!(hero.health(), config::HERO_STARTING_HEALTH - 50);
        hero.take_damage(10_000);
        assert_eq!(hero.health(), 0);
        assert!(hero.is_dead());
    }

    #[test]
    fn test_equipping_weapon_replaces_damage_and_adds_accuracy() {
        let mut hero = Hero::new("Hero");
        hero.inventory_mut().add(dagger()).unwrap();

        assert_eq!(hero.equip(0), Some(EquipSlot::Weapon));
        assert_eq!(hero.damage(), 15);
        assert_eq!(hero.accuracy(), config::HERO_STARTING_ACCURACY + 5);
        assert_eq!(hero.base_accuracy(), config::HERO_STARTING_ACCURACY);
        assert_eq!(hero.inventory().item_count(), 0);
    }

    #[test]
    fn test_equip_swaps_previous_item_into_vacated_slot() {
        let mut hero = Hero::new("Hero");
        hero.inventory_mut().add(dagger()).unwrap();
        hero.inventory_mut().add(chain_mail()).unwrap();
        hero.inventory_mut().add(long_sword()).unwrap();

        hero.equip(0);
        assert_eq!(hero.inventory().item_count(), 2);

        hero.equip(2);
        assert_eq!(hero.inventory().item_count(), 2);
        assert_eq!(hero.inventory().get(2), Some(&dagger()));
        assert_eq!(hero.weapon().map(Weapon::name), Some("long sword"));

        hero.equip(1);
        assert_eq!(hero.armor_class(), 8);
        assert!(hero.inventory().get(1).is_none());
    }

    #[test]
    fn test_equip_empty_slot_is_rejected() {
        let mut hero = Hero::new("Hero");
        assert_eq!(hero.equip(3), None);
        assert_eq!(hero.equip(999), None);
    }

    #[test]
    fn test_has_item_checks_inventory_and_equipment() {
        let mut hero = Hero::new("Hero");
        assert!(!hero.has_item(&dagger()));

        hero.inventory_mut().add(dagger()).unwrap();
        assert!(hero.has_item(&dagger()));

        hero.equip(0);
        assert!(hero.has_item(&dagger()));
        assert!(!hero.has_item(&long_sword()));
    }

    #[test]
    fn test_inventory_fills_holes_first() {
        let mut inventory = Inventory::new(3);
        assert_eq!(inventory.add(dagger()), Ok(0));
        assert_eq!(inventory.add(long_sword()), Ok(1));
        assert_eq!(inventory.add(chain_mail()), Ok(2));
        assert!(inventory.is_full());
        assert_eq!(inventory.add(dagger()), Err(dagger()));

        assert_eq!(inventory.take(1), Some(long_sword()));
        assert_eq!(inventory.add(dagger()), Ok(1));
    }

    #[test]
    fn test_inventory_letters() {
        let inventory = Inventory::new(config::INVENTORY_SLOTS);
        assert_eq!(Inventory::slot_letter(0), 'a');
        assert_eq!(Inventory::slot_letter(4), 'e');
        assert_eq!(inventory.slot_for_letter('c'), Some(2));
        assert_eq!(inventory.slot_for_letter('z'), None);
        assert_eq!(inventory.slot_for_letter('C'), None);
    }

    #[test]
    fn test_inventory_listing() {
        let mut inventory = Inventory::new(4);
        assert_eq!(inventory.listing(), "Your backpack is currently empty.");

        inventory.put(2, dagger());
        let listing = inventory.listing();
        assert!(listing.starts_with("You are carrying the following items:"));
        assert!(listing.contains("c - dagger"));
    }

    #[test]
    fn test_monster_display_name_has_article() {
        let monster = Monster::new(
            CreatureStats {
                name: "goblin".to_string(),
                health: 20,
                max_health: 20,
                accuracy: 30,
                damage: 8,
                evasion: config::FIXED_EVASION,
                armor_class: 2,
            },
            'g',
        );
        assert_eq!(monster.display_name(), "the goblin");
        assert_eq!(monster.symbol(), 'g');
        assert_eq!(monster.stats().armor_class, 2);
    }
}
