//! # Template Catalog
//!
//! Parsed monster and item templates, and random selection from them.
//!
//! A [`Catalog`] is an ordinary value: the session owns one and passes it to
//! whatever needs to spawn things. The template tables are line oriented; lines
//! starting with `#` are comments and blank lines are ignored.

use crate::game::{Armor, Item, Monster, Weapon};
use crate::generation::{
    create_armor, create_monster, create_weapon, ArmorTemplate, ItemTemplate, MonsterTemplate,
    WeaponTemplate,
};
use crate::utils::Roller;
use crate::{BurrowError, BurrowResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_MONSTERS: &str = include_str!("../../data/monsters.txt");
const BUILTIN_ITEMS: &str = include_str!("../../data/items.txt");

/// Monster, weapon and armor templates available to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    monsters: Vec<MonsterTemplate>,
    weapons: Vec<WeaponTemplate>,
    armors: Vec<ArmorTemplate>,
}

/// Non-comment lines with their 1-based line numbers.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

impl Catalog {
    pub fn new(
        monsters: Vec<MonsterTemplate>,
        weapons: Vec<WeaponTemplate>,
        armors: Vec<ArmorTemplate>,
    ) -> Self {
        Self {
            monsters,
            weapons,
            armors,
        }
    }

    /// The tables shipped with the game.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::Catalog;
    ///
    /// let catalog = Catalog::builtin().unwrap();
    /// assert!(!catalog.monsters().is_empty());
    /// assert!(catalog.validate().is_ok());
    /// ```
    pub fn builtin() -> BurrowResult<Self> {
        let mut catalog = Self::default();
        catalog.load_monsters(BUILTIN_MONSTERS)?;
        catalog.load_items(BUILTIN_ITEMS)?;
        Ok(catalog)
    }

    /// Loads both tables from files.
    pub fn from_files(monsters: impl AsRef<Path>, items: impl AsRef<Path>) -> BurrowResult<Self> {
        let mut catalog = Self::default();
        catalog.load_monsters(&std::fs::read_to_string(monsters)?)?;
        catalog.load_items(&std::fs::read_to_string(items)?)?;
        Ok(catalog)
    }

    /// Replaces all monster templates with those parsed from `text`.
    ///
    /// Nothing is replaced if any line is malformed.
    pub fn load_monsters(&mut self, text: &str) -> BurrowResult<()> {
        let monsters = data_lines(text)
            .map(|(number, line)| MonsterTemplate::parse(line, number))
            .collect::<BurrowResult<Vec<_>>>()?;
        log::debug!("Loaded {} monster templates", monsters.len());
        self.monsters = monsters;
        Ok(())
    }

    /// Replaces all weapon and armor templates with those parsed from `text`.
    ///
    /// Nothing is replaced if any line is malformed.
    pub fn load_items(&mut self, text: &str) -> BurrowResult<()> {
        let mut weapons = Vec::new();
        let mut armors = Vec::new();
        for (number, line) in data_lines(text) {
            match ItemTemplate::parse(line, number)? {
                ItemTemplate::Weapon(weapon) => weapons.push(weapon),
                ItemTemplate::Armor(armor) => armors.push(armor),
            }
        }
        log::debug!(
            "Loaded {} weapon and {} armor templates",
            weapons.len(),
            armors.len()
        );
        self.weapons = weapons;
        self.armors = armors;
        Ok(())
    }

    pub fn monsters(&self) -> &[MonsterTemplate] {
        &self.monsters
    }

    pub fn weapons(&self) -> &[WeaponTemplate] {
        &self.weapons
    }

    pub fn armors(&self) -> &[ArmorTemplate] {
        &self.armors
    }

    /// Checks that a session can be populated from this catalog.
    pub fn validate(&self) -> BurrowResult<()> {
        if self.monsters.is_empty() {
            return Err(BurrowError::EmptyCatalog("monster"));
        }
        if self.weapons.is_empty() && self.armors.is_empty() {
            return Err(BurrowError::EmptyCatalog("item"));
        }
        Ok(())
    }

    pub fn generate_monster(&self, rng: &mut dyn Roller) -> BurrowResult<Monster> {
        if self.monsters.is_empty() {
            return Err(BurrowError::EmptyCatalog("monster"));
        }
        Ok(create_monster(&self.monsters[rng.below(self.monsters.len())]))
    }

    pub fn generate_weapon(&self, rng: &mut dyn Roller) -> BurrowResult<Weapon> {
        if self.weapons.is_empty() {
            return Err(BurrowError::EmptyCatalog("weapon"));
        }
        Ok(create_weapon(&self.weapons[rng.below(self.weapons.len())]))
    }

    pub fn generate_armor(&self, rng: &mut dyn Roller) -> BurrowResult<Armor> {
        if self.armors.is_empty() {
            return Err(BurrowError::EmptyCatalog("armor"));
        }
        Ok(create_armor(&self.armors[rng.below(self.armors.len())]))
    }

    /// A coin flip picks weapon or armor, then a template of that kind.
    ///
    /// When one kind has no templates the other is always used.
    pub fn generate_item(&self, rng: &mut dyn Roller) -> BurrowResult<Item> {
        let weapon = match (self.weapons.is_empty(), self.armors.is_empty()) {
            (true, true) => return Err(BurrowError::EmptyCatalog("item")),
            (false, true) => true,
            (true, false) => false,
            (false, false) => rng.coin(),
        };
        if weapon {
            self.generate_weapon(rng).map(Item::Weapon)
        } else {
            self.generate_armor(rng).map(Item::Armor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Creature, EquipSlot};
    use crate::utils::ScriptedRoller;

    const MONSTERS: &str = "\
# name,accuracy,damage,armor_class,health,symbol
kobold,30,6,1,12,k

goblin,40,8,2,20,g
";

    const ITEMS: &str = "\
# weapons
weapon,dagger,5,15,)
weapon,mace,0,25,)
# armor
armor,leather armor,3,[
";

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.load_monsters(MONSTERS).unwrap();
        catalog.load_items(ITEMS).unwrap();
        catalog
    }

    #[test]
    fn test_loading_skips_comments_and_blank_lines() {
        let catalog = catalog();
        assert_eq!(catalog.monsters().len(), 2);
        assert_eq!(catalog.weapons().len(), 2);
        assert_eq!(catalog.armors().len(), 1);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_loading_replaces_wholesale() {
        let mut catalog = catalog();
        catalog.load_monsters("troll,70,25,6,120,T").unwrap();
        assert_eq!(catalog.monsters().len(), 1);
        assert_eq!(catalog.monsters()[0].name, "troll");
    }

    #[test]
    fn test_malformed_line_reports_its_number_and_keeps_old_data() {
        let mut catalog = catalog();
        let result = catalog.load_monsters("# header\nbat,20,3,0,5,b\nbroken line\n");
        assert!(matches!(result, Err(BurrowError::CatalogFormat { line: 3, .. })));
        assert_eq!(catalog.monsters().len(), 2);
    }

    #[test]
    fn test_generate_picks_by_roll() {
        let catalog = catalog();
        let mut rng = ScriptedRoller::new([1, 1, 1, 0, 0]);
        assert_eq!(catalog.generate_monster(&mut rng).unwrap().name(), "goblin");
        assert_eq!(catalog.generate_weapon(&mut rng).unwrap().name(), "mace");

        let item = catalog.generate_item(&mut rng).unwrap();
        assert_eq!(item.equip_slot(), EquipSlot::Weapon);
        assert_eq!(item.name(), "dagger");
    }

    #[test]
    fn test_generate_item_falls_back_to_available_kind() {
        let mut catalog = catalog();
        catalog.load_items("armor,robe,1,[").unwrap();
        let mut rng = ScriptedRoller::new([1, 0]);
        assert_eq!(catalog.generate_item(&mut rng).unwrap().name(), "robe");
        assert!(matches!(
            catalog.generate_weapon(&mut rng),
            Err(BurrowError::EmptyCatalog("weapon"))
        ));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert!(matches!(
            Catalog::default().validate(),
            Err(BurrowError::EmptyCatalog("monster"))
        ));
        let mut catalog = Catalog::default();
        catalog.load_monsters(MONSTERS).unwrap();
        assert!(matches!(catalog.validate(), Err(BurrowError::EmptyCatalog("item"))));
        assert!(catalog.generate_item(&mut ScriptedRoller::default()).is_err());
    }

    #[test]
    fn test_builtin_tables_parse() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.validate().is_ok());
        assert!(!catalog.weapons().is_empty());
        assert!(!catalog.armors().is_empty());
    }

    #[test]
    fn test_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let monsters = dir.path().join("monsters.txt");
        let items = dir.path().join("items.txt");
        std::fs::write(&monsters, MONSTERS).unwrap();
        std::fs::write(&items, ITEMS).unwrap();

        let catalog = Catalog::from_files(&monsters, &items).unwrap();
        assert_eq!(catalog.monsters().len(), 2);
        assert!(Catalog::from_files(dir.path().join("missing.txt"), &items).is_err());
    }
}
