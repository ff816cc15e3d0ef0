//! # Combat
//!
//! Roll-based attack resolution shared by the hero and monsters.
//!
//! [`resolve_attack`] only rolls dice and applies damage. Narration, death
//! handling and registry bookkeeping belong to the turn engine.

use crate::game::Creature;
use crate::utils::Roller;
use serde::{Deserialize, Serialize};

/// Outcome of a single attack, with the ratings the rolls were made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttackResult {
    /// Roll in `0..=accuracy` of the attacker.
    pub accuracy_roll: i32,
    pub accuracy_rating: i32,
    /// Roll in `0..=evasion` of the defender.
    pub evasion_roll: i32,
    pub evasion_rating: i32,
    /// Roll in `1..=damage` of the attacker; zero on a miss.
    pub damage_roll: i32,
    pub damage_rating: i32,
    /// Damage soaked by armor, never more than `damage_roll`; zero on a miss.
    pub absorbed: i32,
}

impl AttackResult {
    /// Ties go to the defender.
    pub fn is_hit(&self) -> bool {
        self.accuracy_roll > self.evasion_roll
    }

    /// Health actually removed from the defender.
    pub fn damage_dealt(&self) -> i32 {
        self.damage_roll - self.absorbed
    }
}

/// Resolves one attack of `attacker` against `defender`, applying damage.
///
/// Rolls are drawn in a fixed order: accuracy, evasion, then on a hit damage
/// and armor absorption.
///
/// # Examples
///
/// ```
/// use burrow::{resolve_attack, Creature, GamePlay, ScriptedRoller};
/// # use burrow::{Catalog, GenerationConfig};
/// # fn main() -> burrow::BurrowResult<()> {
/// # let mut game = GamePlay::new("Hero", Catalog::builtin()?, GenerationConfig::for_testing(1))?;
/// # let mut defender = game.monsters().next().unwrap().1.clone();
/// let mut rolls = ScriptedRoller::new([60, 10, 7, 0]);
/// let before = defender.health();
/// let result = resolve_attack(game.hero(), &mut defender, &mut rolls);
/// assert!(result.is_hit());
/// assert_eq!(defender.health(), (before - result.damage_dealt()).max(0));
/// # Ok(())
/// # }
/// ```
pub fn resolve_attack(
    attacker: &dyn Creature,
    defender: &mut dyn Creature,
    rng: &mut dyn Roller,
) -> AttackResult {
    let mut result = AttackResult {
        accuracy_rating: attacker.accuracy(),
        evasion_rating: defender.evasion(),
        damage_rating: attacker.damage(),
        ..AttackResult::default()
    };

    result.accuracy_roll = rng.range(0, result.accuracy_rating.max(0));
    result.evasion_roll = rng.range(0, result.evasion_rating.max(0));

    if result.is_hit() {
        result.damage_roll = rng.range(1, result.damage_rating.max(1));
        let armor_roll = rng.range(0, defender.armor_class().max(0));
        result.absorbed = armor_roll.min(result.damage_roll);
        defender.take_damage(result.damage_dealt());
    }

    result
}
