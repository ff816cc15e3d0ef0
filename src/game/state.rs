//! # Game State Module
//!
//! The turn engine: one [`GamePlay`] owns the current level, the hero, the
//! live monster registry and the narrative event buffer, and resolves every
//! command (including all monster reactions) before returning.
//!
//! Creature positions and cell occupants are only ever changed together,
//! through the session's private relocation helpers. [`GamePlay::check_occupancy`]
//! verifies the invariant, and restored saves are checked with it.

use crate::config;
use crate::game::{
    resolve_attack, AttackResult, Command, Creature, Direction, EquipSlot, GameEvent, Hero, Level,
    Monster, MonsterId, Occupant, Position, Terrain,
};
use crate::generation::{generate_gold, Catalog, GenerationConfig, Generator, RoomCorridorGenerator};
use crate::utils::{suggest_move, GameRng, Roller};
use crate::{BurrowError, BurrowResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Active,
    HeroDead,
    Escaped,
}

impl SessionState {
    /// Terminal sessions accept no further turns.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Active)
    }
}

/// Running totals for the end-of-game summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Number of monster phases resolved
    pub turns: u64,
    pub steps_taken: u64,
    pub monsters_killed: u32,
    /// Total damage dealt by the hero
    pub damage_dealt: u64,
    /// Total damage taken by the hero
    pub damage_taken: u64,
    pub gold_collected: u64,
    pub deepest_level: u32,
}

/// A game session.
///
/// Generic over the [`Roller`] so tests can rig the dice; the default is the
/// seeded [`GameRng`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePlay<R: Roller = GameRng> {
    catalog: Catalog,
    config: GenerationConfig,
    level: Level,
    depth: u32,
    hero: Hero,
    monsters: BTreeMap<MonsterId, Monster>,
    next_monster_id: u32,
    state: SessionState,
    killer: Option<String>,
    statistics: GameStatistics,
    rng: R,
    /// Narrative output; not persisted
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GamePlay<GameRng> {
    /// Starts a new session at depth 1, seeded from `config.seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{config, Catalog, Creature, GamePlay, GenerationConfig};
    ///
    /// let game = GamePlay::new("PowerMan", Catalog::builtin()?, GenerationConfig::new(1))?;
    /// assert_eq!(game.depth(), 1);
    /// assert_eq!(game.hero().health(), config::HERO_STARTING_HEALTH);
    /// assert!(!game.is_hero_dead());
    /// # Ok::<(), burrow::BurrowError>(())
    /// ```
    pub fn new(
        hero_name: impl Into<String>,
        catalog: Catalog,
        config: GenerationConfig,
    ) -> BurrowResult<Self> {
        let rng = GameRng::new(config.seed);
        Self::with_roller(hero_name, catalog, config, rng)
    }
}

impl<R: Roller> GamePlay<R> {
    /// Starts a new session at depth 1 drawing from `rng`.
    pub fn with_roller(
        hero_name: impl Into<String>,
        catalog: Catalog,
        config: GenerationConfig,
        rng: R,
    ) -> BurrowResult<Self> {
        config.validate()?;
        catalog.validate()?;

        let mut game = Self::empty(hero_name, catalog, config, rng)?;
        game.change_level(1)?;
        log::info!(
            "New session for {} (seed {})",
            game.hero.name(),
            game.config.seed
        );
        Ok(game)
    }

    /// Starts a session on a prepared level with the hero at `hero_at`.
    ///
    /// Nothing else is placed; use [`GamePlay::spawn_monster`] and
    /// [`GamePlay::level_mut`] to furnish the level.
    pub fn on_level(
        hero_name: impl Into<String>,
        catalog: Catalog,
        config: GenerationConfig,
        level: Level,
        hero_at: Position,
        rng: R,
    ) -> BurrowResult<Self> {
        config.validate()?;
        catalog.validate()?;

        let mut game = Self::empty(hero_name, catalog, config, rng)?;
        game.level = level;
        game.depth = 1;
        game.statistics.deepest_level = 1;
        game.place(Occupant::Hero, hero_at)?;
        Ok(game)
    }

    fn empty(
        hero_name: impl Into<String>,
        catalog: Catalog,
        config: GenerationConfig,
        rng: R,
    ) -> BurrowResult<Self> {
        let level = Level::new(config.rows, config.cols)?;
        Ok(Self {
            catalog,
            config,
            level,
            depth: 0,
            hero: Hero::new(hero_name),
            monsters: BTreeMap::new(),
            next_monster_id: 0,
            state: SessionState::Active,
            killer: None,
            statistics: GameStatistics::default(),
            rng,
            events: Vec::new(),
        })
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Mutable access to terrain, floor items and gold.
    ///
    /// Creatures cannot be moved through this handle.
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_hero_dead(&self) -> bool {
        self.state == SessionState::HeroDead
    }

    pub fn has_escaped(&self) -> bool {
        self.state == SessionState::Escaped
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Name of the last creature that attacked anything.
    ///
    /// Set on every attack, hit or miss, so after the hero dies it names the
    /// last monster that swung at the hero.
    pub fn killer(&self) -> Option<&str> {
        self.killer.as_deref()
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    /// Live monsters in registry order.
    pub fn monsters(&self) -> impl Iterator<Item = (MonsterId, &Monster)> {
        self.monsters.iter().map(|(id, monster)| (*id, monster))
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.get(&id)
    }

    /// Mutable access to a live monster; only its health can change.
    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.get_mut(&id)
    }

    pub fn monster_count(&self) -> usize {
        self.monsters.len()
    }

    /// Events produced since the last drain.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Takes all pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Map window of [`config::MAP_SIZE`] centered on the hero.
    pub fn view(&self) -> String {
        let center = self.hero.position().unwrap_or_default();
        self.view_at(center)
    }

    /// Map window of [`config::MAP_SIZE`] centered on `center`.
    pub fn view_at(&self, center: Position) -> String {
        self.level.view(center, config::MAP_SIZE, |occupant| match occupant {
            Occupant::Hero => self.hero.symbol(),
            Occupant::Monster(id) => self.monsters.get(&id).map_or('?', |monster| monster.symbol()),
        })
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Dispatches a single command. Returns whether a turn was taken.
    pub fn apply(&mut self, command: Command) -> BurrowResult<bool> {
        match command {
            Command::Move(direction) => {
                let delta = direction.to_delta();
                self.move_hero(delta.row, delta.col)
            }
            Command::Pass => self.move_hero(0, 0),
            Command::PickUp => self.pick_up(),
            Command::Drop(slot) => self.drop_item(slot),
            Command::Equip(slot) => self.equip_item(slot),
            Command::Descend => self.descend_stairs(),
        }
    }

    /// Moves the hero by one step; `(0, 0)` passes the turn.
    ///
    /// Walking into a monster attacks it instead. Walking into a wall is
    /// refused without giving the monsters a turn, and returns `Ok(false)`.
    pub fn move_hero(&mut self, row_delta: i32, col_delta: i32) -> BurrowResult<bool> {
        self.ensure_active()?;
        if !(-1..=1).contains(&row_delta) || !(-1..=1).contains(&col_delta) {
            return Err(BurrowError::InvalidAction(format!(
                "cannot move by ({}, {})",
                row_delta, col_delta
            )));
        }

        let here = self.hero_position()?;
        let destination = here.offset(row_delta, col_delta);

        if self.level.is_wall(destination) {
            self.events.push(GameEvent::WallInTheWay);
            return Ok(false);
        }

        if destination == here {
            self.events.push(GameEvent::Rested);
            self.monster_phase()?;
            return Ok(true);
        }

        match self.level.occupant_at(destination) {
            Some(Occupant::Monster(id)) => {
                self.fight(Occupant::Hero, Occupant::Monster(id))?;
                self.monster_phase()?;
            }
            Some(Occupant::Hero) => {
                return Err(BurrowError::InvalidState(format!(
                    "hero found at {} while standing at {}",
                    destination, here
                )));
            }
            None => {
                self.relocate(Occupant::Hero, destination)?;
                self.statistics.steps_taken += 1;
                self.describe_arrival(destination);
                self.monster_phase()?;
            }
        }
        Ok(true)
    }

    /// Moves in a compass direction.
    pub fn step(&mut self, direction: Direction) -> BurrowResult<bool> {
        self.apply(Command::Move(direction))
    }

    /// Passes a turn.
    pub fn pass_turn(&mut self) -> BurrowResult<bool> {
        self.move_hero(0, 0)
    }

    /// Gives every live monster one pursuit step or attack.
    pub fn move_monsters(&mut self) -> BurrowResult<()> {
        self.ensure_active()?;
        self.monster_phase()
    }

    /// Resolves one attack between two creatures on the level.
    pub fn initiate_fight(&mut self, attacker: Occupant, defender: Occupant) -> BurrowResult<AttackResult> {
        self.ensure_active()?;
        self.fight(attacker, defender)
    }

    /// Collects the gold and the item under the hero.
    ///
    /// Gold is taken even when the item does not fit. Collecting anything
    /// gives the monsters a turn.
    pub fn pick_up(&mut self) -> BurrowResult<bool> {
        self.ensure_active()?;
        let here = self.hero_position()?;
        let (gold, has_item) = match self.level.cell(here) {
            Some(cell) => (cell.gold(), cell.item().is_some()),
            None => (0, false),
        };

        if gold == 0 && !has_item {
            self.events.push(GameEvent::NothingToPickUp);
            return Ok(false);
        }

        let mut picked_up = false;
        if gold > 0 {
            let amount = self.level.take_gold(here);
            self.hero.add_gold(amount);
            self.statistics.gold_collected += u64::from(amount);
            self.events.push(GameEvent::GoldPickedUp { amount });
            picked_up = true;
        }

        if let Some(item) = self.level.take_item(here) {
            let name = item.name().to_string();
            match self.hero.inventory_mut().add(item) {
                Ok(_) => {
                    self.events.push(GameEvent::ItemPickedUp { name });
                    picked_up = true;
                }
                Err(item) => {
                    self.level.set_item(here, Some(item))?;
                    self.events.push(GameEvent::BackpackFull { name });
                }
            }
        }

        if picked_up {
            self.monster_phase()?;
        }
        Ok(picked_up)
    }

    /// Drops the item in `slot` onto the hero's cell. Takes no time.
    pub fn drop_item(&mut self, slot: usize) -> BurrowResult<bool> {
        self.ensure_active()?;
        let here = self.hero_position()?;

        if self.level.cell(here).is_some_and(|cell| cell.item().is_some()) {
            self.events.push(GameEvent::FloorOccupied);
            return Ok(false);
        }
        let Some(item) = self.hero.inventory_mut().take(slot) else {
            self.events.push(GameEvent::DropSlotEmpty);
            return Ok(false);
        };

        let name = item.name().to_string();
        self.level.set_item(here, Some(item))?;
        self.events.push(GameEvent::ItemDropped { name });
        Ok(true)
    }

    /// Wields or puts on the item in `slot`, swapping out what was equipped.
    pub fn equip_item(&mut self, slot: usize) -> BurrowResult<bool> {
        self.ensure_active()?;
        let event = match self.hero.equip(slot) {
            None => {
                self.events.push(GameEvent::EquipSlotEmpty);
                return Ok(false);
            }
            Some(EquipSlot::Weapon) => GameEvent::Wielded {
                name: self.hero.weapon().map(|w| w.name().to_string()).unwrap_or_default(),
            },
            Some(EquipSlot::Armor) => GameEvent::PutOn {
                name: self.hero.armor().map(|a| a.name().to_string()).unwrap_or_default(),
            },
        };
        self.events.push(event);
        self.monster_phase()?;
        Ok(true)
    }

    /// Takes the staircase under the hero.
    ///
    /// From the bottom level this escapes the dungeon and ends the session;
    /// otherwise a brand new level is generated one deeper.
    pub fn descend_stairs(&mut self) -> BurrowResult<bool> {
        self.ensure_active()?;
        let here = self.hero_position()?;

        if !self.level.cell(here).is_some_and(|cell| cell.has_stairs_down()) {
            self.events.push(GameEvent::NoStairsHere);
            return Ok(false);
        }

        if self.depth >= self.config.max_depth {
            self.events.push(GameEvent::LeavingBottomLevel);
            self.events.push(GameEvent::Escaped);
            self.state = SessionState::Escaped;
            log::info!("{} escaped from depth {}", self.hero.name(), self.depth);
            return Ok(true);
        }

        self.change_level(self.depth + 1)?;
        self.events.push(GameEvent::Descended);
        Ok(true)
    }

    // ---------------------------------------------------------------------
    // Setup helpers
    // ---------------------------------------------------------------------

    /// Places a monster on the level and registers it.
    pub fn spawn_monster(&mut self, monster: Monster, at: Position) -> BurrowResult<MonsterId> {
        let id = MonsterId(self.next_monster_id);
        self.level.place_occupant(at, Occupant::Monster(id))?;
        self.next_monster_id += 1;

        let mut monster = monster;
        monster.set_position(Some(at));
        self.monsters.insert(id, monster);
        Ok(id)
    }

    /// Verifies that every creature and every occupied cell agree.
    pub fn check_occupancy(&self) -> BurrowResult<()> {
        let mismatch = |what: String| Err(BurrowError::InvalidState(what));

        let mut occupied = 0;
        for pos in self.level.positions() {
            let Some(occupant) = self.level.occupant_at(pos) else {
                continue;
            };
            occupied += 1;
            let stored = match occupant {
                Occupant::Hero => self.hero.position(),
                Occupant::Monster(id) => match self.monsters.get(&id) {
                    Some(monster) => monster.position(),
                    None => return mismatch(format!("cell {} holds unknown {}", pos, id)),
                },
            };
            if stored != Some(pos) {
                return mismatch(format!("cell {} holds {:?} stored at {:?}", pos, occupant, stored));
            }
        }

        let mut expected = self.monsters.len();
        if !self.is_hero_dead() {
            expected += 1;
        }
        if occupied != expected {
            return mismatch(format!(
                "{} occupied cells for {} live creatures",
                occupied, expected
            ));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn ensure_active(&self) -> BurrowResult<()> {
        if self.state.is_terminal() {
            return Err(BurrowError::SessionEnded);
        }
        Ok(())
    }

    fn hero_position(&self) -> BurrowResult<Position> {
        self.hero
            .position()
            .ok_or_else(|| BurrowError::InvalidState("hero is not on the level".to_string()))
    }

    fn creature(&self, occupant: Occupant) -> BurrowResult<&dyn Creature> {
        match occupant {
            Occupant::Hero => Ok(&self.hero),
            Occupant::Monster(id) => self
                .monsters
                .get(&id)
                .map(|monster| monster as &dyn Creature)
                .ok_or_else(|| BurrowError::InvalidAction(format!("{} is not alive", id))),
        }
    }

    fn set_position(&mut self, occupant: Occupant, position: Option<Position>) {
        match occupant {
            Occupant::Hero => self.hero.set_position(position),
            Occupant::Monster(id) => {
                if let Some(monster) = self.monsters.get_mut(&id) {
                    monster.set_position(position);
                }
            }
        }
    }

    /// Puts a creature that is not on the level yet into a cell.
    fn place(&mut self, occupant: Occupant, at: Position) -> BurrowResult<()> {
        self.level.place_occupant(at, occupant)?;
        self.set_position(occupant, Some(at));
        Ok(())
    }

    /// Moves a creature between cells, updating both cells and its position.
    fn relocate(&mut self, occupant: Occupant, to: Position) -> BurrowResult<()> {
        let from = self.creature(occupant)?.position();
        if from == Some(to) {
            return Ok(());
        }
        self.level.place_occupant(to, occupant)?;
        if let Some(from) = from {
            self.level.clear_occupant(from);
        }
        self.set_position(occupant, Some(to));
        Ok(())
    }

    fn describe_arrival(&mut self, at: Position) {
        let Some(cell) = self.level.cell(at) else {
            return;
        };
        if cell.gold() > 0 {
            self.events.push(GameEvent::GoldSighted { amount: cell.gold() });
        }
        if let Some(item) = cell.item() {
            self.events.push(GameEvent::ItemSighted {
                name: item.name().to_string(),
            });
            if self.hero.has_item(item) {
                self.events.push(GameEvent::AlreadyOwned);
            }
        }
        if cell.has_stairs_down() {
            self.events.push(GameEvent::StairsSighted);
        }
    }

    fn fight(&mut self, attacker: Occupant, defender: Occupant) -> BurrowResult<AttackResult> {
        if attacker == defender {
            return Err(BurrowError::InvalidAction(format!(
                "{:?} cannot attack itself",
                attacker
            )));
        }
        let attacker_name = self.creature(attacker)?.display_name();
        let defender_name = self.creature(defender)?.display_name();
        self.killer = Some(self.creature(attacker)?.name().to_string());
        self.events.push(GameEvent::AttackStarted {
            attacker: attacker_name.clone(),
            defender: defender_name.clone(),
        });

        let result = match (attacker, defender) {
            (Occupant::Hero, Occupant::Monster(id)) => {
                let monster = self
                    .monsters
                    .get_mut(&id)
                    .ok_or_else(|| BurrowError::InvalidAction(format!("{} is not alive", id)))?;
                resolve_attack(&self.hero, monster, &mut self.rng)
            }
            (Occupant::Monster(id), Occupant::Hero) => {
                let monster = self
                    .monsters
                    .get(&id)
                    .ok_or_else(|| BurrowError::InvalidAction(format!("{} is not alive", id)))?;
                resolve_attack(monster, &mut self.hero, &mut self.rng)
            }
            (Occupant::Monster(a), Occupant::Monster(b)) => {
                let attacker = self
                    .monsters
                    .get(&a)
                    .cloned()
                    .ok_or_else(|| BurrowError::InvalidAction(format!("{} is not alive", a)))?;
                let monster = self
                    .monsters
                    .get_mut(&b)
                    .ok_or_else(|| BurrowError::InvalidAction(format!("{} is not alive", b)))?;
                resolve_attack(&attacker, monster, &mut self.rng)
            }
            (Occupant::Hero, Occupant::Hero) => {
                return Err(BurrowError::InvalidAction(
                    "the hero cannot attack itself".to_string(),
                ))
            }
        };

        let (armor, health, dead) = {
            let target = self.creature(defender)?;
            (target.armor_class(), target.health(), target.is_dead())
        };
        self.events.extend(GameEvent::describe_attack(
            &attacker_name,
            &defender_name,
            &result,
            armor,
            health,
        ));

        let dealt = u64::try_from(result.damage_dealt()).unwrap_or(0);
        match (attacker, defender) {
            (Occupant::Hero, _) => self.statistics.damage_dealt += dealt,
            (_, Occupant::Hero) => self.statistics.damage_taken += dealt,
            _ => {}
        }

        if dead {
            self.events.push(GameEvent::Killed {
                name: defender_name,
            });
            self.remove_dead(attacker, defender)?;
        }
        Ok(result)
    }

    fn remove_dead(&mut self, attacker: Occupant, defender: Occupant) -> BurrowResult<()> {
        if let Some(at) = self.creature(defender)?.position() {
            self.level.clear_occupant(at);
        }
        match defender {
            Occupant::Monster(id) => {
                if let Some(monster) = self.monsters.remove(&id) {
                    log::debug!("{} ({}) killed", monster.name(), id);
                }
                if attacker == Occupant::Hero {
                    self.statistics.monsters_killed += 1;
                }
            }
            Occupant::Hero => {
                self.state = SessionState::HeroDead;
                log::info!(
                    "{} was killed by {} on depth {}",
                    self.hero.name(),
                    self.killer.as_deref().unwrap_or("something"),
                    self.depth
                );
            }
        }
        Ok(())
    }

    /// Each live monster, in registry order, steps toward or attacks the hero.
    /// The phase stops as soon as the hero dies.
    fn monster_phase(&mut self) -> BurrowResult<()> {
        self.statistics.turns += 1;
        let ids: Vec<MonsterId> = self.monsters.keys().copied().collect();

        for id in ids {
            if self.state.is_terminal() {
                break;
            }
            let Some(monster) = self.monsters.get(&id) else {
                continue;
            };
            if monster.is_dead() {
                continue;
            }
            let Some(from) = monster.position() else {
                continue;
            };
            let target = self.hero_position()?;

            let step = suggest_move(&self.level, from, target);
            if self.level.occupant_at(step) == Some(Occupant::Hero) {
                self.fight(Occupant::Monster(id), Occupant::Hero)?;
            } else if step != from {
                self.relocate(Occupant::Monster(id), step)?;
            }
        }
        Ok(())
    }

    /// Replaces the level with a freshly generated and populated one.
    ///
    /// If population fails the previous level, registry and hero position
    /// are put back, so the session stays playable where it was.
    fn change_level(&mut self, depth: u32) -> BurrowResult<()> {
        let generated = RoomCorridorGenerator::new().generate(&self.config, &mut self.rng)?;
        let previous_level = std::mem::replace(&mut self.level, generated.level);
        let previous_monsters = std::mem::take(&mut self.monsters);
        let previous_position = self.hero.position();
        let previous_next_id = self.next_monster_id;
        let previous_depth = std::mem::replace(&mut self.depth, depth);
        self.hero.set_position(None);

        if let Err(err) = self.populate_level() {
            log::warn!("Could not populate depth {}: {}", depth, err);
            self.level = previous_level;
            self.monsters = previous_monsters;
            self.hero.set_position(previous_position);
            self.next_monster_id = previous_next_id;
            self.depth = previous_depth;
            return Err(err);
        }

        self.statistics.deepest_level = self.statistics.deepest_level.max(depth);
        log::info!(
            "Entered depth {} with {} monsters",
            self.depth,
            self.monsters.len()
        );
        Ok(())
    }

    /// Places the hero, monsters, the staircase, items and gold, in that order.
    fn populate_level(&mut self) -> BurrowResult<()> {
        let attempts = self.config.empty_tile_attempts;

        let spot = self.level.empty_tile(&mut self.rng, attempts)?;
        self.place(Occupant::Hero, spot)?;

        let monster_count = self
            .rng
            .range(self.config.min_monsters, self.config.max_monsters);
        for _ in 0..monster_count {
            let monster = self.catalog.generate_monster(&mut self.rng)?;
            let spot = self.level.empty_tile(&mut self.rng, attempts)?;
            self.spawn_monster(monster, spot)?;
        }

        let spot = self.level.empty_tile(&mut self.rng, attempts)?;
        self.level.set_terrain(spot, Terrain::StairsDown)?;

        let item_count = self.rng.range(self.config.min_items, self.config.max_items);
        for _ in 0..item_count {
            let spot = self.level.empty_tile(&mut self.rng, attempts)?;
            let item = self.catalog.generate_item(&mut self.rng)?;
            self.level.set_item(spot, Some(item))?;
        }

        let gold_count = self
            .rng
            .range(self.config.min_gold_piles, self.config.max_gold_piles);
        for _ in 0..gold_count {
            let spot = self.level.empty_tile(&mut self.rng, attempts)?;
            let amount = generate_gold(self.depth, &mut self.rng);
            self.level.set_gold(spot, amount)?;
        }

        log::debug!(
            "Populated depth {}: {} monsters, {} items, {} gold piles",
            self.depth,
            monster_count,
            item_count,
            gold_count
        );
        Ok(())
    }
}

impl<R: Roller + Serialize> GamePlay<R> {
    /// Serializes the whole session except pending events.
    pub fn save_to_json(&self) -> BurrowResult<String> {
        serde_json::to_string_pretty(self).map_err(BurrowError::from)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> BurrowResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.save_to_json()?)?;
        log::info!("Saved {} to {}", self.hero.name(), path.display());
        Ok(())
    }
}

impl<R: Roller + DeserializeOwned> GamePlay<R> {
    /// Restores a session and checks its occupancy invariant.
    pub fn load_from_json(json: &str) -> BurrowResult<Self> {
        let game: Self = serde_json::from_str(json)?;
        if let Err(err) = game.check_occupancy() {
            log::warn!("Rejected saved game: {}", err);
            return Err(err);
        }
        Ok(game)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> BurrowResult<Self> {
        let path = path.as_ref();
        let game = Self::load_from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} from {}", game.hero.name(), path.display());
        Ok(game)
    }
}
