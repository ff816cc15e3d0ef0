//! # World
//!
//! The level grid: terrain, occupancy, floor items and gold.
//!
//! A [`Level`] is a fixed `rows x cols` array of [`Cell`]s. Cells hold a
//! non-owning [`Occupant`] reference; the creatures themselves live in the
//! session. Occupancy mutators are crate-private so that only the turn engine,
//! which also owns creature positions, can move creatures around.

use crate::game::{Item, MonsterId, Position};
use crate::utils::Roller;
use crate::{BurrowError, BurrowResult};
use pathfinding::prelude::bfs_reach;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Map symbols for terrain and gold.
pub mod symbols {
    pub const FLOOR: char = '.';
    pub const WALL: char = '#';
    pub const STAIRS_DOWN: char = '>';
    pub const GOLD: char = '$';
    pub const OFF_MAP: char = ' ';
}

/// Terrain feature of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Wall,
    Floor,
    StairsDown,
}

/// Which creature stands in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Hero,
    Monster(MonsterId),
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    terrain: Terrain,
    occupant: Option<Occupant>,
    item: Option<Item>,
    gold: u32,
}

impl Cell {
    fn wall() -> Self {
        Self {
            terrain: Terrain::Wall,
            occupant: None,
            item: None,
            gold: 0,
        }
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn is_wall(&self) -> bool {
        self.terrain == Terrain::Wall
    }

    pub fn has_stairs_down(&self) -> bool {
        self.terrain == Terrain::StairsDown
    }

    /// Plain floor with neither creature nor item. Gold does not count.
    pub fn is_empty(&self) -> bool {
        self.terrain == Terrain::Floor && self.occupant.is_none() && self.item.is_none()
    }

    /// Display symbol. `creature_symbol` resolves the occupant, if any.
    ///
    /// Precedence: wall, creature, item, gold, stairs, floor.
    pub fn symbol(&self, creature_symbol: impl Fn(Occupant) -> char) -> char {
        if self.is_wall() {
            symbols::WALL
        } else if let Some(occupant) = self.occupant {
            creature_symbol(occupant)
        } else if let Some(item) = &self.item {
            item.symbol()
        } else if self.gold > 0 {
            symbols::GOLD
        } else if self.has_stairs_down() {
            symbols::STAIRS_DOWN
        } else {
            symbols::FLOOR
        }
    }
}

/// One dungeon level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

impl Level {
    /// Creates a level where every cell is wall.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Level, Position};
    ///
    /// let level = Level::new(10, 20).unwrap();
    /// assert_eq!(level.rows(), 10);
    /// assert!(level.cell(Position::new(4, 4)).unwrap().is_wall());
    /// ```
    pub fn new(rows: i32, cols: i32) -> BurrowResult<Self> {
        let size = match rows.checked_mul(cols) {
            Some(size) if rows > 0 && cols > 0 => size as usize,
            _ => return Err(BurrowError::InvalidDimensions { rows, cols }),
        };
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::wall(); size],
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.row * self.cols + pos.col) as usize)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|index| &self.cells[index])
    }

    fn cell_mut(&mut self, pos: Position) -> BurrowResult<&mut Cell> {
        match self.index(pos) {
            Some(index) => Ok(&mut self.cells[index]),
            None => Err(BurrowError::InvalidAction(format!(
                "position {} is outside the level",
                pos
            ))),
        }
    }

    /// Every position of the level in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Wall check that treats anything off the map as wall.
    pub fn is_wall(&self, pos: Position) -> bool {
        self.cell(pos).map_or(true, Cell::is_wall)
    }

    pub fn occupant_at(&self, pos: Position) -> Option<Occupant> {
        self.cell(pos).and_then(Cell::occupant)
    }

    /// Turns a cell into open floor.
    pub fn carve(&mut self, pos: Position) -> BurrowResult<()> {
        self.cell_mut(pos)?.terrain = Terrain::Floor;
        Ok(())
    }

    /// Changes a cell's terrain.
    ///
    /// Walls cannot be raised under a creature or item, and stairs cannot be
    /// dug into a wall; carve the cell first.
    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) -> BurrowResult<()> {
        let cell = self.cell_mut(pos)?;
        match terrain {
            Terrain::Wall if cell.occupant.is_some() || cell.item.is_some() || cell.gold > 0 => {
                Err(BurrowError::InvalidAction(format!(
                    "cannot wall up occupied cell {}",
                    pos
                )))
            }
            Terrain::StairsDown if cell.is_wall() => Err(BurrowError::InvalidAction(format!(
                "cannot place stairs inside the wall at {}",
                pos
            ))),
            _ => {
                cell.terrain = terrain;
                Ok(())
            }
        }
    }

    /// Replaces the floor item of a cell, returning the previous one.
    pub fn set_item(&mut self, pos: Position, item: Option<Item>) -> BurrowResult<Option<Item>> {
        let cell = self.cell_mut(pos)?;
        if item.is_some() && cell.is_wall() {
            return Err(BurrowError::InvalidAction(format!(
                "cannot place an item inside the wall at {}",
                pos
            )));
        }
        Ok(std::mem::replace(&mut cell.item, item))
    }

    /// Removes and returns the floor item of a cell.
    pub fn take_item(&mut self, pos: Position) -> Option<Item> {
        self.cell_mut(pos).ok().and_then(|cell| cell.item.take())
    }

    /// Sets the gold pile of a cell.
    pub fn set_gold(&mut self, pos: Position, amount: u32) -> BurrowResult<()> {
        let cell = self.cell_mut(pos)?;
        if amount > 0 && cell.is_wall() {
            return Err(BurrowError::InvalidAction(format!(
                "cannot place gold inside the wall at {}",
                pos
            )));
        }
        cell.gold = amount;
        Ok(())
    }

    /// Removes and returns the gold pile of a cell.
    pub fn take_gold(&mut self, pos: Position) -> u32 {
        self.cell_mut(pos)
            .map(|cell| std::mem::take(&mut cell.gold))
            .unwrap_or(0)
    }

    pub(crate) fn place_occupant(&mut self, pos: Position, occupant: Occupant) -> BurrowResult<()> {
        let cell = self.cell_mut(pos)?;
        if cell.is_wall() {
            return Err(BurrowError::InvalidAction(format!(
                "cannot place a creature inside the wall at {}",
                pos
            )));
        }
        if let Some(existing) = cell.occupant {
            return Err(BurrowError::InvalidAction(format!(
                "cell {} is already occupied by {:?}",
                pos, existing
            )));
        }
        cell.occupant = Some(occupant);
        Ok(())
    }

    pub(crate) fn clear_occupant(&mut self, pos: Position) -> Option<Occupant> {
        self.cell_mut(pos).ok().and_then(|cell| cell.occupant.take())
    }

    /// Samples random cells until one is [`Cell::is_empty`].
    ///
    /// Gives up with [`BurrowError::LevelFull`] after `attempts` draws.
    pub fn empty_tile(&self, rng: &mut dyn Roller, attempts: u32) -> BurrowResult<Position> {
        for _ in 0..attempts {
            let pos = Position::new(rng.range(0, self.rows - 1), rng.range(0, self.cols - 1));
            if self.cell(pos).is_some_and(Cell::is_empty) {
                return Ok(pos);
            }
        }
        log::warn!(
            "No empty tile found on {}x{} level after {} attempts",
            self.rows,
            self.cols,
            attempts
        );
        Err(BurrowError::LevelFull { attempts })
    }

    /// All passable cells reachable from `start` by king moves.
    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        if self.is_wall(start) {
            return HashSet::new();
        }
        bfs_reach(start, |pos: &Position| {
            pos.adjacent_positions()
                .into_iter()
                .filter(|next| !self.is_wall(*next))
                .collect::<Vec<_>>()
        })
        .collect()
    }

    /// Square window of `size x size` symbols centered on `center`.
    ///
    /// Rows are separated and terminated by `'\n'`; cells off the map render
    /// as blanks.
    pub fn view(&self, center: Position, size: i32, creature_symbol: impl Fn(Occupant) -> char) -> String {
        let size = size.max(0);
        let mut out = String::with_capacity((size * (size + 1)) as usize);
        for i in 0..size {
            for j in 0..size {
                let pos = Position::new(center.row - size / 2 + i, center.col - size / 2 + j);
                match self.cell(pos) {
                    Some(cell) => out.push(cell.symbol(&creature_symbol)),
                    None => out.push(symbols::OFF_MAP),
                }
            }
            out.push('\n');
        }
        out
    }
}
