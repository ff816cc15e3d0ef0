//! # Dungeon Generation
//!
//! Room-and-corridor carving into an all-wall grid.
//!
//! Rooms are placed at random without collision checks, so they may overlap.
//! From the second room on, each new room is joined by an L-shaped corridor
//! to one randomly chosen earlier room. That gives every room a direct link to
//! at least one other room; nothing stronger is promised.

use crate::game::{Level, Position};
use crate::generation::{GenerationConfig, Generator, Room};
use crate::utils::Roller;
use crate::{BurrowError, BurrowResult};

/// A freshly carved level together with the rooms that shaped it.
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    pub level: Level,
    /// Rooms in carving order
    pub rooms: Vec<Room>,
}

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// # Examples
///
/// ```
/// use burrow::{GameRng, GenerationConfig, Generator, RoomCorridorGenerator};
///
/// let config = GenerationConfig::for_testing(5);
/// let mut rng = GameRng::new(config.seed);
/// let generated = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();
/// assert_eq!(generated.level.rows(), config.rows);
/// assert!(!generated.rooms.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoomCorridorGenerator;

impl RoomCorridorGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Picks a room size and an anchor that keeps it clear of the border.
    fn define_room(&self, config: &GenerationConfig, rng: &mut dyn Roller) -> Room {
        let max_height = config.room_max_height.min(config.rows - 2);
        let max_width = config.room_max_width.min(config.cols - 2);
        let height = rng.range(config.room_min_height.min(max_height), max_height);
        let width = rng.range(config.room_min_width.min(max_width), max_width);

        let top = rng.range(1, config.rows - height - 1);
        let left = rng.range(1, config.cols - width - 1);
        Room::new(Position::new(top, left), height, width)
    }

    fn carve_room(&self, level: &mut Level, room: &Room) -> BurrowResult<()> {
        for pos in room.positions() {
            level.carve(pos)?;
        }
        Ok(())
    }

    fn carve_row(&self, level: &mut Level, row: i32, from_col: i32, to_col: i32) -> BurrowResult<()> {
        for col in from_col.min(to_col)..=from_col.max(to_col) {
            level.carve(Position::new(row, col))?;
        }
        Ok(())
    }

    fn carve_column(&self, level: &mut Level, col: i32, from_row: i32, to_row: i32) -> BurrowResult<()> {
        for row in from_row.min(to_row)..=from_row.max(to_row) {
            level.carve(Position::new(row, col))?;
        }
        Ok(())
    }

    /// Carves an L-shaped corridor between random cells of two rooms.
    ///
    /// A coin flip picks the elbow: along the target's row then the new
    /// room's column, or along the new room's row then the target's column.
    fn connect(
        &self,
        level: &mut Level,
        target: &Room,
        room: &Room,
        rng: &mut dyn Roller,
    ) -> BurrowResult<()> {
        let from = target.random_position(rng);
        let to = room.random_position(rng);

        if rng.coin() {
            self.carve_row(level, from.row, from.col, to.col)?;
            self.carve_column(level, to.col, from.row, to.row)
        } else {
            self.carve_row(level, to.row, from.col, to.col)?;
            self.carve_column(level, from.col, from.row, to.row)
        }
    }
}

impl Generator<GeneratedLevel> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut dyn Roller) -> BurrowResult<GeneratedLevel> {
        config.validate()?;
        let mut level = Level::new(config.rows, config.cols)?;

        let room_count = rng.range(config.min_rooms, config.max_rooms);
        let mut rooms: Vec<Room> = Vec::with_capacity(room_count.max(0) as usize);

        for i in 0..room_count as usize {
            let room = self.define_room(config, rng);
            self.carve_room(&mut level, &room)?;

            if i > 0 {
                let target = rooms[rng.below(i)];
                self.connect(&mut level, &target, &room, rng)?;
            }
            rooms.push(room);
        }

        log::debug!(
            "Carved {} rooms into a {}x{} level",
            rooms.len(),
            config.rows,
            config.cols
        );
        Ok(GeneratedLevel { level, rooms })
    }

    fn validate(&self, content: &GeneratedLevel, config: &GenerationConfig) -> BurrowResult<()> {
        let level = &content.level;
        if level.rows() != config.rows || level.cols() != config.cols {
            return Err(BurrowError::InvalidState(format!(
                "level is {}x{}, expected {}x{}",
                level.rows(),
                level.cols(),
                config.rows,
                config.cols
            )));
        }

        let on_border = |pos: Position| {
            pos.row == 0 || pos.col == 0 || pos.row == level.rows() - 1 || pos.col == level.cols() - 1
        };
        if let Some(pos) = level.positions().find(|pos| on_border(*pos) && !level.is_wall(*pos)) {
            return Err(BurrowError::InvalidState(format!("border cell {} is not a wall", pos)));
        }

        for (index, room) in content.rooms.iter().enumerate() {
            if room.positions().into_iter().any(|pos| level.is_wall(pos) || on_border(pos)) {
                return Err(BurrowError::InvalidState(format!("room {} is not fully carved", index)));
            }
            if content.rooms.len() < 2 {
                continue;
            }
            let reachable = level.reachable_from(room.top_left);
            let linked = content
                .rooms
                .iter()
                .enumerate()
                .any(|(other, r)| other != index && reachable.contains(&r.top_left));
            if !linked {
                return Err(BurrowError::InvalidState(format!(
                    "room {} is not connected to any other room",
                    index
                )));
            }
        }
        Ok(())
    }
}
