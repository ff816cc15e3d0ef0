//! # Pursuit
//!
//! Greedy single-step movement used by monsters to close in on the hero.
//!
//! There is no path memory and no search: each turn a monster looks at its
//! eight neighbours and takes the one closest to the target. It can get stuck
//! behind concave walls.

use crate::game::{Level, Occupant, Position};

/// Picks the next cell for a monster at `from` chasing `target`.
///
/// Neighbours are scanned row by row from the north-west corner; the first
/// neighbour with the smallest squared distance to `target` wins. Walls and
/// cells holding a monster are skipped, while the hero's cell is a valid
/// choice and means "attack". The current cell is only kept when every
/// neighbour is blocked, so a monster with its closer neighbours blocked may
/// step to a farther free one.
///
/// # Examples
///
/// ```
/// use burrow::{suggest_move, Level, Position};
///
/// let mut level = Level::new(5, 5).unwrap();
/// for row in 1..4 {
///     for col in 1..4 {
///         level.carve(Position::new(row, col)).unwrap();
///     }
/// }
/// let step = suggest_move(&level, Position::new(1, 1), Position::new(3, 3));
/// assert_eq!(step, Position::new(2, 2));
/// ```
pub fn suggest_move(level: &Level, from: Position, target: Position) -> Position {
    let mut best = from;
    let mut best_distance = i32::MAX;

    for candidate in from.adjacent_positions() {
        if level.is_wall(candidate) {
            continue;
        }
        if matches!(level.occupant_at(candidate), Some(Occupant::Monster(_))) {
            continue;
        }
        let distance = candidate.distance_squared(target);
        if distance < best_distance {
            best_distance = distance;
            best = candidate;
        }
    }

    best
}
