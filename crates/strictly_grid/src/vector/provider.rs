//! Whole-board line enumeration.

use super::direction::Direction;
use super::points::{Depth, walk_ordinals};
use crate::board::Board;
use crate::error::GridResult;
use crate::item::{Item, Occupant};
use crate::types::Point;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// One line on the board: an ordered snapshot of points and occupants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
    direction: Direction,
    cells: Vec<(Point, Option<Item>)>,
}

impl Vector {
    /// Builds a vector from ordered cells.
    pub fn new(direction: Direction, cells: Vec<(Point, Option<Item>)>) -> Self {
        Self { direction, cells }
    }

    /// Direction the line was walked in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a line without cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Ordered cells.
    pub fn cells(&self) -> &[(Point, Option<Item>)] {
        &self.cells
    }

    /// Ordered points.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.cells.iter().map(|(point, _)| point)
    }

    /// Whether the line passes through `point`.
    pub fn contains(&self, point: &Point) -> bool {
        self.cells.iter().any(|(p, _)| p == point)
    }

    /// Occupant at `point`; `None` if the point is not on this line.
    pub fn get(&self, point: &Point) -> Option<Option<&Item>> {
        self.cells
            .iter()
            .find(|(p, _)| p == point)
            .map(|(_, item)| item.as_ref())
    }

    /// Render token at `index`, `None` for an empty cell.
    pub fn token_at(&self, index: usize) -> Option<&str> {
        self.cells.get(index)?.1.as_ref().map(Occupant::token)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|(_, item)| item.is_some()).count()
    }

    /// Points with no occupant, in line order.
    pub fn empty_points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.cells
            .iter()
            .filter(|(_, item)| item.is_none())
            .map(|(point, _)| point)
    }
}

/// Enumerates every maximal line for a set of directions.
///
/// Occupants are read from the board on each call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorProvider {
    directions: Vec<Direction>,
}

impl VectorProvider {
    /// Provider for a single direction.
    pub fn new(direction: Direction) -> Self {
        Self {
            directions: vec![direction],
        }
    }

    /// Back diagonals followed by forward diagonals.
    pub fn diagonals() -> Self {
        Self {
            directions: vec![Direction::BackDiagonal, Direction::ForwardDiagonal],
        }
    }

    /// Rows, columns, back diagonals, forward diagonals.
    pub fn all() -> Self {
        Self {
            directions: Direction::iter().collect(),
        }
    }

    /// Directions in output order.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Start point of every line, in output order.
    pub fn start_points(&self, board: &Board) -> GridResult<Vec<Point>> {
        let (width, height) = (board.axis_x().size(), board.axis_y().size());
        self.directions
            .iter()
            .flat_map(|direction| direction.start_ordinals(width, height))
            .map(|(x, y)| board.point_at(x, y))
            .collect()
    }

    /// Materializes every line with the board's current occupants.
    #[instrument(skip_all, fields(board = %board.id(), directions = self.directions.len()))]
    pub fn provide(&self, board: &Board) -> GridResult<Vec<Vector>> {
        let mut vectors = Vec::new();
        for direction in &self.directions {
            vectors.extend(lines(board, *direction)?);
        }
        debug!(count = vectors.len(), "Provided vectors");
        Ok(vectors)
    }

    /// Iterates the lines of [`VectorProvider::provide`] in the same order.
    ///
    /// Occupants are snapshotted up front, so later board changes do not
    /// show up in a running iteration.
    pub fn iter(&self, board: &Board) -> GridResult<impl Iterator<Item = Vector> + use<>> {
        Ok(self.provide(board)?.into_iter())
    }
}

/// Every maximal line of one direction.
pub fn lines(board: &Board, direction: Direction) -> GridResult<Vec<Vector>> {
    let (width, height) = (board.axis_x().size(), board.axis_y().size());
    direction
        .start_ordinals(width, height)
        .into_iter()
        .map(|start| {
            let cells = walk_ordinals(start, direction, width, height, Depth::Unbounded)
                .into_iter()
                .map(|(x, y)| Ok((board.point_at(x, y)?, board.get_at(x, y).cloned())))
                .collect::<GridResult<Vec<_>>>()?;
            Ok(Vector::new(direction, cells))
        })
        .collect()
}
