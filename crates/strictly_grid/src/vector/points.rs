//! Lazy coordinate walks along one direction.

use super::direction::Direction;
use crate::board::Board;
use crate::error::{GridErrorKind, GridResult};
use crate::item::BoardId;
use crate::types::Point;
use tracing::{instrument, trace};

/// How far a walk goes beyond its start point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Depth {
    /// Exactly this many steps; a walk that hits the edge first yields nothing.
    Steps(usize),
    /// Until the board edge. Always contains at least the start point.
    #[default]
    Unbounded,
}

impl Depth {
    /// Maps the signed convention where any negative value means unbounded.
    pub fn from_signed(depth: i64) -> Self {
        usize::try_from(depth).map_or(Depth::Unbounded, Depth::Steps)
    }

    fn max_points(self) -> Option<usize> {
        match self {
            Depth::Steps(steps) => steps.checked_add(1),
            Depth::Unbounded => None,
        }
    }
}

/// Iterator over ordinal pairs along a direction.
#[derive(Debug, Clone)]
pub struct LineWalk {
    cursor: Option<(usize, usize)>,
    direction: Direction,
    width: usize,
    height: usize,
    remaining: Option<usize>,
}

impl LineWalk {
    /// Starts a walk at `start` inside a `width` x `height` grid.
    pub fn new(
        start: (usize, usize),
        direction: Direction,
        width: usize,
        height: usize,
        depth: Depth,
    ) -> Self {
        let inside = start.0 < width && start.1 < height;
        Self {
            cursor: inside.then_some(start),
            direction,
            width,
            height,
            remaining: depth.max_points(),
        }
    }
}

impl Iterator for LineWalk {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }
        let current = self.cursor?;
        self.cursor = self.direction.step(current, self.width, self.height);
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(current)
    }
}

/// Walks ordinals from `start` with the exact-length rule applied.
pub fn walk_ordinals(
    start: (usize, usize),
    direction: Direction,
    width: usize,
    height: usize,
    depth: Depth,
) -> Vec<(usize, usize)> {
    let ordinals: Vec<_> = LineWalk::new(start, direction, width, height, depth).collect();
    match depth.max_points() {
        Some(wanted) if ordinals.len() < wanted => Vec::new(),
        _ => ordinals,
    }
}

/// Generates the labelled point sequence of one line.
///
/// Remembers the last computed walk and returns it again while the board
/// and start point stay the same. Only coordinates are cached, so occupant
/// changes never invalidate it.
#[derive(Debug, Clone)]
pub struct VectorPoints {
    direction: Direction,
    depth: Depth,
    cache: Option<(BoardId, Point, Vec<Point>)>,
}

impl VectorPoints {
    /// Generator for `direction` walking `depth` steps.
    pub fn new(direction: Direction, depth: Depth) -> Self {
        Self {
            direction,
            depth,
            cache: None,
        }
    }

    /// Unbounded generator for `direction`.
    pub fn unbounded(direction: Direction) -> Self {
        Self::new(direction, Depth::Unbounded)
    }

    /// Walk direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Requested depth.
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Returns the points from `start` along the direction.
    ///
    /// # Errors
    ///
    /// Returns `VectorStart` wrapping the axis error if `start` is outside
    /// the board.
    #[instrument(skip(self, board, start), fields(direction = %self.direction, start = %start))]
    pub fn points(&mut self, board: &Board, start: &Point) -> GridResult<Vec<Point>> {
        if let Some((board_id, cached_start, points)) = &self.cache {
            if *board_id == board.id() && cached_start == start {
                trace!("Reusing cached walk");
                return Ok(points.clone());
            }
        }
        let points = compute(board, start, self.direction, self.depth)?;
        self.cache = Some((board.id(), start.clone(), points.clone()));
        Ok(points)
    }
}

/// Computes the point sequence without caching.
pub fn compute(board: &Board, start: &Point, direction: Direction, depth: Depth) -> GridResult<Vec<Point>> {
    let origin = board
        .ordinals(start)
        .map_err(|err| GridErrorKind::VectorStart(Box::new(err.kind)))?;
    walk_ordinals(
        origin,
        direction,
        board.axis_x().size(),
        board.axis_y().size(),
        depth,
    )
    .into_iter()
    .map(|(x, y)| board.point_at(x, y))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::error::ErrorCategory;

    fn board() -> Board {
        Board::new(Axis::letters(5).unwrap(), Axis::one_based(4).unwrap())
    }

    #[test]
    fn test_depth_zero_is_start() {
        let board = board();
        let mut points = VectorPoints::new(Direction::BackDiagonal, Depth::Steps(0));
        assert_eq!(points.points(&board, &Point::new("e", 4)).unwrap(), vec![Point::new("e", 4)]);
    }

    #[test]
    fn test_bounded_walk_exact_or_empty() {
        let board = board();
        let mut points = VectorPoints::new(Direction::Horizontal, Depth::Steps(1));
        assert_eq!(
            points.points(&board, &Point::new("a", 1)).unwrap(),
            vec![Point::new("a", 1), Point::new("b", 1)]
        );
        assert!(points.points(&board, &Point::new("e", 1)).unwrap().is_empty());
    }

    #[test]
    fn test_unbounded_diagonals() {
        let board = board();
        let back = compute(&board, &Point::new("b", 1), Direction::BackDiagonal, Depth::Unbounded).unwrap();
        assert_eq!(
            back,
            vec![
                Point::new("b", 1),
                Point::new("c", 2),
                Point::new("d", 3),
                Point::new("e", 4)
            ]
        );
        let forward =
            compute(&board, &Point::new("c", 2), Direction::ForwardDiagonal, Depth::Unbounded).unwrap();
        assert_eq!(
            forward,
            vec![Point::new("c", 2), Point::new("b", 3), Point::new("a", 4)]
        );
    }

    #[test]
    fn test_unbounded_dominates_bounded() {
        let board = board();
        let start = Point::new("a", 1);
        let full = compute(&board, &start, Direction::BackDiagonal, Depth::Unbounded).unwrap();
        for steps in 0..full.len() {
            let bounded = compute(&board, &start, Direction::BackDiagonal, Depth::Steps(steps)).unwrap();
            assert_eq!(bounded.len(), steps + 1);
            assert!(full.len() >= bounded.len());
        }
        assert!(compute(&board, &start, Direction::BackDiagonal, Depth::Steps(full.len()))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_start_outside_board() {
        let board = board();
        let err = compute(&board, &Point::new("z", 1), Direction::Vertical, Depth::Unbounded).unwrap_err();
        assert!(matches!(err.kind, GridErrorKind::VectorStart(_)));
        assert_eq!(err.category(), ErrorCategory::OutOfRange);
    }

    #[test]
    fn test_from_signed() {
        assert_eq!(Depth::from_signed(-1), Depth::Unbounded);
        assert_eq!(Depth::from_signed(2), Depth::Steps(2));
    }
}
