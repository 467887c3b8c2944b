//! Splits board lines into runs one mark can still use.

use crate::board::Board;
use crate::error::GridResult;
use crate::item::{BoardId, Occupant};
use crate::types::Mark;
use crate::vector::{Vector, VectorProvider};
use tracing::{debug, instrument, trace};

/// Splits `line` into maximal runs of cells that are empty or carry `token`.
///
/// A cell holding any other token ends the current run. Runs shorter than
/// `cnt_in_row` are dropped, and a line shorter than `cnt_in_row` yields nothing.
#[instrument(level = "trace", skip(line), fields(direction = %line.direction(), len = line.len()))]
pub fn split_runs(line: &Vector, token: &str, cnt_in_row: usize) -> Vec<Vector> {
    let mut runs = Vec::new();
    if line.len() < cnt_in_row {
        return runs;
    }
    let mut current = Vec::new();
    for (point, item) in line.cells() {
        let usable = item.as_ref().is_none_or(|item| item.token() == token);
        if usable {
            current.push((point.clone(), item.clone()));
            continue;
        }
        if !current.is_empty() && current.len() >= cnt_in_row {
            runs.push(Vector::new(line.direction(), std::mem::take(&mut current)));
        } else {
            current.clear();
        }
    }
    if !current.is_empty() && current.len() >= cnt_in_row {
        runs.push(Vector::new(line.direction(), current));
    }
    runs
}

/// Line-segment filter for one mark, with a per-turn cache.
///
/// The cache is keyed by board identity and revision, and is also dropped
/// explicitly by the player after every half-move.
#[derive(Debug, Clone)]
pub struct LineSegments {
    mark: Mark,
    cnt_in_row: usize,
    provider: VectorProvider,
    cache: Option<(BoardId, u64, Vec<Vector>)>,
}

impl LineSegments {
    /// Filter over rows, columns and both diagonals.
    pub fn new(mark: Mark, cnt_in_row: usize) -> Self {
        Self {
            mark,
            cnt_in_row,
            provider: VectorProvider::all(),
            cache: None,
        }
    }

    /// Mark whose runs are kept.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Minimum run length.
    pub fn cnt_in_row(&self) -> usize {
        self.cnt_in_row
    }

    /// Drops cached segments.
    pub fn clear_cache(&mut self) {
        if self.cache.take().is_some() {
            trace!(mark = %self.mark, "Cleared segment cache");
        }
    }

    /// Segments for the current board, cached until the board changes.
    #[instrument(skip_all, fields(mark = %self.mark, board = %board.id()))]
    pub fn provide(&mut self, board: &Board) -> GridResult<&[Vector]> {
        let fresh = match &self.cache {
            Some((id, revision, _)) => *id == board.id() && *revision == board.revision(),
            None => false,
        };
        if !fresh {
            let segments = self.compute(board)?;
            debug!(segments = segments.len(), "Rebuilt segment cache");
            self.cache = Some((board.id(), board.revision(), segments));
        }
        Ok(self.cache.as_ref().map_or(&[], |(_, _, segments)| segments.as_slice()))
    }

    /// Segments without touching the cache.
    pub fn compute(&self, board: &Board) -> GridResult<Vec<Vector>> {
        let token = self.mark.token();
        Ok(self
            .provider
            .provide(board)?
            .iter()
            .flat_map(|line| split_runs(line, token, self.cnt_in_row))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::item::ItemKind;
    use crate::types::Point;
    use crate::vector::{Direction, lines};

    fn board() -> Board {
        Board::new(Axis::letters(5).unwrap(), Axis::one_based(1).unwrap())
    }

    #[test]
    fn test_split_at_opponent() {
        let mut board = board();
        board.place(Point::new("c", 1), ItemKind::piece(Mark::O)).unwrap();
        let row = &lines(&board, Direction::Horizontal).unwrap()[0];
        assert!(split_runs(row, "X", 3).is_empty());
        let runs = split_runs(row, "X", 2);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].points().next(), Some(&Point::new("d", 1)));
    }

    #[test]
    fn test_own_pieces_stay_in_run() {
        let mut board = board();
        board.place(Point::new("b", 1), ItemKind::piece(Mark::X)).unwrap();
        board.place(Point::new("e", 1), ItemKind::piece(Mark::O)).unwrap();
        let row = &lines(&board, Direction::Horizontal).unwrap()[0];
        let runs = split_runs(row, "X", 3);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 4);
        assert_eq!(runs[0].occupied_count(), 1);
    }

    #[test]
    fn test_narrow_directions_contribute_nothing() {
        let board = board();
        let segments = LineSegments::new(Mark::X, 3).compute(&board).unwrap();
        // Only the single row is long enough.
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].direction(), Direction::Horizontal);
    }

    #[test]
    fn test_cache_follows_revision() {
        let mut board = board();
        let mut segments = LineSegments::new(Mark::X, 3);
        assert_eq!(segments.provide(&board).unwrap().len(), 1);
        board.place(Point::new("c", 1), ItemKind::piece(Mark::O)).unwrap();
        assert!(segments.provide(&board).unwrap().is_empty());
        segments.clear_cache();
        assert!(segments.provide(&board).unwrap().is_empty());
    }
}
