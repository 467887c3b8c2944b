//! N-in-a-row player: move suggestion, commit and win detection.

use super::contracts::{Contract, Placement, PlacementContract};
use super::moves::{MoveContext, MoveDispatcher};
use super::segments::LineSegments;
use crate::board::Board;
use crate::error::{GridErrorKind, GridResult};
use crate::item::{Item, ItemKind, Occupant};
use crate::types::{Mark, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

/// The run of points that won a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    /// Winning mark.
    pub mark: Mark,
    /// The `cnt_in_row` points of the run, in line order.
    pub points: Vec<Point>,
}

impl fmt::Display for WinningLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let points: Vec<String> = self.points.iter().map(ToString::to_string).collect();
        write!(f, "Player {} is won: [{}]", self.mark, points.join(", "))
    }
}

/// Externally observed game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    /// Moves remain and nobody has won.
    InProgress,
    /// A run of `cnt_in_row` exists.
    Won(WinningLine),
    /// Every cell is occupied and nobody has won.
    BoardFull,
}

impl GameStatus {
    /// True for `Won` and `BoardFull`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(line) => line.fmt(f),
            GameStatus::BoardFull => write!(f, "Board is full, nobody won"),
        }
    }
}

/// Result of committing a move.
pub type PlayOutcome = GameStatus;

/// A player bound to one mark and win length.
///
/// The board is passed into every call, so a player can never hold a stale
/// view of it. The segment cache is dropped before each suggestion and after
/// each commit.
#[derive(Debug)]
pub struct Player {
    mark: Mark,
    cnt_in_row: usize,
    segments: LineSegments,
    dispatcher: MoveDispatcher,
    rng: StdRng,
}

impl Player {
    /// Player with an OS-seeded tie-break generator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWinLength` if `cnt_in_row` is zero.
    pub fn new(mark: Mark, cnt_in_row: usize) -> GridResult<Self> {
        Self::with_rng(mark, cnt_in_row, StdRng::from_os_rng())
    }

    /// Player with a reproducible tie-break generator.
    pub fn with_seed(mark: Mark, cnt_in_row: usize, seed: u64) -> GridResult<Self> {
        Self::with_rng(mark, cnt_in_row, StdRng::seed_from_u64(seed))
    }

    #[instrument(skip(rng))]
    fn with_rng(mark: Mark, cnt_in_row: usize, rng: StdRng) -> GridResult<Self> {
        if cnt_in_row < 1 {
            return Err(GridErrorKind::InvalidWinLength(cnt_in_row).into());
        }
        Ok(Self {
            mark,
            cnt_in_row,
            segments: LineSegments::new(mark, cnt_in_row),
            dispatcher: MoveDispatcher::standard(),
            rng,
        })
    }

    /// Replaces the resolver chain.
    pub fn with_dispatcher(mut self, dispatcher: MoveDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// This player's mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Win length.
    pub fn cnt_in_row(&self) -> usize {
        self.cnt_in_row
    }

    /// Runs the resolver chain. `None` means the board is full.
    #[instrument(skip_all, fields(mark = %self.mark, board = %board.id()))]
    pub fn move_suggestion(&mut self, board: &Board) -> GridResult<Option<Point>> {
        self.segments.clear_cache();
        let lines = self.segments.provide(board)?;
        let ctx = MoveContext {
            board,
            mark: self.mark,
            cnt_in_row: self.cnt_in_row,
            lines,
        };
        self.dispatcher.resolve(&ctx, &mut self.rng)
    }

    /// Places this player's piece at `point` and reports the new state.
    ///
    /// # Errors
    ///
    /// Returns `Occupied` for a taken cell or an out-of-range error for a
    /// point outside the board. The board is unchanged on error.
    #[instrument(skip(self, board, point), fields(mark = %self.mark, point = %point))]
    pub fn play(&mut self, board: &mut Board, point: Point) -> GridResult<PlayOutcome> {
        let placement = Placement::new(self.mark, point);
        PlacementContract::pre(board, &placement)?;
        board.place(placement.point.clone(), ItemKind::piece(self.mark))?;
        PlacementContract::post(board, &placement)?;
        info!("Move committed");
        self.segments.clear_cache();
        self.outcome_after(board, &placement.point)
    }

    /// Evaluates a move already made with an existing item.
    ///
    /// # Errors
    ///
    /// Returns `ForeignItem` if the item was placed on another board, and
    /// `ItemNotFound` if it is no longer stored on this one.
    #[instrument(skip(self, board, item), fields(mark = %self.mark, item = %item))]
    pub fn play_item(&mut self, board: &Board, item: &Item) -> GridResult<PlayOutcome> {
        if !item.belongs_to(board.id()) {
            return Err(GridErrorKind::ForeignItem.into());
        }
        let point = board.find(*item.id())?.clone();
        self.segments.clear_cache();
        self.outcome_after(board, &point)
    }

    fn outcome_after(&mut self, board: &Board, last_move: &Point) -> GridResult<PlayOutcome> {
        if let Some(line) = self.is_won(board, Some(last_move))? {
            info!(%line, "Game won");
            return Ok(GameStatus::Won(line));
        }
        if self.is_board_full(board) {
            info!("Board full");
            return Ok(GameStatus::BoardFull);
        }
        Ok(GameStatus::InProgress)
    }

    /// Finds a run of `cnt_in_row` own pieces.
    ///
    /// With `last_move` only lines through that point are scanned; without
    /// it the whole board is.
    #[instrument(skip(self, board), fields(mark = %self.mark, board = %board.id()))]
    pub fn is_won(&mut self, board: &Board, last_move: Option<&Point>) -> GridResult<Option<WinningLine>> {
        let token = self.mark.token();
        let cnt_in_row = self.cnt_in_row;
        let lines = self.segments.provide(board)?;
        let found = lines
            .iter()
            .filter(|line| last_move.is_none_or(|point| line.contains(point)))
            .find_map(|line| {
                let mut run: Vec<Point> = Vec::with_capacity(cnt_in_row);
                for (point, item) in line.cells() {
                    if item.as_ref().is_some_and(|item| item.token() == token) {
                        run.push(point.clone());
                        if run.len() == cnt_in_row {
                            return Some(run);
                        }
                    } else {
                        run.clear();
                    }
                }
                None
            });
        if let Some(points) = &found {
            debug!(mark = %self.mark, run = points.len(), "Winning run found");
        }
        Ok(found.map(|points| WinningLine {
            mark: self.mark,
            points,
        }))
    }

    /// True iff no empty cell remains.
    pub fn is_board_full(&self, board: &Board) -> bool {
        board.is_full()
    }

    /// Read-only status from a whole-board scan.
    #[instrument(skip_all, fields(mark = %self.mark))]
    pub fn status(&mut self, board: &Board) -> GridResult<GameStatus> {
        if let Some(line) = self.is_won(board, None)? {
            return Ok(GameStatus::Won(line));
        }
        if self.is_board_full(board) {
            return Ok(GameStatus::BoardFull);
        }
        Ok(GameStatus::InProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::error::ErrorCategory;

    fn board() -> Board {
        Board::new(Axis::letters(3).unwrap(), Axis::one_based(3).unwrap())
    }

    #[test]
    fn test_zero_win_length_rejected() {
        let err = Player::with_seed(Mark::X, 0, 1).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_row_win_through_last_move() {
        let mut board = board();
        let mut x = Player::with_seed(Mark::X, 3, 1).unwrap();
        let mut o = Player::with_seed(Mark::O, 3, 2).unwrap();
        assert_eq!(x.play(&mut board, Point::new("a", 1)).unwrap(), GameStatus::InProgress);
        o.play(&mut board, Point::new("a", 2)).unwrap();
        x.play(&mut board, Point::new("b", 1)).unwrap();
        o.play(&mut board, Point::new("b", 2)).unwrap();
        let outcome = x.play(&mut board, Point::new("c", 1)).unwrap();
        let GameStatus::Won(line) = outcome else {
            panic!("expected a win, got {outcome:?}");
        };
        assert_eq!(
            line.points,
            vec![Point::new("a", 1), Point::new("b", 1), Point::new("c", 1)]
        );
        assert_eq!(line.to_string(), "Player X is won: [a:1, b:1, c:1]");
        assert!(x.status(&board).unwrap().is_terminal());
        assert_eq!(o.status(&board).unwrap(), GameStatus::InProgress);
    }

    #[test]
    fn test_occupied_play_leaves_board_unchanged() {
        let mut board = board();
        let mut x = Player::with_seed(Mark::X, 3, 1).unwrap();
        let mut o = Player::with_seed(Mark::O, 3, 1).unwrap();
        x.play(&mut board, Point::new("b", 2)).unwrap();
        let revision = board.revision();
        let err = o.play(&mut board, Point::new("b", 2)).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Occupied);
        assert_eq!(board.revision(), revision);
    }

    #[test]
    fn test_first_suggestion_is_center() {
        let board = board();
        let mut x = Player::with_seed(Mark::X, 3, 9).unwrap();
        assert_eq!(x.move_suggestion(&board).unwrap(), Some(Point::new("b", 2)));
    }

    #[test]
    fn test_play_item_rejects_foreign_board() {
        let mut other = board();
        let id = other.place(Point::new("a", 1), ItemKind::piece(Mark::X)).unwrap();
        let item = other.item(id).unwrap().clone();
        let board = board();
        let mut x = Player::with_seed(Mark::X, 3, 1).unwrap();
        let err = x.play_item(&board, &item).unwrap_err();
        assert_eq!(err.kind, GridErrorKind::ForeignItem);
        assert_eq!(x.play_item(&other, &item).unwrap(), GameStatus::InProgress);
    }

    #[test]
    fn test_full_board_without_winner() {
        // X O X / X O O / O X X
        let mut board = board();
        let layout = [
            ("a", 1, Mark::X),
            ("b", 1, Mark::O),
            ("c", 1, Mark::X),
            ("a", 2, Mark::X),
            ("b", 2, Mark::O),
            ("c", 2, Mark::O),
            ("a", 3, Mark::O),
            ("b", 3, Mark::X),
        ];
        for (x, y, mark) in layout {
            board.place(Point::new(x, y), ItemKind::piece(mark)).unwrap();
        }
        let mut x = Player::with_seed(Mark::X, 3, 1).unwrap();
        assert_eq!(x.play(&mut board, Point::new("c", 3)).unwrap(), GameStatus::BoardFull);
        assert!(x.is_board_full(&board));
        assert_eq!(x.move_suggestion(&board).unwrap(), None);
    }
}
