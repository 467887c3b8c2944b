//! Pre- and postconditions around placing a piece.
//!
//! A placement is legal when its point is on the board and the target cell
//! is empty. After it is applied the cell must hold the placed mark.

use crate::board::Board;
use crate::error::{GridErrorKind, GridResult};
use crate::item::Occupant;
use crate::types::{Mark, Point};
use derive_new::new;
use tracing::{instrument, warn};

/// A contract checks a state before and after an action is applied.
pub trait Contract<S, A> {
    /// Must hold before the action.
    fn pre(state: &S, action: &A) -> GridResult<()>;

    /// Must hold after the action.
    fn post(state: &S, action: &A) -> GridResult<()>;
}

/// A mark about to be placed at a point.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Placement {
    /// Mark being placed.
    pub mark: Mark,
    /// Target point.
    pub point: Point,
}

/// Precondition: the point validates against both axes.
pub struct PointOnBoard;

impl PointOnBoard {
    /// Validates the target point.
    #[instrument(skip(board))]
    pub fn check(placement: &Placement, board: &Board) -> GridResult<()> {
        board.validate(&placement.point)
    }
}

/// Precondition: nothing occupies the target cell.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects an occupied target cell.
    #[instrument(skip(board))]
    pub fn check(placement: &Placement, board: &Board) -> GridResult<()> {
        match board.get(&placement.point)? {
            Some(_) => Err(GridErrorKind::Occupied {
                token: placement.mark.token().to_string(),
                point: placement.point.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// Contract for committing a player's piece.
pub struct PlacementContract;

impl Contract<Board, Placement> for PlacementContract {
    fn pre(board: &Board, placement: &Placement) -> GridResult<()> {
        PointOnBoard::check(placement, board)?;
        CellIsEmpty::check(placement, board)
    }

    fn post(board: &Board, placement: &Placement) -> GridResult<()> {
        let holds = board
            .get(&placement.point)?
            .is_some_and(|item| item.token() == placement.mark.token());
        if holds {
            Ok(())
        } else {
            warn!(point = %placement.point, "Placed piece missing after commit");
            Err(GridErrorKind::Occupied {
                token: placement.mark.token().to_string(),
                point: placement.point.clone(),
            }
            .into())
        }
    }
}

/// Invariant: X and O counts differ by at most one.
pub struct MarksBalanced;

impl MarksBalanced {
    /// Checks the balance.
    #[instrument(skip(board))]
    pub fn holds(board: &Board) -> bool {
        let count = |mark: Mark| {
            board
                .items()
                .iter()
                .filter(|item| item.kind().mark() == Some(mark))
                .count()
        };
        let (x_count, o_count) = (count(Mark::X), count(Mark::O));
        let valid = x_count.abs_diff(o_count) <= 1;
        if !valid {
            warn!(x_count, o_count, "Mark balance violated");
        }
        valid
    }
}
