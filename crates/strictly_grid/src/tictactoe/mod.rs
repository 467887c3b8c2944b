//! N-in-a-row game logic on top of the board engine.
//!
//! - [`LineSegments`] keeps the parts of each line a mark can still use
//! - [`MoveDispatcher`] runs the resolver chain (win, block, intersection, random)
//! - [`Player`] commits moves and detects wins

mod contracts;
mod moves;
mod player;
mod segments;

pub use contracts::{CellIsEmpty, Contract, MarksBalanced, Placement, PlacementContract, PointOnBoard};
pub use moves::{
    IntersectionMove, MoveContext, MoveDispatcher, MoveResolver, OpponentWinMove, RandomMove, WinMove,
    win_case,
};
pub use player::{GameStatus, PlayOutcome, Player, WinningLine};
pub use segments::{LineSegments, split_runs};
