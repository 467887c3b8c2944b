//! Coordinate-addressable game boards with line scanning and heuristic play.
//!
//! # Architecture
//!
//! - **Axis**: bijection between ordinals and labels (integers, letters, fixed keys)
//! - **Board**: sparse map from `(x, y)` labels to items, validated on every access
//! - **Vector**: lazy walks along rows, columns and diagonals, and whole-board providers
//! - **Intersection**: which candidate lines cross at each point, with a pluggable rating
//! - **Tictactoe**: line-segment filter, move resolver chain and the N-in-a-row player
//! - **Render / Serializer**: console and HTML views, JSON board records
//!
//! # Example
//!
//! ```
//! use strictly_grid::{Axis, Board, GameStatus, Mark, Player, Point};
//!
//! # fn main() -> Result<(), strictly_grid::GridError> {
//! let mut board = Board::new(Axis::letters(3)?, Axis::one_based(3)?);
//! let mut x = Player::with_seed(Mark::X, 3, 7)?;
//! let suggestion = x.move_suggestion(&board)?;
//! assert_eq!(suggestion, Some(Point::new("b", 2)));
//! assert_eq!(x.play(&mut board, Point::new("b", 2))?, GameStatus::InProgress);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod axis;
mod board;
mod error;
mod intersection;
mod item;
mod render;
mod serializer;
mod tictactoe;
mod types;
pub mod vector;

pub use axis::{Axis, AxisKind, INT_AXIS_MAX_SIZE, LETTERS_MAX_SIZE};
pub use board::{Board, Cell};
pub use error::{ErrorCategory, GridError, GridErrorKind, GridResult};
pub use intersection::{
    IntersectionPoint, IntersectionPoints, LengthRating, LineRating, OCCUPIED_CELL_BONUS,
    OccupancyBonusRating,
};
pub use item::{BoardId, DEFAULT_MARKER_TOKEN, Item, ItemId, ItemKind, Occupant};
pub use render::{ConsoleRenderer, HtmlRenderer, Renderer, escape};
pub use serializer::{AxisDescriptor, BoardRecord, ItemDescriptor, dumps, loads};
pub use tictactoe::{
    CellIsEmpty, Contract, GameStatus, IntersectionMove, LineSegments, MarksBalanced, MoveContext,
    MoveDispatcher, MoveResolver, OpponentWinMove, Placement, PlacementContract, PlayOutcome, Player,
    PointOnBoard, RandomMove, WinMove, WinningLine, split_runs, win_case,
};
pub use types::{AxisName, Label, Mark, Point};
pub use vector::{Depth, Direction, Vector, VectorPoints, VectorProvider};
