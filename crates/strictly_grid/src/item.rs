//! Board occupants.

use crate::types::{Label, Mark, Point};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default render token of a plain marker.
pub const DEFAULT_MARKER_TOKEN: &str = "?";

static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a board, used as a non-owning back-reference from items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardId(u64);

impl BoardId {
    /// Allocates a fresh process-unique id.
    pub fn fresh() -> Self {
        Self(NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "board#{}", self.0)
    }
}

/// Identity of an item, unique within its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub(crate) u64);

impl ItemId {
    /// Raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of occupant variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// Plain item. Overwrites whatever occupies the cell.
    Marker {
        /// Render token.
        token: String,
    },
    /// Strict game piece. Refuses an occupied cell.
    Piece {
        /// Owning mark.
        mark: Mark,
    },
}

impl ItemKind {
    /// A marker rendered with the default token.
    pub fn marker() -> Self {
        ItemKind::Marker {
            token: DEFAULT_MARKER_TOKEN.to_string(),
        }
    }

    /// A strict piece for `mark`.
    pub fn piece(mark: Mark) -> Self {
        ItemKind::Piece { mark }
    }

    /// Render token and ownership key.
    pub fn token(&self) -> &str {
        match self {
            ItemKind::Marker { token } => token,
            ItemKind::Piece { mark } => mark.token(),
        }
    }

    /// Whether placement must refuse occupied cells.
    pub fn is_strict(&self) -> bool {
        matches!(self, ItemKind::Piece { .. })
    }

    /// The mark of a strict piece.
    pub fn mark(&self) -> Option<Mark> {
        match self {
            ItemKind::Piece { mark } => Some(*mark),
            ItemKind::Marker { .. } => None,
        }
    }
}

impl Default for ItemKind {
    fn default() -> Self {
        Self::marker()
    }
}

/// Capability shared by everything that can sit on a board cell.
pub trait Occupant {
    /// Label on the x axis.
    fn x(&self) -> &Label;
    /// Label on the y axis.
    fn y(&self) -> &Label;
    /// Display token; also identifies the owner in line scans.
    fn token(&self) -> &str;
}

/// An occupant placed on a board.
///
/// Items are created by [`Board::place`](crate::Board::place) and
/// [`Board::set`](crate::Board::set); the board is referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Item {
    id: ItemId,
    board: BoardId,
    kind: ItemKind,
    point: Point,
}

impl Item {
    pub(crate) fn new(id: ItemId, board: BoardId, kind: ItemKind, point: Point) -> Self {
        Self {
            id,
            board,
            kind,
            point,
        }
    }

    /// Whether this item belongs to `board`.
    pub fn belongs_to(&self, board: BoardId) -> bool {
        self.board == board
    }
}

impl Occupant for Item {
    fn x(&self) -> &Label {
        &self.point.x
    }

    fn y(&self) -> &Label {
        &self.point.y
    }

    fn token(&self) -> &str {
        self.kind.token()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind.token(), self.point)
    }
}
