//! JSON records of boards.
//!
//! A record lists both axis descriptors and the items in placement order.
//! Loading rebuilds the axes, then the board, then replays each placement
//! with the same occupancy rules as live play.

use crate::axis::{Axis, AxisKind};
use crate::board::Board;
use crate::error::{GridErrorKind, GridResult};
use crate::item::ItemKind;
use crate::types::{Label, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Kind and size of one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisDescriptor {
    /// Integers `0..size`.
    Int {
        /// Axis size.
        size: usize,
    },
    /// Integers `1..=size`.
    OneBased {
        /// Axis size.
        size: usize,
    },
    /// Letters.
    Letters {
        /// Axis size.
        size: usize,
    },
    /// Fixed key list; `size` selects the visible prefix.
    Fixed {
        /// Full backing key list.
        keys: Vec<Label>,
        /// Axis size.
        size: usize,
    },
}

impl AxisDescriptor {
    /// Describes an existing axis.
    pub fn from_axis(axis: &Axis) -> Self {
        let size = axis.size();
        match axis.kind() {
            AxisKind::Int => AxisDescriptor::Int { size },
            AxisKind::OneBased => AxisDescriptor::OneBased { size },
            AxisKind::Letters => AxisDescriptor::Letters { size },
            AxisKind::Fixed => AxisDescriptor::Fixed {
                keys: axis.keys().map(<[Label]>::to_vec).unwrap_or_default(),
                size,
            },
        }
    }

    /// Builds the described axis.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for a size the axis kind does not accept.
    pub fn to_axis(&self) -> GridResult<Axis> {
        match self {
            AxisDescriptor::Int { size } => Axis::int(*size),
            AxisDescriptor::OneBased { size } => Axis::one_based(*size),
            AxisDescriptor::Letters { size } => Axis::letters(*size),
            AxisDescriptor::Fixed { keys, size } => {
                let mut axis = Axis::fixed(keys.iter().cloned())?;
                axis.set_size(*size)?;
                Ok(axis)
            }
        }
    }
}

/// Kind and coordinates of one stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// Occupant variant.
    #[serde(flatten)]
    pub kind: ItemKind,
    /// Label on the x axis.
    pub x: Label,
    /// Label on the y axis.
    pub y: Label,
}

/// Persistent form of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    /// Horizontal axis.
    pub axis_x: AxisDescriptor,
    /// Vertical axis.
    pub axis_y: AxisDescriptor,
    /// Items, oldest placement first.
    pub items: Vec<ItemDescriptor>,
}

impl BoardRecord {
    /// Captures a board.
    #[instrument(skip_all, fields(board = %board.id()))]
    pub fn from_board(board: &Board) -> Self {
        let items = board
            .items()
            .into_iter()
            .map(|item| ItemDescriptor {
                kind: item.kind().clone(),
                x: item.point().x.clone(),
                y: item.point().y.clone(),
            })
            .collect();
        Self {
            axis_x: AxisDescriptor::from_axis(board.axis_x()),
            axis_y: AxisDescriptor::from_axis(board.axis_y()),
            items,
        }
    }

    /// Rebuilds the board, replaying placements in order.
    ///
    /// # Errors
    ///
    /// Fails on invalid axis sizes, items outside the axes, or a strict
    /// item replayed onto an occupied cell.
    #[instrument(skip_all, fields(items = self.items.len()))]
    pub fn to_board(&self) -> GridResult<Board> {
        let mut board = Board::new(self.axis_x.to_axis()?, self.axis_y.to_axis()?);
        for item in &self.items {
            board.place(Point::new(item.x.clone(), item.y.clone()), item.kind.clone())?;
        }
        debug!(board = %board.id(), "Board restored");
        Ok(board)
    }

    /// Encodes as JSON.
    pub fn to_json(&self) -> GridResult<String> {
        serde_json::to_string(self).map_err(|err| GridErrorKind::MalformedRecord(err.to_string()).into())
    }

    /// Decodes from JSON.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` for invalid JSON or unknown kind identifiers.
    pub fn from_json(json: &str) -> GridResult<Self> {
        serde_json::from_str(json).map_err(|err| GridErrorKind::MalformedRecord(err.to_string()).into())
    }
}

/// Serializes a board to JSON.
pub fn dumps(board: &Board) -> GridResult<String> {
    BoardRecord::from_board(board).to_json()
}

/// Restores a board from JSON.
pub fn loads(json: &str) -> GridResult<Board> {
    BoardRecord::from_json(json)?.to_board()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::types::Mark;

    #[test]
    fn test_axis_descriptor_json() {
        let json = serde_json::to_string(&AxisDescriptor::OneBased { size: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"one_based","size":4}"#);
    }

    #[test]
    fn test_item_descriptor_json() {
        let item = ItemDescriptor {
            kind: ItemKind::piece(Mark::X),
            x: Label::from("a"),
            y: Label::Int(2),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"kind":"piece","mark":"X","x":"a","y":2}"#);
        assert_eq!(serde_json::from_str::<ItemDescriptor>(&json).unwrap(), item);
    }

    #[test]
    fn test_unknown_kind_is_configuration_error() {
        let json = r#"{"axis_x":{"kind":"roman","size":3},"axis_y":{"kind":"int","size":3},"items":[]}"#;
        let err = BoardRecord::from_json(json).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_fixed_axis_keeps_keys() {
        let mut axis = Axis::fixed(["n", "e", "s", "w"]).unwrap();
        axis.set_size(2).unwrap();
        let descriptor = AxisDescriptor::from_axis(&axis);
        let restored = descriptor.to_axis().unwrap();
        assert_eq!(restored, axis);
        assert_eq!(restored.max_size(), 4);
    }
}
