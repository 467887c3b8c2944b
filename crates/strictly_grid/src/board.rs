//! Sparse two-axis board storage.

use crate::axis::Axis;
use crate::error::{GridError, GridErrorKind, GridResult};
use crate::item::{BoardId, Item, ItemId, ItemKind};
use crate::types::{AxisName, Label, Point};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// A cell along a row or column: its point and the occupant, if any.
pub type Cell<'a> = (Point, Option<&'a Item>);

/// Mapping from `(x, y)` labels to optional items.
///
/// Every key is validated against both axes before any read, write or
/// delete. Unoccupied cells are not stored. Iteration is y-major.
#[derive(Debug)]
pub struct Board {
    id: BoardId,
    axis_x: Axis,
    axis_y: Axis,
    cells: HashMap<(usize, usize), Item>,
    revision: u64,
    next_item: u64,
}

impl Board {
    /// Creates an empty board over two axes.
    #[instrument(skip_all, fields(width = axis_x.size(), height = axis_y.size()))]
    pub fn new(axis_x: Axis, axis_y: Axis) -> Self {
        let id = BoardId::fresh();
        debug!(%id, "Creating board");
        Self {
            id,
            axis_x,
            axis_y,
            cells: HashMap::new(),
            revision: 0,
            next_item: 1,
        }
    }

    /// Board identity.
    pub fn id(&self) -> BoardId {
        self.id
    }

    /// Horizontal axis.
    pub fn axis_x(&self) -> &Axis {
        &self.axis_x
    }

    /// Vertical axis.
    pub fn axis_y(&self) -> &Axis {
        &self.axis_y
    }

    /// Number of addressable cells.
    pub fn area(&self) -> usize {
        self.axis_x.size() * self.axis_y.size()
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.len()
    }

    /// Mutation counter; bumps on every write or delete.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Converts a point to its ordinal pair.
    ///
    /// # Errors
    ///
    /// Returns `PointOutOfRange` naming the axis that rejected the point.
    pub fn ordinals(&self, point: &Point) -> GridResult<(usize, usize)> {
        let x = Self::axis_ordinal(&self.axis_x, AxisName::X, &point.x)?;
        let y = Self::axis_ordinal(&self.axis_y, AxisName::Y, &point.y)?;
        Ok((x, y))
    }

    #[track_caller]
    fn axis_ordinal(axis: &Axis, name: AxisName, value: &Label) -> GridResult<usize> {
        axis.ordinal_of(value).map_err(|_| {
            GridError::new(GridErrorKind::PointOutOfRange {
                axis: name,
                first: axis.first(),
                last: axis.last(),
                value: value.clone(),
            })
        })
    }

    /// Validates a point against both axes.
    pub fn validate(&self, point: &Point) -> GridResult<()> {
        self.ordinals(point).map(|_| ())
    }

    /// Converts an ordinal pair back to a point.
    pub fn point_at(&self, x: usize, y: usize) -> GridResult<Point> {
        Ok(Point {
            x: self.axis_x.label_at(x)?,
            y: self.axis_y.label_at(y)?,
        })
    }

    /// Returns the occupant at `point`.
    pub fn get(&self, point: &Point) -> GridResult<Option<&Item>> {
        let key = self.ordinals(point)?;
        Ok(self.cells.get(&key))
    }

    /// Returns the occupant at an ordinal pair without label conversion.
    pub fn get_at(&self, x: usize, y: usize) -> Option<&Item> {
        self.cells.get(&(x, y))
    }

    /// Stores a new item at `point`, replacing any occupant.
    ///
    /// No occupancy rule is applied here; see [`Board::place`].
    #[instrument(skip(self, point), fields(board = %self.id, point = %point))]
    pub fn set(&mut self, point: Point, kind: ItemKind) -> GridResult<ItemId> {
        let key = self.ordinals(&point)?;
        let id = ItemId(self.next_item);
        self.next_item += 1;
        let item = Item::new(id, self.id, kind, point);
        if let Some(replaced) = self.cells.insert(key, item) {
            debug!(replaced = %replaced, "Overwrote occupant");
        }
        self.revision += 1;
        Ok(id)
    }

    /// Places an item honoring its kind's occupancy rule.
    ///
    /// # Errors
    ///
    /// Returns `Occupied` when a strict kind targets a non-empty cell, or an
    /// out-of-range error for an invalid point.
    #[instrument(skip(self, point), fields(board = %self.id, point = %point))]
    pub fn place(&mut self, point: Point, kind: ItemKind) -> GridResult<ItemId> {
        let key = self.ordinals(&point)?;
        if kind.is_strict() && self.cells.contains_key(&key) {
            warn!(token = kind.token(), "Refusing occupied cell");
            return Err(GridErrorKind::Occupied {
                token: kind.token().to_string(),
                point,
            }
            .into());
        }
        self.set(point, kind)
    }

    /// Removes the occupant at `point`, returning it.
    #[instrument(skip(self, point), fields(board = %self.id, point = %point))]
    pub fn remove(&mut self, point: &Point) -> GridResult<Option<Item>> {
        let key = self.ordinals(point)?;
        let removed = self.cells.remove(&key);
        if removed.is_some() {
            self.revision += 1;
        }
        Ok(removed)
    }

    /// Cells of the row at `y`, in x-axis order.
    pub fn get_row(&self, y: &Label) -> GridResult<Vec<Cell<'_>>> {
        let oy = Self::axis_ordinal(&self.axis_y, AxisName::Y, y)?;
        Ok(self
            .axis_x
            .labels()
            .enumerate()
            .map(|(ox, x)| (Point { x, y: y.clone() }, self.cells.get(&(ox, oy))))
            .collect())
    }

    /// Cells of the column at `x`, in y-axis order.
    pub fn get_column(&self, x: &Label) -> GridResult<Vec<Cell<'_>>> {
        let ox = Self::axis_ordinal(&self.axis_x, AxisName::X, x)?;
        Ok(self
            .axis_y
            .labels()
            .enumerate()
            .map(|(oy, y)| (Point { x: x.clone(), y }, self.cells.get(&(ox, oy))))
            .collect())
    }

    /// Every point, row by row. Each call starts a fresh walk.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.axis_y.labels().flat_map(move |y| {
            self.axis_x.labels().map(move |x| Point { x, y: y.clone() })
        })
    }

    /// Points with no occupant, row by row.
    pub fn empty_points(&self) -> Vec<Point> {
        let width = self.axis_x.size();
        self.points()
            .enumerate()
            .filter(|(index, _)| !self.cells.contains_key(&(index % width, index / width)))
            .map(|(_, point)| point)
            .collect()
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.len() == self.area()
    }

    /// Looks up an item by identity.
    pub fn item(&self, id: ItemId) -> GridResult<&Item> {
        self.cells
            .values()
            .find(|item| *item.id() == id)
            .ok_or_else(|| GridErrorKind::ItemNotFound(id.value()).into())
    }

    /// Returns the coordinates of an item by identity.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if no stored item has this id.
    pub fn find(&self, id: ItemId) -> GridResult<&Point> {
        self.item(id).map(Item::point)
    }

    /// Stored items, oldest placement first.
    pub fn items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.cells.values().collect();
        items.sort_by_key(|item| *item.id());
        items
    }
}

impl Clone for Board {
    /// Clones into a board with a fresh identity; items are re-homed.
    fn clone(&self) -> Self {
        let id = BoardId::fresh();
        let cells = self
            .cells
            .iter()
            .map(|(key, item)| {
                let copy = Item::new(*item.id(), id, item.kind().clone(), item.point().clone());
                (*key, copy)
            })
            .collect();
        Self {
            id,
            axis_x: self.axis_x.clone(),
            axis_y: self.axis_y.clone(),
            cells,
            revision: self.revision,
            next_item: self.next_item,
        }
    }
}
