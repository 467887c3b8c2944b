//! Line directions and the start points that cover a board.

use serde::{Deserialize, Serialize};

/// Step direction of a line scan.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    /// Along a row, `(+1, 0)`.
    Horizontal,
    /// Down a column, `(0, +1)`.
    Vertical,
    /// Down and right, `(+1, +1)`.
    BackDiagonal,
    /// Down and left, `(-1, +1)`.
    ForwardDiagonal,
}

impl Direction {
    /// Per-step ordinal delta.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::BackDiagonal => (1, 1),
            Direction::ForwardDiagonal => (-1, 1),
        }
    }

    /// Next ordinal pair, or `None` once the walk leaves a `width` x `height` grid.
    pub fn step(self, (x, y): (usize, usize), width: usize, height: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some((nx, ny))
    }

    /// Ordinal start points whose unbounded walks cover every cell exactly once.
    ///
    /// Rows start on the first column, columns on the first row. Diagonals
    /// start along the top row and then down the entry-side column, without
    /// repeating the corner.
    pub fn start_ordinals(self, width: usize, height: usize) -> Vec<(usize, usize)> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        match self {
            Direction::Horizontal => (0..height).map(|y| (0, y)).collect(),
            Direction::Vertical => (0..width).map(|x| (x, 0)).collect(),
            Direction::BackDiagonal => (0..width)
                .map(|x| (x, 0))
                .chain((1..height).map(|y| (0, y)))
                .collect(),
            Direction::ForwardDiagonal => (0..width)
                .rev()
                .map(|x| (x, 0))
                .chain((1..height).map(|y| (width - 1, y)))
                .collect(),
        }
    }
}
