//! Error types for board, axis, vector and player operations.

use crate::types::{AxisName, Label, Point};
use derive_more::{Display, Error};
use tracing::instrument;

/// Coarse error classes callers react to differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ErrorCategory {
    /// Bad sizes, unknown kinds, malformed records. Fatal to the operation.
    Configuration,
    /// A label or ordinal outside an axis domain. Callers re-prompt.
    OutOfRange,
    /// A strict piece was placed on an occupied cell.
    Occupied,
    /// A lookup by identity found nothing.
    NotFound,
}

/// Specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GridErrorKind {
    /// Axis size outside `[1..max]`.
    #[display("Size should be in range [1..{max}]: {size}")]
    InvalidSize {
        /// Requested size.
        size: usize,
        /// Largest size the axis variant supports.
        max: usize,
    },

    /// Ordinal outside `[0..size)`.
    #[display("Index should be in range [{min}..{max}]: {index}")]
    OrdinalOutOfRange {
        /// Smallest valid ordinal.
        min: usize,
        /// Largest valid ordinal.
        max: usize,
        /// Offending ordinal.
        index: usize,
    },

    /// Label outside the current axis domain.
    #[display("Label should be in range [{first}..{last}]: {label}")]
    LabelOutOfRange {
        /// First label of the domain.
        first: Label,
        /// Last label of the domain.
        last: Label,
        /// Offending label.
        label: Label,
    },

    /// One coordinate of a board key is outside its axis.
    #[display("Index \"{axis}\" should be in range [{first}..{last}]: {value}")]
    PointOutOfRange {
        /// Which axis rejected the coordinate.
        axis: AxisName,
        /// First label of that axis.
        first: Label,
        /// Last label of that axis.
        last: Label,
        /// Offending coordinate.
        value: Label,
    },

    /// A vector start point lies outside the board.
    #[display("The vector point is outside the range of the axis. {_0}")]
    VectorStart(Box<GridErrorKind>),

    /// A strict piece tried to occupy a non-empty cell.
    #[display("Item '{token}' tries to occupy an occupied point [{point}]")]
    Occupied {
        /// Render token of the rejected item.
        token: String,
        /// Target point.
        point: Point,
    },

    /// Lookup by item identity failed.
    #[display("Item {_0} is not on the board")]
    ItemNotFound(u64),

    /// The item belongs to another board.
    #[display("Item does not belong to the current player's board")]
    ForeignItem,

    /// Win length must be at least one.
    #[display("Number in a row for win should be at least 1: {_0}")]
    InvalidWinLength(usize),

    /// A fixed axis lists the same key twice.
    #[display("Fixed axis keys should be unique, repeated: {_0}")]
    DuplicateKey(Label),

    /// Player input is not an `x:y` pair.
    #[display("Expected a point as x:y, got '{_0}'")]
    MalformedPoint(String),

    /// A serialized or configured kind identifier is not known.
    #[display("Unsupported kind: {_0}")]
    UnsupportedKind(String),

    /// A serialized record could not be decoded.
    #[display("Malformed record: {_0}")]
    MalformedRecord(String),
}

impl GridErrorKind {
    /// Returns the error class this condition belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GridErrorKind::InvalidSize { .. }
            | GridErrorKind::InvalidWinLength(_)
            | GridErrorKind::DuplicateKey(_)
            | GridErrorKind::UnsupportedKind(_)
            | GridErrorKind::MalformedRecord(_) => ErrorCategory::Configuration,
            GridErrorKind::OrdinalOutOfRange { .. }
            | GridErrorKind::LabelOutOfRange { .. }
            | GridErrorKind::PointOutOfRange { .. }
            | GridErrorKind::MalformedPoint(_)
            | GridErrorKind::VectorStart(_) => ErrorCategory::OutOfRange,
            GridErrorKind::Occupied { .. } => ErrorCategory::Occupied,
            GridErrorKind::ItemNotFound(_) | GridErrorKind::ForeignItem => ErrorCategory::NotFound,
        }
    }
}

/// Grid error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Grid error: {} at {}:{}", kind, file, line)]
pub struct GridError {
    /// What went wrong.
    pub kind: GridErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GridError {
    /// Creates a new grid error with caller location tracking.
    #[track_caller]
    #[instrument(level = "trace")]
    pub fn new(kind: GridErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error class.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl From<GridErrorKind> for GridError {
    #[track_caller]
    fn from(kind: GridErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result alias for grid operations.
pub type GridResult<T> = Result<T, GridError>;
