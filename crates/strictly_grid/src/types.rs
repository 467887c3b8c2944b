//! Core domain types shared by every board component.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate label on one axis.
///
/// Numeric axes produce [`Label::Int`]; letter axes and most fixed axes
/// produce [`Label::Text`]. Serialized untagged, so a JSON `1` is an integer
/// label and a JSON `"a"` is a text label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Integer label (`IntAxis`, one-based axis, numeric fixed keys).
    Int(i64),
    /// Text label (letter axis, textual fixed keys).
    Text(String),
}

impl Label {
    /// Returns the integer value, if this is an integer label.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Label::Int(value) => Some(*value),
            Label::Text(_) => None,
        }
    }

    /// Returns the text value, if this is a text label.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Label::Int(_) => None,
            Label::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(value) => write!(f, "{}", value),
            Label::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Int(i64::from(value))
    }
}

impl From<char> for Label {
    fn from(value: char) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

/// A board coordinate expressed in axis labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Label on the x axis.
    pub x: Label,
    /// Label on the y axis.
    pub y: Label,
}

impl Point {
    /// Creates a point from anything convertible into labels.
    pub fn new(x: impl Into<Label>, y: impl Into<Label>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

impl<X: Into<Label>, Y: Into<Label>> From<(X, Y)> for Point {
    fn from((x, y): (X, Y)) -> Self {
        Point::new(x, y)
    }
}

/// Game piece mark.
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
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Mark {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Mark {
    /// Returns the opponent mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the short id used as render token and ownership key.
    pub fn token(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

/// Names the two board dimensions in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AxisName {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}
