//! Coordinate axes: bijections between ordinal positions and labels.

use crate::error::{GridError, GridErrorKind, GridResult};
use crate::types::Label;
use std::collections::HashSet;
use tracing::instrument;

/// Largest size of the integer axes.
pub const INT_AXIS_MAX_SIZE: usize = 1_000_000;

/// Number of letters in the `a..z` then `A..Z` sequence.
pub const LETTERS_MAX_SIZE: usize = 52;

/// Kind identifier of an axis, as used in configuration and serialized records.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AxisKind {
    /// Integers `0..size`.
    Int,
    /// Integers `1..=size`.
    OneBased,
    /// Letters `a..z` then `A..Z`.
    Letters,
    /// A caller-supplied key list.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Domain {
    Int,
    OneBased,
    Letters,
    Fixed(Vec<Label>),
}

/// An ordered, size-bounded coordinate domain for one board dimension.
///
/// Every ordinal in `0..size` maps to exactly one label and back. The size
/// may change after construction; the visible domain is recomputed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    domain: Domain,
    size: usize,
}

impl Axis {
    /// Integer axis with labels `0..size`.
    #[instrument]
    pub fn int(size: usize) -> GridResult<Self> {
        Self::with_domain(Domain::Int, size)
    }

    /// Integer axis with labels `1..=size`.
    #[instrument]
    pub fn one_based(size: usize) -> GridResult<Self> {
        Self::with_domain(Domain::OneBased, size)
    }

    /// Letter axis with labels `a..z` then `A..Z`, at most 52 long.
    #[instrument]
    pub fn letters(size: usize) -> GridResult<Self> {
        Self::with_domain(Domain::Letters, size)
    }

    /// Axis over a fixed key sequence; the full sequence is visible initially.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if a key repeats, since every label must map
    /// back to exactly one ordinal.
    #[instrument(skip(keys))]
    pub fn fixed<I, L>(keys: I) -> GridResult<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let keys: Vec<Label> = keys.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(keys.len());
        if let Some(repeated) = keys.iter().find(|key| !seen.insert(*key)) {
            return Err(GridErrorKind::DuplicateKey(repeated.clone()).into());
        }
        let size = keys.len();
        Self::with_domain(Domain::Fixed(keys), size)
    }

    /// Builds an axis of a numeric or letter kind.
    ///
    /// Fixed axes need their keys and are built with [`Axis::fixed`].
    #[instrument]
    pub fn of_kind(kind: AxisKind, size: usize) -> GridResult<Self> {
        match kind {
            AxisKind::Int => Self::int(size),
            AxisKind::OneBased => Self::one_based(size),
            AxisKind::Letters => Self::letters(size),
            AxisKind::Fixed => Err(GridErrorKind::UnsupportedKind(
                "fixed axis requires a key list".to_string(),
            )
            .into()),
        }
    }

    fn with_domain(domain: Domain, size: usize) -> GridResult<Self> {
        let mut axis = Self { domain, size: 0 };
        axis.set_size(size)?;
        Ok(axis)
    }

    /// Returns the kind identifier.
    pub fn kind(&self) -> AxisKind {
        match self.domain {
            Domain::Int => AxisKind::Int,
            Domain::OneBased => AxisKind::OneBased,
            Domain::Letters => AxisKind::Letters,
            Domain::Fixed(_) => AxisKind::Fixed,
        }
    }

    /// Returns the number of labels in the current domain.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the largest size this axis accepts.
    pub fn max_size(&self) -> usize {
        match &self.domain {
            Domain::Int | Domain::OneBased => INT_AXIS_MAX_SIZE,
            Domain::Letters => LETTERS_MAX_SIZE,
            Domain::Fixed(keys) => keys.len(),
        }
    }

    /// Returns the full backing key list of a fixed axis.
    pub fn keys(&self) -> Option<&[Label]> {
        match &self.domain {
            Domain::Fixed(keys) => Some(keys),
            _ => None,
        }
    }

    /// Resizes the domain.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` unless `1 <= size <= max_size()`.
    #[instrument(skip(self), fields(kind = %self.kind()))]
    pub fn set_size(&mut self, size: usize) -> GridResult<()> {
        let max = self.max_size();
        if size < 1 || size > max {
            return Err(GridError::new(GridErrorKind::InvalidSize { size, max }));
        }
        self.size = size;
        Ok(())
    }

    /// Returns the label at `ordinal`.
    ///
    /// # Errors
    ///
    /// Returns `OrdinalOutOfRange` unless `ordinal < size()`.
    pub fn label_at(&self, ordinal: usize) -> GridResult<Label> {
        if ordinal >= self.size {
            return Err(GridErrorKind::OrdinalOutOfRange {
                min: 0,
                max: self.size - 1,
                index: ordinal,
            }
            .into());
        }
        Ok(self.label_unchecked(ordinal))
    }

    fn label_unchecked(&self, ordinal: usize) -> Label {
        match &self.domain {
            Domain::Int => Label::Int(ordinal as i64),
            Domain::OneBased => Label::Int(ordinal as i64 + 1),
            Domain::Letters => Label::from(letter_at(ordinal)),
            Domain::Fixed(keys) => keys[ordinal].clone(),
        }
    }

    /// Returns the ordinal of `label`.
    ///
    /// # Errors
    ///
    /// Returns `LabelOutOfRange` if the label is not part of the current
    /// domain, including letters that exist in the alphabet but lie past
    /// the current size.
    pub fn ordinal_of(&self, label: &Label) -> GridResult<usize> {
        self.find_ordinal(label)
            .ok_or_else(|| self.out_of_range(label.clone()).into())
    }

    fn find_ordinal(&self, label: &Label) -> Option<usize> {
        let ordinal = match &self.domain {
            Domain::Int => usize::try_from(label.as_int()?).ok()?,
            Domain::OneBased => usize::try_from(label.as_int()?.checked_sub(1)?).ok()?,
            Domain::Letters => {
                let mut chars = label.as_text()?.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                letter_ordinal(ch)?
            }
            Domain::Fixed(keys) => keys[..self.size].iter().position(|key| key == label)?,
        };
        (ordinal < self.size).then_some(ordinal)
    }

    fn out_of_range(&self, label: Label) -> GridErrorKind {
        GridErrorKind::LabelOutOfRange {
            first: self.first(),
            last: self.last(),
            label,
        }
    }

    /// Checks whether `label` belongs to the current domain.
    pub fn contains(&self, label: &Label) -> bool {
        self.find_ordinal(label).is_some()
    }

    /// First label of the domain.
    pub fn first(&self) -> Label {
        self.label_unchecked(0)
    }

    /// Last label of the domain.
    pub fn last(&self) -> Label {
        self.label_unchecked(self.size - 1)
    }

    /// Iterates the labels in axis order.
    pub fn labels(&self) -> impl DoubleEndedIterator<Item = Label> + '_ {
        (0..self.size).map(move |ordinal| self.label_unchecked(ordinal))
    }

    /// Parses user text into a label of this axis.
    ///
    /// Numeric axes expect an integer; letter and fixed axes compare against
    /// the textual form of their labels.
    ///
    /// # Errors
    ///
    /// Returns `LabelOutOfRange` if the text does not name a label in the
    /// current domain.
    #[instrument(skip(self), fields(kind = %self.kind()))]
    pub fn parse_label(&self, text: &str) -> GridResult<Label> {
        let text = text.trim();
        let label = match &self.domain {
            Domain::Int | Domain::OneBased => match text.parse::<i64>() {
                Ok(value) => Label::Int(value),
                Err(_) => return Err(self.out_of_range(Label::from(text)).into()),
            },
            Domain::Letters => Label::from(text),
            Domain::Fixed(keys) => keys[..self.size]
                .iter()
                .find(|key| key.to_string() == text)
                .cloned()
                .unwrap_or_else(|| Label::from(text)),
        };
        self.ordinal_of(&label)?;
        Ok(label)
    }
}

fn letter_at(ordinal: usize) -> char {
    let ordinal = ordinal as u8;
    if ordinal < 26 {
        (b'a' + ordinal) as char
    } else {
        (b'A' + ordinal - 26) as char
    }
}

fn letter_ordinal(ch: char) -> Option<usize> {
    match ch {
        'a'..='z' => Some(ch as usize - 'a' as usize),
        'A'..='Z' => Some(ch as usize - 'A' as usize + 26),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn assert_bijection(axis: &Axis) {
        for ordinal in 0..axis.size() {
            let label = axis.label_at(ordinal).unwrap();
            assert_eq!(axis.ordinal_of(&label).unwrap(), ordinal);
        }
        for label in axis.labels() {
            let ordinal = axis.ordinal_of(&label).unwrap();
            assert_eq!(axis.label_at(ordinal).unwrap(), label);
        }
    }

    #[test]
    fn test_bijection_all_kinds() {
        assert_bijection(&Axis::int(7).unwrap());
        assert_bijection(&Axis::one_based(7).unwrap());
        assert_bijection(&Axis::letters(52).unwrap());
        assert_bijection(&Axis::fixed(["aa", "bb", "cc"]).unwrap());
    }

    #[test]
    fn test_int_axis_domain() {
        let axis = Axis::int(3).unwrap();
        assert_eq!(axis.labels().collect::<Vec<_>>(), vec![0.into(), 1.into(), 2.into()]);
        assert!(!axis.contains(&Label::Int(3)));
        assert!(!axis.contains(&Label::Int(-1)));
        assert_eq!(axis.max_size(), INT_AXIS_MAX_SIZE);
    }

    #[test]
    fn test_one_based_axis_domain() {
        let axis = Axis::one_based(3).unwrap();
        assert_eq!(axis.first(), Label::Int(1));
        assert_eq!(axis.last(), Label::Int(3));
        assert!(!axis.contains(&Label::Int(0)));
        assert_eq!(axis.ordinal_of(&Label::Int(3)).unwrap(), 2);
    }

    #[test]
    fn test_letters_wrap_to_uppercase() {
        let axis = Axis::letters(52).unwrap();
        assert_eq!(axis.label_at(25).unwrap(), Label::from('z'));
        assert_eq!(axis.label_at(26).unwrap(), Label::from('A'));
        assert_eq!(axis.label_at(51).unwrap(), Label::from('Z'));
        assert!(Axis::letters(53).is_err());
    }

    #[test]
    fn test_letters_reject_truncated_range() {
        let axis = Axis::letters(5).unwrap();
        let err = axis.ordinal_of(&Label::from('f')).unwrap_err();
        assert_eq!(err.kind.to_string(), "Label should be in range [a..e]: f");
        assert_eq!(err.category(), ErrorCategory::OutOfRange);
    }

    #[test]
    fn test_ordinal_out_of_range() {
        let axis = Axis::letters(5).unwrap();
        let err = axis.label_at(5).unwrap_err();
        assert_eq!(err.kind.to_string(), "Index should be in range [0..4]: 5");
    }

    #[test]
    fn test_set_size_bounds() {
        let mut axis = Axis::int(3).unwrap();
        assert!(matches!(
            axis.set_size(0).unwrap_err().kind,
            GridErrorKind::InvalidSize { size: 0, .. }
        ));
        axis.set_size(5).unwrap();
        assert_eq!(axis.size(), 5);
        assert_eq!(axis.last(), Label::Int(4));
    }

    #[test]
    fn test_fixed_axis_prefix() {
        let mut axis = Axis::fixed(["aa", "bb", "cc"]).unwrap();
        assert_eq!(axis.max_size(), 3);
        axis.set_size(2).unwrap();
        assert!(!axis.contains(&Label::from("cc")));
        axis.set_size(3).unwrap();
        assert!(axis.contains(&Label::from("cc")));
        assert!(axis.set_size(4).is_err());
    }

    #[test]
    fn test_fixed_axis_rejects_repeated_key() {
        let err = Axis::fixed(["a", "b", "a"]).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.kind, GridErrorKind::DuplicateKey(Label::from("a")));

        let axis = Axis::fixed(["a", "b", "c"]).unwrap();
        assert_bijection(&axis);
        assert_eq!(axis.ordinal_of(&axis.label_at(2).unwrap()).unwrap(), 2);
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(Axis::one_based(3).unwrap().parse_label(" 2 ").unwrap(), Label::Int(2));
        assert!(Axis::one_based(3).unwrap().parse_label("b").is_err());
        assert_eq!(Axis::letters(3).unwrap().parse_label("c").unwrap(), Label::from('c'));
        assert!(Axis::letters(3).unwrap().parse_label("d").is_err());
        let fixed = Axis::fixed([10, 20]).unwrap();
        assert_eq!(fixed.parse_label("20").unwrap(), Label::Int(20));
    }
}
