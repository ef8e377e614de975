//! Column and row ratio sequences.
//!
//! A ratio is a relative weight: the pixel size of slot `i` is
//! `ratio[i] / sum(ratios) * internal_extent`. Sequences never need to sum to
//! any fixed value.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::shape::GridShape;

/// Weight given to a slot appended by the count synchronizer.
pub const DEFAULT_RATIO: f64 = 1.0;

/// Which ratio sequence a splitter or change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Column ratios; splitters are vertical bands moved along x.
    Column,
    /// Row ratios; splitters are horizontal bands moved along y.
    Row,
}

/// Ordered sequence of finite weights with a positive sum.
///
/// Individual weights are normally positive. A drag whose pair is smaller
/// than twice the floor can leave one weight at or below zero; such a
/// sequence stays valid as long as its sum is positive, since geometry only
/// divides by the sum.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct RatioSequence {
    values: Vec<f64>,
}

impl RatioSequence {
    /// Validate and wrap `values`. An empty sequence is valid.
    pub fn new(values: Vec<f64>) -> Result<Self, RatioError> {
        validate_ratios(&values)?;
        Ok(Self { values })
    }

    /// `len` slots of [`DEFAULT_RATIO`].
    #[must_use]
    pub fn uniform(len: usize) -> Self {
        Self {
            values: vec![DEFAULT_RATIO; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Grow by appending [`DEFAULT_RATIO`] or shrink by dropping trailing
    /// slots until the length is `len`. Existing weights are never rescaled.
    ///
    /// Returns whether the sequence changed.
    pub fn resize(&mut self, len: usize) -> bool {
        let before = self.values.len();
        while self.values.len() < len {
            self.values.push(DEFAULT_RATIO);
        }
        while self.values.len() > len {
            self.values.pop();
        }
        before != len
    }

    /// Overwrite the pair `(index, index + 1)` produced by a splitter drag.
    ///
    /// Drag arithmetic can produce non-positive weights when the pair's
    /// combined size is below twice the floor; those are stored as-is. The
    /// pair sum is conserved, so the sequence sum stays positive.
    pub(crate) fn set_pair(&mut self, index: usize, first: f64, second: f64) -> bool {
        if index + 1 >= self.values.len() || !first.is_finite() || !second.is_finite() {
            return false;
        }
        self.values[index] = first;
        self.values[index + 1] = second;
        true
    }
}

impl Index<usize> for RatioSequence {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl TryFrom<Vec<f64>> for RatioSequence {
    type Error = RatioError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<RatioSequence> for Vec<f64> {
    fn from(sequence: RatioSequence) -> Self {
        sequence.values
    }
}

/// Every weight finite and, unless empty, a positive finite sum.
pub(crate) fn validate_ratios(values: &[f64]) -> Result<(), RatioError> {
    if let Some(index) = values.iter().position(|value| !value.is_finite()) {
        return Err(RatioError::NonFinite { index });
    }
    if values.is_empty() {
        return Ok(());
    }
    let sum: f64 = values.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return Err(RatioError::NonPositiveSum { sum });
    }
    Ok(())
}

/// Rejected ratio input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioError {
    NonFinite { index: usize },
    NonPositiveSum { sum: f64 },
}

impl fmt::Display for RatioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { index } => write!(f, "ratio at index {index} is not finite"),
            Self::NonPositiveSum { sum } => {
                write!(f, "ratios must sum to a finite value > 0 (got {sum})")
            }
        }
    }
}

impl std::error::Error for RatioError {}

/// Column and row ratio sequences, kept in step with the grid shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RatioStore {
    pub columns: RatioSequence,
    pub rows: RatioSequence,
}

impl RatioStore {
    #[must_use]
    pub fn new(columns: RatioSequence, rows: RatioSequence) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn axis(&self, axis: Axis) -> &RatioSequence {
        match axis {
            Axis::Column => &self.columns,
            Axis::Row => &self.rows,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut RatioSequence {
        match axis {
            Axis::Column => &mut self.columns,
            Axis::Row => &mut self.rows,
        }
    }

    /// Match both sequence lengths to `shape`. Returns the axes that changed.
    pub fn sync(&mut self, shape: GridShape) -> Vec<Axis> {
        let mut changed = Vec::new();
        if self.rows.resize(shape.rows) {
            changed.push(Axis::Row);
        }
        if self.columns.resize(shape.columns) {
            changed.push(Axis::Column);
        }
        changed
    }
}
