//! Grid shape derivation and internal extents.

use serde::{Deserialize, Serialize};

/// Row and column count derived from the child count and count settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub columns: usize,
}

impl GridShape {
    /// A shape with no cells; layout is a no-op.
    pub const EMPTY: Self = Self {
        rows: 0,
        columns: 0,
    };

    /// Number of cells the shape can hold.
    #[must_use]
    pub const fn capacity(self) -> usize {
        self.rows * self.columns
    }

    /// True when the shape cannot place any child.
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.rows == 0 || self.columns == 0
    }
}

/// Derive `(rows, columns)` from the child count.
///
/// A positive `columns_setting` wins; otherwise a positive `rows_setting`
/// fixes the rows. With both settings at zero the shape is
/// [`GridShape::EMPTY`].
#[must_use]
pub fn compute_shape(child_count: usize, columns_setting: usize, rows_setting: usize) -> GridShape {
    if columns_setting > 0 {
        GridShape {
            rows: child_count.div_ceil(columns_setting),
            columns: columns_setting,
        }
    } else if rows_setting > 0 {
        GridShape {
            rows: rows_setting,
            columns: child_count.div_ceil(rows_setting),
        }
    } else {
        GridShape::EMPTY
    }
}

/// Space left for cells along one axis after subtracting inter-cell margins.
///
/// May be negative when margins exceed the container; callers treat a
/// non-positive extent as "nothing to lay out" rather than an error.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn internal_extent(container: f64, count: usize, margin: f64) -> f64 {
    let gaps = count.saturating_sub(1) as f64;
    container - margin * gaps
}
