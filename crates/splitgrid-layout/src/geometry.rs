//! Ratio-to-pixel geometry for one layout pass.
//!
//! Ratio slot 0 of the column sequence is always the leftmost column and slot
//! 0 of the row sequence is always the bottom row. The orientation only
//! changes the order in which children are assigned to cells: right-to-left
//! fills start at the right edge and walk the column slots backwards,
//! top-to-bottom fills start at the top edge and walk the row slots
//! backwards.

use splitgrid_core::geometry::Rect;

use crate::orientation::{FillOrder, Orientation};
use crate::ratios::Axis;
use crate::shape::{GridShape, internal_extent};

/// Receives the rectangle computed for it by a layout pass.
pub trait GridChild {
    fn set_bounds(&mut self, bounds: Rect);
}

impl GridChild for Rect {
    fn set_bounds(&mut self, bounds: Rect) {
        *self = bounds;
    }
}

impl<T: GridChild + ?Sized> GridChild for &mut T {
    fn set_bounds(&mut self, bounds: Rect) {
        (**self).set_bounds(bounds);
    }
}

/// Borrowed view of everything a layout pass or hit test needs.
#[derive(Debug, Clone, Copy)]
pub struct GridGeometry<'a> {
    pub bounds: Rect,
    pub shape: GridShape,
    pub margin: f64,
    pub orientation: Orientation,
    pub column_ratios: &'a [f64],
    pub row_ratios: &'a [f64],
}

impl GridGeometry<'_> {
    /// Width left for cells after inter-column margins.
    #[must_use]
    pub fn internal_width(&self) -> f64 {
        internal_extent(self.bounds.width, self.shape.columns, self.margin)
    }

    /// Height left for cells after inter-row margins.
    #[must_use]
    pub fn internal_height(&self) -> f64 {
        internal_extent(self.bounds.height, self.shape.rows, self.margin)
    }

    #[must_use]
    pub fn internal_extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Column => self.internal_width(),
            Axis::Row => self.internal_height(),
        }
    }

    #[must_use]
    pub fn ratios(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Column => self.column_ratios,
            Axis::Row => self.row_ratios,
        }
    }

    /// Grid origin along the axis the splitters of `axis` move on.
    #[must_use]
    pub fn origin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Column => self.bounds.x,
            Axis::Row => self.bounds.y,
        }
    }

    /// Pixel size of ratio slot `index` on `axis`.
    ///
    /// `None` when the slot does not exist or the ratio sum is not positive.
    #[must_use]
    pub fn slot_size(&self, axis: Axis, index: usize) -> Option<f64> {
        let ratios = self.ratios(axis);
        let ratio = *ratios.get(index)?;
        let sum = positive_sum(ratios)?;
        Some(self.internal_extent(axis) * ratio / sum)
    }

    /// Origin, internal extent and margin along `axis`.
    #[must_use]
    pub fn axis_frame(&self, axis: Axis) -> AxisFrame {
        AxisFrame {
            origin: self.origin(axis),
            extent: self.internal_extent(axis),
            margin: self.margin,
        }
    }

    /// Start of the splitter band after slot `index` on `axis`.
    #[must_use]
    pub fn splitter_start(&self, axis: Axis, index: usize) -> Option<f64> {
        self.axis_frame(axis).splitter_start(self.ratios(axis), index)
    }

    /// Place up to `child_count` children in fill order.
    ///
    /// Returns an empty layout when the shape is degenerate, either ratio
    /// sequence is empty, or either ratio sum is not positive.
    #[must_use]
    pub fn layout(&self, child_count: usize) -> GridLayout {
        if child_count == 0
            || self.shape.is_degenerate()
            || self.column_ratios.is_empty()
            || self.row_ratios.is_empty()
        {
            return GridLayout::default();
        }
        let (Some(column_sum), Some(row_sum)) =
            (positive_sum(self.column_ratios), positive_sum(self.row_ratios))
        else {
            return GridLayout::default();
        };

        let width = self.internal_width();
        let height = self.internal_height();
        let margin = self.margin;
        let right_to_left = self.orientation.is_right_to_left();
        let top_to_bottom = self.orientation.is_top_to_bottom();

        let column_sizes: Vec<f64> = ordered(self.column_ratios, right_to_left)
            .map(|ratio| width * ratio / column_sum)
            .collect();
        let row_sizes: Vec<f64> = ordered(self.row_ratios, top_to_bottom)
            .map(|ratio| height * ratio / row_sum)
            .collect();

        let x_step = if right_to_left { -1.0 } else { 1.0 };
        let y_step = if top_to_bottom { -1.0 } else { 1.0 };
        let start_x = if right_to_left {
            self.bounds.right()
        } else {
            self.bounds.x
        };
        let start_y = if top_to_bottom {
            self.bounds.top()
        } else {
            self.bounds.y
        };

        // Cursor positions are the leading edge in fill direction; a reversed
        // axis places the cell on the far side of its cursor.
        let place = |x: f64, y: f64, w: f64, h: f64| {
            Rect::new(
                if right_to_left { x - w } else { x },
                if top_to_bottom { y - h } else { y },
                w,
                h,
            )
        };

        let mut cells = Vec::with_capacity(child_count.min(column_sizes.len() * row_sizes.len()));
        match self.orientation.fill_order() {
            FillOrder::RowMajor => {
                let mut y = start_y;
                for &h in &row_sizes {
                    let mut x = start_x;
                    for &w in &column_sizes {
                        cells.push(place(x, y, w, h));
                        if cells.len() >= child_count {
                            return GridLayout { cells };
                        }
                        x += x_step * (w + margin);
                    }
                    y += y_step * (h + margin);
                }
            }
            FillOrder::ColumnMajor => {
                let mut x = start_x;
                for &w in &column_sizes {
                    let mut y = start_y;
                    for &h in &row_sizes {
                        cells.push(place(x, y, w, h));
                        if cells.len() >= child_count {
                            return GridLayout { cells };
                        }
                        y += y_step * (h + margin);
                    }
                    x += x_step * (w + margin);
                }
            }
        }
        GridLayout { cells }
    }
}

/// One axis of the grid, independent of its ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    /// Grid origin on the axis (left edge or bottom edge).
    pub origin: f64,
    /// Internal extent: container size minus inter-cell margins.
    pub extent: f64,
    pub margin: f64,
}

impl AxisFrame {
    /// Start of the splitter band after slot `index`: origin plus the sizes of
    /// slots `0..=index` plus `index` margins.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn splitter_start(&self, ratios: &[f64], index: usize) -> Option<f64> {
        if index >= ratios.len() {
            return None;
        }
        let sum = positive_sum(ratios)?;
        let cells: f64 = ratios[..=index]
            .iter()
            .map(|ratio| self.extent * ratio / sum)
            .sum();
        Some(self.origin + self.margin * index as f64 + cells)
    }
}

/// Sum of `ratios` when it is finite and positive.
pub(crate) fn positive_sum(ratios: &[f64]) -> Option<f64> {
    let sum: f64 = ratios.iter().sum();
    (sum.is_finite() && sum > 0.0).then_some(sum)
}

fn ordered(ratios: &[f64], reversed: bool) -> Box<dyn Iterator<Item = f64> + '_> {
    if reversed {
        Box::new(ratios.iter().rev().copied())
    } else {
        Box::new(ratios.iter().copied())
    }
}

/// Result of one layout pass: one rectangle per placed child, in child order.
///
/// Children beyond `len()` were not placed (no ratio slot left for them).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    cells: Vec<Rect>,
}

impl GridLayout {
    /// Rectangle of child `index`, if it was placed.
    #[must_use]
    pub fn rect(&self, index: usize) -> Option<Rect> {
        self.cells.get(index).copied()
    }

    /// Iterate `(child index, rect)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.cells.iter().copied().enumerate()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Rect] {
        &self.cells
    }

    /// Write each computed rectangle into the matching child.
    ///
    /// Returns the number of children positioned.
    pub fn apply<C: GridChild>(&self, children: &mut [C]) -> usize {
        let mut placed = 0;
        for (child, rect) in children.iter_mut().zip(&self.cells) {
            child.set_bounds(*rect);
            placed += 1;
        }
        placed
    }

    /// Smallest rectangle covering every placed cell.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        let (first, rest) = self.cells.split_first()?;
        Some(rest.iter().fold(*first, |acc, rect| acc.union(rect)))
    }
}
