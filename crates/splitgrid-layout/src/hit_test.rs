//! Splitter band hit testing.

use serde::{Deserialize, Serialize};
use splitgrid_core::cursor::CursorKind;
use splitgrid_core::geometry::Point;

use crate::geometry::GridGeometry;
use crate::ratios::Axis;

/// Splitters under a point. Index `i` separates ratio slots `i` and `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SplitterMatch {
    pub column: Option<usize>,
    pub row: Option<usize>,
}

impl SplitterMatch {
    pub const NONE: Self = Self {
        column: None,
        row: None,
    };

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.column.is_none() && self.row.is_none()
    }

    #[must_use]
    pub const fn index(&self, axis: Axis) -> Option<usize> {
        match axis {
            Axis::Column => self.column,
            Axis::Row => self.row,
        }
    }

    /// Cursor to show while hovering this match.
    #[must_use]
    pub const fn cursor_kind(&self) -> CursorKind {
        match (self.column, self.row) {
            (Some(_), Some(_)) => CursorKind::ResizeAll,
            (None, Some(_)) => CursorKind::ResizeVertical,
            (Some(_), None) => CursorKind::ResizeHorizontal,
            (None, None) => CursorKind::Arrow,
        }
    }
}

/// Find the column and row splitter bands containing `position`.
///
/// Bands are half-open `[start, start + margin)` and scanned in ratio-slot
/// order, first match wins. Only bands that have a slot on both sides are
/// reported. Points outside the grid bounds never match.
#[must_use]
pub fn match_splitter(geometry: &GridGeometry<'_>, position: Point) -> SplitterMatch {
    if !geometry.bounds.contains(position) {
        return SplitterMatch::NONE;
    }
    SplitterMatch {
        column: scan_bands(geometry, Axis::Column, position.x),
        row: scan_bands(geometry, Axis::Row, position.y),
    }
}

fn scan_bands(geometry: &GridGeometry<'_>, axis: Axis, coordinate: f64) -> Option<usize> {
    let ratios = geometry.ratios(axis);
    let frame = geometry.axis_frame(axis);
    (0..ratios.len().saturating_sub(1)).find(|&index| {
        frame
            .splitter_start(ratios, index)
            .is_some_and(|start| coordinate >= start && coordinate < start + frame.margin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Orientation;
    use crate::shape::GridShape;
    use splitgrid_core::geometry::Rect;

    fn geometry<'a>(columns: &'a [f64], rows: &'a [f64]) -> GridGeometry<'a> {
        GridGeometry {
            bounds: Rect::new(100.0, 50.0, 220.0, 220.0),
            shape: GridShape {
                rows: rows.len(),
                columns: columns.len(),
            },
            margin: 10.0,
            orientation: Orientation::LrTb,
            column_ratios: columns,
            row_ratios: rows,
        }
    }

    #[test]
    fn outside_bounds_is_empty() {
        let g = geometry(&[1.0, 1.0], &[1.0, 1.0]);
        assert!(match_splitter(&g, Point::new(0.0, 0.0)).is_empty());
        assert!(match_splitter(&g, Point::new(320.0, 160.0)).is_empty());
        assert!(match_splitter(&g, Point::new(210.0, 270.0)).is_empty());
    }

    #[test]
    fn column_band_is_half_open() {
        let g = geometry(&[1.0, 1.0], &[1.0]);
        // Column 0 spans 100..205, band 205..215.
        assert_eq!(match_splitter(&g, Point::new(205.0, 60.0)).column, Some(0));
        assert_eq!(match_splitter(&g, Point::new(214.9, 60.0)).column, Some(0));
        assert_eq!(match_splitter(&g, Point::new(215.0, 60.0)).column, None);
        assert_eq!(match_splitter(&g, Point::new(204.9, 60.0)).column, None);
    }

    #[test]
    fn corner_reports_both_axes() {
        let g = geometry(&[1.0, 1.0], &[1.0, 1.0]);
        let hit = match_splitter(&g, Point::new(207.0, 157.0));
        assert_eq!(
            hit,
            SplitterMatch {
                column: Some(0),
                row: Some(0)
            }
        );
        assert_eq!(hit.cursor_kind(), CursorKind::ResizeAll);
    }

    #[test]
    fn later_bands_follow_ratios() {
        let g = geometry(&[1.0, 2.0, 1.0], &[1.0]);
        // internal width 200: 50 | 10 | 100 | 10 | 50
        let hit = match_splitter(&g, Point::new(100.0 + 50.0 + 10.0 + 100.0 + 1.0, 60.0));
        assert_eq!(hit.column, Some(1));
        assert_eq!(hit.row, None);
        assert_eq!(hit.cursor_kind(), CursorKind::ResizeHorizontal);
    }

    #[test]
    fn row_only_match_uses_vertical_cursor() {
        let g = geometry(&[1.0], &[1.0, 1.0]);
        let hit = match_splitter(&g, Point::new(110.0, 50.0 + 105.0));
        assert_eq!(hit.row, Some(0));
        assert_eq!(hit.index(Axis::Row), Some(0));
        assert_eq!(hit.cursor_kind(), CursorKind::ResizeVertical);
    }

    #[test]
    fn single_slot_has_no_splitter() {
        let g = geometry(&[1.0], &[1.0]);
        assert!(match_splitter(&g, Point::new(319.0, 269.0)).is_empty());
    }

    #[test]
    fn zero_margin_never_matches() {
        let mut g = geometry(&[1.0, 1.0], &[1.0, 1.0]);
        g.margin = 0.0;
        assert!(match_splitter(&g, Point::new(210.0, 160.0)).is_empty());
    }
}
