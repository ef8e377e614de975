#![forbid(unsafe_code)]

//! Ratio-driven grid layout with draggable splitters.
//!
//! # Role in splitgrid
//! `splitgrid-layout` arranges an ordered list of children into a grid whose
//! column widths and row heights follow relative weights. The gaps between
//! cells double as splitters: dragging one moves pixels between its two
//! neighbors and rewrites their weights.
//!
//! # Primary responsibilities
//! - **Shape**: derive `(rows, columns)` from the child count and whichever
//!   count setting is present.
//! - **Ratios**: keep one weight per column and row, padded or truncated as
//!   the shape changes.
//! - **Geometry**: place children in one of eight fill orientations.
//! - **Interaction**: hit-test splitter bands, run per-pointer drag sessions,
//!   and set resize cursors on hover.
//!
//! # Example
//!
//! ```
//! use splitgrid_layout::{Point, PointerEvent, PointerId, Rect, SplitterGrid};
//!
//! let mut grid: SplitterGrid = SplitterGrid::default();
//! grid.set_columns(2);
//! grid.set_child_count(4);
//! grid.set_bounds(Rect::from_size(220.0, 220.0));
//!
//! let mut cells = vec![Rect::default(); 4];
//! grid.layout_children(&mut cells);
//! assert_eq!(cells[0], Rect::new(0.0, 115.0, 105.0, 105.0));
//!
//! let finger = PointerId::new(1);
//! grid.handle_pointer(&PointerEvent::down(finger, Point::new(106.0, 50.0)));
//! grid.handle_pointer(&PointerEvent::moved(finger, Point::new(86.0, 50.0), -20.0, 0.0));
//! grid.handle_pointer(&PointerEvent::up(finger, Point::new(86.0, 50.0)));
//!
//! grid.layout_children(&mut cells);
//! assert!((cells[0].width - 85.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod geometry;
pub mod grid;
pub mod hit_test;
pub mod orientation;
pub mod ratios;
pub mod resize;
pub mod shape;

pub use config::{GridConfig, GridConfigError};
pub use geometry::{AxisFrame, GridChild, GridGeometry, GridLayout};
pub use grid::{GridChange, GridEvent, PointerDisposition, SplitterGrid, SubscriptionId};
pub use hit_test::{SplitterMatch, match_splitter};
pub use orientation::{
    FillOrder, HorizontalDirection, Orientation, OrientationParseError, VerticalDirection,
};
pub use ratios::{Axis, RatioError, RatioSequence, RatioStore};
pub use resize::{
    DragStep, RedistributeOutcome, ResizeCounter, ResizeNoopReason, ResizeSession, clamp_pair,
    redistribute,
};
pub use shape::{GridShape, compute_shape};
pub use splitgrid_core::{
    CursorKind, CursorService, NoopCursor, Point, PointerEvent, PointerEventKind, PointerId, Rect,
    RecordingCursor,
};
