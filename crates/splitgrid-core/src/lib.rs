#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and the cursor capability.
//!
//! # Role in splitgrid
//! `splitgrid-core` is the boundary to the host toolkit. It owns the
//! floating-point geometry primitives, the pointer/touch event model the
//! grid consumes, and the cursor service the host injects.
//!
//! # Primary responsibilities
//! - **Rect / Point**: y-up pixel geometry used for bounds and hit testing.
//! - **PointerEvent**: down/move/up with a stable [`event::PointerId`] and
//!   per-axis deltas.
//! - **CursorService**: capability for setting the system cursor, so cursor
//!   behavior is testable without a display.
//!
//! # How it fits in the system
//! `splitgrid-layout` consumes these types and never talks to the host
//! directly. Hosts translate their native events into [`PointerEvent`]s and
//! apply the rectangles the layout engine produces.

pub mod cursor;
pub mod event;
pub mod geometry;

pub use cursor::{CursorKind, CursorService, NoopCursor, RecordingCursor};
pub use event::{PointerEvent, PointerEventKind, PointerId};
pub use geometry::{Point, Rect};
