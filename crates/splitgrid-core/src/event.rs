#![forbid(unsafe_code)]

//! Pointer and touch input consumed by the grid.
//!
//! # Design Notes
//!
//! - Positions use the same parent coordinate space as the grid bounds.
//! - `delta_x`/`delta_y` are incremental since the previous event for the
//!   same [`PointerId`], as delivered by the host.
//! - A [`PointerId`] stays stable from down to up; concurrent touches carry
//!   distinct ids.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Stable identity of one pointer or touch across down/move/up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(u64);

impl PointerId {
    /// Wrap a host-provided identity.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pointer#{}", self.0)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEventKind {
    /// Pointer pressed or touch began.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released or touch ended.
    Up,
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pointer: PointerId,
    pub position: Point,
    /// Horizontal movement since the previous event of this pointer.
    pub delta_x: f64,
    /// Vertical movement since the previous event of this pointer (y-up).
    pub delta_y: f64,
}

impl PointerEvent {
    /// Create a pointer event with zero delta.
    #[must_use]
    pub const fn new(kind: PointerEventKind, pointer: PointerId, position: Point) -> Self {
        Self {
            kind,
            pointer,
            position,
            delta_x: 0.0,
            delta_y: 0.0,
        }
    }

    /// Pointer-down at `position`.
    #[must_use]
    pub const fn down(pointer: PointerId, position: Point) -> Self {
        Self::new(PointerEventKind::Down, pointer, position)
    }

    /// Pointer-move to `position` having travelled `(delta_x, delta_y)`.
    #[must_use]
    pub const fn moved(pointer: PointerId, position: Point, delta_x: f64, delta_y: f64) -> Self {
        Self {
            kind: PointerEventKind::Move,
            pointer,
            position,
            delta_x,
            delta_y,
        }
    }

    /// Pointer-up at `position`.
    #[must_use]
    pub const fn up(pointer: PointerId, position: Point) -> Self {
        Self::new(PointerEventKind::Up, pointer, position)
    }
}
