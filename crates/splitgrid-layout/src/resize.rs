//! Splitter drag sessions and proportional redistribution.
//!
//! ```text
//! Idle --pointer down on a band--> Active --pointer up / release--> Idle
//! ```
//!
//! One [`ResizeSession`] exists per grabbed [`PointerId`]. A session may own
//! a column splitter, a row splitter, or both when the grab started where two
//! bands cross. Each move redistributes pixels between the two slots next to
//! the splitter, conserving their combined size and honoring the per-axis
//! floor.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use splitgrid_core::event::PointerId;

use crate::geometry::{AxisFrame, positive_sum};
use crate::hit_test::SplitterMatch;
use crate::ratios::{Axis, RatioSequence};

/// In-progress drag for one pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeSession {
    pub pointer: PointerId,
    pub column: Option<usize>,
    pub row: Option<usize>,
}

impl ResizeSession {
    /// Start a session from a hit-test result. `None` if nothing matched.
    #[must_use]
    pub fn begin(pointer: PointerId, hit: SplitterMatch) -> Option<Self> {
        if hit.is_empty() {
            return None;
        }
        Some(Self {
            pointer,
            column: hit.column,
            row: hit.row,
        })
    }

    #[must_use]
    pub const fn index(&self, axis: Axis) -> Option<usize> {
        match axis {
            Axis::Column => self.column,
            Axis::Row => self.row,
        }
    }

    /// Axes this session drags, columns first.
    pub fn axes(&self) -> impl Iterator<Item = (Axis, usize)> {
        self.column
            .map(|index| (Axis::Column, index))
            .into_iter()
            .chain(self.row.map(|index| (Axis::Row, index)))
    }

    /// True when every owned splitter still has both neighbors in `lens`.
    #[must_use]
    pub fn fits(&self, column_len: usize, row_len: usize) -> bool {
        self.column.is_none_or(|index| index + 1 < column_len)
            && self.row.is_none_or(|index| index + 1 < row_len)
    }
}

/// Shared count of active resize sessions.
///
/// Cursor probing is skipped while the count is non-zero so the cursor does
/// not flicker under a drag. [`ResizeCounter::global`] is shared by every
/// grid in the process; grids may be given a scoped counter instead.
#[derive(Debug, Clone, Default)]
pub struct ResizeCounter(Arc<AtomicUsize>);

impl ResizeCounter {
    /// A fresh counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide counter.
    #[must_use]
    pub fn global() -> Self {
        static GLOBAL: OnceLock<ResizeCounter> = OnceLock::new();
        GLOBAL.get_or_init(ResizeCounter::new).clone()
    }

    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.get() > 0
    }

    pub fn increment(&self) -> usize {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Decrement, saturating at zero. Returns the new count.
    pub fn decrement(&self) -> usize {
        let previous = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| {
                Some(count.saturating_sub(1))
            })
            .unwrap_or_default();
        previous.saturating_sub(1)
    }

    /// Whether both handles share the same underlying count.
    #[must_use]
    pub fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Enforce the floor on a pair of adjacent sizes whose sum is conserved.
///
/// The first size is clamped first and the second absorbs the remainder, then
/// the second is clamped and the first absorbs. When `first + second` is below
/// `2 * min_size` both floors cannot hold: the first slot keeps exactly
/// `min_size` and the second takes whatever is left, possibly below its floor.
#[must_use]
pub fn clamp_pair(first: f64, second: f64, min_size: f64) -> (f64, f64) {
    let total = first + second;
    if total < 2.0 * min_size {
        return (min_size, total - min_size);
    }
    let first = first.max(min_size);
    let second = (total - first).max(min_size);
    let first = total - second;
    (first, second)
}

/// Why a drag step left the ratios untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeNoopReason {
    /// Delta was zero on this axis.
    NoMovement,
    /// The pointer is on the far side of the splitter for this direction.
    NotCrossingBoundary,
    /// Ratio sum or internal extent is not positive.
    DegenerateAxis,
    /// The splitter index no longer has two neighbors.
    IndexOutOfRange,
}

impl fmt::Display for ResizeNoopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoMovement => "no movement",
            Self::NotCrossingBoundary => "pointer not crossing splitter",
            Self::DegenerateAxis => "degenerate axis",
            Self::IndexOutOfRange => "splitter index out of range",
        };
        f.write_str(text)
    }
}

/// Outcome of one axis of one drag step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RedistributeOutcome {
    Applied {
        index: usize,
        first_size: f64,
        second_size: f64,
    },
    Noop {
        reason: ResizeNoopReason,
    },
}

impl RedistributeOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Inputs of one drag step along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    pub index: usize,
    /// Pointer coordinate on the axis (x for columns, y for rows).
    pub coordinate: f64,
    /// Pointer movement on the axis since the previous event.
    pub delta: f64,
    pub min_size: f64,
}

/// Move the splitter after slot `step.index` by `step.delta` pixels.
///
/// Movement only applies while the pointer is still on the side of the
/// splitter it is travelling towards, so the splitter is never pulled past the
/// pointer. The pair's pixel sizes are clamped with [`clamp_pair`] and written
/// back as ratios assuming the sequence sum is unchanged.
pub fn redistribute(
    frame: AxisFrame,
    ratios: &mut RatioSequence,
    step: DragStep,
) -> RedistributeOutcome {
    let noop = |reason| RedistributeOutcome::Noop { reason };
    let index = step.index;
    if index + 1 >= ratios.len() {
        return noop(ResizeNoopReason::IndexOutOfRange);
    }
    if step.delta == 0.0 {
        return noop(ResizeNoopReason::NoMovement);
    }
    let extent = frame.extent;
    let Some(sum) = positive_sum(ratios.as_slice()) else {
        return noop(ResizeNoopReason::DegenerateAxis);
    };
    if !(extent.is_finite() && extent > 0.0) {
        return noop(ResizeNoopReason::DegenerateAxis);
    }
    let Some(boundary) = frame.splitter_start(ratios.as_slice(), index) else {
        return noop(ResizeNoopReason::DegenerateAxis);
    };

    let crossing = (step.delta < 0.0 && step.coordinate < boundary)
        || (step.delta > 0.0 && step.coordinate > boundary);
    if !crossing {
        return noop(ResizeNoopReason::NotCrossingBoundary);
    }

    let first = extent * ratios[index] / sum + step.delta;
    let second = extent * ratios[index + 1] / sum - step.delta;
    let (first_size, second_size) = clamp_pair(first, second, step.min_size);

    if !ratios.set_pair(
        index,
        sum * first_size / extent,
        sum * second_size / extent,
    ) {
        return noop(ResizeNoopReason::DegenerateAxis);
    }
    RedistributeOutcome::Applied {
        index,
        first_size,
        second_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // Two columns in a 220px container with 10px margin: internal width 210.
    const FRAME: AxisFrame = AxisFrame {
        origin: 0.0,
        extent: 210.0,
        margin: 10.0,
    };

    fn drag(ratios: &mut RatioSequence, coordinate: f64, delta: f64) -> RedistributeOutcome {
        redistribute(
            FRAME,
            ratios,
            DragStep {
                index: 0,
                coordinate,
                delta,
                min_size: 40.0,
            },
        )
    }

    #[test]
    fn clamp_within_bounds_is_identity() {
        assert_eq!(clamp_pair(85.0, 125.0, 40.0), (85.0, 125.0));
    }

    #[test]
    fn clamp_raises_first_to_floor() {
        assert_eq!(clamp_pair(15.0, 195.0, 40.0), (40.0, 170.0));
    }

    #[test]
    fn clamp_raises_second_to_floor() {
        assert_eq!(clamp_pair(190.0, 20.0, 40.0), (170.0, 40.0));
    }

    #[test]
    fn clamp_when_total_below_twice_floor() {
        let (first, second) = clamp_pair(10.0, 50.0, 40.0);
        assert_eq!(first, 40.0);
        assert_eq!(second, 20.0);

        let (first, second) = clamp_pair(70.0, -40.0, 40.0);
        assert_eq!(first, 40.0);
        assert_eq!(second, -10.0);
    }

    #[test]
    fn clamp_at_exactly_twice_floor() {
        assert_eq!(clamp_pair(0.0, 80.0, 40.0), (40.0, 40.0));
        assert_eq!(clamp_pair(80.0, 0.0, 40.0), (40.0, 40.0));
    }

    #[test]
    fn drag_left_shrinks_first_column() {
        let mut ratios = RatioSequence::uniform(2);
        let outcome = drag(&mut ratios, 100.0, -20.0);
        assert_eq!(
            outcome,
            RedistributeOutcome::Applied {
                index: 0,
                first_size: 85.0,
                second_size: 125.0
            }
        );
        assert!(approx(ratios[0], 2.0 * 85.0 / 210.0));
        assert!(approx(ratios[1], 2.0 * 125.0 / 210.0));
        assert!(approx(ratios.sum(), 2.0));
    }

    #[test]
    fn drag_past_floor_clamps() {
        let mut ratios = RatioSequence::uniform(2);
        let outcome = drag(&mut ratios, 10.0, -90.0);
        assert_eq!(
            outcome,
            RedistributeOutcome::Applied {
                index: 0,
                first_size: 40.0,
                second_size: 170.0
            }
        );
    }

    #[test]
    fn pointer_behind_boundary_is_ignored() {
        let mut ratios = RatioSequence::uniform(2);
        // Boundary is at 105; moving left while still right of it does nothing.
        assert_eq!(
            drag(&mut ratios, 110.0, -5.0),
            RedistributeOutcome::Noop {
                reason: ResizeNoopReason::NotCrossingBoundary
            }
        );
        assert_eq!(
            drag(&mut ratios, 100.0, 5.0),
            RedistributeOutcome::Noop {
                reason: ResizeNoopReason::NotCrossingBoundary
            }
        );
        assert_eq!(ratios, RatioSequence::uniform(2));
    }

    #[test]
    fn zero_delta_is_noop() {
        let mut ratios = RatioSequence::uniform(2);
        assert_eq!(
            drag(&mut ratios, 100.0, 0.0),
            RedistributeOutcome::Noop {
                reason: ResizeNoopReason::NoMovement
            }
        );
    }

    #[test]
    fn stale_index_is_reported() {
        let mut ratios = RatioSequence::uniform(1);
        assert_eq!(
            drag(&mut ratios, 0.0, -1.0),
            RedistributeOutcome::Noop {
                reason: ResizeNoopReason::IndexOutOfRange
            }
        );
    }

    #[test]
    fn negative_extent_is_degenerate() {
        let mut ratios = RatioSequence::uniform(2);
        let frame = AxisFrame {
            extent: -5.0,
            ..FRAME
        };
        let outcome = redistribute(
            frame,
            &mut ratios,
            DragStep {
                index: 0,
                coordinate: -100.0,
                delta: -1.0,
                min_size: 40.0,
            },
        );
        assert_eq!(
            outcome,
            RedistributeOutcome::Noop {
                reason: ResizeNoopReason::DegenerateAxis
            }
        );
    }

    #[test]
    fn boundary_follows_frame_origin() {
        let mut ratios = RatioSequence::uniform(2);
        let frame = AxisFrame {
            origin: 500.0,
            ..FRAME
        };
        let step = DragStep {
            index: 0,
            coordinate: 600.0,
            delta: -10.0,
            min_size: 40.0,
        };
        assert!(redistribute(frame, &mut ratios, step).is_applied());
        assert!(approx(ratios[0] + ratios[1], 2.0));
    }

    #[test]
    fn session_requires_a_match() {
        let pointer = PointerId::new(1);
        assert_eq!(ResizeSession::begin(pointer, SplitterMatch::NONE), None);
        let session = ResizeSession::begin(
            pointer,
            SplitterMatch {
                column: Some(2),
                row: Some(0),
            },
        )
        .expect("non-empty match");
        assert_eq!(
            session.axes().collect::<Vec<_>>(),
            vec![(Axis::Column, 2), (Axis::Row, 0)]
        );
        assert!(session.fits(4, 2));
        assert!(!session.fits(3, 2));
    }

    #[test]
    fn counter_never_goes_negative() {
        let counter = ResizeCounter::new();
        assert_eq!(counter.decrement(), 0);
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert!(counter.is_active());
        assert_eq!(counter.decrement(), 1);
        assert_eq!(counter.decrement(), 0);
        assert_eq!(counter.decrement(), 0);
        assert!(!counter.is_active());
    }

    #[test]
    fn global_counter_is_shared() {
        assert!(ResizeCounter::global().shares_with(&ResizeCounter::global()));
        assert!(!ResizeCounter::new().shares_with(&ResizeCounter::global()));
    }
}
