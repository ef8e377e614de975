//! The splitter grid: layout driver, drag sessions, and cursor feedback.
//!
//! [`SplitterGrid`] owns the configuration and ratio sequences of one grid.
//! Hosts feed it bounds, child counts, and pointer events; it answers with
//! [`GridLayout`]s and [`GridEvent`] notifications.
//!
//! # Invariants
//!
//! 1. After any setter returns, both ratio sequences have exactly as many
//!    slots as the derived shape has columns/rows.
//! 2. `ResizeStarted` for a pointer is emitted before any ratio change caused
//!    by that pointer, and `ResizeCompleted` after its grab is released.
//! 3. Every session increments the shared [`ResizeCounter`] once on start and
//!    decrements it once on end, including abandoned sessions and sessions
//!    still open when the grid is dropped.
//! 4. Layout is never cached: every pass re-derives shape and extents.
//!
//! # Event routing
//!
//! Pointer-down events should reach the grid only after its children have
//! declined them; the grid claims only presses that land on a splitter band.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use splitgrid_core::cursor::{CursorKind, CursorService, NoopCursor};
use splitgrid_core::event::{PointerEvent, PointerEventKind, PointerId};
use splitgrid_core::geometry::{Point, Rect};
use tracing::{debug, trace, warn};

use crate::config::{GridConfig, GridConfigError, is_valid_length};
use crate::geometry::{AxisFrame, GridChild, GridGeometry, GridLayout};
use crate::hit_test::{SplitterMatch, match_splitter};
use crate::orientation::Orientation;
use crate::ratios::{Axis, RatioError, RatioSequence, RatioStore};
use crate::resize::{DragStep, RedistributeOutcome, ResizeCounter, ResizeSession, redistribute};
use crate::shape::{GridShape, compute_shape};

/// Default gap between cells, in pixels.
pub const DEFAULT_MARGIN: f64 = 10.0;

/// Default floor for column widths and row heights, in pixels.
pub const DEFAULT_MIN_CELL_SIZE: f64 = 40.0;

/// Which input of the layout changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "change", content = "axis", rename_all = "snake_case")]
pub enum GridChange {
    Bounds,
    Columns,
    Rows,
    Margin,
    Orientation,
    Children,
    Ratios(Axis),
}

/// Notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GridEvent {
    ResizeStarted {
        pointer: PointerId,
        column: Option<usize>,
        row: Option<usize>,
    },
    ResizeCompleted {
        pointer: PointerId,
    },
    LayoutInvalidated {
        change: GridChange,
    },
}

/// Whether the grid handled a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerDisposition {
    /// The grid used the event; do not propagate it further.
    Consumed,
    /// The grid did not use the event; fall through to default handling.
    Ignored,
}

impl PointerDisposition {
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Handle returned by [`SplitterGrid::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&GridEvent)>;

/// Interactive grid whose row and column sizes follow ratio sequences that
/// the user adjusts by dragging the gaps between cells.
pub struct SplitterGrid<K: CursorService = NoopCursor> {
    bounds: Rect,
    columns: usize,
    rows: usize,
    margin: f64,
    min_column_width: f64,
    min_row_height: f64,
    orientation: Orientation,
    override_cursor: bool,
    child_count: usize,
    ratios: RatioStore,
    sessions: FxHashMap<PointerId, ResizeSession>,
    counter: ResizeCounter,
    cursor: K,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    dirty: bool,
}

impl Default for SplitterGrid<NoopCursor> {
    fn default() -> Self {
        Self::new(NoopCursor)
    }
}

impl<K: CursorService> Drop for SplitterGrid<K> {
    fn drop(&mut self) {
        if self.sessions.is_empty() {
            return;
        }
        for (pointer, _) in self.sessions.drain() {
            let active = self.counter.decrement();
            debug!(%pointer, active, "resize session dropped with grid");
        }
    }
}

impl<K: CursorService + fmt::Debug> fmt::Debug for SplitterGrid<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitterGrid")
            .field("bounds", &self.bounds)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("margin", &self.margin)
            .field("min_column_width", &self.min_column_width)
            .field("min_row_height", &self.min_row_height)
            .field("orientation", &self.orientation)
            .field("override_cursor", &self.override_cursor)
            .field("child_count", &self.child_count)
            .field("ratios", &self.ratios)
            .field("sessions", &self.sessions)
            .field("cursor", &self.cursor)
            .field("observers", &self.observers.len())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl<K: CursorService> SplitterGrid<K> {
    /// Empty grid with default settings, sharing the process-wide counter.
    pub fn new(cursor: K) -> Self {
        Self {
            bounds: Rect::default(),
            columns: 0,
            rows: 0,
            margin: DEFAULT_MARGIN,
            min_column_width: DEFAULT_MIN_CELL_SIZE,
            min_row_height: DEFAULT_MIN_CELL_SIZE,
            orientation: Orientation::default(),
            override_cursor: true,
            child_count: 0,
            ratios: RatioStore::default(),
            sessions: FxHashMap::default(),
            counter: ResizeCounter::global(),
            cursor,
            observers: Vec::new(),
            next_subscription: 0,
            dirty: true,
        }
    }

    /// Build a grid from validated configuration.
    pub fn from_config(config: &GridConfig, cursor: K) -> Result<Self, GridConfigError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(GridConfigError::Invalid(errors));
        }
        let columns = RatioSequence::new(config.column_ratios.clone())
            .map_err(|err| GridConfigError::Invalid(vec![format!("column_ratios: {err}")]))?;
        let rows = RatioSequence::new(config.row_ratios.clone())
            .map_err(|err| GridConfigError::Invalid(vec![format!("row_ratios: {err}")]))?;

        let mut grid = Self::new(cursor);
        grid.columns = config.columns;
        grid.rows = config.rows;
        grid.margin = config.margin;
        grid.min_column_width = config.min_column_width;
        grid.min_row_height = config.min_row_height;
        grid.orientation = config.orientation;
        grid.override_cursor = config.override_cursor;
        grid.ratios = RatioStore::new(columns, rows);
        grid.sync_ratios();
        Ok(grid)
    }

    /// Use `counter` instead of the process-wide resize counter.
    ///
    /// Open sessions move their share of the count to the new counter.
    #[must_use]
    pub fn with_resize_counter(mut self, counter: ResizeCounter) -> Self {
        for _ in 0..self.sessions.len() {
            self.counter.decrement();
            counter.increment();
        }
        self.counter = counter;
        self
    }

    /// Snapshot of the current settings and ratios.
    #[must_use]
    pub fn config(&self) -> GridConfig {
        GridConfig {
            columns: self.columns,
            rows: self.rows,
            margin: self.margin,
            column_ratios: self.ratios.columns.as_slice().to_vec(),
            row_ratios: self.ratios.rows.as_slice().to_vec(),
            min_column_width: self.min_column_width,
            min_row_height: self.min_row_height,
            orientation: self.orientation,
            override_cursor: self.override_cursor,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Column count setting (0 = derived from rows).
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Row count setting (0 = derived from columns).
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }

    #[must_use]
    pub const fn min_column_width(&self) -> f64 {
        self.min_column_width
    }

    #[must_use]
    pub const fn min_row_height(&self) -> f64 {
        self.min_row_height
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub const fn override_cursor(&self) -> bool {
        self.override_cursor
    }

    #[must_use]
    pub const fn child_count(&self) -> usize {
        self.child_count
    }

    #[must_use]
    pub fn column_ratios(&self) -> &RatioSequence {
        &self.ratios.columns
    }

    #[must_use]
    pub fn row_ratios(&self) -> &RatioSequence {
        &self.ratios.rows
    }

    /// Derived `(rows, columns)` for the current child count.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        compute_shape(self.child_count, self.columns, self.rows)
    }

    #[must_use]
    pub fn internal_width(&self) -> f64 {
        self.geometry().internal_width()
    }

    #[must_use]
    pub fn internal_height(&self) -> f64 {
        self.geometry().internal_height()
    }

    #[must_use]
    pub fn geometry(&self) -> GridGeometry<'_> {
        GridGeometry {
            bounds: self.bounds,
            shape: self.shape(),
            margin: self.margin,
            orientation: self.orientation,
            column_ratios: self.ratios.columns.as_slice(),
            row_ratios: self.ratios.rows.as_slice(),
        }
    }

    /// Session held by `pointer`, if it is dragging a splitter of this grid.
    #[must_use]
    pub fn session(&self, pointer: PointerId) -> Option<&ResizeSession> {
        self.sessions.get(&pointer)
    }

    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn resize_counter(&self) -> &ResizeCounter {
        &self.counter
    }

    #[must_use]
    pub fn cursor(&self) -> &K {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut K {
        &mut self.cursor
    }

    /// Whether a layout input changed since the last [`Self::take_layout`].
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ── Setters ─────────────────────────────────────────────────────────

    /// Returns whether the value changed.
    pub fn set_bounds(&mut self, bounds: Rect) -> bool {
        if self.bounds == bounds {
            return false;
        }
        self.bounds = bounds;
        self.invalidate(GridChange::Bounds);
        true
    }

    pub fn set_columns(&mut self, columns: usize) -> bool {
        if self.columns == columns {
            return false;
        }
        self.columns = columns;
        self.sync_ratios();
        self.invalidate(GridChange::Columns);
        true
    }

    pub fn set_rows(&mut self, rows: usize) -> bool {
        if self.rows == rows {
            return false;
        }
        self.rows = rows;
        self.sync_ratios();
        self.invalidate(GridChange::Rows);
        true
    }

    /// Record that children were added or removed.
    pub fn set_child_count(&mut self, count: usize) -> bool {
        if self.child_count == count {
            return false;
        }
        self.child_count = count;
        self.sync_ratios();
        self.invalidate(GridChange::Children);
        true
    }

    /// Ignores non-finite and negative margins.
    pub fn set_margin(&mut self, margin: f64) -> bool {
        if !is_valid_length(margin) {
            warn!(margin, "rejected margin");
            return false;
        }
        if self.margin == margin {
            return false;
        }
        self.margin = margin;
        self.invalidate(GridChange::Margin);
        true
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        if self.orientation == orientation {
            return false;
        }
        self.orientation = orientation;
        self.invalidate(GridChange::Orientation);
        true
    }

    /// Replace the column ratios. The sequence is then padded or truncated to
    /// the current column count.
    pub fn set_column_ratios(&mut self, ratios: Vec<f64>) -> Result<(), RatioError> {
        self.replace_ratios(Axis::Column, ratios)
    }

    /// Replace the row ratios. The sequence is then padded or truncated to
    /// the current row count.
    pub fn set_row_ratios(&mut self, ratios: Vec<f64>) -> Result<(), RatioError> {
        self.replace_ratios(Axis::Row, ratios)
    }

    /// Floors only constrain future drags; current sizes are kept.
    ///
    /// Returns `false` for non-finite or negative widths, which are ignored.
    pub fn set_min_column_width(&mut self, width: f64) -> bool {
        if !is_valid_length(width) {
            warn!(width, "rejected minimum column width");
            return false;
        }
        self.min_column_width = width;
        true
    }

    /// Same rules as [`Self::set_min_column_width`].
    pub fn set_min_row_height(&mut self, height: f64) -> bool {
        if !is_valid_length(height) {
            warn!(height, "rejected minimum row height");
            return false;
        }
        self.min_row_height = height;
        true
    }

    pub fn set_override_cursor(&mut self, enabled: bool) {
        self.override_cursor = enabled;
    }

    fn replace_ratios(&mut self, axis: Axis, ratios: Vec<f64>) -> Result<(), RatioError> {
        let sequence = RatioSequence::new(ratios)?;
        let shape = self.shape();
        let target = self.ratios.axis_mut(axis);
        *target = sequence;
        target.resize(match axis {
            Axis::Column => shape.columns,
            Axis::Row => shape.rows,
        });
        self.invalidate(GridChange::Ratios(axis));
        Ok(())
    }

    fn sync_ratios(&mut self) {
        let shape = self.shape();
        for axis in self.ratios.sync(shape) {
            self.invalidate(GridChange::Ratios(axis));
        }
    }

    fn invalidate(&mut self, change: GridChange) {
        self.dirty = true;
        self.emit(GridEvent::LayoutInvalidated { change });
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Register an observer called synchronously for every [`GridEvent`].
    pub fn subscribe(&mut self, observer: impl FnMut(&GridEvent) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        before != self.observers.len()
    }

    fn emit(&mut self, event: GridEvent) {
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }

    // ── Layout ──────────────────────────────────────────────────────────

    /// Compute the current layout unconditionally.
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        self.geometry().layout(self.child_count)
    }

    /// Compute the layout if any input changed since the previous call.
    ///
    /// Several changes within one event turn produce a single pass.
    pub fn take_layout(&mut self) -> Option<GridLayout> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        let layout = self.layout();
        debug!(
            cells = layout.len(),
            children = self.child_count,
            orientation = %self.orientation,
            "grid layout pass"
        );
        Some(layout)
    }

    /// Sync the child count with `children` and position them if needed.
    ///
    /// Returns whether a layout pass ran.
    pub fn layout_children<C: GridChild>(&mut self, children: &mut [C]) -> bool {
        self.set_child_count(children.len());
        match self.take_layout() {
            Some(layout) => {
                layout.apply(children);
                true
            }
            None => false,
        }
    }

    // ── Pointer interaction ─────────────────────────────────────────────

    /// Splitters under `position`.
    #[must_use]
    pub fn match_splitter(&self, position: Point) -> SplitterMatch {
        match_splitter(&self.geometry(), position)
    }

    /// Route a pointer event to the matching handler.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> PointerDisposition {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event.pointer, event.position),
            PointerEventKind::Move => self.pointer_move(event),
            PointerEventKind::Up => self.pointer_up(event.pointer),
        }
    }

    /// Start a resize session if `position` lies on a splitter band.
    pub fn pointer_down(&mut self, pointer: PointerId, position: Point) -> PointerDisposition {
        if self.sessions.contains_key(&pointer) {
            debug!(%pointer, "pointer already holds a resize session");
            return PointerDisposition::Consumed;
        }
        let hit = self.match_splitter(position);
        let Some(session) = ResizeSession::begin(pointer, hit) else {
            return PointerDisposition::Ignored;
        };
        self.sessions.insert(pointer, session);
        let active = self.counter.increment();
        debug!(
            %pointer,
            column = ?session.column,
            row = ?session.row,
            active,
            "resize started"
        );
        self.emit(GridEvent::ResizeStarted {
            pointer,
            column: session.column,
            row: session.row,
        });
        PointerDisposition::Consumed
    }

    /// Apply a drag step for the pointer's session, if it has one.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> PointerDisposition {
        let pointer = event.pointer;
        let Some(session) = self.sessions.get(&pointer).copied() else {
            return PointerDisposition::Ignored;
        };
        if !session.fits(self.ratios.columns.len(), self.ratios.rows.len()) {
            warn!(
                %pointer,
                column = ?session.column,
                row = ?session.row,
                columns = self.ratios.columns.len(),
                rows = self.ratios.rows.len(),
                "abandoning resize session with stale splitter index"
            );
            self.end_session(pointer);
            return PointerDisposition::Consumed;
        }

        for (axis, index) in session.axes() {
            let frame = self.axis_frame(axis);
            let step = match axis {
                Axis::Column => DragStep {
                    index,
                    coordinate: event.position.x,
                    delta: event.delta_x,
                    min_size: self.min_column_width,
                },
                Axis::Row => DragStep {
                    index,
                    coordinate: event.position.y,
                    delta: event.delta_y,
                    min_size: self.min_row_height,
                },
            };
            match redistribute(frame, self.ratios.axis_mut(axis), step) {
                RedistributeOutcome::Applied { .. } => {
                    self.invalidate(GridChange::Ratios(axis));
                }
                RedistributeOutcome::Noop { reason } => {
                    trace!(%pointer, ?axis, index, %reason, "drag step ignored");
                }
            }
        }
        PointerDisposition::Consumed
    }

    /// End the pointer's session, if this grid grabbed it.
    pub fn pointer_up(&mut self, pointer: PointerId) -> PointerDisposition {
        if self.end_session(pointer) {
            PointerDisposition::Consumed
        } else {
            PointerDisposition::Ignored
        }
    }

    /// End a session whose grab the host released externally.
    ///
    /// Returns whether a session existed.
    pub fn release_pointer(&mut self, pointer: PointerId) -> bool {
        self.end_session(pointer)
    }

    fn end_session(&mut self, pointer: PointerId) -> bool {
        if self.sessions.remove(&pointer).is_none() {
            return false;
        }
        let active = self.counter.decrement();
        debug!(%pointer, active, "resize completed");
        self.emit(GridEvent::ResizeCompleted { pointer });
        true
    }

    fn axis_frame(&self, axis: Axis) -> AxisFrame {
        self.geometry().axis_frame(axis)
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    /// Show a resize cursor when `position` hovers a splitter.
    ///
    /// Skipped when cursor override is off or any resize session sharing this
    /// grid's counter is active. Returns the cursor that was set.
    pub fn update_cursor(&mut self, position: Point) -> Option<CursorKind> {
        if !self.override_cursor || self.counter.is_active() {
            return None;
        }
        let kind = self.match_splitter(position).cursor_kind();
        self.cursor.set_cursor(kind);
        Some(kind)
    }
}
