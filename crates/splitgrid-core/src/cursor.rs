#![forbid(unsafe_code)]

//! Cursor capability injected by the host.

use serde::{Deserialize, Serialize};

/// System cursor shapes the grid asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorKind {
    /// Regular pointer; no splitter under the cursor.
    #[default]
    Arrow,
    /// West-east resize over a column splitter.
    ResizeHorizontal,
    /// North-south resize over a row splitter.
    ResizeVertical,
    /// Resize in both axes where a column and a row splitter cross.
    ResizeAll,
}

/// Sets the system cursor icon.
pub trait CursorService {
    fn set_cursor(&mut self, kind: CursorKind);
}

impl<T: CursorService + ?Sized> CursorService for &mut T {
    fn set_cursor(&mut self, kind: CursorKind) {
        (**self).set_cursor(kind);
    }
}

impl<T: CursorService + ?Sized> CursorService for Box<T> {
    fn set_cursor(&mut self, kind: CursorKind) {
        (**self).set_cursor(kind);
    }
}

/// Cursor service that ignores every request (headless hosts).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCursor;

impl CursorService for NoopCursor {
    fn set_cursor(&mut self, _kind: CursorKind) {}
}

/// Cursor service that records every request, for tests and replay.
#[derive(Debug, Clone, Default)]
pub struct RecordingCursor {
    history: Vec<CursorKind>,
}

impl RecordingCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cursor set so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[CursorKind] {
        &self.history
    }

    /// Most recent cursor, if any was set.
    #[must_use]
    pub fn current(&self) -> Option<CursorKind> {
        self.history.last().copied()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl CursorService for RecordingCursor {
    fn set_cursor(&mut self, kind: CursorKind) {
        self.history.push(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_cursor_tracks_history() {
        let mut cursor = RecordingCursor::new();
        assert_eq!(cursor.current(), None);
        cursor.set_cursor(CursorKind::ResizeHorizontal);
        cursor.set_cursor(CursorKind::Arrow);
        assert_eq!(
            cursor.history(),
            &[CursorKind::ResizeHorizontal, CursorKind::Arrow]
        );
        assert_eq!(cursor.current(), Some(CursorKind::Arrow));
        cursor.clear();
        assert!(cursor.history().is_empty());
    }

    #[test]
    fn boxed_service_forwards() {
        let mut recording = RecordingCursor::new();
        {
            let mut boxed: Box<dyn CursorService + '_> = Box::new(&mut recording);
            boxed.set_cursor(CursorKind::ResizeAll);
        }
        assert_eq!(recording.current(), Some(CursorKind::ResizeAll));
    }

    #[test]
    fn default_is_arrow() {
        assert_eq!(CursorKind::default(), CursorKind::Arrow);
    }
}
