//! Two-phase line clearing
//!
//! Completed rows are first *marked*: they stay on the board so the renderer
//! can flash them. After [`CLEAR_DELAY`] the clear is *resolved* against the
//! board as it was captured at mark time, never against the live board.

use crate::board::Board;
use crate::theme::ThemeTally;
use std::time::Duration;

/// Time between marking rows and removing them
pub const CLEAR_DELAY: Duration = Duration::from_millis(350);

/// A marked clear waiting to be resolved
#[derive(Debug, Clone)]
pub struct PendingClear {
    rows: Vec<usize>,
    snapshot: Board,
    due: Duration,
}

/// Result of resolving a clear
#[derive(Debug, Clone)]
pub struct ClearOutcome {
    /// Board with the rows removed and the rest shifted down
    pub board: Board,
    /// Number of rows removed
    pub lines: usize,
    /// Themes of the removed cells
    pub tally: ThemeTally,
}

impl PendingClear {
    /// Mark `rows` of `snapshot` at engine time `now`
    pub fn mark(rows: Vec<usize>, snapshot: Board, now: Duration) -> Self {
        debug_assert!(!rows.is_empty(), "marking an empty clear");
        Self {
            rows,
            snapshot,
            due: now + CLEAR_DELAY,
        }
    }

    /// Marked row indices, top to bottom
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn due(&self) -> Duration {
        self.due
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.due
    }

    /// Remove the marked rows from the snapshot and count their themes
    pub fn resolve(self) -> ClearOutcome {
        let mut tally = ThemeTally::default();
        for &row in &self.rows {
            for cell in self.snapshot.row(row).flatten() {
                tally.add(cell.theme);
            }
        }

        ClearOutcome {
            board: self.snapshot.without_rows(&self.rows),
            lines: self.rows.len(),
            tally,
        }
    }
}
