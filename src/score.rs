//! Scoring and level progression

use std::time::Duration;

/// Points per simultaneous clear of 0..=4 rows, multiplied by level
const LINE_SCORES: [u64; 5] = [0, 40, 100, 300, 1200];
/// Lines needed per level
const LINES_PER_LEVEL: u32 = 10;
/// Gravity interval at level 1
const INITIAL_DROP_MS: u64 = 1000;
/// Interval shaved off per level
const DROP_STEP_MS: u64 = 50;
/// Fastest gravity
const MIN_DROP_MS: u64 = 50;

/// Scoring calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
        }
    }

    /// Add score for `lines` rows cleared together
    ///
    /// The multiplier is the level before this clear is counted. Returns the
    /// points awarded.
    pub fn add_clear(&mut self, lines: usize) -> u64 {
        debug_assert!(lines <= 4, "cannot clear {lines} rows with one piece");
        let awarded = LINE_SCORES.get(lines).copied().unwrap_or(0) * self.level as u64;
        self.points += awarded;

        self.lines += lines as u32;
        self.level = self.lines / LINES_PER_LEVEL + 1;
        awarded
    }

    /// Gravity interval for the current level
    pub fn drop_interval(&self) -> Duration {
        let step = (self.level as u64).saturating_sub(1) * DROP_STEP_MS;
        Duration::from_millis(INITIAL_DROP_MS.saturating_sub(step).max(MIN_DROP_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(1), 40);
        assert_eq!(score.points, 40);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_clear_table() {
        for (lines, expected) in [(1, 40), (2, 100), (3, 300), (4, 1200)] {
            let mut score = Score::new();
            score.level = 3;
            assert_eq!(score.add_clear(lines), expected * 3);
        }
    }

    #[test]
    fn test_level_up_uses_level_before_clear() {
        let mut score = Score::new();
        score.lines = 8;
        // 8 + 4 = 12 lines reaches level 2, but the tetris is paid at level 1
        assert_eq!(score.add_clear(4), 1200);
        assert_eq!(score.level, 2);
        assert_eq!(score.add_clear(1), 80);
    }

    #[test]
    fn test_level_up() {
        let mut score = Score::new();
        for _ in 0..10 {
            score.add_clear(1);
        }
        assert_eq!(score.level, 2);
        assert_eq!(score.lines, 10);
    }

    #[test]
    fn test_drop_interval() {
        let mut score = Score::new();
        assert_eq!(score.drop_interval(), Duration::from_millis(1000));
        score.level = 2;
        assert_eq!(score.drop_interval(), Duration::from_millis(950));
        score.level = 20;
        assert_eq!(score.drop_interval(), Duration::from_millis(50));
        score.level = 40;
        assert_eq!(score.drop_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_drop_interval_never_increases() {
        let mut score = Score::new();
        let mut last = score.drop_interval();
        for level in 2..30 {
            score.level = level;
            assert!(score.drop_interval() <= last);
            last = score.drop_interval();
        }
    }
}
