//! Condiment themes and per-theme block accounting

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Visual skin a piece is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Mustard,
    Ketchup,
    Relish,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Mustard, Theme::Ketchup, Theme::Relish];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Mustard => "Mustard",
            Theme::Ketchup => "Ketchup",
            Theme::Relish => "Relish",
        }
    }

    /// Mustard → Ketchup → Relish → Mustard
    pub fn next(&self) -> Theme {
        match self {
            Theme::Mustard => Theme::Ketchup,
            Theme::Ketchup => Theme::Relish,
            Theme::Relish => Theme::Mustard,
        }
    }

    fn index(&self) -> usize {
        match self {
            Theme::Mustard => 0,
            Theme::Ketchup => 1,
            Theme::Relish => 2,
        }
    }
}

/// How a freshly spawned piece gets its theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeSelector {
    /// Always the given theme
    Fixed(Theme),
    /// Uniform draw per spawn
    #[default]
    Random,
}

impl ThemeSelector {
    /// Resolve the theme for one spawn
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> Theme {
        match self {
            ThemeSelector::Fixed(theme) => *theme,
            ThemeSelector::Random => Theme::ALL[rng.gen_range(0..Theme::ALL.len())],
        }
    }
}

/// Blocks used and completed, per theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeStats {
    used: [u32; 3],
    completed: [u32; 3],
}

impl ThemeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks placed with this theme
    pub fn used(&self, theme: Theme) -> u32 {
        self.used[theme.index()]
    }

    /// Blocks with this theme removed by line clears
    pub fn completed(&self, theme: Theme) -> u32 {
        self.completed[theme.index()]
    }

    pub fn total_used(&self) -> u32 {
        self.used.iter().sum()
    }

    pub fn total_completed(&self) -> u32 {
        self.completed.iter().sum()
    }

    pub fn record_used(&mut self, theme: Theme, blocks: u32) {
        self.used[theme.index()] += blocks;
    }

    pub fn record_completed(&mut self, tally: &ThemeTally) {
        for theme in Theme::ALL {
            self.completed[theme.index()] += tally.count(theme);
        }
    }
}

/// Per-theme cell counts of one clear resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeTally {
    counts: [u32; 3],
}

impl ThemeTally {
    pub fn add(&mut self, theme: Theme) {
        self.counts[theme.index()] += 1;
    }

    pub fn count(&self, theme: Theme) -> u32 {
        self.counts[theme.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fixed_selector_always_returns_theme() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let selector = ThemeSelector::Fixed(Theme::Relish);
        for _ in 0..20 {
            assert_eq!(selector.resolve(&mut rng), Theme::Relish);
        }
    }

    #[test]
    fn test_random_selector_reaches_every_theme() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[ThemeSelector::Random.resolve(&mut rng).index()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(Theme::Mustard.next().next().next(), Theme::Mustard);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = ThemeStats::new();
        stats.record_used(Theme::Ketchup, 4);
        stats.record_used(Theme::Ketchup, 4);
        let mut tally = ThemeTally::default();
        tally.add(Theme::Ketchup);
        tally.add(Theme::Mustard);
        stats.record_completed(&tally);

        assert_eq!(stats.used(Theme::Ketchup), 8);
        assert_eq!(stats.used(Theme::Mustard), 0);
        assert_eq!(stats.completed(Theme::Ketchup), 1);
        assert_eq!(stats.completed(Theme::Mustard), 1);
        assert_eq!(stats.total_completed(), 2);
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            theme: Theme,
        }
        let text = toml::to_string(&Wrapper { theme: Theme::Relish }).unwrap();
        assert_eq!(text.trim(), "theme = \"relish\"");
    }
}
