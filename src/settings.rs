//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/glizztris/settings.toml (or platform equivalent)

use directories::ProjectDirs;
use glizztris::{Theme, ThemeSelector};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of high scores kept
const MAX_HIGH_SCORES: usize = 10;

/// Game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Theme preference
    pub theme: ThemeSettings,
    /// Keybindings
    pub keys: KeyBindings,
    /// High scores
    pub high_scores: Vec<ScoreEntry>,
}

/// Which condiment new pieces get
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Theme used when random mode is off
    pub current: Theme,
    /// Draw a theme per piece
    pub random_mode: bool,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub hard_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub start: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub pause: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub next_theme: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub random_theme: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if keys.len() == 1 {
        serializer.serialize_str(&keys[0])
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            current: Theme::Mustard,
            random_mode: true,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            soft_drop: vec!["Down".to_string()],
            hard_drop: vec!["Up".to_string()],
            rotate: vec!["Space".to_string()],
            start: vec!["Enter".to_string()],
            pause: vec!["p".to_string(), "Esc".to_string()],
            next_theme: vec!["t".to_string()],
            random_theme: vec!["r".to_string()],
            quit: vec!["q".to_string()],
        }
    }
}

impl ThemeSettings {
    /// How the engine should theme new pieces
    pub fn selector(&self) -> ThemeSelector {
        if self.random_mode {
            ThemeSelector::Random
        } else {
            ThemeSelector::Fixed(self.current)
        }
    }

    /// Pick a theme by hand, which turns random mode off
    pub fn set_theme(&mut self, theme: Theme) {
        self.current = theme;
        self.random_mode = false;
    }

    /// Advance to the next theme in the cycle
    pub fn next_theme(&mut self) -> Theme {
        let next = self.current.next();
        self.set_theme(next);
        next
    }

    /// Go back to a random theme per piece
    pub fn reset_to_random(&mut self) {
        self.random_mode = true;
        self.current = Theme::Mustard;
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "glizztris", "glizztris").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from file, or create default
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Parse settings text, falling back to defaults on malformed input
    pub fn parse(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed settings: {}", e);
            Self::default()
        })
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), String> {
        let Some(dir) = Self::config_dir() else {
            return Err("Could not determine config directory".to_string());
        };

        let Some(path) = Self::settings_path() else {
            return Err("Could not determine settings path".to_string());
        };

        // Create directory if needed
        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create config dir: {}", e))?;

        // Serialize and write
        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(&path, contents).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }

    /// Record a finished game, keeping the best scores
    pub fn add_score(&mut self, score: u64, lines: u32, level: u32) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        self.high_scores.push(ScoreEntry {
            score,
            lines,
            level,
            timestamp,
        });
        self.high_scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.high_scores.truncate(MAX_HIGH_SCORES);
    }

    /// Get the best score
    pub fn best_score(&self) -> Option<u64> {
        self.high_scores.first().map(|e| e.score)
    }
}
