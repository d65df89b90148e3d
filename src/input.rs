//! Keyboard handling: configured key bindings to game commands

use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use glizztris::Action;

/// What a key press asks the front-end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the engine
    Game(Action),
    /// Switch to the next condiment for new pieces and the active one
    NextTheme,
    /// Go back to a random condiment per piece
    RandomTheme,
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub start: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub next_theme: Vec<KeyCode>,
    pub random_theme: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode, `None` if unrecognised
    fn parse_key(s: &str) -> Option<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "esc" | "escape" => KeyCode::Esc,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Ignoring unknown key binding {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            move_left: Self::parse_keys(&keys.move_left),
            move_right: Self::parse_keys(&keys.move_right),
            soft_drop: Self::parse_keys(&keys.soft_drop),
            hard_drop: Self::parse_keys(&keys.hard_drop),
            rotate: Self::parse_keys(&keys.rotate),
            start: Self::parse_keys(&keys.start),
            pause: Self::parse_keys(&keys.pause),
            next_theme: Self::parse_keys(&keys.next_theme),
            random_theme: Self::parse_keys(&keys.random_theme),
            quit: Self::parse_keys(&keys.quit),
        }
    }

    /// Command bound to a key press
    pub fn command(&self, key: KeyEvent) -> Option<Command> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = normalize_key(key.code);
        let table = [
            (&self.move_left, Command::Game(Action::MoveLeft)),
            (&self.move_right, Command::Game(Action::MoveRight)),
            (&self.soft_drop, Command::Game(Action::SoftDrop)),
            (&self.hard_drop, Command::Game(Action::HardDrop)),
            (&self.rotate, Command::Game(Action::Rotate)),
            (&self.start, Command::Game(Action::Start)),
            (&self.pause, Command::Game(Action::Pause)),
            (&self.next_theme, Command::NextTheme),
            (&self.random_theme, Command::RandomTheme),
            (&self.quit, Command::Quit),
        ];
        table
            .into_iter()
            .find(|(codes, _)| codes.contains(&code))
            .map(|(_, command)| command)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.command(press(KeyCode::Left)), Some(Command::Game(Action::MoveLeft)));
        assert_eq!(keys.command(press(KeyCode::Char(' '))), Some(Command::Game(Action::Rotate)));
        assert_eq!(keys.command(press(KeyCode::Up)), Some(Command::Game(Action::HardDrop)));
        assert_eq!(keys.command(press(KeyCode::Esc)), Some(Command::Game(Action::Pause)));
        assert_eq!(keys.command(press(KeyCode::Char('t'))), Some(Command::NextTheme));
        assert_eq!(keys.command(press(KeyCode::F(5))), None);
    }

    #[test]
    fn test_letters_ignore_case() {
        let keys = KeyBindings::default();
        assert_eq!(keys.command(press(KeyCode::Char('Q'))), Some(Command::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let keys = KeyBindings::default();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.command(event), Some(Command::Quit));
    }

    #[test]
    fn test_custom_and_unknown_keys() {
        let mut settings = Settings::default();
        settings.keys.rotate = vec!["x".to_string(), "NotAKey".to_string()];
        let keys = KeyBindings::from_settings(&settings);
        assert_eq!(keys.rotate, vec![KeyCode::Char('x')]);
        assert_eq!(keys.command(press(KeyCode::Char(' '))), None);
    }
}
