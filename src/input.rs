//! Key event mapping
//!
//! Translates terminal key presses into commands using the configured bindings.
//! Held keys rely on the terminal's own key repeat.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A command for the running game
    Game(Action),
    /// Start a game from the title or game-over screen
    Start,
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
    pub pause: Vec<KeyCode>,
    pub start: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping names we don't know
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
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            rotate: Self::parse_keys(&settings.keys.rotate),
            pause: Self::parse_keys(&settings.keys.pause),
            start: Self::parse_keys(&settings.keys.start),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Maps key presses to commands
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key press event
    pub fn key_down(&self, key: KeyEvent) -> Option<Command> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = normalize_key(key.code);
        let b = &self.bindings;

        let command = if b.move_left.contains(&code) {
            Command::Game(Action::MoveLeft)
        } else if b.move_right.contains(&code) {
            Command::Game(Action::MoveRight)
        } else if b.soft_drop.contains(&code) {
            Command::Game(Action::SoftDrop)
        } else if b.hard_drop.contains(&code) {
            Command::Game(Action::HardDrop)
        } else if b.rotate.contains(&code) {
            Command::Game(Action::Rotate)
        } else if b.pause.contains(&code) {
            Command::Game(Action::Pause)
        } else if b.start.contains(&code) {
            Command::Start
        } else if b.quit.contains(&code) {
            Command::Quit
        } else {
            return None;
        };
        Some(command)
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

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Left)), Some(Command::Game(Action::MoveLeft)));
        assert_eq!(input.key_down(press(KeyCode::Right)), Some(Command::Game(Action::MoveRight)));
        assert_eq!(input.key_down(press(KeyCode::Down)), Some(Command::Game(Action::SoftDrop)));
        assert_eq!(input.key_down(press(KeyCode::Up)), Some(Command::Game(Action::Rotate)));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), Some(Command::Game(Action::HardDrop)));
        assert_eq!(input.key_down(press(KeyCode::Esc)), Some(Command::Game(Action::Pause)));
        assert_eq!(input.key_down(press(KeyCode::Enter)), Some(Command::Start));
        assert_eq!(input.key_down(press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(input.key_down(press(KeyCode::Char('k'))), None);
    }

    #[test]
    fn test_uppercase_matches_binding() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Char('X'))), Some(Command::Game(Action::Rotate)));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let input = InputHandler::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(key), Some(Command::Quit));
    }

    #[test]
    fn test_custom_bindings() {
        let mut settings = Settings::default();
        settings.keys.move_left = vec!["a".to_string()];
        settings.keys.hard_drop = vec!["w".to_string(), "nonsense".to_string()];
        let input = InputHandler::from_settings(&settings);

        assert_eq!(input.key_down(press(KeyCode::Char('a'))), Some(Command::Game(Action::MoveLeft)));
        assert_eq!(input.key_down(press(KeyCode::Left)), None);
        assert_eq!(input.key_down(press(KeyCode::Char('w'))), Some(Command::Game(Action::HardDrop)));
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(KeyBindings::parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(KeyBindings::parse_key("ESCAPE"), Some(KeyCode::Esc));
        assert_eq!(KeyBindings::parse_key("z"), Some(KeyCode::Char('z')));
        assert_eq!(KeyBindings::parse_key("F13"), None);
    }

    #[test]
    fn test_unbound_names_are_skipped() {
        assert_eq!(KeyBindings::parse_key("tab"), None);
        assert_eq!(KeyBindings::parse_key("shift"), None);
        let keys = vec!["shift".to_string(), "Up".to_string()];
        assert_eq!(KeyBindings::parse_keys(&keys), vec![KeyCode::Up]);
    }
}
