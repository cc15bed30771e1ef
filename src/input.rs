/// Keyboard input
///
/// Key names from the config are resolved to `rdev` keys once at startup.
/// A listener thread turns presses into session commands; auto-repeat is
/// filtered so holding a key sends one command.
use std::collections::HashSet;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use rdev::{listen, EventType, Key};

use crate::carousel::SlideDirection;
use crate::config::{ActionsConfig, InputConfig};
use crate::error::InputError;
use crate::messaging::Command;

/// Resolve a key name as written in the config file
pub fn parse_key(name: &str) -> Result<Key, InputError> {
    let trimmed = name.trim();
    let key = match trimmed.to_ascii_lowercase().as_str() {
        "tab" => Key::Tab,
        "space" => Key::Space,
        "enter" | "return" => Key::Return,
        "escape" | "esc" => Key::Escape,
        "backspace" => Key::Backspace,
        "rightarrow" | "right" => Key::RightArrow,
        "leftarrow" | "left" => Key::LeftArrow,
        "uparrow" | "up" => Key::UpArrow,
        "downarrow" | "down" => Key::DownArrow,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "home" => Key::Home,
        "end" => Key::End,
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        other => return letter_or_digit(other).ok_or_else(|| InputError::UnknownKey(trimmed.to_string())),
    };
    Ok(key)
}

fn letter_or_digit(name: &str) -> Option<Key> {
    let mut chars = name.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let key = match c {
        'a' => Key::KeyA,
        'b' => Key::KeyB,
        'c' => Key::KeyC,
        'd' => Key::KeyD,
        'e' => Key::KeyE,
        'f' => Key::KeyF,
        'g' => Key::KeyG,
        'h' => Key::KeyH,
        'i' => Key::KeyI,
        'j' => Key::KeyJ,
        'k' => Key::KeyK,
        'l' => Key::KeyL,
        'm' => Key::KeyM,
        'n' => Key::KeyN,
        'o' => Key::KeyO,
        'p' => Key::KeyP,
        'q' => Key::KeyQ,
        'r' => Key::KeyR,
        's' => Key::KeyS,
        't' => Key::KeyT,
        'u' => Key::KeyU,
        'v' => Key::KeyV,
        'w' => Key::KeyW,
        'x' => Key::KeyX,
        'y' => Key::KeyY,
        'z' => Key::KeyZ,
        '0' => Key::Num0,
        '1' => Key::Num1,
        '2' => Key::Num2,
        '3' => Key::Num3,
        '4' => Key::Num4,
        '5' => Key::Num5,
        '6' => Key::Num6,
        '7' => Key::Num7,
        '8' => Key::Num8,
        '9' => Key::Num9,
        _ => return None,
    };
    Some(key)
}

/// Keys bound to session commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBindings {
    pub toggle: Key,
    pub next_slide: Key,
    pub previous_slide: Key,
}

impl KeyBindings {
    pub fn from_config(actions: &ActionsConfig, input: &InputConfig) -> Result<Self, InputError> {
        Ok(Self {
            toggle: parse_key(&actions.toggle_key)?,
            next_slide: parse_key(&input.next_slide_key)?,
            previous_slide: parse_key(&input.previous_slide_key)?,
        })
    }

    pub fn command_for(&self, key: Key) -> Option<Command> {
        if key == self.toggle {
            Some(Command::ToggleActions)
        } else if key == self.next_slide {
            Some(Command::Slide {
                direction: SlideDirection::Next,
            })
        } else if key == self.previous_slide {
            Some(Command::Slide {
                direction: SlideDirection::Previous,
            })
        } else {
            None
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle: Key::Tab,
            next_slide: Key::RightArrow,
            previous_slide: Key::LeftArrow,
        }
    }
}

/// Start the global keyboard listener.
///
/// The thread ends when the receiving side of `commands` is dropped and the
/// next key event arrives, or when the OS hook cannot be installed.
pub fn spawn_key_listener(bindings: KeyBindings, commands: Sender<Command>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut held: HashSet<Key> = HashSet::new();

        let result = listen(move |event| match event.event_type {
            EventType::KeyPress(key) => {
                if !held.insert(key) {
                    return;
                }
                if let Some(command) = bindings.command_for(key) {
                    tracing::debug!("Key {:?} -> {}", key, command.description());
                    if commands.send(command).is_err() {
                        tracing::debug!("Command channel closed");
                    }
                }
            }
            EventType::KeyRelease(key) => {
                held.remove(&key);
            }
            _ => {}
        });

        if let Err(e) = result {
            let error = InputError::ListenFailed(format!("{:?}", e));
            tracing::error!("{}", error);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_key("Tab").unwrap(), Key::Tab);
        assert_eq!(parse_key(" RightArrow ").unwrap(), Key::RightArrow);
        assert_eq!(parse_key("left").unwrap(), Key::LeftArrow);
        assert_eq!(parse_key("F5").unwrap(), Key::F5);
        assert_eq!(parse_key("n").unwrap(), Key::KeyN);
        assert_eq!(parse_key("7").unwrap(), Key::Num7);
    }

    #[test]
    fn test_parse_unknown_key() {
        let err = parse_key("Hyper").unwrap_err();
        assert_eq!(err.to_string(), "Unknown key name: Hyper");
        assert!(parse_key("").is_err());
    }

    #[test]
    fn test_bindings_from_default_config() {
        let bindings =
            KeyBindings::from_config(&ActionsConfig::default(), &InputConfig::default()).unwrap();
        assert_eq!(bindings, KeyBindings::default());
        assert_eq!(bindings.command_for(Key::Tab), Some(Command::ToggleActions));
        assert_eq!(
            bindings.command_for(Key::LeftArrow),
            Some(Command::Slide {
                direction: SlideDirection::Previous
            })
        );
        assert_eq!(bindings.command_for(Key::KeyQ), None);
    }
}
