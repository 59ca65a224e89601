//! Keyboard input handling

use game_core::{Control, Side};

/// What a key press asks the match to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Paddle(Side, Control),
    Restart,
    TogglePause,
}

/// Map a `KeyboardEvent.key` value on key down
pub fn key_down(key: &str) -> Option<KeyAction> {
    match key {
        "r" | "R" => Some(KeyAction::Restart),
        "p" | "P" => Some(KeyAction::TogglePause),
        _ => paddle_key(key).map(|(side, control)| KeyAction::Paddle(side, control)),
    }
}

/// Map a key release. Only paddle keys release anything.
pub fn key_up(key: &str) -> Option<(Side, Control)> {
    paddle_key(key)
}

fn paddle_key(key: &str) -> Option<(Side, Control)> {
    match key {
        "w" | "W" => Some((Side::Left, Control::Up)),
        "s" | "S" => Some((Side::Left, Control::Down)),
        "ArrowUp" => Some((Side::Right, Control::Up)),
        "ArrowDown" => Some((Side::Right, Control::Down)),
        _ => None,
    }
}
