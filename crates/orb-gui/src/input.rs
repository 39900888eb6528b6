//! Keyboard and mouse helpers.

use macroquad::prelude::*;

/// Collect all characters typed this frame.
///
/// Any printable character is kept, Cyrillic included; control characters
/// such as the ones Enter and Backspace produce are dropped.
pub fn typed_chars() -> Vec<char> {
    let mut chars = Vec::new();
    while let Some(ch) = get_char_pressed() {
        if is_typed(ch) {
            chars.push(ch);
        }
    }
    chars
}

/// Whether a character event should land in a text field.
pub fn is_typed(ch: char) -> bool {
    !ch.is_control()
}

/// Check if the backspace key was pressed this frame.
pub fn backspace_pressed() -> bool {
    is_key_pressed(KeyCode::Backspace)
}

/// Check if the Enter key was pressed this frame.
pub fn enter_pressed() -> bool {
    is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter)
}

/// Check if the Escape key was pressed this frame.
pub fn escape_pressed() -> bool {
    is_key_pressed(KeyCode::Escape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_characters_are_typed() {
        assert!(is_typed('a'));
        assert!(is_typed('Ж'));
        assert!(is_typed(' '));
        assert!(is_typed('!'));
        assert!(!is_typed('\r'));
        assert!(!is_typed('\u{8}'));
    }
}
