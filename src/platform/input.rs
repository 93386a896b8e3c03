//! Keyboard mapping
//!
//! Key names follow `KeyboardEvent.key`.

use crate::settings::Toggle;
use crate::sim::PaddleMove;

/// Map a key name to a paddle move, or `None` for keys the game ignores
pub fn key_to_move(key: &str) -> Option<PaddleMove> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(PaddleMove::Left),
        "ArrowRight" | "d" | "D" => Some(PaddleMove::Right),
        _ => None,
    }
}

/// Map a key name to a preference toggle
pub fn key_to_toggle(key: &str) -> Option<Toggle> {
    match key {
        "f" | "F" => Some(Toggle::Fps),
        "h" | "H" => Some(Toggle::HighContrast),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(key_to_move("ArrowLeft"), Some(PaddleMove::Left));
        assert_eq!(key_to_move("ArrowRight"), Some(PaddleMove::Right));
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(key_to_move("a"), Some(PaddleMove::Left));
        assert_eq!(key_to_move("D"), Some(PaddleMove::Right));
    }

    #[test]
    fn test_toggle_keys() {
        assert_eq!(key_to_toggle("f"), Some(Toggle::Fps));
        assert_eq!(key_to_toggle("H"), Some(Toggle::HighContrast));
        // Movement keys never double as toggles
        for key in ["a", "A", "d", "D", "ArrowLeft", "ArrowRight"] {
            assert_eq!(key_to_toggle(key), None);
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(key_to_move("ArrowUp"), None);
        assert_eq!(key_to_move(" "), None);
        assert_eq!(key_to_move(""), None);
    }
}
