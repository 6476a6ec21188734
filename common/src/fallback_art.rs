//! Static text rendering of the avatar for hosts without a 3D context.

use crate::avatar::MAX_ATTEMPTS;

/// Stages indexed by attempts left: index 0 is the full figure, index 6 the
/// empty gallows.
const STAGES: [&str; MAX_ATTEMPTS as usize + 1] = [
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
];

/// Returns the art for `attempts_left`, clamped to the supported range.
pub fn fallback_art(attempts_left: u8) -> &'static str {
    STAGES[usize::from(attempts_left.min(MAX_ATTEMPTS))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_attempts_shows_empty_gallows() {
        assert!(!fallback_art(6).contains('O'));
        assert!(fallback_art(5).contains('O'));
    }

    #[test]
    fn zero_attempts_shows_full_figure() {
        assert!(fallback_art(0).contains(" / \\"));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(fallback_art(42), fallback_art(6));
    }
}
