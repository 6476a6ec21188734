use bevy::prelude::*;

/// Everything the player can ask for, whichever input it came from (HUD
/// buttons, physical keyboard or voice).
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum PlayerIntent {
    /// A letter `A`-`Z` or `' '`.
    Guess(char),
    /// Reveal the hint the backend sent with the game.
    ShowHint,
    /// Ask the backend for a generated hint, or hide the one shown.
    RequestAiHint,
    NewGame,
    StartDaily,
    ToggleSound,
    ToggleVoice,
    ToggleTimer,
}

impl PlayerIntent {
    /// Normalizes a typed or spoken letter. Returns `None` for anything that
    /// is not `A`-`Z` or a space.
    pub fn guess(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        (letter.is_ascii_uppercase() || letter == ' ').then_some(Self::Guess(letter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_normalizes_case() {
        assert_eq!(PlayerIntent::guess('q'), Some(PlayerIntent::Guess('Q')));
        assert_eq!(PlayerIntent::guess(' '), Some(PlayerIntent::Guess(' ')));
        assert_eq!(PlayerIntent::guess('7'), None);
        assert_eq!(PlayerIntent::guess('é'), None);
    }
}
