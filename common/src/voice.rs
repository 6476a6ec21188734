//! Voice command interpretation.
//!
//! Speech-to-text output is noisy: letters come back as words ("BEE", "SEA"),
//! NATO call signs, or short phrases ("the letter Q"). [`VoiceInterpreter`]
//! maps a transcript onto the small action vocabulary of the game.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceAction {
    /// Guess a letter. A space guess is `Guess(' ')`.
    Guess(char),
    RequestHint,
    NewGame,
    NoAction,
}

/// Default word-to-letter mappings.
///
/// Several words may map to the same letter. When a word appears twice the
/// later mapping wins, see [`PhoneticTable::from_pairs`].
pub const DEFAULT_PHONETIC_PAIRS: &[(&str, char)] = &[
    ("ALPHA", 'A'),
    ("BEE", 'B'),
    ("SEE", 'C'),
    ("SEA", 'C'),
    ("DELTA", 'D'),
    ("ECHO", 'E'),
    ("FOXTROT", 'F'),
    ("GOLF", 'G'),
    ("HOTEL", 'H'),
    ("INDIA", 'I'),
    ("EYE", 'I'),
    ("JULIET", 'J'),
    ("KILO", 'K'),
    ("LIMA", 'L'),
    ("MIKE", 'M'),
    ("NOVEMBER", 'N'),
    ("OSCAR", 'O'),
    ("PAPA", 'P'),
    ("QUEBEC", 'Q'),
    ("ROMEO", 'R'),
    ("ARE", 'R'),
    ("SIERRA", 'S'),
    ("TANGO", 'T'),
    ("TEA", 'T'),
    ("UNIFORM", 'U'),
    ("YOU", 'U'),
    ("VICTOR", 'V'),
    ("WHISKEY", 'W'),
    ("X-RAY", 'X'),
    ("YANKEE", 'Y'),
    ("WHY", 'Y'),
    ("ZULU", 'Z'),
    ("ZEE", 'Z'),
    ("APPLE", 'A'),
    ("BOY", 'B'),
    ("CAT", 'C'),
    ("DOG", 'D'),
];

// A cue word followed by a standalone letter token.
static CUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:LETTER|GUESS|CHOOSE|IS IT|SAY)\s+([A-Z])\b")
        .expect("cue pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneticTable {
    entries: HashMap<String, char>,
}

impl Default for PhoneticTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_PHONETIC_PAIRS.iter().copied())
    }
}

impl PhoneticTable {
    /// Builds a table from `(word, letter)` pairs. Words are uppercased and
    /// letters normalized; a repeated word keeps its last letter.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, char)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(word, letter)| (word.trim().to_uppercase(), letter.to_ascii_uppercase()))
            .collect();
        Self { entries }
    }

    pub fn lookup(&self, word: &str) -> Option<char> {
        self.entries.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct VoiceInterpreter {
    table: PhoneticTable,
}

impl VoiceInterpreter {
    pub fn new(table: PhoneticTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PhoneticTable {
        &self.table
    }

    /// Maps a raw transcript onto an action. The first matching rule wins.
    pub fn interpret(&self, raw_transcript: &str) -> VoiceAction {
        let transcript = raw_transcript.trim().to_uppercase();

        if let Some(letter) = single_letter(&transcript) {
            return VoiceAction::Guess(letter);
        }
        if let Some(letter) = self.table.lookup(&transcript) {
            return VoiceAction::Guess(letter);
        }
        if let Some(letter) = cued_letter(&transcript) {
            return VoiceAction::Guess(letter);
        }
        if transcript.contains("SPACE") {
            return VoiceAction::Guess(' ');
        }
        if transcript.contains("HINT") {
            return VoiceAction::RequestHint;
        }
        if transcript.contains("NEW GAME") || transcript.contains("RESTART") {
            return VoiceAction::NewGame;
        }
        VoiceAction::NoAction
    }

    /// Like [`Self::interpret`], but ignores everything heard while the
    /// speech output is talking so the app never answers itself.
    pub fn interpret_unless_speaking(&self, raw_transcript: &str, speaking: bool) -> VoiceAction {
        if speaking {
            return VoiceAction::NoAction;
        }
        self.interpret(raw_transcript)
    }
}

fn single_letter(transcript: &str) -> Option<char> {
    let mut chars = transcript.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_uppercase() => Some(letter),
        _ => None,
    }
}

fn cued_letter(transcript: &str) -> Option<char> {
    CUE_PATTERN
        .captures(transcript)
        .and_then(|captures| captures.get(1))
        .and_then(|letter| letter.as_str().chars().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_duplicate_mapping_wins() {
        let table = PhoneticTable::from_pairs([("eye", 'I'), ("EYE", 'Y')]);
        assert_eq!(table.lookup("EYE"), Some('Y'));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn default_table_covers_every_letter() {
        let table = PhoneticTable::default();
        for letter in 'A'..='Z' {
            assert!(
                DEFAULT_PHONETIC_PAIRS
                    .iter()
                    .any(|(word, mapped)| *mapped == letter && table.lookup(word) == Some(letter)),
                "no word maps to {letter}"
            );
        }
    }

    #[test]
    fn cue_requires_standalone_letter() {
        assert_eq!(cued_letter("SAY SPACE"), None);
        assert_eq!(cued_letter("IS IT E"), Some('E'));
        assert_eq!(cued_letter("ESSAY B"), None);
    }

    #[test]
    fn non_alphabetic_single_character_is_not_a_guess() {
        let interpreter = VoiceInterpreter::default();
        assert_eq!(interpreter.interpret("7"), VoiceAction::NoAction);
        assert_eq!(interpreter.interpret("   "), VoiceAction::NoAction);
    }
}
