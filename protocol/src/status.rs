//! Game state snapshots returned by every game endpoint.

use serde::{Deserialize, Serialize};

/// Placeholder the backend uses for an unrevealed letter.
pub const HIDDEN_LETTER: &str = "_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Random,
    Daily,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Daily => "daily",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Random Play",
            Self::Daily => "Daily Challenge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Attempts the backend grants for this difficulty.
    pub fn attempts(self) -> u8 {
        match self {
            Self::Easy => 8,
            Self::Medium => 6,
            Self::Hard => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Curriculum metadata attached to a word. Every field is optional and the
/// backend may send empty strings for fields it could not generate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_band: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essential_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl LearningInfo {
    /// "Subject • Grade band", or `None` when neither is present.
    pub fn subject_line(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.subject, &self.grade_band]
            .into_iter()
            .filter_map(|field| non_empty(field))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" • "))
    }

    pub fn has_fact(&self) -> bool {
        non_empty(&self.definition).is_some() || non_empty(&self.fun_fact).is_some()
    }

    /// Labeled definition and fun fact lines, in that order.
    pub fn fact_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(definition) = non_empty(&self.definition) {
            lines.push(format!("Definition: {definition}"));
        }
        if let Some(fun_fact) = non_empty(&self.fun_fact) {
            lines.push(format!("Fun fact: {fun_fact}"));
        }
        lines
    }

    pub fn standard(&self) -> Option<&str> {
        non_empty(&self.standard)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn essential_question(&self) -> Option<&str> {
        non_empty(&self.essential_question)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// Snapshot of the current game. The backend is the source of truth; the
/// client only caches the last one it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Letters and `_` placeholders separated by single spaces.
    pub masked_word: String,
    pub attempts_left: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u8>,
    #[serde(default)]
    pub guesses: Vec<char>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub win: bool,
    /// Revealed only once the game is over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning: Option<LearningInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_current: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_best: Option<u32>,
}

impl GameStatus {
    /// A guess was correct iff the letter now shows in the masked word.
    pub fn is_letter_revealed(&self, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        self.masked_word.chars().any(|shown| shown == letter)
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        self.guesses.iter().any(|guess| guess.to_ascii_uppercase() == letter)
    }

    /// Lives lost so far, measured against `max_attempts`.
    pub fn lives_lost(&self, max_attempts: u8) -> u8 {
        max_attempts.saturating_sub(self.attempts_left)
    }

    /// No guess has been made yet.
    pub fn is_fresh(&self) -> bool {
        !self.game_over && self.guesses.is_empty()
    }

    pub fn hint(&self) -> Option<&str> {
        non_empty(&self.hint)
    }

    pub fn is_lost(&self) -> bool {
        self.game_over && !self.win
    }

    pub fn is_won(&self) -> bool {
        self.game_over && self.win
    }
}

/// Positions that flipped from hidden to `letter` between two masked words.
pub fn revealed_positions(old_masked: &str, new_masked: &str, letter: char) -> Vec<usize> {
    let letter = letter.to_ascii_uppercase().to_string();
    let old_cells: Vec<&str> = old_masked.split(' ').collect();
    new_masked
        .split(' ')
        .enumerate()
        .filter(|(index, cell)| {
            *cell == letter && old_cells.get(*index).is_some_and(|old| *old == HIDDEN_LETTER)
        })
        .map(|(index, _)| index)
        .collect()
}
