//! Wire types shared by the Balloon Buddy client and the word-game backend.
//!
//! The backend speaks JSON over HTTP. This crate owns the request and
//! response shapes, the decode path that understands the backend's
//! `{"error": ...}` replies, and a few pure helpers derived from a
//! [`GameStatus`] (share text, guess correctness, letter reveals).

pub mod api;
pub mod categories;
pub mod codec;
pub mod dictionary;
pub mod share;
pub mod status;

pub use api::{
    AiHintResponse, ApiErrorBody, DailyGuessRequest, DailyStartRequest, GuessRequest,
    StartGameRequest, paths,
};
pub use categories::{CUSTOM_CATEGORY, FALLBACK_CATEGORIES, fallback_categories, with_custom_entry};
pub use codec::{ProtocolError, decode_json, decode_reply, encode_json};
pub use dictionary::{DictionaryEntry, first_definition, hint_fallback};
pub use share::daily_share_text;
pub use status::{Difficulty, GameMode, GameStatus, LearningInfo, revealed_positions};

/// Returns the protocol crate version string.
pub fn protocol_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_pkg() {
        assert_eq!(protocol_version(), env!("CARGO_PKG_VERSION"));
    }
}
