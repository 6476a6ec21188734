//! Best-effort lookups against the public dictionary API.

use buddy_protocol::{DictionaryEntry, decode_reply, first_definition};
use reqwest::Url;

use crate::infra::http::{HttpClient, HttpError};

/// `{base}{word}` with the word lowercased and percent-encoded.
pub fn entry_url(base_url: &str, word: &str) -> Result<String, HttpError> {
    let mut base = base_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)
        .and_then(|base| base.join(&word.trim().to_lowercase()))
        .map(String::from)
        .map_err(|_| HttpError::InvalidUrl(base_url.to_string()))
}

/// First definition of `word`, or `None` on any failure. Failures are only
/// logged; a missing definition never reaches the player as an error.
pub fn fetch_definition(client: &dyn HttpClient, base_url: &str, word: &str) -> Option<String> {
    let url = match entry_url(base_url, word) {
        Ok(url) => url,
        Err(error) => {
            bevy::log::warn!("Dictionary lookup for '{}' skipped: {}", word, error);
            return None;
        }
    };

    let response = match client.get(&url) {
        Ok(response) => response,
        Err(error) => {
            bevy::log::warn!("Dictionary lookup for '{}' failed: {}", word, error);
            return None;
        }
    };

    match decode_reply::<Vec<DictionaryEntry>>(response.status, &response.body) {
        Ok(entries) => first_definition(&entries).map(str::to_string),
        Err(error) => {
            bevy::log::warn!("Dictionary reply for '{}' unusable: {}", word, error);
            None
        }
    }
}
