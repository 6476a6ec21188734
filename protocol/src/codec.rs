//! JSON codec for backend replies.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::ApiErrorBody;

/// Errors produced while encoding requests or decoding backend replies.
#[derive(thiserror::Error, Debug)]
pub enum ProtocolError {
    #[error("failed to decode reply: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The backend answered with a non-success status. `message` carries the
    /// `error` field of the body when there is one.
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl ProtocolError {
    /// Text suitable for an alert shown to the player.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ProtocolError> {
    serde_json::from_slice(body).map_err(ProtocolError::Decode)
}

pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(value).map_err(ProtocolError::Encode)
}

/// Decodes a reply body, turning non-2xx statuses into
/// [`ProtocolError::Rejected`].
pub fn decode_reply<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ProtocolError> {
    if (200..300).contains(&status) {
        return decode_json(body);
    }

    let message = serde_json::from_slice::<ApiErrorBody>(body)
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("request failed with status {status}"));
    Err(ProtocolError::Rejected { status, message })
}
