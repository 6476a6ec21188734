//! Speech recognition and speech output seams.
//!
//! Recognition is polled once per frame; results and errors arrive as
//! [`SpeechEvent`]s instead of callbacks. Output is fire-and-forget with a
//! queryable "still talking" flag so the app can ignore its own voice.

use crossbeam_channel::{Receiver, TryRecvError, unbounded};
use std::io::BufRead;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("speech recognition is not supported on this system")]
    NotSupported,

    #[error("microphone access denied")]
    NotAllowed,

    #[error("no speech detected")]
    NoSpeech,

    #[error("speech recognition network error")]
    Network,

    #[error("speech recognition error: {0}")]
    Other(String),
}

impl SpeechError {
    /// Errors after which recognition must not be restarted automatically.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotSupported | Self::NotAllowed)
    }

    /// Alert text for fatal errors.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotSupported => "Sorry, voice recognition is not supported here.".to_string(),
            Self::NotAllowed => {
                "Microphone access denied. Please enable it in your system settings.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// One finished utterance.
    Transcript(String),
    /// The recognizer stopped on its own.
    Ended,
    Error(SpeechError),
}

pub trait SpeechInput: Send + Sync {
    fn start(&mut self) -> Result<(), SpeechError>;
    fn stop(&mut self);
    fn poll(&mut self) -> Option<SpeechEvent>;
}

pub trait SpeechOutput: Send + Sync {
    /// Replaces anything currently being spoken.
    fn speak(&mut self, text: &str, now_secs: f32);
    fn is_speaking(&self, now_secs: f32) -> bool;

    /// Text to show on screen while speaking.
    fn caption(&self, _now_secs: f32) -> Option<&str> {
        None
    }
}

/// Input for hosts without any recognizer.
#[derive(Default)]
pub struct NoSpeechInput;

impl SpeechInput for NoSpeechInput {
    fn start(&mut self) -> Result<(), SpeechError> {
        Err(SpeechError::NotSupported)
    }

    fn stop(&mut self) {}

    fn poll(&mut self) -> Option<SpeechEvent> {
        None
    }
}

/// Treats each line typed on stdin as one recognized utterance. The reader
/// thread is spawned on the first `start` and lives until stdin closes.
#[derive(Default)]
pub struct TerminalSpeechInput {
    lines: Option<Receiver<String>>,
    listening: bool,
    closed: bool,
}

impl TerminalSpeechInput {
    fn spawn_reader() -> Result<Receiver<String>, SpeechError> {
        let (sender, receiver) = unbounded();
        std::thread::Builder::new()
            .name("voice-terminal".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else {
                        break;
                    };
                    if sender.send(line).is_err() {
                        break;
                    }
                }
            })
            .map_err(|error| SpeechError::Other(error.to_string()))?;
        Ok(receiver)
    }
}

impl SpeechInput for TerminalSpeechInput {
    fn start(&mut self) -> Result<(), SpeechError> {
        if self.closed {
            return Err(SpeechError::NotSupported);
        }
        if let Some(lines) = &self.lines {
            while lines.try_recv().is_ok() {}
        } else {
            self.lines = Some(Self::spawn_reader()?);
        }
        self.listening = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.listening = false;
    }

    fn poll(&mut self) -> Option<SpeechEvent> {
        if !self.listening {
            return None;
        }
        let lines = self.lines.as_ref()?;
        match lines.try_recv() {
            Ok(line) if line.trim().is_empty() => {
                self.listening = false;
                Some(SpeechEvent::Error(SpeechError::NoSpeech))
            }
            Ok(line) => Some(SpeechEvent::Transcript(line)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.listening = false;
                self.closed = true;
                Some(SpeechEvent::Error(SpeechError::NotSupported))
            }
        }
    }
}

/// Shows narration as an on-screen caption for roughly as long as it would
/// take to say it.
pub struct CaptionSpeechOutput {
    words_per_minute: u32,
    current: Option<Utterance>,
}

struct Utterance {
    text: String,
    ends_at: f32,
}

const MIN_UTTERANCE_SECS: f32 = 1.0;

impl CaptionSpeechOutput {
    pub fn new(words_per_minute: u32) -> Self {
        Self {
            words_per_minute: words_per_minute.max(1),
            current: None,
        }
    }

    pub fn utterance_secs(&self, text: &str) -> f32 {
        let words = text.split_whitespace().count() as f32;
        (words * 60.0 / self.words_per_minute as f32).max(MIN_UTTERANCE_SECS)
    }
}

impl SpeechOutput for CaptionSpeechOutput {
    fn speak(&mut self, text: &str, now_secs: f32) {
        bevy::log::info!("Narration: {}", text);
        self.current = Some(Utterance {
            text: text.to_string(),
            ends_at: now_secs + self.utterance_secs(text),
        });
    }

    fn is_speaking(&self, now_secs: f32) -> bool {
        self.current
            .as_ref()
            .is_some_and(|utterance| now_secs < utterance.ends_at)
    }

    fn caption(&self, now_secs: f32) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|utterance| now_secs < utterance.ends_at)
            .map(|utterance| utterance.text.as_str())
    }
}
