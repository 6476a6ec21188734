//! Voice input loop and spoken narration.
//!
//! Recognition listens continuously. A benign end or a transient error
//! restarts it after a fixed backoff; a denial or a missing recognizer turns
//! voice off for good (until the player enables it again).

use bevy::prelude::*;
use buddy_common::{VoiceAction, VoiceInterpreter};

use crate::gameplay::feedback::HudFeedback;
use crate::gameplay::intent::PlayerIntent;
use crate::infra::speech::{
    CaptionSpeechOutput, NoSpeechInput, SpeechError, SpeechEvent, SpeechInput, SpeechOutput,
    TerminalSpeechInput,
};
use crate::settings::{SettingsResource, VoiceInputSetting};

pub const ACTIVATED_LINE: &str =
    "Voice recognition activated. You can say a letter or the whole word.";
pub const DEACTIVATED_LINE: &str = "Voice recognition deactivated.";

/// A line to say out loud. Dropped unless voice is enabled.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct Narration(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VoicePhase {
    #[default]
    Disabled,
    Listening,
    Restarting {
        resume_at: f32,
    },
}

#[derive(Resource, Debug)]
pub struct VoiceControl {
    pub phase: VoicePhase,
    interpreter: VoiceInterpreter,
    backoff_secs: f32,
}

impl Default for VoiceControl {
    fn default() -> Self {
        Self::new(VoiceInterpreter::default(), 0.3)
    }
}

impl VoiceControl {
    pub fn new(interpreter: VoiceInterpreter, backoff_secs: f32) -> Self {
        Self {
            phase: VoicePhase::Disabled,
            interpreter,
            backoff_secs,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.phase, VoicePhase::Disabled)
    }

    fn restart_later(&mut self, now: f32) {
        self.phase = VoicePhase::Restarting {
            resume_at: now + self.backoff_secs,
        };
    }
}

/// Speech seams, boxed so tests and hosts can swap implementations.
#[derive(Resource)]
pub struct SpeechIo {
    pub input: Box<dyn SpeechInput>,
    pub output: Box<dyn SpeechOutput>,
}

impl SpeechIo {
    pub fn new(input: Box<dyn SpeechInput>, output: Box<dyn SpeechOutput>) -> Self {
        Self { input, output }
    }
}

pub fn install_speech_io(mut commands: Commands, settings: Res<SettingsResource>) {
    let voice = &settings.current.voice;
    let input: Box<dyn SpeechInput> = match voice.input {
        VoiceInputSetting::None => Box::new(NoSpeechInput),
        VoiceInputSetting::Terminal => Box::new(TerminalSpeechInput::default()),
    };
    commands.insert_resource(SpeechIo::new(
        input,
        Box::new(CaptionSpeechOutput::new(voice.words_per_minute)),
    ));
    commands.insert_resource(VoiceControl::new(
        VoiceInterpreter::default(),
        voice.restart_backoff_ms as f32 / 1000.0,
    ));
}

fn disable_after(error: &SpeechError, control: &mut VoiceControl, feedback: &mut HudFeedback) {
    control.phase = VoicePhase::Disabled;
    feedback.raise_alert(error.user_message());
}

pub fn toggle_voice(
    time: Res<Time>,
    mut intents: MessageReader<PlayerIntent>,
    mut control: ResMut<VoiceControl>,
    io: Option<ResMut<SpeechIo>>,
    mut feedback: ResMut<HudFeedback>,
) {
    let toggles = intents
        .read()
        .filter(|intent| matches!(intent, PlayerIntent::ToggleVoice))
        .count();
    let Some(mut io) = io else {
        return;
    };
    let now = time.elapsed_secs();

    for _ in 0..toggles {
        if control.is_enabled() {
            io.input.stop();
            control.phase = VoicePhase::Disabled;
            io.output.speak(DEACTIVATED_LINE, now);
            info!("Voice input off");
            continue;
        }

        match io.input.start() {
            Ok(()) => {
                control.phase = VoicePhase::Listening;
                io.output.speak(ACTIVATED_LINE, now);
                info!("Voice input on");
            }
            Err(error) => disable_after(&error, &mut control, &mut feedback),
        }
    }
}

/// Polls the recognizer, restarts it when due and forwards at most one
/// action per utterance.
pub fn poll_voice_input(
    time: Res<Time>,
    mut control: ResMut<VoiceControl>,
    io: Option<ResMut<SpeechIo>>,
    mut feedback: ResMut<HudFeedback>,
    mut intents: MessageWriter<PlayerIntent>,
) {
    let Some(mut io) = io else {
        return;
    };
    let io = &mut *io;
    let now = time.elapsed_secs();

    if let VoicePhase::Restarting { resume_at } = control.phase {
        if now < resume_at {
            return;
        }
        match io.input.start() {
            Ok(()) => control.phase = VoicePhase::Listening,
            Err(error) if error.is_fatal() => {
                disable_after(&error, &mut control, &mut feedback);
                return;
            }
            Err(error) => {
                debug!("Voice restart failed, retrying: {}", error);
                control.restart_later(now);
                return;
            }
        }
    }

    if control.phase != VoicePhase::Listening {
        return;
    }

    while let Some(event) = io.input.poll() {
        match event {
            SpeechEvent::Transcript(transcript) => {
                let speaking = io.output.is_speaking(now);
                if speaking {
                    debug!("Ignoring '{}' heard while speaking", transcript);
                } else {
                    feedback.show_heard(&transcript, now);
                }
                let intent = match control
                    .interpreter
                    .interpret_unless_speaking(&transcript, speaking)
                {
                    VoiceAction::Guess(letter) => PlayerIntent::guess(letter),
                    VoiceAction::RequestHint => Some(PlayerIntent::RequestAiHint),
                    VoiceAction::NewGame => Some(PlayerIntent::NewGame),
                    VoiceAction::NoAction => None,
                };
                if let Some(intent) = intent {
                    debug!("Voice '{}' -> {:?}", transcript, intent);
                    intents.write(intent);
                }
            }
            SpeechEvent::Ended => {
                control.restart_later(now);
                break;
            }
            SpeechEvent::Error(error) if error.is_fatal() => {
                io.input.stop();
                disable_after(&error, &mut control, &mut feedback);
                break;
            }
            SpeechEvent::Error(error) => {
                match error {
                    SpeechError::NoSpeech => debug!("No speech detected, restarting"),
                    other => warn!("Speech recognition error, restarting: {}", other),
                }
                io.input.stop();
                control.restart_later(now);
                break;
            }
        }
    }
}

pub fn speak_narration(
    time: Res<Time>,
    mut narrations: MessageReader<Narration>,
    control: Res<VoiceControl>,
    io: Option<ResMut<SpeechIo>>,
) {
    let Some(mut io) = io else {
        return;
    };
    for Narration(text) in narrations.read() {
        if control.is_enabled() {
            io.output.speak(text, time.elapsed_secs());
        }
    }
}
