mod support;

use balloon_buddy::RenderMode;
use balloon_buddy::gameplay::backend::{BackendReply, BackendRequest, BackendWorker};
use balloon_buddy::gameplay::feedback::HudFeedback;
use balloon_buddy::gameplay::intent::PlayerIntent;
use balloon_buddy::gameplay::register_gameplay;
use balloon_buddy::gameplay::voice::{
    ACTIVATED_LINE, DEACTIVATED_LINE, Narration, SpeechIo, VoiceControl, VoicePhase,
};
use balloon_buddy::infra::speech::{SpeechError, SpeechEvent, SpeechInput, SpeechOutput};
use bevy::prelude::*;
use buddy_common::VoiceInterpreter;
use buddy_protocol::GameMode;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use support::{headless_app, run_frames, status};

#[derive(Default)]
struct Script {
    events: VecDeque<SpeechEvent>,
    starts: usize,
    stops: usize,
    start_error: Option<SpeechError>,
}

#[derive(Clone, Default)]
struct ScriptedInput(Arc<Mutex<Script>>);

impl ScriptedInput {
    fn push(&self, event: SpeechEvent) {
        self.0.lock().unwrap().events.push_back(event);
    }

    fn starts(&self) -> usize {
        self.0.lock().unwrap().starts
    }
}

impl SpeechInput for ScriptedInput {
    fn start(&mut self) -> Result<(), SpeechError> {
        let mut script = self.0.lock().unwrap();
        script.starts += 1;
        match script.start_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn stop(&mut self) {
        self.0.lock().unwrap().stops += 1;
    }

    fn poll(&mut self) -> Option<SpeechEvent> {
        self.0.lock().unwrap().events.pop_front()
    }
}

#[derive(Clone, Default)]
struct RecordingOutput {
    spoken: Arc<Mutex<Vec<String>>>,
    speaking: Arc<AtomicBool>,
}

impl SpeechOutput for RecordingOutput {
    fn speak(&mut self, text: &str, _now_secs: f32) {
        self.spoken.lock().unwrap().push(text.to_string());
    }

    fn is_speaking(&self, _now_secs: f32) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }
}

struct VoiceHarness {
    app: App,
    input: ScriptedInput,
    output: RecordingOutput,
    requests: Receiver<BackendRequest>,
    _replies: Sender<BackendReply>,
}

impl VoiceHarness {
    fn new(name: &str) -> Self {
        let mut app = headless_app(name, RenderMode::TextFallback);
        register_gameplay(&mut app);

        let input = ScriptedInput::default();
        let output = RecordingOutput::default();
        let (request_sender, requests) = unbounded();
        let (replies, reply_receiver) = unbounded();
        replies
            .send(BackendReply::Status(Ok(status("_ _ _", 6, &[]))))
            .unwrap();

        app.insert_resource(BackendWorker::from_channels(request_sender, reply_receiver))
            .insert_resource(SpeechIo::new(
                Box::new(input.clone()),
                Box::new(output.clone()),
            ))
            .insert_resource(VoiceControl::new(VoiceInterpreter::default(), 0.3));
        app.update();

        Self {
            app,
            input,
            output,
            requests,
            _replies: replies,
        }
    }

    fn enabled(name: &str) -> Self {
        let mut harness = Self::new(name);
        harness.toggle();
        harness.output.spoken.lock().unwrap().clear();
        harness
    }

    fn toggle(&mut self) {
        self.app.world_mut().write_message(PlayerIntent::ToggleVoice);
        self.app.update();
    }

    fn hear(&mut self, event: SpeechEvent) {
        self.input.push(event);
        self.app.update();
    }

    fn phase(&self) -> VoicePhase {
        self.app.world().resource::<VoiceControl>().phase
    }

    fn feedback(&self) -> &HudFeedback {
        self.app.world().resource::<HudFeedback>()
    }

    fn sent(&self) -> Vec<BackendRequest> {
        self.requests.try_iter().collect()
    }

    fn spoken(&self) -> Vec<String> {
        self.output.spoken.lock().unwrap().clone()
    }
}

#[test]
fn toggling_on_starts_listening_and_announces_it() {
    let mut harness = VoiceHarness::new("voice-on");

    harness.toggle();

    assert_eq!(harness.phase(), VoicePhase::Listening);
    assert_eq!(harness.input.starts(), 1);
    assert_eq!(harness.spoken(), vec![ACTIVATED_LINE.to_string()]);

    harness.toggle();
    assert_eq!(harness.phase(), VoicePhase::Disabled);
    assert_eq!(harness.spoken().last().map(String::as_str), Some(DEACTIVATED_LINE));
}

#[test]
fn heard_letter_becomes_a_guess() {
    let mut harness = VoiceHarness::enabled("voice-guess");

    harness.hear(SpeechEvent::Transcript("bee".into()));

    assert_eq!(
        harness.sent(),
        vec![BackendRequest::Guess {
            letter: 'B',
            mode: GameMode::Random,
            category: "Animals".into(),
        }]
    );
    let heard = harness.feedback().heard.as_ref().map(|heard| heard.text.clone());
    assert!(heard.is_some_and(|text| text.contains("bee")));
}

#[test]
fn new_game_phrase_starts_a_game() {
    let mut harness = VoiceHarness::enabled("voice-new-game");

    harness.hear(SpeechEvent::Transcript("let's play a new game".into()));

    assert!(matches!(harness.sent().as_slice(), [BackendRequest::Start(_)]));
}

#[test]
fn speech_heard_while_talking_is_ignored() {
    let mut harness = VoiceHarness::enabled("voice-echo");
    harness.output.speaking.store(true, Ordering::SeqCst);

    harness.hear(SpeechEvent::Transcript("letter A".into()));

    assert!(harness.sent().is_empty());
    assert!(harness.feedback().heard.is_none());
    assert_eq!(harness.phase(), VoicePhase::Listening);
}

#[test]
fn denied_microphone_turns_voice_off() {
    let mut harness = VoiceHarness::enabled("voice-denied");

    harness.hear(SpeechEvent::Error(SpeechError::NotAllowed));

    assert_eq!(harness.phase(), VoicePhase::Disabled);
    assert_eq!(
        harness.feedback().alert,
        Some(SpeechError::NotAllowed.user_message())
    );
}

#[test]
fn ended_recognition_restarts_after_backoff() {
    let mut harness = VoiceHarness::enabled("voice-restart");

    harness.hear(SpeechEvent::Ended);
    assert!(matches!(harness.phase(), VoicePhase::Restarting { .. }));
    assert_eq!(harness.input.starts(), 1);

    run_frames(&mut harness.app, 4);

    assert_eq!(harness.phase(), VoicePhase::Listening);
    assert_eq!(harness.input.starts(), 2);
}

#[test]
fn transient_error_restarts_instead_of_disabling() {
    let mut harness = VoiceHarness::enabled("voice-no-speech");

    harness.hear(SpeechEvent::Error(SpeechError::NoSpeech));

    assert!(matches!(harness.phase(), VoicePhase::Restarting { .. }));
    assert!(harness.feedback().alert.is_none());
}

#[test]
fn unsupported_recognizer_keeps_voice_off() {
    let mut harness = VoiceHarness::new("voice-unsupported");
    harness.input.0.lock().unwrap().start_error = Some(SpeechError::NotSupported);

    harness.toggle();

    assert_eq!(harness.phase(), VoicePhase::Disabled);
    assert!(harness.feedback().alert.is_some());
    assert!(harness.spoken().is_empty());
}

#[test]
fn narration_is_spoken_only_while_voice_is_on() {
    let mut harness = VoiceHarness::new("voice-narration");

    harness
        .app
        .world_mut()
        .write_message(Narration("The category is Animals.".into()));
    harness.app.update();
    assert!(harness.spoken().is_empty());

    let mut harness = VoiceHarness::enabled("voice-narration-on");
    harness
        .app
        .world_mut()
        .write_message(Narration("The category is Animals.".into()));
    harness.app.update();
    assert_eq!(harness.spoken(), vec!["The category is Animals.".to_string()]);
}
