mod support;

use balloon_buddy::RenderMode;
use balloon_buddy::gameplay::backend::{BackendReply, BackendRequest, BackendWorker};
use balloon_buddy::gameplay::bridge::{CUSTOM_TOPIC_REQUIRED, GameSession, REVEAL_HIGHLIGHT_SECS};
use balloon_buddy::gameplay::feedback::HudFeedback;
use balloon_buddy::gameplay::intent::PlayerIntent;
use balloon_buddy::gameplay::register_gameplay;
use balloon_buddy::gameplay::timer::GameTimer;
use balloon_buddy::scene_runtime::registration::register_scene_runtime;
use balloon_buddy::scene_runtime::state::{AvatarState, ScreenFlags};
use balloon_buddy::scene_runtime::systems::EffectRunList;
use bevy::prelude::*;
use buddy_protocol::{CUSTOM_CATEGORY, GameMode, LearningInfo};
use crossbeam_channel::{Receiver, Sender, unbounded};
use support::{FRAME, finished, headless_app, run_frames, status};

struct Harness {
    app: App,
    requests: Receiver<BackendRequest>,
    replies: Sender<BackendReply>,
}

impl Harness {
    fn new(name: &str) -> Self {
        let mut app = headless_app(name, RenderMode::TextFallback);
        register_scene_runtime(&mut app, RenderMode::Scene3d);
        register_gameplay(&mut app);

        let (request_sender, requests) = unbounded();
        let (replies, reply_receiver) = unbounded();
        app.insert_resource(BackendWorker::from_channels(request_sender, reply_receiver));
        app.update();

        Self {
            app,
            requests,
            replies,
        }
    }

    fn reply(&mut self, reply: BackendReply) {
        self.replies.send(reply).expect("reply channel open");
        self.app.update();
    }

    fn intent(&mut self, intent: PlayerIntent) {
        self.app.world_mut().write_message(intent);
        self.app.update();
    }

    fn sent(&self) -> Vec<BackendRequest> {
        self.requests.try_iter().collect()
    }

    fn session(&self) -> &GameSession {
        self.app.world().resource::<GameSession>()
    }

    fn avatar(&self) -> &AvatarState {
        self.app.world().resource::<AvatarState>()
    }

    fn flags(&self) -> ScreenFlags {
        *self.app.world().resource::<ScreenFlags>()
    }

    /// A running game with one wrong guess behind it.
    fn with_game_in_progress(name: &str) -> Self {
        let mut harness = Self::new(name);
        harness.reply(BackendReply::Status(Ok(status("_ _ _", 5, &['Z']))));
        harness.sent();
        harness
    }
}

#[test]
fn reloaded_status_draws_parts_without_reactions() {
    let harness = Harness::with_game_in_progress("reload");

    assert_eq!(harness.avatar().0.shown_count(), 1);
    assert_eq!(harness.flags(), ScreenFlags::default());
    assert!(harness.app.world().resource::<EffectRunList>().is_empty());
    assert_eq!(harness.session().category, "Animals");
}

#[test]
fn guess_intent_is_sent_once_while_in_flight() {
    let mut harness = Harness::with_game_in_progress("in-flight");

    harness.intent(PlayerIntent::Guess('A'));
    harness.intent(PlayerIntent::Guess('B'));

    assert_eq!(
        harness.sent(),
        vec![BackendRequest::Guess {
            letter: 'A',
            mode: GameMode::Random,
            category: "Animals".into(),
        }]
    );
    assert_eq!(harness.session().guess_in_flight, Some('A'));
}

#[test]
fn already_guessed_letters_are_not_sent() {
    let mut harness = Harness::with_game_in_progress("repeat");

    harness.intent(PlayerIntent::Guess('Z'));

    assert!(harness.sent().is_empty());
}

#[test]
fn wrong_guess_shakes_and_adds_a_part() {
    let mut harness = Harness::with_game_in_progress("wrong");
    harness.intent(PlayerIntent::Guess('Q'));

    harness.reply(BackendReply::Guessed {
        letter: 'Q',
        result: Ok(status("_ _ _", 4, &['Z', 'Q'])),
    });

    assert!(harness.flags().shake);
    assert!(!harness.flags().success_glow);
    assert_eq!(harness.avatar().0.shown_count(), 2);
    assert_eq!(harness.session().guess_in_flight, None);
}

#[test]
fn correct_guess_glows_highlights_and_refetches() {
    let mut harness = Harness::with_game_in_progress("correct");
    harness.intent(PlayerIntent::Guess('A'));
    harness.sent();

    harness.reply(BackendReply::Guessed {
        letter: 'A',
        result: Ok(status("_ A _", 5, &['Z', 'A'])),
    });

    assert!(harness.flags().success_glow);
    assert!(!harness.flags().shake);
    assert_eq!(harness.avatar().0.shown_count(), 1);
    let reveal = harness.session().reveal.clone().expect("letter highlight");
    assert_eq!(reveal.positions, vec![1]);

    let frames = (REVEAL_HIGHLIGHT_SECS / FRAME.as_secs_f32()).ceil() as usize + 1;
    run_frames(&mut harness.app, frames);

    assert!(harness.session().reveal.is_none());
    assert_eq!(
        harness.sent(),
        vec![BackendRequest::Status {
            mode: GameMode::Random,
            category: "Animals".into(),
        }]
    );
}

#[test]
fn losing_guess_floats_away_and_looks_up_the_word() {
    let mut harness = Harness::with_game_in_progress("lost");
    harness
        .app
        .world_mut()
        .resource_mut::<GameTimer>()
        .start(0.0);

    harness.reply(BackendReply::Guessed {
        letter: 'Q',
        result: Ok(finished("_ _ _", 0, &['Z', 'Q'], false)),
    });

    assert!(harness.avatar().0.is_floating_away());
    assert!(harness.flags().shake);
    assert!(!harness.app.world().resource::<GameTimer>().is_running());
    assert_eq!(
        harness.sent(),
        vec![BackendRequest::Definition { word: "cat".into() }]
    );

    harness.reply(BackendReply::Definition {
        word: "cat".into(),
        definition: None,
    });
    assert_eq!(
        harness.session().fun_fact.as_deref(),
        Some("Did you know? It purrs")
    );
}

#[test]
fn winning_guess_shows_the_banner_and_learning_facts() {
    let mut harness = Harness::with_game_in_progress("won");
    let mut won = finished("C A T", 5, &['Z', 'C', 'A', 'T'], true);
    won.learning = Some(LearningInfo {
        fun_fact: Some("Cats sleep most of the day.".into()),
        ..Default::default()
    });

    harness.reply(BackendReply::Guessed {
        letter: 'T',
        result: Ok(won),
    });

    let feedback = harness.app.world().resource::<HudFeedback>();
    assert!(feedback.banner.is_some());
    assert!(!harness.flags().shake);
    assert!(
        harness
            .session()
            .fun_fact
            .as_deref()
            .is_some_and(|fact| fact.contains("Cats sleep"))
    );
    assert!(harness.sent().is_empty());
}

#[test]
fn new_game_resets_the_avatar() {
    let mut harness = Harness::with_game_in_progress("new-game");

    harness.intent(PlayerIntent::NewGame);
    let sent = harness.sent();
    assert!(matches!(sent.as_slice(), [BackendRequest::Start(_)]));
    assert!(harness.session().start_in_flight);

    harness.reply(BackendReply::Started {
        mode: GameMode::Random,
        custom_topic: None,
        result: Ok(status("_ _ _ _", 6, &[])),
    });

    assert_eq!(harness.avatar().0.shown_count(), 0);
    assert!(!harness.session().start_in_flight);
    assert_eq!(harness.flags(), ScreenFlags::default());
}

#[test]
fn custom_category_needs_a_topic() {
    let mut harness = Harness::with_game_in_progress("custom");
    harness.app.world_mut().resource_mut::<GameSession>().category = CUSTOM_CATEGORY.into();

    harness.intent(PlayerIntent::NewGame);

    assert!(harness.sent().is_empty());
    assert_eq!(
        harness.app.world().resource::<HudFeedback>().alert.as_deref(),
        Some(CUSTOM_TOPIC_REQUIRED)
    );
}

#[test]
fn custom_game_shows_the_topic_badge() {
    let mut harness = Harness::new("custom-badge");

    let mut generated = status("_ _ _", 6, &[]);
    generated.category = "AI: dinosaurs".into();
    harness.reply(BackendReply::Started {
        mode: GameMode::Random,
        custom_topic: Some("dinosaurs".into()),
        result: Ok(generated),
    });

    let session = harness.session();
    assert_eq!(session.badge_text(), "AI: dinosaurs");
    let custom_index = session
        .categories
        .iter()
        .position(|category| category == CUSTOM_CATEGORY);
    let generated_index = session
        .categories
        .iter()
        .position(|category| category == "AI: dinosaurs");
    assert_eq!(generated_index.map(|index| index + 1), custom_index);
}
