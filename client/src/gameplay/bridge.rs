//! Game-state bridge.
//!
//! Turns backend snapshots into avatar commands, one-shot effects, sound
//! cues, narration and HUD state, and turns player intents into backend
//! requests. Reactions to a guess fire from the guess reply only, so
//! reloading a finished game never replays them.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use buddy_protocol::{
    CUSTOM_CATEGORY, DailyStartRequest, Difficulty, GameMode, GameStatus, StartGameRequest,
    fallback_categories, hint_fallback, revealed_positions, with_custom_entry,
};
use rand::Rng;

use crate::gameplay::audio::SoundCue;
use crate::gameplay::backend::{BackendError, BackendReply, BackendRequest, BackendWorker};
use crate::gameplay::feedback::HudFeedback;
use crate::gameplay::intent::PlayerIntent;
use crate::gameplay::themes::is_ai_category;
use crate::gameplay::timer::GameTimer;
use crate::gameplay::voice::Narration;
use crate::scene_runtime::messages::{AvatarCommand, EffectTrigger};
use crate::settings::{GameSettings, SettingsResource};

/// How long newly revealed letters stay highlighted before the status is
/// re-fetched.
pub const REVEAL_HIGHLIGHT_SECS: f32 = 0.6;
pub const ENCOURAGEMENT_CHANCE: f64 = 0.4;

pub const CUSTOM_TOPIC_REQUIRED: &str = "Please enter a topic for the AI to generate words!";
pub const AI_HINT_FAILED: &str = "Failed to generate hint. Please try again.";
pub const WIN_LINE: &str = "You won! Great job!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AiHintState {
    #[default]
    Idle,
    Thinking,
    Shown(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetterReveal {
    pub positions: Vec<usize>,
    pub refetch_at: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    /// Last snapshot from the backend, kept for redraw and export.
    pub last_game_data: Option<GameStatus>,
    pub mode: GameMode,
    pub categories: Vec<String>,
    pub category: String,
    pub difficulty: Difficulty,
    pub custom_topic: String,
    /// Overrides the category badge, e.g. `AI: dinosaurs`.
    pub badge: Option<String>,
    pub hint_revealed: bool,
    pub ai_hint: AiHintState,
    pub fun_fact: Option<String>,
    fun_fact_word: Option<String>,
    pub reveal: Option<LetterReveal>,
    pub guess_in_flight: Option<char>,
    pub start_in_flight: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::from_settings(&GameSettings::default())
    }
}

impl FromWorld for GameSession {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<SettingsResource>()
            .map(|settings| Self::from_settings(&settings.current))
            .unwrap_or_default()
    }
}

impl GameSession {
    pub fn from_settings(settings: &GameSettings) -> Self {
        let categories = fallback_categories();
        Self {
            last_game_data: None,
            mode: settings.gameplay.last_mode,
            category: categories.first().cloned().unwrap_or_default(),
            categories,
            difficulty: settings.gameplay.default_difficulty,
            custom_topic: String::new(),
            badge: None,
            hint_revealed: false,
            ai_hint: AiHintState::Idle,
            fun_fact: None,
            fun_fact_word: None,
            reveal: None,
            guess_in_flight: None,
            start_in_flight: false,
        }
    }

    pub fn status(&self) -> Option<&GameStatus> {
        self.last_game_data.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_some_and(|status| status.game_over)
    }

    /// A guess is sent only for a running game, a fresh letter and while no
    /// other guess is waiting for its reply.
    pub fn can_guess(&self, letter: char) -> bool {
        self.guess_in_flight.is_none()
            && self
                .status()
                .is_some_and(|status| !status.game_over && !status.has_guessed(letter))
    }

    pub fn is_custom_selected(&self) -> bool {
        self.category == CUSTOM_CATEGORY
    }

    pub fn badge_text(&self) -> &str {
        self.badge.as_deref().unwrap_or(&self.category)
    }

    /// Request that re-reads the current game for the active mode.
    pub fn status_request(&self) -> BackendRequest {
        BackendRequest::Status {
            mode: self.mode,
            category: self.category.clone(),
        }
    }

    pub fn reset_hints(&mut self) {
        self.hint_revealed = false;
        self.ai_hint = AiHintState::Idle;
    }

    /// Selects the category a snapshot belongs to. Generated categories are
    /// added to the picker just before `Custom`.
    pub fn sync_category(&mut self, category: &str) {
        if category.is_empty() {
            return;
        }
        if is_ai_category(category) && !self.categories.iter().any(|known| known == category) {
            let custom_index = self
                .categories
                .iter()
                .position(|known| known == CUSTOM_CATEGORY)
                .unwrap_or(self.categories.len());
            self.categories.insert(custom_index, category.to_string());
        }
        if self.category != category {
            self.badge = None;
        }
        self.category = category.to_string();
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        let generated: Vec<String> = self
            .categories
            .iter()
            .filter(|category| is_ai_category(category))
            .cloned()
            .collect();
        self.categories = with_custom_entry(categories);
        for category in generated {
            self.sync_category(&category);
        }
        if !self.categories.contains(&self.category) {
            self.category = self.categories.first().cloned().unwrap_or_default();
        }
    }
}

/// Correctness of `letter` given the snapshot that answered it. The masked
/// word separates cells with spaces, so a space guess is judged by whether
/// an attempt was spent.
pub fn guess_was_correct(letter: char, attempts_before: Option<u8>, status: &GameStatus) -> bool {
    if letter == ' ' {
        return attempts_before.is_none_or(|before| status.attempts_left >= before);
    }
    status.is_letter_revealed(letter)
}

/// Sink for the visual and audible reactions to game state.
#[derive(SystemParam)]
pub struct GameUiBridge<'w> {
    avatar: MessageWriter<'w, AvatarCommand>,
    effects: MessageWriter<'w, EffectTrigger>,
    sounds: MessageWriter<'w, SoundCue>,
}

impl GameUiBridge<'_> {
    /// Full redraw of the avatar and mood from a snapshot.
    pub fn apply(&mut self, status: &GameStatus) {
        self.avatar.write(AvatarCommand::Apply(status.attempts_left));
    }

    pub fn reset(&mut self) {
        self.avatar.write(AvatarCommand::Reset);
    }

    pub fn on_correct_guess(&mut self) {
        self.effects.write(EffectTrigger::SuccessPulse);
        self.effects.write(EffectTrigger::Sparkles);
        self.sounds.write(SoundCue::Correct);
    }

    pub fn on_wrong_guess(&mut self) {
        self.effects.write(EffectTrigger::ScreenShake);
        self.sounds.write(SoundCue::Wrong);
    }

    pub fn on_game_won(&mut self) {
        self.effects.write(EffectTrigger::VictoryDance);
        self.sounds.write(SoundCue::Win);
    }

    pub fn on_game_lost(&mut self) {
        self.effects.write(EffectTrigger::ScreenShake);
        self.sounds.write(SoundCue::Lose);
    }
}

fn send_or_alert(
    worker: Option<&BackendWorker>,
    request: BackendRequest,
    feedback: &mut HudFeedback,
) -> bool {
    let result = match worker {
        Some(worker) => worker.send(request),
        None => Err(BackendError::WorkerGone),
    };
    match result {
        Ok(()) => true,
        Err(error) => {
            feedback.raise_alert(error.user_message());
            false
        }
    }
}

pub fn request_initial_state(worker: Option<Res<BackendWorker>>, session: Res<GameSession>) {
    let Some(worker) = worker else {
        return;
    };
    for request in [BackendRequest::Categories, session.status_request()] {
        if let Err(error) = worker.send(request) {
            warn!("Initial backend request not sent: {}", error);
        }
    }
}

pub fn handle_player_intents(
    time: Res<Time>,
    mut intents: MessageReader<PlayerIntent>,
    mut session: ResMut<GameSession>,
    worker: Option<Res<BackendWorker>>,
    settings: Res<SettingsResource>,
    mut timer: ResMut<GameTimer>,
    mut feedback: ResMut<HudFeedback>,
) {
    let worker = worker.as_deref();
    for intent in intents.read() {
        match intent {
            PlayerIntent::Guess(letter) => {
                if !session.can_guess(*letter) {
                    debug!("Guess '{}' ignored", letter);
                    continue;
                }
                let request = BackendRequest::Guess {
                    letter: *letter,
                    mode: session.mode,
                    category: session.category.clone(),
                };
                if send_or_alert(worker, request, &mut feedback) {
                    session.guess_in_flight = Some(*letter);
                }
            }
            PlayerIntent::ShowHint => {
                if session.status().and_then(GameStatus::hint).is_some() {
                    session.hint_revealed = true;
                }
            }
            PlayerIntent::RequestAiHint => match session.ai_hint.clone() {
                AiHintState::Thinking => {}
                AiHintState::Shown(_) => session.ai_hint = AiHintState::Idle,
                AiHintState::Idle | AiHintState::Error(_) => {
                    if send_or_alert(worker, BackendRequest::AiHint, &mut feedback) {
                        session.ai_hint = AiHintState::Thinking;
                    }
                }
            },
            PlayerIntent::NewGame => {
                if session.is_custom_selected() && session.custom_topic.trim().is_empty() {
                    feedback.raise_alert(CUSTOM_TOPIC_REQUIRED);
                    continue;
                }
                let request = BackendRequest::Start(StartGameRequest {
                    category: session.category.clone(),
                    difficulty: session.difficulty,
                    custom_topic: session.custom_topic.clone(),
                });
                if settings.current.gameplay.timer_enabled {
                    timer.start(time.elapsed_secs());
                }
                if send_or_alert(worker, request, &mut feedback) {
                    session.start_in_flight = true;
                }
            }
            PlayerIntent::StartDaily => {
                let request = BackendRequest::StartDaily(DailyStartRequest {
                    category: session.category.clone(),
                });
                if send_or_alert(worker, request, &mut feedback) {
                    session.start_in_flight = true;
                }
            }
            PlayerIntent::ToggleSound | PlayerIntent::ToggleVoice | PlayerIntent::ToggleTimer => {}
        }
    }
}

/// Everything a reply handler may touch besides the session.
#[derive(SystemParam)]
pub struct ReplyOutputs<'w> {
    bridge: GameUiBridge<'w>,
    feedback: ResMut<'w, HudFeedback>,
    narration: MessageWriter<'w, Narration>,
    timer: ResMut<'w, GameTimer>,
    settings: ResMut<'w, SettingsResource>,
    worker: Option<Res<'w, BackendWorker>>,
}

pub fn handle_backend_replies(
    time: Res<Time>,
    mut replies: MessageReader<BackendReply>,
    mut session: ResMut<GameSession>,
    mut out: ReplyOutputs,
) {
    let now = time.elapsed_secs();
    for reply in replies.read() {
        match reply {
            BackendReply::Categories(result) => match result {
                Ok(categories) if !categories.is_empty() => {
                    session.set_categories(categories.clone());
                }
                Ok(_) => {
                    warn!("Backend returned no categories, using built-in list");
                    session.set_categories(fallback_categories());
                }
                Err(error) => {
                    warn!("Failed to fetch categories, using built-in list: {}", error);
                    session.set_categories(fallback_categories());
                }
            },
            BackendReply::Started {
                mode,
                custom_topic,
                result,
            } => {
                session.start_in_flight = false;
                match result {
                    Ok(status) => {
                        session.mode = *mode;
                        out.settings.current.gameplay.last_mode = *mode;
                        out.settings.persist();
                        session.reset_hints();
                        session.reveal = None;
                        out.bridge.reset();
                        present_status(&mut session, &mut out, status.clone());
                        session.badge = custom_topic
                            .as_deref()
                            .filter(|topic| !topic.is_empty())
                            .map(|topic| format!("AI: {topic}"));
                        info!(
                            "Started {} game in '{}'",
                            mode.as_str(),
                            session.badge_text()
                        );
                    }
                    Err(error) => out.feedback.raise_alert(error.user_message()),
                }
            }
            BackendReply::Status(result) => match result {
                Ok(status) => present_status(&mut session, &mut out, status.clone()),
                Err(error) => warn!("Failed to fetch game status: {}", error),
            },
            BackendReply::Guessed { letter, result } => {
                session.guess_in_flight = None;
                match result {
                    Ok(status) => react_to_guess(&mut session, &mut out, *letter, status, now),
                    Err(error) => out.feedback.raise_alert(error.user_message()),
                }
            }
            BackendReply::AiHint(result) => {
                if session.ai_hint != AiHintState::Thinking {
                    continue;
                }
                session.ai_hint = match result {
                    Ok(response) => match response.clone().into_result() {
                        Ok(hint) => {
                            out.narration.write(Narration(format!("AI Hint: {hint}")));
                            AiHintState::Shown(hint)
                        }
                        Err(message) => AiHintState::Error(message),
                    },
                    Err(BackendError::Protocol(error)) => AiHintState::Error(error.user_message()),
                    Err(error) => {
                        warn!("AI hint request failed: {}", error);
                        AiHintState::Error(AI_HINT_FAILED.to_string())
                    }
                };
            }
            BackendReply::Definition { word, definition } => {
                if session.fun_fact_word.as_deref() != Some(word.as_str()) {
                    continue;
                }
                let hint = session.status().and_then(GameStatus::hint).map(str::to_string);
                let fact = definition.clone().or_else(|| hint.as_deref().map(hint_fallback));
                if let Some(fact) = &fact {
                    out.narration.write(Narration(fact.clone()));
                }
                session.fun_fact = fact;
            }
        }
    }
}

fn react_to_guess(
    session: &mut GameSession,
    out: &mut ReplyOutputs,
    letter: char,
    status: &GameStatus,
    now: f32,
) {
    let previous = session.status();
    let attempts_before = previous.map(|previous| previous.attempts_left);
    let previous_masked = previous
        .map(|previous| previous.masked_word.clone())
        .unwrap_or_default();
    let correct = guess_was_correct(letter, attempts_before, status);
    debug!(
        "Guess '{}' was {}",
        letter,
        if correct { "correct" } else { "wrong" }
    );

    if status.game_over {
        out.timer.stop();
        if status.win {
            out.bridge.on_game_won();
            out.feedback.show_random_win_banner(now);
            out.narration.write(Narration(WIN_LINE.to_string()));
        } else {
            out.bridge.on_game_lost();
            out.narration.write(Narration(lose_line(status)));
        }
    } else if correct {
        out.bridge.on_correct_guess();
        if rand::thread_rng().gen_bool(ENCOURAGEMENT_CHANCE) {
            out.feedback.show_random_encouragement(now);
        }
        session.reveal = Some(LetterReveal {
            positions: revealed_positions(&previous_masked, &status.masked_word, letter),
            refetch_at: now + REVEAL_HIGHLIGHT_SECS,
        });
    } else {
        out.bridge.on_wrong_guess();
    }

    present_status(session, out, status.clone());
}

pub fn lose_line(status: &GameStatus) -> String {
    format!(
        "Game over. The word was {}. Better luck next time!",
        status.word.as_deref().unwrap_or_default()
    )
}

/// Full redraw from a snapshot.
fn present_status(session: &mut GameSession, out: &mut ReplyOutputs, status: GameStatus) {
    if let Some(hint) = status.hint().filter(|_| status.is_fresh()) {
        out.narration.write(Narration(format!(
            "The category is {}. Here is your hint: {}",
            status.category, hint
        )));
    }

    out.bridge.apply(&status);
    session.mode = status.mode;
    session.sync_category(&status.category);
    if let Some(difficulty) = status.difficulty {
        session.difficulty = difficulty;
    }

    match status.word.as_deref().filter(|_| status.game_over) {
        Some(word) => {
            let word = word.to_lowercase();
            if session.fun_fact_word.as_deref() != Some(word.as_str()) {
                session.fun_fact_word = Some(word.clone());
                session.fun_fact = None;
                match status.learning.as_ref().filter(|info| info.has_fact()) {
                    Some(info) => {
                        let lines = info.fact_lines();
                        out.narration.write(Narration(lines.join(". ")));
                        session.fun_fact = Some(lines.join("\n"));
                    }
                    None => {
                        let sent = match out.worker.as_deref() {
                            Some(worker) => worker.send(BackendRequest::Definition { word }),
                            None => Err(BackendError::WorkerGone),
                        };
                        if let Err(error) = sent {
                            warn!("Fun fact lookup not sent: {}", error);
                        }
                    }
                }
            }
        }
        None => {
            session.fun_fact = None;
            session.fun_fact_word = None;
        }
    }

    session.last_game_data = Some(status);
}

/// Ends the letter highlight and re-reads the game.
pub fn finish_letter_reveal(
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    worker: Option<Res<BackendWorker>>,
) {
    let due = session
        .reveal
        .as_ref()
        .is_some_and(|reveal| time.elapsed_secs() >= reveal.refetch_at);
    if !due {
        return;
    }
    session.reveal = None;
    let Some(worker) = worker else {
        return;
    };
    if let Err(error) = worker.send(session.status_request()) {
        warn!("Status refresh not sent: {}", error);
    }
}
