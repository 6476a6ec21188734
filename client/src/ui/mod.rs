use crate::app::state::RenderMode;
use crate::gameplay::bridge::{AiHintState, GameSession};
use crate::gameplay::feedback::HudFeedback;
use crate::gameplay::intent::PlayerIntent;
use crate::gameplay::themes::{category_icon, category_label};
use crate::gameplay::timer::GameTimer;
use crate::gameplay::voice::{SpeechIo, VoiceControl};
use crate::scene_runtime::state::{AvatarState, ScreenFlags};
use crate::settings::{
    FpsLimitSetting, GameSettings, ResolutionSetting, SettingsResource, VoiceInputSetting,
    WindowModeSetting,
};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use buddy_common::{MAX_ATTEMPTS, danger_glow, fallback_art};
use buddy_protocol::{Difficulty, GameMode, GameStatus, daily_share_text};
use rand::Rng;

const SHAKE_JITTER_PX: f32 = 6.0;
const WORD_COLOR: egui::Color32 = egui::Color32::from_rgb(45, 52, 54);
const REVEAL_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);
const CORRECT_KEY: egui::Color32 = egui::Color32::from_rgb(46, 160, 67);
const WRONG_KEY: egui::Color32 = egui::Color32::from_rgb(192, 57, 43);
const SUCCESS_GLOW: egui::Color32 = egui::Color32::from_rgb(46, 204, 113);
const DANGER_GLOW: egui::Color32 = egui::Color32::from_rgb(231, 76, 60);
const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(20, 24, 32, 215);

/// Whether egui wants the pointer or keyboard this frame. Scene picking and
/// physical-key guesses stand down while set.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiInputCapture {
    pub pointer: bool,
    pub keyboard: bool,
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudUiState>()
            .init_resource::<UiInputCapture>()
            .add_systems(Update, toggle_settings_modal_with_escape)
            .add_systems(EguiPrimaryContextPass, draw_hud_egui);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum SettingsTab {
    #[default]
    Graphics,
    Audio,
    Voice,
    Backend,
}

#[derive(Resource, Default)]
struct HudUiState {
    settings_open: bool,
    settings_tab: SettingsTab,
    draft: GameSettings,
}

impl HudUiState {
    fn open_settings(&mut self, current: &GameSettings) {
        self.settings_open = true;
        self.settings_tab = SettingsTab::Graphics;
        self.draft = current.clone();
    }
}

#[derive(SystemParam)]
struct HudGame<'w> {
    session: ResMut<'w, GameSession>,
    feedback: ResMut<'w, HudFeedback>,
    timer: Res<'w, GameTimer>,
    voice: Res<'w, VoiceControl>,
    speech: Option<Res<'w, SpeechIo>>,
    flags: Res<'w, ScreenFlags>,
    avatar: Res<'w, AvatarState>,
    render_mode: Res<'w, State<RenderMode>>,
}

fn toggle_settings_modal_with_escape(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    settings_resource: Res<SettingsResource>,
    mut hud_state: ResMut<HudUiState>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    if hud_state.settings_open {
        hud_state.settings_open = false;
    } else {
        hud_state.open_settings(&settings_resource.current);
    }
}

fn draw_hud_egui(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut game: HudGame,
    mut hud_state: ResMut<HudUiState>,
    mut settings_resource: ResMut<SettingsResource>,
    mut intents: MessageWriter<PlayerIntent>,
    mut capture: ResMut<UiInputCapture>,
    mut theme_initialized: Local<bool>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if !*theme_initialized {
        apply_modern_hud_theme(ctx);
        *theme_initialized = true;
    }

    let now = time.elapsed_secs();
    let blocked = game.feedback.alert.is_some() || hud_state.settings_open;
    let mut actions = Vec::new();

    draw_header(
        ctx,
        &game,
        &settings_resource,
        &mut hud_state,
        &mut actions,
        blocked,
    );
    draw_controls_panel(ctx, &mut game.session, &settings_resource, &mut actions, blocked);
    draw_game_panel(
        ctx,
        &game,
        &settings_resource,
        &mut actions,
        blocked,
        now,
    );

    if matches!(game.render_mode.get(), RenderMode::TextFallback) {
        draw_fallback_art(ctx, game.avatar.0.attempts_left());
    } else {
        draw_scene_glow(ctx, &game, now);
    }
    draw_word_overlay(ctx, &game);
    draw_transient_messages(ctx, &game, now);

    if let Some(message) = game.feedback.alert.clone() {
        draw_alert(ctx, &message, &mut game.feedback);
    }
    if hud_state.settings_open {
        draw_settings_modal(&mut hud_state, &mut settings_resource, ctx);
    }

    for action in actions {
        match action {
            HudAction::Intent(intent) => {
                intents.write(intent);
            }
            HudAction::CopyResults(text) => {
                ctx.copy_text(text);
                game.feedback.show_toast("Results copied to clipboard!", now);
            }
        }
    }

    *capture = UiInputCapture {
        pointer: ctx.wants_pointer_input() || ctx.is_pointer_over_area(),
        keyboard: ctx.wants_keyboard_input() || blocked,
    };
}

enum HudAction {
    Intent(PlayerIntent),
    CopyResults(String),
}

fn apply_modern_hud_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(14);
    style.visuals.window_corner_radius = egui::CornerRadius::same(12);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(10);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(8);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(8);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(8);
    ctx.set_style(style);
}

fn panel_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(PANEL_FILL)
        .inner_margin(egui::Margin::symmetric(12, 10))
}

fn draw_header(
    ctx: &egui::Context,
    game: &HudGame,
    settings_resource: &SettingsResource,
    hud_state: &mut HudUiState,
    actions: &mut Vec<HudAction>,
    blocked: bool,
) {
    let session = &game.session;
    egui::TopBottomPanel::top("hud_header")
        .resizable(false)
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                ui.horizontal(|ui| {
                    let status = session.status();
                    let mode = status.map(|status| status.mode).unwrap_or(session.mode);
                    ui.heading(match mode {
                        GameMode::Daily => "📅 Daily Challenge",
                        GameMode::Random => "🎮 Random Play",
                    });
                    ui.separator();
                    ui.label(streak_line(mode, status));
                    if let Some(date) = status
                        .filter(|_| mode == GameMode::Daily)
                        .and_then(|status| status.date.as_deref())
                    {
                        ui.label(format!("Date: {date}"));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("⚙").on_hover_text("Settings").clicked() {
                            hud_state.open_settings(&settings_resource.current);
                        }

                        let voice_on = game.voice.is_enabled();
                        let voice_label = if voice_on { "🎤 On" } else { "🎤 Off" };
                        if ui
                            .selectable_label(voice_on, voice_label)
                            .on_hover_text(if voice_on {
                                "Voice On - Listening..."
                            } else {
                                "Voice Off"
                            })
                            .clicked()
                        {
                            actions.push(HudAction::Intent(PlayerIntent::ToggleVoice));
                        }

                        let sound_on = settings_resource.current.audio.effects_enabled;
                        if ui
                            .button(if sound_on { "🔊" } else { "🔇" })
                            .on_hover_text(if sound_on { "Sound On" } else { "Sound Off" })
                            .clicked()
                        {
                            actions.push(HudAction::Intent(PlayerIntent::ToggleSound));
                        }

                        if settings_resource.current.gameplay.timer_enabled {
                            ui.label(
                                egui::RichText::new(format!("⏱ {}", game.timer.display()))
                                    .monospace()
                                    .size(18.0),
                            );
                        }

                        ui.label(
                            egui::RichText::new(format!(
                                "{} {}",
                                category_icon(&session.category),
                                session.badge_text()
                            ))
                            .strong(),
                        );
                    });
                });
            });
        });
}

fn streak_line(mode: GameMode, status: Option<&GameStatus>) -> String {
    match mode {
        GameMode::Daily => {
            let current = status.and_then(|status| status.streak_current).unwrap_or(0);
            let best = status.and_then(|status| status.streak_best).unwrap_or(0);
            format!("Streak: {current} (Best: {best})")
        }
        GameMode::Random => "Play as many as you want!".to_string(),
    }
}

fn draw_controls_panel(
    ctx: &egui::Context,
    session: &mut GameSession,
    settings_resource: &SettingsResource,
    actions: &mut Vec<HudAction>,
    blocked: bool,
) {
    egui::SidePanel::left("hud_controls")
        .resizable(false)
        .default_width(250.0)
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                ui.heading("New game");
                ui.add_space(4.0);

                let categories = session.categories.clone();
                egui::ComboBox::from_label("Category")
                    .selected_text(category_label(&session.category))
                    .show_ui(ui, |ui| {
                        for category in &categories {
                            ui.selectable_value(
                                &mut session.category,
                                category.clone(),
                                category_label(category),
                            );
                        }
                    });

                if session.is_custom_selected() {
                    ui.add(
                        egui::TextEdit::singleline(&mut session.custom_topic)
                            .desired_width(220.0)
                            .hint_text("Topic for the AI, e.g. dinosaurs"),
                    );
                }

                egui::ComboBox::from_label("Difficulty")
                    .selected_text(session.difficulty.label())
                    .show_ui(ui, |ui| {
                        for option in Difficulty::ALL {
                            ui.selectable_value(&mut session.difficulty, option, option.label());
                        }
                    });

                ui.add_space(6.0);
                let idle = !session.start_in_flight;
                if ui
                    .add_enabled(idle, egui::Button::new("🎲 New Game").min_size(egui::vec2(220.0, 34.0)))
                    .clicked()
                {
                    actions.push(HudAction::Intent(PlayerIntent::NewGame));
                }
                if ui
                    .add_enabled(
                        idle,
                        egui::Button::new("📅 Daily Challenge").min_size(egui::vec2(220.0, 34.0)),
                    )
                    .clicked()
                {
                    actions.push(HudAction::Intent(PlayerIntent::StartDaily));
                }

                ui.add_space(6.0);
                let mut timer_enabled = settings_resource.current.gameplay.timer_enabled;
                if ui.checkbox(&mut timer_enabled, "⏱ Timer").changed() {
                    actions.push(HudAction::Intent(PlayerIntent::ToggleTimer));
                }

                if let Some(info) = session.status().and_then(|status| status.learning.as_ref()) {
                    ui.add_space(10.0);
                    ui.collapsing("📚 Curriculum Info", |ui| {
                        if let Some(subject) = info.subject_line() {
                            ui.label(egui::RichText::new(subject).strong());
                        }
                        if let Some(standard) = info.standard() {
                            ui.label(format!("Standard: {standard}"));
                        }
                        if let Some(description) = info.description() {
                            ui.label(description);
                        }
                        if let Some(question) = info.essential_question() {
                            ui.label(egui::RichText::new(format!("🤔 {question}")).italics());
                        }
                    });
                }
            });
        });
}

fn draw_game_panel(
    ctx: &egui::Context,
    game: &HudGame,
    settings_resource: &SettingsResource,
    actions: &mut Vec<HudAction>,
    blocked: bool,
    now: f32,
) {
    let speaking_caption = game
        .speech
        .as_ref()
        .and_then(|speech| speech.output.caption(now).map(str::to_string));

    egui::SidePanel::right("hud_game")
        .resizable(false)
        .default_width(340.0)
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                let session = &game.session;
                let Some(status) = session.status().cloned() else {
                    ui.label("Connecting to the game server...");
                    return;
                };

                draw_health_bar(ui, status.attempts_left);
                ui.label(format!("Attempts left: {}", status.attempts_left));
                ui.separator();

                draw_hints(ui, session, &status, actions);
                ui.separator();

                draw_letter_keyboard(ui, session, &status, actions);
                ui.separator();

                if status.game_over {
                    if status.win {
                        ui.label(
                            egui::RichText::new("You Won! 🎉")
                                .size(22.0)
                                .color(CORRECT_KEY),
                        );
                    } else {
                        ui.label(
                            egui::RichText::new(format!(
                                "Game Over! The word was {}",
                                status.word.as_deref().unwrap_or_default()
                            ))
                            .size(18.0)
                            .color(WRONG_KEY),
                        );
                    }
                    if let Some(fact) = &session.fun_fact {
                        egui::Frame::new()
                            .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 20))
                            .corner_radius(egui::CornerRadius::same(8))
                            .inner_margin(egui::Margin::same(8))
                            .show(ui, |ui| {
                                ui.label(fact);
                            });
                    }
                    if status.mode == GameMode::Daily && ui.button("📋 Copy Results").clicked() {
                        if let Some(text) =
                            daily_share_text(&status, &settings_resource.current.backend.base_url)
                        {
                            actions.push(HudAction::CopyResults(text));
                        }
                    }
                }
            });

            if let Some(caption) = &speaking_caption {
                ui.add_space(8.0);
                ui.label(egui::RichText::new(format!("🗣 {caption}")).italics());
            }
        });
}

fn draw_health_bar(ui: &mut egui::Ui, attempts_left: u8) {
    let left = attempts_left.min(MAX_ATTEMPTS);
    let lost = MAX_ATTEMPTS - left;
    let hearts = format!(
        "{}{}",
        "❤".repeat(usize::from(left)),
        "🖤".repeat(usize::from(lost))
    );
    ui.label(egui::RichText::new(hearts).size(24.0).color(WRONG_KEY));
}

fn draw_hints(
    ui: &mut egui::Ui,
    session: &GameSession,
    status: &GameStatus,
    actions: &mut Vec<HudAction>,
) {
    ui.horizontal(|ui| {
        if let Some(hint) = status.hint() {
            if session.hint_revealed {
                ui.add_enabled(false, egui::Button::new("✓ Hint Shown"));
            } else if ui.button("💡 Show Hint").clicked() {
                actions.push(HudAction::Intent(PlayerIntent::ShowHint));
            }
            if session.hint_revealed {
                ui.label(format!("Hint: {hint}"));
            }
        }
    });

    let (label, enabled) = match &session.ai_hint {
        AiHintState::Idle | AiHintState::Error(_) => ("💡 Get AI Hint", true),
        AiHintState::Thinking => ("🤔 Thinking...", false),
        AiHintState::Shown(_) => ("👁 Hide Hint", true),
    };
    if ui
        .add_enabled(enabled && !status.game_over, egui::Button::new(label))
        .clicked()
    {
        actions.push(HudAction::Intent(PlayerIntent::RequestAiHint));
    }
    match &session.ai_hint {
        AiHintState::Thinking => {
            ui.label("Generating hint...");
        }
        AiHintState::Shown(hint) => {
            ui.label(egui::RichText::new(hint).color(REVEAL_COLOR));
        }
        AiHintState::Error(message) => {
            ui.label(egui::RichText::new(format!("❌ {message}")).color(WRONG_KEY));
        }
        AiHintState::Idle => {}
    }
}

fn draw_letter_keyboard(
    ui: &mut egui::Ui,
    session: &GameSession,
    status: &GameStatus,
    actions: &mut Vec<HudAction>,
) {
    let key_size = egui::vec2(36.0, 36.0);
    ui.horizontal_wrapped(|ui| {
        for letter in 'A'..='Z' {
            let button = egui::Button::new(letter.to_string()).min_size(key_size);
            let button = if status.has_guessed(letter) {
                button.fill(if status.is_letter_revealed(letter) {
                    CORRECT_KEY
                } else {
                    WRONG_KEY
                })
            } else {
                button
            };
            if ui.add_enabled(session.can_guess(letter), button).clicked() {
                actions.push(HudAction::Intent(PlayerIntent::Guess(letter)));
            }
        }
        if ui
            .add_enabled(
                session.can_guess(' '),
                egui::Button::new("SPACE").min_size(egui::vec2(120.0, 36.0)),
            )
            .clicked()
        {
            actions.push(HudAction::Intent(PlayerIntent::Guess(' ')));
        }
    });
}

/// Masked word and mood glow over the scene. Shakes while the shake flag is
/// up.
fn draw_word_overlay(ctx: &egui::Context, game: &HudGame) {
    let Some(status) = game.session.status() else {
        return;
    };
    let jitter = if game.flags.shake {
        let mut rng = rand::thread_rng();
        egui::vec2(
            rng.gen_range(-SHAKE_JITTER_PX..=SHAKE_JITTER_PX),
            rng.gen_range(-SHAKE_JITTER_PX..=SHAKE_JITTER_PX),
        )
    } else {
        egui::Vec2::ZERO
    };
    let revealed = game
        .session
        .reveal
        .as_ref()
        .map(|reveal| reveal.positions.as_slice())
        .unwrap_or_default();

    egui::Area::new(egui::Id::new("hud_word"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 70.0) + jitter)
        .order(egui::Order::Middle)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200))
                .corner_radius(egui::CornerRadius::same(12))
                .inner_margin(egui::Margin::symmetric(18, 10))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for (index, cell) in status.masked_word.split(' ').enumerate() {
                            let highlighted = revealed.contains(&index);
                            let text = egui::RichText::new(cell)
                                .monospace()
                                .size(if highlighted { 40.0 } else { 34.0 })
                                .color(if highlighted { REVEAL_COLOR } else { WORD_COLOR });
                            ui.label(text);
                        }
                    });
                });
        });
}

fn draw_scene_glow(ctx: &egui::Context, game: &HudGame, now: f32) {
    let attempts_left = game.avatar.0.attempts_left();
    let color = if game.flags.success_glow {
        Some(SUCCESS_GLOW)
    } else if danger_glow(attempts_left) && !game.session.is_game_over() {
        let pulse = 0.55 + 0.45 * (now * 4.0).sin().abs();
        Some(DANGER_GLOW.gamma_multiply(pulse))
    } else {
        None
    };
    let Some(color) = color else {
        return;
    };

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("hud_scene_glow"),
    ));
    painter.rect_stroke(
        ctx.available_rect().shrink(4.0),
        egui::CornerRadius::same(16),
        egui::Stroke::new(6.0, color),
        egui::StrokeKind::Inside,
    );
}

fn draw_fallback_art(ctx: &egui::Context, attempts_left: u8) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(140.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(fallback_art(attempts_left))
                    .monospace()
                    .size(22.0),
            );
        });
    });
}

fn draw_transient_messages(ctx: &egui::Context, game: &HudGame, now: f32) {
    let feedback = &game.feedback;
    if let Some(banner) = feedback.banner.as_ref().filter(|banner| banner.is_live(now)) {
        egui::Area::new(egui::Id::new("hud_banner"))
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, -40.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(&banner.text)
                        .size(48.0)
                        .strong()
                        .color(REVEAL_COLOR),
                );
            });
    }

    if let Some(toast) = feedback.toast.as_ref().filter(|toast| toast.is_live(now)) {
        egui::Area::new(egui::Id::new("hud_toast"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 150.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(108, 92, 231, 230))
                    .corner_radius(egui::CornerRadius::same(20))
                    .inner_margin(egui::Margin::symmetric(16, 8))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(&toast.text)
                                .size(22.0)
                                .color(egui::Color32::WHITE),
                        );
                    });
            });
    }

    if let Some(heard) = feedback.heard.as_ref().filter(|heard| heard.is_live(now)) {
        egui::Area::new(egui::Id::new("hud_heard"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -100.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(108, 92, 231, 230))
                    .corner_radius(egui::CornerRadius::same(20))
                    .inner_margin(egui::Margin::symmetric(20, 8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&heard.text).color(egui::Color32::WHITE));
                    });
            });
    }
}

fn draw_alert(ctx: &egui::Context, message: &str, feedback: &mut HudFeedback) {
    egui::Window::new("Notice")
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .collapsible(false)
        .resizable(false)
        .movable(false)
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(6.0);
            if ui.button("OK").clicked() {
                feedback.dismiss_alert();
            }
        });
}

fn draw_settings_modal(
    hud_state: &mut HudUiState,
    settings_resource: &mut SettingsResource,
    ctx: &egui::Context,
) {
    let was_open = hud_state.settings_open;
    let mut window_open = hud_state.settings_open;
    let mut should_apply = false;
    let mut should_close = false;

    egui::Window::new("Settings")
        .open(&mut window_open)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .collapsible(false)
        .resizable(false)
        .movable(false)
        .default_width(560.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut hud_state.settings_tab, SettingsTab::Graphics, "Graphics");
                ui.selectable_value(&mut hud_state.settings_tab, SettingsTab::Audio, "Sound");
                ui.selectable_value(&mut hud_state.settings_tab, SettingsTab::Voice, "Voice");
                ui.selectable_value(&mut hud_state.settings_tab, SettingsTab::Backend, "Server");
            });

            ui.separator();

            match hud_state.settings_tab {
                SettingsTab::Graphics => draw_graphics_settings_tab(ui, &mut hud_state.draft),
                SettingsTab::Audio => {
                    ui.checkbox(&mut hud_state.draft.audio.effects_enabled, "Sound effects");
                }
                SettingsTab::Voice => draw_voice_settings_tab(ui, &mut hud_state.draft),
                SettingsTab::Backend => draw_backend_settings_tab(ui, &mut hud_state.draft),
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    should_apply = ui.button("Apply").clicked();
                    should_close = ui.button("Close").clicked();
                });
            });
        });

    if should_apply {
        settings_resource.current = hud_state.draft.clone();
        settings_resource.persist();
    }

    if should_close {
        window_open = false;
    }

    hud_state.settings_open = window_open;

    if was_open && !hud_state.settings_open {
        hud_state.draft = settings_resource.current.clone();
    }
}

fn draw_graphics_settings_tab(ui: &mut egui::Ui, draft: &mut GameSettings) {
    egui::ComboBox::from_label("Window mode")
        .selected_text(draft.graphics.window_mode.label())
        .show_ui(ui, |ui| {
            for option in WindowModeSetting::ALL {
                ui.selectable_value(&mut draft.graphics.window_mode, option, option.label());
            }
        });

    egui::ComboBox::from_label("Resolution")
        .selected_text(draft.graphics.resolution.label())
        .show_ui(ui, |ui| {
            for option in ResolutionSetting::presets() {
                ui.selectable_value(&mut draft.graphics.resolution, *option, option.label());
            }
        });

    egui::ComboBox::from_label("FPS limit")
        .selected_text(draft.graphics.fps_limit.label())
        .show_ui(ui, |ui| {
            for option in FpsLimitSetting::ALL {
                ui.selectable_value(&mut draft.graphics.fps_limit, option, option.label());
            }
        });

    ui.checkbox(&mut draft.graphics.vsync, "VSync");
    ui.checkbox(&mut draft.graphics.shadows, "Shadows");
    ui.checkbox(&mut draft.graphics.enable_3d, "3D balloon buddy (restart required)");
}

fn draw_voice_settings_tab(ui: &mut egui::Ui, draft: &mut GameSettings) {
    egui::ComboBox::from_label("Voice input (restart required)")
        .selected_text(draft.voice.input.label())
        .show_ui(ui, |ui| {
            for option in VoiceInputSetting::ALL {
                ui.selectable_value(&mut draft.voice.input, option, option.label());
            }
        });
    ui.add(
        egui::Slider::new(&mut draft.voice.words_per_minute, 80..=260).text("Narration speed (wpm)"),
    );
}

fn draw_backend_settings_tab(ui: &mut egui::Ui, draft: &mut GameSettings) {
    ui.label("Game server (restart required)");
    ui.add(egui::TextEdit::singleline(&mut draft.backend.base_url).desired_width(360.0));
    ui.add(
        egui::Slider::new(&mut draft.backend.timeout_ms, 1_000..=60_000).text("Timeout (ms)"),
    );
}
