//! Short-lived HUD messages: the blocking alert, toasts, the win banner and
//! the "Heard:" voice echo.

use bevy::prelude::*;
use rand::seq::SliceRandom;

pub const TOAST_SECS: f32 = 1.5;
pub const HEARD_SECS: f32 = 2.0;
pub const BANNER_SECS: f32 = 3.0;

pub const ENCOURAGING_MESSAGES: [&str; 10] = [
    "Great job! 🌟",
    "You're amazing! ✨",
    "Super smart! 🧠",
    "Fantastic! 🎉",
    "Way to go! 🚀",
    "Brilliant! 💫",
    "You rock! 🎸",
    "Awesome! 🌈",
    "Keep it up! 💪",
    "Wonderful! 🦋",
];

pub const WIN_MESSAGES: [&str; 5] = [
    "YOU WON! 🎉",
    "AMAZING! 🏆",
    "CHAMPION! 👑",
    "SUPERSTAR! ⭐",
    "GENIUS! 🧠",
];

#[derive(Debug, Clone, PartialEq)]
pub struct TimedText {
    pub text: String,
    pub expires_at: f32,
}

impl TimedText {
    pub fn new(text: impl Into<String>, now: f32, secs: f32) -> Self {
        Self {
            text: text.into(),
            expires_at: now + secs,
        }
    }

    pub fn is_live(&self, now: f32) -> bool {
        now < self.expires_at
    }
}

#[derive(Resource, Debug, Default)]
pub struct HudFeedback {
    /// Modal alert; stays until dismissed.
    pub alert: Option<String>,
    pub toast: Option<TimedText>,
    pub banner: Option<TimedText>,
    pub heard: Option<TimedText>,
}

impl HudFeedback {
    pub fn raise_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Alert: {}", message);
        self.alert = Some(message);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn show_toast(&mut self, text: impl Into<String>, now: f32) {
        self.toast = Some(TimedText::new(text, now, TOAST_SECS));
    }

    pub fn show_heard(&mut self, transcript: &str, now: f32) {
        self.heard = Some(TimedText::new(
            format!("🎤 Heard: \"{}\"", transcript.trim()),
            now,
            HEARD_SECS,
        ));
    }

    pub fn show_random_win_banner(&mut self, now: f32) {
        let text = WIN_MESSAGES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(WIN_MESSAGES[0]);
        self.banner = Some(TimedText::new(text, now, BANNER_SECS));
    }

    pub fn show_random_encouragement(&mut self, now: f32) {
        let text = ENCOURAGING_MESSAGES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(ENCOURAGING_MESSAGES[0]);
        self.show_toast(text, now);
    }

    /// Drops every timed message that has run out.
    pub fn expire(&mut self, now: f32) {
        for slot in [&mut self.toast, &mut self.banner, &mut self.heard] {
            if slot.as_ref().is_some_and(|timed| !timed.is_live(now)) {
                *slot = None;
            }
        }
    }
}

pub fn expire_hud_feedback(time: Res<Time>, mut feedback: ResMut<HudFeedback>) {
    feedback.expire(time.elapsed_secs());
}
