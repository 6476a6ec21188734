//! Elapsed-seconds game timer.

use bevy::prelude::*;

use crate::gameplay::intent::PlayerIntent;
use crate::settings::SettingsResource;

const TICK_SECS: f32 = 1.0;

/// At most one timer is ever active: `start` discards the previous one and
/// `stop` drops the pending tick.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct GameTimer {
    seconds: u32,
    next_tick_at: Option<f32>,
}

impl GameTimer {
    pub fn start(&mut self, now: f32) {
        self.stop();
        self.seconds = 0;
        self.next_tick_at = Some(now + TICK_SECS);
    }

    pub fn stop(&mut self) {
        self.next_tick_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick_at.is_some()
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Applies every whole-second tick due by `now`.
    pub fn tick(&mut self, now: f32) {
        while let Some(tick_at) = self.next_tick_at {
            if now < tick_at {
                break;
            }
            self.seconds += 1;
            self.next_tick_at = Some(tick_at + TICK_SECS);
        }
    }

    pub fn display(&self) -> String {
        format_clock(self.seconds)
    }
}

/// `m:ss`, minutes unpadded.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn tick_game_timer(time: Res<Time>, mut timer: ResMut<GameTimer>) {
    timer.tick(time.elapsed_secs());
}

pub fn toggle_timer(
    time: Res<Time>,
    mut intents: MessageReader<PlayerIntent>,
    mut settings: ResMut<SettingsResource>,
    mut timer: ResMut<GameTimer>,
) {
    for intent in intents.read() {
        if !matches!(intent, PlayerIntent::ToggleTimer) {
            continue;
        }
        let enabled = !settings.current.gameplay.timer_enabled;
        settings.current.gameplay.timer_enabled = enabled;
        if enabled {
            timer.start(time.elapsed_secs());
        } else {
            timer.stop();
        }
        settings.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_format_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn ticks_once_per_second() {
        let mut timer = GameTimer::default();
        timer.start(10.0);
        timer.tick(10.99);
        assert_eq!(timer.seconds(), 0);
        timer.tick(11.0);
        assert_eq!(timer.seconds(), 1);
        timer.tick(13.5);
        assert_eq!(timer.display(), "0:03");
    }

    #[test]
    fn restart_discards_previous_count() {
        let mut timer = GameTimer::default();
        timer.start(0.0);
        timer.tick(5.0);
        timer.start(5.0);
        assert_eq!(timer.seconds(), 0);
        timer.tick(6.0);
        assert_eq!(timer.seconds(), 1);
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let mut timer = GameTimer::default();
        timer.start(0.0);
        timer.tick(2.0);
        timer.stop();
        timer.tick(100.0);
        assert_eq!(timer.seconds(), 2);
        assert!(!timer.is_running());
    }
}
