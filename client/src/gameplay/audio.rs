//! Synthesized sound cues. Each cue is a short sequence of sine tones.

use bevy::audio::Pitch;
use bevy::prelude::*;
use std::time::Duration;

use crate::gameplay::intent::PlayerIntent;
use crate::settings::{AudioCategoryState, SettingsResource};

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Correct,
    Wrong,
    Win,
    Lose,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f32,
    pub offset_secs: f32,
    pub duration_secs: f32,
}

const fn note(frequency: f32, offset_secs: f32, duration_secs: f32) -> Note {
    Note {
        frequency,
        offset_secs,
        duration_secs,
    }
}

const CORRECT_NOTES: [Note; 2] = [note(523.25, 0.0, 0.1), note(659.25, 0.1, 0.2)];
const WRONG_NOTES: [Note; 1] = [note(150.0, 0.0, 0.2)];
const WIN_NOTES: [Note; 4] = [
    note(523.25, 0.0, 0.3),
    note(659.25, 0.15, 0.3),
    note(783.99, 0.3, 0.3),
    note(1046.5, 0.45, 0.3),
];
const LOSE_NOTES: [Note; 3] = [
    note(400.0, 0.0, 0.2),
    note(300.0, 0.2, 0.2),
    note(200.0, 0.4, 0.2),
];
const CLICK_NOTES: [Note; 1] = [note(800.0, 0.0, 0.05)];

impl SoundCue {
    pub fn notes(self) -> &'static [Note] {
        match self {
            Self::Correct => &CORRECT_NOTES,
            Self::Wrong => &WRONG_NOTES,
            Self::Win => &WIN_NOTES,
            Self::Lose => &LOSE_NOTES,
            Self::Click => &CLICK_NOTES,
        }
    }
}

/// Notes waiting for their start time.
#[derive(Resource, Default, Debug)]
pub struct PendingNotes {
    notes: Vec<(f32, Note)>,
}

impl PendingNotes {
    pub fn schedule(&mut self, cue: SoundCue, now: f32) {
        self.notes
            .extend(cue.notes().iter().map(|note| (now + note.offset_secs, *note)));
    }

    /// Removes and returns every note due at `now`.
    pub fn take_due(&mut self, now: f32) -> Vec<Note> {
        let mut due = Vec::new();
        self.notes.retain(|(play_at, note)| {
            if *play_at <= now {
                due.push(*note);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

pub struct SoundCuePlugin;

impl Plugin for SoundCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SoundCue>()
            .add_message::<PlayerIntent>()
            .init_resource::<PendingNotes>()
            .add_systems(
                Update,
                (toggle_sound, schedule_sound_cues, play_due_notes).chain(),
            );
    }
}

fn toggle_sound(
    mut intents: MessageReader<PlayerIntent>,
    mut settings: ResMut<SettingsResource>,
    mut audio_state: ResMut<AudioCategoryState>,
    mut cues: MessageWriter<SoundCue>,
) {
    let toggles = intents
        .read()
        .filter(|intent| matches!(intent, PlayerIntent::ToggleSound))
        .count();
    if toggles % 2 == 0 {
        return;
    }

    let enabled = !settings.current.audio.effects_enabled;
    settings.current.audio.effects_enabled = enabled;
    audio_state.effects_enabled = enabled;
    settings.persist();
    info!("Sound effects {}", if enabled { "on" } else { "off" });
    if enabled {
        cues.write(SoundCue::Click);
    }
}

pub fn schedule_sound_cues(
    time: Res<Time>,
    audio_state: Res<AudioCategoryState>,
    mut cues: MessageReader<SoundCue>,
    mut pending: ResMut<PendingNotes>,
) {
    let now = time.elapsed_secs();
    for cue in cues.read() {
        if audio_state.effects_enabled {
            pending.schedule(*cue, now);
        }
    }
}

fn play_due_notes(
    mut commands: Commands,
    time: Res<Time>,
    mut pending: ResMut<PendingNotes>,
    mut pitches: ResMut<Assets<Pitch>>,
) {
    for note in pending.take_due(time.elapsed_secs()) {
        commands.spawn((
            AudioPlayer(pitches.add(Pitch::new(
                note.frequency,
                Duration::from_secs_f32(note.duration_secs),
            ))),
            PlaybackSettings::DESPAWN,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_fanfare_is_staggered() {
        let offsets: Vec<f32> = SoundCue::Win
            .notes()
            .iter()
            .map(|note| note.offset_secs)
            .collect();
        assert_eq!(offsets, vec![0.0, 0.15, 0.3, 0.45]);
    }

    #[test]
    fn due_notes_leave_the_queue() {
        let mut pending = PendingNotes::default();
        pending.schedule(SoundCue::Lose, 1.0);
        assert_eq!(pending.len(), 3);

        let first = pending.take_due(1.0);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].frequency, 400.0);

        assert_eq!(pending.take_due(1.45).len(), 2);
        assert!(pending.is_empty());
    }
}
