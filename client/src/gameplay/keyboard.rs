use bevy::prelude::*;

use crate::gameplay::intent::PlayerIntent;
use crate::ui::UiInputCapture;

pub fn letter_for_key(key: KeyCode) -> Option<char> {
    let letter = match key {
        KeyCode::KeyA => 'A',
        KeyCode::KeyB => 'B',
        KeyCode::KeyC => 'C',
        KeyCode::KeyD => 'D',
        KeyCode::KeyE => 'E',
        KeyCode::KeyF => 'F',
        KeyCode::KeyG => 'G',
        KeyCode::KeyH => 'H',
        KeyCode::KeyI => 'I',
        KeyCode::KeyJ => 'J',
        KeyCode::KeyK => 'K',
        KeyCode::KeyL => 'L',
        KeyCode::KeyM => 'M',
        KeyCode::KeyN => 'N',
        KeyCode::KeyO => 'O',
        KeyCode::KeyP => 'P',
        KeyCode::KeyQ => 'Q',
        KeyCode::KeyR => 'R',
        KeyCode::KeyS => 'S',
        KeyCode::KeyT => 'T',
        KeyCode::KeyU => 'U',
        KeyCode::KeyV => 'V',
        KeyCode::KeyW => 'W',
        KeyCode::KeyX => 'X',
        KeyCode::KeyY => 'Y',
        KeyCode::KeyZ => 'Z',
        KeyCode::Space => ' ',
        _ => return None,
    };
    Some(letter)
}

/// Physical keys A-Z and Space guess, unless a text field has focus.
pub fn physical_keyboard_guesses(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    capture: Res<UiInputCapture>,
    mut intents: MessageWriter<PlayerIntent>,
) {
    let Some(keys) = keys else {
        return;
    };
    if capture.keyboard {
        return;
    }
    for key in keys.get_just_pressed() {
        if let Some(intent) = letter_for_key(*key).and_then(PlayerIntent::guess) {
            intents.write(intent);
        }
    }
}
