//! TypeChordUseCase: plays a `Mod+Mod+Key` chord through a session.
//!
//! Modifiers are pressed in order, the final key is tapped, then the
//! modifiers are released in reverse.  Everything goes through the session's
//! state machine, so a chord behaves exactly like the same button sequence
//! on screen.

use splitboard_core::{vk, KeyDefinition, ModifierFamily};
use thiserror::Error;

use super::keyboard_session::{KeyOutcome, KeyboardSession};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChordError {
    #[error("empty chord")]
    Empty,

    #[error("no key named '{0}'")]
    UnknownKey(String),
}

/// A chord resolved against a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub modifiers: Vec<KeyDefinition>,
    pub key: KeyDefinition,
}

impl Chord {
    /// Resolves `text` such as `Ctrl+Shift+t` or `Enter`.
    ///
    /// A lone `+` names the plus key; `Ctrl++` is Ctrl with plus.  A final
    /// name that only matches a shifted label (`!`, `+`, `{`) resolves to its
    /// key with left Shift added to the modifiers, unless the chord already
    /// holds a Shift.
    ///
    /// # Errors
    ///
    /// [`ChordError::Empty`] for blank input, [`ChordError::UnknownKey`] for
    /// a name that matches no key label.
    pub fn parse(session: &KeyboardSession, text: &str) -> Result<Self, ChordError> {
        let mut names = split_chord(text.trim());
        let last = names.pop().ok_or(ChordError::Empty)?;

        let resolve = |name: &str| {
            session
                .find_key(name)
                .cloned()
                .ok_or_else(|| ChordError::UnknownKey(name.to_string()))
        };

        let mut modifiers = names
            .into_iter()
            .map(&resolve)
            .collect::<Result<Vec<_>, ChordError>>()?;

        let key = match session.find_key(last) {
            Some(key) => key.clone(),
            None => {
                let key = session
                    .find_shifted_key(last)
                    .cloned()
                    .ok_or_else(|| ChordError::UnknownKey(last.to_string()))?;
                let has_shift = modifiers
                    .iter()
                    .any(|m| ModifierFamily::from_key_code(m.key_code) == Some(ModifierFamily::Shift));
                if !has_shift {
                    let shift = session
                        .key_for_code(vk::LSHIFT)
                        .cloned()
                        .ok_or_else(|| ChordError::UnknownKey("Shift".to_string()))?;
                    modifiers.push(shift);
                }
                key
            }
        };

        Ok(Chord { modifiers, key })
    }
}

fn split_chord(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    if let Some(head) = text.strip_suffix("++") {
        let mut names: Vec<&str> = if head.is_empty() {
            Vec::new()
        } else {
            head.split('+').map(str::trim).collect()
        };
        names.push("+");
        return names;
    }
    if text == "+" {
        return vec!["+"];
    }
    text.split('+').map(str::trim).collect()
}

/// Presses the modifiers, taps the key, releases the modifiers in reverse.
pub fn type_chord(session: &mut KeyboardSession, chord: &Chord) -> KeyOutcome {
    let mut outcome = KeyOutcome::default();
    for modifier in &chord.modifiers {
        outcome.merge(session.on_key_pressed(modifier));
    }
    outcome.merge(session.on_key_pressed(&chord.key));
    outcome.merge(session.on_key_released(&chord.key));
    for modifier in chord.modifiers.iter().rev() {
        outcome.merge(session.on_key_released(modifier));
    }
    outcome
}
