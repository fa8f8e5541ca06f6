//! What each button should look like for a given [`ModifierState`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::key::{KeyClass, KeyDefinition};
use super::modifiers::{ModifierFamily, ModifierState, ToggleKind};
use crate::keymap::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    None,
    /// A sticky modifier of this key's family is held.
    ModifierActive,
    /// This key's lock is latched on.
    ToggleActive,
}

/// Per-key label and highlight, keyed by VK code.
///
/// Both halves of the split space bar share one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualState {
    pub labels: BTreeMap<KeyCode, String>,
    pub highlights: BTreeMap<KeyCode, Highlight>,
}

impl VisualState {
    pub fn label(&self, code: KeyCode) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    pub fn highlight(&self, code: KeyCode) -> Highlight {
        self.highlights.get(&code).copied().unwrap_or_default()
    }
}

/// Highlight for one key under `state`.
pub fn highlight_for(state: &ModifierState, key: &KeyDefinition) -> Highlight {
    match key.class {
        KeyClass::StickyModifier => match ModifierFamily::from_key_code(key.key_code) {
            Some(family) if state.is_held(family) => Highlight::ModifierActive,
            _ => Highlight::None,
        },
        KeyClass::ToggleModifier => match ToggleKind::from_key_code(key.key_code) {
            Some(kind) if state.is_latched(kind) => Highlight::ToggleActive,
            _ => Highlight::None,
        },
        KeyClass::Normal | KeyClass::Special => Highlight::None,
    }
}

/// Computes labels and highlights for every interactive key in `keys`.
pub fn visual_state<'a>(
    state: &ModifierState,
    keys: impl IntoIterator<Item = &'a KeyDefinition>,
) -> VisualState {
    let mut visuals = VisualState::default();
    for key in keys.into_iter().filter(|k| k.is_interactive()) {
        visuals
            .labels
            .insert(key.key_code, state.display_label(key).to_string());
        visuals
            .highlights
            .insert(key.key_code, highlight_for(state, key));
    }
    visuals
}
