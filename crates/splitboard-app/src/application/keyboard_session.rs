//! KeyboardSession: the state a single on-screen keyboard owns.
//!
//! The GUI calls [`KeyboardSession::on_key_pressed`] and
//! [`KeyboardSession::on_key_released`] for every button event (auto-repeat
//! ticks included).  The session runs the modifier state machine, delivers
//! the strokes it asks for through the [`InjectKeyUseCase`], and tells the
//! observer when the keyboard should repaint.
//!
//! Everything runs synchronously on the caller's thread.

use splitboard_core::{
    visual_state, InjectionError, KeyCode, KeyDefinition, Layout, ModifierState, SplitLayout,
    ToggleSnapshot, Transition, VisualState,
};
use tracing::debug;

use super::inject_key::InjectKeyUseCase;
use super::prepare_layout::PreparedLayout;

/// Receives fresh visual state after modifier or lock changes.
pub trait VisualObserver {
    fn visuals_changed(&mut self, visuals: &VisualState);
}

/// Result of one press or release.
///
/// Injection failures do not undo the state transition: a sticky modifier
/// still shows as held even if its press never reached the OS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Number of strokes the backend queued.
    pub injected: usize,
    pub failures: Vec<InjectionError>,
    /// Modifier or lock state changed; buttons need repainting.
    pub visuals_changed: bool,
}

impl KeyOutcome {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Folds `other` into `self`, keeping failures in order.
    pub fn merge(&mut self, other: KeyOutcome) {
        self.injected += other.injected;
        self.failures.extend(other.failures);
        self.visuals_changed |= other.visuals_changed;
    }
}

pub struct KeyboardSession {
    layout: PreparedLayout,
    state: ModifierState,
    injector: InjectKeyUseCase,
    observer: Option<Box<dyn VisualObserver>>,
}

impl KeyboardSession {
    /// Creates a session with all modifiers released and locks seeded from
    /// `toggles`.
    pub fn new(layout: PreparedLayout, toggles: ToggleSnapshot, injector: InjectKeyUseCase) -> Self {
        Self {
            layout,
            state: ModifierState::new(toggles),
            injector,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn VisualObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn full_layout(&self) -> &Layout {
        &self.layout.full
    }

    pub fn split_layout(&self) -> &SplitLayout {
        &self.layout.split
    }

    pub fn modifier_state(&self) -> &ModifierState {
        &self.state
    }

    pub fn on_key_pressed(&mut self, key: &KeyDefinition) -> KeyOutcome {
        debug!(label = %key.label, vk = key.key_code, class = ?key.class, "key pressed");
        let transition = self.state.on_press(key);
        self.deliver(transition)
    }

    pub fn on_key_released(&mut self, key: &KeyDefinition) -> KeyOutcome {
        debug!(label = %key.label, vk = key.key_code, class = ?key.class, "key released");
        let transition = self.state.on_release(key);
        self.deliver(transition)
    }

    /// Labels and highlights for every key, as they should look right now.
    pub fn current_visual_state(&self) -> VisualState {
        visual_state(&self.state, self.layout.full.keys())
    }

    /// First key, in layout order, whose label matches `name` ignoring case.
    /// Left-hand modifiers come first.
    pub fn find_key(&self, name: &str) -> Option<&KeyDefinition> {
        self.layout
            .full
            .interactive_keys()
            .find(|k| k.label.eq_ignore_ascii_case(name))
    }

    /// First key whose shifted label is exactly `name`, e.g. `1` for `!`.
    pub fn find_shifted_key(&self, name: &str) -> Option<&KeyDefinition> {
        self.layout
            .full
            .interactive_keys()
            .find(|k| !k.shifted_label.is_empty() && k.shifted_label == name)
    }

    /// First key carrying `code`.
    pub fn key_for_code(&self, code: KeyCode) -> Option<&KeyDefinition> {
        self.layout.full.interactive_keys().find(|k| k.key_code == code)
    }

    fn deliver(&mut self, transition: Transition) -> KeyOutcome {
        let mut outcome = KeyOutcome {
            visuals_changed: transition.state_changed,
            ..KeyOutcome::default()
        };

        for stroke in &transition.strokes {
            match self.injector.inject_stroke(stroke) {
                Ok(()) => outcome.injected += 1,
                Err(e) => outcome.failures.push(e),
            }
        }

        if outcome.visuals_changed {
            let visuals = self.current_visual_state();
            if let Some(observer) = self.observer.as_mut() {
                observer.visuals_changed(&visuals);
            }
        }
        outcome
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
