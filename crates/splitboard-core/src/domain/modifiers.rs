//! Sticky-modifier and toggle-lock state machine.
//!
//! Each modifier family (Shift, Control, Alt, Super) is a two-state machine
//! shared by its left and right keys.  Each lock (Caps, Num, Scroll) is an
//! independent latch.  The machine decides which key strokes to inject but
//! never performs the injection itself; callers deliver the returned
//! [`Transition::strokes`] in order.
//!
//! | Class          | Press                             | Release                    |
//! |----------------|-----------------------------------|----------------------------|
//! | Normal/Special | press                             | release                    |
//! | Sticky         | Released→Held + press; Held: none | →Released + release        |
//! | Toggle         | flip latch + press + release      | none                       |

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::key::{KeyClass, KeyDefinition};
use crate::injection::KeyStroke;
use crate::keymap::{vk, KeyCode};

/// Held state of one sticky-modifier family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickyState {
    #[default]
    Released,
    Held,
}

/// Latched state of one toggle lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatchState {
    #[default]
    Off,
    On,
}

impl LatchState {
    pub fn from_bool(on: bool) -> Self {
        if on {
            LatchState::On
        } else {
            LatchState::Off
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            LatchState::Off => LatchState::On,
            LatchState::On => LatchState::Off,
        }
    }

    pub fn is_on(self) -> bool {
        self == LatchState::On
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierFamily {
    Shift,
    Control,
    Alt,
    Super,
}

impl ModifierFamily {
    pub const ALL: [ModifierFamily; 4] = [
        ModifierFamily::Shift,
        ModifierFamily::Control,
        ModifierFamily::Alt,
        ModifierFamily::Super,
    ];

    /// Family of a generic or sided modifier VK code.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            vk::SHIFT | vk::LSHIFT | vk::RSHIFT => Some(Self::Shift),
            vk::CONTROL | vk::LCONTROL | vk::RCONTROL => Some(Self::Control),
            vk::MENU | vk::LMENU | vk::RMENU => Some(Self::Alt),
            vk::LWIN | vk::RWIN => Some(Self::Super),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleKind {
    CapsLock,
    NumLock,
    ScrollLock,
}

impl ToggleKind {
    pub const ALL: [ToggleKind; 3] = [ToggleKind::CapsLock, ToggleKind::NumLock, ToggleKind::ScrollLock];

    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            vk::CAPITAL => Some(Self::CapsLock),
            vk::NUMLOCK => Some(Self::NumLock),
            vk::SCROLL => Some(Self::ScrollLock),
            _ => None,
        }
    }

    /// VK code used to query the OS for this lock.
    pub fn key_code(self) -> KeyCode {
        match self {
            Self::CapsLock => vk::CAPITAL,
            Self::NumLock => vk::NUMLOCK,
            Self::ScrollLock => vk::SCROLL,
        }
    }
}

/// Lock states used to seed a fresh [`ModifierState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToggleSnapshot {
    pub caps_lock: bool,
    pub num_lock: bool,
    pub scroll_lock: bool,
}

impl ToggleSnapshot {
    pub fn get(&self, kind: ToggleKind) -> bool {
        match kind {
            ToggleKind::CapsLock => self.caps_lock,
            ToggleKind::NumLock => self.num_lock,
            ToggleKind::ScrollLock => self.scroll_lock,
        }
    }
}

/// What one press or release asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Strokes to inject, in order.
    pub strokes: Vec<KeyStroke>,
    /// `true` when a modifier or lock changed state.
    pub state_changed: bool,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    fn inject(strokes: Vec<KeyStroke>, state_changed: bool) -> Self {
        Self {
            strokes,
            state_changed,
        }
    }
}

/// Modifier and lock state of one on-screen keyboard.
///
/// Sticky states reflect only holds made through the on-screen keyboard;
/// the physical keyboard is never polled after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierState {
    shift: StickyState,
    control: StickyState,
    alt: StickyState,
    super_key: StickyState,
    caps_lock: LatchState,
    num_lock: LatchState,
    scroll_lock: LatchState,
}

impl ModifierState {
    /// All modifiers released, locks seeded from `toggles`.
    pub fn new(toggles: ToggleSnapshot) -> Self {
        Self {
            caps_lock: LatchState::from_bool(toggles.caps_lock),
            num_lock: LatchState::from_bool(toggles.num_lock),
            scroll_lock: LatchState::from_bool(toggles.scroll_lock),
            ..Self::default()
        }
    }

    pub fn sticky(&self, family: ModifierFamily) -> StickyState {
        match family {
            ModifierFamily::Shift => self.shift,
            ModifierFamily::Control => self.control,
            ModifierFamily::Alt => self.alt,
            ModifierFamily::Super => self.super_key,
        }
    }

    fn sticky_mut(&mut self, family: ModifierFamily) -> &mut StickyState {
        match family {
            ModifierFamily::Shift => &mut self.shift,
            ModifierFamily::Control => &mut self.control,
            ModifierFamily::Alt => &mut self.alt,
            ModifierFamily::Super => &mut self.super_key,
        }
    }

    pub fn latch(&self, kind: ToggleKind) -> LatchState {
        match kind {
            ToggleKind::CapsLock => self.caps_lock,
            ToggleKind::NumLock => self.num_lock,
            ToggleKind::ScrollLock => self.scroll_lock,
        }
    }

    fn latch_mut(&mut self, kind: ToggleKind) -> &mut LatchState {
        match kind {
            ToggleKind::CapsLock => &mut self.caps_lock,
            ToggleKind::NumLock => &mut self.num_lock,
            ToggleKind::ScrollLock => &mut self.scroll_lock,
        }
    }

    pub fn is_held(&self, family: ModifierFamily) -> bool {
        self.sticky(family) == StickyState::Held
    }

    pub fn is_latched(&self, kind: ToggleKind) -> bool {
        self.latch(kind).is_on()
    }

    /// Current lock states.
    pub fn toggles(&self) -> ToggleSnapshot {
        ToggleSnapshot {
            caps_lock: self.caps_lock.is_on(),
            num_lock: self.num_lock.is_on(),
            scroll_lock: self.scroll_lock.is_on(),
        }
    }

    /// Shift held XOR Caps-Lock on.  Drives letter labels only.
    pub fn effective_shift(&self) -> bool {
        self.is_held(ModifierFamily::Shift) ^ self.is_latched(ToggleKind::CapsLock)
    }

    /// Text the key should currently show.
    ///
    /// Letters follow [`effective_shift`](Self::effective_shift); every other
    /// key with a shifted variant follows Shift alone.
    pub fn display_label<'k>(&self, key: &'k KeyDefinition) -> &'k str {
        if key.shifted_label.is_empty() {
            return &key.label;
        }
        let shifted = if key.is_letter() {
            self.effective_shift()
        } else {
            self.is_held(ModifierFamily::Shift)
        };
        if shifted {
            &key.shifted_label
        } else {
            &key.label
        }
    }

    /// Applies an on-screen press.
    pub fn on_press(&mut self, key: &KeyDefinition) -> Transition {
        if !key.is_interactive() {
            return Transition::none();
        }

        match key.class {
            KeyClass::Normal | KeyClass::Special => {
                Transition::inject(vec![KeyStroke::press(key)], false)
            }
            KeyClass::StickyModifier => match ModifierFamily::from_key_code(key.key_code) {
                Some(family) => {
                    let state = self.sticky_mut(family);
                    match *state {
                        StickyState::Released => {
                            *state = StickyState::Held;
                            debug!(?family, "modifier held");
                            Transition::inject(vec![KeyStroke::press(key)], true)
                        }
                        StickyState::Held => {
                            debug!(?family, "modifier already held; press ignored");
                            Transition::none()
                        }
                    }
                }
                None => {
                    warn!(
                        "sticky key '{}' (VK 0x{:02X}) has no modifier family; injecting without state",
                        key.label, key.key_code
                    );
                    Transition::inject(vec![KeyStroke::press(key)], false)
                }
            },
            KeyClass::ToggleModifier => {
                let strokes = vec![KeyStroke::press(key), KeyStroke::release(key)];
                match ToggleKind::from_key_code(key.key_code) {
                    Some(kind) => {
                        let latch = self.latch_mut(kind);
                        *latch = latch.flipped();
                        debug!(?kind, on = latch.is_on(), "lock toggled");
                        Transition::inject(strokes, true)
                    }
                    None => {
                        warn!(
                            "toggle key '{}' (VK 0x{:02X}) has no lock; injecting without state",
                            key.label, key.key_code
                        );
                        Transition::inject(strokes, false)
                    }
                }
            }
        }
    }

    /// Applies an on-screen release.
    pub fn on_release(&mut self, key: &KeyDefinition) -> Transition {
        if !key.is_interactive() {
            return Transition::none();
        }

        match key.class {
            KeyClass::Normal | KeyClass::Special => {
                Transition::inject(vec![KeyStroke::release(key)], false)
            }
            KeyClass::StickyModifier => {
                let changed = match ModifierFamily::from_key_code(key.key_code) {
                    Some(family) => {
                        let state = self.sticky_mut(family);
                        let was_held = *state == StickyState::Held;
                        *state = StickyState::Released;
                        if was_held {
                            debug!(?family, "modifier released");
                        }
                        was_held
                    }
                    None => false,
                };
                // Always sent, whichever side was pressed.
                Transition::inject(vec![KeyStroke::release(key)], changed)
            }
            KeyClass::ToggleModifier => Transition::none(),
        }
    }
}
