//! A single physical key on the on-screen keyboard.

use serde::{Deserialize, Serialize};

use crate::keymap::{vk, KeyCode, ScanCode};

/// Behavioural class of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyClass {
    /// Printable character key (letters, digits, punctuation).
    Normal,
    /// Shift / Control / Alt / Super: held while its button is down.
    StickyModifier,
    /// Caps-Lock / Num-Lock / Scroll-Lock: flips on every press.
    ToggleModifier,
    /// Function, editing and navigation keys.
    Special,
}

/// Where the layout author wants a key placed.
///
/// `Auto` asks the normaliser to put the key at the running column of the
/// row it is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Auto,
    At { row: u16, column: u16 },
}

/// One key as authored, before normalisation.
///
/// Built with [`KeyDecl::new`] and the chained setters, then turned into a
/// [`KeyDefinition`] by [`crate::domain::layout::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDecl {
    pub label: String,
    pub shifted_label: String,
    pub key_code: KeyCode,
    pub scan_code: ScanCode,
    pub class: KeyClass,
    pub placement: Placement,
    pub column_span: u16,
    pub is_extended: bool,
}

impl KeyDecl {
    /// A `Normal` key with an auto-assigned, one-column slot.
    pub fn new(label: &str, shifted_label: &str, key_code: KeyCode) -> Self {
        Self {
            label: label.to_string(),
            shifted_label: shifted_label.to_string(),
            key_code,
            scan_code: 0,
            class: KeyClass::Normal,
            placement: Placement::Auto,
            column_span: 1,
            is_extended: false,
        }
    }

    /// A key with no shifted variant.
    pub fn plain(label: &str, key_code: KeyCode, class: KeyClass) -> Self {
        Self::new(label, "", key_code).class(class)
    }

    /// A pure spacer: no code, no label.
    pub fn spacer(column_span: u16) -> Self {
        Self::plain("", 0, KeyClass::Special).span(column_span)
    }

    pub fn class(mut self, class: KeyClass) -> Self {
        self.class = class;
        self
    }

    pub fn at(mut self, row: u16, column: u16) -> Self {
        self.placement = Placement::At { row, column };
        self
    }

    pub fn span(mut self, column_span: u16) -> Self {
        self.column_span = column_span;
        self
    }

    pub fn extended(mut self) -> Self {
        self.is_extended = true;
        self
    }

    pub fn scan_code(mut self, scan_code: ScanCode) -> Self {
        self.scan_code = scan_code;
        self
    }
}

/// A fully placed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDefinition {
    /// Default display text (may be empty for spacers).
    pub label: String,
    /// Display text under effective shift; empty means "no variant".
    pub shifted_label: String,
    /// VK code; `0` marks a spacer or placeholder slot.
    pub key_code: KeyCode,
    /// Hardware scan code; `0` means unresolved.
    pub scan_code: ScanCode,
    pub class: KeyClass,
    /// Zero-based grid row.
    pub row: u16,
    /// Zero-based grid column.
    pub column: u16,
    /// Number of grid columns occupied (≥ 1).
    pub column_span: u16,
    /// Must carry the extended-key flag when injected.
    pub is_extended: bool,
}

impl KeyDefinition {
    /// `true` for a slot that only pads the grid (no code, no label).
    pub fn is_spacer(&self) -> bool {
        self.key_code == 0 && self.label.is_empty()
    }

    /// `true` for a labelled slot that has no injection behaviour.
    pub fn is_placeholder(&self) -> bool {
        self.key_code == 0 && !self.label.is_empty()
    }

    /// `true` when pressing the key should reach the injection engine.
    pub fn is_interactive(&self) -> bool {
        self.key_code != 0
    }

    /// `true` for single-letter keys, whose case follows caps-lock.
    pub fn is_letter(&self) -> bool {
        let mut chars = self.label.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    }

    /// Whether the GUI should auto-repeat this key while its button is held.
    pub fn repeats_when_held(&self) -> bool {
        match self.class {
            KeyClass::Normal => true,
            KeyClass::Special => matches!(
                self.key_code,
                vk::BACK | vk::DELETE | vk::SPACE | vk::LEFT | vk::RIGHT | vk::UP | vk::DOWN
            ),
            KeyClass::StickyModifier | KeyClass::ToggleModifier => false,
        }
    }

    /// Column one past the last one this key covers, saturating at
    /// `u16::MAX`.
    pub fn end_column(&self) -> u16 {
        self.column.saturating_add(self.column_span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn define(decl: KeyDecl) -> KeyDefinition {
        KeyDefinition {
            label: decl.label,
            shifted_label: decl.shifted_label,
            key_code: decl.key_code,
            scan_code: decl.scan_code,
            class: decl.class,
            row: 0,
            column: 0,
            column_span: decl.column_span,
            is_extended: decl.is_extended,
        }
    }

    #[test]
    fn test_spacer_is_neither_placeholder_nor_interactive() {
        let key = define(KeyDecl::spacer(3));
        assert!(key.is_spacer());
        assert!(!key.is_placeholder());
        assert!(!key.is_interactive());
        assert_eq!(key.column_span, 3);
    }

    #[test]
    fn test_labelled_zero_code_is_placeholder() {
        let key = define(KeyDecl::plain("Fn", 0, KeyClass::Special));
        assert!(key.is_placeholder());
        assert!(!key.is_spacer());
    }

    #[test]
    fn test_is_letter_only_for_single_alphabetic_labels() {
        assert!(define(KeyDecl::new("q", "Q", vk::ascii(b'Q'))).is_letter());
        assert!(!define(KeyDecl::new("1", "!", vk::ascii(b'1'))).is_letter());
        assert!(!define(KeyDecl::plain("Tab", vk::TAB, KeyClass::Special)).is_letter());
    }

    #[test]
    fn test_repeat_policy_by_class() {
        let letter = define(KeyDecl::new("a", "A", vk::ascii(b'A')));
        let backspace = define(KeyDecl::plain("Backspace", vk::BACK, KeyClass::Special));
        let escape = define(KeyDecl::plain("Esc", vk::ESCAPE, KeyClass::Special));
        let shift = define(KeyDecl::plain("Shift", vk::LSHIFT, KeyClass::StickyModifier));
        let caps = define(KeyDecl::plain("Caps", vk::CAPITAL, KeyClass::ToggleModifier));

        assert!(letter.repeats_when_held());
        assert!(backspace.repeats_when_held());
        assert!(!escape.repeats_when_held());
        assert!(!shift.repeats_when_held());
        assert!(!caps.repeats_when_held());
    }

    #[test]
    fn test_builder_sets_manual_placement_and_flags() {
        let decl = KeyDecl::plain("Ctrl", vk::RCONTROL, KeyClass::StickyModifier)
            .at(5, 14)
            .span(2)
            .extended();
        assert_eq!(decl.placement, Placement::At { row: 5, column: 14 });
        assert_eq!(decl.column_span, 2);
        assert!(decl.is_extended);
    }

    #[test]
    fn test_end_column_saturates_instead_of_wrapping() {
        let mut key = define(KeyDecl::new("a", "A", vk::ascii(b'A')).span(40_000));
        key.column = 40_000;
        assert_eq!(key.end_column(), u16::MAX);

        key.column = 3;
        assert_eq!(key.end_column(), 40_003);
    }
}
