//! Keyboard layout domain entity.
//!
//! A [`Layout`] is an ordered list of rows, each an ordered list of
//! [`KeyDefinition`]s.  Order is meaningful: rows render top to bottom and
//! keys left to right.
//!
//! Layouts are produced in two phases:
//!
//! 1. The author declares rows of [`KeyDecl`]s, giving explicit placement only
//!    where it matters (wide keys) and [`Placement::Auto`] otherwise.
//! 2. [`normalize`] walks every row once, assigns row/column from a running
//!    column counter and resolves missing scan codes.  The result is
//!    immutable.
//!
//! The grid invariant: within a row, the `column` of key *i* equals the sum of
//! the `column_span`s of keys `0..i`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::key::{KeyClass, KeyDecl, KeyDefinition, Placement};
use crate::keymap::{vk, ScanCodeLookup};

/// Violations of the grid invariant found by [`Layout::validate`].
///
/// These are structural problems in layout data and are meant to be caught by
/// tests; normalisation never produces them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A key occupies no columns.
    #[error("key {index} in row {row} has a zero column span")]
    ZeroSpan { row: usize, index: usize },

    /// A key does not start where the previous one ended (overlap or gap).
    #[error("key {index} in row {row} starts at column {found}, expected {expected}")]
    ColumnMismatch {
        row: usize,
        index: usize,
        expected: u16,
        found: u16,
    },

    /// Keys of one row disagree about their grid row.
    #[error("row {row} mixes keys from grid rows {first} and {other}")]
    MixedRow { row: usize, first: u16, other: u16 },

    /// A key extends past the last representable grid column.
    #[error("key {index} in row {row} extends past column {}", u16::MAX)]
    ColumnOverflow { row: usize, index: usize },
}

/// An ordered sequence of key rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    rows: Vec<Vec<KeyDefinition>>,
}

impl Layout {
    /// Wraps already-placed rows without touching them.
    pub fn from_rows(rows: Vec<Vec<KeyDefinition>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<KeyDefinition>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All keys, row by row.
    pub fn keys(&self) -> impl Iterator<Item = &KeyDefinition> {
        self.rows.iter().flatten()
    }

    /// Keys that should become interactive buttons.
    pub fn interactive_keys(&self) -> impl Iterator<Item = &KeyDefinition> {
        self.keys().filter(|k| !k.is_spacer())
    }

    /// Widest row, in grid columns.
    pub fn column_count(&self) -> u16 {
        self.rows
            .iter()
            .filter_map(|row| row.last().map(KeyDefinition::end_column))
            .max()
            .unwrap_or(0)
    }

    /// Checks the grid invariant for every row.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`] found, scanning rows top to bottom.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (row_index, row) in self.rows.iter().enumerate() {
            let mut expected = 0u16;
            let first_row = row.first().map(|k| k.row);
            for (index, key) in row.iter().enumerate() {
                if let Some(first) = first_row {
                    if key.row != first {
                        return Err(LayoutError::MixedRow {
                            row: row_index,
                            first,
                            other: key.row,
                        });
                    }
                }
                if key.column_span == 0 {
                    return Err(LayoutError::ZeroSpan {
                        row: row_index,
                        index,
                    });
                }
                if key.column != expected {
                    return Err(LayoutError::ColumnMismatch {
                        row: row_index,
                        index,
                        expected,
                        found: key.column,
                    });
                }
                expected = expected
                    .checked_add(key.column_span)
                    .ok_or(LayoutError::ColumnOverflow {
                        row: row_index,
                        index,
                    })?;
            }
        }
        Ok(())
    }
}

/// Places every declared key and resolves missing scan codes.
///
/// Row by row, a running column starts at 0.  `Auto` keys land on the running
/// column; manual placements are pulled onto it as well, so hand-written
/// coordinates can never drift from the spans before them.  After a key is
/// placed the running column advances by its span.
pub fn normalize(rows: Vec<Vec<KeyDecl>>, scan_codes: &dyn ScanCodeLookup) -> Layout {
    let mut placed = Vec::with_capacity(rows.len());

    for (row_index, row) in rows.into_iter().enumerate() {
        let row_index = row_index as u16;
        let mut current_column = 0u16;
        let mut keys = Vec::with_capacity(row.len());

        for decl in row {
            let column = match decl.placement {
                Placement::Auto => current_column,
                Placement::At { row, column } => {
                    if row != row_index {
                        warn!(
                            "key '{}' declared in row {row} but listed in row {row_index}; using {row_index}",
                            decl.label
                        );
                    }
                    if column != current_column {
                        debug!(
                            "key '{}' declared at column {column}, placed at {current_column}",
                            decl.label
                        );
                    }
                    current_column
                }
            };

            let scan_code = if decl.scan_code == 0 && decl.key_code != 0 {
                scan_codes
                    .scan_code_for(decl.key_code)
                    .unwrap_or(0)
            } else {
                decl.scan_code
            };

            current_column = match current_column.checked_add(decl.column_span) {
                Some(next) => next,
                None => {
                    warn!(
                        "key '{}' in row {row_index} runs past column {}; clamping",
                        decl.label,
                        u16::MAX
                    );
                    u16::MAX
                }
            };
            keys.push(KeyDefinition {
                label: decl.label,
                shifted_label: decl.shifted_label,
                key_code: decl.key_code,
                scan_code,
                class: decl.class,
                row: row_index,
                column,
                column_span: decl.column_span,
                is_extended: decl.is_extended,
            });
        }
        placed.push(keys);
    }

    Layout::from_rows(placed)
}

/// Builds the canonical seven-row US keyboard.
pub fn build_full_layout(scan_codes: &dyn ScanCodeLookup) -> Layout {
    normalize(full_layout_declarations(), scan_codes)
}

/// The raw declarations behind [`build_full_layout`].
///
/// Rows: function keys, digits, QWERTY, home row, bottom letters,
/// modifiers/space, navigation cluster.
pub fn full_layout_declarations() -> Vec<Vec<KeyDecl>> {
    use KeyClass::{Special, StickyModifier, ToggleModifier};

    let letter = |c: u8| {
        let upper = (c as char).to_string();
        KeyDecl::new(&upper.to_lowercase(), &upper, vk::ascii(c))
    };
    let special = |label: &str, code| KeyDecl::plain(label, code, Special);

    vec![
        // Row 0: function keys
        vec![
            special("Esc", vk::ESCAPE),
            special("F1", vk::F1),
            special("F2", vk::F2),
            special("F3", vk::F3),
            special("F4", vk::F4),
            special("F5", vk::F5),
            special("F6", vk::F6),
            special("F7", vk::F7),
            special("F8", vk::F8),
            special("F9", vk::F9),
            special("F10", vk::F10),
            special("F11", vk::F11),
            special("F12", vk::F12),
            special("PrtSc", vk::SNAPSHOT).at(0, 13).extended(),
            KeyDecl::plain("ScrLk", vk::SCROLL, ToggleModifier).at(0, 14),
            special("Pause", vk::PAUSE).at(0, 15),
        ],
        // Row 1: digits
        vec![
            KeyDecl::new("`", "~", vk::OEM_3),
            KeyDecl::new("1", "!", vk::ascii(b'1')),
            KeyDecl::new("2", "@", vk::ascii(b'2')),
            KeyDecl::new("3", "#", vk::ascii(b'3')),
            KeyDecl::new("4", "$", vk::ascii(b'4')),
            KeyDecl::new("5", "%", vk::ascii(b'5')),
            KeyDecl::new("6", "^", vk::ascii(b'6')),
            KeyDecl::new("7", "&", vk::ascii(b'7')),
            KeyDecl::new("8", "*", vk::ascii(b'8')),
            KeyDecl::new("9", "(", vk::ascii(b'9')),
            KeyDecl::new("0", ")", vk::ascii(b'0')),
            KeyDecl::new("-", "_", vk::OEM_MINUS),
            KeyDecl::new("=", "+", vk::OEM_PLUS),
            special("Backspace", vk::BACK).at(1, 13).span(3),
        ],
        // Row 2: QWERTY
        vec![
            special("Tab", vk::TAB).at(2, 0).span(2),
            letter(b'Q'),
            letter(b'W'),
            letter(b'E'),
            letter(b'R'),
            letter(b'T'),
            letter(b'Y'),
            letter(b'U'),
            letter(b'I'),
            letter(b'O'),
            letter(b'P'),
            KeyDecl::new("[", "{", vk::OEM_4),
            KeyDecl::new("]", "}", vk::OEM_6),
            KeyDecl::new("\\", "|", vk::OEM_5).at(2, 13).span(2),
        ],
        // Row 3: home row
        vec![
            KeyDecl::plain("Caps", vk::CAPITAL, ToggleModifier).at(3, 0).span(2),
            letter(b'A'),
            letter(b'S'),
            letter(b'D'),
            letter(b'F'),
            letter(b'G'),
            letter(b'H'),
            letter(b'J'),
            letter(b'K'),
            letter(b'L'),
            KeyDecl::new(";", ":", vk::OEM_1),
            KeyDecl::new("'", "\"", vk::OEM_7),
            special("Enter", vk::RETURN).at(3, 13).span(3),
        ],
        // Row 4: bottom letters
        vec![
            KeyDecl::plain("Shift", vk::LSHIFT, StickyModifier).at(4, 0).span(3),
            letter(b'Z'),
            letter(b'X'),
            letter(b'C'),
            letter(b'V'),
            letter(b'B'),
            letter(b'N'),
            letter(b'M'),
            KeyDecl::new(",", "<", vk::OEM_COMMA),
            KeyDecl::new(".", ">", vk::OEM_PERIOD),
            KeyDecl::new("/", "?", vk::OEM_2),
            KeyDecl::plain("Shift", vk::RSHIFT, StickyModifier).at(4, 13).span(3),
        ],
        // Row 5: modifiers and space (right-hand modifiers are extended)
        vec![
            KeyDecl::plain("Ctrl", vk::LCONTROL, StickyModifier).at(5, 0).span(2),
            KeyDecl::plain("Win", vk::LWIN, StickyModifier).at(5, 2).extended(),
            KeyDecl::plain("Alt", vk::LMENU, StickyModifier).at(5, 3),
            special("Space", vk::SPACE).at(5, 4).span(7),
            KeyDecl::plain("Alt", vk::RMENU, StickyModifier).at(5, 11).extended(),
            KeyDecl::plain("Win", vk::RWIN, StickyModifier).at(5, 12).extended(),
            special("Menu", vk::APPS).at(5, 13).extended(),
            KeyDecl::plain("Ctrl", vk::RCONTROL, StickyModifier)
                .at(5, 14)
                .span(2)
                .extended(),
        ],
        // Row 6: navigation cluster and arrows (all extended)
        vec![
            special("Ins", vk::INSERT).at(6, 0).extended(),
            special("Del", vk::DELETE).at(6, 1).extended(),
            special("Home", vk::HOME).at(6, 2).extended(),
            special("End", vk::END).at(6, 3).extended(),
            special("PgUp", vk::PRIOR).at(6, 4).extended(),
            special("PgDn", vk::NEXT).at(6, 5).extended(),
            KeyDecl::spacer(3).at(6, 6),
            special("↑", vk::UP).at(6, 9).extended(),
            KeyDecl::spacer(1).at(6, 10),
            special("←", vk::LEFT).at(6, 11).extended(),
            special("↓", vk::DOWN).at(6, 12).extended(),
            special("→", vk::RIGHT).at(6, 13).extended(),
        ],
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
