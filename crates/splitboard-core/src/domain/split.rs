//! Splits a full layout into left and right halves.
//!
//! Assignment is table driven: the natural split point differs per row, so
//! each interactive key code is listed in exactly one membership table.  The
//! space bar is the one key shared by both halves; it is cut in two, with the
//! left portion taking the larger share of an odd span.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::key::KeyDefinition;
use super::layout::Layout;
use crate::keymap::{vk, KeyCode};

/// Placeholders and unlisted keys left of this column go to the left half.
pub const FALLBACK_SPLIT_COLUMN: u16 = 8;

/// Label carried by both halves of the split space bar.
pub const SPACE_LABEL: &str = "Space";

const LEFT_HALF: &[KeyCode] = &[
    vk::ESCAPE,
    vk::F1,
    vk::F2,
    vk::F3,
    vk::F4,
    vk::F5,
    vk::OEM_3,
    vk::ascii(b'1'),
    vk::ascii(b'2'),
    vk::ascii(b'3'),
    vk::ascii(b'4'),
    vk::ascii(b'5'),
    vk::TAB,
    vk::ascii(b'Q'),
    vk::ascii(b'W'),
    vk::ascii(b'E'),
    vk::ascii(b'R'),
    vk::ascii(b'T'),
    vk::CAPITAL,
    vk::ascii(b'A'),
    vk::ascii(b'S'),
    vk::ascii(b'D'),
    vk::ascii(b'F'),
    vk::ascii(b'G'),
    vk::LSHIFT,
    vk::ascii(b'Z'),
    vk::ascii(b'X'),
    vk::ascii(b'C'),
    vk::ascii(b'V'),
    vk::ascii(b'B'),
    vk::LCONTROL,
    vk::LWIN,
    vk::LMENU,
];

const RIGHT_HALF: &[KeyCode] = &[
    vk::F6,
    vk::F7,
    vk::F8,
    vk::F9,
    vk::F10,
    vk::F11,
    vk::F12,
    vk::SNAPSHOT,
    vk::SCROLL,
    vk::PAUSE,
    vk::ascii(b'6'),
    vk::ascii(b'7'),
    vk::ascii(b'8'),
    vk::ascii(b'9'),
    vk::ascii(b'0'),
    vk::OEM_MINUS,
    vk::OEM_PLUS,
    vk::BACK,
    vk::ascii(b'Y'),
    vk::ascii(b'U'),
    vk::ascii(b'I'),
    vk::ascii(b'O'),
    vk::ascii(b'P'),
    vk::OEM_4,
    vk::OEM_6,
    vk::OEM_5,
    vk::ascii(b'H'),
    vk::ascii(b'J'),
    vk::ascii(b'K'),
    vk::ascii(b'L'),
    vk::OEM_1,
    vk::OEM_7,
    vk::RETURN,
    vk::ascii(b'N'),
    vk::ascii(b'M'),
    vk::OEM_COMMA,
    vk::OEM_PERIOD,
    vk::OEM_2,
    vk::RSHIFT,
    vk::RMENU,
    vk::RWIN,
    vk::APPS,
    vk::RCONTROL,
    vk::INSERT,
    vk::DELETE,
    vk::HOME,
    vk::END,
    vk::PRIOR,
    vk::NEXT,
    vk::UP,
    vk::DOWN,
    vk::LEFT,
    vk::RIGHT,
];

/// One side of the split keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Left,
    Right,
}

impl Half {
    /// Membership-table lookup; `None` for codes listed in neither table.
    pub fn for_key_code(code: KeyCode) -> Option<Half> {
        if LEFT_HALF.contains(&code) {
            Some(Half::Left)
        } else if RIGHT_HALF.contains(&code) {
            Some(Half::Right)
        } else {
            None
        }
    }

    fn by_column(column: u16) -> Half {
        if column < FALLBACK_SPLIT_COLUMN {
            Half::Left
        } else {
            Half::Right
        }
    }
}

/// A key code the membership tables do not cover.
///
/// Not an error: the key is still placed by column, and the gap is reported
/// so tests and the CLI can surface it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationGap {
    pub key_code: KeyCode,
    pub label: String,
    pub row: u16,
    pub column: u16,
    /// Where the column fallback put the key.
    pub assigned_to: Half,
}

/// Output of [`split_layout`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitLayout {
    pub left: Layout,
    pub right: Layout,
    pub gaps: Vec<ConfigurationGap>,
}

impl SplitLayout {
    pub fn half(&self, half: Half) -> &Layout {
        match half {
            Half::Left => &self.left,
            Half::Right => &self.right,
        }
    }
}

/// Spans of the two space-bar portions: the left one is `ceil(span / 2)`.
pub fn space_spans(column_span: u16) -> (u16, u16) {
    let left = column_span.div_ceil(2);
    (left, column_span - left)
}

/// Partitions `full` into two halves with columns renumbered from 0.
///
/// Pure spacers are dropped; every other key lands in exactly one half,
/// except the space bar which contributes to both.  Rows left empty on one
/// side are omitted from that side.
pub fn split_layout(full: &Layout) -> SplitLayout {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut gaps = Vec::new();

    for row in full.rows() {
        let mut left_row: Vec<KeyDefinition> = Vec::new();
        let mut right_row: Vec<KeyDefinition> = Vec::new();

        for key in row {
            if key.is_spacer() {
                continue;
            }

            if key.key_code == vk::SPACE {
                let (left_span, right_span) = space_spans(key.column_span);
                left_row.push(space_portion(key, key.column, left_span));
                // A one-column space bar has nothing left over for the right.
                if right_span > 0 {
                    right_row.push(space_portion(key, key.column + left_span, right_span));
                }
                continue;
            }

            let half = if key.is_placeholder() {
                Half::by_column(key.column)
            } else if let Some(half) = Half::for_key_code(key.key_code) {
                half
            } else {
                let assigned_to = Half::by_column(key.column);
                warn!(
                    "key '{}' (VK 0x{:02X}) at ({}, {}) is in neither half table; assigning {:?} by column",
                    key.label, key.key_code, key.row, key.column, assigned_to
                );
                gaps.push(ConfigurationGap {
                    key_code: key.key_code,
                    label: key.label.clone(),
                    row: key.row,
                    column: key.column,
                    assigned_to,
                });
                assigned_to
            };

            match half {
                Half::Left => left_row.push(key.clone()),
                Half::Right => right_row.push(key.clone()),
            }
        }

        renumber_columns(&mut left_row);
        renumber_columns(&mut right_row);

        if !left_row.is_empty() {
            left.push(left_row);
        }
        if !right_row.is_empty() {
            right.push(right_row);
        }
    }

    SplitLayout {
        left: Layout::from_rows(left),
        right: Layout::from_rows(right),
        gaps,
    }
}

fn space_portion(key: &KeyDefinition, column: u16, column_span: u16) -> KeyDefinition {
    KeyDefinition {
        label: SPACE_LABEL.to_string(),
        column,
        column_span,
        ..key.clone()
    }
}

fn renumber_columns(row: &mut [KeyDefinition]) {
    let mut running = 0;
    for key in row.iter_mut() {
        key.column = running;
        running += key.column_span;
    }
}
