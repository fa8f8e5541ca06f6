//! Command bridge between the keyboard session and a front end.
//!
//! A GUI (or the bundled CLI) never touches the session's internals.  It
//! calls the command functions here and receives plain serialisable DTOs:
//!
//! ```text
//! front end                    bridge                 session
//! ─────────────────────────────────────────────────────────────
//! get_layout()        ──────>  LayoutDto        <──── split halves
//! get_visual_state()  ──────>  VisualStateDto   <──── ModifierState
//! type_chords(..)     ──────>  TypeReportDto    <──── state machine + injection
//! ```
//!
//! Every command returns a `CommandResult<T>` envelope:
//! ```json
//! { "success": true,  "data": {...}, "error": null  }
//! { "success": false, "data": null,  "error": "..."  }
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use splitboard_core::{
    ConfigurationGap, Highlight, KeyClass, KeyCode, KeyDefinition, Layout, ModifierFamily,
    ToggleKind,
};

use crate::application::keyboard_session::KeyboardSession;
use crate::application::type_chord::{type_chord, Chord};
use crate::infrastructure::config::RepeatConfig;

// ── DTOs ──────────────────────────────────────────────────────────────────────

/// One button as the front end should create it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDto {
    pub label: String,
    pub shifted_label: String,
    pub key_code: KeyCode,
    pub class: KeyClass,
    pub row: u16,
    pub column: u16,
    pub column_span: u16,
    pub is_extended: bool,
    /// Whether holding the button should auto-repeat.
    pub repeats: bool,
}

impl From<&KeyDefinition> for KeyDto {
    fn from(key: &KeyDefinition) -> Self {
        Self {
            label: key.label.clone(),
            shifted_label: key.shifted_label.clone(),
            key_code: key.key_code,
            class: key.class,
            row: key.row,
            column: key.column,
            column_span: key.column_span,
            is_extended: key.is_extended,
            repeats: key.repeats_when_held(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatDto {
    pub delay_ms: u64,
    pub interval_ms: u64,
}

impl From<&RepeatConfig> for RepeatDto {
    fn from(cfg: &RepeatConfig) -> Self {
        Self {
            delay_ms: cfg.delay_ms,
            interval_ms: cfg.interval_ms,
        }
    }
}

/// Both keyboard halves, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDto {
    pub left: Vec<Vec<KeyDto>>,
    pub right: Vec<Vec<KeyDto>>,
    pub gaps: Vec<ConfigurationGap>,
    pub repeat: RepeatDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualStateDto {
    pub effective_shift: bool,
    pub held: Vec<ModifierFamily>,
    pub latched: Vec<ToggleKind>,
    pub labels: BTreeMap<KeyCode, String>,
    pub highlights: BTreeMap<KeyCode, Highlight>,
}

/// What `type_chords` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeReportDto {
    pub chords: usize,
    pub injected: usize,
    pub failures: Vec<String>,
}

/// Unified response wrapper for bridge commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }

    /// Failure that still carries a payload (e.g. a partial report).
    pub fn err_with(data: T, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(msg.into()),
        }
    }
}

fn rows_dto(layout: &Layout) -> Vec<Vec<KeyDto>> {
    layout
        .rows()
        .iter()
        .map(|row| row.iter().map(KeyDto::from).collect())
        .collect()
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns both halves plus repeat timing.
pub fn get_layout(session: &KeyboardSession, repeat: &RepeatConfig) -> CommandResult<LayoutDto> {
    let split = session.split_layout();
    CommandResult::ok(LayoutDto {
        left: rows_dto(&split.left),
        right: rows_dto(&split.right),
        gaps: split.gaps.clone(),
        repeat: RepeatDto::from(repeat),
    })
}

/// Returns the current labels and highlights.
pub fn get_visual_state(session: &KeyboardSession) -> CommandResult<VisualStateDto> {
    let state = session.modifier_state();
    let visuals = session.current_visual_state();
    CommandResult::ok(VisualStateDto {
        effective_shift: state.effective_shift(),
        held: ModifierFamily::ALL
            .into_iter()
            .filter(|f| state.is_held(*f))
            .collect(),
        latched: ToggleKind::ALL
            .into_iter()
            .filter(|k| state.is_latched(*k))
            .collect(),
        labels: visuals.labels,
        highlights: visuals.highlights,
    })
}

/// Resolves every chord first, then types them in order.
///
/// Nothing is typed if any chord fails to resolve.
pub fn type_chords(session: &mut KeyboardSession, chords: &[String]) -> CommandResult<TypeReportDto> {
    let resolved: Result<Vec<Chord>, _> = chords.iter().map(|c| Chord::parse(&*session, c)).collect();
    let resolved = match resolved {
        Ok(resolved) => resolved,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    let mut report = TypeReportDto {
        chords: resolved.len(),
        injected: 0,
        failures: Vec::new(),
    };
    for chord in &resolved {
        let outcome = type_chord(session, chord);
        report.injected += outcome.injected;
        report
            .failures
            .extend(outcome.failures.iter().map(ToString::to_string));
    }

    if report.failures.is_empty() {
        CommandResult::ok(report)
    } else {
        let msg = format!("{} key event(s) failed", report.failures.len());
        CommandResult::err_with(report, msg)
    }
}

/// Plain-text grid of one half, one line per row.
///
/// Each key is drawn as `[label]` padded to four characters per column it
/// spans.  A zero-span key is drawn one column wide.
pub fn render_text(layout: &Layout) -> String {
    let mut out = String::new();
    for row in layout.rows() {
        for key in row {
            let width = (usize::from(key.column_span.max(1)) * 4).saturating_sub(2);
            let _ = write!(out, "[{:^width$}]", key.label, width = width);
        }
        out.push('\n');
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
