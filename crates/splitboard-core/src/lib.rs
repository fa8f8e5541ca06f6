//! # splitboard-core
//!
//! Platform-free core of the split on-screen keyboard.
//!
//! - **`domain`** – the layout model and its normaliser, the left/right
//!   splitter, the sticky-modifier and toggle-lock state machine, and the
//!   per-key visual state derived from it.
//!
//! - **`injection`** – how a logical key stroke becomes the fields of one OS
//!   input-injection record, and the error taxonomy for failed calls.
//!
//! - **`keymap`** – Windows Virtual Key constants and the static scan-code
//!   table used when the OS cannot be asked.
//!
//! The crate has no OS dependencies; the application crate supplies the
//! injection backend and toggle/focus queries.

pub mod domain;
pub mod injection;
pub mod keymap;

pub use domain::key::{KeyClass, KeyDecl, KeyDefinition, Placement};
pub use domain::layout::{build_full_layout, normalize, Layout, LayoutError};
pub use domain::modifiers::{
    LatchState, ModifierFamily, ModifierState, StickyState, ToggleKind, ToggleSnapshot, Transition,
};
pub use domain::split::{split_layout, ConfigurationGap, Half, SplitLayout};
pub use domain::visual::{visual_state, Highlight, VisualState};
pub use injection::{encode, EncodedKeyEvent, InjectionError, KeyDirection, KeyEncoding, KeyStroke};
pub use keymap::{vk, KeyCode, NoScanCodes, ScanCode, ScanCodeLookup, StaticScanTable};
