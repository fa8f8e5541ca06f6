//! Application layer use cases for the keyboard.
//!
//! - **`prepare_layout`** – Builds the canonical layout once, splits it into
//!   halves and logs any structural problems.
//!
//! - **`inject_key`** – Encodes one key event and hands it to an
//!   `InputBackend`.  The OS call itself is made by an implementation injected
//!   at construction time.
//!
//! - **`keyboard_session`** – Owns the layouts and modifier state of one
//!   keyboard and turns button presses into injected strokes.
//!
//! - **`type_chord`** – Plays `Ctrl+C`-style chords through a session.

pub mod inject_key;
pub mod keyboard_session;
#[cfg(test)]
pub(crate) mod log_capture;
pub mod prepare_layout;
pub mod type_chord;
