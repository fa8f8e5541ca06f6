//! Infrastructure layer for the keyboard application.
//!
//! Contains OS-facing adapters, configuration loading and the front-end
//! command bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `splitboard_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`input_injection`** – `InputBackend` implementations: `SendInput` on
//!   Windows, an always-failing backend elsewhere, and a recording backend
//!   for tests.
//!
//! - **`system_state`** – lock-key seeding, focused-window diagnostics and
//!   scan-code lookup.
//!
//! - **`config`** – optional TOML configuration.
//!
//! - **`ui_bridge`** – serialisable DTOs and the commands a front end calls.

pub mod config;
pub mod input_injection;
pub mod system_state;
pub mod ui_bridge;
