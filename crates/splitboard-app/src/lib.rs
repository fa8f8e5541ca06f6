//! splitboard-app library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! The application wires the platform-free core to the desktop:
//!
//! 1. Builds the canonical layout, resolving scan codes through the OS, and
//!    splits it into halves.
//! 2. Seeds the lock states from the OS.
//! 3. Turns each button press or release into injected key events through
//!    `SendInput`, logging the focused window when a call is refused.
//! 4. Reports labels and highlights back to the front end.

/// Application layer: use cases for the keyboard.
pub mod application;

/// Infrastructure layer: OS adapters, configuration and the UI bridge.
pub mod infrastructure;
