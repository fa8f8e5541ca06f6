//! Pure keyboard logic.
//!
//! Nothing here touches the OS: layouts are plain data, the state machine
//! returns the strokes it wants injected, and visual state is computed on
//! demand.  Everything in this module runs and tests on any platform.

pub mod key;
pub mod layout;
pub mod modifiers;
pub mod split;
pub mod visual;
