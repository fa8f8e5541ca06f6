//! Read-only queries against the running desktop.
//!
//! - Lock-key states, read once to seed the modifier state machine.
//! - The focused window, for injection diagnostics.
//! - VK to scan-code resolution.
//!
//! Windows answers all three from the OS.  Elsewhere the locks read as off,
//! focus is unknown and scan codes come from the static US table.

use splitboard_core::{ScanCodeLookup, ToggleKind, ToggleSnapshot};

use crate::application::inject_key::FocusInspector;

#[cfg(target_os = "windows")]
pub mod windows;

/// Reads the lock-key states at start-up.
pub trait ToggleStateSource {
    fn is_toggled(&self, kind: ToggleKind) -> bool;

    fn toggle_snapshot(&self) -> ToggleSnapshot {
        ToggleSnapshot {
            caps_lock: self.is_toggled(ToggleKind::CapsLock),
            num_lock: self.is_toggled(ToggleKind::NumLock),
            scroll_lock: self.is_toggled(ToggleKind::ScrollLock),
        }
    }
}

/// A fixed answer, for platforms without a lock-state query and for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticSystemState(pub ToggleSnapshot);

impl ToggleStateSource for StaticSystemState {
    fn is_toggled(&self, kind: ToggleKind) -> bool {
        self.0.get(kind)
    }
}

pub fn platform_toggle_source() -> Box<dyn ToggleStateSource> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsSystemState)
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(StaticSystemState::default())
    }
}

pub fn platform_scan_codes() -> Box<dyn ScanCodeLookup> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsSystemState)
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(splitboard_core::StaticScanTable)
    }
}

/// `None` where the platform cannot report the focused window.
pub fn platform_focus_inspector() -> Option<Box<dyn FocusInspector>> {
    #[cfg(target_os = "windows")]
    {
        Some(Box::new(windows::WindowsSystemState))
    }

    #[cfg(not(target_os = "windows"))]
    {
        None
    }
}
