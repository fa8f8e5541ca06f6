//! Windows lock-state, focus and scan-code queries.

#![cfg(target_os = "windows")]

use splitboard_core::{KeyCode, ScanCode, ScanCodeLookup, ToggleKind};
use windows::Win32::UI::Input::KeyboardAndMouse::{GetKeyState, MapVirtualKeyW, MAPVK_VK_TO_VSC};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextW, GetWindowThreadProcessId,
};

use super::ToggleStateSource;
use crate::application::inject_key::{FocusInspector, FocusedWindow};

/// Stateless handle onto the Win32 queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsSystemState;

impl ToggleStateSource for WindowsSystemState {
    fn is_toggled(&self, kind: ToggleKind) -> bool {
        // SAFETY: GetKeyState has no preconditions
        let state = unsafe { GetKeyState(i32::from(kind.key_code())) };
        state & 0x0001 != 0
    }
}

impl ScanCodeLookup for WindowsSystemState {
    fn scan_code_for(&self, code: KeyCode) -> Option<ScanCode> {
        // SAFETY: MapVirtualKeyW has no preconditions
        let scan = unsafe { MapVirtualKeyW(u32::from(code), MAPVK_VK_TO_VSC) };
        match u16::try_from(scan) {
            Ok(0) | Err(_) => None,
            Ok(scan) => Some(scan),
        }
    }
}

impl FocusInspector for WindowsSystemState {
    fn focused_window(&self) -> Option<FocusedWindow> {
        // SAFETY: GetForegroundWindow has no preconditions; it may return null
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            return None;
        }

        let mut buf = [0u16; 256];
        // SAFETY: hwnd was just returned by the OS and buf is a valid buffer
        let len = unsafe { GetWindowTextW(hwnd, &mut buf) };
        let title = String::from_utf16_lossy(&buf[..len.max(0) as usize]);

        let mut process_id = 0u32;
        // SAFETY: process_id outlives the call
        unsafe { GetWindowThreadProcessId(hwnd, Some(&mut process_id as *mut u32)) };

        Some(FocusedWindow { title, process_id })
    }
}
