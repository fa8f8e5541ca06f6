//! Windows key injection via the SendInput API.
//!
//! One `INPUT` record per call.  `SendInput` returns the number of events it
//! queued; anything but 1 is a failure, classified from `GetLastError`.
//! UIPI blocks injection into windows of a higher integrity level, which
//! shows up as `ERROR_ACCESS_DENIED`.

#![cfg(target_os = "windows")]

use splitboard_core::{EncodedKeyEvent, InjectionError};
use windows::Win32::Foundation::GetLastError;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS, VIRTUAL_KEY,
};

use crate::application::inject_key::InputBackend;

/// Windows implementation of [`InputBackend`] using SendInput.
pub struct SendInputBackend;

impl SendInputBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SendInputBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBackend for SendInputBackend {
    fn send(&self, event: &EncodedKeyEvent) -> Result<(), InjectionError> {
        let input = INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(event.virtual_key),
                    wScan: event.scan_code,
                    dwFlags: KEYBD_EVENT_FLAGS(event.flags),
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };

        // SAFETY: input is a valid KEYBDINPUT structure on the stack
        let queued = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if queued == 1 {
            return Ok(());
        }

        // SAFETY: GetLastError only reads thread-local state
        let code = unsafe { GetLastError() }.0;
        Err(InjectionError::from_os_error(code))
    }
}
