//! Key-event encoding for the OS input-injection call.
//!
//! This module is pure: it turns a [`KeyStroke`] into the field values of a
//! Win32 `KEYBDINPUT` record and classifies OS error codes.  Performing the
//! call is the job of an `InputBackend` in the application crate.
//!
//! # Encoding
//!
//! | Field         | Virtual-key (default) | Scan-code (opt-in)          |
//! |---------------|-----------------------|-----------------------------|
//! | `wVk`         | key code              | 0                           |
//! | `wScan`       | 0                     | low byte of the scan code   |
//! | `dwFlags`     | EXTENDED?, KEYUP?     | SCANCODE, EXTENDED?, KEYUP? |
//!
//! A scan code above `0xFF` (an `0xE0`-prefixed code such as `0xE01C`)
//! forces the extended flag on the scan-code path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::key::KeyDefinition;
use crate::keymap::{KeyCode, ScanCode};

/// `INPUT.type` for keyboard input.
pub const INPUT_KEYBOARD: u32 = 1;
pub const KEYEVENTF_EXTENDEDKEY: u32 = 0x0001;
pub const KEYEVENTF_KEYUP: u32 = 0x0002;
pub const KEYEVENTF_SCANCODE: u32 = 0x0008;

/// `GetLastError` value for a UIPI-blocked `SendInput`.
pub const ERROR_ACCESS_DENIED: u32 = 5;
pub const ERROR_INVALID_PARAMETER: u32 = 87;

/// Press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyDirection {
    Press,
    Release,
}

/// One logical key event the state machine wants delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStroke {
    pub key_code: KeyCode,
    pub scan_code: ScanCode,
    pub direction: KeyDirection,
    pub extended: bool,
}

impl KeyStroke {
    pub fn press(key: &KeyDefinition) -> Self {
        Self::for_key(key, KeyDirection::Press)
    }

    pub fn release(key: &KeyDefinition) -> Self {
        Self::for_key(key, KeyDirection::Release)
    }

    fn for_key(key: &KeyDefinition, direction: KeyDirection) -> Self {
        Self {
            key_code: key.key_code,
            scan_code: key.scan_code,
            direction,
            extended: key.is_extended,
        }
    }

    pub fn is_press(&self) -> bool {
        self.direction == KeyDirection::Press
    }
}

/// Which `KEYBDINPUT` fields identify the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyEncoding {
    /// Identify keys by VK code; independent of the active input locale.
    #[default]
    VirtualKey,
    /// Identify keys by hardware scan code where one is known.
    ScanCode,
}

/// Field values for one `INPUT { type: INPUT_KEYBOARD, ki: KEYBDINPUT }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedKeyEvent {
    pub input_type: u32,
    pub virtual_key: u16,
    pub scan_code: u16,
    pub flags: u32,
}

impl EncodedKeyEvent {
    pub fn is_key_up(&self) -> bool {
        self.flags & KEYEVENTF_KEYUP != 0
    }

    pub fn is_extended(&self) -> bool {
        self.flags & KEYEVENTF_EXTENDEDKEY != 0
    }

    pub fn uses_scan_code(&self) -> bool {
        self.flags & KEYEVENTF_SCANCODE != 0
    }
}

/// Encodes `stroke` for injection.
///
/// Returns `None` for key code 0: spacers and placeholders have nothing to
/// inject.  The scan-code encoding falls back to the VK form when the key has
/// no resolved scan code.
pub fn encode(stroke: &KeyStroke, encoding: KeyEncoding) -> Option<EncodedKeyEvent> {
    if stroke.key_code == 0 {
        return None;
    }

    let mut flags = 0;
    if stroke.direction == KeyDirection::Release {
        flags |= KEYEVENTF_KEYUP;
    }
    if stroke.extended {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }

    let (virtual_key, scan_code) = match encoding {
        KeyEncoding::ScanCode if stroke.scan_code != 0 => {
            flags |= KEYEVENTF_SCANCODE;
            if stroke.scan_code > 0xFF {
                flags |= KEYEVENTF_EXTENDEDKEY;
            }
            (0, stroke.scan_code & 0xFF)
        }
        _ => (stroke.key_code, 0),
    };

    Some(EncodedKeyEvent {
        input_type: INPUT_KEYBOARD,
        virtual_key,
        scan_code,
        flags,
    })
}

/// Why an injection call failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InjectionError {
    /// Blocked by User Interface Privilege Isolation: the focused window runs
    /// at a higher integrity level than this process.
    #[error("access denied: the focused window runs at a higher privilege level (run as administrator to type into it)")]
    AccessDenied,

    /// The OS rejected the `INPUT` record itself.
    #[error("invalid parameter passed to the input injection call")]
    InvalidParameter,

    #[error("input injection failed with OS error code {code}")]
    Unknown { code: u32 },

    /// This build has no injection backend for the current platform.
    #[error("key injection is not supported on this platform")]
    Unsupported,
}

impl InjectionError {
    /// Classifies a `GetLastError` code from a failed injection call.
    pub fn from_os_error(code: u32) -> Self {
        match code {
            ERROR_ACCESS_DENIED => Self::AccessDenied,
            ERROR_INVALID_PARAMETER => Self::InvalidParameter,
            code => Self::Unknown { code },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::vk;

    fn stroke(key_code: KeyCode, direction: KeyDirection, extended: bool) -> KeyStroke {
        KeyStroke {
            key_code,
            scan_code: 0,
            direction,
            extended,
        }
    }

    #[test]
    fn test_zero_key_code_encodes_to_nothing() {
        let s = stroke(0, KeyDirection::Press, false);
        assert_eq!(encode(&s, KeyEncoding::VirtualKey), None);
        assert_eq!(encode(&s, KeyEncoding::ScanCode), None);
    }

    #[test]
    fn test_press_uses_virtual_key_with_no_flags() {
        let event = encode(&stroke(vk::ascii(b'A'), KeyDirection::Press, false), KeyEncoding::VirtualKey)
            .expect("encoded");
        assert_eq!(
            event,
            EncodedKeyEvent {
                input_type: INPUT_KEYBOARD,
                virtual_key: 0x41,
                scan_code: 0,
                flags: 0,
            }
        );
    }

    #[test]
    fn test_release_sets_keyup_flag() {
        let event = encode(&stroke(vk::RETURN, KeyDirection::Release, false), KeyEncoding::VirtualKey)
            .expect("encoded");
        assert!(event.is_key_up());
        assert!(!event.is_extended());
    }

    #[test]
    fn test_extended_key_sets_extended_flag() {
        let event = encode(&stroke(vk::RMENU, KeyDirection::Press, true), KeyEncoding::VirtualKey)
            .expect("encoded");
        assert_eq!(event.flags, KEYEVENTF_EXTENDEDKEY);
    }

    #[test]
    fn test_scan_code_encoding_clears_virtual_key() {
        let s = KeyStroke {
            scan_code: 0x1E,
            ..stroke(vk::ascii(b'A'), KeyDirection::Press, false)
        };
        let event = encode(&s, KeyEncoding::ScanCode).expect("encoded");
        assert_eq!(event.virtual_key, 0);
        assert_eq!(event.scan_code, 0x1E);
        assert!(event.uses_scan_code());
    }

    #[test]
    fn test_prefixed_scan_code_forces_extended_flag() {
        let s = KeyStroke {
            scan_code: 0xE01C,
            ..stroke(vk::RETURN, KeyDirection::Release, false)
        };
        let event = encode(&s, KeyEncoding::ScanCode).expect("encoded");
        assert_eq!(event.scan_code, 0x1C);
        assert_eq!(
            event.flags,
            KEYEVENTF_SCANCODE | KEYEVENTF_EXTENDEDKEY | KEYEVENTF_KEYUP
        );
    }

    #[test]
    fn test_scan_code_encoding_falls_back_without_scan_code() {
        let event = encode(&stroke(vk::TAB, KeyDirection::Press, false), KeyEncoding::ScanCode)
            .expect("encoded");
        assert_eq!(event.virtual_key, vk::TAB);
        assert!(!event.uses_scan_code());
    }

    #[test]
    fn test_os_error_classification() {
        assert_eq!(InjectionError::from_os_error(5), InjectionError::AccessDenied);
        assert_eq!(InjectionError::from_os_error(87), InjectionError::InvalidParameter);
        assert_eq!(
            InjectionError::from_os_error(1_400),
            InjectionError::Unknown { code: 1_400 }
        );
    }

    #[test]
    fn test_access_denied_message_mentions_privilege() {
        assert!(InjectionError::AccessDenied.to_string().contains("privilege"));
    }
}
