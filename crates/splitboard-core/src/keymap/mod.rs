//! Key code tables and the scan-code lookup seam.
//!
//! Keys are identified by Windows Virtual Key codes throughout the crate.
//! Scan codes are an optional optimisation resolved once while a layout is
//! normalised; the OS-backed lookup lives in the application crate, and the
//! static table here is used everywhere else (tests, non-Windows builds).

pub mod windows_vk;

pub use windows_vk::{vk, KeyCode, ScanCode};

/// Resolves a VK code to a hardware scan code.
///
/// Implementations return `None` (or `Some(0)`) when no scan code is known;
/// callers treat both as "leave unresolved".
pub trait ScanCodeLookup {
    fn scan_code_for(&self, code: KeyCode) -> Option<ScanCode>;
}

/// Lookup backed by the compile-time US set-1 table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticScanTable;

impl ScanCodeLookup for StaticScanTable {
    fn scan_code_for(&self, code: KeyCode) -> Option<ScanCode> {
        windows_vk::vk_to_scan_code(code)
    }
}

/// Lookup that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScanCodes;

impl ScanCodeLookup for NoScanCodes {
    fn scan_code_for(&self, _code: KeyCode) -> Option<ScanCode> {
        None
    }
}
