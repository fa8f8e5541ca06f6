//! Windows Virtual Key (VK) codes and the VK → scan code translation table.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h) and the IBM PC/AT
//! "set 1" scan codes produced by a US keyboard.
//!
//! # Virtual keys
//!
//! A VK code names a *logical* key (`VK_RETURN = 0x0D`, `VK_SPACE = 0x20`)
//! independent of where it sits on the physical board; letters and digits use
//! their upper-case ASCII value, so `A` is always `0x41`.
//!
//! The on-screen keyboard uses VK codes as its platform-independent key
//! identifier ([`KeyCode`]).  Code `0` is never a real key; the layout uses it
//! for spacers and placeholder slots.
//!
//! # Scan codes
//!
//! A scan code identifies the *physical* key position.  `VK_TO_SCAN_TABLE`
//! holds the value `MapVirtualKeyW(vk, MAPVK_VK_TO_VSC)` returns on a US
//! layout, i.e. without the `0xE0` prefix of extended keys.  Extended-ness is
//! carried separately by the key definition's `is_extended` flag.

/// Platform-independent identifier of a key (a Windows VK code).
pub type KeyCode = u16;

/// Hardware scan code; `0` means "not resolved".
pub type ScanCode = u16;

/// Named VK constants for every key the canonical layout uses.
pub mod vk {
    use super::KeyCode;

    pub const BACK: KeyCode = 0x08;
    pub const TAB: KeyCode = 0x09;
    pub const RETURN: KeyCode = 0x0D;
    pub const SHIFT: KeyCode = 0x10;
    pub const CONTROL: KeyCode = 0x11;
    pub const MENU: KeyCode = 0x12;
    pub const PAUSE: KeyCode = 0x13;
    pub const CAPITAL: KeyCode = 0x14;
    pub const ESCAPE: KeyCode = 0x1B;
    pub const SPACE: KeyCode = 0x20;
    pub const PRIOR: KeyCode = 0x21;
    pub const NEXT: KeyCode = 0x22;
    pub const END: KeyCode = 0x23;
    pub const HOME: KeyCode = 0x24;
    pub const LEFT: KeyCode = 0x25;
    pub const UP: KeyCode = 0x26;
    pub const RIGHT: KeyCode = 0x27;
    pub const DOWN: KeyCode = 0x28;
    pub const SNAPSHOT: KeyCode = 0x2C;
    pub const INSERT: KeyCode = 0x2D;
    pub const DELETE: KeyCode = 0x2E;
    pub const LWIN: KeyCode = 0x5B;
    pub const RWIN: KeyCode = 0x5C;
    pub const APPS: KeyCode = 0x5D;
    pub const F1: KeyCode = 0x70;
    pub const F2: KeyCode = 0x71;
    pub const F3: KeyCode = 0x72;
    pub const F4: KeyCode = 0x73;
    pub const F5: KeyCode = 0x74;
    pub const F6: KeyCode = 0x75;
    pub const F7: KeyCode = 0x76;
    pub const F8: KeyCode = 0x77;
    pub const F9: KeyCode = 0x78;
    pub const F10: KeyCode = 0x79;
    pub const F11: KeyCode = 0x7A;
    pub const F12: KeyCode = 0x7B;
    pub const NUMLOCK: KeyCode = 0x90;
    pub const SCROLL: KeyCode = 0x91;
    pub const LSHIFT: KeyCode = 0xA0;
    pub const RSHIFT: KeyCode = 0xA1;
    pub const LCONTROL: KeyCode = 0xA2;
    pub const RCONTROL: KeyCode = 0xA3;
    pub const LMENU: KeyCode = 0xA4;
    pub const RMENU: KeyCode = 0xA5;
    pub const OEM_1: KeyCode = 0xBA; // ; :
    pub const OEM_PLUS: KeyCode = 0xBB; // = +
    pub const OEM_COMMA: KeyCode = 0xBC; // , <
    pub const OEM_MINUS: KeyCode = 0xBD; // - _
    pub const OEM_PERIOD: KeyCode = 0xBE; // . >
    pub const OEM_2: KeyCode = 0xBF; // / ?
    pub const OEM_3: KeyCode = 0xC0; // ` ~
    pub const OEM_4: KeyCode = 0xDB; // [ {
    pub const OEM_5: KeyCode = 0xDC; // \ |
    pub const OEM_6: KeyCode = 0xDD; // ] }
    pub const OEM_7: KeyCode = 0xDE; // ' "

    /// VK code of an ASCII digit or upper-case letter (`'A'` → 0x41).
    pub const fn ascii(c: u8) -> KeyCode {
        c as KeyCode
    }
}

/// Translates a VK code to its US set-1 scan code.
///
/// Returns `None` for codes outside the table or without a keyboard scan code.
pub fn vk_to_scan_code(code: KeyCode) -> Option<ScanCode> {
    let scan = *VK_TO_SCAN_TABLE.get(code as usize)?;
    (scan != 0).then_some(scan)
}

/// Complete VK → scan code table indexed by VK code (0x00–0xFF).
///
/// Entries are `0` when the VK code has no keyboard scan code.
const VK_TO_SCAN_TABLE: [ScanCode; 256] = {
    let mut t = [0u16; 256];

    // ── Control keys ─────────────────────────────────────────────────────────
    t[0x08] = 0x0E; // VK_BACK
    t[0x09] = 0x0F; // VK_TAB
    t[0x0D] = 0x1C; // VK_RETURN
    t[0x10] = 0x2A; // VK_SHIFT
    t[0x11] = 0x1D; // VK_CONTROL
    t[0x12] = 0x38; // VK_MENU
    t[0x13] = 0x45; // VK_PAUSE
    t[0x14] = 0x3A; // VK_CAPITAL
    t[0x1B] = 0x01; // VK_ESCAPE
    t[0x20] = 0x39; // VK_SPACE

    // ── Navigation cluster (extended) ─────────────────────────────────────────
    t[0x21] = 0x49; // VK_PRIOR
    t[0x22] = 0x51; // VK_NEXT
    t[0x23] = 0x4F; // VK_END
    t[0x24] = 0x47; // VK_HOME
    t[0x25] = 0x4B; // VK_LEFT
    t[0x26] = 0x48; // VK_UP
    t[0x27] = 0x4D; // VK_RIGHT
    t[0x28] = 0x50; // VK_DOWN
    t[0x2C] = 0x37; // VK_SNAPSHOT
    t[0x2D] = 0x52; // VK_INSERT
    t[0x2E] = 0x53; // VK_DELETE

    // ── Digit row (VK_0=0x30 … VK_9=0x39) ───────────────────────────────────
    t[0x30] = 0x0B;
    t[0x31] = 0x02;
    t[0x32] = 0x03;
    t[0x33] = 0x04;
    t[0x34] = 0x05;
    t[0x35] = 0x06;
    t[0x36] = 0x07;
    t[0x37] = 0x08;
    t[0x38] = 0x09;
    t[0x39] = 0x0A;

    // ── Alphabet keys (VK_A=0x41 … VK_Z=0x5A) ────────────────────────────────
    t[0x41] = 0x1E; // A
    t[0x42] = 0x30; // B
    t[0x43] = 0x2E; // C
    t[0x44] = 0x20; // D
    t[0x45] = 0x12; // E
    t[0x46] = 0x21; // F
    t[0x47] = 0x22; // G
    t[0x48] = 0x23; // H
    t[0x49] = 0x17; // I
    t[0x4A] = 0x24; // J
    t[0x4B] = 0x25; // K
    t[0x4C] = 0x26; // L
    t[0x4D] = 0x32; // M
    t[0x4E] = 0x31; // N
    t[0x4F] = 0x18; // O
    t[0x50] = 0x19; // P
    t[0x51] = 0x10; // Q
    t[0x52] = 0x13; // R
    t[0x53] = 0x1F; // S
    t[0x54] = 0x14; // T
    t[0x55] = 0x16; // U
    t[0x56] = 0x2F; // V
    t[0x57] = 0x11; // W
    t[0x58] = 0x2D; // X
    t[0x59] = 0x15; // Y
    t[0x5A] = 0x2C; // Z

    // ── Windows / menu keys (extended) ───────────────────────────────────────
    t[0x5B] = 0x5B; // VK_LWIN
    t[0x5C] = 0x5C; // VK_RWIN
    t[0x5D] = 0x5D; // VK_APPS

    // ── Function keys (VK_F1=0x70 … VK_F12=0x7B) ─────────────────────────────
    t[0x70] = 0x3B;
    t[0x71] = 0x3C;
    t[0x72] = 0x3D;
    t[0x73] = 0x3E;
    t[0x74] = 0x3F;
    t[0x75] = 0x40;
    t[0x76] = 0x41;
    t[0x77] = 0x42;
    t[0x78] = 0x43;
    t[0x79] = 0x44;
    t[0x7A] = 0x57;
    t[0x7B] = 0x58;

    // ── Lock keys ─────────────────────────────────────────────────────────────
    t[0x90] = 0x45; // VK_NUMLOCK
    t[0x91] = 0x46; // VK_SCROLL

    // ── Sided modifiers ───────────────────────────────────────────────────────
    t[0xA0] = 0x2A; // VK_LSHIFT
    t[0xA1] = 0x36; // VK_RSHIFT
    t[0xA2] = 0x1D; // VK_LCONTROL
    t[0xA3] = 0x1D; // VK_RCONTROL (E0 1D)
    t[0xA4] = 0x38; // VK_LMENU
    t[0xA5] = 0x38; // VK_RMENU (E0 38)

    // ── Punctuation / symbols ─────────────────────────────────────────────────
    t[0xBA] = 0x27; // VK_OEM_1
    t[0xBB] = 0x0D; // VK_OEM_PLUS
    t[0xBC] = 0x33; // VK_OEM_COMMA
    t[0xBD] = 0x0C; // VK_OEM_MINUS
    t[0xBE] = 0x34; // VK_OEM_PERIOD
    t[0xBF] = 0x35; // VK_OEM_2
    t[0xC0] = 0x29; // VK_OEM_3
    t[0xDB] = 0x1A; // VK_OEM_4
    t[0xDC] = 0x2B; // VK_OEM_5
    t[0xDD] = 0x1B; // VK_OEM_6
    t[0xDE] = 0x28; // VK_OEM_7

    t
};
