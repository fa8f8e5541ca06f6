//! PrepareLayoutUseCase: builds the canonical layout and its two halves.
//!
//! Runs once at start-up.  Structural problems (grid violations, membership
//! gaps) are logged here so they surface without aborting: the halves are
//! still usable, just not as intended.

use splitboard_core::{build_full_layout, split_layout, Layout, ScanCodeLookup, SplitLayout};
use tracing::{error, info, warn};

/// Full layout plus its split halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLayout {
    pub full: Layout,
    pub split: SplitLayout,
}

/// Builds and splits the canonical layout, resolving scan codes via `scan_codes`.
pub fn prepare_layout(scan_codes: &dyn ScanCodeLookup) -> PreparedLayout {
    let full = build_full_layout(scan_codes);
    if let Err(e) = full.validate() {
        error!("full layout violates the grid invariant: {e}");
    }

    let split = split_layout(&full);
    for gap in &split.gaps {
        warn!(
            "membership gap: '{}' (VK 0x{:02X}) placed on the {:?} half by column",
            gap.label, gap.key_code, gap.assigned_to
        );
    }

    info!(
        rows = full.row_count(),
        left_rows = split.left.row_count(),
        right_rows = split.right.row_count(),
        "keyboard layout prepared"
    );

    PreparedLayout { full, split }
}
