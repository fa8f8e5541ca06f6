//! Platform-specific key injection backends.
//!
//! The correct implementation is selected at compile time via `#[cfg(target_os = ...)]`.

use std::sync::Arc;

use crate::application::inject_key::InputBackend;

pub mod mock;
pub mod unsupported;

#[cfg(target_os = "windows")]
pub mod windows;

/// The injection backend for the current platform.
pub fn platform_backend() -> Arc<dyn InputBackend> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(windows::SendInputBackend::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        tracing::warn!("no key injection backend for this platform; key events will fail");
        Arc::new(unsupported::UnsupportedBackend)
    }
}
