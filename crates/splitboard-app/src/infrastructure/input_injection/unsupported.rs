//! Backend for platforms without key injection.

use splitboard_core::{EncodedKeyEvent, InjectionError};

use crate::application::inject_key::InputBackend;

/// Refuses every event with [`InjectionError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackend;

impl InputBackend for UnsupportedBackend {
    fn send(&self, _event: &EncodedKeyEvent) -> Result<(), InjectionError> {
        Err(InjectionError::Unsupported)
    }
}
