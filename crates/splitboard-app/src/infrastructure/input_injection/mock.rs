//! Recording injection backend for tests.
//!
//! Every event handed to [`RecordingBackend::send`] is pushed into a
//! `Mutex<Vec<...>>` so assertions can check exactly what would have reached
//! the OS, and in what order.
//!
//! # `fail_with`
//!
//! Set `fail_with` to make every call record the event and then return that
//! error, as an OS that refused the input would.

use std::sync::Mutex;

use splitboard_core::{EncodedKeyEvent, InjectionError, KeyCode};

use crate::application::inject_key::InputBackend;

#[derive(Default)]
pub struct RecordingBackend {
    /// Every event passed to `send`, including failed ones.
    pub events: Mutex<Vec<EncodedKeyEvent>>,
    pub fail_with: Option<InjectionError>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: InjectionError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    /// Recorded events as `(virtual key, is key-up)` pairs.
    pub fn keys(&self) -> Vec<(KeyCode, bool)> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|e| (e.virtual_key, e.is_key_up()))
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl InputBackend for RecordingBackend {
    fn send(&self, event: &EncodedKeyEvent) -> Result<(), InjectionError> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(*event);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
