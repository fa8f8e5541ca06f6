//! InjectKeyUseCase: delivers one key event to the OS.
//!
//! This use case sits at the application layer.  It encodes the event with
//! [`splitboard_core::encode`] and hands the result to an [`InputBackend`]
//! trait object; the `SendInput` implementation lives in the infrastructure
//! layer.
//!
//! Every call performs at most one backend call.  Failures are logged and
//! returned, never retried: repeating a keystroke could duplicate user input.

use std::sync::Arc;

use splitboard_core::{
    encode, EncodedKeyEvent, InjectionError, KeyCode, KeyDirection, KeyEncoding, KeyStroke,
    ScanCode,
};
use tracing::{debug, warn};

/// OS-level key injection.
///
/// Each supported OS provides an implementation in the infrastructure layer.
pub trait InputBackend: Send + Sync {
    /// Queues exactly one keyboard event.
    ///
    /// # Errors
    ///
    /// Returns the classified OS error when the event was not queued.
    fn send(&self, event: &EncodedKeyEvent) -> Result<(), InjectionError>;
}

/// The window that currently receives keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedWindow {
    pub title: String,
    pub process_id: u32,
}

/// Best-effort query for the focused window, used only in diagnostics.
#[cfg_attr(test, mockall::automock)]
pub trait FocusInspector {
    /// `None` when no window has focus or the query failed.
    fn focused_window(&self) -> Option<FocusedWindow>;
}

/// The Inject Key use case.
pub struct InjectKeyUseCase {
    backend: Arc<dyn InputBackend>,
    focus: Option<Box<dyn FocusInspector>>,
    encoding: KeyEncoding,
}

impl InjectKeyUseCase {
    /// Creates a use case with the default virtual-key encoding and no focus
    /// diagnostics.
    pub fn new(backend: Arc<dyn InputBackend>) -> Self {
        Self {
            backend,
            focus: None,
            encoding: KeyEncoding::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: KeyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_focus_inspector(mut self, focus: Box<dyn FocusInspector>) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn encoding(&self) -> KeyEncoding {
        self.encoding
    }

    /// Injects one press or release.
    ///
    /// Key code 0 is accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] when the backend did not queue the event.
    pub fn inject(
        &self,
        key_code: KeyCode,
        scan_code: ScanCode,
        is_press: bool,
        is_extended: bool,
    ) -> Result<(), InjectionError> {
        self.inject_stroke(&KeyStroke {
            key_code,
            scan_code,
            direction: if is_press {
                KeyDirection::Press
            } else {
                KeyDirection::Release
            },
            extended: is_extended,
        })
    }

    /// Same as [`inject`](Self::inject) for a prepared [`KeyStroke`].
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] when the backend did not queue the event.
    pub fn inject_stroke(&self, stroke: &KeyStroke) -> Result<(), InjectionError> {
        let Some(event) = encode(stroke, self.encoding) else {
            debug!("ignoring injection request for key code 0");
            return Ok(());
        };

        let focused = self.focus.as_ref().and_then(|f| f.focused_window());
        match &focused {
            Some(window) => debug!(
                vk = stroke.key_code,
                direction = ?stroke.direction,
                window = %window.title,
                pid = window.process_id,
                "injecting key"
            ),
            None => debug!(
                vk = stroke.key_code,
                direction = ?stroke.direction,
                "injecting key"
            ),
        }

        self.backend.send(&event).map_err(|err| {
            match (&err, &focused) {
                (InjectionError::AccessDenied, Some(window)) => warn!(
                    "injection of VK 0x{:02X} blocked: '{}' (pid {}) runs at a higher privilege level; run the keyboard as administrator to type into it",
                    stroke.key_code, window.title, window.process_id
                ),
                (InjectionError::AccessDenied, None) => warn!(
                    "injection of VK 0x{:02X} blocked by privilege isolation; run the keyboard as administrator to type into elevated windows",
                    stroke.key_code
                ),
                _ => warn!("injection of VK 0x{:02X} failed: {err}", stroke.key_code),
            }
            err
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use splitboard_core::injection::{KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, KEYEVENTF_SCANCODE};
    use crate::application::log_capture::capture_debug_logs;
    use splitboard_core::vk;
    use std::sync::Mutex;

    // ── Recording backend ─────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingBackend {
        sent: Mutex<Vec<EncodedKeyEvent>>,
        fail_with: Option<InjectionError>,
    }

    impl InputBackend for RecordingBackend {
        fn send(&self, event: &EncodedKeyEvent) -> Result<(), InjectionError> {
            self.sent.lock().unwrap().push(*event);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    fn make_use_case(backend: &Arc<RecordingBackend>) -> InjectKeyUseCase {
        InjectKeyUseCase::new(Arc::clone(backend) as Arc<dyn InputBackend>)
    }

    #[test]
    fn test_press_sends_exactly_one_event() {
        // Arrange
        let backend = Arc::new(RecordingBackend::default());
        let use_case = make_use_case(&backend);

        // Act
        use_case.inject(vk::ascii(b'A'), 0x1E, true, false).unwrap();

        // Assert
        let sent = backend.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].virtual_key, 0x41);
        assert_eq!(sent[0].flags, 0);
    }

    #[test]
    fn test_zero_key_code_is_a_silent_no_op() {
        let backend = Arc::new(RecordingBackend::default());
        let use_case = make_use_case(&backend);

        assert_eq!(use_case.inject(0, 0, true, false), Ok(()));
        assert!(backend.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_release_of_extended_key_carries_both_flags() {
        let backend = Arc::new(RecordingBackend::default());
        let use_case = make_use_case(&backend);

        use_case.inject(vk::RCONTROL, 0x1D, false, true).unwrap();

        let sent = backend.sent.lock().unwrap();
        assert_eq!(sent[0].flags, KEYEVENTF_KEYUP | KEYEVENTF_EXTENDEDKEY);
    }

    #[test]
    fn test_scan_code_encoding_is_opt_in() {
        let backend = Arc::new(RecordingBackend::default());
        let use_case = make_use_case(&backend).with_encoding(KeyEncoding::ScanCode);

        use_case.inject(vk::ascii(b'A'), 0x1E, true, false).unwrap();

        let sent = backend.sent.lock().unwrap();
        assert_eq!(sent[0].virtual_key, 0);
        assert_eq!(sent[0].scan_code, 0x1E);
        assert_eq!(sent[0].flags, KEYEVENTF_SCANCODE);
    }

    #[test]
    fn test_failure_is_returned_without_retry() {
        let backend = Arc::new(RecordingBackend {
            fail_with: Some(InjectionError::AccessDenied),
            ..RecordingBackend::default()
        });
        let use_case = make_use_case(&backend);

        let result = use_case.inject(vk::RETURN, 0x1C, true, false);

        assert_eq!(result, Err(InjectionError::AccessDenied));
        assert_eq!(backend.sent.lock().unwrap().len(), 1);
    }

    // ── Focus diagnostics ─────────────────────────────────────────────────────

    #[test]
    fn test_focus_is_queried_once_per_injection() {
        let backend = Arc::new(RecordingBackend::default());
        let mut focus = MockFocusInspector::new();
        focus.expect_focused_window().times(1).returning(|| {
            Some(FocusedWindow {
                title: "Notepad".to_string(),
                process_id: 4242,
            })
        });
        let use_case = make_use_case(&backend).with_focus_inspector(Box::new(focus));

        use_case.inject(vk::SPACE, 0x39, true, false).unwrap();

        assert_eq!(backend.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_focus_information_does_not_block_injection() {
        let backend = Arc::new(RecordingBackend {
            fail_with: Some(InjectionError::Unknown { code: 1_400 }),
            ..RecordingBackend::default()
        });
        let mut focus = MockFocusInspector::new();
        focus.expect_focused_window().returning(|| None);
        let use_case = make_use_case(&backend).with_focus_inspector(Box::new(focus));

        let result = use_case.inject(vk::TAB, 0x0F, true, false);

        assert_eq!(result, Err(InjectionError::Unknown { code: 1_400 }));
        assert_eq!(backend.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_zero_key_code_skips_focus_query() {
        let backend = Arc::new(RecordingBackend::default());
        let mut focus = MockFocusInspector::new();
        focus.expect_focused_window().times(0);
        let use_case = make_use_case(&backend).with_focus_inspector(Box::new(focus));

        use_case.inject(0, 0, false, false).unwrap();
    }

    #[test]
    fn test_attempt_is_logged_without_focus_inspector() {
        let backend = Arc::new(RecordingBackend::default());
        let use_case = make_use_case(&backend);

        let logs = capture_debug_logs(|| {
            use_case.inject(vk::RETURN, 0x1C, true, false).unwrap();
        });

        assert!(logs.contains("injecting key"), "logs: {logs}");
        assert!(logs.contains("vk=13"), "logs: {logs}");
        assert!(!logs.contains("window="), "logs: {logs}");
    }

    #[test]
    fn test_attempt_log_names_focused_window_when_known() {
        let backend = Arc::new(RecordingBackend::default());
        let mut focus = MockFocusInspector::new();
        focus.expect_focused_window().returning(|| {
            Some(FocusedWindow {
                title: "Notepad".to_string(),
                process_id: 4242,
            })
        });
        let use_case = make_use_case(&backend).with_focus_inspector(Box::new(focus));

        let logs = capture_debug_logs(|| {
            use_case.inject(vk::SPACE, 0x39, true, false).unwrap();
        });

        assert!(logs.contains("window=Notepad"), "logs: {logs}");
        assert!(logs.contains("pid=4242"), "logs: {logs}");
    }
}
