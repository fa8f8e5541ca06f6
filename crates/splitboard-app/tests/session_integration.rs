//! Integration tests for the keyboard session.
//!
//! A `RecordingBackend` stands in for `SendInput`, so these tests check
//! the exact sequence of events that would reach the OS for realistic
//! button sequences on the split halves.

use std::sync::Arc;

use splitboard_app::application::{
    inject_key::{InjectKeyUseCase, InputBackend},
    keyboard_session::KeyboardSession,
    prepare_layout::prepare_layout,
    type_chord::{type_chord, Chord, ChordError},
};
use splitboard_app::infrastructure::input_injection::mock::RecordingBackend;
use splitboard_core::{
    vk, Half, Highlight, InjectionError, KeyCode, KeyDefinition, KeyEncoding, ModifierFamily,
    StaticScanTable, ToggleKind, ToggleSnapshot,
};

fn make_session(backend: &Arc<RecordingBackend>) -> KeyboardSession {
    KeyboardSession::new(
        prepare_layout(&StaticScanTable),
        ToggleSnapshot::default(),
        InjectKeyUseCase::new(Arc::clone(backend) as Arc<dyn InputBackend>),
    )
}

/// Looks a key up in the half it is rendered on.
fn key_on(session: &KeyboardSession, half: Half, code: KeyCode) -> KeyDefinition {
    session
        .split_layout()
        .half(half)
        .keys()
        .find(|k| k.key_code == code)
        .unwrap_or_else(|| panic!("VK 0x{code:02X} not on the {half:?} half"))
        .clone()
}

#[test]
fn test_shift_then_letter_yields_exact_event_sequence() {
    // Arrange
    let backend = Arc::new(RecordingBackend::new());
    let mut session = make_session(&backend);
    let shift = key_on(&session, Half::Left, vk::LSHIFT);
    let a = key_on(&session, Half::Left, vk::ascii(b'A'));

    // Act
    session.on_key_pressed(&shift);
    session.on_key_pressed(&a);
    session.on_key_released(&a);
    session.on_key_released(&shift);

    // Assert
    assert_eq!(
        backend.keys(),
        vec![
            (vk::LSHIFT, false),
            (vk::ascii(b'A'), false),
            (vk::ascii(b'A'), true),
            (vk::LSHIFT, true),
        ]
    );
}

#[test]
fn test_double_sticky_press_injects_once_and_single_release_injects_once() {
    let backend = Arc::new(RecordingBackend::new());
    let mut session = make_session(&backend);
    let ctrl = key_on(&session, Half::Left, vk::LCONTROL);

    session.on_key_pressed(&ctrl);
    session.on_key_pressed(&ctrl);
    session.on_key_released(&ctrl);

    assert_eq!(backend.keys(), vec![(vk::LCONTROL, false), (vk::LCONTROL, true)]);
}

#[test]
fn test_right_shift_press_while_left_held_is_ignored() {
    let backend = Arc::new(RecordingBackend::new());
    let mut session = make_session(&backend);
    let lshift = key_on(&session, Half::Left, vk::LSHIFT);
    let rshift = key_on(&session, Half::Right, vk::RSHIFT);

    session.on_key_pressed(&lshift);
    let outcome = session.on_key_pressed(&rshift);

    assert_eq!(outcome.injected, 0);
    assert_eq!(backend.call_count(), 1);
}

#[test]
fn test_toggle_press_flips_and_second_press_flips_back() {
    let backend = Arc::new(RecordingBackend::new());
    let mut session = make_session(&backend);
    let caps = key_on(&session, Half::Left, vk::CAPITAL);

    session.on_key_pressed(&caps);
    assert!(session.modifier_state().is_latched(ToggleKind::CapsLock));
    assert_eq!(
        session.current_visual_state().highlight(vk::CAPITAL),
        Highlight::ToggleActive
    );

    session.on_key_released(&caps);
    session.on_key_pressed(&caps);

    assert!(!session.modifier_state().is_latched(ToggleKind::CapsLock));
    assert_eq!(
        backend.keys(),
        vec![
            (vk::CAPITAL, false),
            (vk::CAPITAL, true),
            (vk::CAPITAL, false),
            (vk::CAPITAL, true),
        ]
    );
}

#[test]
fn test_failed_injection_still_latches_modifier() {
    // Arrange
    let backend = Arc::new(RecordingBackend::failing(InjectionError::AccessDenied));
    let mut session = make_session(&backend);
    let alt = key_on(&session, Half::Right, vk::RMENU);

    // Act
    let outcome = session.on_key_pressed(&alt);

    // Assert
    assert_eq!(outcome.failures, vec![InjectionError::AccessDenied]);
    assert!(outcome.visuals_changed);
    assert!(session.modifier_state().is_held(ModifierFamily::Alt));
    assert_eq!(backend.call_count(), 1);
}

#[test]
fn test_right_alt_injection_is_extended_and_enter_is_not() {
    let backend = Arc::new(RecordingBackend::new());
    let mut session = make_session(&backend);
    let ralt = key_on(&session, Half::Right, vk::RMENU);
    let enter = key_on(&session, Half::Right, vk::RETURN);

    session.on_key_pressed(&ralt);
    session.on_key_pressed(&enter);

    let events = backend.events.lock().unwrap();
    assert!(events[0].is_extended());
    assert!(!events[1].is_extended());
}

#[test]
fn test_both_space_halves_inject_the_space_key() {
    let backend = Arc::new(RecordingBackend::new());
    let mut session = make_session(&backend);
    let left = key_on(&session, Half::Left, vk::SPACE);
    let right = key_on(&session, Half::Right, vk::SPACE);

    session.on_key_pressed(&left);
    session.on_key_released(&left);
    session.on_key_pressed(&right);
    session.on_key_released(&right);

    assert!(backend.keys().iter().all(|(code, _)| *code == vk::SPACE));
    assert_eq!(backend.call_count(), 4);
}

#[test]
fn test_scan_code_session_sends_scan_codes() {
    let backend = Arc::new(RecordingBackend::new());
    let mut session = KeyboardSession::new(
        prepare_layout(&StaticScanTable),
        ToggleSnapshot::default(),
        InjectKeyUseCase::new(Arc::clone(&backend) as Arc<dyn InputBackend>)
            .with_encoding(KeyEncoding::ScanCode),
    );
    let esc = key_on(&session, Half::Left, vk::ESCAPE);

    session.on_key_pressed(&esc);

    let events = backend.events.lock().unwrap();
    assert_eq!(events[0].virtual_key, 0);
    assert_eq!(events[0].scan_code, 0x01);
    assert!(events[0].uses_scan_code());
}

#[test]
fn test_chord_presses_modifiers_and_releases_in_reverse() {
    let backend = Arc::new(RecordingBackend::new());
    let mut session = make_session(&backend);

    let chord = Chord::parse(&session, "Ctrl+Shift+Esc").unwrap();
    let outcome = type_chord(&mut session, &chord);

    assert!(outcome.is_ok());
    assert_eq!(
        backend.keys(),
        vec![
            (vk::LCONTROL, false),
            (vk::LSHIFT, false),
            (vk::ESCAPE, false),
            (vk::ESCAPE, true),
            (vk::LSHIFT, true),
            (vk::LCONTROL, true),
        ]
    );
    assert!(!session.modifier_state().is_held(ModifierFamily::Control));
    assert!(!session.modifier_state().is_held(ModifierFamily::Shift));
}

#[test]
fn test_chord_with_unknown_key_is_rejected() {
    let backend = Arc::new(RecordingBackend::new());
    let session = make_session(&backend);

    assert_eq!(
        Chord::parse(&session, "Ctrl+Nope"),
        Err(ChordError::UnknownKey("Nope".to_string()))
    );
    assert_eq!(Chord::parse(&session, "  "), Err(ChordError::Empty));
}

#[test]
fn test_shifted_symbol_chord_wraps_key_in_shift() {
    // Arrange
    let backend = Arc::new(RecordingBackend::new());
    let mut session = make_session(&backend);

    // Act
    let chord = Chord::parse(&session, "!").unwrap();
    let outcome = type_chord(&mut session, &chord);

    // Assert
    assert!(outcome.is_ok());
    assert_eq!(
        backend.keys(),
        vec![
            (vk::LSHIFT, false),
            (vk::ascii(b'1'), false),
            (vk::ascii(b'1'), true),
            (vk::LSHIFT, true),
        ]
    );
}

#[test]
fn test_shifted_symbol_chord_reuses_explicit_shift() {
    let backend = Arc::new(RecordingBackend::new());
    let mut session = make_session(&backend);

    let chord = Chord::parse(&session, "Ctrl+Shift++").unwrap();
    type_chord(&mut session, &chord);

    assert_eq!(
        backend.keys(),
        vec![
            (vk::LCONTROL, false),
            (vk::LSHIFT, false),
            (vk::OEM_PLUS, false),
            (vk::OEM_PLUS, true),
            (vk::LSHIFT, true),
            (vk::LCONTROL, true),
        ]
    );
}

#[test]
fn test_chord_names_tolerate_spaces_around_plus_key() {
    let backend = Arc::new(RecordingBackend::new());
    let session = make_session(&backend);

    let chord = Chord::parse(&session, "Ctrl ++").unwrap();

    assert_eq!(
        chord.modifiers.iter().map(|k| k.key_code).collect::<Vec<_>>(),
        vec![vk::LCONTROL, vk::LSHIFT]
    );
    assert_eq!(chord.key.key_code, vk::OEM_PLUS);
}
