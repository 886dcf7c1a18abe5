//! Adapter to convert winit input data to our [`InputEvent`] type

use winit::event::{ElementState, MouseButton as WinitMouseButton};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};

use super::{InputEvent, Key, Modifiers, MouseButton};
use crate::geometry::Point;

/// Convert winit modifier state
pub fn modifiers_from_winit(state: ModifiersState) -> Modifiers {
    Modifiers::new(
        state.control_key(),
        state.shift_key(),
        state.alt_key(),
        state.super_key(),
    )
}

/// Convert a winit logical key.
///
/// Returns None for keys this engine has no use for.
pub fn key_from_winit(logical_key: &WinitKey) -> Option<Key> {
    match logical_key {
        WinitKey::Named(named) => match named {
            NamedKey::ArrowLeft => Some(Key::Left),
            NamedKey::ArrowRight => Some(Key::Right),
            NamedKey::ArrowUp => Some(Key::Up),
            NamedKey::ArrowDown => Some(Key::Down),
            NamedKey::Backspace => Some(Key::Backspace),
            NamedKey::Delete => Some(Key::Delete),
            NamedKey::Enter => Some(Key::Enter),
            NamedKey::Shift => Some(Key::Shift),
            NamedKey::Escape => Some(Key::Escape),
            NamedKey::Tab => Some(Key::Tab),
            NamedKey::Home => Some(Key::Home),
            NamedKey::End => Some(Key::End),
            NamedKey::Space => Some(Key::Character(' ')),
            _ => None,
        },
        WinitKey::Character(s) => s.chars().next().map(Key::Character),
        _ => None,
    }
}

/// Convert a winit key press or release.
///
/// OS auto-repeat presses (`KeyEvent::repeat`) map to None: widgets run their
/// own repeat timers and expect one KeyDown per physical press.
pub fn key_event_from_winit(
    logical_key: &WinitKey,
    state: ElementState,
    repeat: bool,
    modifiers: ModifiersState,
) -> Option<InputEvent> {
    if repeat && state == ElementState::Pressed {
        return None;
    }
    let key = key_from_winit(logical_key)?;
    let modifiers = modifiers_from_winit(modifiers);
    Some(match state {
        ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
        ElementState::Released => InputEvent::KeyUp { key, modifiers },
    })
}

/// Typed text (winit `KeyEvent::text`) as a sequence of char events
pub fn char_events_from_text(text: &str) -> impl Iterator<Item = InputEvent> + '_ {
    text.chars().map(InputEvent::Char)
}

pub fn mouse_button_from_winit(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(4),
        WinitMouseButton::Forward => MouseButton::Other(5),
        WinitMouseButton::Other(n) => MouseButton::Other(n),
    }
}

/// Convert a winit mouse button press or release.
///
/// `pos` must already be translated into the control's local pixels.
pub fn pointer_event_from_winit(
    button: WinitMouseButton,
    state: ElementState,
    pos: Point,
) -> InputEvent {
    let button = mouse_button_from_winit(button);
    match state {
        ElementState::Pressed => InputEvent::PointerDown { pos, button },
        ElementState::Released => InputEvent::PointerUp { pos, button },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        assert_eq!(
            key_from_winit(&WinitKey::Named(NamedKey::ArrowLeft)),
            Some(Key::Left)
        );
        assert_eq!(
            key_from_winit(&WinitKey::Named(NamedKey::Backspace)),
            Some(Key::Backspace)
        );
        assert_eq!(key_from_winit(&WinitKey::Named(NamedKey::F24)), None);
    }

    #[test]
    fn test_character_key_keeps_case() {
        assert_eq!(
            key_from_winit(&WinitKey::Character("S".into())),
            Some(Key::Character('S'))
        );
    }

    #[test]
    fn test_key_event_with_shift() {
        let event = key_event_from_winit(
            &WinitKey::Named(NamedKey::ArrowRight),
            ElementState::Pressed,
            false,
            ModifiersState::SHIFT,
        );
        match event {
            Some(InputEvent::KeyDown { key, modifiers }) => {
                assert_eq!(key, Key::Right);
                assert!(modifiers.shift());
                assert!(!modifiers.ctrl());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_release_maps_to_key_up() {
        let event = key_event_from_winit(
            &WinitKey::Named(NamedKey::Delete),
            ElementState::Released,
            false,
            ModifiersState::empty(),
        );
        assert_eq!(
            event,
            Some(InputEvent::KeyUp {
                key: Key::Delete,
                modifiers: Modifiers::NONE
            })
        );
    }

    #[test]
    fn test_auto_repeat_press_is_dropped() {
        let shift = WinitKey::Named(NamedKey::Shift);
        assert_eq!(
            key_event_from_winit(&shift, ElementState::Pressed, true, ModifiersState::SHIFT),
            None
        );
        assert!(
            key_event_from_winit(&shift, ElementState::Pressed, false, ModifiersState::SHIFT)
                .is_some()
        );
    }

    #[test]
    fn test_pointer_events() {
        let down = pointer_event_from_winit(
            WinitMouseButton::Left,
            ElementState::Pressed,
            Point::new(4, 9),
        );
        assert_eq!(down, InputEvent::left_down(4, 9));
        assert_eq!(
            mouse_button_from_winit(WinitMouseButton::Other(9)),
            MouseButton::Other(9)
        );
    }

    #[test]
    fn test_text_to_chars() {
        let events: Vec<_> = char_events_from_text("ab").collect();
        assert_eq!(events, vec![InputEvent::Char('a'), InputEvent::Char('b')]);
    }
}
