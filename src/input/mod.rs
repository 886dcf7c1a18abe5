//! Host-independent input events
//!
//! The host translates its native events into [`InputEvent`]s with
//! control-local pixel positions and delivers each physical event exactly
//! once. [`winit_adapter`] covers the winit key, button and modifier types.

mod click;
pub mod winit_adapter;

pub use click::ClickTracker;

use crate::geometry::Point;

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Keys the navigation and editing engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Backspace,
    Delete,
    Enter,
    Shift,
    Escape,
    Tab,
    Home,
    End,
    /// Any other key carrying a character (typed text arrives separately as
    /// [`InputEvent::Char`])
    Character(char),
}

/// Modifier keys as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000);

    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A single input event in control-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Point, button: MouseButton },
    PointerMove { pos: Point },
    PointerUp { pos: Point, button: MouseButton },
    /// Pointer left the control
    PointerLeave,
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key, modifiers: Modifiers },
    /// A typed character (may be a control character; widgets filter)
    Char(char),
    FocusGained,
    FocusLost,
}

impl InputEvent {
    pub fn left_down(x: i32, y: i32) -> Self {
        InputEvent::PointerDown {
            pos: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn left_up(x: i32, y: i32) -> Self {
        InputEvent::PointerUp {
            pos: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn pointer_move(x: i32, y: i32) -> Self {
        InputEvent::PointerMove {
            pos: Point::new(x, y),
        }
    }

    pub fn key_down(key: Key) -> Self {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_up(key: Key) -> Self {
        InputEvent::KeyUp {
            key,
            modifiers: Modifiers::NONE,
        }
    }
}
