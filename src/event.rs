//! Input events delivered by the host window and by widgets to their callbacks.

use bitflags::bitflags;

/// Raw pointer events as a host window reports them, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    CursorEnter(CursorPos),
    CursorMove(CursorPos),
    CursorLeave,
    ButtonPress(MouseButton, Modifiers),
    ButtonRelease(MouseButton, Modifiers),
}

/// Events as seen by a single widget, after hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(MouseButton, Modifiers),
    Release(MouseButton, Modifiers),
    Enter,
    Leave,
}

impl InputEvent {
    pub fn button(&self) -> Option<MouseButton> {
        match self {
            InputEvent::Press(b, _) | InputEvent::Release(b, _) => Some(*b),
            InputEvent::Enter | InputEvent::Leave => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPos {
    pub x: i16,
    pub y: i16,
}

impl CursorPos {
    pub const fn new(x: i16, y: i16) -> Self {
        Self {
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub fn is_primary(self) -> bool {
        self == MouseButton::Left
    }

    pub fn is_secondary(self) -> bool {
        self == MouseButton::Right
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0x01;
        const CTRL  = 0x02;
        const ALT   = 0x04;
        const SUPER = 0x08;
    }
}
