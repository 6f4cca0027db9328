//! skinbutton - Pixmap-skinned buttons for themed media player interfaces.
//!
//! Buttons cut their artwork out of skin sheets and report clicks through
//! callbacks. Three kinds exist: momentary push buttons, toggle buttons that
//! remember an on/off state, and small buttons that are invisible click targets.

pub mod error;
pub mod event;
pub mod render;
pub mod skin;
pub mod ui;

pub use error::Error;
pub use event::{CursorPos, InputEvent, Modifiers, MouseButton, WindowEvent};
pub use render::{Canvas, Rgba, rgb};
pub use skin::{ActiveSkin, Skin, SkinPixmapId, SkinSource};
pub use ui::panel::{ButtonId, Panel};
pub use ui::widgets::Widget;
pub use ui::widgets::button::{ButtonCallback, ButtonKind, Frame, SkinnedButton};

/// Creates a momentary push button.
///
/// # Example
///
/// ```
/// use skinbutton::{SkinPixmapId, button};
///
/// let play = button(23, 18, 23, 0, 23, 18, SkinPixmapId::Cbuttons, SkinPixmapId::Cbuttons)
///     .on_release(|_, _| println!("play"));
/// assert!(play.frame().is_some());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn button(
    width: u32,
    height: u32,
    nx: i32,
    ny: i32,
    px: i32,
    py: i32,
    sheet1: SkinPixmapId,
    sheet2: SkinPixmapId,
) -> SkinnedButton {
    SkinnedButton::new_normal(width, height, nx, ny, px, py, sheet1, sheet2)
}

/// Creates a toggle button.
#[allow(clippy::too_many_arguments)]
pub fn toggle(
    width: u32,
    height: u32,
    nx: i32,
    ny: i32,
    px: i32,
    py: i32,
    pnx: i32,
    pny: i32,
    ppx: i32,
    ppy: i32,
    sheet1: SkinPixmapId,
    sheet2: SkinPixmapId,
) -> SkinnedButton {
    SkinnedButton::new_toggle(width, height, nx, ny, px, py, pnx, pny, ppx, ppy, sheet1, sheet2)
}

/// Creates an invisible click target.
pub fn small(width: u32, height: u32) -> SkinnedButton {
    SkinnedButton::new_small(width, height)
}
