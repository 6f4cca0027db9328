//! Skinned button widget.
//!
//! A button is drawn entirely from rectangles cut out of skin sheets: one for
//! the released look and one for the held-down look, plus a second pair for
//! toggle buttons that are switched on. Small buttons draw nothing and only
//! act as a click target laid over other artwork.

use std::fmt;

use super::{Widget, point_in_rect};
use crate::{
    error::Error,
    event::{InputEvent, WindowEvent},
    render::Canvas,
    skin::{SkinPixmapId, SkinSource},
};

/// Callback invoked with the button that received the event and the event itself.
pub type ButtonCallback = Box<dyn FnMut(&SkinnedButton, &InputEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Momentary push button.
    Normal,
    /// Keeps an on/off state that flips on every completed click.
    Toggle,
    /// Invisible hit region.
    Small,
}

/// A source rectangle origin on a skin sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub sheet: SkinPixmapId,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy)]
struct Faces {
    up: (i32, i32),
    down: (i32, i32),
    active_up: (i32, i32),
    active_down: (i32, i32),
    up_sheet: SkinPixmapId,
    down_sheet: SkinPixmapId,
}

#[derive(Clone, Copy)]
enum Slot {
    Press,
    Release,
    RightClick,
}

/// A clickable button rendered from skin pixmaps.
pub struct SkinnedButton {
    kind: ButtonKind,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    faces: Option<Faces>,
    hover: bool,
    pressed: bool,
    active: bool,
    redraw: bool,
    on_press: Option<ButtonCallback>,
    on_release: Option<ButtonCallback>,
    on_right_click: Option<ButtonCallback>,
}

impl SkinnedButton {
    fn base(kind: ButtonKind, width: u32, height: u32, faces: Option<Faces>) -> Self {
        Self {
            kind,
            x: 0,
            y: 0,
            width,
            height,
            faces,
            hover: false,
            pressed: false,
            active: false,
            redraw: false,
            on_press: None,
            on_release: None,
            on_right_click: None,
        }
    }

    /// Creates a push button showing (`nx`, `ny`) on `sheet1` when released and
    /// (`px`, `py`) on `sheet2` while held down.
    #[allow(clippy::too_many_arguments)]
    pub fn new_normal(
        width: u32,
        height: u32,
        nx: i32,
        ny: i32,
        px: i32,
        py: i32,
        sheet1: SkinPixmapId,
        sheet2: SkinPixmapId,
    ) -> Self {
        let faces = Faces {
            up: (nx, ny),
            down: (px, py),
            active_up: (0, 0),
            active_down: (0, 0),
            up_sheet: sheet1,
            down_sheet: sheet2,
        };
        Self::base(ButtonKind::Normal, width, height, Some(faces))
    }

    /// Creates a toggle button. The first two origins are used while the
    /// button is off, (`pnx`, `pny`) and (`ppx`, `ppy`) while it is on.
    #[allow(clippy::too_many_arguments)]
    pub fn new_toggle(
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
    ) -> Self {
        let faces = Faces {
            up: (nx, ny),
            down: (px, py),
            active_up: (pnx, pny),
            active_down: (ppx, ppy),
            up_sheet: sheet1,
            down_sheet: sheet2,
        };
        Self::base(ButtonKind::Toggle, width, height, Some(faces))
    }

    /// Creates an invisible click target.
    pub fn new_small(width: u32, height: u32) -> Self {
        Self::base(ButtonKind::Small, width, height, None)
    }

    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    pub fn is_hovered(&self) -> bool {
        self.hover
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn set_on_press(&mut self, callback: Option<ButtonCallback>) {
        self.on_press = callback;
    }

    pub fn set_on_release(&mut self, callback: Option<ButtonCallback>) {
        self.on_release = callback;
    }

    pub fn set_on_right_click(&mut self, callback: Option<ButtonCallback>) {
        self.on_right_click = callback;
    }

    pub fn on_press(mut self, callback: impl FnMut(&SkinnedButton, &InputEvent) + 'static) -> Self {
        self.on_press = Some(Box::new(callback));
        self
    }

    pub fn on_release(
        mut self,
        callback: impl FnMut(&SkinnedButton, &InputEvent) + 'static,
    ) -> Self {
        self.on_release = Some(Box::new(callback));
        self
    }

    pub fn on_right_click(
        mut self,
        callback: impl FnMut(&SkinnedButton, &InputEvent) + 'static,
    ) -> Self {
        self.on_right_click = Some(Box::new(callback));
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Returns whether a toggle button is switched on.
    pub fn active(&self) -> Result<bool, Error> {
        self.expect_toggle("active")?;
        Ok(self.active)
    }

    /// Switches a toggle button on or off. Setting the current value again
    /// does not request a redraw.
    pub fn set_active(&mut self, active: bool) -> Result<(), Error> {
        self.expect_toggle("set_active")?;
        if self.active == active {
            return Ok(());
        }
        self.active = active;
        self.queue_draw();
        Ok(())
    }

    fn expect_toggle(&self, op: &str) -> Result<(), Error> {
        if self.kind == ButtonKind::Toggle {
            return Ok(());
        }
        log::warn!("{op} called on a {:?} button", self.kind);
        Err(Error::NotToggle)
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Returns true if the button asked to be redrawn since the last call.
    pub fn take_redraw(&mut self) -> bool {
        let redraw = self.redraw;
        self.redraw = false;
        redraw
    }

    fn queue_draw(&mut self) {
        if self.kind != ButtonKind::Small {
            self.redraw = true;
        }
    }

    fn fire(&mut self, slot: Slot, event: &InputEvent) {
        let taken = match slot {
            Slot::Press => self.on_press.take(),
            Slot::Release => self.on_release.take(),
            Slot::RightClick => self.on_right_click.take(),
        };
        let Some(mut callback) = taken else {
            return;
        };

        callback(&*self, event);

        let target = match slot {
            Slot::Press => &mut self.on_press,
            Slot::Release => &mut self.on_release,
            Slot::RightClick => &mut self.on_right_click,
        };
        *target = Some(callback);
    }

    /// Feeds one event to the button. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Press(button, _) => {
                if !button.is_primary() {
                    return false;
                }
                self.pressed = true;
                self.fire(Slot::Press, event);
                self.queue_draw();
                true
            }
            InputEvent::Release(button, _) => {
                if button.is_secondary() && self.on_right_click.is_some() {
                    self.fire(Slot::RightClick, event);
                    return true;
                }
                if !button.is_primary() {
                    return false;
                }
                self.pressed = false;
                // Flips even when the pointer left before release.
                if self.kind == ButtonKind::Toggle {
                    self.active = !self.active;
                }
                self.fire(Slot::Release, event);
                self.queue_draw();
                true
            }
            InputEvent::Enter => {
                self.hover = true;
                if self.pressed {
                    self.queue_draw();
                }
                true
            }
            InputEvent::Leave => {
                self.hover = false;
                if self.pressed {
                    self.queue_draw();
                }
                true
            }
        }
    }

    /// The sheet rectangle the button currently shows, or `None` for small buttons.
    pub fn frame(&self) -> Option<Frame> {
        let faces = self.faces.as_ref()?;
        let down = self.hover && self.pressed;
        let (up, held) = if self.kind == ButtonKind::Toggle && self.active {
            (faces.active_up, faces.active_down)
        } else {
            (faces.up, faces.down)
        };
        let ((x, y), sheet) = if down {
            (held, faces.down_sheet)
        } else {
            (up, faces.up_sheet)
        };
        Some(Frame {
            sheet,
            x,
            y,
        })
    }
}

impl Widget for SkinnedButton {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn x(&self) -> i32 {
        self.x
    }

    fn y(&self) -> i32 {
        self.y
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    fn process_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMove(pos) | WindowEvent::CursorEnter(pos) => {
                let inside = point_in_rect(
                    pos.x as i32,
                    pos.y as i32,
                    self.x,
                    self.y,
                    self.width,
                    self.height,
                );
                match (inside, self.hover) {
                    (true, false) => self.handle_input(&InputEvent::Enter),
                    (false, true) => self.handle_input(&InputEvent::Leave),
                    _ => false,
                }
            }
            WindowEvent::CursorLeave if self.hover => self.handle_input(&InputEvent::Leave),
            WindowEvent::ButtonPress(button, mods) if self.hover => {
                self.handle_input(&InputEvent::Press(*button, *mods))
            }
            // A held button keeps receiving the release after the pointer leaves;
            // a release without a press here only matters for right clicks.
            WindowEvent::ButtonRelease(button, mods)
                if self.pressed || (button.is_secondary() && self.hover) =>
            {
                self.handle_input(&InputEvent::Release(*button, *mods))
            }
            _ => false,
        }
    }

    fn draw(&self, canvas: &mut Canvas, skin: &dyn SkinSource) {
        let Some(frame) = self.frame() else {
            return;
        };

        let mut face = match Canvas::new(self.width, self.height) {
            Ok(face) => face,
            Err(e) => {
                log::warn!("Cannot draw button: {e}");
                return;
            }
        };
        skin.draw_region(
            frame.sheet,
            frame.x,
            frame.y,
            &mut face,
            0,
            0,
            self.width,
            self.height,
        );
        canvas.draw_canvas(&face, self.x, self.y);
    }
}

impl fmt::Debug for SkinnedButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkinnedButton")
            .field("kind", &self.kind)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("hover", &self.hover)
            .field("pressed", &self.pressed)
            .field("active", &self.active)
            .field("on_press", &self.on_press.is_some())
            .field("on_release", &self.on_release.is_some())
            .field("on_right_click", &self.on_right_click.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::event::{CursorPos, Modifiers, MouseButton};

    const A: SkinPixmapId = SkinPixmapId::Cbuttons;
    const B: SkinPixmapId = SkinPixmapId::Shufrep;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::Press(button, Modifiers::empty())
    }

    fn release(button: MouseButton) -> InputEvent {
        InputEvent::Release(button, Modifiers::empty())
    }

    fn move_to(x: i16, y: i16) -> WindowEvent {
        WindowEvent::CursorMove(CursorPos::new(x, y))
    }

    fn window_press(button: MouseButton) -> WindowEvent {
        WindowEvent::ButtonPress(button, Modifiers::empty())
    }

    fn window_release(button: MouseButton) -> WindowEvent {
        WindowEvent::ButtonRelease(button, Modifiers::empty())
    }

    fn toggle() -> SkinnedButton {
        SkinnedButton::new_toggle(10, 10, 0, 0, 10, 0, 0, 10, 10, 10, A, B)
    }

    fn normal() -> SkinnedButton {
        SkinnedButton::new_normal(23, 18, 0, 0, 0, 18, A, B)
    }

    fn counter() -> (Rc<Cell<u32>>, ButtonCallback) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (
            count,
            Box::new(move |_: &SkinnedButton, _: &InputEvent| c.set(c.get() + 1)),
        )
    }

    fn click(button: &mut SkinnedButton) {
        button.handle_input(&press(MouseButton::Left));
        button.handle_input(&release(MouseButton::Left));
    }

    #[test]
    fn starts_idle() {
        for button in [normal(), toggle(), SkinnedButton::new_small(4, 4)] {
            assert!(!button.is_hovered());
            assert!(!button.is_pressed());
        }
        assert!(!toggle().active().unwrap());
    }

    #[test]
    fn primary_press_latches_and_fires_once() {
        let (count, cb) = counter();
        let mut button = normal();
        button.set_on_press(Some(cb));

        assert!(button.handle_input(&press(MouseButton::Left)));
        assert!(button.is_pressed());
        assert_eq!(count.get(), 1);
        assert!(button.take_redraw());
    }

    #[test]
    fn other_presses_are_ignored() {
        let (count, cb) = counter();
        let mut button = normal();
        button.set_on_press(Some(cb));

        assert!(!button.handle_input(&press(MouseButton::Right)));
        assert!(!button.handle_input(&press(MouseButton::Middle)));
        assert!(!button.is_pressed());
        assert_eq!(count.get(), 0);
        assert!(!button.take_redraw());
    }

    #[test]
    fn normal_release_never_activates() {
        let (count, cb) = counter();
        let mut button = normal();
        button.set_on_release(Some(cb));

        click(&mut button);
        assert!(!button.is_pressed());
        assert_eq!(count.get(), 1);
        assert!(matches!(button.active(), Err(Error::NotToggle)));
        assert_eq!(button.frame().map(|f| (f.x, f.y)), Some((0, 0)));
    }

    #[test]
    fn toggle_flips_on_each_click() {
        let mut button = toggle();
        click(&mut button);
        assert!(button.active().unwrap());
        click(&mut button);
        assert!(!button.active().unwrap());
    }

    #[test]
    fn toggle_flips_even_if_released_outside() {
        let mut button = toggle();
        button.handle_input(&InputEvent::Enter);
        button.handle_input(&press(MouseButton::Left));
        button.handle_input(&InputEvent::Leave);
        button.handle_input(&release(MouseButton::Left));
        assert!(button.active().unwrap());
    }

    #[test]
    fn right_release_only_fires_right_click() {
        let (rclicks, rcb) = counter();
        let (releases, cb) = counter();
        let mut button = toggle();
        button.set_on_right_click(Some(rcb));
        button.set_on_release(Some(cb));

        button.handle_input(&press(MouseButton::Left));
        button.take_redraw();
        assert!(button.handle_input(&release(MouseButton::Right)));
        assert_eq!(rclicks.get(), 1);
        assert_eq!(releases.get(), 0);
        assert!(button.is_pressed());
        assert!(!button.active().unwrap());
        assert!(!button.take_redraw());
    }

    #[test]
    fn right_release_without_handler_is_not_consumed() {
        let mut button = toggle();
        assert!(!button.handle_input(&release(MouseButton::Right)));
        assert!(!button.handle_input(&release(MouseButton::Middle)));
        assert!(!button.active().unwrap());
    }

    #[test]
    fn crossing_redraws_only_while_pressed() {
        let mut button = normal();
        assert!(button.handle_input(&InputEvent::Enter));
        assert!(!button.take_redraw());
        assert!(button.handle_input(&InputEvent::Leave));
        assert!(!button.take_redraw());

        button.handle_input(&press(MouseButton::Left));
        button.take_redraw();
        button.handle_input(&InputEvent::Enter);
        assert!(button.take_redraw());
        button.handle_input(&InputEvent::Leave);
        assert!(button.take_redraw());
    }

    #[test]
    fn set_active_skips_unchanged_values() {
        let mut button = toggle();
        button.set_active(true).unwrap();
        assert!(button.take_redraw());
        button.set_active(true).unwrap();
        assert!(!button.take_redraw());
        button.set_active(false).unwrap();
        assert!(button.take_redraw());
        assert!(!button.active().unwrap());
    }

    #[test]
    fn small_buttons_never_redraw() {
        let (count, cb) = counter();
        let mut button = SkinnedButton::new_small(8, 8);
        button.set_on_release(Some(cb));

        button.handle_input(&InputEvent::Enter);
        click(&mut button);
        button.handle_input(&press(MouseButton::Left));
        button.handle_input(&InputEvent::Leave);
        assert_eq!(count.get(), 1);
        assert!(!button.take_redraw());
        assert!(button.frame().is_none());
        assert!(matches!(button.active(), Err(Error::NotToggle)));
        assert!(matches!(button.set_active(true), Err(Error::NotToggle)));
    }

    #[test]
    fn normal_frame_selection() {
        let mut button = normal();
        let up = Frame {
            sheet: A,
            x: 0,
            y: 0,
        };
        let down = Frame {
            sheet: B,
            x: 0,
            y: 18,
        };

        assert_eq!(button.frame(), Some(up));
        button.handle_input(&press(MouseButton::Left));
        assert_eq!(button.frame(), Some(up), "pressed but not hovered");
        button.handle_input(&InputEvent::Enter);
        assert_eq!(button.frame(), Some(down));
    }

    #[test]
    fn active_toggle_frame_selection() {
        let mut button = toggle();
        button.set_active(true).unwrap();
        assert_eq!(
            button.frame(),
            Some(Frame {
                sheet: A,
                x: 0,
                y: 10
            })
        );
        button.handle_input(&press(MouseButton::Left));
        assert_eq!(button.frame().map(|f| (f.sheet, f.x, f.y)), Some((A, 0, 10)));
        button.handle_input(&InputEvent::Enter);
        assert_eq!(button.frame().map(|f| (f.sheet, f.x, f.y)), Some((B, 10, 10)));
    }

    #[test]
    fn worked_toggle_sequence() {
        let mut button = toggle();
        button.handle_input(&InputEvent::Enter);
        button.handle_input(&press(MouseButton::Left));
        assert_eq!(button.frame().map(|f| (f.sheet, f.x, f.y)), Some((B, 10, 0)));

        let (count, cb) = counter();
        button.set_on_release(Some(cb));
        button.handle_input(&release(MouseButton::Left));
        assert!(button.active().unwrap());
        assert_eq!(count.get(), 1);

        button.handle_input(&InputEvent::Leave);
        button.handle_input(&InputEvent::Enter);
        button.handle_input(&press(MouseButton::Left));
        assert_eq!(button.frame().map(|f| (f.sheet, f.x, f.y)), Some((B, 10, 10)));
    }

    #[test]
    fn callbacks_see_the_updated_button() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut button = toggle().on_release(move |b, e| {
            sink.borrow_mut().push((b.active().unwrap(), b.is_pressed(), *e));
        });

        click(&mut button);
        click(&mut button);
        assert_eq!(
            *seen.borrow(),
            vec![
                (true, false, release(MouseButton::Left)),
                (false, false, release(MouseButton::Left)),
            ]
        );
    }

    #[test]
    fn clearing_a_callback_stops_it() {
        let (count, cb) = counter();
        let mut button = normal();
        button.set_on_press(Some(cb));
        button.set_on_press(None);
        button.handle_input(&press(MouseButton::Left));
        assert_eq!(count.get(), 0);
        assert!(button.is_pressed());
    }

    #[test]
    fn window_events_are_hit_tested() {
        let mut button = normal().with_position(10, 10);
        assert!(!button.process_event(&move_to(0, 0)));
        assert!(button.process_event(&move_to(12, 12)));
        assert!(button.is_hovered());

        assert!(button.process_event(&window_press(MouseButton::Left)));
        assert!(button.process_event(&move_to(100, 100)));
        assert!(!button.is_hovered());
        assert!(button.process_event(&window_release(MouseButton::Left)));
        assert!(!button.is_pressed());

        assert!(!button.process_event(&window_press(MouseButton::Left)));
    }

    #[test]
    fn window_release_without_press_is_ignored() {
        let (count, cb) = counter();
        let mut button = toggle().with_position(0, 0);
        button.set_on_release(Some(cb));

        button.process_event(&move_to(5, 5));
        assert!(!button.process_event(&window_release(MouseButton::Left)));
        assert!(!button.active().unwrap());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn window_right_release_reaches_hovered_button() {
        let (count, cb) = counter();
        let mut button = toggle().with_position(0, 0);
        button.set_on_right_click(Some(cb));

        assert!(!button.process_event(&window_release(MouseButton::Right)));
        button.process_event(&move_to(5, 5));
        assert!(button.process_event(&window_release(MouseButton::Right)));
        assert_eq!(count.get(), 1);
        assert!(!button.active().unwrap());
    }
}
