//! A fixed-layout surface holding skinned buttons.
//!
//! The panel turns raw window events into per-button crossing and click
//! events. A button that receives a press keeps every further event until
//! the same mouse button is released, so a press that is dragged off a button
//! still ends with that button's release.

use crate::{
    event::{CursorPos, InputEvent, MouseButton, WindowEvent},
    render::Canvas,
    skin::{SkinPixmapId, SkinSource},
    ui::widgets::{
        Widget,
        button::{Frame, SkinnedButton},
    },
};

/// Index of a button inside its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(usize);

/// Held mouse button and the button that received its press, if any.
#[derive(Debug, Clone, Copy)]
struct Grab {
    target: Option<ButtonId>,
    button: MouseButton,
}

/// Buttons laid out on one surface. Later buttons sit on top of earlier ones.
pub struct Panel {
    width: u32,
    height: u32,
    background: Option<Frame>,
    buttons: Vec<SkinnedButton>,
    cursor: Option<CursorPos>,
    hovered: Option<ButtonId>,
    grab: Option<Grab>,
}

impl Panel {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            buttons: Vec::new(),
            cursor: None,
            hovered: None,
            grab: None,
        }
    }

    /// Fills the panel from a region of a skin sheet before buttons are drawn.
    pub fn with_background(mut self, sheet: SkinPixmapId, x: i32, y: i32) -> Self {
        self.background = Some(Frame {
            sheet,
            x,
            y,
        });
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn add(&mut self, mut button: SkinnedButton, x: i32, y: i32) -> ButtonId {
        button.set_position(x, y);
        self.buttons.push(button);
        ButtonId(self.buttons.len() - 1)
    }

    pub fn button(&self, id: ButtonId) -> Option<&SkinnedButton> {
        self.buttons.get(id.0)
    }

    pub fn button_mut(&mut self, id: ButtonId) -> Option<&mut SkinnedButton> {
        self.buttons.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    fn topmost_at(&self, pos: CursorPos) -> Option<ButtonId> {
        self.buttons
            .iter()
            .rposition(|b| b.contains(pos.x as i32, pos.y as i32))
            .map(ButtonId)
    }

    fn send(&mut self, id: ButtonId, event: InputEvent) -> bool {
        match self.buttons.get_mut(id.0) {
            Some(button) => button.handle_input(&event),
            None => false,
        }
    }

    fn update_hover(&mut self, pos: Option<CursorPos>) -> bool {
        if let Some(grab) = self.grab {
            // Only the grabbing button sees crossings while a press is held.
            let Some(id) = grab.target else {
                return false;
            };
            let inside = match (pos, self.buttons.get(id.0)) {
                (Some(pos), Some(b)) => b.contains(pos.x as i32, pos.y as i32),
                _ => false,
            };
            let hovered = self.buttons.get(id.0).is_some_and(|b| b.is_hovered());
            self.hovered = inside.then_some(id);
            return match (inside, hovered) {
                (true, false) => self.send(id, InputEvent::Enter),
                (false, true) => self.send(id, InputEvent::Leave),
                _ => false,
            };
        }

        let target = pos.and_then(|p| self.topmost_at(p));
        if target == self.hovered {
            return false;
        }

        let mut handled = false;
        if let Some(old) = self.hovered.take() {
            handled |= self.send(old, InputEvent::Leave);
        }
        if let Some(new) = target {
            handled |= self.send(new, InputEvent::Enter);
        }
        self.hovered = target;
        handled
    }

    /// Routes a window event to the buttons. Returns true if any button consumed it.
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        match *event {
            WindowEvent::CursorEnter(pos) | WindowEvent::CursorMove(pos) => {
                self.cursor = Some(pos);
                self.update_hover(Some(pos))
            }
            WindowEvent::CursorLeave => {
                self.cursor = None;
                self.update_hover(None)
            }
            WindowEvent::ButtonPress(button, mods) => {
                let target = match self.grab {
                    Some(grab) => grab.target,
                    None => {
                        // A press on empty space grabs too, so its release reaches nobody.
                        self.grab = Some(Grab {
                            target: self.hovered,
                            button,
                        });
                        self.hovered
                    }
                };
                match target {
                    Some(id) => self.send(id, InputEvent::Press(button, mods)),
                    None => false,
                }
            }
            WindowEvent::ButtonRelease(button, mods) => {
                let Some(grab) = self.grab else {
                    return false;
                };
                let handled = match grab.target {
                    Some(id) => self.send(id, InputEvent::Release(button, mods)),
                    None => false,
                };
                if grab.button == button {
                    self.grab = None;
                    self.update_hover(self.cursor);
                }
                handled
            }
        }
    }

    /// Returns true if any button asked to be redrawn.
    pub fn needs_redraw(&self) -> bool {
        self.buttons.iter().any(|b| b.redraw_pending())
    }

    fn draw_background(&self, canvas: &mut Canvas, skin: &dyn SkinSource, rect: Rect) {
        if let Some(bg) = self.background {
            let (x, y, w, h) = rect;
            skin.draw_region(bg.sheet, bg.x + x, bg.y + y, canvas, x, y, w, h);
        }
    }

    /// Draws the panel onto `canvas`. With `full` set everything is painted;
    /// otherwise buttons with a pending redraw are repainted together with every
    /// visible button overlapping them. Returns the number of buttons painted.
    pub fn draw(&mut self, canvas: &mut Canvas, skin: &dyn SkinSource, full: bool) -> usize {
        let pending: Vec<bool> = self.buttons.iter_mut().map(|b| b.take_redraw()).collect();
        let visible: Vec<bool> = self.buttons.iter().map(|b| b.frame().is_some()).collect();

        let mut repaint: Vec<bool> = (0..self.buttons.len())
            .map(|i| visible[i] && (full || pending[i]))
            .collect();

        if full {
            self.draw_background(canvas, skin, (0, 0, self.width, self.height));
        } else {
            // Grow the damaged set until no visible button straddles its edge.
            let mut changed = true;
            while changed {
                changed = false;
                for i in 0..self.buttons.len() {
                    if repaint[i] || !visible[i] {
                        continue;
                    }
                    let r = bounds(&self.buttons[i]);
                    let touches = (0..self.buttons.len())
                        .any(|j| repaint[j] && intersects(r, bounds(&self.buttons[j])));
                    if touches {
                        repaint[i] = true;
                        changed = true;
                    }
                }
            }
            for (button, _) in self.buttons.iter().zip(&repaint).filter(|(_, r)| **r) {
                self.draw_background(canvas, skin, bounds(button));
            }
        }

        let mut painted = 0;
        for (button, _) in self.buttons.iter().zip(&repaint).filter(|(_, r)| **r) {
            button.draw(canvas, skin);
            painted += 1;
        }
        painted
    }
}

type Rect = (i32, i32, u32, u32);

fn bounds(button: &SkinnedButton) -> Rect {
    (button.x(), button.y(), button.width(), button.height())
}

fn intersects(a: Rect, b: Rect) -> bool {
    a.0 < b.0 + b.2 as i32
        && b.0 < a.0 + a.2 as i32
        && a.1 < b.1 + b.3 as i32
        && b.1 < a.1 + a.3 as i32
}
