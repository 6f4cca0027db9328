use std::cell::RefCell;
use std::rc::Rc;

use skinbutton::{
    ActiveSkin, Canvas, InputEvent, Modifiers, MouseButton, Rgba, Skin, SkinPixmapId,
    SkinnedButton, Widget, rgb,
};

const A: SkinPixmapId = SkinPixmapId::Cbuttons;
const B: SkinPixmapId = SkinPixmapId::Shufrep;

/// A 20x20 sheet split into four 10x10 cells of the given colors,
/// ordered top-left, top-right, bottom-left, bottom-right.
fn sheet(cells: [Rgba; 4]) -> Canvas {
    let mut sheet = Canvas::new(20, 20).unwrap();
    for (i, color) in cells.into_iter().enumerate() {
        let mut cell = Canvas::new(10, 10).unwrap();
        cell.fill(color);
        sheet.draw_canvas(&cell, (i as i32 % 2) * 10, (i as i32 / 2) * 10);
    }
    sheet
}

fn make_skin(a: [Rgba; 4], b: [Rgba; 4]) -> Skin {
    let mut skin = Skin::new();
    skin.insert(A, sheet(a).into_pixmap());
    skin.insert(B, sheet(b).into_pixmap());
    skin
}

fn render(button: &SkinnedButton, skin: &ActiveSkin) -> Option<Rgba> {
    let mut canvas = Canvas::new(10, 10).unwrap();
    button.draw(&mut canvas, skin);
    canvas.pixel(5, 5)
}

fn left(press: bool) -> InputEvent {
    if press {
        InputEvent::Press(MouseButton::Left, Modifiers::empty())
    } else {
        InputEvent::Release(MouseButton::Left, Modifiers::empty())
    }
}

const A_CELLS: [Rgba; 4] = [rgb(10, 0, 0), rgb(20, 0, 0), rgb(30, 0, 0), rgb(40, 0, 0)];
const B_CELLS: [Rgba; 4] = [rgb(0, 10, 0), rgb(0, 20, 0), rgb(0, 30, 0), rgb(0, 40, 0)];

#[test]
fn toggle_walkthrough_renders_each_face() {
    let skin = ActiveSkin::new(make_skin(A_CELLS, B_CELLS));
    let releases = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&releases);
    let mut button = SkinnedButton::new_toggle(10, 10, 0, 0, 10, 0, 0, 10, 10, 10, A, B)
        .on_release(move |b, _| sink.borrow_mut().push(b.active().unwrap()));

    assert_eq!(render(&button, &skin), Some(A_CELLS[0]));

    button.handle_input(&InputEvent::Enter);
    button.handle_input(&left(true));
    assert_eq!(render(&button, &skin), Some(B_CELLS[1]));

    button.handle_input(&left(false));
    assert_eq!(*releases.borrow(), vec![true]);
    assert_eq!(render(&button, &skin), Some(A_CELLS[2]));

    button.handle_input(&InputEvent::Leave);
    button.handle_input(&InputEvent::Enter);
    button.handle_input(&left(true));
    assert_eq!(render(&button, &skin), Some(B_CELLS[3]));

    button.handle_input(&InputEvent::Leave);
    assert_eq!(render(&button, &skin), Some(A_CELLS[2]), "pointer left while held");
}

#[test]
fn drawing_uses_the_skin_current_at_draw_time() {
    let skin = ActiveSkin::new(make_skin(A_CELLS, B_CELLS));
    let host_handle = skin.clone();
    let button = SkinnedButton::new_normal(10, 10, 10, 10, 0, 0, A, B).with_position(0, 0);

    assert_eq!(render(&button, &skin), Some(A_CELLS[3]));

    let swapped = [rgb(1, 1, 1), rgb(2, 2, 2), rgb(3, 3, 3), rgb(4, 4, 4)];
    host_handle.replace(make_skin(swapped, B_CELLS));
    assert_eq!(render(&button, &skin), Some(rgb(4, 4, 4)));
}

#[test]
fn buttons_draw_at_their_position() {
    let skin = ActiveSkin::new(make_skin(A_CELLS, B_CELLS));
    let mut button = SkinnedButton::new_normal(10, 10, 0, 0, 10, 0, A, B);
    button.set_position(30, 5);

    let mut canvas = Canvas::new(50, 20).unwrap();
    button.draw(&mut canvas, &skin);
    assert_eq!(canvas.pixel(30, 5), Some(A_CELLS[0]));
    assert_eq!(canvas.pixel(39, 14), Some(A_CELLS[0]));
    assert_eq!(canvas.pixel(29, 5), Some(Rgba::TRANSPARENT));
    assert_eq!(canvas.pixel(40, 5), Some(Rgba::TRANSPARENT));
}

#[test]
fn small_buttons_paint_nothing() {
    let skin = ActiveSkin::new(make_skin(A_CELLS, B_CELLS));
    let mut button = SkinnedButton::new_small(10, 10);
    button.handle_input(&InputEvent::Enter);
    button.handle_input(&left(true));
    assert_eq!(render(&button, &skin), Some(Rgba::TRANSPARENT));
}

#[test]
fn missing_sheet_leaves_the_face_blank() {
    let mut only_a = Skin::new();
    only_a.insert(A, sheet(A_CELLS).into_pixmap());
    let skin = ActiveSkin::new(only_a);

    let mut button = SkinnedButton::new_normal(10, 10, 0, 0, 10, 0, A, B);
    button.handle_input(&InputEvent::Enter);
    button.handle_input(&left(true));
    assert_eq!(render(&button, &skin), Some(Rgba::TRANSPARENT));
}
