//! skinbutton - Replay pointer events against a skinned button and dump each frame.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lexopt::prelude::*;

use skinbutton::{
    ActiveSkin, ButtonKind, Canvas, InputEvent, Modifiers, MouseButton, Skin, SkinPixmapId,
    SkinnedButton, Widget,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("skinbutton: {e}");
            ExitCode::from(100)
        }
    }
}

fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let mut parser = lexopt::Parser::from_env();

    let mut skin_dir: Option<PathBuf> = None;
    let mut output = PathBuf::from(".");
    let mut kind = ButtonKind::Normal;
    let mut size = (23, 18);
    let mut normal = (0, 0);
    let mut pressed = (0, 0);
    let mut active_normal = (0, 0);
    let mut active_pressed = (0, 0);
    let mut sheets = (SkinPixmapId::Cbuttons, SkinPixmapId::Cbuttons);
    let mut start_active = false;
    let mut events: Vec<InputEvent> = Vec::new();

    while let Some(arg) = parser.next()? {
        match arg {
            Long("help") | Short('h') => {
                print_help();
                return Ok(0);
            }
            Long("version") => {
                println!("skinbutton {VERSION}");
                return Ok(0);
            }

            Long("skin") => skin_dir = Some(parser.value()?.into()),
            Long("output") | Short('o') => output = parser.value()?.into(),
            Long("kind") => kind = parse_kind(&parser.value()?.string()?)?,
            Long("size") => size = parse_size(&parser.value()?.string()?)?,
            Long("normal") => normal = parse_point(&parser.value()?.string()?)?,
            Long("pressed") => pressed = parse_point(&parser.value()?.string()?)?,
            Long("active-normal") => active_normal = parse_point(&parser.value()?.string()?)?,
            Long("active-pressed") => active_pressed = parse_point(&parser.value()?.string()?)?,
            Long("sheets") => sheets = parse_sheets(&parser.value()?.string()?)?,
            Long("active") => start_active = true,
            Long("events") => events = parse_events(&parser.value()?.string()?)?,

            _ => return Err(arg.unexpected().into()),
        }
    }

    let skin_dir = match skin_dir.or_else(default_skin_dir) {
        Some(dir) => dir,
        None => return Err("no --skin given and no data directory available".into()),
    };
    let skin = ActiveSkin::new(Skin::load(&skin_dir)?);

    let (width, height) = size;
    let mut button = match kind {
        ButtonKind::Normal => SkinnedButton::new_normal(
            width, height, normal.0, normal.1, pressed.0, pressed.1, sheets.0, sheets.1,
        ),
        ButtonKind::Toggle => SkinnedButton::new_toggle(
            width,
            height,
            normal.0,
            normal.1,
            pressed.0,
            pressed.1,
            active_normal.0,
            active_normal.1,
            active_pressed.0,
            active_pressed.1,
            sheets.0,
            sheets.1,
        ),
        ButtonKind::Small => SkinnedButton::new_small(width, height),
    }
    .on_press(|_, _| println!("callback: press"))
    .on_release(|b, _| match b.active() {
        Ok(active) => println!("callback: release (active={active})"),
        Err(_) => println!("callback: release"),
    })
    .on_right_click(|_, _| println!("callback: right-click"));

    if start_active {
        button.set_active(true)?;
        button.take_redraw();
    }

    std::fs::create_dir_all(&output)?;
    let mut frame = 0;
    if kind != ButtonKind::Small {
        write_frame(&button, &skin, &output, frame, "initial")?;
    }

    for event in &events {
        let handled = button.handle_input(event);
        log::debug!("{event:?} handled={handled}");
        if button.take_redraw() {
            frame += 1;
            write_frame(&button, &skin, &output, frame, event_name(event))?;
        }
    }

    Ok(0)
}

fn write_frame(
    button: &SkinnedButton,
    skin: &ActiveSkin,
    dir: &Path,
    index: u32,
    label: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut canvas = Canvas::new(button.width(), button.height())?;
    button.draw(&mut canvas, skin);
    let path = dir.join(format!("frame-{index:03}-{label}.png"));
    canvas.save_png(&path)?;
    println!("{}", path.display());
    Ok(())
}

fn default_skin_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("skinbutton").join("skin"))
}

fn parse_kind(s: &str) -> Result<ButtonKind, Box<dyn std::error::Error>> {
    match s {
        "normal" => Ok(ButtonKind::Normal),
        "toggle" => Ok(ButtonKind::Toggle),
        "small" => Ok(ButtonKind::Small),
        _ => Err(format!("unknown button kind: {s}").into()),
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), Box<dyn std::error::Error>> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s}"))?;
    Ok((w.trim().parse()?, h.trim().parse()?))
}

fn parse_point(s: &str) -> Result<(i32, i32), Box<dyn std::error::Error>> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s}"))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

fn parse_sheets(s: &str) -> Result<(SkinPixmapId, SkinPixmapId), Box<dyn std::error::Error>> {
    let sheet = |name: &str| {
        SkinPixmapId::from_stem(name.trim()).ok_or_else(|| format!("unknown sheet: {name}"))
    };
    match s.split_once(',') {
        Some((a, b)) => Ok((sheet(a)?, sheet(b)?)),
        None => {
            let id = sheet(s)?;
            Ok((id, id))
        }
    }
}

fn parse_events(s: &str) -> Result<Vec<InputEvent>, Box<dyn std::error::Error>> {
    let none = Modifiers::empty();
    s.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| -> Result<InputEvent, Box<dyn std::error::Error>> {
            match name {
                "enter" => Ok(InputEvent::Enter),
                "leave" => Ok(InputEvent::Leave),
                "press" => Ok(InputEvent::Press(MouseButton::Left, none)),
                "release" => Ok(InputEvent::Release(MouseButton::Left, none)),
                "mpress" => Ok(InputEvent::Press(MouseButton::Middle, none)),
                "mrelease" => Ok(InputEvent::Release(MouseButton::Middle, none)),
                "rpress" => Ok(InputEvent::Press(MouseButton::Right, none)),
                "rrelease" => Ok(InputEvent::Release(MouseButton::Right, none)),
                _ => Err(format!("unknown event: {name}").into()),
            }
        })
        .collect()
}

fn event_name(event: &InputEvent) -> &'static str {
    let primary = event.button().is_some_and(MouseButton::is_primary);
    match event {
        InputEvent::Enter => "enter",
        InputEvent::Leave => "leave",
        InputEvent::Press(..) if primary => "press",
        InputEvent::Release(..) if primary => "release",
        InputEvent::Press(..) => "other-press",
        InputEvent::Release(..) => "other-release",
    }
}

fn print_help() {
    println!(
        r#"skinbutton {VERSION} - Replay pointer events against a skinned button

USAGE:
    skinbutton [OPTIONS] --events LIST

OPTIONS:
    --skin DIR              Skin directory holding <sheet>.png files
                            (default: <data dir>/skinbutton/skin)
    -o, --output DIR        Directory for rendered frames (default: .)
    --kind KIND             normal, toggle or small (default: normal)
    --size WxH              Button size in pixels (default: 23x18)
    --normal X,Y            Released face origin
    --pressed X,Y           Held face origin
    --active-normal X,Y     Released face origin while switched on (toggle)
    --active-pressed X,Y    Held face origin while switched on (toggle)
    --sheets A[,B]          Sheets for released and held faces (default: cbuttons)
    --active                Start a toggle button switched on
    --events LIST           Comma-separated events: enter, leave, press, release,
                            mpress, mrelease, rpress, rrelease
    -h, --help              Print this help message
    --version               Print version information

Every event that changes the button's look writes frame-NNN-<event>.png.

EXAMPLES:
    skinbutton --skin ~/skins/base --normal 23,0 --pressed 23,18 --events enter,press,release
    skinbutton --kind toggle --sheets shufrep --size 28x15 \
        --normal 0,0 --pressed 46,0 --active-normal 0,30 --active-pressed 46,30 \
        --events enter,press,release,press,release

EXIT CODES:
    0   Success
    100 Error occurred
"#
    );
}
