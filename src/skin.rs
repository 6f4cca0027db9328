//! Skin pixmap sheets and the lookup interface widgets render from.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tiny_skia::Pixmap;

use crate::error::Error;
use crate::render::Canvas;

/// Identifies one pixmap sheet of a skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinPixmapId {
    Main,
    Cbuttons,
    Titlebar,
    Shufrep,
    Text,
    Volume,
    Balance,
    Monostereo,
    Playpause,
    Numbers,
    Posbar,
    Pledit,
    Eqmain,
    EqEx,
}

impl SkinPixmapId {
    pub const ALL: [SkinPixmapId; 14] = [
        SkinPixmapId::Main,
        SkinPixmapId::Cbuttons,
        SkinPixmapId::Titlebar,
        SkinPixmapId::Shufrep,
        SkinPixmapId::Text,
        SkinPixmapId::Volume,
        SkinPixmapId::Balance,
        SkinPixmapId::Monostereo,
        SkinPixmapId::Playpause,
        SkinPixmapId::Numbers,
        SkinPixmapId::Posbar,
        SkinPixmapId::Pledit,
        SkinPixmapId::Eqmain,
        SkinPixmapId::EqEx,
    ];

    /// File stems tried, in order, when loading this sheet from a skin directory.
    pub fn stems(self) -> &'static [&'static str] {
        match self {
            SkinPixmapId::Main => &["main"],
            SkinPixmapId::Cbuttons => &["cbuttons"],
            SkinPixmapId::Titlebar => &["titlebar"],
            SkinPixmapId::Shufrep => &["shufrep"],
            SkinPixmapId::Text => &["text"],
            SkinPixmapId::Volume => &["volume"],
            SkinPixmapId::Balance => &["balance", "volume"],
            SkinPixmapId::Monostereo => &["monoster"],
            SkinPixmapId::Playpause => &["playpaus"],
            SkinPixmapId::Numbers => &["nums_ex", "numbers"],
            SkinPixmapId::Posbar => &["posbar"],
            SkinPixmapId::Pledit => &["pledit"],
            SkinPixmapId::Eqmain => &["eqmain"],
            SkinPixmapId::EqEx => &["eq_ex"],
        }
    }

    pub fn stem(self) -> &'static str {
        self.stems()[0]
    }

    /// Looks a sheet up by any of its file stems, ignoring case. A stem shared
    /// as a fallback resolves to the sheet that lists it first.
    pub fn from_stem(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.stem() == name)
            .or_else(|| Self::ALL.into_iter().find(|id| id.stems().contains(&name.as_str())))
    }
}

impl fmt::Display for SkinPixmapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Source of skin pixels.
pub trait SkinSource {
    /// Copies the `width` x `height` region at (`src_x`, `src_y`) of sheet `id`
    /// into `dst` at (`dst_x`, `dst_y`). Missing sheets draw nothing.
    #[allow(clippy::too_many_arguments)]
    fn draw_region(
        &self,
        id: SkinPixmapId,
        src_x: i32,
        src_y: i32,
        dst: &mut Canvas,
        dst_x: i32,
        dst_y: i32,
        width: u32,
        height: u32,
    );
}

/// A loaded skin: one pixmap per sheet id.
#[derive(Default)]
pub struct Skin {
    sheets: HashMap<SkinPixmapId, Pixmap>,
}

impl Skin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sheets(sheets: impl IntoIterator<Item = (SkinPixmapId, Pixmap)>) -> Self {
        Self {
            sheets: sheets.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, id: SkinPixmapId, pixmap: Pixmap) -> Option<Pixmap> {
        self.sheets.insert(id, pixmap)
    }

    pub fn sheet(&self, id: SkinPixmapId) -> Option<&Pixmap> {
        self.sheets.get(&id)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Loads every `<stem>.png` found in `dir`. File names are matched without
    /// regard to case. The main sheet is required; all others are optional.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        log::info!("Loading skin from {}", dir.display());

        let mut files: HashMap<String, PathBuf> = HashMap::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.insert(name.to_ascii_lowercase(), path.clone());
            }
        }

        let mut skin = Skin::new();
        for id in SkinPixmapId::ALL {
            let found = id
                .stems()
                .iter()
                .find_map(|stem| files.get(&format!("{stem}.png")));
            let Some(path) = found else {
                log::debug!("Skin has no '{id}' sheet");
                continue;
            };

            let data = std::fs::read(path)?;
            let pixmap = Pixmap::decode_png(&data).map_err(|e| Error::Decode {
                path: path.clone(),
                message: e.to_string(),
            })?;
            log::debug!(
                "Loaded sheet '{id}' ({}x{}) from {}",
                pixmap.width(),
                pixmap.height(),
                path.display()
            );
            skin.insert(id, pixmap);
        }

        if skin.sheet(SkinPixmapId::Main).is_none() {
            return Err(Error::MissingSheet(SkinPixmapId::Main));
        }

        log::info!("Skin loaded with {} sheets", skin.len());
        Ok(skin)
    }
}

impl SkinSource for Skin {
    fn draw_region(
        &self,
        id: SkinPixmapId,
        src_x: i32,
        src_y: i32,
        dst: &mut Canvas,
        dst_x: i32,
        dst_y: i32,
        width: u32,
        height: u32,
    ) {
        match self.sheets.get(&id) {
            Some(sheet) => {
                dst.copy_region(sheet.as_ref(), src_x, src_y, dst_x, dst_y, width, height)
            }
            None => log::debug!("Sheet '{id}' not in skin, region left blank"),
        }
    }
}

/// Shared, swappable handle to the skin currently in use.
///
/// Clones share the same slot, so replacing the skin through one handle is seen
/// by every widget drawn through another.
#[derive(Clone, Default)]
pub struct ActiveSkin {
    current: Rc<RefCell<Rc<Skin>>>,
}

impl ActiveSkin {
    pub fn new(skin: Skin) -> Self {
        Self {
            current: Rc::new(RefCell::new(Rc::new(skin))),
        }
    }

    pub fn current(&self) -> Rc<Skin> {
        Rc::clone(&self.current.borrow())
    }

    /// Installs `skin` and returns the one it replaces.
    pub fn replace(&self, skin: Skin) -> Rc<Skin> {
        self.current.replace(Rc::new(skin))
    }
}

impl SkinSource for ActiveSkin {
    fn draw_region(
        &self,
        id: SkinPixmapId,
        src_x: i32,
        src_y: i32,
        dst: &mut Canvas,
        dst_x: i32,
        dst_y: i32,
        width: u32,
        height: u32,
    ) {
        self.current()
            .draw_region(id, src_x, src_y, dst, dst_x, dst_y, width, height);
    }
}
