use std::path::Path;

use tiny_skia::{BlendMode, Color, IntRect, Pixmap, PixmapPaint, PixmapRef, Transform};

use crate::error::Error;

/// A drawing surface backed by a tiny-skia Pixmap.
/// Pixels are stored premultiplied RGBA.
pub struct Canvas {
    pub(crate) pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        Pixmap::new(width, height)
            .map(|pixmap| Self {
                pixmap,
            })
            .ok_or(Error::InvalidSize {
                width,
                height,
            })
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            pixmap,
        }
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn as_pixmap(&self) -> PixmapRef<'_> {
        self.pixmap.as_ref()
    }

    /// Fills the entire canvas with a color.
    pub fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(color.into());
    }

    /// Replaces a `width` x `height` block of this canvas at (`dst_x`, `dst_y`)
    /// with the pixels of `src` at (`src_x`, `src_y`).
    ///
    /// The source rectangle is clipped to the bounds of `src`; destination pixels
    /// outside the clipped area are left alone. Alpha is copied, not blended.
    #[allow(clippy::too_many_arguments)]
    pub fn copy_region(
        &mut self,
        src: PixmapRef,
        src_x: i32,
        src_y: i32,
        dst_x: i32,
        dst_y: i32,
        width: u32,
        height: u32,
    ) {
        let x0 = src_x.max(0);
        let y0 = src_y.max(0);
        let x1 = src_x.saturating_add(width as i32).min(src.width() as i32);
        let y1 = src_y.saturating_add(height as i32).min(src.height() as i32);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        let Some(rect) = IntRect::from_xywh(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32) else {
            return;
        };
        let Some(region) = src.clone_rect(rect) else {
            return;
        };

        let paint = PixmapPaint {
            blend_mode: BlendMode::Source,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            dst_x + (x0 - src_x),
            dst_y + (y0 - src_y),
            region.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
    }

    /// Draws another canvas onto this one at the given position.
    pub fn draw_canvas(&mut self, other: &Canvas, x: i32, y: i32) {
        self.draw_pixmap(other.pixmap.as_ref(), x, y);
    }

    /// Draws a pixmap onto this canvas at the given position.
    pub fn draw_pixmap(&mut self, src: PixmapRef, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            src,
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Reads back one pixel, un-premultiplied.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Encodes the canvas as PNG and writes it to `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), Error> {
        let data = self
            .pixmap
            .encode_png()
            .map_err(|e| Error::Encode(e.to_string()))?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
        }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: 255,
        }
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

/// Convenience function to create an RGB color.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    Rgba::rgb(r, g, b)
}
