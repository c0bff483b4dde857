//! Bitmap rendering of a laid-out page.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::{Rgb as Pixel, RgbImage};
use rusttype::{point, Font, Scale};

use crate::export::ExportError;
use crate::render::tree::Rgb;
use crate::render::{LaidOutPage, PaintOp};

/// Upper bound on the rasterized pixel count (about 400 MB of RGB).
const MAX_PIXELS: u64 = 133_000_000;

/// Something that can be drawn at an integer multiple of its natural size.
pub trait RenderSurface: Send + 'static {
    /// Full content size in px, never clipped to a viewport.
    fn natural_size(&self) -> (u32, u32);

    fn rasterize(&self, scale: u32) -> Result<RgbImage, ExportError>;
}

pub struct PageSurface {
    page: LaidOutPage,
    font: Arc<Font<'static>>,
}

impl PageSurface {
    pub fn new(page: LaidOutPage, font: Arc<Font<'static>>) -> Self {
        Self { page, font }
    }
}

impl RenderSurface for PageSurface {
    fn natural_size(&self) -> (u32, u32) {
        (
            self.page.width.ceil() as u32,
            self.page.height.ceil() as u32,
        )
    }

    fn rasterize(&self, scale: u32) -> Result<RgbImage, ExportError> {
        let (width, height) = self.natural_size();
        let (width, height) = (width * scale, height * scale);
        if width == 0 || height == 0 {
            return Err(ExportError::EmptySurface);
        }
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(ExportError::SurfaceTooLarge { width, height });
        }

        let s = scale as f32;
        let mut img = RgbImage::from_pixel(width, height, pixel(self.page.background));
        for op in &self.page.ops {
            match op {
                PaintOp::Rect { x, y, w, h, color } => {
                    fill_rect(&mut img, x * s, y * s, w * s, h * s, *color)
                }
                PaintOp::Text {
                    x,
                    y,
                    text,
                    size,
                    bold,
                    color,
                } => {
                    let pen = TextPen {
                        font: &self.font,
                        size: size * s,
                        color: *color,
                    };
                    pen.draw(&mut img, text, x * s, y * s);
                    if *bold {
                        pen.draw(&mut img, text, x * s + (s * 0.5).max(1.0), y * s);
                    }
                }
            }
        }
        Ok(img)
    }
}

/// Reads a TrueType/OpenType font from disk.
pub fn load_font(path: impl AsRef<Path>) -> Result<Font<'static>> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read font '{}'", path.display()))?;
    Font::try_from_vec(bytes)
        .with_context(|| format!("'{}' is not a usable font file", path.display()))
}

fn pixel(color: Rgb) -> Pixel<u8> {
    Pixel([color.0, color.1, color.2])
}

fn fill_rect(img: &mut RgbImage, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
    let x0 = x.round().max(0.0) as u32;
    let y0 = y.round().max(0.0) as u32;
    let x1 = ((x + w).round().max(0.0) as u32).min(img.width());
    let y1 = ((y + h).round().max(0.0) as u32).min(img.height());
    let px = pixel(color);
    for py in y0..y1 {
        for qx in x0..x1 {
            img.put_pixel(qx, py, px);
        }
    }
}

struct TextPen<'f> {
    font: &'f Font<'static>,
    size: f32,
    color: Rgb,
}

impl TextPen<'_> {
    /// `top` is the top of a line box of height `size * 1.4`; the glyphs are
    /// centred in it vertically.
    fn draw(&self, img: &mut RgbImage, text: &str, left: f32, top: f32) {
        let scale = Scale::uniform(self.size);
        let v = self.font.v_metrics(scale);
        let line_height = self.size * 1.4;
        let baseline = top + (line_height - (v.ascent - v.descent)) / 2.0 + v.ascent;

        let (width, height) = img.dimensions();
        for glyph in self.font.layout(text, scale, point(left, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let under = img.get_pixel_mut(px as u32, py as u32);
                *under = blend(*under, self.color, coverage);
            });
        }
    }
}

fn blend(under: Pixel<u8>, over: Rgb, coverage: f32) -> Pixel<u8> {
    let t = coverage.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Pixel([
        mix(under.0[0], over.0),
        mix(under.0[1], over.1),
        mix(under.0[2], over.2),
    ])
}
