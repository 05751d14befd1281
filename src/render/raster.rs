//! Bitmap renderer for the on-screen pass.

use crate::render::layout::{Align, Element, PassLayout, RectMm, Rgb, Weight};
use crate::render::pattern::{CodePattern, GRID_SIZE};
use crate::utils::error::Result;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

const MM_PER_PT: f32 = 0.352_778;
/// font8x8 glyphs leave their eighth column blank; advancing by seven keeps text tight.
const GLYPH_ADVANCE: f32 = 7.0;
const BULLET: [u8; 8] = [0x00, 0x00, 0x00, 0x18, 0x18, 0x00, 0x00, 0x00];

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

#[derive(Debug, Clone)]
pub struct Rasterizer {
    px_per_mm: u32,
    logo: Option<RgbaImage>,
}

impl Rasterizer {
    pub fn new(px_per_mm: u32) -> Self {
        Self {
            px_per_mm: px_per_mm.max(1),
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: RgbaImage) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn with_logo_file(self, path: &Path) -> Result<Self> {
        let logo = image::open(path)?.to_rgba8();
        tracing::debug!("Loaded logo {} ({}x{})", path.display(), logo.width(), logo.height());
        Ok(self.with_logo(logo))
    }

    pub fn px_per_mm(&self) -> u32 {
        self.px_per_mm
    }

    fn px(&self, mm: f32) -> i64 {
        (mm * self.px_per_mm as f32).round() as i64
    }

    fn px_len(&self, mm: f32) -> u32 {
        self.px(mm).max(1) as u32
    }

    /// Rasterizes the card region of `layout`; element positions are taken relative to the card.
    pub fn render_pass(&self, layout: &PassLayout, pattern: &CodePattern) -> RgbaImage {
        let card = layout.card;
        let mut canvas = RgbaImage::from_pixel(
            self.px_len(card.width),
            self.px_len(card.height),
            rgba(layout.background),
        );
        let local = |rect: &RectMm| RectMm::new(rect.x - card.x, rect.y - card.y, rect.width, rect.height);

        for element in &layout.elements {
            match element {
                Element::Block { rect, color } => {
                    let rect = local(rect);
                    fill_rect(
                        &mut canvas,
                        self.px(rect.x),
                        self.px(rect.y),
                        self.px_len(rect.width),
                        self.px_len(rect.height),
                        *color,
                    );
                }
                Element::Logo { rect } => {
                    let logo = self.render_logo(rect.width, rect.height);
                    let rect = local(rect);
                    imageops::overlay(&mut canvas, &logo, self.px(rect.x), self.px(rect.y));
                }
                Element::Text {
                    x,
                    baseline,
                    text,
                    size_pt,
                    weight,
                    color,
                    align,
                } => {
                    let scale = self.glyph_scale(*size_pt);
                    let width = text_width_px(text, scale);
                    let x_px = self.px(x - card.x);
                    let left = match align {
                        Align::Left => x_px,
                        Align::Right => x_px - width,
                    };
                    draw_text(
                        &mut canvas,
                        left,
                        self.px(baseline - card.y),
                        text,
                        scale,
                        *weight,
                        *color,
                    );
                }
                Element::Rule { x1, x2, y, color } => {
                    let thickness = (self.px_per_mm / 4).max(1);
                    fill_rect(
                        &mut canvas,
                        self.px(x1 - card.x),
                        self.px(y - card.y),
                        self.px_len(x2 - x1),
                        thickness,
                        *color,
                    );
                }
                Element::CodePattern { rect } => {
                    let code = self.render_code_pattern(pattern, rect.width);
                    let rect = local(rect);
                    imageops::overlay(&mut canvas, &code, self.px(rect.x), self.px(rect.y));
                }
            }
        }

        canvas
    }

    /// The code pattern on its own: a light tile holding a dark grid of lit and unlit cells.
    pub fn render_code_pattern(&self, pattern: &CodePattern, size_mm: f32) -> RgbaImage {
        let size = self.px_len(size_mm);
        let mut tile = RgbaImage::from_pixel(size, size, rgba(Rgb::WHITE));

        let s = size as f32;
        let inset = s * 0.1;
        let grid = s * 0.8;
        let padding = s * 0.05;
        let gap = s * 0.025;
        let cell = (grid - 2.0 * padding - (GRID_SIZE as f32 - 1.0) * gap) / GRID_SIZE as f32;

        fill_rect(
            &mut tile,
            inset.round() as i64,
            inset.round() as i64,
            grid.round() as u32,
            grid.round() as u32,
            Rgb::BLACK,
        );

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if !pattern.is_lit(row, col) {
                    continue;
                }
                let x = inset + padding + col as f32 * (cell + gap);
                let y = inset + padding + row as f32 * (cell + gap);
                fill_rect(
                    &mut tile,
                    x.round() as i64,
                    y.round() as i64,
                    cell.round().max(1.0) as u32,
                    cell.round().max(1.0) as u32,
                    Rgb::WHITE,
                );
            }
        }

        tile
    }

    /// The configured logo scaled to fit, or the built-in wordmark.
    pub fn render_logo(&self, width_mm: f32, height_mm: f32) -> RgbaImage {
        let width = self.px_len(width_mm);
        let height = self.px_len(height_mm);

        match &self.logo {
            Some(logo) => imageops::resize(logo, width, height, FilterType::Triangle),
            None => {
                let mut mark = RgbaImage::from_pixel(width, height, rgba(Rgb::BLACK));
                let scale = width as f32 / (4.0 * GLYPH_ADVANCE);
                let baseline = ((height as f32 + 8.0 * scale) / 2.0).round() as i64;
                draw_text(&mut mark, 0, baseline, "TED", scale, Weight::Bold, Rgb::TEDX_RED);
                let x = text_width_px("TED", scale);
                draw_text(&mut mark, x, baseline, "x", scale, Weight::Bold, Rgb::WHITE);
                mark
            }
        }
    }

    /// Font pixels per glyph pixel so the 8-pixel glyph cell spans one em.
    fn glyph_scale(&self, size_pt: f32) -> f32 {
        (size_pt * MM_PER_PT * self.px_per_mm as f32 / 8.0).max(1.0)
    }
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut buffer), ImageOutputFormat::Png)?;
    Ok(buffer)
}

fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, width: u32, height: u32, color: Rgb) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + width as i64).min(canvas.width() as i64);
    let y1 = (y + height as i64).min(canvas.height() as i64);
    let pixel = rgba(color);

    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px as u32, py as u32, pixel);
        }
    }
}

fn glyph(c: char) -> [u8; 8] {
    if c == '•' {
        return BULLET;
    }
    BASIC_FONTS
        .get(c)
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn text_width_px(text: &str, scale: f32) -> i64 {
    (text.chars().count() as f32 * GLYPH_ADVANCE * scale).round() as i64
}

fn draw_text(
    canvas: &mut RgbaImage,
    left: i64,
    baseline: i64,
    text: &str,
    scale: f32,
    weight: Weight,
    color: Rgb,
) {
    let top = baseline as f32 - 8.0 * scale;
    let dot = scale.ceil() as u32;
    let embolden = match weight {
        Weight::Bold => dot.div_ceil(2).max(1),
        Weight::Regular => 0,
    };

    for (index, c) in text.chars().enumerate() {
        let origin = left as f32 + index as f32 * GLYPH_ADVANCE * scale;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..8 {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let x = (origin + col as f32 * scale).round() as i64;
                let y = (top + row as f32 * scale).round() as i64;
                fill_rect(canvas, x, y, dot + embolden, dot, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EventConfig;
    use crate::domain::{PassId, RegistrationRecord};

    fn layout() -> PassLayout {
        let record = RegistrationRecord {
            name: "Jane Doe".to_string(),
            email: "j@x.com".to_string(),
            pass_id: PassId::from("p1"),
        };
        PassLayout::build(&record, &EventConfig::default())
    }

    #[test]
    fn pass_bitmap_covers_the_card() {
        let rasterizer = Rasterizer::new(4);
        let image = rasterizer.render_pass(&layout(), &CodePattern::seeded(3));

        assert_eq!(image.width(), 680);
        assert_eq!(image.height(), 720);
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert!(image.pixels().any(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn code_pattern_tile_has_white_frame() {
        let rasterizer = Rasterizer::new(2);
        let tile = rasterizer.render_code_pattern(&CodePattern::seeded(9), 40.0);

        assert_eq!(tile.dimensions(), (80, 80));
        assert_eq!(tile.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(tile.get_pixel(40, 9), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn wordmark_is_drawn_without_logo_file() {
        let rasterizer = Rasterizer::new(4);
        let mark = rasterizer.render_logo(20.0, 20.0);

        assert_eq!(mark.dimensions(), (80, 80));
        assert!(mark.pixels().any(|p| *p == rgba(Rgb::TEDX_RED)));
    }

    #[test]
    fn encoded_snapshot_is_png() {
        let rasterizer = Rasterizer::new(1);
        let png = encode_png(&rasterizer.render_pass(&layout(), &CodePattern::seeded(3))).unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }
}
