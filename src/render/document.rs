//! PDF renderer for the downloadable pass.
//!
//! Draws the same [`PassLayout`] as the raster renderer, but as vector shapes and
//! text on an A4 page. Only the logo and the code pattern are embedded as bitmaps.

use crate::render::layout::{Align, Element, PassLayout, Rgb, Weight, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::utils::error::{PassError, Result};
use image::{DynamicImage, RgbaImage};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rect,
};

const MM_PER_PT: f32 = 0.352_778;
/// Mean Helvetica advance, in em, used to right-align text without font metrics.
const HELVETICA_AVG_ADVANCE: f32 = 0.55;

fn pdf_error(err: impl std::fmt::Display) -> PassError {
    PassError::render(format!("PDF generation failed: {}", err))
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        rgb.r as f32 / 255.0,
        rgb.g as f32 / 255.0,
        rgb.b as f32 / 255.0,
        None,
    ))
}

/// Layout y runs down from the top edge; PDF y runs up from the bottom.
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y)
}

/// The built-in fonts only cover plain ASCII reliably.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '•' => '-',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '?',
        })
        .collect()
}

pub fn estimated_text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * MM_PER_PT * HELVETICA_AVG_ADVANCE
}

/// Bitmaps the document embeds; both are rasterized from the same pass the attendee sees.
pub struct DocumentImages<'a> {
    pub logo: &'a RgbaImage,
    pub code_pattern: &'a RgbaImage,
}

pub fn render_document(
    layout: &PassLayout,
    images: &DocumentImages<'_>,
    title: &str,
) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Pass");
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for element in &layout.elements {
        match element {
            Element::Block { rect, color: fill } => {
                layer.set_fill_color(color(*fill));
                let shape = Rect::new(Mm(rect.x), flip(rect.bottom()), Mm(rect.right()), flip(rect.y))
                    .with_mode(PaintMode::Fill);
                layer.add_rect(shape);
            }
            Element::Logo { rect } => {
                place_image(&layer, images.logo, rect.x, rect.bottom(), rect.width);
            }
            Element::Text {
                x,
                baseline,
                text,
                size_pt,
                weight,
                color: fill,
                align,
            } => {
                let text = printable(text);
                let left = match align {
                    Align::Left => *x,
                    Align::Right => x - estimated_text_width_mm(&text, *size_pt),
                };
                let font: &IndirectFontRef = match weight {
                    Weight::Bold => &bold,
                    Weight::Regular => &regular,
                };
                layer.set_fill_color(color(*fill));
                layer.use_text(text, *size_pt, Mm(left), flip(*baseline), font);
            }
            Element::Rule { x1, x2, y, color: stroke } => {
                layer.set_outline_color(color(*stroke));
                layer.set_outline_thickness(0.5);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1), flip(*y)), false),
                        (Point::new(Mm(*x2), flip(*y)), false),
                    ],
                    is_closed: false,
                });
            }
            Element::CodePattern { rect } => {
                place_image(&layer, images.code_pattern, rect.x, rect.bottom(), rect.width);
            }
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

/// Places `bitmap` with its lower-left corner at (`x`, `bottom`), scaled to `width_mm`.
fn place_image(layer: &PdfLayerReference, bitmap: &RgbaImage, x: f32, bottom: f32, width_mm: f32) {
    let rgb = DynamicImage::ImageRgba8(bitmap.clone()).to_rgb8();
    let dpi = rgb.width() as f32 * 25.4 / width_mm;
    Image::from_dynamic_image(&DynamicImage::ImageRgb8(rgb)).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(flip(bottom)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}
