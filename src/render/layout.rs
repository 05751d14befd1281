//! Declarative pass layout.
//!
//! Everything is positioned in millimetres on an A4 page with the origin at the
//! top-left corner. The raster renderer and the PDF renderer both walk the same
//! element list, so the on-screen pass and the downloaded document cannot drift.

use crate::config::EventConfig;
use crate::domain::RegistrationRecord;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const MARGIN: f32 = 20.0;
const CARD_WIDTH: f32 = 170.0;
const CARD_HEIGHT: f32 = 180.0;
const INSET: f32 = 8.0;
const DETAIL_INDENT: f32 = 14.0;
const LOGO_SIZE: f32 = 20.0;
const CODE_SIZE: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const TEDX_RED: Rgb = Rgb::new(230, 43, 30);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `self` drawn at `alpha` opacity over `background`.
    pub fn over(self, background: Rgb, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8;
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectMm {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectMm {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Block {
        rect: RectMm,
        color: Rgb,
    },
    Logo {
        rect: RectMm,
    },
    /// `x` is the left edge for `Align::Left` and the right edge for `Align::Right`.
    Text {
        x: f32,
        baseline: f32,
        text: String,
        size_pt: f32,
        weight: Weight,
        color: Rgb,
        align: Align,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        color: Rgb,
    },
    CodePattern {
        rect: RectMm,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassLayout {
    pub card: RectMm,
    pub background: Rgb,
    pub elements: Vec<Element>,
}

struct TextStyle {
    size_pt: f32,
    weight: Weight,
    color: Rgb,
}

impl PassLayout {
    pub fn build(record: &RegistrationRecord, event: &EventConfig) -> Self {
        let background = Rgb::BLACK;
        let caption = TextStyle {
            size_pt: 8.0,
            weight: Weight::Regular,
            color: Rgb::WHITE.over(background, 0.7),
        };
        let body = TextStyle {
            size_pt: 10.0,
            weight: Weight::Regular,
            color: Rgb::WHITE,
        };

        let card = RectMm::new(MARGIN, MARGIN, CARD_WIDTH, CARD_HEIGHT);
        let left = card.x + INSET;
        let right = card.right() - INSET;

        let mut layout = Self {
            card,
            background,
            elements: vec![
                Element::Block {
                    rect: card,
                    color: background,
                },
                Element::Logo {
                    rect: RectMm::new(left, card.y + INSET, LOGO_SIZE, LOGO_SIZE),
                },
            ],
        };

        // header
        layout.text_right(right, card.y + 12.0, "EVENT PASS", &caption);
        layout.text_right(right, card.y + 18.0, record.pass_id.as_str(), &body);

        let mut y = card.y + 40.0;
        layout.text(
            left,
            y,
            &event.title,
            &TextStyle {
                size_pt: 24.0,
                weight: Weight::Bold,
                color: Rgb::WHITE,
            },
        );
        layout.text(
            left,
            y + 6.0,
            &event.tagline,
            &TextStyle {
                size_pt: 10.0,
                weight: Weight::Regular,
                color: Rgb::WHITE.over(background, 0.8),
            },
        );

        y += 24.0;
        layout.text(left, y, "ATTENDEE", &caption);
        layout.text(
            left,
            y + 6.0,
            &record.name,
            &TextStyle {
                size_pt: 16.0,
                weight: Weight::Bold,
                color: Rgb::WHITE,
            },
        );

        y += 14.0;
        layout.text(left, y, "EMAIL", &caption);
        layout.text(left, y + 6.0, &record.email, &body);

        y += 20.0;
        layout.elements.push(Element::Rule {
            x1: left,
            x2: right,
            y,
            color: Rgb::WHITE.over(background, 0.2),
        });

        let detail_x = card.x + DETAIL_INDENT;
        for line in [event.schedule_line(), event.venue.clone(), event.category.clone()] {
            y += 8.0;
            layout.text(detail_x, y, &line, &body);
        }

        y += 18.0;
        layout.elements.push(Element::CodePattern {
            rect: RectMm::new(card.x + (card.width - CODE_SIZE) / 2.0, y, CODE_SIZE, CODE_SIZE),
        });

        layout
    }

    fn text(&mut self, x: f32, baseline: f32, text: &str, style: &TextStyle) {
        self.push_text(x, baseline, text, style, Align::Left);
    }

    fn text_right(&mut self, x: f32, baseline: f32, text: &str, style: &TextStyle) {
        self.push_text(x, baseline, text, style, Align::Right);
    }

    fn push_text(&mut self, x: f32, baseline: f32, text: &str, style: &TextStyle, align: Align) {
        self.elements.push(Element::Text {
            x,
            baseline,
            text: text.to_string(),
            size_pt: style.size_pt,
            weight: style.weight,
            color: style.color,
            align,
        });
    }

    pub fn code_pattern_rect(&self) -> Option<RectMm> {
        self.elements.iter().find_map(|element| match element {
            Element::CodePattern { rect } => Some(*rect),
            _ => None,
        })
    }

    pub fn logo_rect(&self) -> Option<RectMm> {
        self.elements.iter().find_map(|element| match element {
            Element::Logo { rect } => Some(*rect),
            _ => None,
        })
    }

    /// Text content in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
