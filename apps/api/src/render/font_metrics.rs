//! Static width tables for the four template typefaces.
//!
//! Widths are em units at 1em. They approximate the real faces closely enough
//! to break lines where a browser would, within a word or so per paragraph.
//! One humanist sans table is measured directly; the other faces are derived
//! from it by their average advance ratio. ASCII 0x20..=0x7E is covered;
//! anything else uses the face's average width.

use serde::{Deserialize, Serialize};

use crate::models::template::Variant;

/// Bold runs are roughly this much wider than regular ones.
const BOLD_FACTOR: f32 = 1.06;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Modern: humanist sans-serif.
    Inter,
    /// Classic: old-style serif.
    EbGaramond,
    /// Minimal: geometric humanist sans-serif.
    Lato,
    /// Creative: condensed display sans-serif.
    Oswald,
}

impl FontFamily {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Modern => FontFamily::Inter,
            Variant::Classic => FontFamily::EbGaramond,
            Variant::Minimal => FontFamily::Lato,
            Variant::Creative => FontFamily::Oswald,
        }
    }

    /// Average advance relative to Inter.
    fn scale(self) -> f32 {
        match self {
            FontFamily::Inter => 1.0,
            FontFamily::EbGaramond => 0.85,
            FontFamily::Lato => 1.05,
            FontFamily::Oswald => 0.68,
        }
    }

    pub fn metrics(self) -> FontMetrics {
        FontMetrics {
            family: self,
            scale: self.scale(),
        }
    }
}

/// `BASE_WIDTHS[i]` is the advance of ASCII `(i + 32)`.
#[rustfmt::skip]
const BASE_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0-9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A-M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N-Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a-m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n-z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

const BASE_AVERAGE: f32 = 0.52;

/// Glyphs the templates draw outside ASCII.
fn symbol_width(c: char) -> Option<f32> {
    match c {
        '★' | '☆' => Some(0.80),
        '•' => Some(0.35),
        '—' => Some(1.00),
        '–' => Some(0.56),
        '·' => Some(0.28),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub family: FontFamily,
    scale: f32,
}

impl FontMetrics {
    pub fn char_width_em(&self, c: char) -> f32 {
        let code = c as usize;
        let base = if (32..=126).contains(&code) {
            BASE_WIDTHS[code - 32]
        } else {
            symbol_width(c).unwrap_or(BASE_AVERAGE)
        };
        base * self.scale
    }

    /// Width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width_em(c)).sum()
    }

    /// Width of a string in CSS px at `size_px`.
    pub fn text_width_px(&self, s: &str, size_px: f32, bold: bool) -> f32 {
        let w = self.measure_em(s) * size_px;
        if bold {
            w * BOLD_FACTOR
        } else {
            w
        }
    }

    /// Greedy word wrap into lines no wider than `max_width_px`.
    ///
    /// Explicit newlines always break. A single word wider than the line gets
    /// a line of its own. Blank input yields no lines.
    pub fn wrap(&self, text: &str, size_px: f32, bold: bool, max_width_px: f32) -> Vec<String> {
        let space = self.text_width_px(" ", size_px, bold);
        let mut lines = Vec::new();

        for paragraph in text.lines() {
            let mut current = String::new();
            let mut current_w = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.text_width_px(word, size_px, bold);
                if current.is_empty() {
                    current.push_str(word);
                    current_w = word_w;
                } else if current_w + space + word_w > max_width_px {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_w = word_w;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_w += space + word_w;
                }
            }

            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
    }
}
