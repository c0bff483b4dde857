//! The visual tree: a template's layout, independent of how it is painted.

use serde::{Serialize, Serializer};

use crate::models::template::Variant;
use crate::render::font_metrics::FontFamily;

// ────────────────────────────────────────────────────────────────────────────
// Colors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Parses `#rrggbb` (the `#` is optional, `#rgb` shorthand accepted).
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: &str| u8::from_str_radix(range, 16).ok();
        match hex.len() {
            6 => Some(Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let double = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Rgb(double(0)?, double(1)?, double(2)?))
            }
            _ => None,
        }
    }

    /// Blends toward `other`; `amount` 0.0 keeps `self`, 1.0 gives `other`.
    pub fn mix(self, other: Rgb, amount: f32) -> Rgb {
        let t = amount.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Nodes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
}

/// Typographic role; the layout maps it to size and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Name,
    Title,
    Heading,
    Subheading,
    Body,
    Meta,
    Caption,
}

impl TextRole {
    pub fn size_px(self) -> f32 {
        match self {
            TextRole::Name => 30.0,
            TextRole::Title => 20.0,
            TextRole::Heading => 18.0,
            TextRole::Subheading => 16.0,
            TextRole::Body => 14.0,
            TextRole::Meta => 13.0,
            TextRole::Caption => 12.0,
        }
    }

    pub fn bold(self) -> bool {
        matches!(
            self,
            TextRole::Name | TextRole::Heading | TextRole::Subheading
        )
    }

    pub fn line_height_px(self) -> f32 {
        (self.size_px() * 1.4).round()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A resume section. Tags its subtree for inspection.
    Section { kind: SectionKind, children: Vec<Node> },
    /// Children stacked vertically.
    Column { gap: f32, children: Vec<Node> },
    /// Children side by side, widths proportional to `weights`.
    Row {
        gap: f32,
        weights: Vec<f32>,
        children: Vec<Node>,
    },
    /// Two columns; `ratio` is the side column's share of the width.
    Sidebar {
        ratio: f32,
        side_fill: Option<Rgb>,
        side: Vec<Node>,
        main: Vec<Node>,
    },
    /// Background fill and padding around its children.
    #[serde(rename = "box")]
    Panel {
        fill: Option<Rgb>,
        padding: f32,
        /// Left border stripe, as in a timeline.
        stripe: Option<Rgb>,
        children: Vec<Node>,
    },
    Heading {
        text: String,
        color: Rgb,
        align: Align,
        underline: Option<Rgb>,
    },
    Text {
        text: String,
        role: TextRole,
        color: Rgb,
        align: Align,
    },
    Rule { color: Rgb, thickness: f32 },
    Bullets {
        items: Vec<String>,
        marker: char,
        color: Rgb,
    },
    /// Wrapping row of pill labels.
    Chips {
        items: Vec<String>,
        fill: Rgb,
        color: Rgb,
    },
    /// A label followed by `count` repetitions of `glyph`.
    Glyphs {
        label: String,
        glyph: char,
        count: u8,
        color: Rgb,
        glyph_color: Rgb,
    },
    ProgressBar {
        label: String,
        caption: String,
        fraction: f32,
        color: Rgb,
        fill: Rgb,
        track: Rgb,
    },
    Spacer { height: f32 },
}

impl Node {
    pub fn text(text: impl Into<String>, role: TextRole, color: Rgb) -> Node {
        Node::Text {
            text: text.into(),
            role,
            color,
            align: Align::Left,
        }
    }

    pub fn aligned(text: impl Into<String>, role: TextRole, color: Rgb, align: Align) -> Node {
        Node::Text {
            text: text.into(),
            role,
            color,
            align,
        }
    }

    pub fn column(gap: f32, children: Vec<Node>) -> Node {
        Node::Column { gap, children }
    }

    pub fn section(kind: SectionKind, children: Vec<Node>) -> Node {
        Node::Section { kind, children }
    }

    /// Left and right text on one line, e.g. a title and its dates.
    pub fn apart(left: Node, right: Node) -> Node {
        Node::Row {
            gap: 12.0,
            weights: vec![3.0, 1.4],
            children: vec![left, right],
        }
    }

    #[cfg(test)]
    fn children(&self) -> Vec<&Node> {
        match self {
            Node::Section { children, .. }
            | Node::Column { children, .. }
            | Node::Row { children, .. }
            | Node::Panel { children, .. } => children.iter().collect(),
            Node::Sidebar { side, main, .. } => side.iter().chain(main.iter()).collect(),
            _ => Vec::new(),
        }
    }

    /// Visible strings in this node, not descending into children.
    #[cfg(test)]
    fn own_strings(&self) -> Vec<String> {
        match self {
            Node::Heading { text, .. } | Node::Text { text, .. } => vec![text.clone()],
            Node::Bullets { items, .. } | Node::Chips { items, .. } => items.clone(),
            Node::Glyphs {
                label, glyph, count, ..
            } => vec![label.clone(), glyph.to_string().repeat(*count as usize)],
            Node::ProgressBar { label, caption, .. } => vec![label.clone(), caption.clone()],
            _ => Vec::new(),
        }
    }

    #[cfg(test)]
    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tree
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualTree {
    pub template_id: String,
    pub variant: Variant,
    pub font: FontFamily,
    pub background: Rgb,
    pub root: Node,
}

// Inspection helpers for tests.
#[cfg(test)]
impl VisualTree {
    /// Section kinds in document order (sidebar before main column).
    pub fn sections(&self) -> Vec<SectionKind> {
        let mut kinds = Vec::new();
        self.root.walk(&mut |node| {
            if let Node::Section { kind, .. } = node {
                kinds.push(*kind);
            }
        });
        kinds
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.sections().contains(&kind)
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Node> {
        let mut found = None;
        self.root.walk(&mut |node| {
            if found.is_none() && matches!(node, Node::Section { kind: k, .. } if *k == kind) {
                found = Some(node);
            }
        });
        found
    }

    /// Every visible string, in document order.
    pub fn strings(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.root.walk(&mut |node| out.extend(node.own_strings()));
        out
    }

    pub fn strings_in(&self, kind: SectionKind) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(section) = self.section(kind) {
            section.walk(&mut |node| out.extend(node.own_strings()));
        }
        out
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.strings().iter().any(|s| s.contains(needle))
    }
}
