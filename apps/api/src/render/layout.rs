//! Positions a [`VisualTree`] on a page of fixed width and natural height.
//! Short content is padded to a full letter page so the page stays portrait.
//!
//! Output is a flat list of paint operations in CSS px, back to front. Text
//! is wrapped with the static width tables of the template's typeface.

use crate::render::font_metrics::FontMetrics;
use crate::render::tree::{Align, Node, Rgb, TextRole, VisualTree};

/// US letter at 96 dpi.
pub const PAGE_WIDTH_PX: f32 = 816.0;
pub const MIN_PAGE_HEIGHT_PX: f32 = 1056.0;

const BULLET_INDENT: f32 = 16.0;
const CHIP_PAD_X: f32 = 8.0;
const CHIP_PAD_Y: f32 = 3.0;
const CHIP_GAP: f32 = 6.0;
const BAR_HEIGHT: f32 = 6.0;
const STRIPE_WIDTH: f32 = 2.0;
const STRIPE_INSET: f32 = 14.0;
const SECTION_INNER_GAP: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
    },
    /// `y` is the top of the line box.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        bold: bool,
        color: Rgb,
    },
}

#[derive(Debug, Clone)]
pub struct LaidOutPage {
    pub width: f32,
    pub height: f32,
    pub background: Rgb,
    pub ops: Vec<PaintOp>,
}

pub fn layout(tree: &VisualTree) -> LaidOutPage {
    let mut ctx = LayoutCtx {
        metrics: tree.font.metrics(),
        ops: Vec::new(),
        page_bottom: MIN_PAGE_HEIGHT_PX,
    };
    let height = ctx.place(&tree.root, 0.0, 0.0, PAGE_WIDTH_PX);
    LaidOutPage {
        width: PAGE_WIDTH_PX,
        height: height.max(MIN_PAGE_HEIGHT_PX).ceil(),
        background: tree.background,
        ops: ctx.ops,
    }
}

struct LayoutCtx {
    metrics: FontMetrics,
    ops: Vec<PaintOp>,
    /// Sidebar fills reach at least this far down.
    page_bottom: f32,
}

impl LayoutCtx {
    /// Lays out `node` with its top-left at `(x, y)`; returns its height.
    fn place(&mut self, node: &Node, x: f32, y: f32, width: f32) -> f32 {
        match node {
            Node::Section { children, .. } => self.stack(children, SECTION_INNER_GAP, x, y, width),
            Node::Column { gap, children } => self.stack(children, *gap, x, y, width),
            Node::Row {
                gap,
                weights,
                children,
            } => self.row(children, weights, *gap, x, y, width),
            Node::Sidebar {
                ratio,
                side_fill,
                side,
                main,
            } => {
                let side_w = (width * ratio.clamp(0.0, 1.0)).round();
                let side_ops = self.detached(|ctx| ctx.stack(side, 0.0, x, y, side_w));
                let main_ops =
                    self.detached(|ctx| ctx.stack(main, 0.0, x + side_w, y, width - side_w));
                let height = side_ops.0.max(main_ops.0);
                if let Some(fill) = side_fill {
                    let fill_h = height.max(self.page_bottom - y);
                    self.rect(x, y, side_w, fill_h, *fill);
                }
                self.ops.extend(side_ops.1);
                self.ops.extend(main_ops.1);
                height
            }
            Node::Panel {
                fill,
                padding,
                stripe,
                children,
            } => {
                let inset = if stripe.is_some() { STRIPE_INSET } else { 0.0 };
                let inner_x = x + padding + inset;
                let inner_w = (width - 2.0 * padding - inset).max(0.0);
                let (inner_h, ops) =
                    self.detached(|ctx| ctx.stack(children, 0.0, inner_x, y + padding, inner_w));
                let height = inner_h + 2.0 * padding;
                if let Some(fill) = fill {
                    self.rect(x, y, width, height, *fill);
                }
                if let Some(stripe) = stripe {
                    self.rect(x + padding, y, STRIPE_WIDTH, height, *stripe);
                }
                self.ops.extend(ops);
                height
            }
            Node::Heading {
                text,
                color,
                align,
                underline,
            } => {
                let mut h = self.text(text, TextRole::Heading, *color, *align, x, y, width);
                if let Some(rule) = underline {
                    h += 3.0;
                    self.rect(x, y + h, width, 1.0, *rule);
                    h += 5.0;
                }
                h
            }
            Node::Text {
                text,
                role,
                color,
                align,
            } => self.text(text, *role, *color, *align, x, y, width),
            Node::Rule { color, thickness } => {
                self.rect(x, y, width, *thickness, *color);
                *thickness
            }
            Node::Bullets {
                items,
                marker,
                color,
            } => {
                let mut h = 0.0;
                for item in items {
                    self.push_text(x + 4.0, y + h, &marker.to_string(), TextRole::Body, *color);
                    h += self.text(
                        item,
                        TextRole::Body,
                        *color,
                        Align::Left,
                        x + BULLET_INDENT,
                        y + h,
                        width - BULLET_INDENT,
                    );
                }
                h
            }
            Node::Chips { items, fill, color } => self.chips(items, *fill, *color, x, y, width),
            Node::Glyphs {
                label,
                glyph,
                count,
                color,
                glyph_color,
            } => {
                let role = TextRole::Body;
                let glyphs = glyph.to_string().repeat(*count as usize);
                let glyphs_w = self.width_of(&glyphs, role);
                let label_w = (width - glyphs_w - 8.0).max(width * 0.5);
                let lines = self.wrap(label, role, label_w);
                let last_w = lines.last().map(|l| self.width_of(l, role)).unwrap_or(0.0);
                let h = self.text(label, role, *color, Align::Left, x, y, label_w);
                let line_h = role.line_height_px();
                let glyph_y = y + (h - line_h).max(0.0);
                self.push_text(x + last_w + 8.0, glyph_y, &glyphs, role, *glyph_color);
                h.max(line_h)
            }
            Node::ProgressBar {
                label,
                caption,
                fraction,
                color,
                fill,
                track,
            } => {
                let role = TextRole::Meta;
                let caption_w = self.width_of(caption, TextRole::Caption);
                self.push_text(x, y, label, role, *color);
                self.push_text(x + width - caption_w, y, caption, TextRole::Caption, *color);
                let bar_y = y + role.line_height_px() + 2.0;
                self.rect(x, bar_y, width, BAR_HEIGHT, *track);
                self.rect(x, bar_y, width * fraction.clamp(0.0, 1.0), BAR_HEIGHT, *fill);
                role.line_height_px() + 2.0 + BAR_HEIGHT
            }
            Node::Spacer { height } => *height,
        }
    }

    fn stack(&mut self, children: &[Node], gap: f32, x: f32, y: f32, width: f32) -> f32 {
        let mut h = 0.0;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                h += gap;
            }
            h += self.place(child, x, y + h, width);
        }
        h
    }

    fn row(&mut self, children: &[Node], weights: &[f32], gap: f32, x: f32, y: f32, width: f32) -> f32 {
        if children.is_empty() {
            return 0.0;
        }
        let weight = |i: usize| weights.get(i).copied().unwrap_or(1.0).max(0.0);
        let total: f32 = (0..children.len()).map(weight).sum::<f32>().max(f32::EPSILON);
        let free = (width - gap * (children.len() - 1) as f32).max(0.0);

        let mut cursor = x;
        let mut height: f32 = 0.0;
        for (i, child) in children.iter().enumerate() {
            let w = free * weight(i) / total;
            height = height.max(self.place(child, cursor, y, w));
            cursor += w + gap;
        }
        height
    }

    fn chips(&mut self, items: &[String], fill: Rgb, color: Rgb, x: f32, y: f32, width: f32) -> f32 {
        let role = TextRole::Caption;
        let chip_h = role.line_height_px() + 2.0 * CHIP_PAD_Y;
        let mut cx = x;
        let mut cy = y;
        for item in items {
            let chip_w = self.width_of(item, role) + 2.0 * CHIP_PAD_X;
            if cx > x && cx + chip_w > x + width {
                cx = x;
                cy += chip_h + CHIP_GAP;
            }
            self.rect(cx, cy, chip_w, chip_h, fill);
            self.push_text(cx + CHIP_PAD_X, cy + CHIP_PAD_Y, item, role, color);
            cx += chip_w + CHIP_GAP;
        }
        if items.is_empty() {
            0.0
        } else {
            cy - y + chip_h
        }
    }

    /// Wraps and paints text; returns its height.
    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        text: &str,
        role: TextRole,
        color: Rgb,
        align: Align,
        x: f32,
        y: f32,
        width: f32,
    ) -> f32 {
        let line_h = role.line_height_px();
        let lines = self.wrap(text, role, width);
        for (i, line) in lines.iter().enumerate() {
            let line_w = self.width_of(line, role);
            let offset = match align {
                Align::Left => 0.0,
                Align::Center => ((width - line_w) / 2.0).max(0.0),
                Align::Right => (width - line_w).max(0.0),
            };
            self.push_text(x + offset, y + i as f32 * line_h, line, role, color);
        }
        lines.len() as f32 * line_h
    }

    fn wrap(&self, text: &str, role: TextRole, width: f32) -> Vec<String> {
        self.metrics.wrap(text, role.size_px(), role.bold(), width)
    }

    fn width_of(&self, text: &str, role: TextRole) -> f32 {
        self.metrics.text_width_px(text, role.size_px(), role.bold())
    }

    fn push_text(&mut self, x: f32, y: f32, text: &str, role: TextRole, color: Rgb) {
        if text.trim().is_empty() {
            return;
        }
        self.ops.push(PaintOp::Text {
            x,
            y,
            text: text.to_string(),
            size: role.size_px(),
            bold: role.bold(),
            color,
        });
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        if w > 0.0 && h > 0.0 {
            self.ops.push(PaintOp::Rect { x, y, w, h, color });
        }
    }

    /// Runs `f` against a fresh op list so a background can be painted
    /// beneath its output.
    fn detached(&mut self, f: impl FnOnce(&mut Self) -> f32) -> (f32, Vec<PaintOp>) {
        let saved = std::mem::take(&mut self.ops);
        let height = f(self);
        let ops = std::mem::replace(&mut self.ops, saved);
        (height, ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Personal, ResumeDocument};
    use crate::models::template::TemplateCatalog;
    use crate::render::projector::project;

    fn texts(page: &LaidOutPage) -> Vec<&str> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn long_document() -> ResumeDocument {
        ResumeDocument {
            personal: Personal {
                name: "Jane Doe".to_string(),
                summary: "Engineer who likes shipping careful software. ".repeat(20),
                ..Default::default()
            },
            experience: (0..6)
                .map(|i| Experience {
                    id: format!("e{i}"),
                    title: "Engineer".to_string(),
                    company: format!("Company {i}"),
                    start_date: "2020".to_string(),
                    achievements: vec!["Did a thing".to_string(); 4],
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_page_width_is_fixed_and_height_natural() {
        for template in TemplateCatalog::builtin().all() {
            let short = layout(&project(&ResumeDocument::default(), template).unwrap());
            let long = layout(&project(&long_document(), template).unwrap());
            assert_eq!(short.width, PAGE_WIDTH_PX);
            assert_eq!(short.height, MIN_PAGE_HEIGHT_PX, "{}", template.id);
            assert!(long.height > short.height, "{}", template.id);
            assert!(long.height > 1056.0, "{}: content is not clipped", template.id);
        }
    }

    #[test]
    fn test_ops_stay_inside_page() {
        for template in TemplateCatalog::builtin().all() {
            let page = layout(&project(&long_document(), template).unwrap());
            for op in &page.ops {
                let (x, y) = match op {
                    PaintOp::Rect { x, y, .. } | PaintOp::Text { x, y, .. } => (*x, *y),
                };
                assert!(x >= 0.0 && x < page.width, "{}: x={x}", template.id);
                assert!(y >= 0.0 && y < page.height, "{}: y={y}", template.id);
            }
        }
    }

    #[test]
    fn test_text_is_painted() {
        let template = TemplateCatalog::builtin();
        let page = layout(&project(&long_document(), &template.all()[0]).unwrap());
        let painted = texts(&page);
        assert!(painted.contains(&"Jane Doe"));
        assert!(painted.contains(&"Did a thing"));
    }

    #[test]
    fn test_row_splits_width_by_weight() {
        let mut ctx = LayoutCtx {
            metrics: crate::render::font_metrics::FontFamily::Inter.metrics(),
            ops: Vec::new(),
            page_bottom: 0.0,
        };
        let black = Rgb(0, 0, 0);
        ctx.row(
            &[
                Node::Rule { color: black, thickness: 1.0 },
                Node::Rule { color: black, thickness: 1.0 },
            ],
            &[3.0, 1.0],
            0.0,
            0.0,
            0.0,
            400.0,
        );
        assert_eq!(
            ctx.ops,
            vec![
                PaintOp::Rect { x: 0.0, y: 0.0, w: 300.0, h: 1.0, color: black },
                PaintOp::Rect { x: 300.0, y: 0.0, w: 100.0, h: 1.0, color: black },
            ]
        );
    }

    #[test]
    fn test_sidebar_fill_painted_beneath_content() {
        let white = Rgb::WHITE;
        let mut ctx = LayoutCtx {
            metrics: crate::render::font_metrics::FontFamily::Oswald.metrics(),
            ops: Vec::new(),
            page_bottom: 0.0,
        };
        let h = ctx.place(
            &Node::Sidebar {
                ratio: 0.25,
                side_fill: Some(Rgb(1, 2, 3)),
                side: vec![Node::text("side", TextRole::Body, white)],
                main: vec![Node::Spacer { height: 100.0 }],
            },
            0.0,
            0.0,
            800.0,
        );
        assert_eq!(h, 100.0);
        assert_eq!(
            ctx.ops[0],
            PaintOp::Rect { x: 0.0, y: 0.0, w: 200.0, h: 100.0, color: Rgb(1, 2, 3) }
        );
        assert!(matches!(ctx.ops[1], PaintOp::Text { .. }));
    }

    #[test]
    fn test_short_page_is_portrait_with_full_sidebar() {
        let catalog = TemplateCatalog::builtin();
        for template in catalog.all() {
            let page = layout(&project(&ResumeDocument::default(), template).unwrap());
            assert!(page.height >= page.width, "{}: {}x{}", template.id, page.width, page.height);
        }

        let creative = catalog.get("creative-1").unwrap();
        let page = layout(&project(&ResumeDocument::default(), creative).unwrap());
        let sidebar_bottom = page
            .ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::Rect { x, y, w, h, .. } if *x == 0.0 && *w < page.width => Some(y + h),
                _ => None,
            })
            .fold(0.0_f32, f32::max);
        assert!((sidebar_bottom - MIN_PAGE_HEIGHT_PX).abs() < 0.5, "{sidebar_bottom}");
    }
}
