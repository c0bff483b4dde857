//! `project(document, template) -> VisualTree`.
//!
//! Data selection is shared by every variant and lives here: placeholders,
//! date ranges, which sections exist. The variant modules decide only
//! geometry and color.

use serde::Serialize;
use thiserror::Error;

use crate::models::resume::{
    Certification, Education, Experience, Language, Project, ResumeDocument, SkillGroup,
};
use crate::models::template::{TemplateCatalog, TemplateDefinition, Variant};
use crate::render::font_metrics::FontFamily;
use crate::render::tree::{Rgb, SectionKind, VisualTree};
use crate::render::{classic, creative, minimal, modern};

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const TITLE_PLACEHOLDER: &str = "Professional Title";
pub const PRESENT: &str = "Present";

/// Fixed section order shared by every variant.
pub const SECTION_ORDER: [SectionKind; 8] = [
    SectionKind::Header,
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Projects,
    SectionKind::Certifications,
    SectionKind::Languages,
];

const LEVEL_LABELS: [&str; 5] = ["Beginner", "Basic", "Intermediate", "Advanced", "Expert"];

#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderFault {
    #[error("Template '{template_id}' has an invalid {field} color '{value}'")]
    InvalidColor {
        template_id: String,
        field: &'static str,
        value: String,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Palette
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPalette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
    pub text: Rgb,
}

impl ResolvedPalette {
    pub fn resolve(template: &TemplateDefinition) -> Result<Self, RenderFault> {
        let c = &template.colors;
        let parse = |field: &'static str, value: &str| {
            Rgb::from_hex(value).ok_or_else(|| RenderFault::InvalidColor {
                template_id: template.id.clone(),
                field,
                value: value.to_string(),
            })
        };
        Ok(Self {
            primary: parse("primary", &c.primary)?,
            secondary: parse("secondary", &c.secondary)?,
            accent: parse("accent", &c.accent)?,
            background: parse("background", &c.background)?,
            text: parse("text", &c.text)?,
        })
    }

    /// Secondary text: body color faded toward the page.
    pub fn muted(&self) -> Rgb {
        self.text.mix(self.background, 0.4)
    }

    /// A faint wash of `color` over the page, for panels and chips.
    pub fn wash(&self, color: Rgb) -> Rgb {
        color.mix(self.background, 0.9)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content view
// ────────────────────────────────────────────────────────────────────────────

/// The parts of a normalized document that are worth rendering.
pub struct Content<'a> {
    doc: &'a ResumeDocument,
    skills: Vec<SkillGroup>,
}

impl<'a> Content<'a> {
    pub fn new(doc: &'a ResumeDocument) -> Self {
        let skills = doc
            .skills
            .iter()
            .filter_map(|g| {
                let skills: Vec<_> = g
                    .skills
                    .iter()
                    .filter(|s| !s.name.trim().is_empty())
                    .cloned()
                    .collect();
                (!skills.is_empty()).then(|| SkillGroup {
                    skills,
                    ..g.clone()
                })
            })
            .collect();
        Self { doc, skills }
    }

    pub fn name(&self) -> &str {
        non_blank(&self.doc.personal.name).unwrap_or(NAME_PLACEHOLDER)
    }

    pub fn title(&self) -> &str {
        non_blank(&self.doc.personal.title).unwrap_or(TITLE_PLACEHOLDER)
    }

    /// Email, phone, location and website, skipping blanks.
    pub fn contacts(&self) -> Vec<String> {
        let p = &self.doc.personal;
        [
            Some(p.email.as_str()),
            Some(p.phone.as_str()),
            Some(p.location.as_str()),
            p.website.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter_map(non_blank)
        .map(str::to_string)
        .collect()
    }

    pub fn summary(&self) -> Option<&str> {
        non_blank(&self.doc.personal.summary)
    }

    pub fn experience(&self) -> &[Experience] {
        &self.doc.experience
    }

    pub fn education(&self) -> &[Education] {
        &self.doc.education
    }

    /// Groups with at least one named skill; blank skills removed.
    pub fn skills(&self) -> &[SkillGroup] {
        &self.skills
    }

    pub fn projects(&self) -> &[Project] {
        &self.doc.projects
    }

    pub fn certifications(&self) -> &[Certification] {
        &self.doc.certifications
    }

    pub fn languages(&self) -> &[Language] {
        &self.doc.languages
    }

    /// Whether a section appears at all. The header always does.
    pub fn has(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Header => true,
            SectionKind::Summary => self.summary().is_some(),
            SectionKind::Experience => !self.experience().is_empty(),
            SectionKind::Education => !self.education().is_empty(),
            SectionKind::Skills => !self.skills().is_empty(),
            SectionKind::Projects => !self.projects().is_empty(),
            SectionKind::Certifications => !self.certifications().is_empty(),
            SectionKind::Languages => !self.languages().is_empty(),
        }
    }

    /// Present sections, in order, restricted to `kinds`.
    pub fn present(&self, kinds: &[SectionKind]) -> Vec<SectionKind> {
        SECTION_ORDER
            .into_iter()
            .filter(|k| kinds.contains(k) && self.has(*k))
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared formatting
// ────────────────────────────────────────────────────────────────────────────

/// `"start — Present"`, `"start — end"` or just `"start"`.
pub fn date_range(start: &str, end: &str, is_current: bool) -> String {
    let start = start.trim();
    let tail = if is_current { PRESENT } else { end.trim() };
    match (start.is_empty(), tail.is_empty()) {
        (false, false) => format!("{start} — {tail}"),
        (false, true) => start.to_string(),
        (true, _) => tail.to_string(),
    }
}

/// `"BSc in Physics"`, or the degree alone.
pub fn degree_line(edu: &Education) -> String {
    match non_blank(&edu.field_of_study) {
        Some(field) => format!("{} in {field}", edu.degree.trim()),
        None => edu.degree.trim().to_string(),
    }
}

pub fn level_label(level: u8) -> &'static str {
    let index = level.clamp(1, 5) as usize - 1;
    LEVEL_LABELS[index]
}

/// `"CNCF · 2023-04"` plus the expiry when there is one.
pub fn certification_meta(cert: &Certification) -> String {
    let mut parts: Vec<String> = [cert.issuer.as_str(), cert.date.as_str()]
        .into_iter()
        .filter_map(non_blank)
        .map(str::to_string)
        .collect();
    if let Some(expiry) = cert.expiry.as_deref().and_then(non_blank) {
        parts.push(format!("Expires {expiry}"));
    }
    parts.join(" · ")
}

/// Trimmed, non-blank lines of a list field.
pub fn filled(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter_map(|s| non_blank(s))
        .map(str::to_string)
        .collect()
}

pub fn non_blank(s: &str) -> Option<&str> {
    let t = s.trim();
    (!t.is_empty()).then_some(t)
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

pub fn project(
    document: &ResumeDocument,
    template: &TemplateDefinition,
) -> Result<VisualTree, RenderFault> {
    let palette = ResolvedPalette::resolve(template)?;
    let document = document.normalized();
    let content = Content::new(&document);

    let root = match template.variant {
        Variant::Modern => modern::layout(&content, &palette),
        Variant::Classic => classic::layout(&content, &palette),
        Variant::Minimal => minimal::layout(&content, &palette),
        Variant::Creative => creative::layout(&content, &palette),
    };

    Ok(VisualTree {
        template_id: template.id.clone(),
        variant: template.variant,
        font: FontFamily::for_variant(template.variant),
        background: palette.background,
        root,
    })
}

/// One template's outcome in [`project_all`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<VisualTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<RenderFault>,
}

/// Projects every catalog template on its own, so a faulty one never hides
/// the others.
pub fn project_all(document: &ResumeDocument, catalog: &TemplateCatalog) -> Vec<Projection> {
    catalog
        .all()
        .iter()
        .map(|template| match project(document, template) {
            Ok(tree) => Projection {
                template_id: template.id.clone(),
                tree: Some(tree),
                fault: None,
            },
            Err(fault) => {
                tracing::warn!(template_id = %template.id, error = %fault, "Template projection failed");
                Projection {
                    template_id: template.id.clone(),
                    tree: None,
                    fault: Some(fault),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Personal, Skill, SkillGroup};
    use crate::models::template::Palette;

    fn acme_document() -> ResumeDocument {
        ResumeDocument {
            experience: vec![Experience {
                id: "e1".to_string(),
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "2019-01".to_string(),
                is_current: true,
                achievements: vec!["Shipped X".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn full_document() -> ResumeDocument {
        ResumeDocument {
            personal: Personal {
                name: "Jane Doe".to_string(),
                title: "Staff Engineer".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
                location: "Berlin".to_string(),
                website: Some("jane.dev".to_string()),
                summary: "Builds reliable systems.".to_string(),
            },
            education: vec![Education {
                id: "ed1".to_string(),
                institution: "MIT".to_string(),
                degree: "BSc".to_string(),
                field_of_study: "Physics".to_string(),
                start_date: "2012".to_string(),
                end_date: "2016".to_string(),
                ..Default::default()
            }],
            skills: vec![SkillGroup {
                id: "g1".to_string(),
                name: "Languages".to_string(),
                skills: vec![Skill {
                    id: "s1".to_string(),
                    name: "Rust".to_string(),
                    level: Some(4),
                }],
            }],
            projects: vec![Project {
                id: "p1".to_string(),
                name: "cvforge".to_string(),
                description: "Resume builder".to_string(),
                technologies: vec!["Rust".to_string()],
                link: None,
            }],
            certifications: vec![Certification {
                id: "c1".to_string(),
                name: "CKA".to_string(),
                issuer: "CNCF".to_string(),
                date: "2023".to_string(),
                ..Default::default()
            }],
            languages: vec![Language {
                id: "l1".to_string(),
                name: "German".to_string(),
                ..Default::default()
            }],
            ..acme_document()
        }
    }

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::builtin()
    }

    #[test]
    fn test_empty_document_projects_header_only() {
        for template in catalog().all() {
            let tree = project(&ResumeDocument::default(), template).unwrap();
            assert_eq!(tree.sections(), vec![SectionKind::Header], "{}", template.id);
            assert!(tree.contains_text(NAME_PLACEHOLDER));
            assert!(tree.contains_text(TITLE_PLACEHOLDER));
        }
    }

    #[test]
    fn test_full_document_has_every_section() {
        for template in catalog().all() {
            let tree = project(&full_document(), template).unwrap();
            for kind in SECTION_ORDER {
                assert!(tree.has_section(kind), "{} missing {kind:?}", template.id);
            }
            assert!(!tree.contains_text(NAME_PLACEHOLDER));
        }
    }

    #[test]
    fn test_sections_appear_iff_backing_data_present() {
        let doc = ResumeDocument {
            projects: full_document().projects,
            ..Default::default()
        };
        for template in catalog().all() {
            let tree = project(&doc, template).unwrap();
            assert_eq!(
                tree.sections(),
                vec![SectionKind::Header, SectionKind::Projects],
                "{}",
                template.id
            );
        }
    }

    #[test]
    fn test_current_entry_shows_present_not_end_date() {
        for template in catalog().all() {
            let tree = project(&acme_document(), template).unwrap();
            let strings = tree.strings_in(SectionKind::Experience);
            assert!(
                strings.iter().any(|s| s.contains("2020-01 — Present")),
                "{}: {strings:?}",
                template.id
            );
            assert!(!tree.contains_text("2019-01"), "{}", template.id);
            assert!(tree.contains_text("Shipped X"));
        }
    }

    #[test]
    fn test_no_skills_heading_without_skills() {
        let doc = ResumeDocument {
            skills: vec![SkillGroup {
                id: "g".to_string(),
                name: "Tools".to_string(),
                skills: vec![Skill::default()],
            }],
            ..full_document()
        };
        for source in [ResumeDocument::default(), doc] {
            for template in catalog().all() {
                let tree = project(&source, template).unwrap();
                assert!(!tree.has_section(SectionKind::Skills), "{}", template.id);
                assert!(
                    !tree.strings().iter().any(|s| s.eq_ignore_ascii_case("skills")),
                    "{}",
                    template.id
                );
            }
        }
    }

    #[test]
    fn test_sections_follow_shared_order_in_linear_variants() {
        for template in catalog().all() {
            if template.variant == Variant::Creative {
                continue;
            }
            let tree = project(&full_document(), template).unwrap();
            assert_eq!(tree.sections(), SECTION_ORDER.to_vec(), "{}", template.id);
        }
    }

    #[test]
    fn test_invalid_color_is_a_fault_and_isolated() {
        let mut templates = catalog().all().to_vec();
        templates[1].colors = Palette {
            accent: "purple".to_string(),
            ..templates[1].colors.clone()
        };
        let bad_id = templates[1].id.clone();
        let results = project_all(&full_document(), &TemplateCatalog::new(templates));

        assert_eq!(results.len(), 4);
        for result in &results {
            if result.template_id == bad_id {
                assert_eq!(
                    result.fault,
                    Some(RenderFault::InvalidColor {
                        template_id: bad_id.clone(),
                        field: "accent",
                        value: "purple".to_string(),
                    })
                );
                assert!(result.tree.is_none());
            } else {
                assert!(result.tree.is_some());
            }
        }
    }

    #[test]
    fn test_date_range() {
        assert_eq!(date_range("2020-01", "2022-03", false), "2020-01 — 2022-03");
        assert_eq!(date_range("2020-01", "2022-03", true), "2020-01 — Present");
        assert_eq!(date_range("2020-01", "", false), "2020-01");
        assert_eq!(date_range("", "", false), "");
        assert_eq!(date_range("", "", true), "Present");
    }

    #[test]
    fn test_degree_line_and_level_label() {
        let doc = full_document();
        assert_eq!(degree_line(&doc.education[0]), "BSc in Physics");
        assert_eq!(level_label(1), "Beginner");
        assert_eq!(level_label(5), "Expert");
        assert_eq!(level_label(0), "Beginner");
    }

    #[test]
    fn test_certification_meta() {
        let cert = Certification {
            issuer: "CNCF".to_string(),
            date: "2023".to_string(),
            expiry: Some("2026".to_string()),
            ..Default::default()
        };
        assert_eq!(certification_meta(&cert), "CNCF · 2023 · Expires 2026");
    }

    #[test]
    fn test_contacts_skip_blanks() {
        let doc = ResumeDocument {
            personal: Personal {
                email: "a@b.c".to_string(),
                location: "  ".to_string(),
                website: Some("site.io".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(Content::new(&doc).contacts(), vec!["a@b.c", "site.io"]);
    }
}
