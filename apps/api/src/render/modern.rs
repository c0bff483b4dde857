//! Modern: linear, underlined primary headings, star-rated skills.

use crate::models::resume::SkillGroup;
use crate::render::projector::{
    certification_meta, date_range, degree_line, filled, non_blank, Content, ResolvedPalette,
    SECTION_ORDER,
};
use crate::render::tree::{Align, Node, SectionKind, TextRole};

const PAGE_PADDING: f32 = 48.0;
const SECTION_GAP: f32 = 24.0;
const ENTRY_GAP: f32 = 14.0;

pub fn layout(c: &Content, p: &ResolvedPalette) -> Node {
    let mut sections = vec![header(c, p)];
    for kind in c.present(&SECTION_ORDER[1..]) {
        let body = match kind {
            SectionKind::Summary => summary(c, p),
            SectionKind::Experience => experience(c, p),
            SectionKind::Education => education(c, p),
            SectionKind::Skills => skills(c.skills(), p),
            SectionKind::Projects => projects(c, p),
            SectionKind::Certifications => certifications(c, p),
            SectionKind::Languages => languages(c, p),
            SectionKind::Header => continue,
        };
        sections.push(body);
    }

    Node::Panel {
        fill: None,
        padding: PAGE_PADDING,
        stripe: None,
        children: vec![Node::column(SECTION_GAP, sections)],
    }
}

fn heading(text: &str, p: &ResolvedPalette) -> Node {
    Node::Heading {
        text: text.to_string(),
        color: p.primary,
        align: Align::Left,
        underline: Some(p.primary),
    }
}

fn header(c: &Content, p: &ResolvedPalette) -> Node {
    let mut children = vec![
        Node::text(c.name(), TextRole::Name, p.primary),
        Node::text(c.title(), TextRole::Title, p.secondary),
    ];
    let contacts = c.contacts();
    if !contacts.is_empty() {
        children.push(Node::Spacer { height: 6.0 });
        children.push(Node::text(contacts.join("   |   "), TextRole::Meta, p.text));
    }
    Node::section(SectionKind::Header, children)
}

fn summary(c: &Content, p: &ResolvedPalette) -> Node {
    Node::section(
        SectionKind::Summary,
        vec![
            heading("Professional Summary", p),
            Node::text(c.summary().unwrap_or_default(), TextRole::Body, p.text),
        ],
    )
}

fn experience(c: &Content, p: &ResolvedPalette) -> Node {
    let entries = c
        .experience()
        .iter()
        .map(|exp| {
            let mut rows = vec![
                Node::apart(
                    Node::text(&exp.title, TextRole::Subheading, p.text),
                    Node::aligned(
                        date_range(&exp.start_date, &exp.end_date, exp.is_current),
                        TextRole::Meta,
                        p.muted(),
                        Align::Right,
                    ),
                ),
                Node::text(with_location(&exp.company, &exp.location), TextRole::Body, p.secondary),
            ];
            if let Some(description) = non_blank(&exp.description) {
                rows.push(Node::text(description, TextRole::Body, p.text));
            }
            let achievements = filled(&exp.achievements);
            if !achievements.is_empty() {
                rows.push(Node::Bullets {
                    items: achievements,
                    marker: '•',
                    color: p.text,
                });
            }
            Node::column(4.0, rows)
        })
        .collect();
    Node::section(
        SectionKind::Experience,
        vec![heading("Experience", p), Node::column(ENTRY_GAP, entries)],
    )
}

fn education(c: &Content, p: &ResolvedPalette) -> Node {
    let entries = c
        .education()
        .iter()
        .map(|edu| {
            let mut rows = vec![
                Node::apart(
                    Node::text(degree_line(edu), TextRole::Subheading, p.text),
                    Node::aligned(
                        date_range(&edu.start_date, &edu.end_date, edu.is_current),
                        TextRole::Meta,
                        p.muted(),
                        Align::Right,
                    ),
                ),
                Node::text(
                    with_location(&edu.institution, &edu.location),
                    TextRole::Body,
                    p.secondary,
                ),
            ];
            if let Some(gpa) = edu.gpa.as_deref().and_then(non_blank) {
                rows.push(Node::text(format!("GPA: {gpa}"), TextRole::Meta, p.muted()));
            }
            if let Some(description) = edu.description.as_deref().and_then(non_blank) {
                rows.push(Node::text(description, TextRole::Body, p.text));
            }
            Node::column(4.0, rows)
        })
        .collect();
    Node::section(
        SectionKind::Education,
        vec![heading("Education", p), Node::column(ENTRY_GAP, entries)],
    )
}

fn skills(groups: &[SkillGroup], p: &ResolvedPalette) -> Node {
    let blocks = groups
        .iter()
        .map(|group| {
            let mut rows = Vec::new();
            if !group.is_ungrouped() {
                rows.push(Node::text(&group.name, TextRole::Subheading, p.secondary));
            }
            rows.extend(group.skills.iter().map(|skill| match skill.level {
                Some(level) => Node::Glyphs {
                    label: skill.name.clone(),
                    glyph: '★',
                    count: level,
                    color: p.text,
                    glyph_color: p.accent,
                },
                None => Node::text(&skill.name, TextRole::Body, p.text),
            }));
            Node::column(4.0, rows)
        })
        .collect();
    Node::section(
        SectionKind::Skills,
        vec![heading("Skills", p), Node::column(10.0, blocks)],
    )
}

fn projects(c: &Content, p: &ResolvedPalette) -> Node {
    let entries = c
        .projects()
        .iter()
        .map(|project| {
            let link = project.link.as_deref().and_then(non_blank).unwrap_or_default();
            let mut rows = vec![
                Node::apart(
                    Node::text(&project.name, TextRole::Subheading, p.text),
                    Node::aligned(link, TextRole::Meta, p.accent, Align::Right),
                ),
                Node::text(&project.description, TextRole::Body, p.text),
            ];
            let technologies = filled(&project.technologies);
            if !technologies.is_empty() {
                rows.push(Node::Chips {
                    items: technologies,
                    fill: p.wash(p.primary),
                    color: p.primary,
                });
            }
            Node::column(4.0, rows)
        })
        .collect();
    Node::section(
        SectionKind::Projects,
        vec![heading("Projects", p), Node::column(ENTRY_GAP, entries)],
    )
}

fn certifications(c: &Content, p: &ResolvedPalette) -> Node {
    let entries = c
        .certifications()
        .iter()
        .map(|cert| {
            let mut rows = vec![
                Node::text(&cert.name, TextRole::Subheading, p.text),
                Node::text(certification_meta(cert), TextRole::Meta, p.secondary),
            ];
            if let Some(link) = cert.link.as_deref().and_then(non_blank) {
                rows.push(Node::text(link, TextRole::Meta, p.accent));
            }
            Node::column(2.0, rows)
        })
        .collect();
    Node::section(
        SectionKind::Certifications,
        vec![heading("Certifications", p), Node::column(10.0, entries)],
    )
}

fn languages(c: &Content, p: &ResolvedPalette) -> Node {
    let line = c
        .languages()
        .iter()
        .map(|l| format!("{}: {}", l.name, l.proficiency.label()))
        .collect::<Vec<_>>()
        .join("      ");
    Node::section(
        SectionKind::Languages,
        vec![heading("Languages", p), Node::text(line, TextRole::Body, p.text)],
    )
}

fn with_location(primary: &str, location: &str) -> String {
    match non_blank(location) {
        Some(location) => format!("{}  ·  {location}", primary.trim()),
        None => primary.trim().to_string(),
    }
}
