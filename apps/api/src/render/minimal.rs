//! Minimal: plain linear layout, light headings, no rating visuals.

use crate::render::projector::{
    certification_meta, date_range, degree_line, filled, non_blank, Content, ResolvedPalette,
    SECTION_ORDER,
};
use crate::render::tree::{Align, Node, SectionKind, TextRole};

const PAGE_PADDING: f32 = 48.0;
const SECTION_GAP: f32 = 20.0;
const SEPARATOR: &str = "  ·  ";

pub fn layout(c: &Content, p: &ResolvedPalette) -> Node {
    let mut sections = vec![header(c, p)];
    for kind in c.present(&SECTION_ORDER[1..]) {
        let body = match kind {
            SectionKind::Summary => vec![Node::text(
                c.summary().unwrap_or_default(),
                TextRole::Body,
                p.text,
            )],
            SectionKind::Experience => experience(c, p),
            SectionKind::Education => education(c, p),
            SectionKind::Skills => skills(c, p),
            SectionKind::Projects => projects(c, p),
            SectionKind::Certifications => c
                .certifications()
                .iter()
                .map(|cert| {
                    Node::apart(
                        Node::text(&cert.name, TextRole::Body, p.text),
                        Node::aligned(
                            certification_meta(cert),
                            TextRole::Meta,
                            p.secondary,
                            Align::Right,
                        ),
                    )
                })
                .collect(),
            SectionKind::Languages => vec![Node::text(
                c.languages()
                    .iter()
                    .map(|l| format!("{} ({})", l.name, l.proficiency.label()))
                    .collect::<Vec<_>>()
                    .join(SEPARATOR),
                TextRole::Body,
                p.text,
            )],
            SectionKind::Header => continue,
        };
        let mut children = Vec::new();
        if let Some(title) = heading_text(kind) {
            children.push(Node::Heading {
                text: title.to_string(),
                color: p.primary,
                align: Align::Left,
                underline: None,
            });
        }
        children.push(Node::column(10.0, body));
        sections.push(Node::section(kind, children));
    }

    Node::Panel {
        fill: None,
        padding: PAGE_PADDING,
        stripe: None,
        children: vec![Node::column(SECTION_GAP, sections)],
    }
}

/// The summary runs straight under the header without a heading.
fn heading_text(kind: SectionKind) -> Option<&'static str> {
    match kind {
        SectionKind::Header | SectionKind::Summary => None,
        SectionKind::Experience => Some("Experience"),
        SectionKind::Education => Some("Education"),
        SectionKind::Skills => Some("Skills"),
        SectionKind::Projects => Some("Projects"),
        SectionKind::Certifications => Some("Certifications"),
        SectionKind::Languages => Some("Languages"),
    }
}

fn header(c: &Content, p: &ResolvedPalette) -> Node {
    let mut children = vec![
        Node::text(c.name(), TextRole::Name, p.primary),
        Node::text(c.title(), TextRole::Subheading, p.secondary),
    ];
    let contacts = c.contacts();
    if !contacts.is_empty() {
        children.push(Node::text(contacts.join(SEPARATOR), TextRole::Meta, p.secondary));
    }
    Node::section(SectionKind::Header, children)
}

fn dated(left: String, dates: String, p: &ResolvedPalette) -> Node {
    Node::apart(
        Node::text(left, TextRole::Body, p.text),
        Node::aligned(dates, TextRole::Meta, p.secondary, Align::Right),
    )
}

fn experience(c: &Content, p: &ResolvedPalette) -> Vec<Node> {
    c.experience()
        .iter()
        .map(|exp| {
            let mut rows = vec![
                dated(
                    format!("{} — {}", exp.title.trim(), exp.company.trim()),
                    date_range(&exp.start_date, &exp.end_date, exp.is_current),
                    p,
                ),
            ];
            if let Some(description) = non_blank(&exp.description) {
                rows.push(Node::text(description, TextRole::Meta, p.text));
            }
            let achievements = filled(&exp.achievements);
            if !achievements.is_empty() {
                rows.push(Node::Bullets {
                    items: achievements,
                    marker: '–',
                    color: p.text,
                });
            }
            Node::column(3.0, rows)
        })
        .collect()
}

fn education(c: &Content, p: &ResolvedPalette) -> Vec<Node> {
    c.education()
        .iter()
        .map(|edu| {
            let mut rows = vec![
                dated(
                    degree_line(edu),
                    date_range(&edu.start_date, &edu.end_date, edu.is_current),
                    p,
                ),
                Node::text(&edu.institution, TextRole::Meta, p.secondary),
            ];
            if let Some(description) = edu.description.as_deref().and_then(non_blank) {
                rows.push(Node::text(description, TextRole::Meta, p.text));
            }
            Node::column(3.0, rows)
        })
        .collect()
}

fn skills(c: &Content, p: &ResolvedPalette) -> Vec<Node> {
    c.skills()
        .iter()
        .map(|group| {
            let names = group
                .skills
                .iter()
                .map(|s| s.name.trim())
                .collect::<Vec<_>>()
                .join(SEPARATOR);
            if group.is_ungrouped() {
                Node::text(names, TextRole::Body, p.text)
            } else {
                Node::text(
                    format!("{}: {names}", group.name.trim()),
                    TextRole::Body,
                    p.text,
                )
            }
        })
        .collect()
}

fn projects(c: &Content, p: &ResolvedPalette) -> Vec<Node> {
    c.projects()
        .iter()
        .map(|project| {
            let link = project.link.as_deref().and_then(non_blank).unwrap_or_default();
            let mut rows = vec![
                Node::apart(
                    Node::text(&project.name, TextRole::Body, p.text),
                    Node::aligned(link, TextRole::Meta, p.secondary, Align::Right),
                ),
                Node::text(&project.description, TextRole::Meta, p.text),
            ];
            let technologies = filled(&project.technologies);
            if !technologies.is_empty() {
                rows.push(Node::text(
                    technologies.join(SEPARATOR),
                    TextRole::Caption,
                    p.secondary,
                ));
            }
            Node::column(3.0, rows)
        })
        .collect()
}
