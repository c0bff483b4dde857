//! Classic: serif, centered header and headings, hairlines between entries,
//! and a two-column footer (skills beside projects, certifications and
//! languages).

use crate::render::projector::{
    certification_meta, date_range, degree_line, filled, non_blank, Content, ResolvedPalette,
};
use crate::render::tree::{Align, Node, Rgb, SectionKind, TextRole};

const PAGE_PADDING: f32 = 48.0;
const SECTION_GAP: f32 = 22.0;

const LINEAR: [SectionKind; 3] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
];
const FOOTER_LEFT: [SectionKind; 1] = [SectionKind::Skills];
const FOOTER_RIGHT: [SectionKind; 3] = [
    SectionKind::Projects,
    SectionKind::Certifications,
    SectionKind::Languages,
];

pub fn layout(c: &Content, p: &ResolvedPalette) -> Node {
    let mut sections = vec![header(c, p)];
    sections.extend(c.present(&LINEAR).into_iter().map(|k| section(c, p, k)));

    let left: Vec<Node> = c
        .present(&FOOTER_LEFT)
        .into_iter()
        .map(|k| section(c, p, k))
        .collect();
    let right: Vec<Node> = c
        .present(&FOOTER_RIGHT)
        .into_iter()
        .map(|k| section(c, p, k))
        .collect();
    match (left.is_empty(), right.is_empty()) {
        (false, false) => sections.push(Node::Row {
            gap: 28.0,
            weights: vec![1.0, 1.0],
            children: vec![
                Node::column(SECTION_GAP, left),
                Node::column(SECTION_GAP, right),
            ],
        }),
        _ => sections.extend(left.into_iter().chain(right)),
    }

    Node::Panel {
        fill: None,
        padding: PAGE_PADDING,
        stripe: None,
        children: vec![Node::column(SECTION_GAP, sections)],
    }
}

fn section(c: &Content, p: &ResolvedPalette, kind: SectionKind) -> Node {
    match kind {
        SectionKind::Header => header(c, p),
        SectionKind::Summary => Node::section(
            kind,
            vec![
                heading("Summary", p),
                Node::aligned(
                    c.summary().unwrap_or_default(),
                    TextRole::Body,
                    p.text,
                    Align::Center,
                ),
            ],
        ),
        SectionKind::Experience => experience(c, p),
        SectionKind::Education => education(c, p),
        SectionKind::Skills => skills(c, p),
        SectionKind::Projects => projects(c, p),
        SectionKind::Certifications => certifications(c, p),
        SectionKind::Languages => {
            let rows = c
                .languages()
                .iter()
                .map(|l| {
                    Node::text(
                        format!("{}: {}", l.name, l.proficiency.label()),
                        TextRole::Body,
                        p.text,
                    )
                })
                .collect();
            Node::section(kind, vec![heading("Languages", p), Node::column(4.0, rows)])
        }
    }
}

fn heading(text: &str, p: &ResolvedPalette) -> Node {
    Node::Heading {
        text: text.to_uppercase(),
        color: p.primary,
        align: Align::Center,
        underline: None,
    }
}

fn hairline(p: &ResolvedPalette) -> Node {
    Node::Rule {
        color: faint(p.secondary, p),
        thickness: 1.0,
    }
}

fn faint(color: Rgb, p: &ResolvedPalette) -> Rgb {
    color.mix(p.background, 0.8)
}

fn header(c: &Content, p: &ResolvedPalette) -> Node {
    let mut children = vec![
        Node::aligned(c.name(), TextRole::Name, p.primary, Align::Center),
        Node::aligned(c.title(), TextRole::Title, p.secondary, Align::Center),
    ];
    let contacts = c.contacts();
    if !contacts.is_empty() {
        children.push(Node::aligned(
            contacts.join("     "),
            TextRole::Meta,
            p.text,
            Align::Center,
        ));
    }
    children.push(Node::Spacer { height: 6.0 });
    children.push(Node::Rule {
        color: p.secondary,
        thickness: 2.0,
    });
    Node::section(SectionKind::Header, children)
}

fn experience(c: &Content, p: &ResolvedPalette) -> Node {
    let mut rows = vec![heading("Experience", p)];
    for exp in c.experience() {
        let mut entry = vec![
            Node::text(&exp.title, TextRole::Subheading, p.text),
            Node::apart(
                Node::text(&exp.company, TextRole::Body, p.secondary),
                Node::aligned(
                    date_range(&exp.start_date, &exp.end_date, exp.is_current),
                    TextRole::Meta,
                    p.text,
                    Align::Right,
                ),
            ),
        ];
        if let Some(location) = non_blank(&exp.location) {
            entry.push(Node::text(location, TextRole::Meta, p.muted()));
        }
        if let Some(description) = non_blank(&exp.description) {
            entry.push(Node::text(description, TextRole::Body, p.text));
        }
        let achievements = filled(&exp.achievements);
        if !achievements.is_empty() {
            entry.push(Node::Bullets {
                items: achievements,
                marker: '•',
                color: p.text,
            });
        }
        entry.push(hairline(p));
        rows.push(Node::column(4.0, entry));
    }
    Node::section(SectionKind::Experience, vec![Node::column(12.0, rows)])
}

fn education(c: &Content, p: &ResolvedPalette) -> Node {
    let mut rows = vec![heading("Education", p)];
    for edu in c.education() {
        let mut entry = vec![
            Node::apart(
                Node::text(degree_line(edu), TextRole::Subheading, p.text),
                Node::aligned(
                    date_range(&edu.start_date, &edu.end_date, edu.is_current),
                    TextRole::Meta,
                    p.text,
                    Align::Right,
                ),
            ),
            Node::text(&edu.institution, TextRole::Body, p.secondary),
        ];
        if let Some(gpa) = edu.gpa.as_deref().and_then(non_blank) {
            entry.push(Node::text(format!("GPA: {gpa}"), TextRole::Meta, p.muted()));
        }
        if let Some(description) = edu.description.as_deref().and_then(non_blank) {
            entry.push(Node::text(description, TextRole::Body, p.text));
        }
        entry.push(hairline(p));
        rows.push(Node::column(4.0, entry));
    }
    Node::section(SectionKind::Education, vec![Node::column(12.0, rows)])
}

fn skills(c: &Content, p: &ResolvedPalette) -> Node {
    let mut rows = vec![heading("Skills", p)];
    for group in c.skills() {
        let mut block = Vec::new();
        if !group.is_ungrouped() {
            block.push(Node::text(&group.name, TextRole::Subheading, p.secondary));
        }
        block.extend(group.skills.iter().map(|skill| match skill.level {
            Some(level) => Node::Glyphs {
                label: skill.name.clone(),
                glyph: '•',
                count: level,
                color: p.text,
                glyph_color: p.accent,
            },
            None => Node::text(&skill.name, TextRole::Body, p.text),
        }));
        rows.push(Node::column(4.0, block));
    }
    Node::section(SectionKind::Skills, vec![Node::column(10.0, rows)])
}

fn projects(c: &Content, p: &ResolvedPalette) -> Node {
    let mut rows = vec![heading("Projects", p)];
    for project in c.projects() {
        let mut entry = vec![Node::text(&project.name, TextRole::Subheading, p.text)];
        if let Some(link) = project.link.as_deref().and_then(non_blank) {
            entry.push(Node::text(link, TextRole::Meta, p.accent));
        }
        entry.push(Node::text(&project.description, TextRole::Body, p.text));
        let technologies = filled(&project.technologies);
        if !technologies.is_empty() {
            entry.push(Node::text(
                technologies.join(", "),
                TextRole::Meta,
                p.secondary,
            ));
        }
        rows.push(Node::column(3.0, entry));
    }
    Node::section(SectionKind::Projects, vec![Node::column(10.0, rows)])
}

fn certifications(c: &Content, p: &ResolvedPalette) -> Node {
    let mut rows = vec![heading("Certifications", p)];
    for cert in c.certifications() {
        rows.push(Node::column(
            2.0,
            vec![
                Node::text(&cert.name, TextRole::Subheading, p.text),
                Node::text(certification_meta(cert), TextRole::Meta, p.secondary),
            ],
        ));
    }
    Node::section(SectionKind::Certifications, vec![Node::column(10.0, rows)])
}
