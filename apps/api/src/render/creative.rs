//! Creative: accent banner, colored sidebar (contact, skill meters,
//! languages) and a timeline-style main column.

use crate::render::projector::{
    certification_meta, date_range, degree_line, filled, level_label, non_blank, Content,
    ResolvedPalette,
};
use crate::render::tree::{Align, Node, Rgb, SectionKind, TextRole};

const SIDEBAR_RATIO: f32 = 1.0 / 3.0;
const COLUMN_PADDING: f32 = 24.0;

const SIDE: [SectionKind; 2] = [SectionKind::Skills, SectionKind::Languages];
const MAIN: [SectionKind; 5] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Projects,
    SectionKind::Certifications,
];

pub fn layout(c: &Content, p: &ResolvedPalette) -> Node {
    let banner = Node::Panel {
        fill: Some(p.accent),
        padding: 32.0,
        stripe: None,
        children: vec![Node::section(
            SectionKind::Header,
            vec![
                Node::text(c.name(), TextRole::Name, Rgb::WHITE),
                Node::text(c.title(), TextRole::Title, Rgb::WHITE.mix(p.accent, 0.1)),
            ],
        )],
    };

    let mut side = Vec::new();
    let contacts = c.contacts();
    if !contacts.is_empty() {
        side.push(Node::column(
            6.0,
            std::iter::once(side_heading("Contact"))
                .chain(
                    contacts
                        .into_iter()
                        .map(|line| Node::text(line, TextRole::Meta, Rgb::WHITE)),
                )
                .collect(),
        ));
    }
    for kind in c.present(&SIDE) {
        side.push(match kind {
            SectionKind::Skills => skills(c, p),
            _ => languages(c),
        });
    }

    let main: Vec<Node> = c
        .present(&MAIN)
        .into_iter()
        .map(|kind| match kind {
            SectionKind::Summary => Node::section(
                kind,
                vec![
                    main_heading("About Me", p),
                    Node::text(c.summary().unwrap_or_default(), TextRole::Body, p.text),
                ],
            ),
            SectionKind::Experience => experience(c, p),
            SectionKind::Education => education(c, p),
            SectionKind::Projects => projects(c, p),
            _ => certifications(c, p),
        })
        .collect();

    Node::column(
        0.0,
        vec![
            banner,
            Node::Sidebar {
                ratio: SIDEBAR_RATIO,
                side_fill: Some(p.primary),
                side: vec![padded(side, 28.0)],
                main: vec![padded(main, 24.0)],
            },
        ],
    )
}

fn padded(children: Vec<Node>, gap: f32) -> Node {
    Node::Panel {
        fill: None,
        padding: COLUMN_PADDING,
        stripe: None,
        children: vec![Node::column(gap, children)],
    }
}

fn side_heading(text: &str) -> Node {
    Node::Heading {
        text: text.to_string(),
        color: Rgb::WHITE,
        align: Align::Left,
        underline: Some(Rgb::WHITE),
    }
}

fn main_heading(text: &str, p: &ResolvedPalette) -> Node {
    Node::Heading {
        text: text.to_string(),
        color: p.primary,
        align: Align::Left,
        underline: None,
    }
}

fn skills(c: &Content, p: &ResolvedPalette) -> Node {
    let mut rows = vec![side_heading("Skills")];
    for group in c.skills() {
        if !group.is_ungrouped() {
            rows.push(Node::text(&group.name, TextRole::Subheading, Rgb::WHITE));
        }
        rows.extend(group.skills.iter().map(|skill| match skill.level {
            Some(level) => Node::ProgressBar {
                label: skill.name.clone(),
                caption: level_label(level).to_string(),
                fraction: f32::from(level) / 5.0,
                color: Rgb::WHITE,
                fill: p.accent,
                track: p.primary.mix(Rgb::WHITE, 0.2),
            },
            None => Node::text(&skill.name, TextRole::Body, Rgb::WHITE),
        }));
    }
    Node::section(SectionKind::Skills, vec![Node::column(8.0, rows)])
}

fn languages(c: &Content) -> Node {
    let mut rows = vec![side_heading("Languages")];
    rows.extend(c.languages().iter().map(|l| {
        Node::apart(
            Node::text(&l.name, TextRole::Body, Rgb::WHITE),
            Node::aligned(l.proficiency.label(), TextRole::Meta, Rgb::WHITE, Align::Right),
        )
    }));
    Node::section(SectionKind::Languages, vec![Node::column(6.0, rows)])
}

/// Entry on the timeline: striped panel, secondary subtitle, dates.
fn timeline_entry(
    title: String,
    subtitle: &str,
    dates: String,
    extra: Vec<Node>,
    p: &ResolvedPalette,
) -> Node {
    let mut rows = vec![
        Node::text(title, TextRole::Subheading, p.text),
        Node::apart(
            Node::text(subtitle, TextRole::Body, p.secondary),
            Node::aligned(dates, TextRole::Meta, p.secondary, Align::Right),
        ),
    ];
    rows.extend(extra);
    Node::Panel {
        fill: None,
        padding: 4.0,
        stripe: Some(p.secondary),
        children: vec![Node::column(4.0, rows)],
    }
}

fn experience(c: &Content, p: &ResolvedPalette) -> Node {
    let entries = c
        .experience()
        .iter()
        .map(|exp| {
            let mut extra = Vec::new();
            if let Some(description) = non_blank(&exp.description) {
                extra.push(Node::text(description, TextRole::Meta, p.text));
            }
            let achievements = filled(&exp.achievements);
            if !achievements.is_empty() {
                extra.push(Node::Bullets {
                    items: achievements,
                    marker: '•',
                    color: p.text,
                });
            }
            timeline_entry(
                exp.title.trim().to_string(),
                &exp.company,
                date_range(&exp.start_date, &exp.end_date, exp.is_current),
                extra,
                p,
            )
        })
        .collect();
    Node::section(
        SectionKind::Experience,
        vec![main_heading("Work Experience", p), Node::column(16.0, entries)],
    )
}

fn education(c: &Content, p: &ResolvedPalette) -> Node {
    let entries = c
        .education()
        .iter()
        .map(|edu| {
            let extra = edu
                .description
                .as_deref()
                .and_then(non_blank)
                .map(|d| Node::text(d, TextRole::Meta, p.text))
                .into_iter()
                .collect();
            timeline_entry(
                degree_line(edu),
                &edu.institution,
                date_range(&edu.start_date, &edu.end_date, edu.is_current),
                extra,
                p,
            )
        })
        .collect();
    Node::section(
        SectionKind::Education,
        vec![main_heading("Education", p), Node::column(14.0, entries)],
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
                Node::text(&project.description, TextRole::Meta, p.text),
            ];
            let technologies = filled(&project.technologies);
            if !technologies.is_empty() {
                rows.push(Node::Chips {
                    items: technologies,
                    fill: p.accent,
                    color: Rgb::WHITE,
                });
            }
            Node::Panel {
                fill: Some(p.wash(p.primary)),
                padding: 12.0,
                stripe: None,
                children: vec![Node::column(6.0, rows)],
            }
        })
        .collect();
    Node::section(
        SectionKind::Projects,
        vec![main_heading("Projects", p), Node::column(12.0, entries)],
    )
}

fn certifications(c: &Content, p: &ResolvedPalette) -> Node {
    let entries = c
        .certifications()
        .iter()
        .map(|cert| {
            Node::column(
                2.0,
                vec![
                    Node::text(&cert.name, TextRole::Subheading, p.text),
                    Node::text(certification_meta(cert), TextRole::Meta, p.secondary),
                ],
            )
        })
        .collect();
    Node::section(
        SectionKind::Certifications,
        vec![main_heading("Certifications", p), Node::column(10.0, entries)],
    )
}
