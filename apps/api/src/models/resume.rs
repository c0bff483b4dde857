//! The resume document: one canonical shape for every section, plus
//! section-granular replacement.
//!
//! Entry shapes follow the builder forms (`title`/`company`/`achievements`,
//! `degree`/`fieldOfStudy`). Skills are always grouped; an unnamed group is the
//! ungrouped default.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Lowest and highest skill proficiency level.
pub const MIN_SKILL_LEVEL: u8 = 1;
pub const MAX_SKILL_LEVEL: u8 = 5;

/// Generates a list-item id. Ids only need to be unique within their list.
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    pub description: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// 1..=5 when present.
    pub level: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroup {
    pub id: String,
    /// Empty for the ungrouped default group.
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Fluent,
    Native,
}

impl Proficiency {
    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Fluent => "Fluent",
            Proficiency::Native => "Native",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub proficiency: Proficiency,
}

// ────────────────────────────────────────────────────────────────────────────
// Blank items (what an "add item" action inserts into a draft)
// ────────────────────────────────────────────────────────────────────────────

/// A list entry addressable by its client-side id.
pub trait ListItem: Clone {
    fn id(&self) -> &str;
    fn blank() -> Self;
}

macro_rules! list_item {
    ($ty:ty) => {
        impl ListItem for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn blank() -> Self {
                Self {
                    id: new_item_id(),
                    ..Default::default()
                }
            }
        }
    };
}

list_item!(Education);
list_item!(Project);
list_item!(Certification);
list_item!(Language);

impl ListItem for Experience {
    fn id(&self) -> &str {
        &self.id
    }

    /// One empty achievement line, ready to be filled in.
    fn blank() -> Self {
        Self {
            id: new_item_id(),
            achievements: vec![String::new()],
            ..Default::default()
        }
    }
}

impl ListItem for SkillGroup {
    fn id(&self) -> &str {
        &self.id
    }

    fn blank() -> Self {
        Self {
            id: new_item_id(),
            name: String::new(),
            skills: vec![Skill {
                id: new_item_id(),
                ..Default::default()
            }],
        }
    }
}

impl SkillGroup {
    /// Builds the ungrouped default group from flat skill names.
    pub fn ungrouped<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: new_item_id(),
            name: String::new(),
            skills: names
                .into_iter()
                .map(|name| Skill {
                    id: new_item_id(),
                    name: name.into(),
                    level: None,
                })
                .collect(),
        }
    }

    pub fn is_ungrouped(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Skills as clients may send them: grouped, or a flat list of names.
#[derive(Deserialize)]
#[serde(untagged)]
enum SkillsInput {
    Grouped(Vec<SkillGroup>),
    Flat(Vec<String>),
}

/// Accepts either skills shape; flat names become the ungrouped default group.
fn deserialize_skills<'de, D>(deserializer: D) -> Result<Vec<SkillGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match SkillsInput::deserialize(deserializer)? {
        SkillsInput::Grouped(groups) => groups,
        SkillsInput::Flat(names) => vec![SkillGroup::ungrouped(names)],
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Document + section replacement
// ────────────────────────────────────────────────────────────────────────────

/// Top-level fields of [`ResumeDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Personal,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
}

impl SectionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Personal => "personal",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
            SectionKey::Certifications => "certifications",
            SectionKey::Languages => "languages",
        }
    }
}

/// The full value of one top-level section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "value", rename_all = "snake_case")]
pub enum SectionValue {
    Personal(Personal),
    Experience(Vec<Experience>),
    Education(Vec<Education>),
    Skills(#[serde(deserialize_with = "deserialize_skills")] Vec<SkillGroup>),
    Projects(Vec<Project>),
    Certifications(Vec<Certification>),
    Languages(Vec<Language>),
}

impl SectionValue {
    pub fn key(&self) -> SectionKey {
        match self {
            SectionValue::Personal(_) => SectionKey::Personal,
            SectionValue::Experience(_) => SectionKey::Experience,
            SectionValue::Education(_) => SectionKey::Education,
            SectionValue::Skills(_) => SectionKey::Skills,
            SectionValue::Projects(_) => SectionKey::Projects,
            SectionValue::Certifications(_) => SectionKey::Certifications,
            SectionValue::Languages(_) => SectionKey::Languages,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal: Personal,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(deserialize_with = "deserialize_skills")]
    pub skills: Vec<SkillGroup>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
}

impl ResumeDocument {
    /// Returns a copy with exactly one top-level section replaced.
    pub fn update_section(&self, value: SectionValue) -> ResumeDocument {
        let mut next = self.clone();
        match value {
            SectionValue::Personal(v) => next.personal = v,
            SectionValue::Experience(v) => next.experience = v,
            SectionValue::Education(v) => next.education = v,
            SectionValue::Skills(v) => next.skills = v,
            SectionValue::Projects(v) => next.projects = v,
            SectionValue::Certifications(v) => next.certifications = v,
            SectionValue::Languages(v) => next.languages = v,
        }
        next
    }

    /// Snapshot of one section's current value.
    pub fn section(&self, key: SectionKey) -> SectionValue {
        match key {
            SectionKey::Personal => SectionValue::Personal(self.personal.clone()),
            SectionKey::Experience => SectionValue::Experience(self.experience.clone()),
            SectionKey::Education => SectionValue::Education(self.education.clone()),
            SectionKey::Skills => SectionValue::Skills(self.skills.clone()),
            SectionKey::Projects => SectionValue::Projects(self.projects.clone()),
            SectionKey::Certifications => {
                SectionValue::Certifications(self.certifications.clone())
            }
            SectionKey::Languages => SectionValue::Languages(self.languages.clone()),
        }
    }

    /// Whether a section holds anything worth rendering.
    pub fn has_content(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::Personal => {
                let p = &self.personal;
                [&p.name, &p.title, &p.email, &p.phone, &p.location, &p.summary]
                    .iter()
                    .any(|s| !s.trim().is_empty())
            }
            SectionKey::Experience => !self.experience.is_empty(),
            SectionKey::Education => !self.education.is_empty(),
            SectionKey::Skills => self
                .skills
                .iter()
                .any(|g| g.skills.iter().any(|s| !s.name.trim().is_empty())),
            SectionKey::Projects => !self.projects.is_empty(),
            SectionKey::Certifications => !self.certifications.is_empty(),
            SectionKey::Languages => !self.languages.is_empty(),
        }
    }

    /// Copy with the cross-field invariants applied: current entries carry no
    /// end date and skill levels sit in `1..=5`.
    pub fn normalized(&self) -> ResumeDocument {
        let mut doc = self.clone();
        for exp in &mut doc.experience {
            if exp.is_current {
                exp.end_date.clear();
            }
        }
        for edu in &mut doc.education {
            if edu.is_current {
                edu.end_date.clear();
            }
        }
        for skill in doc.skills.iter_mut().flat_map(|g| g.skills.iter_mut()) {
            skill.level = skill
                .level
                .map(|l| l.clamp(MIN_SKILL_LEVEL, MAX_SKILL_LEVEL));
        }
        doc
    }
}
