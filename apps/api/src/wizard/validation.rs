//! Submit-time acceptance policy for each step.
//!
//! Validation runs only when a step is submitted. An accepted draft comes
//! back cleaned: incomplete list entries are dropped, blank lines trimmed
//! away and the document invariants applied.

use serde::Serialize;
use thiserror::Error;

use crate::models::resume::{
    Certification, Education, Experience, Personal, Project, ResumeDocument, SectionValue,
    SkillGroup,
};

#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepValidationError {
    #[error("Please fill in the required fields: {}", missing.join(", "))]
    MissingPersonalFields { missing: Vec<&'static str> },

    #[error("Please add at least one experience with job title, company, and start date")]
    NoValidExperience,

    #[error("Please add at least one education entry with degree, institution, and start date")]
    NoValidEducation,

    #[error("Add at least one skill.")]
    NoSkills,

    #[error("Please add at least one valid project.")]
    NoValidProjects,
}

/// A draft the step policy accepted, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    pub value: SectionValue,
    /// Non-blocking remarks to surface as warnings.
    pub warnings: Vec<String>,
}

impl Accepted {
    fn clean(value: SectionValue) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }
}

pub const MISSING_TITLE_WARNING: &str =
    "A professional title is recommended; your resume will show a placeholder until you add one";

pub fn validate_step(value: SectionValue) -> Result<Accepted, StepValidationError> {
    let key = value.key();
    let accepted = match value {
        SectionValue::Personal(p) => return validate_personal(p),
        SectionValue::Experience(items) => {
            let kept = clean_experience(items);
            if kept.is_empty() {
                return Err(StepValidationError::NoValidExperience);
            }
            SectionValue::Experience(kept)
        }
        SectionValue::Education(items) => {
            let kept = clean_education(items);
            if kept.is_empty() {
                return Err(StepValidationError::NoValidEducation);
            }
            SectionValue::Education(kept)
        }
        SectionValue::Skills(groups) => {
            let kept = clean_skills(groups);
            if kept.is_empty() {
                return Err(StepValidationError::NoSkills);
            }
            SectionValue::Skills(kept)
        }
        SectionValue::Projects(items) => {
            let kept = clean_projects(items);
            if kept.is_empty() {
                return Err(StepValidationError::NoValidProjects);
            }
            SectionValue::Projects(kept)
        }
        SectionValue::Certifications(items) => {
            SectionValue::Certifications(clean_certifications(items))
        }
        SectionValue::Languages(items) => SectionValue::Languages(
            items
                .into_iter()
                .filter(|l| !is_blank(&l.name))
                .collect(),
        ),
    };

    // Route the section through the document so its invariants apply.
    let normalized = ResumeDocument::default()
        .update_section(accepted)
        .normalized()
        .section(key);
    Ok(Accepted::clean(normalized))
}

fn validate_personal(personal: Personal) -> Result<Accepted, StepValidationError> {
    let mut missing = Vec::new();
    if is_blank(&personal.name) {
        missing.push("name");
    }
    if is_blank(&personal.email) {
        missing.push("email");
    }
    if !missing.is_empty() {
        return Err(StepValidationError::MissingPersonalFields { missing });
    }

    let mut warnings = Vec::new();
    if is_blank(&personal.title) {
        warnings.push(MISSING_TITLE_WARNING.to_string());
    }

    let website = personal.website.filter(|w| !is_blank(w));
    Ok(Accepted {
        value: SectionValue::Personal(Personal {
            website,
            ..personal
        }),
        warnings,
    })
}

fn clean_experience(items: Vec<Experience>) -> Vec<Experience> {
    items
        .into_iter()
        .filter(|e| !is_blank(&e.title) && !is_blank(&e.company) && !is_blank(&e.start_date))
        .map(|mut e| {
            e.achievements = trimmed_lines(e.achievements);
            e
        })
        .collect()
}

fn clean_education(items: Vec<Education>) -> Vec<Education> {
    items
        .into_iter()
        .filter(|e| !is_blank(&e.degree) && !is_blank(&e.institution) && !is_blank(&e.start_date))
        .map(|mut e| {
            e.description = e.description.filter(|d| !is_blank(d));
            e.gpa = e.gpa.filter(|g| !is_blank(g));
            e
        })
        .collect()
}

fn clean_skills(groups: Vec<SkillGroup>) -> Vec<SkillGroup> {
    groups
        .into_iter()
        .filter_map(|mut g| {
            g.skills.retain(|s| !is_blank(&s.name));
            for skill in &mut g.skills {
                skill.name = skill.name.trim().to_string();
            }
            (!g.skills.is_empty()).then_some(g)
        })
        .collect()
}

fn clean_projects(items: Vec<Project>) -> Vec<Project> {
    items
        .into_iter()
        .filter(|p| !is_blank(&p.name) && !is_blank(&p.description))
        .map(|mut p| {
            p.technologies = trimmed_lines(p.technologies);
            p.link = p.link.filter(|l| !is_blank(l));
            p
        })
        .collect()
}

fn clean_certifications(items: Vec<Certification>) -> Vec<Certification> {
    items
        .into_iter()
        .filter(|c| !is_blank(&c.name) && !is_blank(&c.issuer))
        .collect()
}

fn trimmed_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Language, Skill};

    fn personal(name: &str, title: &str, email: &str) -> Personal {
        Personal {
            name: name.to_string(),
            title: title.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    fn job(title: &str, company: &str, start: &str) -> Experience {
        Experience {
            id: format!("{title}-{company}"),
            title: title.to_string(),
            company: company.to_string(),
            start_date: start.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_personal_requires_name_and_email() {
        let err = validate_step(SectionValue::Personal(personal("", "Dev", " "))).unwrap_err();
        assert_eq!(
            err,
            StepValidationError::MissingPersonalFields {
                missing: vec!["name", "email"]
            }
        );
        assert_eq!(
            err.to_string(),
            "Please fill in the required fields: name, email"
        );
    }

    #[test]
    fn test_personal_missing_title_is_a_warning() {
        let accepted =
            validate_step(SectionValue::Personal(personal("Jane", "", "j@x.io"))).unwrap();
        assert_eq!(accepted.warnings, vec![MISSING_TITLE_WARNING.to_string()]);
    }

    #[test]
    fn test_personal_complete_has_no_warnings() {
        let accepted =
            validate_step(SectionValue::Personal(personal("Jane", "Dev", "j@x.io"))).unwrap();
        assert!(accepted.warnings.is_empty());
    }

    #[test]
    fn test_experience_missing_company_rejected() {
        let err = validate_step(SectionValue::Experience(vec![job("Engineer", "", "2020-01")]))
            .unwrap_err();
        assert_eq!(err, StepValidationError::NoValidExperience);
    }

    #[test]
    fn test_experience_drops_incomplete_and_cleans_achievements() {
        let mut good = job("Engineer", "Acme", "2020-01");
        good.achievements = vec!["  Shipped v2 ".to_string(), "   ".to_string()];
        good.is_current = true;
        good.end_date = "2022-01".to_string();
        let accepted = validate_step(SectionValue::Experience(vec![
            good,
            job("", "Nowhere", "2019-01"),
        ]))
        .unwrap();

        match accepted.value {
            SectionValue::Experience(v) => {
                assert_eq!(v.len(), 1);
                assert_eq!(v[0].achievements, vec!["Shipped v2"]);
                assert!(v[0].end_date.is_empty());
            }
            other => panic!("unexpected section {:?}", other.key()),
        }
    }

    #[test]
    fn test_education_requires_one_complete_entry() {
        let partial = Education {
            degree: "BSc".to_string(),
            institution: "MIT".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_step(SectionValue::Education(vec![partial])).unwrap_err(),
            StepValidationError::NoValidEducation
        );
    }

    #[test]
    fn test_skills_require_one_named_skill() {
        let empty = SkillGroup {
            id: "g".to_string(),
            name: "Tools".to_string(),
            skills: vec![Skill::default()],
        };
        assert_eq!(
            validate_step(SectionValue::Skills(vec![empty])).unwrap_err(),
            StepValidationError::NoSkills
        );
    }

    #[test]
    fn test_skills_drop_empty_groups_and_clamp_levels() {
        let group = SkillGroup {
            id: "g".to_string(),
            name: String::new(),
            skills: vec![
                Skill {
                    id: "s".to_string(),
                    name: " Rust ".to_string(),
                    level: Some(9),
                },
                Skill::default(),
            ],
        };
        let empty_group = SkillGroup {
            id: "e".to_string(),
            name: "Empty".to_string(),
            skills: vec![],
        };
        let accepted = validate_step(SectionValue::Skills(vec![group, empty_group])).unwrap();
        match accepted.value {
            SectionValue::Skills(groups) => {
                assert_eq!(groups.len(), 1);
                assert_eq!(groups[0].skills.len(), 1);
                assert_eq!(groups[0].skills[0].name, "Rust");
                assert_eq!(groups[0].skills[0].level, Some(5));
            }
            other => panic!("unexpected section {:?}", other.key()),
        }
    }

    #[test]
    fn test_projects_filtered_to_name_and_description() {
        let keep = Project {
            id: "p1".to_string(),
            name: "Site".to_string(),
            description: "A site".to_string(),
            technologies: vec![" rust ".to_string(), "".to_string()],
            link: Some(" ".to_string()),
        };
        let drop = Project {
            id: "p2".to_string(),
            name: "Nameless description".to_string(),
            ..Default::default()
        };
        let accepted = validate_step(SectionValue::Projects(vec![keep, drop])).unwrap();
        match accepted.value {
            SectionValue::Projects(v) => {
                assert_eq!(v.len(), 1);
                assert_eq!(v[0].technologies, vec!["rust"]);
                assert_eq!(v[0].link, None);
            }
            other => panic!("unexpected section {:?}", other.key()),
        }
    }

    #[test]
    fn test_projects_need_one_named_and_described_entry() {
        assert_eq!(
            validate_step(SectionValue::Projects(vec![Project::default()])),
            Err(StepValidationError::NoValidProjects)
        );
        assert_eq!(
            validate_step(SectionValue::Projects(vec![Project {
                name: "cvforge".to_string(),
                ..Default::default()
            }])),
            Err(StepValidationError::NoValidProjects)
        );
    }

    #[test]
    fn test_empty_certifications_accepted() {
        assert_eq!(
            validate_step(SectionValue::Certifications(vec![]))
                .unwrap()
                .value,
            SectionValue::Certifications(vec![])
        );
    }

    #[test]
    fn test_certifications_need_name_and_issuer() {
        let accepted = validate_step(SectionValue::Certifications(vec![
            Certification {
                name: "CKA".to_string(),
                issuer: "CNCF".to_string(),
                ..Default::default()
            },
            Certification {
                name: "Orphan".to_string(),
                ..Default::default()
            },
        ]))
        .unwrap();
        match accepted.value {
            SectionValue::Certifications(v) => assert_eq!(v.len(), 1),
            other => panic!("unexpected section {:?}", other.key()),
        }
    }

    #[test]
    fn test_languages_drop_blank_names() {
        let accepted = validate_step(SectionValue::Languages(vec![
            Language {
                name: "German".to_string(),
                ..Default::default()
            },
            Language::default(),
        ]))
        .unwrap();
        match accepted.value {
            SectionValue::Languages(v) => assert_eq!(v.len(), 1),
            other => panic!("unexpected section {:?}", other.key()),
        }
    }
}
