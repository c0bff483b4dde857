use serde::{Deserialize, Serialize};

use crate::models::resume::SectionKey;

/// Route prefix the step segments hang off.
const BUILDER_PREFIX: &str = "/builder";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Personal,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Personal,
        Step::Experience,
        Step::Education,
        Step::Skills,
        Step::Projects,
        Step::Certifications,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    pub fn is_last(self) -> bool {
        self.index() == Self::COUNT - 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Personal => "Personal Info",
            Step::Experience => "Experience",
            Step::Education => "Education",
            Step::Skills => "Skills",
            Step::Projects => "Projects",
            Step::Certifications => "Certifications",
        }
    }

    /// Path segment under `/builder`. The first step lives at the bare prefix.
    pub fn route_segment(self) -> &'static str {
        match self {
            Step::Personal => "",
            Step::Experience => "experience",
            Step::Education => "education",
            Step::Skills => "skills",
            Step::Projects => "projects",
            Step::Certifications => "certifications",
        }
    }

    pub fn route_path(self) -> String {
        match self.route_segment() {
            "" => BUILDER_PREFIX.to_string(),
            segment => format!("{BUILDER_PREFIX}/{segment}"),
        }
    }

    /// Resolves `/builder`, `/builder/<segment>` or a bare segment.
    /// `personal` is accepted as an alias of the empty segment.
    pub fn from_route_path(path: &str) -> Option<Step> {
        let trimmed = path.trim().trim_end_matches('/');
        let segment = trimmed
            .strip_prefix(BUILDER_PREFIX)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or_else(|| trimmed.trim_start_matches('/'));

        if segment == "personal" {
            return Some(Step::Personal);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.route_segment() == segment)
    }

    pub fn section_key(self) -> SectionKey {
        match self {
            Step::Personal => SectionKey::Personal,
            Step::Experience => SectionKey::Experience,
            Step::Education => SectionKey::Education,
            Step::Skills => SectionKey::Skills,
            Step::Projects => SectionKey::Projects,
            Step::Certifications => SectionKey::Certifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(Step::from_index(i), Some(*step));
        }
        assert_eq!(Step::from_index(Step::COUNT), None);
    }

    #[test]
    fn test_only_certifications_is_last() {
        assert!(Step::Certifications.is_last());
        assert!(!Step::Projects.is_last());
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Step::Personal.route_path(), "/builder");
        assert_eq!(Step::Skills.route_path(), "/builder/skills");
    }

    #[test]
    fn test_from_route_path_variants() {
        assert_eq!(Step::from_route_path("/builder"), Some(Step::Personal));
        assert_eq!(Step::from_route_path("/builder/"), Some(Step::Personal));
        assert_eq!(Step::from_route_path("personal"), Some(Step::Personal));
        assert_eq!(
            Step::from_route_path("/builder/education"),
            Some(Step::Education)
        );
        assert_eq!(Step::from_route_path("projects"), Some(Step::Projects));
        assert_eq!(Step::from_route_path("/builder/summary"), None);
    }

    #[test]
    fn test_every_route_path_resolves_to_its_step() {
        for step in Step::ALL {
            assert_eq!(Step::from_route_path(&step.route_path()), Some(step));
        }
    }
}
