//! Step indicator support: which steps already hold committed content.

use serde::Serialize;

use crate::models::resume::{ResumeDocument, SectionKey};
use crate::wizard::steps::Step;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Complete,
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepProgress {
    pub index: usize,
    pub step: Step,
    pub label: &'static str,
    pub route: String,
    pub status: StepStatus,
    pub is_current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub steps: Vec<StepProgress>,
    pub completed_steps: usize,
    pub total_steps: usize,
    /// Share of completed steps in `0.0..=1.0`.
    pub completion: f64,
}

pub fn compute_progress(document: &ResumeDocument, current: Step) -> ProgressReport {
    let steps: Vec<StepProgress> = Step::ALL
        .iter()
        .map(|&step| StepProgress {
            index: step.index(),
            step,
            label: step.label(),
            route: step.route_path(),
            status: step_status(document, step),
            is_current: step == current,
        })
        .collect();

    let completed_steps = steps
        .iter()
        .filter(|s| s.status == StepStatus::Complete)
        .count();
    let total_steps = steps.len();

    ProgressReport {
        completion: completed_steps as f64 / total_steps as f64,
        steps,
        completed_steps,
        total_steps,
    }
}

fn step_status(document: &ResumeDocument, step: Step) -> StepStatus {
    let complete = match step.section_key() {
        SectionKey::Personal => {
            let p = &document.personal;
            !p.name.trim().is_empty() && !p.email.trim().is_empty()
        }
        key => document.has_content(key),
    };
    if complete {
        StepStatus::Complete
    } else {
        StepStatus::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Personal, Project, SkillGroup};

    #[test]
    fn test_empty_document_has_no_completed_steps() {
        let report = compute_progress(&ResumeDocument::default(), Step::Personal);
        assert_eq!(report.total_steps, 6);
        assert_eq!(report.completed_steps, 0);
        assert_eq!(report.completion, 0.0);
        assert!(report.steps[0].is_current);
        assert_eq!(report.steps[0].route, "/builder");
    }

    #[test]
    fn test_partial_document() {
        let doc = ResumeDocument {
            personal: Personal {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
            skills: vec![SkillGroup::ungrouped(["Rust"])],
            projects: vec![Project {
                name: "cvforge".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = compute_progress(&doc, Step::Skills);
        assert_eq!(report.completed_steps, 3);
        assert_eq!(report.completion, 0.5);
        assert_eq!(report.steps[1].status, StepStatus::Empty);
        assert!(report.steps[3].is_current);
    }

    #[test]
    fn test_personal_needs_name_and_email() {
        let doc = ResumeDocument {
            personal: Personal {
                name: "Jane".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let report = compute_progress(&doc, Step::Personal);
        assert_eq!(report.steps[0].status, StepStatus::Empty);
    }
}
